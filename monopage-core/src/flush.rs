//! Framebuffer upload
//!
//! Every flush first sets the column and page window to the whole screen,
//! then streams pixel data either one page per transaction or as a single
//! transaction for the full frame.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::framebuffer::FrameBuffer;
use crate::transport::Transport;

/// Control byte announcing a command stream
pub const COMMAND_PREFIX: u8 = 0x00;

/// Control byte announcing pixel data
pub const DATA_PREFIX: u8 = 0x40;

/// Largest pixel payload sent in one transaction (a full 128x64 frame)
pub const MAX_FRAME_BYTES: usize = 1024;

/// Set column address
const SET_COLUMN_ADDRESS: u8 = 0x21;

/// Set page address
const SET_PAGE_ADDRESS: u8 = 0x22;

/// Upload granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushMode {
    /// One transaction per page
    #[default]
    Paged,
    /// The whole frame in one transaction
    Full,
}

/// Flush failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlushError<E> {
    /// Transport reports the panel as not connected
    NotReady,
    /// Payload does not fit a single transaction
    FrameTooLarge,
    /// Transport failed to send a payload
    Transport(E),
}

/// Command payload selecting the full `width` x `pages` window
pub fn window_command(width: usize, pages: usize) -> Option<[u8; 7]> {
    let last_col = u8::try_from(width.checked_sub(1)?).ok()?;
    let last_page = u8::try_from(pages.checked_sub(1)?).ok()?;
    Some([
        COMMAND_PREFIX,
        SET_COLUMN_ADDRESS,
        0,
        last_col,
        SET_PAGE_ADDRESS,
        0,
        last_page,
    ])
}

fn data_payload(bytes: &[u8]) -> Option<Vec<u8, { MAX_FRAME_BYTES + 1 }>> {
    let mut payload = Vec::new();
    payload.push(DATA_PREFIX).ok()?;
    payload.extend_from_slice(bytes).ok()?;
    Some(payload)
}

/// Uploads `frame` through `transport`.
///
/// In [`FlushMode::Paged`] every page is attempted even after a failure and
/// the first failure is reported. The framebuffer is never modified.
pub fn flush<T, const W: usize, const P: usize>(
    frame: &FrameBuffer<W, P>,
    transport: &mut T,
    mode: FlushMode,
) -> Result<(), FlushError<T::Error>>
where
    T: Transport,
{
    if !transport.is_ready() {
        #[cfg(feature = "defmt")]
        defmt::warn!("flush skipped: panel not ready");
        return Err(FlushError::NotReady);
    }

    let window = window_command(W, P).ok_or(FlushError::FrameTooLarge)?;
    let chunk = match mode {
        FlushMode::Paged => W,
        FlushMode::Full => W * P,
    };
    if chunk > MAX_FRAME_BYTES {
        return Err(FlushError::FrameTooLarge);
    }

    transport.transmit(&window).map_err(|e| {
        #[cfg(feature = "defmt")]
        defmt::warn!("flush: window command failed");
        FlushError::Transport(e)
    })?;

    match mode {
        FlushMode::Full => {
            let payload = data_payload(frame.as_bytes()).ok_or(FlushError::FrameTooLarge)?;
            transport.transmit(&payload).map_err(|e| {
                #[cfg(feature = "defmt")]
                defmt::warn!("flush: frame transmit failed");
                FlushError::Transport(e)
            })
        }
        FlushMode::Paged => {
            let mut first_error = None;
            for page in 0..P {
                let Some(bytes) = frame.page(page) else {
                    continue;
                };
                let payload = data_payload(bytes).ok_or(FlushError::FrameTooLarge)?;
                if let Err(e) = transport.transmit(&payload) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("flush: page {} transmit failed", page);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
            match first_error {
                Some(e) => Err(FlushError::Transport(e)),
                None => Ok(()),
            }
        }
    }
}
