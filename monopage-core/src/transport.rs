//! Byte sink for framebuffer flushes

/// Link to the physical panel
///
/// A payload is one bus transaction: a control prefix (`0x00` commands,
/// `0x40` pixel data) followed by its bytes. `transmit` is a bounded,
/// blocking call; the engine never retries a failed payload.
pub trait Transport {
    /// Error type for a failed transmission
    type Error;

    /// Sends one payload
    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error>;

    /// Whether the panel answered its last initialisation
    fn is_ready(&self) -> bool;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).transmit(payload)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
