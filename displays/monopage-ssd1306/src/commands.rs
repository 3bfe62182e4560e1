//! SSD1306 command set

use crate::driver::PanelConfig;

/// Most commands accepted in one transaction
pub const MAX_COMMANDS: usize = 32;

pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const SET_CONTRAST: u8 = 0x81;
pub const SET_NORMAL: u8 = 0xA6;
pub const SET_INVERSE: u8 = 0xA7;
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
pub const SET_COM_PINS: u8 = 0xDA;
pub const SET_VCOM_DETECT: u8 = 0xDB;
pub const SET_CLOCK_DIV: u8 = 0xD5;
pub const SET_PRECHARGE: u8 = 0xD9;
pub const SET_MUX_RATIO: u8 = 0xA8;
pub const SET_START_LINE: u8 = 0x40;
pub const SET_CHARGE_PUMP: u8 = 0x8D;
pub const SET_ADDRESSING_MODE: u8 = 0x20;
/// Column 0 mapped to SEG0 (mirrored on most modules)
pub const SEG_REMAP_FLIPPED: u8 = 0xA0;
/// Column 127 mapped to SEG0
pub const SEG_REMAP_NORMAL: u8 = 0xA1;
/// COM scan from COM0 (upside down on most modules)
pub const COM_SCAN_FLIPPED: u8 = 0xC0;
/// COM scan from COM[N-1]
pub const COM_SCAN_NORMAL: u8 = 0xC8;

/// Bytes in the power-up sequence
pub const INIT_SEQUENCE_LEN: usize = 22;

const _: () = assert!(INIT_SEQUENCE_LEN <= MAX_COMMANDS);

/// Horizontal addressing: column then page auto-increment
const HORIZONTAL_ADDRESSING: u8 = 0x00;

/// Orientation commands for the given rotation
pub const fn orientation(rotate_180: bool) -> [u8; 2] {
    if rotate_180 {
        [SEG_REMAP_FLIPPED, COM_SCAN_FLIPPED]
    } else {
        [SEG_REMAP_NORMAL, COM_SCAN_NORMAL]
    }
}

/// Power-up sequence, ending with the display switched on
pub const fn init_sequence(config: &PanelConfig) -> [u8; INIT_SEQUENCE_LEN] {
    let [seg, com] = orientation(config.rotate_180);
    // 32-row glass uses sequential COM pins
    let com_pins = if config.height <= 32 { 0x02 } else { 0x12 };

    [
        DISPLAY_OFF,
        SET_CLOCK_DIV,
        0x80, // Default clock
        SET_DISPLAY_OFFSET,
        0x00,
        SET_START_LINE,
        SET_CHARGE_PUMP,
        0x14, // Enable charge pump
        SET_ADDRESSING_MODE,
        HORIZONTAL_ADDRESSING,
        seg,
        com,
        SET_COM_PINS,
        com_pins,
        SET_CONTRAST,
        config.contrast,
        SET_PRECHARGE,
        0xF1,
        SET_VCOM_DETECT,
        0x40,
        SET_NORMAL,
        DISPLAY_ON,
    ]
}

/// Multiplex ratio for a panel `height` rows tall
pub const fn mux_ratio(height: u8) -> [u8; 2] {
    [SET_MUX_RATIO, height.saturating_sub(1)]
}
