//! Register addresses and command bytes of both panel controllers
//!
//! ## Dot-matrix controller (MAX7219 class)
//!
//! Every transaction is one 16-bit word: register address, then data, shifted
//! out MSB first between a falling and a rising edge of the latch line. Row
//! registers are [`ROW_BASE`]`..=`[`ROW_BASE`]` + 7`.
//!
//! ## Seven-segment controller (TM1637 class)
//!
//! Bytes travel LSB first between start and stop conditions, each followed
//! by an ack clock. A render is a [`DATA_AUTO_INCREMENT`] frame followed by
//! an [`ADDRESS_BASE`] frame carrying the four digit bytes.
//!
//! ## Example
//!
//! ```
//! use gridcade::{command, RegisterInterface};
//! # use core::convert::Infallible;
//! # struct Recorder(Option<(u8, u8)>);
//! # impl RegisterInterface for Recorder {
//! #     type Error = Infallible;
//! #     fn write_register(&mut self, address: u8, data: u8) -> Result<(), Infallible> {
//! #         self.0 = Some((address, data));
//! #         Ok(())
//! #     }
//! # }
//! # let mut interface = Recorder(None);
//! // Leave shutdown mode
//! let _ = interface.write_register(command::SHUTDOWN, command::SHUTDOWN_NORMAL);
//! # assert_eq!(interface.0, Some((0x0C, 0x01)));
//! ```

// Dot-matrix registers

/// No-op register (0x00)
///
/// Used to pass data through daisy-chained controllers.
pub const NO_OP: u8 = 0x00;

/// First row register (0x01)
///
/// Row `r` of the panel lives at `ROW_BASE + r`.
pub const ROW_BASE: u8 = 0x01;

/// Decode-mode register (0x09)
///
/// 0x00 disables BCD decoding so row data is a raw bit pattern.
pub const DECODE_MODE: u8 = 0x09;

/// Intensity register (0x0A)
///
/// Accepts 0x00..=0x0F.
pub const INTENSITY: u8 = 0x0A;

/// Scan-limit register (0x0B)
///
/// Number of scanned rows minus one; 7 scans all eight.
pub const SCAN_LIMIT: u8 = 0x0B;

/// Shutdown register (0x0C)
pub const SHUTDOWN: u8 = 0x0C;

/// Display-test register (0x0F)
///
/// 0x01 lights every LED at full intensity, 0x00 returns to normal operation.
pub const DISPLAY_TEST: u8 = 0x0F;

/// Data for [`SHUTDOWN`] entering shutdown mode
pub const SHUTDOWN_ENTER: u8 = 0x00;

/// Data for [`SHUTDOWN`] resuming normal operation
pub const SHUTDOWN_NORMAL: u8 = 0x01;

/// Data for [`SCAN_LIMIT`] scanning all eight rows
pub const SCAN_ALL_ROWS: u8 = 0x07;

/// Highest value accepted by [`INTENSITY`]
pub const MAX_INTENSITY: u8 = 0x0F;

// Seven-segment commands

/// Data command: write display registers with auto-incrementing address (0x40)
pub const DATA_AUTO_INCREMENT: u8 = 0x40;

/// Address command for the first digit (0xC0)
pub const ADDRESS_BASE: u8 = 0xC0;

/// Display-control command base (0x80)
///
/// Low three bits select the pulse width (0..=7), bit 3 turns the panel on.
pub const DISPLAY_CONTROL: u8 = 0x80;

/// Display-control bit turning the panel on
pub const DISPLAY_ON: u8 = 0x08;

/// Decimal-point segment bit of a digit byte
pub const SEGMENT_POINT: u8 = 0x80;
