//! Dot-matrix hardware interface
//!
//! This module provides the [`RegisterInterface`] trait and the
//! [`ShiftRegisterInterface`] struct for programming the matrix controller's
//! registers over a 3-wire synchronous shift bus.
//!
//! ## Hardware Requirements
//!
//! The controller requires 3 GPIO output pins:
//! - **DIN**: serial data, sampled on the rising clock edge
//! - **CLK**: shift clock
//! - **LOAD**: latch, the shifted word is taken over on its rising edge
//!
//! ## Wire Format
//!
//! One transaction is `LOAD low`, 8 address bits, 8 data bits (both MSB
//! first), `LOAD high`. Each bit is: set DIN, raise CLK, lower CLK.
//!
//! ## Example
//!
//! ```rust
//! use embedded_hal::digital::OutputPin;
//! use gridcade::{RegisterInterface, ShiftRegisterInterface};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! // Create interface from data, clock and latch pins
//! let mut interface = ShiftRegisterInterface::new(MockPin, MockPin, MockPin);
//!
//! // Intensity register, half brightness
//! let _ = interface.write_register(0x0A, 0x08);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::{OutputPin, PinState};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the dot-matrix controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Screen`](crate::screen::Screen) to work with any
/// transport that can deliver one address/data pair per call.
///
/// ## Implementing
///
/// For most cases, use the provided [`ShiftRegisterInterface`]. If the
/// controller sits on a hardware SPI peripheral, implement this trait on
/// your own type and send the two bytes as one chip-selected transfer.
pub trait RegisterInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Write `data` to the register at `address` in one transaction
    ///
    /// # Errors
    ///
    /// Returns an error if a GPIO operation fails.
    #[allow(clippy::type_complexity)]
    fn write_register(&mut self, address: u8, data: u8) -> InterfaceResult<(), Self::Error>;
}

impl<T: RegisterInterface + ?Sized> RegisterInterface for &mut T {
    type Error = T::Error;

    fn write_register(&mut self, address: u8, data: u8) -> InterfaceResult<(), Self::Error> {
        T::write_register(self, address, data)
    }
}

/// Errors that can occur at the interface level
///
/// Tells which line failed; generic over the GPIO error type.
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// Data pin error
    Data(PinErr),
    /// Clock pin error
    Clock(PinErr),
    /// Latch pin error
    Latch(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Data(e) => write!(f, "Data pin error: {e:?}"),
            Self::Clock(e) => write!(f, "Clock pin error: {e:?}"),
            Self::Latch(e) => write!(f, "Latch pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// Bit-banged 3-wire interface for the dot-matrix controller
///
/// Implements [`RegisterInterface`] for embedded-hal v1.0 output pins.
///
/// ## Type Parameters
///
/// * `DIN` - Serial data pin implementing [`OutputPin`]
/// * `CLK` - Clock pin implementing [`OutputPin`]
/// * `LOAD` - Latch pin implementing [`OutputPin`]
pub struct ShiftRegisterInterface<DIN, CLK, LOAD> {
    /// Serial data pin
    din: DIN,
    /// Shift clock pin (idle low)
    clk: CLK,
    /// Latch pin (idle high)
    load: LOAD,
}

impl<DIN, CLK, LOAD> ShiftRegisterInterface<DIN, CLK, LOAD>
where
    DIN: OutputPin,
    CLK: OutputPin,
    LOAD: OutputPin,
{
    /// Create a new interface
    ///
    /// The pins are not touched until the first transaction.
    ///
    /// # Arguments
    ///
    /// * `din` - Serial data pin
    /// * `clk` - Clock pin
    /// * `load` - Latch pin
    pub fn new(din: DIN, clk: CLK, load: LOAD) -> Self {
        Self { din, clk, load }
    }

    /// Release the pins
    pub fn release(self) -> (DIN, CLK, LOAD) {
        (self.din, self.clk, self.load)
    }
}

impl<DIN, CLK, LOAD, PinErr> ShiftRegisterInterface<DIN, CLK, LOAD>
where
    DIN: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    LOAD: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    /// Shift one byte out, MSB first
    fn shift_out(&mut self, byte: u8) -> InterfaceResult<(), InterfaceError<PinErr>> {
        for bit in (0..8).rev() {
            let state = PinState::from(byte & (1 << bit) != 0);
            self.din.set_state(state).map_err(InterfaceError::Data)?;
            self.clk.set_high().map_err(InterfaceError::Clock)?;
            self.clk.set_low().map_err(InterfaceError::Clock)?;
        }
        Ok(())
    }
}

impl<DIN, CLK, LOAD, PinErr> RegisterInterface for ShiftRegisterInterface<DIN, CLK, LOAD>
where
    DIN: OutputPin<Error = PinErr>,
    CLK: OutputPin<Error = PinErr>,
    LOAD: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn write_register(&mut self, address: u8, data: u8) -> InterfaceResult<(), Self::Error> {
        self.load.set_low().map_err(InterfaceError::Latch)?;
        self.shift_out(address)?;
        self.shift_out(data)?;
        self.load.set_high().map_err(InterfaceError::Latch)?;
        Ok(())
    }
}
