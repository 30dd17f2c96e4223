//! Bit-banged open-drain bus of the seven-segment controller
//!
//! The controller talks over two open-drain lines, DIO and CLK, pulled up
//! externally. The host never drives a line high: it either pulls the line
//! low or releases it and lets the pull-up take over. This lets the
//! controller pull DIO low itself to acknowledge a byte.
//!
//! ## Framing
//!
//! - **Start**: DIO falls while CLK is released
//! - **Byte**: 8 bits, LSB first, DIO set while CLK is low and sampled on
//!   the rising edge
//! - **Ack**: a ninth clock during which the controller holds DIO low
//! - **Stop**: DIO rises while CLK is released
//!
//! Every step is separated by the bit delay ([`DEFAULT_BIT_DELAY_US`] by
//! default).
//!
//! ## Example
//!
//! ```
//! use gridcade::{Ack, OpenDrainLine, SegmentBus};
//! # use core::convert::Infallible;
//! # struct Line;
//! # impl OpenDrainLine for Line {
//! #     type Error = Infallible;
//! #     fn drive_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn release(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn sense(&mut self) -> Result<bool, Infallible> { Ok(false) }
//! # }
//! # struct NoDelay;
//! # impl embedded_hal::delay::DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = NoDelay;
//! let mut bus = SegmentBus::new(Line, Line);
//!
//! bus.start(&mut delay)?;
//! let ack = bus.write_byte(0x40, &mut delay)?;
//! bus.stop(&mut delay)?;
//! # assert_eq!(ack, Ack::Acknowledged);
//! # Ok::<(), gridcade::BusError<Infallible>>(())
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

/// Default delay between bus steps in microseconds
pub const DEFAULT_BIT_DELAY_US: u32 = 10;

/// One open-drain line
///
/// Implementations switch between pulling the line low and letting it
/// float. On MCUs without an open-drain output mode this means switching
/// the pin between output-low and input.
pub trait OpenDrainLine {
    /// Error type for line operations
    type Error: Debug;

    /// Pull the line low
    fn drive_low(&mut self) -> Result<(), Self::Error>;

    /// Stop driving the line; the pull-up takes it high unless another
    /// device holds it low
    fn release(&mut self) -> Result<(), Self::Error>;

    /// Read the line level, `true` for high
    fn sense(&mut self) -> Result<bool, Self::Error>;
}

/// [`OpenDrainLine`] on top of an embedded-hal pin configured as open-drain
///
/// Setting the pin high releases the line, setting it low pulls the line
/// low; the input side reads the actual line level.
#[derive(Debug)]
pub struct OpenDrainPin<P> {
    pin: P,
}

impl<P> OpenDrainPin<P>
where
    P: OutputPin + InputPin,
{
    /// Wrap an open-drain pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> OpenDrainLine for OpenDrainPin<P>
where
    P: OutputPin + InputPin,
{
    type Error = P::Error;

    fn drive_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low()
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high()
    }

    fn sense(&mut self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }
}

/// Acknowledge bit of one written byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ack {
    /// The controller held DIO low during the ninth clock
    Acknowledged,
    /// DIO stayed high during the ninth clock
    ///
    /// The host then pulls DIO low with CLK released, which the controller
    /// reads as a repeated start.
    Missing,
}

/// Errors that can occur on the segment bus
///
/// Tells which line failed; generic over the line error type.
#[derive(Debug)]
pub enum BusError<E> {
    /// DIO line error
    Data(E),
    /// CLK line error
    Clock(E),
}

impl<E: Debug> core::fmt::Display for BusError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Data(e) => write!(f, "DIO line error: {e:?}"),
            Self::Clock(e) => write!(f, "CLK line error: {e:?}"),
        }
    }
}

impl<E: Debug> core::error::Error for BusError<E> {}

/// Start/stop/byte primitives over two open-drain lines
pub struct SegmentBus<DIO, CLK> {
    /// Data line
    dio: DIO,
    /// Clock line
    clk: CLK,
    /// Delay between steps in microseconds
    bit_delay_us: u32,
}

impl<DIO, CLK, E> SegmentBus<DIO, CLK>
where
    DIO: OpenDrainLine<Error = E>,
    CLK: OpenDrainLine<Error = E>,
    E: Debug,
{
    /// Create a bus on two lines
    ///
    /// The lines are left as they are; call [`idle`](Self::idle) before the
    /// first frame so a start condition sees CLK high.
    pub fn new(dio: DIO, clk: CLK) -> Self {
        Self {
            dio,
            clk,
            bit_delay_us: DEFAULT_BIT_DELAY_US,
        }
    }

    /// Set the delay between bus steps in microseconds
    ///
    /// Default is 10µs. Longer delays help with long wires or weak pull-ups.
    pub fn set_bit_delay(&mut self, delay_us: u32) -> &mut Self {
        self.bit_delay_us = delay_us;
        self
    }

    /// Get the current delay between bus steps in microseconds
    pub fn bit_delay(&self) -> u32 {
        self.bit_delay_us
    }

    /// Release both lines
    pub fn release(self) -> (DIO, CLK) {
        (self.dio, self.clk)
    }

    fn wait<D: DelayNs>(&self, delay: &mut D) {
        delay.delay_us(self.bit_delay_us);
    }

    /// Release both lines, DIO first
    pub fn idle<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BusError<E>> {
        self.dio.release().map_err(BusError::Data)?;
        self.wait(delay);
        self.clk.release().map_err(BusError::Clock)?;
        self.wait(delay);
        Ok(())
    }

    /// Issue a start condition
    pub fn start<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BusError<E>> {
        self.dio.drive_low().map_err(BusError::Data)?;
        self.wait(delay);
        Ok(())
    }

    /// Issue a stop condition, leaving both lines released
    pub fn stop<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), BusError<E>> {
        self.dio.drive_low().map_err(BusError::Data)?;
        self.wait(delay);
        self.clk.release().map_err(BusError::Clock)?;
        self.wait(delay);
        self.dio.release().map_err(BusError::Data)?;
        self.wait(delay);
        Ok(())
    }

    /// Write one byte LSB first and clock in the acknowledge bit
    ///
    /// A missing acknowledge is not an error and returns [`Ack::Missing`].
    /// DIO is then pulled low while CLK is still high, which is a repeated
    /// start on the wire: the controller sees each following byte open a new
    /// transfer, and the closing stop condition is unaffected.
    pub fn write_byte<D: DelayNs>(&mut self, byte: u8, delay: &mut D) -> Result<Ack, BusError<E>> {
        let mut data = byte;
        for _ in 0..8 {
            self.clk.drive_low().map_err(BusError::Clock)?;
            self.wait(delay);

            if data & 0x01 != 0 {
                self.dio.release().map_err(BusError::Data)?;
            } else {
                self.dio.drive_low().map_err(BusError::Data)?;
            }
            self.wait(delay);

            self.clk.release().map_err(BusError::Clock)?;
            self.wait(delay);
            data >>= 1;
        }

        self.clk.drive_low().map_err(BusError::Clock)?;
        self.dio.release().map_err(BusError::Data)?;
        self.wait(delay);

        self.clk.release().map_err(BusError::Clock)?;
        self.wait(delay);

        let ack = if self.dio.sense().map_err(BusError::Data)? {
            self.dio.drive_low().map_err(BusError::Data)?;
            Ack::Missing
        } else {
            Ack::Acknowledged
        };
        self.wait(delay);

        self.clk.drive_low().map_err(BusError::Clock)?;
        self.wait(delay);

        Ok(ack)
    }
}
