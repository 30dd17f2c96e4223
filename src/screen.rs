//! Dot-matrix panel driver

use log::{debug, info};

use crate::canvas::Frame;
use crate::command::{
    DECODE_MODE, DISPLAY_TEST, INTENSITY, MAX_INTENSITY, ROW_BASE, SCAN_ALL_ROWS, SCAN_LIMIT,
    SHUTDOWN, SHUTDOWN_ENTER, SHUTDOWN_NORMAL,
};
use crate::input::map_range;
use crate::interface::RegisterInterface;

type ScreenResult<I> = core::result::Result<(), <I as RegisterInterface>::Error>;

/// Driver for the 8x8 dot-matrix panel
///
/// Row bytes of a [`Frame`] keep column 0 in the MSB; the panel wiring
/// expects column 0 in the LSB, so every row is bit-reversed on the way out.
///
/// ## Example
///
/// ```
/// use gridcade::{Frame, RegisterInterface, Screen};
/// # use core::convert::Infallible;
/// # #[derive(Default)]
/// # struct Recorder(Vec<(u8, u8)>);
/// # impl RegisterInterface for Recorder {
/// #     type Error = Infallible;
/// #     fn write_register(&mut self, address: u8, data: u8) -> Result<(), Infallible> {
/// #         self.0.push((address, data));
/// #         Ok(())
/// #     }
/// # }
/// let mut screen = Screen::new(Recorder::default());
/// screen.init(8)?;
///
/// let frame = Frame::from_rows([0b1000_0000, 0, 0, 0, 0, 0, 0, 0]);
/// screen.render(&frame)?;
/// # assert_eq!(screen.interface().0.last(), Some(&(0x08, 0x00)));
/// # assert!(screen.interface().0.contains(&(0x01, 0b0000_0001)));
/// # Ok::<(), Infallible>(())
/// ```
pub struct Screen<I>
where
    I: RegisterInterface,
{
    /// Hardware interface
    interface: I,
}

impl<I> Screen<I>
where
    I: RegisterInterface,
{
    /// Create a new screen; the panel is not touched until [`Screen::init`]
    pub fn new(interface: I) -> Self {
        Self { interface }
    }

    /// Borrow the hardware interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Release the hardware interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Run the startup sequence and blank the panel
    ///
    /// Raw row data (no BCD decode), display test off, all 8 rows scanned,
    /// normal operation, `intensity` (clamped to 0x0F).
    pub fn init(&mut self, intensity: u8) -> ScreenResult<I> {
        let intensity = intensity.min(MAX_INTENSITY);
        info!("matrix init, intensity {intensity}");

        self.write_register(DECODE_MODE, 0x00)?;
        self.write_register(DISPLAY_TEST, 0x00)?;
        self.write_register(SCAN_LIMIT, SCAN_ALL_ROWS)?;
        self.write_register(SHUTDOWN, SHUTDOWN_NORMAL)?;
        self.write_register(INTENSITY, intensity)?;
        self.clear()
    }

    /// Write a raw register
    pub fn write_register(&mut self, address: u8, data: u8) -> ScreenResult<I> {
        self.interface.write_register(address, data)
    }

    /// Push all eight rows of a frame
    pub fn render(&mut self, frame: &Frame) -> ScreenResult<I> {
        for (address, row) in (ROW_BASE..).zip(frame.rows().iter()) {
            self.write_register(address, row.reverse_bits())?;
        }
        Ok(())
    }

    /// Turn every LED off
    pub fn clear(&mut self) -> ScreenResult<I> {
        self.render(&Frame::new())
    }

    /// Set brightness as a percentage
    ///
    /// `percent` is clamped to 100 and mapped onto intensity 1..=15, so the
    /// panel never goes fully dark.
    pub fn brightness(&mut self, percent: u8) -> ScreenResult<I> {
        let intensity = map_range(i32::from(percent.min(100)), 0, 100, 1, i32::from(MAX_INTENSITY));
        debug!("matrix brightness {percent}% -> {intensity}");
        self.write_register(INTENSITY, intensity as u8)
    }

    /// Enter or leave shutdown mode; frame contents are retained
    pub fn shutdown(&mut self, shutdown: bool) -> ScreenResult<I> {
        let data = if shutdown {
            SHUTDOWN_ENTER
        } else {
            SHUTDOWN_NORMAL
        };
        self.write_register(SHUTDOWN, data)
    }

    /// Light every LED regardless of frame contents, or return to normal
    pub fn display_test(&mut self, enabled: bool) -> ScreenResult<I> {
        self.write_register(DISPLAY_TEST, u8::from(enabled))
    }
}
