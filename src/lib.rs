//! Grid Game Engine for an 8x8 Dot Matrix and a 4-Digit Seven-Segment Panel
//!
//! Plays a small catalog of grid games (pong, snake, falling blocks and space
//! invaders) on two LED panels: an 8x8 dot matrix behind a MAX7219-class
//! controller and a 4-digit seven-segment display behind a TM1637-class
//! controller.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration for the dot matrix (with `graphics` feature)
//! - Bit-banged drivers for both controllers, no peripheral requirements
//! - Integer quarter-turn and floating-point rotation of grid shapes
//! - Knob-driven menu, level and brightness
//!
//! ## Usage
//!
//! ```rust
//! use gridcade::{
//!     Builder, Engine, OpenDrainLine, Screen, SegmentBus, SegmentDisplay,
//!     ShiftRegisterInterface, Variant,
//! };
//! use embedded_hal::digital::OutputPin;
//! # use core::convert::Infallible;
//! # use gridcade::{Button, InputSource, Knob};
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Line;
//! # impl OpenDrainLine for Line {
//! #     type Error = Infallible;
//! #     fn drive_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn release(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn sense(&mut self) -> Result<bool, Infallible> { Ok(false) }
//! # }
//! # struct Knobs;
//! # impl InputSource for Knobs {
//! #     fn knob(&mut self, _knob: Knob) -> u16 { 512 }
//! #     fn button(&mut self, _button: Button) -> bool { true }
//! # }
//! # struct NoDelay;
//! # impl embedded_hal::delay::DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let (din, clk, load) = (MockPin, MockPin, MockPin);
//! # let (dio, seg_clk) = (Line, Line);
//! # let mut inputs = Knobs;
//! # let mut delay = NoDelay;
//! let screen = Screen::new(ShiftRegisterInterface::new(din, clk, load));
//! let display = SegmentDisplay::new(SegmentBus::new(dio, seg_clk));
//! let config = match Builder::new().seed(0x5EED).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut engine = Engine::new(screen, display, Variant::catalog(), config);
//! let _ = engine.init(&mut delay);
//!
//! // Pick a game with the first knob, confirm with any button
//! let _ = engine.select(&mut inputs, &mut delay);
//!
//! // Normally `engine.run(..)`; here a single tick
//! let _ = engine.tick(&mut inputs, &mut delay);
//! ```

#![no_std]

#[cfg(test)]
extern crate alloc;

/// Open-drain bus of the seven-segment controller
pub mod bus;
/// Frame, layer and canvas surfaces
pub mod canvas;
/// Controller register and command definitions
pub mod command;
/// Engine configuration types and builder
pub mod config;
/// Game selection and the tick loop
pub mod engine;
/// Error types for the engine
pub mod error;
/// The games
pub mod game;
/// Points and point sets
pub mod geometry;
/// Knobs and buttons
pub mod input;
/// Dot-matrix hardware interface abstraction
pub mod interface;
/// Pseudo-random numbers
pub mod rng;
/// Coordinate rotation utilities
pub mod rotation;
/// Dot-matrix panel driver
pub mod screen;
/// Seven-segment panel driver
pub mod segment;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod mock;

pub use bus::{Ack, BusError, DEFAULT_BIT_DELAY_US, OpenDrainLine, OpenDrainPin, SegmentBus};
pub use canvas::{Canvas, Frame, Layer, encode_digit};
pub use config::{Builder, Config};
pub use engine::{Arcade, Engine, EngineError, Phase, TickReport};
pub use error::{BuilderError, Error};
pub use game::{Context, Game, Invaders, Pace, Pong, Snake, Tetris, Variant};
pub use geometry::{Point, PointSet};
pub use input::{Button, InputSource, InputState, Knob, map_range};
pub use interface::{InterfaceError, RegisterInterface, ShiftRegisterInterface};
pub use rng::GameRng;
pub use rotation::{Rounding, ortho_rotate, rotate};
pub use screen::Screen;
pub use segment::{AckSummary, SegmentDisplay};
