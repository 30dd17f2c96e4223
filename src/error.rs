//! Error types for the engine
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and engine operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors while driving the panels
//! - [`InterfaceError`](crate::interface::InterfaceError) - Dot-matrix pin errors
//! - [`BusError`](crate::bus::BusError) - Seven-segment line errors
//!
//! A missing acknowledge on the seven-segment bus is not an error; see
//! [`AckSummary`](crate::segment::AckSummary).
//!
//! ## Example
//!
//! ```
//! use gridcade::{Builder, BuilderError};
//!
//! // Levels stop at 4
//! let result = Builder::new().level_max(7).build();
//! assert!(matches!(result, Err(BuilderError::InvalidLevelRange { max: 7 })));
//!
//! // Intensity register holds 0..=15
//! let result = Builder::new().startup_intensity(20).build();
//! assert!(result.is_err());
//! ```

use core::fmt::Debug;

use crate::command::MAX_INTENSITY;
use crate::game::MAX_LEVEL;

/// Errors that can occur while running the engine
///
/// Generic over the error types of both panel buses so error handling code
/// can match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<M, S> {
    /// Dot-matrix interface error
    ///
    /// Wraps the error of the [`RegisterInterface`](crate::interface::RegisterInterface)
    /// implementation.
    Matrix(M),
    /// Seven-segment bus error
    Segment(S),
    /// A game index outside the catalog was requested
    InvalidGame {
        /// Requested index
        index: usize,
        /// Number of games
        count: usize,
    },
    /// A tick was requested before a game was selected
    NotRunning,
}

impl<M: Debug, S: Debug> core::fmt::Display for Error<M, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Matrix(e) => write!(f, "Matrix error: {e:?}"),
            Self::Segment(e) => write!(f, "Segment error: {e:?}"),
            Self::InvalidGame { index, count } => {
                write!(f, "Invalid game {index}, catalog holds {count}")
            }
            Self::NotRunning => write!(f, "No game is running"),
        }
    }
}

impl<M: Debug, S: Debug> core::error::Error for Error<M, S> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the engine is created.
#[derive(Debug)]
pub enum BuilderError {
    /// The tick period was zero
    ZeroTickPeriod,
    /// The highest level is outside 0..=[`MAX_LEVEL`]
    InvalidLevelRange {
        /// Requested highest level
        max: i16,
    },
    /// The startup intensity does not fit the intensity register
    InvalidIntensity {
        /// Requested intensity
        value: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ZeroTickPeriod => write!(f, "Tick period must be non-zero"),
            Self::InvalidLevelRange { max } => {
                write!(f, "Invalid highest level {max} (must be 0..={MAX_LEVEL})")
            }
            Self::InvalidIntensity { value } => {
                write!(f, "Invalid intensity {value} (max {MAX_INTENSITY})")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
