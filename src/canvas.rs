//! Logical drawing surfaces
//!
//! - [`Frame`] is the 8x8 dot-matrix panel: eight row bytes, one bit per
//!   column, column 0 stored in the most significant bit.
//! - [`Layer`] is the 4-digit seven-segment panel: four raw values that are
//!   only encoded to segment patterns when a driver reads them.
//! - [`Canvas`] bundles both surfaces with the decimal-point separator flag.
//!
//! ## Bit layout
//!
//! | Column | 0    | 1    | 2    | 3    | 4    | 5    | 6    | 7    |
//! |--------|------|------|------|------|------|------|------|------|
//! | Mask   | 0x80 | 0x40 | 0x20 | 0x10 | 0x08 | 0x04 | 0x02 | 0x01 |
//!
//! ## Example
//!
//! ```
//! use gridcade::{Frame, Layer, Point};
//!
//! let mut frame = Frame::new();
//! frame.set(0, 0, true);
//! frame.set_point(Point::new(7, 7), true);
//! assert_eq!(frame[0], 0b1000_0000);
//! assert_eq!(frame[7], 0b0000_0001);
//!
//! // Out-of-range writes are ignored
//! frame.set(8, 0, true);
//! assert!(!frame.get(8, 0));
//!
//! let mut layer = Layer::new();
//! layer.set(0, 8);
//! layer.set(1, Layer::BLANK);
//! assert_eq!(layer.get(0), 0x7F);
//! assert_eq!(layer.get(1), 0x00);
//! ```

use core::ops::{Index, IndexMut};

use crate::geometry::{Point, PointSet};

/// Number of rows (and columns) of the dot-matrix panel
pub const FRAME_SIZE: usize = 8;

/// Number of digits of the seven-segment panel
pub const LAYER_DIGITS: usize = 4;

/// Seven-segment patterns for 0-9 and a dash, segment `a` in bit 0
///
/// Bit 7 is left clear; drivers use it for the decimal point.
pub const DIGIT_SEGMENTS: [u8; 11] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
    0x40, // -
];

/// Encode a raw digit value to its segment pattern
///
/// Negative values and values past the table encode to `0x00` (all segments
/// off).
pub fn encode_digit(raw: i16) -> u8 {
    usize::try_from(raw)
        .ok()
        .and_then(|index| DIGIT_SEGMENTS.get(index).copied())
        .unwrap_or(0)
}

fn in_range(value: i16) -> Option<usize> {
    usize::try_from(value).ok().filter(|v| *v < FRAME_SIZE)
}

/// 8x8 monochrome bitmap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    rows: [u8; FRAME_SIZE],
}

impl Frame {
    /// Create an empty frame
    pub const fn new() -> Self {
        Self {
            rows: [0; FRAME_SIZE],
        }
    }

    /// Create a frame from eight row bytes
    pub const fn from_rows(rows: [u8; FRAME_SIZE]) -> Self {
        Self { rows }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; FRAME_SIZE];
    }

    /// Read a pixel; coordinates outside the panel read as off
    pub fn get(&self, row: i16, col: i16) -> bool {
        match (in_range(row), in_range(col)) {
            (Some(row), Some(col)) => self.rows[row] & (0x80 >> col) != 0,
            _ => false,
        }
    }

    /// Write a pixel; coordinates outside the panel are ignored
    pub fn set(&mut self, row: i16, col: i16, value: bool) {
        let (Some(row), Some(col)) = (in_range(row), in_range(col)) else {
            return;
        };
        let mask = 0x80 >> col;
        if value {
            self.rows[row] |= mask;
        } else {
            self.rows[row] &= !mask;
        }
    }

    /// Read the pixel at `point`
    pub fn get_point(&self, point: Point) -> bool {
        self.get(point.row, point.col)
    }

    /// Write the pixel at `point`
    pub fn set_point(&mut self, point: Point, value: bool) {
        self.set(point.row, point.col, value);
    }

    /// Stamp every point of a shape onto the frame
    ///
    /// Stamping `true` accumulates with whatever is already lit; stamping
    /// `false` clears the covered pixels.
    pub fn set_shape<const N: usize>(&mut self, shape: &PointSet<N>, value: bool) {
        for point in shape {
            self.set_point(*point, value);
        }
    }

    /// Borrow the raw row bytes
    pub const fn rows(&self) -> &[u8; FRAME_SIZE] {
        &self.rows
    }

    /// Number of lit pixels
    pub fn count_lit(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }
}

impl From<[u8; FRAME_SIZE]> for Frame {
    fn from(rows: [u8; FRAME_SIZE]) -> Self {
        Self::from_rows(rows)
    }
}

impl Index<usize> for Frame {
    type Output = u8;

    fn index(&self, row: usize) -> &Self::Output {
        &self.rows[row]
    }
}

impl IndexMut<usize> for Frame {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.rows[row]
    }
}

/// Four raw seven-segment digit values
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Layer {
    digits: [i16; LAYER_DIGITS],
}

impl Layer {
    /// Raw value that renders as an unlit digit
    pub const BLANK: i16 = -1;

    /// Raw value that renders as a dash
    pub const DASH: i16 = 10;

    /// Create a layer with every digit at 0
    pub const fn new() -> Self {
        Self {
            digits: [0; LAYER_DIGITS],
        }
    }

    /// Reset every digit to 0
    pub fn clear(&mut self) {
        self.digits = [0; LAYER_DIGITS];
    }

    /// Segment pattern of a digit; out-of-range indices read as blank
    pub fn get(&self, index: usize) -> u8 {
        self.digits.get(index).map_or(0, |raw| encode_digit(*raw))
    }

    /// Store a raw value; encoding happens on read
    pub fn set(&mut self, index: usize, raw: i16) {
        if let Some(digit) = self.digits.get_mut(index) {
            *digit = raw;
        }
    }

    /// Raw stored value of a digit
    pub fn raw(&self, index: usize) -> Option<i16> {
        self.digits.get(index).copied()
    }

    /// Encoded segment patterns of all four digits
    pub fn encoded(&self) -> [u8; LAYER_DIGITS] {
        self.digits.map(encode_digit)
    }

    /// Show a two-digit number on the digit pair starting at `first`
    ///
    /// Values are taken modulo 100. Digits past the last position are
    /// dropped, as with [`set`](Self::set).
    pub fn set_pair(&mut self, first: usize, value: i16) {
        let value = value.rem_euclid(100);
        self.set(first, value / 10);
        if let Some(second) = first.checked_add(1) {
            self.set(second, value % 10);
        }
    }
}

impl From<[i16; LAYER_DIGITS]> for Layer {
    fn from(digits: [i16; LAYER_DIGITS]) -> Self {
        Self { digits }
    }
}

/// Both panel surfaces plus the separator requested for the segment panel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Canvas {
    /// Dot-matrix surface
    pub frame: Frame,
    /// Seven-segment surface
    pub layer: Layer,
    /// Light the decimal points of every digit
    ///
    /// Latched: survives [`Canvas::clear`] like the driver setting it mirrors.
    pub separator: bool,
}

impl Canvas {
    /// Create an empty canvas
    pub const fn new() -> Self {
        Self {
            frame: Frame::new(),
            layer: Layer::new(),
            separator: false,
        }
    }

    /// Clear frame and layer
    pub fn clear(&mut self) {
        self.frame.clear();
        self.layer.clear();
    }
}
