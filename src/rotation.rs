//! Coordinate rotation utilities
//!
//! Two flavors of rotation about a center point are provided:
//!
//! - [`ortho_rotate`] turns by whole quarter turns using exact integer
//!   coefficients, so repeated rotation never drifts.
//! - [`rotate`] / [`rotate_with`] turn by an arbitrary angle in degrees using
//!   floating-point trigonometry, converting back to grid coordinates with an
//!   explicit [`Rounding`] rule.
//!
//! Both use the same orientation: with `dr = row - center.row` and
//! `dc = col - center.col`, the rotated point is
//! `(dc·sinθ + dr·cosθ, dc·cosθ − dr·sinθ)` relative to the center.
//!
//! ## Example
//!
//! ```
//! use gridcade::{rotation::ortho_rotate, Point};
//!
//! let center = Point::new(3, 3);
//! let p = Point::new(3, 5);
//!
//! // One quarter turn moves a point right of the center below it
//! assert_eq!(ortho_rotate(p, center, 1), Point::new(5, 3));
//!
//! // A full turn is the identity
//! assert_eq!(ortho_rotate(p, center, 4), p);
//! ```

use crate::geometry::{Point, PointSet};

/// Integer sine of the quarter turns 0, 1, 2, 3
const QUARTER_SIN: [i16; 4] = [0, 1, 0, -1];

/// Integer cosine of the quarter turns 0, 1, 2, 3
const QUARTER_COS: [i16; 4] = [1, 0, -1, 0];

/// How a floating-point coordinate is brought back onto the integer grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rounding {
    /// Drop the fractional part (-0.9 becomes 0, 1.9 becomes 1)
    #[default]
    TowardZero,
    /// Round to the nearest integer, halfway cases away from zero
    Nearest,
}

impl Rounding {
    /// Convert a coordinate using this rule, saturating at the `i16` range
    pub fn apply(self, value: f64) -> i16 {
        let rounded = match self {
            Self::TowardZero => libm::trunc(value),
            Self::Nearest => libm::round(value),
        };
        // `as` saturates on overflow and maps NaN to 0
        rounded as i16
    }
}

/// Rotate a point about `center` by `degrees`, truncating toward zero
///
/// Truncation is subject to floating-point error: a result that is
/// mathematically an integer may land just below it and be truncated one
/// step toward zero. Use [`rotate_with`] and [`Rounding::Nearest`] when that
/// matters.
pub fn rotate(point: Point, center: Point, degrees: f64) -> Point {
    rotate_with(point, center, degrees, Rounding::TowardZero)
}

/// Rotate a point about `center` by `degrees` with an explicit rounding rule
///
/// ## Example
///
/// ```
/// use gridcade::{rotation::{rotate_with, Rounding}, Point};
///
/// let origin = Point::new(0, 0);
/// let p = Point::new(0, 5);
///
/// // 5·sin 45° = 5·cos 45° ≈ 3.54
/// assert_eq!(rotate_with(p, origin, 45.0, Rounding::TowardZero), Point::new(3, 3));
/// assert_eq!(rotate_with(p, origin, 45.0, Rounding::Nearest), Point::new(4, 4));
/// ```
pub fn rotate_with(point: Point, center: Point, degrees: f64, rounding: Rounding) -> Point {
    let angle = degrees * core::f64::consts::PI / 180.0;
    let (sin, cos) = (libm::sin(angle), libm::cos(angle));

    let dr = f64::from(i32::from(point.row) - i32::from(center.row));
    let dc = f64::from(i32::from(point.col) - i32::from(center.col));

    let row = dc * sin + dr * cos + f64::from(center.row);
    let col = dc * cos - dr * sin + f64::from(center.col);

    Point::new(rounding.apply(row), rounding.apply(col))
}

/// Rotate a point about `center` by `quarter_turns` × 90°
///
/// The turn count is reduced with `|quarter_turns| % 4`, so a negative count
/// turns the same way as its absolute value.
/// Results outside the `i16` range saturate.
pub fn ortho_rotate(point: Point, center: Point, quarter_turns: i32) -> Point {
    let turn = (quarter_turns.unsigned_abs() % 4) as usize;
    let (sin, cos) = (i32::from(QUARTER_SIN[turn]), i32::from(QUARTER_COS[turn]));

    let dr = i32::from(point.row) - i32::from(center.row);
    let dc = i32::from(point.col) - i32::from(center.col);

    Point::new(
        saturate(dc * sin + dr * cos + i32::from(center.row)),
        saturate(dc * cos - dr * sin + i32::from(center.col)),
    )
}

fn saturate(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Rotate every point of a set about `center` by `degrees`, truncating toward zero
pub fn rotate_set<const N: usize>(set: &PointSet<N>, center: Point, degrees: f64) -> PointSet<N> {
    set.map(|point| rotate(point, center, degrees))
}

/// Rotate every point of a set about `center` by `quarter_turns` × 90°
pub fn ortho_rotate_set<const N: usize>(
    set: &PointSet<N>,
    center: Point,
    quarter_turns: i32,
) -> PointSet<N> {
    set.map(|point| ortho_rotate(point, center, quarter_turns))
}
