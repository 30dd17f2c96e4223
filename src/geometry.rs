//! Points and rigid point collections
//!
//! Coordinates are `(row, column)` pairs in the dot-matrix coordinate space:
//! row 0 is the top line of the panel, column 0 the leftmost dot. Values are
//! signed so that shapes may sit partially (or entirely) off-screen, e.g. a
//! tetris piece spawning above the board.
//!
//! ## Example
//!
//! ```
//! use gridcade::{Point, PointSet};
//!
//! let mut paddle = PointSet::new([Point::new(2, 0), Point::new(3, 0), Point::new(4, 0)]);
//! paddle.translate(1, 0);
//! assert_eq!(paddle[0], Point::new(3, 0));
//! assert_eq!(paddle.len(), 3);
//! ```

use core::ops::{Index, IndexMut};

/// A position on the grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Vertical position, 0 = top row
    pub row: i16,
    /// Horizontal position, 0 = leftmost column
    pub col: i16,
}

impl Point {
    /// Create a point from its row and column
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Move the point to a new position
    pub fn set(&mut self, row: i16, col: i16) {
        self.row = row;
        self.col = col;
    }

    /// Translate the point by a row/column delta, saturating at the `i16` bounds
    pub fn translate(&mut self, rows: i16, cols: i16) {
        self.row = self.row.saturating_add(rows);
        self.col = self.col.saturating_add(cols);
    }

    /// Translate the point by the coordinates of another point
    pub fn translate_by(&mut self, delta: Point) {
        self.translate(delta.row, delta.col);
    }

    /// Whether the point lies inside a `size` x `size` grid anchored at the origin
    pub fn is_within(&self, size: i16) -> bool {
        (0..size).contains(&self.row) && (0..size).contains(&self.col)
    }
}

impl From<(i16, i16)> for Point {
    fn from((row, col): (i16, i16)) -> Self {
        Self::new(row, col)
    }
}

/// A fixed-size, ordered collection of points forming one rigid shape
///
/// `N` never changes after construction. Translation moves every point by
/// the same delta, so the internal geometry of the shape is preserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointSet<const N: usize> {
    points: [Point; N],
}

impl<const N: usize> PointSet<N> {
    /// Create a set from an array of points
    pub const fn new(points: [Point; N]) -> Self {
        Self { points }
    }

    /// Create a set with every point at the same position
    pub const fn filled(point: Point) -> Self {
        Self { points: [point; N] }
    }

    /// Number of points in the set
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        N
    }

    /// Iterate over the points
    pub fn iter(&self) -> core::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Iterate mutably over the points
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Point> {
        self.points.iter_mut()
    }

    /// Borrow the underlying array
    pub const fn points(&self) -> &[Point; N] {
        &self.points
    }

    /// Translate every point by a row/column delta
    pub fn translate(&mut self, rows: i16, cols: i16) {
        for point in &mut self.points {
            point.translate(rows, cols);
        }
    }

    /// Translate every point by the coordinates of another point
    pub fn translate_by(&mut self, delta: Point) {
        self.translate(delta.row, delta.col);
    }

    /// Whether any point of the set equals `point`
    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// Apply `f` to every point, producing a new set of the same size
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(Point) -> Point,
    {
        let mut points = self.points;
        for point in &mut points {
            *point = f(*point);
        }
        Self { points }
    }
}

impl<const N: usize> Default for PointSet<N> {
    fn default() -> Self {
        Self::filled(Point::default())
    }
}

impl<const N: usize> From<[Point; N]> for PointSet<N> {
    fn from(points: [Point; N]) -> Self {
        Self::new(points)
    }
}

impl<const N: usize> Index<usize> for PointSet<N> {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<const N: usize> IndexMut<usize> for PointSet<N> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl<'a, const N: usize> IntoIterator for &'a PointSet<N> {
    type Item = &'a Point;
    type IntoIter = core::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_equality_is_component_wise() {
        assert_eq!(Point::new(3, 4), Point::new(3, 4));
        assert_ne!(Point::new(3, 4), Point::new(4, 3));
    }

    #[test]
    fn test_point_translate() {
        let mut point = Point::new(1, 1);
        point.translate(-2, 3);
        assert_eq!(point, Point::new(-1, 4));

        point.translate_by(Point::new(1, -1));
        assert_eq!(point, Point::new(0, 3));
    }

    #[test]
    fn test_point_is_within() {
        assert!(Point::new(0, 0).is_within(8));
        assert!(Point::new(7, 7).is_within(8));
        assert!(!Point::new(8, 0).is_within(8));
        assert!(!Point::new(0, -1).is_within(8));
    }

    #[test]
    fn test_point_set_translate_preserves_shape() {
        let mut shape = PointSet::new([Point::new(0, 0), Point::new(0, 1), Point::new(1, 1)]);
        shape.translate(2, 3);
        assert_eq!(
            shape.points(),
            &[Point::new(2, 3), Point::new(2, 4), Point::new(3, 4)]
        );
        assert_eq!(shape.len(), 3);
    }

    #[test]
    fn test_point_set_filled_and_contains() {
        let set: PointSet<64> = PointSet::filled(Point::new(3, 4));
        assert!(set.iter().all(|p| *p == Point::new(3, 4)));
        assert!(set.contains(Point::new(3, 4)));
        assert!(!set.contains(Point::new(4, 3)));
    }

    #[test]
    fn test_point_set_map_leaves_original_untouched() {
        let shape = PointSet::new([Point::new(1, 2), Point::new(3, 4)]);
        let moved = shape.map(|mut p| {
            p.translate(1, 1);
            p
        });
        assert_eq!(shape[0], Point::new(1, 2));
        assert_eq!(moved[0], Point::new(2, 3));
        assert_eq!(moved[1], Point::new(4, 5));
    }

    #[test]
    fn test_translate_saturates_at_bounds() {
        let mut point = Point::new(i16::MAX, i16::MIN);
        point.translate(1, -1);
        assert_eq!(point, Point::new(i16::MAX, i16::MIN));

        point.translate(-1, 1);
        assert_eq!(point, Point::new(i16::MAX - 1, i16::MIN + 1));
    }
}
