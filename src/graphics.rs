//! Graphics support via embedded-graphics
//!
//! [`Frame`] implements the [`DrawTarget`] trait from the embedded-graphics
//! ecosystem with [`BinaryColor`] pixels, so primitives, fonts and images can
//! be drawn straight onto the 8x8 surface. The x axis runs along columns and
//! the y axis along rows; pixels outside the panel are dropped.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle},
//! };
//! use gridcade::Frame;
//!
//! let mut frame = Frame::new();
//!
//! // Diagonal from the top-left corner
//! let _ = Line::new(Point::new(0, 0), Point::new(7, 7))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut frame);
//!
//! assert!(frame.get(3, 3));
//! assert_eq!(frame.count_lit(), 8);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::canvas::{FRAME_SIZE, Frame};
use crate::geometry;

impl DrawTarget for Frame {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            let (Ok(row), Ok(col)) = (i16::try_from(y), i16::try_from(x)) else {
                continue;
            };
            self.set(row, col, color.is_on());
        }
        Ok(())
    }

    // Callers need `DrawTarget::clear(&mut frame, color)`; the inherent
    // `Frame::clear` shadows this method.
    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        *self = Frame::from_rows([fill; FRAME_SIZE]);
        Ok(())
    }
}

impl OriginDimensions for Frame {
    fn size(&self) -> Size {
        Size::new(FRAME_SIZE as u32, FRAME_SIZE as u32)
    }
}

impl From<geometry::Point> for Point {
    fn from(point: geometry::Point) -> Self {
        Point::new(i32::from(point.col), i32::from(point.row))
    }
}
