//! Seven-segment panel driver
//!
//! [`SegmentDisplay`] renders a [`Layer`] over a [`SegmentBus`]. A render is
//! two bus frames: the auto-increment data command, then the first digit
//! address followed by the four digit bytes. The separator flag ORs the
//! decimal-point bit into every digit.
//!
//! Missing acknowledges never fail an operation; they are counted in the
//! returned [`AckSummary`] and logged.

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::bus::{Ack, BusError, OpenDrainLine, SegmentBus};
use crate::canvas::{LAYER_DIGITS, Layer};
use crate::command::{
    ADDRESS_BASE, DATA_AUTO_INCREMENT, DISPLAY_CONTROL, DISPLAY_ON, SEGMENT_POINT,
};
use crate::input::map_range;

type SegmentResult<E> = core::result::Result<AckSummary, BusError<E>>;

/// Acknowledge bookkeeping of one driver operation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AckSummary {
    /// Bytes written
    pub written: u16,
    /// Bytes the controller did not acknowledge
    pub missing: u16,
}

impl AckSummary {
    /// Count one written byte
    pub fn record(&mut self, ack: Ack) {
        self.written += 1;
        if ack == Ack::Missing {
            self.missing += 1;
        }
    }

    /// Add the counts of another operation
    pub fn absorb(&mut self, other: AckSummary) {
        self.written += other.written;
        self.missing += other.missing;
    }

    /// Whether every byte was acknowledged
    pub fn is_clean(&self) -> bool {
        self.missing == 0
    }
}

/// Driver for the 4-digit seven-segment panel
pub struct SegmentDisplay<DIO, CLK> {
    /// Bus primitives
    bus: SegmentBus<DIO, CLK>,
    /// Light the decimal point of every digit
    separator: bool,
}

impl<DIO, CLK, E> SegmentDisplay<DIO, CLK>
where
    DIO: OpenDrainLine<Error = E>,
    CLK: OpenDrainLine<Error = E>,
    E: Debug,
{
    /// Create a driver on a bus
    pub fn new(bus: SegmentBus<DIO, CLK>) -> Self {
        Self {
            bus,
            separator: false,
        }
    }

    /// Release both lines and show the zero layer
    ///
    /// Lines left driven low by earlier use of the pins would swallow the
    /// first start condition.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> SegmentResult<E> {
        info!("segment init, bit delay {}us", self.bus.bit_delay());
        self.bus.idle(delay)?;
        self.clear(delay)
    }

    /// Borrow the bus, e.g. to change its bit delay
    pub fn bus_mut(&mut self) -> &mut SegmentBus<DIO, CLK> {
        &mut self.bus
    }

    /// Release the bus
    pub fn release(self) -> SegmentBus<DIO, CLK> {
        self.bus
    }

    /// Turn the decimal points on or off for subsequent renders
    pub fn set_separator(&mut self, separator: bool) {
        self.separator = separator;
    }

    /// Whether the decimal points are on
    pub fn separator(&self) -> bool {
        self.separator
    }

    /// Render the four digits of a layer
    pub fn render<D: DelayNs>(&mut self, layer: &Layer, delay: &mut D) -> SegmentResult<E> {
        let point = if self.separator { SEGMENT_POINT } else { 0 };
        let mut digits = [0u8; LAYER_DIGITS + 1];
        digits[0] = ADDRESS_BASE;
        for (slot, segments) in digits[1..].iter_mut().zip(layer.encoded()) {
            *slot = segments | point;
        }

        let mut summary = self.frame(&[DATA_AUTO_INCREMENT], delay)?;
        summary.absorb(self.frame(&digits, delay)?);
        Self::report("render", summary);
        Ok(summary)
    }

    /// Render the zero layer, `0000`
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> SegmentResult<E> {
        self.render(&Layer::new(), delay)
    }

    /// Set brightness as a percentage and switch the panel on or off
    ///
    /// `percent` is clamped to 100 and mapped onto the 8 pulse-width steps.
    pub fn brightness<D: DelayNs>(
        &mut self,
        percent: u8,
        enabled: bool,
        delay: &mut D,
    ) -> SegmentResult<E> {
        let level = map_range(i32::from(percent.min(100)), 0, 100, 0, 7) as u8;
        let control = if enabled { level | DISPLAY_ON } else { level };
        debug!("segment brightness {percent}% -> {control:#04x}");

        let summary = self.frame(&[DISPLAY_CONTROL | control], delay)?;
        Self::report("brightness", summary);
        Ok(summary)
    }

    /// Write bytes between one start and one stop condition
    fn frame<D: DelayNs>(&mut self, bytes: &[u8], delay: &mut D) -> SegmentResult<E> {
        let mut summary = AckSummary::default();
        self.bus.start(delay)?;
        for byte in bytes {
            summary.record(self.bus.write_byte(*byte, delay)?);
        }
        self.bus.stop(delay)?;
        Ok(summary)
    }

    fn report(operation: &str, summary: AckSummary) {
        if !summary.is_clean() {
            warn!(
                "segment {operation}: {} of {} bytes not acknowledged",
                summary.missing, summary.written
            );
        }
    }
}
