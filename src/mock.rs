//! Test doubles for pins, buses, delays and inputs

use alloc::vec::Vec;
use core::cell::RefCell;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use crate::bus::OpenDrainLine;
use crate::input::{Button, InputSource, Knob};
use crate::interface::RegisterInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "mock error")
    }
}

impl embedded_hal::digital::Error for MockError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// Output pins

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wire {
    Data,
    Clock,
    Latch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

/// Ordered log of pin transitions shared by several pins
#[derive(Debug, Default)]
pub struct PinLog {
    events: RefCell<Vec<(Wire, Level)>>,
}

impl PinLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Wire, Level)> {
        self.events.borrow().clone()
    }

    fn push(&self, wire: Wire, level: Level) {
        self.events.borrow_mut().push((wire, level));
    }
}

pub struct RecordingPin<'a> {
    log: &'a PinLog,
    wire: Wire,
    level: Level,
    fail: bool,
}

impl<'a> RecordingPin<'a> {
    pub fn new(log: &'a PinLog, wire: Wire) -> Self {
        Self {
            log,
            wire,
            level: Level::High,
            fail: false,
        }
    }

    pub fn failing(log: &'a PinLog, wire: Wire) -> Self {
        Self {
            fail: true,
            ..Self::new(log, wire)
        }
    }

    fn drive(&mut self, level: Level) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.level = level;
        self.log.push(self.wire, level);
        Ok(())
    }
}

impl ErrorType for RecordingPin<'_> {
    type Error = MockError;
}

impl OutputPin for RecordingPin<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(Level::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(Level::High)
    }
}

impl InputPin for RecordingPin<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level == Level::High)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level == Level::Low)
    }
}

// Matrix registers

#[derive(Debug, Default)]
pub struct RecordingInterface {
    pub writes: Vec<(u8, u8)>,
    fail: bool,
}

impl RecordingInterface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            writes: Vec::new(),
            fail: true,
        }
    }

    /// Row bytes of the most recent complete 8-row render, as sent on the wire
    pub fn last_frame(&self) -> Option<[u8; 8]> {
        let end = self
            .writes
            .iter()
            .rposition(|(address, _)| *address == 8)?;
        let start = end.checked_sub(7)?;
        let mut rows = [0; 8];
        for (row, (address, data)) in rows.iter_mut().zip(&self.writes[start..=end]) {
            if !(1..=8).contains(address) {
                return None;
            }
            *row = *data;
        }
        Some(rows)
    }

    /// Number of complete 8-row renders
    pub fn frame_count(&self) -> usize {
        self.writes
            .iter()
            .filter(|(address, _)| *address == 8)
            .count()
    }
}

impl RegisterInterface for RecordingInterface {
    type Error = MockError;

    fn write_register(&mut self, address: u8, data: u8) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        self.writes.push((address, data));
        Ok(())
    }
}

// Segment bus

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Byte { value: u8, acked: bool },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BusWire {
    Dio,
    Clk,
}

#[derive(Debug)]
struct SimState {
    host_dio_low: bool,
    host_clk_low: bool,
    device_dio_low: bool,
    device_acks: bool,
    bit_count: usize,
    shift: u8,
    acking: bool,
    acked: bool,
    bits: Vec<bool>,
    events: Vec<BusEvent>,
}

impl SimState {
    fn dio(&self) -> bool {
        !(self.host_dio_low || self.device_dio_low)
    }

    fn clk(&self) -> bool {
        !self.host_clk_low
    }

    fn drive(&mut self, wire: BusWire, low: bool) {
        match wire {
            BusWire::Dio => {
                let before = self.dio();
                self.host_dio_low = low;
                self.on_data(before, self.dio());
            }
            BusWire::Clk => {
                let before = self.clk();
                self.host_clk_low = low;
                self.on_clock(before, self.clk());
            }
        }
    }

    fn on_data(&mut self, before: bool, after: bool) {
        if before == after || !self.clk() {
            return;
        }
        // DIO edges while CLK is high are start/stop conditions. A byte whose
        // ack clock is still high is complete; anything shorter is dropped.
        if self.acking {
            self.events.push(BusEvent::Byte {
                value: self.shift,
                acked: self.acked,
            });
        } else {
            let keep = self.bits.len() - self.bit_count;
            self.bits.truncate(keep);
        }
        self.bit_count = 0;
        self.shift = 0;
        self.acking = false;
        self.events
            .push(if after { BusEvent::Stop } else { BusEvent::Start });
    }

    fn on_clock(&mut self, before: bool, after: bool) {
        match (before, after) {
            (false, true) if self.bit_count < 8 => {
                let bit = self.dio();
                self.bits.push(bit);
                self.shift |= u8::from(bit) << self.bit_count;
                self.bit_count += 1;
            }
            (false, true) => {
                self.acking = true;
                self.acked = !self.dio();
            }
            (true, false) if self.acking => {
                self.events.push(BusEvent::Byte {
                    value: self.shift,
                    acked: self.acked,
                });
                self.device_dio_low = false;
                self.bit_count = 0;
                self.shift = 0;
                self.acking = false;
            }
            (true, false) if self.bit_count == 8 => {
                self.device_dio_low = self.device_acks;
            }
            _ => {}
        }
    }
}

/// Simulated open-drain bus with a controller decoding the traffic
pub struct SimBus {
    state: RefCell<SimState>,
}

impl SimBus {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(SimState {
                host_dio_low: false,
                host_clk_low: false,
                device_dio_low: false,
                device_acks: true,
                bit_count: 0,
                shift: 0,
                acking: false,
                acked: false,
                bits: Vec::new(),
                events: Vec::new(),
            }),
        }
    }

    /// A bus whose controller never acknowledges
    pub fn without_acks() -> Self {
        let bus = Self::new();
        bus.state.borrow_mut().device_acks = false;
        bus
    }

    pub fn dio(&self) -> SimLine<'_> {
        SimLine {
            bus: self,
            wire: BusWire::Dio,
            fail: false,
        }
    }

    pub fn clk(&self) -> SimLine<'_> {
        SimLine {
            bus: self,
            wire: BusWire::Clk,
            fail: false,
        }
    }

    pub fn failing_clk(&self) -> SimLine<'_> {
        SimLine {
            fail: true,
            ..self.clk()
        }
    }

    pub fn events(&self) -> Vec<BusEvent> {
        self.state.borrow().events.clone()
    }

    /// Every data bit clocked in, in wire order
    pub fn bits(&self) -> Vec<bool> {
        self.state.borrow().bits.clone()
    }

    pub fn dio_level(&self) -> bool {
        self.state.borrow().dio()
    }

    /// Both lines released
    pub fn idle(&self) -> bool {
        let state = self.state.borrow();
        state.dio() && state.clk()
    }

    /// Bytes of every start..stop frame
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        let mut current: Option<Vec<u8>> = None;
        for event in self.events() {
            match event {
                BusEvent::Start => current = Some(Vec::new()),
                BusEvent::Byte { value, .. } => {
                    if let Some(bytes) = current.as_mut() {
                        bytes.push(value);
                    }
                }
                BusEvent::Stop => frames.extend(current.take()),
            }
        }
        frames
    }

    /// Every decoded byte with its acknowledge flag, ignoring framing
    pub fn bytes(&self) -> Vec<(u8, bool)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                BusEvent::Byte { value, acked } => Some((value, acked)),
                _ => None,
            })
            .collect()
    }

    /// Digit bytes of every address frame
    pub fn rendered_digits(&self) -> Vec<[u8; 4]> {
        self.frames()
            .into_iter()
            .filter(|frame| frame.len() == 5 && frame[0] == 0xC0)
            .map(|frame| [frame[1], frame[2], frame[3], frame[4]])
            .collect()
    }

    /// Display-control bytes of every brightness frame
    pub fn brightness_commands(&self) -> Vec<u8> {
        self.frames()
            .into_iter()
            .filter(|frame| frame.len() == 1 && frame[0] & 0xF0 == 0x80)
            .map(|frame| frame[0])
            .collect()
    }

    pub fn reset_log(&self) {
        let mut state = self.state.borrow_mut();
        state.events.clear();
        state.bits.clear();
    }
}

pub struct SimLine<'a> {
    bus: &'a SimBus,
    wire: BusWire,
    fail: bool,
}

impl SimLine<'_> {
    fn drive(&mut self, low: bool) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.bus.state.borrow_mut().drive(self.wire, low);
        Ok(())
    }
}

impl OpenDrainLine for SimLine<'_> {
    type Error = MockError;

    fn drive_low(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn sense(&mut self) -> Result<bool, Self::Error> {
        if self.fail {
            return Err(MockError);
        }
        let state = self.bus.state.borrow();
        Ok(match self.wire {
            BusWire::Dio => state.dio(),
            BusWire::Clk => state.clk(),
        })
    }
}

// Timing

#[derive(Debug, Default)]
pub struct RecordingDelay {
    total_ns: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_us(&self) -> u64 {
        self.total_ns / 1_000
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// Inputs

/// Inputs whose readings the test sets directly
#[derive(Debug, Default, Clone)]
pub struct ScriptedInputs {
    pub knobs: [u16; 4],
    pub buttons: [bool; 4],
    pub samples: usize,
}

impl ScriptedInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_knob(&mut self, knob: Knob, raw: u16) {
        self.knobs[knob as usize] = raw;
    }

    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.buttons[button as usize] = pressed;
    }
}

impl InputSource for ScriptedInputs {
    fn knob(&mut self, knob: Knob) -> u16 {
        if knob == Knob::Level {
            self.samples += 1;
        }
        self.knobs[knob as usize]
    }

    fn button(&mut self, button: Button) -> bool {
        self.buttons[button as usize]
    }
}
