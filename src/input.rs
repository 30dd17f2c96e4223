//! Knobs and buttons
//!
//! The rig has four analog knobs and four push buttons. An [`InputSource`]
//! reads them; the engine samples every control exactly once per tick into
//! an [`InputState`] snapshot, so a game sees consistent values for the whole
//! update.
//!
//! ## Example
//!
//! ```
//! use gridcade::{Button, InputState, Knob};
//!
//! let inputs = InputState::new([0, 1023, 512, 0], [false, false, true, false]);
//!
//! assert_eq!(inputs.knob(Knob::Brightness, 0, 100), 100);
//! assert_eq!(inputs.knob(Knob::First, 0, 7), 3);
//! assert!(inputs.button(Button::Top));
//! assert!(inputs.any_button());
//! ```

/// Highest raw reading of a knob (10-bit converter)
pub const KNOB_MAX: u16 = 1023;

/// Analog knobs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Knob {
    /// Difficulty level
    Level,
    /// Brightness of both panels
    Brightness,
    /// First player control, also the menu selector
    First,
    /// Second player control
    Second,
}

impl Knob {
    /// All knobs in sampling order
    pub const ALL: [Knob; 4] = [Knob::Level, Knob::Brightness, Knob::First, Knob::Second];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Push buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left button
    Left,
    /// Right button
    Right,
    /// Top button
    Top,
    /// Bottom button
    Bottom,
}

impl Button {
    /// All buttons in sampling order
    pub const ALL: [Button; 4] = [Button::Left, Button::Right, Button::Top, Button::Bottom];

    const fn index(self) -> usize {
        self as usize
    }
}

/// Source of raw control readings
///
/// Implement this on whatever owns the ADC channels and button pins.
pub trait InputSource {
    /// Raw knob reading in `0..=KNOB_MAX`
    fn knob(&mut self, knob: Knob) -> u16;

    /// Whether a button is currently pressed
    fn button(&mut self, button: Button) -> bool;

    /// Read every control once
    fn sample(&mut self) -> InputState {
        InputState::new(
            Knob::ALL.map(|knob| self.knob(knob)),
            Button::ALL.map(|button| self.button(button)),
        )
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn knob(&mut self, knob: Knob) -> u16 {
        T::knob(self, knob)
    }

    fn button(&mut self, button: Button) -> bool {
        T::button(self, button)
    }
}

/// Snapshot of every control, taken once per tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    knobs: [u16; 4],
    buttons: [bool; 4],
}

impl InputState {
    /// Create a snapshot from raw readings, indexed like [`Knob::ALL`] and
    /// [`Button::ALL`]
    ///
    /// Knob readings above [`KNOB_MAX`] are clamped.
    pub fn new(knobs: [u16; 4], buttons: [bool; 4]) -> Self {
        Self {
            knobs: knobs.map(|raw| raw.min(KNOB_MAX)),
            buttons,
        }
    }

    /// Raw reading of a knob
    pub fn raw(&self, knob: Knob) -> u16 {
        self.knobs[knob.index()]
    }

    /// Knob reading rescaled linearly onto `low..=high`
    pub fn knob(&self, knob: Knob, low: i16, high: i16) -> i16 {
        let mapped = map_range(
            i32::from(self.raw(knob)),
            0,
            i32::from(KNOB_MAX),
            i32::from(low),
            i32::from(high),
        );
        mapped as i16
    }

    /// Whether a button was pressed
    pub fn button(&self, button: Button) -> bool {
        self.buttons[button.index()]
    }

    /// Whether any button was pressed
    pub fn any_button(&self) -> bool {
        self.buttons.contains(&true)
    }
}

/// Rescale `value` from `in_min..=in_max` onto `out_min..=out_max`
///
/// Integer arithmetic truncating toward zero; values outside the input range
/// extrapolate. An empty input range maps everything to `out_min`.
pub fn map_range(value: i32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    if in_max == in_min {
        return out_min;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl InputSource for Fixed {
        fn knob(&mut self, knob: Knob) -> u16 {
            match knob {
                Knob::Level => 0,
                Knob::Brightness => 2000,
                Knob::First => 1023,
                Knob::Second => 300,
            }
        }

        fn button(&mut self, button: Button) -> bool {
            button == Button::Bottom
        }
    }

    #[test]
    fn test_map_range_endpoints() {
        assert_eq!(map_range(0, 0, 1023, 0, 3), 0);
        assert_eq!(map_range(1023, 0, 1023, 0, 3), 3);
        assert_eq!(map_range(1022, 0, 1023, 0, 3), 2);
        assert_eq!(map_range(100, 0, 100, 1, 15), 15);
        assert_eq!(map_range(50, 0, 100, 1, 15), 8);
        assert_eq!(map_range(0, 0, 100, 0, 7), 0);
    }

    #[test]
    fn test_map_range_descending_output() {
        assert_eq!(map_range(0, 0, 1023, 5, 0), 5);
        assert_eq!(map_range(1023, 0, 1023, 5, 0), 0);
    }

    #[test]
    fn test_map_range_empty_input() {
        assert_eq!(map_range(7, 3, 3, 10, 20), 10);
    }

    #[test]
    fn test_sample_reads_every_control() {
        let state = Fixed.sample();
        assert_eq!(state.raw(Knob::Level), 0);
        assert_eq!(state.raw(Knob::Brightness), KNOB_MAX);
        assert_eq!(state.raw(Knob::First), 1023);
        assert_eq!(state.raw(Knob::Second), 300);
        assert!(state.button(Button::Bottom));
        assert!(!state.button(Button::Left));
        assert!(state.any_button());
    }

    #[test]
    fn test_knob_mapping() {
        let state = InputState::new([1023, 0, 511, 767], [false; 4]);
        assert_eq!(state.knob(Knob::Level, 0, 3), 3);
        assert_eq!(state.knob(Knob::Brightness, 0, 100), 0);
        assert_eq!(state.knob(Knob::First, 0, 3), 1);
        assert_eq!(state.knob(Knob::Second, 0, 3), 2);
    }

    #[test]
    fn test_default_state_is_idle() {
        let state = InputState::default();
        assert!(!state.any_button());
        assert_eq!(state.knob(Knob::First, 0, 7), 0);
    }
}
