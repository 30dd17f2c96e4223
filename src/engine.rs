//! Game selection and the fixed-period tick loop
//!
//! The [`Engine`] owns both panel drivers, the games, the [`Canvas`] and the
//! random generator. It starts in [`Phase::Selecting`]; once a game is picked
//! it stays in [`Phase::Running`] for good, restarting the same game every
//! time a round ends.
//!
//! ## Tick
//!
//! 1. Sample every control once
//! 2. Push the brightness knob (0..=100%) to both panels
//! 3. Clear the canvas and let the game update at the level knob's level
//! 4. Render the frame and the layer, with the separator the game asked for
//! 5. Ask the game whether the round ended; if so pause and restart it
//! 6. Block for the tick period
//!
//! A late tick is not made up for.

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use log::{debug, info, trace};

use crate::bus::{BusError, OpenDrainLine};
use crate::canvas::{Canvas, LAYER_DIGITS, Layer};
use crate::config::Config;
use crate::error::Error;
use crate::game::{Context, Game, Variant};
use crate::input::{InputSource, InputState, Knob};
use crate::interface::RegisterInterface;
use crate::rng::GameRng;
use crate::screen::Screen;
use crate::segment::{AckSummary, SegmentDisplay};

/// Error of an engine driving `I` and a segment bus whose lines fail with `E`
pub type EngineError<I, E> = Error<<I as RegisterInterface>::Error, BusError<E>>;

type EngineResult<T, I, E> = core::result::Result<T, EngineError<I, E>>;

/// Engine built on the four built-in games
pub type Arcade<I, DIO, CLK> = Engine<I, DIO, CLK, Variant, 4>;

/// Where the engine is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Menu, no game running yet
    Selecting,
    /// The game at this catalog index is running
    Running(usize),
}

/// Outcome of one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The round ended and the game was started again
    pub restarted: bool,
    /// Acknowledges of every segment byte written during the tick
    pub segment: AckSummary,
}

/// Scheduler driving a catalog of `N` games on both panels
pub struct Engine<I, DIO, CLK, G, const N: usize>
where
    I: RegisterInterface,
{
    screen: Screen<I>,
    display: SegmentDisplay<DIO, CLK>,
    games: [G; N],
    canvas: Canvas,
    rng: GameRng,
    config: Config,
    phase: Phase,
}

impl<I, DIO, CLK, G, E, const N: usize> Engine<I, DIO, CLK, G, N>
where
    I: RegisterInterface,
    DIO: OpenDrainLine<Error = E>,
    CLK: OpenDrainLine<Error = E>,
    E: Debug,
    G: Game,
{
    /// Create an engine; nothing is sent until [`Engine::init`]
    pub fn new(
        screen: Screen<I>,
        display: SegmentDisplay<DIO, CLK>,
        games: [G; N],
        config: Config,
    ) -> Self {
        Self {
            screen,
            display,
            games,
            canvas: Canvas::new(),
            rng: GameRng::new(config.seed),
            config,
            phase: Phase::Selecting,
        }
    }

    /// Run the matrix startup sequence and reset the segment panel to `0000`
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> EngineResult<AckSummary, I, E> {
        info!("engine init, {N} games");
        self.screen
            .init(self.config.startup_intensity)
            .map_err(Error::Matrix)?;
        self.display.init(delay).map_err(Error::Segment)
    }

    /// Show the menu until a button is pressed, then start the chosen game
    ///
    /// Knob First scrolls through the previews. The pick is confirmed with
    /// four dashes for the confirm pause. Returns the chosen index.
    pub fn select<S, D>(&mut self, inputs: &mut S, delay: &mut D) -> EngineResult<usize, I, E>
    where
        S: InputSource,
        D: DelayNs,
    {
        if N == 0 {
            return Err(Error::InvalidGame { index: 0, count: 0 });
        }
        self.phase = Phase::Selecting;
        self.canvas.clear();
        self.canvas.separator = false;

        let last = (N - 1).min(i16::MAX as usize) as i16;
        let index = loop {
            let state = inputs.sample();
            let index = (state.knob(Knob::First, 0, last).max(0) as usize).min(N - 1);
            self.canvas.frame = self.games[index].preview();

            if state.any_button() {
                self.canvas.layer = Layer::from([Layer::DASH; LAYER_DIGITS]);
                self.push_brightness(&state, delay)?;
                self.render(delay)?;
                delay.delay_ms(self.config.confirm_pause_ms);
                break index;
            }
            self.render(delay)?;
        };

        info!("selected game {index}");
        self.start_game(index)?;
        Ok(index)
    }

    /// Start the game at `index` and keep running it
    pub fn start_game(&mut self, index: usize) -> EngineResult<(), I, E> {
        let Some(game) = self.games.get_mut(index) else {
            return Err(Error::InvalidGame { index, count: N });
        };
        debug!("starting game {index}");
        self.phase = Phase::Running(index);

        let inputs = InputState::default();
        let mut ctx = Context {
            canvas: &mut self.canvas,
            inputs: &inputs,
            rng: &mut self.rng,
        };
        game.start(&mut ctx);
        Ok(())
    }

    /// Run one tick of the running game
    pub fn tick<S, D>(&mut self, inputs: &mut S, delay: &mut D) -> EngineResult<TickReport, I, E>
    where
        S: InputSource,
        D: DelayNs,
    {
        let Phase::Running(index) = self.phase else {
            return Err(Error::NotRunning);
        };
        let state = inputs.sample();
        let mut report = TickReport {
            segment: self.push_brightness(&state, delay)?,
            ..TickReport::default()
        };

        let level = state.knob(Knob::Level, 0, self.config.level_max);
        trace!("tick game {index} level {level}");
        self.canvas.clear();
        {
            let mut ctx = Context {
                canvas: &mut self.canvas,
                inputs: &state,
                rng: &mut self.rng,
            };
            self.games[index].update(level, &mut ctx);
        }
        report.segment.absorb(self.render(delay)?);

        if self.games[index].verify() {
            debug!("game {index} round over");
            delay.delay_ms(self.config.restart_pause_ms);
            self.start_game(index)?;
            report.restarted = true;
        }

        delay.delay_ms(self.config.tick_period_ms);
        Ok(report)
    }

    /// Select a game, then tick forever
    ///
    /// Only returns on a hardware error.
    pub fn run<S, D>(&mut self, inputs: &mut S, delay: &mut D) -> EngineResult<Infallible, I, E>
    where
        S: InputSource,
        D: DelayNs,
    {
        self.select(inputs, delay)?;
        loop {
            self.tick(inputs, delay)?;
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Surfaces as the last update left them
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Game at `index`
    pub fn game(&self, index: usize) -> Option<&G> {
        self.games.get(index)
    }

    /// Dot-matrix driver
    pub fn screen(&self) -> &Screen<I> {
        &self.screen
    }

    /// Seven-segment driver
    pub fn display(&self) -> &SegmentDisplay<DIO, CLK> {
        &self.display
    }

    /// Seven-segment driver, e.g. to tune the bus timing
    pub fn display_mut(&mut self) -> &mut SegmentDisplay<DIO, CLK> {
        &mut self.display
    }

    /// Release both drivers
    pub fn release(self) -> (Screen<I>, SegmentDisplay<DIO, CLK>) {
        (self.screen, self.display)
    }

    fn push_brightness<D: DelayNs>(
        &mut self,
        state: &InputState,
        delay: &mut D,
    ) -> EngineResult<AckSummary, I, E> {
        let percent = state.knob(Knob::Brightness, 0, 100).clamp(0, 100) as u8;
        self.screen.brightness(percent).map_err(Error::Matrix)?;
        self.display
            .brightness(percent, true, delay)
            .map_err(Error::Segment)
    }

    fn render<D: DelayNs>(&mut self, delay: &mut D) -> EngineResult<AckSummary, I, E> {
        self.screen
            .render(&self.canvas.frame)
            .map_err(Error::Matrix)?;
        self.display.set_separator(self.canvas.separator);
        self.display
            .render(&self.canvas.layer, delay)
            .map_err(Error::Segment)
    }
}
