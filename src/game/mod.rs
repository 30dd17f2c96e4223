//! Games and the capability set the engine drives them through
//!
//! Every game implements [`Game`]. The engine owns all shared state and lends
//! it to the active game per call through a [`Context`]: the [`Canvas`] to
//! draw on, the [`InputState`] sampled for this tick, and the [`GameRng`].
//!
//! A game draws its complete picture on every [`Game::update`]; the canvas is
//! cleared before each call.
//!
//! ## Pace
//!
//! Games advance their simulation once every `steps` ticks, where
//! `steps = 20 - 4 * level`. At the default 25ms tick that is one move per
//! 500ms at level 0 and per 200ms at level 3.

mod invaders;
mod pong;
mod snake;
mod tetris;

pub use invaders::Invaders;
pub use pong::Pong;
pub use snake::Snake;
pub use tetris::Tetris;

use crate::canvas::{Canvas, Frame};
use crate::input::InputState;
use crate::rng::GameRng;

/// Highest level a game accounts for
pub const MAX_LEVEL: i16 = 4;

/// Shared state lent to a game for one call
pub struct Context<'a> {
    /// Surfaces to draw on, cleared before every update
    pub canvas: &'a mut Canvas,
    /// Controls sampled for this tick
    pub inputs: &'a InputState,
    /// Random source
    pub rng: &'a mut GameRng,
}

/// A game playable on the rig
pub trait Game {
    /// Reset the round; called on selection and after every [`Game::verify`]
    /// that returned `true`
    fn start(&mut self, ctx: &mut Context<'_>);

    /// Advance one tick at `level` and draw the full picture
    fn update(&mut self, level: i16, ctx: &mut Context<'_>);

    /// Whether the round ended during the last update
    ///
    /// May update score bookkeeping; called once per tick after rendering.
    fn verify(&mut self) -> bool;

    /// Menu icon
    fn preview(&self) -> Frame;
}

impl<T: Game + ?Sized> Game for &mut T {
    fn start(&mut self, ctx: &mut Context<'_>) {
        T::start(self, ctx);
    }

    fn update(&mut self, level: i16, ctx: &mut Context<'_>) {
        T::update(self, level, ctx);
    }

    fn verify(&mut self) -> bool {
        T::verify(self)
    }

    fn preview(&self) -> Frame {
        T::preview(self)
    }
}

/// Step counter shared by every game
///
/// `count` cycles through `1..=steps`; the simulation moves when it reaches
/// `steps`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pace {
    steps: i16,
    count: i16,
}

impl Pace {
    /// Number of ticks per simulation step at `level`
    pub fn steps_for(level: i16) -> i16 {
        20 - 4 * level.clamp(0, MAX_LEVEL)
    }

    /// Advance by one tick at `level`
    pub fn tick(&mut self, level: i16) {
        self.steps = Self::steps_for(level);
        self.count = 1 + self.count % self.steps;
    }

    /// Whether this tick is a simulation step
    pub fn is_step(&self) -> bool {
        self.steps > 0 && self.count == self.steps
    }

    /// Whether this tick is a multiple of `steps / divisor` ticks
    ///
    /// Never true for a divisor that leaves no positive period, zero included.
    pub fn every(&self, divisor: i16) -> bool {
        self.steps
            .checked_div(divisor)
            .is_some_and(|period| period > 0 && self.count % period == 0)
    }

    /// Current position in the cycle
    pub fn count(&self) -> i16 {
        self.count
    }

    /// Ticks per step as of the last tick
    pub fn steps(&self) -> i16 {
        self.steps
    }
}

/// The built-in games
///
/// A closed set so the engine can hold them in a plain array.
#[derive(Clone, Debug)]
pub enum Variant {
    /// Two-paddle pong
    Pong(Pong),
    /// Snake
    Snake(Snake),
    /// Falling blocks
    Tetris(Tetris),
    /// Space invaders
    Invaders(Invaders),
}

impl Variant {
    /// All games in menu order
    pub fn catalog() -> [Variant; 4] {
        [
            Variant::Pong(Pong::new()),
            Variant::Snake(Snake::new()),
            Variant::Tetris(Tetris::new()),
            Variant::Invaders(Invaders::new()),
        ]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pong(_) => "pong",
            Self::Snake(_) => "snake",
            Self::Tetris(_) => "tetris",
            Self::Invaders(_) => "invaders",
        }
    }

    fn game(&mut self) -> &mut dyn Game {
        match self {
            Self::Pong(game) => game,
            Self::Snake(game) => game,
            Self::Tetris(game) => game,
            Self::Invaders(game) => game,
        }
    }
}

impl Game for Variant {
    fn start(&mut self, ctx: &mut Context<'_>) {
        self.game().start(ctx);
    }

    fn update(&mut self, level: i16, ctx: &mut Context<'_>) {
        self.game().update(level, ctx);
    }

    fn verify(&mut self) -> bool {
        self.game().verify()
    }

    fn preview(&self) -> Frame {
        match self {
            Self::Pong(game) => game.preview(),
            Self::Snake(game) => game.preview(),
            Self::Tetris(game) => game.preview(),
            Self::Invaders(game) => game.preview(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Owns everything a [`Context`] borrows
    pub struct Harness {
        pub canvas: Canvas,
        pub inputs: InputState,
        pub rng: GameRng,
    }

    impl Harness {
        pub fn new(seed: u32) -> Self {
            Self {
                canvas: Canvas::new(),
                inputs: InputState::default(),
                rng: GameRng::new(seed),
            }
        }

        pub fn start<G: Game>(&mut self, game: &mut G) {
            let mut ctx = Context {
                canvas: &mut self.canvas,
                inputs: &self.inputs,
                rng: &mut self.rng,
            };
            game.start(&mut ctx);
        }

        /// Clear, then update, like one engine tick
        pub fn update<G: Game>(&mut self, game: &mut G, level: i16) {
            self.canvas.clear();
            let mut ctx = Context {
                canvas: &mut self.canvas,
                inputs: &self.inputs,
                rng: &mut self.rng,
            };
            game.update(level, &mut ctx);
        }

        /// Run updates until the next simulation step has happened
        pub fn step<G: Game>(&mut self, game: &mut G, level: i16) {
            for _ in 0..Pace::steps_for(level) {
                self.update(game, level);
            }
        }
    }
}
