use super::{Context, Game, Pace};
use crate::canvas::Frame;
use crate::geometry::{Point, PointSet};
use crate::input::Knob;

const PREVIEW: [u8; 8] = [
    0b1111_1111,
    0b1000_0001,
    0b1001_1101,
    0b1000_1001,
    0b1001_0001,
    0b1011_1001,
    0b1000_0001,
    0b1111_1111,
];

/// Where an idle bullet is parked, far off the board
const PARKED: Point = Point::new(16, 16);

/// Space invaders
///
/// A four-cell ship on the bottom rows follows knob First; any button fires.
/// A four-cell enemy descends one row per step. Shooting it scores a point,
/// letting it reach the ship or the bottom costs a life. Either way the round
/// restarts with a fresh enemy.
#[derive(Clone, Debug)]
pub struct Invaders {
    ship: PointSet<4>,
    enemy: PointSet<4>,
    bullet: Point,
    position: i16,
    shot: bool,
    pace: Pace,
    deaths: i16,
    points: i16,
}

impl Invaders {
    /// Create a game with no points and no lives lost
    pub fn new() -> Self {
        Self {
            ship: PointSet::default(),
            enemy: PointSet::default(),
            bullet: PARKED,
            position: 1,
            shot: false,
            pace: Pace::default(),
            deaths: 0,
            points: 0,
        }
    }

    /// Enemies shot down
    pub fn points(&self) -> i16 {
        self.points
    }

    /// Lives lost
    pub fn deaths(&self) -> i16 {
        self.deaths
    }

    fn read(&mut self, ctx: &Context<'_>) {
        self.position = ctx.inputs.knob(Knob::First, 1, 6);
        if ctx.inputs.any_button() {
            self.shot = true;
            self.bullet.set(6, self.position);
        }
    }

    fn advance(&mut self) {
        if self.shot && self.pace.every(2) {
            if self.bullet.row == -1 {
                self.shot = false;
            } else {
                self.bullet.translate(-1, 0);
            }
        }

        if self.pace.is_step() {
            self.enemy.translate(1, 0);
        }

        let p = self.position;
        self.ship = PointSet::new([
            Point::new(7, p),
            Point::new(6, p),
            Point::new(7, p - 1),
            Point::new(7, p + 1),
        ]);
    }

    fn draw(&self, ctx: &mut Context<'_>) {
        let canvas = &mut *ctx.canvas;
        canvas.frame.set_shape(&self.ship, true);
        canvas.frame.set_shape(&self.enemy, true);
        canvas.frame.set_point(self.bullet, true);

        canvas.layer.set_pair(0, self.deaths);
        canvas.layer.set_pair(2, self.points);
        canvas.separator = true;
    }
}

impl Default for Invaders {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Invaders {
    fn start(&mut self, ctx: &mut Context<'_>) {
        let column = ctx.rng.range(1, 6);
        self.enemy = PointSet::new([
            Point::new(-2, column),
            Point::new(-1, column),
            Point::new(-2, column - 1),
            Point::new(-2, column + 1),
        ]);
        self.bullet = PARKED;
        self.shot = false;
    }

    fn update(&mut self, level: i16, ctx: &mut Context<'_>) {
        self.read(ctx);
        self.pace.tick(level);

        self.advance();
        self.draw(ctx);
    }

    fn verify(&mut self) -> bool {
        if self.enemy.contains(self.bullet) {
            self.points += 1;
            return true;
        }
        let crashed = self.ship.iter().any(|part| self.enemy.contains(*part));
        let landed = self.enemy.iter().any(|part| part.row == 8);
        if crashed || landed {
            self.deaths += 1;
            return true;
        }
        false
    }

    fn preview(&self) -> Frame {
        Frame::from_rows(PREVIEW)
    }
}
