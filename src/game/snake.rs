use super::{Context, Game, Pace};
use crate::canvas::{FRAME_SIZE, Frame, Layer};
use crate::geometry::{Point, PointSet};
use crate::input::Button;
use crate::rng::GameRng;

const PREVIEW: [u8; 8] = [
    0b1111_1111,
    0b1000_0001,
    0b1001_1001,
    0b1001_0001,
    0b1001_1101,
    0b1011_1101,
    0b1000_0001,
    0b1111_1111,
];

/// Maximum body length, one segment per cell
const CAPACITY: usize = FRAME_SIZE * FRAME_SIZE;

/// Snake
///
/// The body holds [`CAPACITY`] points at all times; segments past the
/// current length sit on the tail so the whole set can be drawn at once.
/// Buttons only turn the snake perpendicular to its heading. The round ends
/// when the head leaves the board or runs into the body.
#[derive(Clone, Debug)]
pub struct Snake {
    body: PointSet<CAPACITY>,
    food: Point,
    heading: Point,
    length: usize,
    points: i16,
    pace: Pace,
    /// No free cell was left for the food
    full: bool,
}

impl Snake {
    /// Create a game
    pub fn new() -> Self {
        Self {
            body: PointSet::default(),
            food: Point::default(),
            heading: Point::default(),
            length: 1,
            points: 1,
            pace: Pace::default(),
            full: false,
        }
    }

    /// Current body length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Score shown on the panel
    pub fn points(&self) -> i16 {
        self.points
    }

    fn steer(&mut self, ctx: &Context<'_>) {
        let inputs = ctx.inputs;
        let (left, right) = (inputs.button(Button::Left), inputs.button(Button::Bottom));
        let (up, down) = (inputs.button(Button::Top), inputs.button(Button::Right));

        let still = self.heading == Point::default();
        if self.heading.row != 0 || still {
            if left {
                self.heading.set(0, -1);
            } else if right {
                self.heading.set(0, 1);
            }
        }
        if self.heading.col != 0 || still {
            if up {
                self.heading.set(-1, 0);
            } else if down {
                self.heading.set(1, 0);
            }
        }
    }

    fn occupied(&self, cell: Point) -> bool {
        self.body.iter().take(self.length).any(|part| *part == cell)
    }

    /// Place the food on a free cell
    ///
    /// A random cell is picked first, then cells are scanned from there in
    /// row-major order. Returns `false` when the board is full.
    fn respawn_food(&mut self, rng: &mut GameRng) -> bool {
        let size = FRAME_SIZE as i16;
        let origin = rng.range(0, size * size - 1);
        for offset in 0..size * size {
            let cell = (origin + offset) % (size * size);
            let candidate = Point::new(cell / size, cell % size);
            if !self.occupied(candidate) {
                self.food = candidate;
                return true;
            }
        }
        false
    }

    fn advance(&mut self, rng: &mut GameRng) {
        if !self.pace.is_step() {
            return;
        }
        for index in (1..self.length).rev() {
            self.body[index] = self.body[index - 1];
        }
        self.body[0].translate_by(self.heading);

        if self.body[0] == self.food {
            self.length = (self.length + 1).min(CAPACITY);
            self.points += 1;
            self.full = !self.respawn_food(rng);
        } else {
            let tail = self.body[self.length - 1];
            for index in self.length..CAPACITY {
                self.body[index] = tail;
            }
        }
    }

    fn draw(&self, ctx: &mut Context<'_>) {
        let canvas = &mut *ctx.canvas;
        canvas.frame.set_shape(&self.body, true);
        canvas.frame.set_point(self.food, true);

        canvas.layer.set(0, Layer::BLANK);
        canvas.layer.set_pair(1, self.points);
        canvas.layer.set(3, Layer::BLANK);
        canvas.separator = false;
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Snake {
    fn start(&mut self, ctx: &mut Context<'_>) {
        self.length = 1;
        self.points = 1;
        self.full = false;

        let head = Point::new(ctx.rng.range(3, 4), ctx.rng.range(3, 4));
        self.body = PointSet::filled(head);
        self.heading = Point::default();
        self.respawn_food(ctx.rng);
    }

    fn update(&mut self, level: i16, ctx: &mut Context<'_>) {
        self.steer(ctx);
        self.pace.tick(level);

        self.advance(ctx.rng);
        self.draw(ctx);
    }

    fn verify(&mut self) -> bool {
        let head = self.body[0];
        if self.body.iter().take(self.length).skip(1).any(|part| *part == head) {
            return true;
        }
        !head.is_within(FRAME_SIZE as i16) || self.full
    }

    fn preview(&self) -> Frame {
        Frame::from_rows(PREVIEW)
    }
}
