use super::{Context, Game, Pace};
use crate::canvas::{FRAME_SIZE, Frame};
use crate::geometry::{Point, PointSet};
use crate::input::Knob;
use crate::rotation::ortho_rotate_set;

const PREVIEW: [u8; 8] = [
    0b1111_1111,
    0b1000_0001,
    0b1010_0001,
    0b1010_0001,
    0b1010_1101,
    0b1010_1101,
    0b1000_0001,
    0b1111_1111,
];

/// Row offsets of the seven pieces; cell 1 is the pivot
const PIECE_ROWS: [[i16; 4]; 7] = [
    [0, 0, 0, 0],
    [0, 0, 0, 1],
    [0, 0, 0, 1],
    [0, 0, 0, 1],
    [0, 0, 1, 1],
    [1, 0, 0, 1],
    [0, 0, 1, 1],
];

/// Column offsets of the seven pieces
const PIECE_COLUMNS: [[i16; 4]; 7] = [
    [-1, 0, 1, 2],
    [-1, 0, 1, -1],
    [-1, 0, 1, 0],
    [-1, 0, 1, 1],
    [-1, 0, 0, 1],
    [-1, 0, 1, 0],
    [-1, 0, -1, 0],
];

const LAST: i16 = FRAME_SIZE as i16 - 1;

/// Falling blocks
///
/// Knob First places the piece horizontally, turning knob Second rotates it
/// a quarter turn per detent in the direction turned, any button drops it.
/// Settled cells are kept in their own frame and merged into the canvas on
/// every draw. The round ends when a piece comes to rest above the top row;
/// the score is kept across rounds.
#[derive(Clone, Debug)]
pub struct Tetris {
    settled: Frame,
    block: PointSet<4>,
    position: i16,
    knob: i16,
    turn: i32,
    drop: bool,
    spawn: bool,
    pace: Pace,
    score: i16,
}

impl Tetris {
    /// Create a game with an empty board
    pub fn new() -> Self {
        Self {
            settled: Frame::new(),
            block: PointSet::default(),
            position: 0,
            knob: 0,
            turn: 0,
            drop: false,
            spawn: true,
            pace: Pace::default(),
            score: 0,
        }
    }

    /// Rows cleared so far
    pub fn score(&self) -> i16 {
        self.score
    }

    /// Build piece `kind` turned to match the knob, resting just above the board
    fn generate(kind: usize, knob: i16) -> PointSet<4> {
        let kind = kind.min(PIECE_ROWS.len() - 1);
        let cells: [Point; 4] =
            core::array::from_fn(|i| Point::new(PIECE_ROWS[kind][i], PIECE_COLUMNS[kind][i]));
        let mut block = PointSet::new(cells);
        block = ortho_rotate_set(&block, block[1], i32::from(4 - knob));

        let lowest = block.iter().map(|part| part.row).max().unwrap_or(0);
        block.translate(-lowest - 1, 0);
        block
    }

    fn read(&mut self, ctx: &mut Context<'_>) {
        self.drop = ctx.inputs.any_button();

        let knob = ctx.inputs.knob(Knob::Second, 0, 3);
        self.turn = match knob.cmp(&self.knob) {
            core::cmp::Ordering::Equal => 0,
            core::cmp::Ordering::Less => 3,
            core::cmp::Ordering::Greater => 1,
        };
        self.knob = knob;

        if self.spawn {
            let kind = ctx.rng.range(0, PIECE_ROWS.len() as i16 - 1);
            self.block = Self::generate(kind as usize, knob);
            self.spawn = false;
        }

        let (inferior, superior) = self.reach();
        let mut position = ctx.inputs.knob(Knob::First, 0, LAST);
        if position < inferior {
            position = inferior;
        }
        if position > superior {
            position = superior;
        }
        self.position = position;
    }

    /// Range of pivot columns the block can slide to without crossing a
    /// wall or a settled cell in any of its rows
    fn reach(&self) -> (i16, i16) {
        let pivot = self.block[1].col;
        let mut inferior = 0;
        let mut superior = LAST;

        for part in &self.block {
            let lo = (0..part.col)
                .rev()
                .find(|col| self.settled.get(part.row, *col))
                .map_or(0, |col| col + 1);
            let hi = (part.col + 1..=LAST)
                .find(|col| self.settled.get(part.row, *col))
                .map_or(LAST, |col| col - 1);

            inferior = inferior.max(pivot + lo - part.col);
            superior = superior.min(pivot + hi - part.col);
        }
        (inferior, superior)
    }

    /// Whether the block rests on the floor or on a settled cell
    fn collision(&self) -> bool {
        self.block
            .iter()
            .any(|part| part.row >= LAST || self.settled.get(part.row + 1, part.col))
    }

    /// Whether a block position is inside the walls, above the floor and clear
    /// of settled cells; cells above the board are allowed
    fn fits(&self, block: &PointSet<4>) -> bool {
        block.iter().all(|part| {
            (0..=LAST).contains(&part.col) && part.row <= LAST && !self.settled.get_point(*part)
        })
    }

    /// Remove full rows, shifting everything above down
    fn clear_rows(&mut self) -> i16 {
        let mut cleared = 0;
        for row in 0..FRAME_SIZE {
            if self.settled[row] == 0xFF {
                for index in (1..=row).rev() {
                    self.settled[index] = self.settled[index - 1];
                }
                self.settled[0] = 0;
                cleared += 1;
            }
        }
        cleared
    }

    fn advance(&mut self) {
        let shift = self.position - self.block[1].col;
        self.block.translate(0, shift);

        if self.pace.is_step() {
            if self.collision() {
                self.settled.set_shape(&self.block, true);
                self.score += self.clear_rows();
                self.spawn = true;
                return;
            }
            self.block.translate(1, 0);
        }

        if self.turn != 0 {
            let turned = ortho_rotate_set(&self.block, self.block[1], self.turn);
            if self.fits(&turned) {
                self.block = turned;
            }
        }

        if self.drop {
            while !self.collision() {
                self.block.translate(1, 0);
            }
            self.drop = false;
        }
    }

    fn draw(&self, ctx: &mut Context<'_>) {
        let canvas = &mut *ctx.canvas;
        canvas.frame.set_shape(&self.block, true);
        for row in 0..FRAME_SIZE {
            canvas.frame[row] |= self.settled[row];
        }

        let mut points = self.score.rem_euclid(10_000);
        for index in (0..4).rev() {
            canvas.layer.set(index, points % 10);
            points /= 10;
        }
        canvas.separator = false;
    }
}

impl Default for Tetris {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Tetris {
    fn start(&mut self, _ctx: &mut Context<'_>) {
        self.settled.clear();
        self.spawn = true;
    }

    fn update(&mut self, level: i16, ctx: &mut Context<'_>) {
        self.read(ctx);
        self.pace.tick(level);

        self.advance();
        self.draw(ctx);
    }

    fn verify(&mut self) -> bool {
        self.pace.is_step()
            && self.collision()
            && self.block.iter().any(|part| part.row < 0)
    }

    fn preview(&self) -> Frame {
        Frame::from_rows(PREVIEW)
    }
}
