use super::{Context, Game, Pace};
use crate::canvas::Frame;
use crate::geometry::{Point, PointSet};
use crate::input::Knob;

const PREVIEW: [u8; 8] = [
    0b1111_1111,
    0b1000_0001,
    0b1000_0101,
    0b1010_0101,
    0b1010_0101,
    0b1010_0001,
    0b1000_0001,
    0b1111_1111,
];

/// How the ball bounces off what it is about to hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bounce {
    None,
    Vertical,
    Horizontal,
    Corner,
}

/// Two-player pong
///
/// Paddles sit on columns 0 and 7, driven by knobs First and Second. They
/// shrink from three cells to two at level 2 and to one at level 3. The ball
/// reaching a side column scores for the opposite player and restarts the
/// round; scores are kept across rounds.
#[derive(Clone, Debug)]
pub struct Pong {
    left: PointSet<3>,
    right: PointSet<3>,
    ball: Point,
    heading: Point,
    first: i16,
    second: i16,
    level: i16,
    pace: Pace,
    scores: [i16; 2],
}

impl Pong {
    /// Create a game with both scores at 0
    pub fn new() -> Self {
        Self {
            left: PointSet::default(),
            right: PointSet::default(),
            ball: Point::new(3, 3),
            heading: Point::new(1, 1),
            first: 0,
            second: 0,
            level: 0,
            pace: Pace::default(),
            scores: [0; 2],
        }
    }

    /// Scores of the left and right player
    pub fn scores(&self) -> [i16; 2] {
        self.scores
    }

    /// Rows a paddle loses at the current level
    fn shrink(&self) -> i16 {
        (self.level - 1).clamp(0, 2)
    }

    fn read(&mut self, ctx: &Context<'_>) {
        let limit = 5 + self.shrink();
        self.first = ctx.inputs.knob(Knob::First, 0, limit);
        self.second = ctx.inputs.knob(Knob::Second, 0, limit);
    }

    fn place_paddles(&mut self) {
        let length = 3 - self.shrink();
        for index in 0..3 {
            // Unused cells collapse onto the top one
            let offset = if index < length { index } else { 0 };
            self.left[index as usize].set(self.first + offset, 0);
            self.right[index as usize].set(self.second + offset, 7);
        }
    }

    fn collision(&self) -> Bounce {
        let Point { row, col } = self.ball;
        let bottom = 5 + self.shrink();

        if row == 0 || row == 7 {
            let edge = if row == 0 { 0 } else { bottom };
            if (col == 1 && self.first == edge) || (col == 6 && self.second == edge) {
                return Bounce::Corner;
            }
            return Bounce::Vertical;
        }

        let paddle = match col {
            1 => self.first,
            6 => self.second,
            _ => return Bounce::None,
        };
        if paddle > row || paddle + 2 < row + self.shrink() {
            return Bounce::None;
        }
        Bounce::Horizontal
    }

    fn advance(&mut self) {
        if !self.pace.is_step() {
            return;
        }
        match self.collision() {
            Bounce::None => {}
            Bounce::Vertical => self.heading.row = -self.heading.row,
            Bounce::Horizontal => self.heading.col = -self.heading.col,
            Bounce::Corner => {
                self.heading.row = -self.heading.row;
                self.heading.col = -self.heading.col;
            }
        }
        self.ball.translate_by(self.heading);
    }

    fn draw(&self, ctx: &mut Context<'_>) {
        let canvas = &mut *ctx.canvas;
        canvas.frame.set_shape(&self.left, true);
        canvas.frame.set_shape(&self.right, true);
        canvas.frame.set_point(self.ball, true);

        canvas.layer.set_pair(0, self.scores[0]);
        canvas.layer.set_pair(2, self.scores[1]);
        canvas.separator = true;
    }
}

impl Default for Pong {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Pong {
    fn start(&mut self, ctx: &mut Context<'_>) {
        self.read(ctx);
        self.place_paddles();

        self.ball.set(ctx.rng.range(3, 4), ctx.rng.range(3, 4));
        self.heading.set(ctx.rng.sign(), ctx.rng.sign());
    }

    fn update(&mut self, level: i16, ctx: &mut Context<'_>) {
        self.level = level;
        self.read(ctx);
        self.pace.tick(level);

        self.place_paddles();
        self.advance();
        self.draw(ctx);
    }

    fn verify(&mut self) -> bool {
        if !self.pace.is_step() {
            return false;
        }
        match self.ball.col {
            0 => {
                self.scores[1] += 1;
                true
            }
            7 => {
                self.scores[0] += 1;
                true
            }
            _ => false,
        }
    }

    fn preview(&self) -> Frame {
        Frame::from_rows(PREVIEW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::testing::Harness;
    use crate::input::InputState;

    #[test]
    fn test_start_places_ball_in_center() {
        for seed in 1..20 {
            let mut harness = Harness::new(seed);
            let mut pong = Pong::new();
            harness.start(&mut pong);
            assert!((3..=4).contains(&pong.ball.row));
            assert!((3..=4).contains(&pong.ball.col));
            assert_eq!(pong.heading.row.abs(), 1);
            assert_eq!(pong.heading.col.abs(), 1);
        }
    }

    #[test]
    fn test_paddles_follow_knobs_and_shrink_with_level() {
        let mut harness = Harness::new(1);
        harness.inputs = InputState::new([0, 0, 0, 1023], [false; 4]);
        let mut pong = Pong::new();
        harness.start(&mut pong);

        harness.update(&mut pong, 0);
        for row in 0..8 {
            assert_eq!(harness.canvas.frame.get(row, 0), row < 3);
            assert_eq!(harness.canvas.frame.get(row, 7), row >= 5);
        }

        harness.update(&mut pong, 3);
        let left: i16 = (0..8).map(|row| i16::from(harness.canvas.frame.get(row, 0))).sum();
        assert_eq!(left, 1);
        // Limit grows to 7 so a 1-cell paddle reaches the bottom row
        assert!(harness.canvas.frame.get(7, 7));
    }

    #[test]
    fn test_ball_moves_once_per_step() {
        let mut harness = Harness::new(3);
        let mut pong = Pong::new();
        harness.start(&mut pong);
        let start = pong.ball;

        for _ in 0..19 {
            harness.update(&mut pong, 0);
            assert_eq!(pong.ball, start);
        }
        harness.update(&mut pong, 0);
        assert_eq!(pong.ball.row, start.row + pong.heading.row);
    }

    #[test]
    fn test_wall_bounce_reverses_vertical_heading() {
        let mut pong = Pong::new();
        pong.ball = Point::new(0, 4);
        pong.heading = Point::new(-1, 1);
        assert_eq!(pong.collision(), Bounce::Vertical);
    }

    #[test]
    fn test_paddle_bounce_and_miss() {
        let mut pong = Pong::new();
        pong.first = 2;
        pong.ball = Point::new(3, 1);
        assert_eq!(pong.collision(), Bounce::Horizontal);

        pong.ball = Point::new(5, 1);
        assert_eq!(pong.collision(), Bounce::None);

        pong.ball = Point::new(0, 1);
        pong.first = 0;
        assert_eq!(pong.collision(), Bounce::Corner);
    }

    #[test]
    fn test_missed_ball_scores_for_the_other_side() {
        let mut harness = Harness::new(5);
        // Left paddle at the bottom, right paddle at the top
        harness.inputs = InputState::new([0, 0, 1023, 0], [false; 4]);
        let mut pong = Pong::new();
        harness.start(&mut pong);
        pong.ball = Point::new(2, 2);
        pong.heading = Point::new(-1, -1);

        let mut rounds = 0;
        for _ in 0..200 {
            harness.update(&mut pong, 0);
            if pong.verify() {
                rounds += 1;
                break;
            }
        }
        assert_eq!(rounds, 1);
        assert_eq!(pong.scores(), [0, 1]);
        assert_eq!(harness.canvas.layer, crate::canvas::Layer::from([0, 0, 0, 0]));
        assert!(harness.canvas.separator);
    }

    #[test]
    fn test_scores_persist_across_rounds() {
        let mut harness = Harness::new(9);
        let mut pong = Pong::new();
        pong.scores = [3, 12];
        harness.start(&mut pong);
        harness.update(&mut pong, 0);
        assert_eq!(pong.scores(), [3, 12]);
        assert_eq!(harness.canvas.layer, crate::canvas::Layer::from([0, 3, 1, 2]));
    }
}
