use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`, or `None` when it would leave a
    /// `board_size`×`board_size` board.
    pub fn step(&self, direction: Direction, board_size: usize) -> Option<Point> {
        match direction {
            Direction::Up if self.y > 0 => Some(Point::new(self.x, self.y - 1)),
            Direction::Down if self.y + 1 < board_size => Some(Point::new(self.x, self.y + 1)),
            Direction::Left if self.x > 0 => Some(Point::new(self.x - 1, self.y)),
            Direction::Right if self.x + 1 < board_size => Some(Point::new(self.x + 1, self.y)),
            _ => None,
        }
    }

    pub fn is_adjacent(&self, other: &Point) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }

    pub fn manhattan_distance(&self, other: &Point) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn is_opposite(&self, other: &Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
                | (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
        )
    }

    /// Direction that leads from `from` to the adjacent cell `to`.
    pub fn between(from: &Point, to: &Point) -> Option<Direction> {
        if !from.is_adjacent(to) {
            return None;
        }
        if to.y < from.y {
            Some(Direction::Up)
        } else if to.y > from.y {
            Some(Direction::Down)
        } else if to.x < from.x {
            Some(Direction::Left)
        } else {
            Some(Direction::Right)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
}
