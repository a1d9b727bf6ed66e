use std::time::Duration;

use serde::Serialize;

use super::types::{DeathReason, Direction, GameStatus, Point};

/// Immutable view of the engine after a transition.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub board_size: usize,
    /// Head first.
    pub snake: Vec<Point>,
    /// Palette color names, parallel to `snake`.
    pub colors: Vec<String>,
    pub food: Option<Point>,
    pub direction: Direction,
    pub status: GameStatus,
    pub score: u32,
    pub high_score: u32,
    pub speed_ms: u64,
    pub death_reason: Option<DeathReason>,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }
}

/// Receives every snapshot the engine emits.
pub trait StateBroadcaster {
    fn broadcast_state(&self, snapshot: &GameSnapshot);
}

impl<F> StateBroadcaster for F
where
    F: Fn(&GameSnapshot),
{
    fn broadcast_state(&self, snapshot: &GameSnapshot) {
        self(snapshot)
    }
}
