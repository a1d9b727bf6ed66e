use crate::rng::SessionRng;
use super::snapshot::GameSnapshot;
use super::types::{Direction, GameStatus, Point};

/// Greedy autopilot: steps toward the food along Manhattan distance, never
/// into a wall or the body, and wanders randomly when no food is on the board.
pub struct BotController;

impl BotController {
    pub fn calculate_move(snapshot: &GameSnapshot, rng: &mut SessionRng) -> Option<Direction> {
        if snapshot.status != GameStatus::Playing {
            return None;
        }
        let head = snapshot.head()?;

        let safe: Vec<(Direction, Point)> = Self::get_valid_directions(snapshot.direction)
            .into_iter()
            .filter_map(|dir| {
                let next = head.step(dir, snapshot.board_size)?;
                Self::is_safe_position(next, snapshot).then_some((dir, next))
            })
            .collect();

        if safe.is_empty() {
            return Some(snapshot.direction);
        }

        match snapshot.food {
            Some(food) => safe
                .iter()
                .min_by_key(|(dir, next)| (next.manhattan_distance(&food), *dir != snapshot.direction))
                .map(|(dir, _)| *dir),
            None => {
                let idx = rng.random_range(0..safe.len());
                Some(safe[idx].0)
            }
        }
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    fn is_safe_position(pos: Point, snapshot: &GameSnapshot) -> bool {
        !snapshot.snake.contains(&pos)
    }
}
