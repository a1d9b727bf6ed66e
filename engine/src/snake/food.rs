use std::collections::HashSet;

use super::types::Point;
use crate::rng::SessionRng;

/// Picks a random free cell. Returns `None` when the board is full or when
/// `max_attempts` draws all landed on occupied cells.
pub fn place_food(
    occupied: &HashSet<Point>,
    board_size: usize,
    max_attempts: usize,
    rng: &mut SessionRng,
) -> Option<Point> {
    if board_size == 0 || occupied.len() >= board_size * board_size {
        return None;
    }

    for _ in 0..max_attempts {
        let x = rng.random_range(0..board_size);
        let y = rng.random_range(0..board_size);
        let pos = Point::new(x, y);

        if !occupied.contains(&pos) {
            return Some(pos);
        }
    }

    None
}
