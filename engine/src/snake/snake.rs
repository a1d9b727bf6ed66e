use std::collections::{HashSet, VecDeque};

use super::palette::{Palette, SegmentColor};
use super::types::Point;

/// Snake body, head first, with a color per segment. `body`, `body_set` and
/// `colors` always have the same length.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    colors: VecDeque<SegmentColor>,
}

impl Snake {
    pub fn new(segments: &[Point], palette: &Palette) -> Self {
        let body: VecDeque<Point> = segments.iter().copied().collect();
        let body_set = body.iter().copied().collect();
        let colors = palette.initial(body.len()).into_iter().collect();

        Self {
            body,
            body_set,
            colors,
        }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Includes the tail, even on the tick it is about to move away.
    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    pub fn occupied(&self) -> &HashSet<Point> {
        &self.body_set
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    pub fn colors(&self) -> impl Iterator<Item = &SegmentColor> {
        self.colors.iter()
    }

    /// Pushes `new_head`; drops the tail unless `grow`. Colors stay attached
    /// to their distance from the head, so growing appends the next palette
    /// color at the tail end.
    pub fn advance(&mut self, new_head: Point, grow: bool, palette: &Palette) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);

        if grow {
            let last = self.colors.back().copied().unwrap_or(SegmentColor(0));
            self.colors.push_back(palette.next(last));
        } else if let Some(tail) = self.body.pop_back() {
            self.body_set.remove(&tail);
        }
    }
}
