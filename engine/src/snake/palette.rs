use serde::{Deserialize, Serialize};

/// Position of a segment's color inside the palette cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentColor(pub usize);

#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colors for a freshly built snake of `length` segments, head first.
    pub fn initial(&self, length: usize) -> Vec<SegmentColor> {
        (0..length).map(|i| self.wrap(i)).collect()
    }

    pub fn next(&self, color: SegmentColor) -> SegmentColor {
        self.wrap(color.0 + 1)
    }

    pub fn name(&self, color: SegmentColor) -> &str {
        self.colors.get(color.0).map(String::as_str).unwrap_or_default()
    }

    fn wrap(&self, index: usize) -> SegmentColor {
        SegmentColor(index % self.colors.len().max(1))
    }
}
