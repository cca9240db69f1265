/// A closed interval `[min, max]` on the real line.
///
/// The clip stage builds one per bound of the canonical view volume
/// (`-w ≤ x ≤ w`, `-w ≤ y ≤ w`, `0 ≤ z ≤ w`). When `min > max` nothing is
/// inside, which is how a vertex behind the eye (`w < 0`) fails every test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `[-half_width, half_width]`.
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Inclusive membership.
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }
}
