//! Solids: parts plus an ordered model transformation list.

use prism_math::DMat4;

use crate::part::Part;
use crate::transformation::Transformation;

/// A renderable object made of parts and placed by its transformations.
#[derive(Debug, Clone, Default)]
pub struct Solid {
    pub name: String,
    pub parts: Vec<Part>,
    /// Applied in list order: the first entry acts on the model first.
    pub transformations: Vec<Transformation>,
}

impl Solid {
    /// Create an empty solid.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style part append.
    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Builder-style transformation append.
    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformations.push(transformation);
        self
    }

    pub fn add_part(&mut self, part: Part) {
        self.parts.push(part);
    }

    pub fn add_transformation(&mut self, transformation: Transformation) {
        self.transformations.push(transformation);
    }

    /// Compose the transformation list into one model matrix.
    ///
    /// For transformations `[T1, T2, ..., Tn]` this is `Tn * ... * T2 * T1`.
    pub fn model_matrix(&self) -> DMat4 {
        self.transformations
            .iter()
            .fold(DMat4::IDENTITY, |acc, t| t.matrix() * acc)
    }

    /// Total primitives across all parts.
    pub fn primitive_count(&self) -> usize {
        self.parts.iter().map(Part::len).sum()
    }
}
