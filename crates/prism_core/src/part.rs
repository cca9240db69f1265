//! Type-homogeneous groups of primitives.

use crate::primitive::{Primitive, PrimitiveKind};
use crate::scene::{SceneError, SceneResult};

/// An ordered collection of primitives that all share one kind.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    kind: PrimitiveKind,
    primitives: Vec<Primitive>,
}

impl Part {
    /// Create an empty part that accepts primitives of `kind`.
    pub fn new(name: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            name: name.into(),
            kind,
            primitives: Vec::new(),
        }
    }

    /// Create a part and fill it, rejecting the first primitive of the wrong kind.
    pub fn with_primitives(
        name: impl Into<String>,
        kind: PrimitiveKind,
        primitives: impl IntoIterator<Item = Primitive>,
    ) -> SceneResult<Self> {
        let mut part = Self::new(name, kind);
        for primitive in primitives {
            part.push(primitive)?;
        }
        Ok(part)
    }

    /// Append a primitive. Fails if its kind differs from the part's.
    pub fn push(&mut self, primitive: Primitive) -> SceneResult<()> {
        if primitive.kind() != self.kind {
            return Err(SceneError::PartTypeMismatch {
                part: self.name.clone(),
                expected: self.kind,
                found: primitive.kind(),
            });
        }
        self.primitives.push(primitive);
        Ok(())
    }

    /// Kind shared by every member.
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// In-place access for edits between frames, such as swapping fills.
    /// A primitive whose shape no longer matches the part kind is rejected
    /// by the next buffer build.
    pub fn primitives_mut(&mut self) -> &mut [Primitive] {
        &mut self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::fill::{Color, Fill};
    use crate::vertex::VertexArena;
    use prism_math::DVec3;

    #[test]
    fn test_rejects_mismatched_kind() {
        let mut arena = VertexArena::new();
        let a = arena.add("a", DVec3::ZERO);
        let b = arena.add("b", DVec3::X);
        let c = arena.add("c", DVec3::Y);
        let fill = Arc::new(Fill::solid(Color::WHITE));

        let mut part = Part::new("faces", PrimitiveKind::Triangle);
        part.push(Primitive::triangle("t", [a, b, c], fill.clone())).unwrap();

        let err = part.push(Primitive::line("l", [a, b], fill)).unwrap_err();
        assert!(matches!(
            err,
            SceneError::PartTypeMismatch {
                expected: PrimitiveKind::Triangle,
                found: PrimitiveKind::Line,
                ..
            }
        ));
        assert_eq!(part.len(), 1);
    }

    #[test]
    fn test_with_primitives_keeps_order() {
        let mut arena = VertexArena::new();
        let a = arena.add("a", DVec3::ZERO);
        let b = arena.add("b", DVec3::X);
        let fill = Arc::new(Fill::default());

        let part = Part::with_primitives(
            "edges",
            PrimitiveKind::Line,
            vec![
                Primitive::line("first", [a, b], fill.clone()),
                Primitive::line("second", [b, a], fill),
            ],
        )
        .unwrap();

        let names: Vec<&str> = part.primitives().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
