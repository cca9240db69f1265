//! Geometric primitives.
//!
//! A primitive is a fixed number of vertex references plus a fill. The
//! arity is carried by the variant's array type, so a triangle can never
//! hold two vertices.

use std::fmt;
use std::sync::Arc;

use crate::fill::Fill;
use crate::vertex::VertexId;

/// The primitive variants a part can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Triangle,
    Line,
    BicubicPatch,
}

impl PrimitiveKind {
    /// Number of vertices per primitive of this kind.
    pub const fn arity(self) -> usize {
        match self {
            PrimitiveKind::Triangle => 3,
            PrimitiveKind::Line => 2,
            PrimitiveKind::BicubicPatch => 4,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Triangle => "triangle",
            PrimitiveKind::Line => "line",
            PrimitiveKind::BicubicPatch => "bicubic patch",
        };
        f.write_str(name)
    }
}

/// Vertex references of a primitive, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Triangle([VertexId; 3]),
    Line([VertexId; 2]),
    /// Four control vertices. No surface evaluation exists yet; `precision`
    /// is the tessellation density a future evaluator would use.
    BicubicPatch {
        controls: [VertexId; 4],
        precision: u32,
    },
}

/// A named primitive with its fill.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub name: String,
    pub shape: Shape,
    /// Shared so several primitives can reference one fill.
    pub fill: Arc<Fill>,
}

impl Primitive {
    /// Create a triangle.
    pub fn triangle(name: impl Into<String>, vertices: [VertexId; 3], fill: Arc<Fill>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Triangle(vertices),
            fill,
        }
    }

    /// Create a line segment.
    pub fn line(name: impl Into<String>, vertices: [VertexId; 2], fill: Arc<Fill>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Line(vertices),
            fill,
        }
    }

    /// Create a bicubic patch from four control vertices.
    pub fn bicubic_patch(
        name: impl Into<String>,
        controls: [VertexId; 4],
        precision: u32,
        fill: Arc<Fill>,
    ) -> Self {
        Self {
            name: name.into(),
            shape: Shape::BicubicPatch {
                controls,
                precision,
            },
            fill,
        }
    }

    /// Kind of this primitive.
    pub fn kind(&self) -> PrimitiveKind {
        match self.shape {
            Shape::Triangle(_) => PrimitiveKind::Triangle,
            Shape::Line(_) => PrimitiveKind::Line,
            Shape::BicubicPatch { .. } => PrimitiveKind::BicubicPatch,
        }
    }

    /// Vertex references in declaration order.
    pub fn vertices(&self) -> &[VertexId] {
        match &self.shape {
            Shape::Triangle(v) => v,
            Shape::Line(v) => v,
            Shape::BicubicPatch { controls, .. } => controls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill::Color;
    use crate::vertex::VertexArena;
    use prism_math::DVec3;

    #[test]
    fn test_vertex_count_matches_arity() {
        let mut arena = VertexArena::new();
        let ids: Vec<VertexId> = (0..4).map(|i| arena.add(format!("v{i}"), DVec3::ZERO)).collect();
        let fill = Arc::new(Fill::solid(Color::RED));

        let tri = Primitive::triangle("t", [ids[0], ids[1], ids[2]], fill.clone());
        let line = Primitive::line("l", [ids[0], ids[1]], fill.clone());
        let patch = Primitive::bicubic_patch("p", [ids[0], ids[1], ids[2], ids[3]], 8, fill);

        for prim in [&tri, &line, &patch] {
            assert_eq!(prim.vertices().len(), prim.kind().arity());
        }
        assert_eq!(tri.kind(), PrimitiveKind::Triangle);
        assert_eq!(line.kind(), PrimitiveKind::Line);
        assert_eq!(patch.kind(), PrimitiveKind::BicubicPatch);
    }

    #[test]
    fn test_fill_is_shared() {
        let mut arena = VertexArena::new();
        let a = arena.add("a", DVec3::ZERO);
        let b = arena.add("b", DVec3::X);
        let fill = Arc::new(Fill::solid(Color::GREEN));

        let first = Primitive::line("first", [a, b], fill.clone());
        let second = Primitive::line("second", [b, a], fill.clone());

        assert!(Arc::ptr_eq(&first.fill, &second.fill));
        assert_eq!(Arc::strong_count(&fill), 3);
    }
}
