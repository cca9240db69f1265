//! Vertex arena.
//!
//! Vertices are shared by reference between primitives (and between solids),
//! so the scene graph is a DAG over vertices. Identity is an ordinal
//! `VertexId` handed out by the arena at creation time; two vertices with
//! equal coordinates are still distinct vertices.

use std::fmt;

use prism_math::{DVec3, DVec4};

use crate::scene::{SceneError, SceneResult};

/// Stable identity of a vertex: its ordinal slot in the owning arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    /// Arena slot of this vertex.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A named point in homogeneous model coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub id: VertexId,
    pub name: String,
    pub position: DVec4,
}

/// Owner of every vertex in a scene.
#[derive(Debug, Clone, Default)]
pub struct VertexArena {
    vertices: Vec<Vertex>,
}

impl VertexArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex at a 3D point (`w = 1`) and return its id.
    pub fn add(&mut self, name: impl Into<String>, position: DVec3) -> VertexId {
        self.add_homogeneous(name, position.extend(1.0))
    }

    /// Add a vertex with an explicit homogeneous position.
    pub fn add_homogeneous(&mut self, name: impl Into<String>, position: DVec4) -> VertexId {
        let id = VertexId(self.vertices.len() as u32);
        self.vertices.push(Vertex {
            id,
            name: name.into(),
            position,
        });
        id
    }

    /// Look up a vertex by id.
    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Whether `id` was issued by this arena.
    pub fn contains(&self, id: VertexId) -> bool {
        id.index() < self.vertices.len()
    }

    /// Position of a vertex, failing on an id this arena never issued.
    pub fn position(&self, id: VertexId) -> SceneResult<DVec4> {
        self.get(id)
            .map(|v| v.position)
            .ok_or(SceneError::UnknownVertex(id))
    }

    /// Move a vertex. Scene buffers built before the edit are stale until
    /// regenerated.
    pub fn set_position(&mut self, id: VertexId, position: DVec4) -> SceneResult<()> {
        let vertex = self
            .vertices
            .get_mut(id.index())
            .ok_or(SceneError::UnknownVertex(id))?;
        vertex.position = position;
        Ok(())
    }

    /// Number of vertices in the arena.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate vertices in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_ordinal() {
        let mut arena = VertexArena::new();
        let a = arena.add("a", DVec3::ZERO);
        let b = arena.add("b", DVec3::X);

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_equal_coordinates_distinct_identity() {
        let mut arena = VertexArena::new();
        let a = arena.add("a", DVec3::ONE);
        let b = arena.add("b", DVec3::ONE);

        assert_ne!(a, b);
        assert_eq!(arena.position(a).unwrap(), arena.position(b).unwrap());
    }

    #[test]
    fn test_add_sets_w_to_one() {
        let mut arena = VertexArena::new();
        let id = arena.add("p", DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(arena.position(id).unwrap(), DVec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_unknown_vertex() {
        let mut arena = VertexArena::new();
        arena.add("a", DVec3::ZERO);

        let foreign = VertexId(7);
        assert!(!arena.contains(foreign));
        assert!(matches!(
            arena.position(foreign),
            Err(SceneError::UnknownVertex(id)) if id == foreign
        ));
        assert!(arena.set_position(foreign, DVec4::ONE).is_err());
    }

    #[test]
    fn test_set_position() {
        let mut arena = VertexArena::new();
        let id = arena.add("a", DVec3::ZERO);
        arena.set_position(id, DVec4::new(5.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(arena.get(id).unwrap().position.x, 5.0);
    }
}
