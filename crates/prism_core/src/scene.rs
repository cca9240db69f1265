//! Scene graph root.
//!
//! A scene owns the vertex arena, the solids that reference it, the camera,
//! and an optional axis indicator. It also owns the flattened buffers, which
//! are a snapshot: editing the graph does not touch them until
//! [`Scene::regenerate_buffers`] is called again.

use prism_math::DVec3;
use thiserror::Error;

use crate::buffers::{BufferResult, SceneBuffers};
use crate::camera::Camera;
use crate::primitive::PrimitiveKind;
use crate::solid::Solid;
use crate::vertex::{VertexArena, VertexId};

/// Errors raised while building or editing a scene graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Part '{part}' holds {expected} primitives, cannot add a {found}")]
    PartTypeMismatch {
        part: String,
        expected: PrimitiveKind,
        found: PrimitiveKind,
    },

    #[error("Unknown vertex: {0}")]
    UnknownVertex(VertexId),

    #[error("Invalid projection: {0}")]
    InvalidProjection(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A complete scene: camera, solids and the vertices they share.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Scene name
    pub name: String,

    /// Viewer; may be moved between frames by an input handler
    pub camera: Camera,

    vertices: VertexArena,
    solids: Vec<Solid>,
    axis: Option<Solid>,
    axis_visible: bool,
    buffers: SceneBuffers,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>, camera: Camera) -> Self {
        Self {
            name: name.into(),
            camera,
            ..Default::default()
        }
    }

    pub fn vertices(&self) -> &VertexArena {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut VertexArena {
        &mut self.vertices
    }

    /// Shorthand for adding a vertex to the scene's arena.
    pub fn add_vertex(&mut self, name: impl Into<String>, position: DVec3) -> VertexId {
        self.vertices.add(name, position)
    }

    /// Add a solid. Every vertex it references must come from this scene's arena.
    pub fn add_solid(&mut self, solid: Solid) -> SceneResult<()> {
        self.check_vertices(&solid)?;
        self.solids.push(solid);
        Ok(())
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Mutable access for graph edits. Buffers go stale until regenerated.
    pub fn solids_mut(&mut self) -> &mut [Solid] {
        &mut self.solids
    }

    /// Install the axis indicator solid. It starts hidden.
    pub fn set_axis(&mut self, axis: Solid) -> SceneResult<()> {
        self.check_vertices(&axis)?;
        self.axis = Some(axis);
        Ok(())
    }

    pub fn axis(&self) -> Option<&Solid> {
        self.axis.as_ref()
    }

    /// Include the axis indicator from the next buffer regeneration on.
    pub fn show_axis(&mut self) {
        self.axis_visible = true;
    }

    /// Exclude the axis indicator from the next buffer regeneration on.
    pub fn hide_axis(&mut self) {
        self.axis_visible = false;
    }

    pub fn is_axis_visible(&self) -> bool {
        self.axis_visible
    }

    /// Solids that take part in rendering: scene solids in order, then the
    /// axis indicator when it is installed and visible.
    pub fn renderable_solids(&self) -> impl Iterator<Item = &Solid> {
        let axis = self.axis.iter().filter(|_| self.axis_visible);
        self.solids.iter().chain(axis)
    }

    /// The `index`-th solid of [`Scene::renderable_solids`].
    pub fn renderable_solid(&self, index: usize) -> Option<&Solid> {
        self.renderable_solids().nth(index)
    }

    /// Total primitives across renderable solids.
    pub fn primitive_count(&self) -> usize {
        self.renderable_solids().map(Solid::primitive_count).sum()
    }

    /// Rebuild the flattened buffers from the current graph.
    pub fn regenerate_buffers(&mut self) -> BufferResult<&SceneBuffers> {
        self.buffers = SceneBuffers::build(self)?;
        log::debug!(
            "Scene '{}': regenerated buffers ({} vertices, {} indices, {} parts)",
            self.name,
            self.buffers.vertex_count(),
            self.buffers.indices().len(),
            self.buffers.parts().len()
        );
        Ok(&self.buffers)
    }

    /// Buffers from the last regeneration (empty before the first one).
    pub fn buffers(&self) -> &SceneBuffers {
        &self.buffers
    }

    fn check_vertices(&self, solid: &Solid) -> SceneResult<()> {
        let referenced = solid
            .parts
            .iter()
            .flat_map(|part| part.primitives())
            .flat_map(|primitive| primitive.vertices());
        for &id in referenced {
            if !self.vertices.contains(id) {
                return Err(SceneError::UnknownVertex(id));
            }
        }
        Ok(())
    }
}
