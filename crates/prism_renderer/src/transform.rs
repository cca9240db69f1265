//! Model and view transforms over the buffered vertices.
//!
//! Every stage returns a fresh position array indexed like
//! `SceneBuffers::placements()`: one entry per (solid, vertex) pair, so a
//! vertex shared by two solids is placed once by each. The vertex arena is
//! never written to.

use prism_core::{BufferError, Scene, SceneBuffers};
use prism_math::{DMat4, DVec4};

use crate::{RenderError, RenderResult};

/// Place every buffered vertex in world space through the model matrix of
/// each solid that references it.
pub fn model_stage(scene: &Scene, buffers: &SceneBuffers) -> RenderResult<Vec<DVec4>> {
    let matrices: Vec<DMat4> = scene.renderable_solids().map(|s| s.model_matrix()).collect();
    let arena = scene.vertices();
    let vertices = buffers.vertices();

    buffers
        .placements()
        .iter()
        .map(|placement| -> RenderResult<DVec4> {
            let matrix = matrices.get(placement.solid).ok_or_else(|| {
                RenderError::StaleBuffers(format!(
                    "scene has {} renderable solids, buffers reference solid {}",
                    matrices.len(),
                    placement.solid
                ))
            })?;
            let id = vertices.get(placement.slot).ok_or(BufferError::DanglingIndex {
                index: placement.slot,
                len: vertices.len(),
            })?;
            Ok(*matrix * arena.position(*id)?)
        })
        .collect()
}

/// Apply one shared view matrix to every position.
pub fn view_stage(positions: &[DVec4], view: &DMat4) -> Vec<DVec4> {
    positions.iter().map(|&p| *view * p).collect()
}

/// Model transforms followed by the camera's view transform.
pub fn transform_stage(scene: &Scene, buffers: &SceneBuffers) -> RenderResult<Vec<DVec4>> {
    let world = model_stage(scene, buffers)?;
    Ok(view_stage(&world, &scene.camera.view_matrix()))
}
