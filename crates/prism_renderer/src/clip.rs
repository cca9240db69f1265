//! Projection to clip space and all-or-nothing primitive rejection.
//!
//! A primitive survives only if every one of its vertices lies inside the
//! canonical view volume. Partially visible primitives are dropped whole;
//! nothing is split at the volume boundary.

use prism_core::SceneBuffers;
use prism_math::{DMat4, DVec4, Interval};

/// Apply the projection matrix to eye-space positions.
pub fn project(positions: &[DVec4], projection: &DMat4) -> Vec<DVec4> {
    positions.iter().map(|&p| *projection * p).collect()
}

/// Whether a clip-space point satisfies `-w ≤ x ≤ w`, `-w ≤ y ≤ w` and
/// `0 ≤ z ≤ w`.
pub fn is_inside_clip_volume(p: DVec4) -> bool {
    let lateral = Interval::symmetric(p.w);
    let depth = Interval::new(0.0, p.w);
    lateral.contains(p.x) && lateral.contains(p.y) && depth.contains(p.z)
}

/// Drop every primitive with a vertex outside the clip volume.
///
/// `clip` is indexed like `SceneBuffers::placements()`. Part offsets are
/// rebuilt so the surviving index slices stay contiguous. Returns the number
/// of primitives removed.
pub fn clip_primitives(buffers: &mut SceneBuffers, clip: &[DVec4]) -> usize {
    let removed = buffers.retain_primitives(|_, placements| {
        placements
            .iter()
            .all(|&placement| clip.get(placement).is_some_and(|&p| is_inside_clip_volume(p)))
    });

    if removed > 0 {
        log::debug!(
            "Clipped {} primitives, {} remain",
            removed,
            buffers.primitive_count()
        );
    }
    removed
}
