//! Perspective divide and viewport mapping.

use prism_math::{DVec3, DVec4, HomogeneousExt};

/// Map a normalized device point to pixel space.
///
/// `x` and `y` in `[-1, 1]` span `[0, width - 1]` and `[0, height - 1]`,
/// with y flipped so the raster origin is the top-left corner. Depth passes
/// through unchanged.
pub fn viewport_map(ndc: DVec3, width: u32, height: u32) -> DVec3 {
    let max_x = width.saturating_sub(1) as f64;
    let max_y = height.saturating_sub(1) as f64;
    DVec3::new(
        0.5 * max_x * (ndc.x + 1.0),
        0.5 * max_y * (1.0 - ndc.y),
        ndc.z,
    )
}

/// Divide, dehomogenize and map every clip-space position to the screen.
pub fn to_screen(clip: &[DVec4], width: u32, height: u32) -> Vec<DVec3> {
    clip.iter()
        .map(|&p| viewport_map(p.perspective_divide().dehomogenize(), width, height))
        .collect()
}
