//! Line and triangle rasterizers.
//!
//! All inputs are screen-space points `(x, y, z)` where `x`/`y` are pixel
//! coordinates and `z` is device depth. Every fragment goes through
//! [`FrameBuffer::set_element`], so overlapping primitives resolve by depth.
//! Pixels falling outside the frame are skipped.

use prism_core::{PixelProvider, PrimitiveKind};
use prism_math::DVec3;
use serde::Deserialize;

use crate::{FrameBuffer, RenderResult};

/// How primitives with an interior are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Solid-filled triangles.
    #[default]
    Filled,
    /// Boundary edges only.
    Wireframe,
}

/// Rasterize the segment `a`–`b`, returning the number of fragments written.
///
/// The walk runs one pixel at a time along the axis with the larger extent,
/// always starting from the endpoint with the lower coordinate on that axis,
/// so swapping `a` and `b` touches the same pixels with the same depths.
/// The other coordinate and `z` are interpolated linearly. A segment with no
/// extent is drawn as a single point at its nearer depth.
pub fn rasterize_line(
    frame: &mut FrameBuffer,
    a: DVec3,
    b: DVec3,
    fill: &dyn PixelProvider,
) -> RenderResult<usize> {
    let delta = b - a;
    let (major, minor, extent) = if delta.x.abs() >= delta.y.abs() {
        (0, 1, frame.width())
    } else {
        (1, 0, frame.height())
    };

    let (start, end) = if (a[major], a[minor], a.z) <= (b[major], b[minor], b.z) {
        (a, b)
    } else {
        (b, a)
    };

    let span = end[major] - start[major];
    if span == 0.0 {
        let written = plot(
            frame,
            start.x.round() as i64,
            start.y.round() as i64,
            start.z.min(end.z),
            fill,
        )?;
        return Ok(usize::from(written));
    }

    let first = (start[major].round() as i64).max(0);
    let last = (end[major].round() as i64).min(extent as i64 - 1);

    let mut written = 0;
    for m in first..=last {
        let t = ((m as f64 - start[major]) / span).clamp(0.0, 1.0);
        let n = (start[minor] + t * (end[minor] - start[minor])).round() as i64;
        let z = start.z + t * (end.z - start.z);
        let (x, y) = if major == 0 { (m, n) } else { (n, m) };
        if plot(frame, x, y, z, fill)? {
            written += 1;
        }
    }
    Ok(written)
}

/// Rasterize a solid-filled triangle, returning the number of fragments written.
///
/// Vertices are sorted along the controlling axis (X when the bounding box is
/// wider than tall, otherwise Y). The edge from the lowest to the highest
/// vertex is walked in lockstep with the two short edges, and at each unit
/// step a line joins the short-edge point to the long-edge point. The three
/// boundary edges are drawn as well so edges flat along the controlling axis
/// are not lost.
pub fn rasterize_triangle(
    frame: &mut FrameBuffer,
    vertices: [DVec3; 3],
    fill: &dyn PixelProvider,
) -> RenderResult<usize> {
    let mut written = rasterize_outline(frame, &vertices, fill)?;

    let min = vertices[0].min(vertices[1]).min(vertices[2]);
    let max = vertices[0].max(vertices[1]).max(vertices[2]);
    let size = max - min;
    let (major, extent) = if size.x > size.y {
        (0, frame.width())
    } else {
        (1, frame.height())
    };

    let mut sorted = vertices;
    sorted.sort_by(|a, b| a[major].total_cmp(&b[major]));
    let [lo, mid, hi] = sorted;

    if hi[major] == lo[major] {
        return Ok(written);
    }

    let first = (lo[major].round() as i64).max(0);
    let last = (hi[major].round() as i64).min(extent as i64 - 1);

    for m in first..=last {
        let c = m as f64;
        let long = point_on_edge(lo, hi, major, c);
        let short = if c <= mid[major] && mid[major] > lo[major] {
            point_on_edge(lo, mid, major, c)
        } else if hi[major] > mid[major] {
            point_on_edge(mid, hi, major, c)
        } else {
            mid
        };
        written += rasterize_line(frame, short, long, fill)?;
    }

    Ok(written)
}

/// Rasterize the closed boundary of a polygon (a single segment for two
/// points, a single pixel for one).
pub fn rasterize_outline(
    frame: &mut FrameBuffer,
    points: &[DVec3],
    fill: &dyn PixelProvider,
) -> RenderResult<usize> {
    match points {
        [] => Ok(0),
        [p] => rasterize_line(frame, *p, *p, fill),
        [a, b] => rasterize_line(frame, *a, *b, fill),
        _ => {
            let mut written = 0;
            for (i, &a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                written += rasterize_line(frame, a, b, fill)?;
            }
            Ok(written)
        }
    }
}

/// Rasterize one primitive according to `mode`.
///
/// Bicubic patches have no surface evaluator and produce no fragments.
pub fn rasterize_primitive(
    frame: &mut FrameBuffer,
    mode: RenderMode,
    kind: PrimitiveKind,
    points: &[DVec3],
    fill: &dyn PixelProvider,
) -> RenderResult<usize> {
    match (kind, points) {
        (PrimitiveKind::Triangle, &[a, b, c]) => match mode {
            RenderMode::Filled => rasterize_triangle(frame, [a, b, c], fill),
            RenderMode::Wireframe => rasterize_outline(frame, points, fill),
        },
        (PrimitiveKind::Line, &[a, b]) => rasterize_line(frame, a, b, fill),
        _ => Ok(0),
    }
}

/// Point on edge `a`–`b` at controlling-axis coordinate `c`, clamped to the
/// edge. The edge must have extent along `axis`.
fn point_on_edge(a: DVec3, b: DVec3, axis: usize, c: f64) -> DVec3 {
    let t = ((c - a[axis]) / (b[axis] - a[axis])).clamp(0.0, 1.0);
    a + (b - a) * t
}

fn plot(
    frame: &mut FrameBuffer,
    x: i64,
    y: i64,
    z: f64,
    fill: &dyn PixelProvider,
) -> RenderResult<bool> {
    if x < 0 || y < 0 || x >= frame.width() as i64 || y >= frame.height() as i64 {
        return Ok(false);
    }
    let (x, y) = (x as u32, y as u32);
    frame.set_element(x, y, z, fill.color_at(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Color, Fill};

    fn frame(width: u32, height: u32) -> FrameBuffer {
        FrameBuffer::new(width, height, Color::BLACK, 1.0)
    }

    fn painted(frame: &FrameBuffer) -> Vec<(u32, u32)> {
        let mut pixels = Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                if frame.depth().get(x, y).unwrap() < 1.0 {
                    pixels.push((x, y));
                }
            }
        }
        pixels
    }

    fn depths(frame: &FrameBuffer) -> Vec<f64> {
        let mut values = Vec::new();
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                values.push(frame.depth().get(x, y).unwrap());
            }
        }
        values
    }

    #[test]
    fn test_line_example() {
        let mut f = frame(10, 10);
        let written = rasterize_line(
            &mut f,
            DVec3::new(0.0, 0.0, 0.5),
            DVec3::new(4.0, 2.0, 0.9),
            &Color::RED,
        )
        .unwrap();

        assert_eq!(written, 5);
        let pixels = painted(&f);
        assert_eq!(pixels.len(), 5);

        for x in 0..5u32 {
            let y = (0.5 * x as f64).round() as u32;
            let z = f.depth().get(x, y).unwrap();
            assert!((z - (0.5 + 0.1 * x as f64)).abs() < 1e-9, "x={x} z={z}");
            assert_eq!(f.color().get(x, y).unwrap(), Color::RED);
        }
    }

    #[test]
    fn test_line_symmetry() {
        let cases = [
            (DVec3::new(1.0, 2.0, 0.3), DVec3::new(8.0, 5.0, 0.7)),
            (DVec3::new(2.0, 9.0, 0.1), DVec3::new(4.0, 0.0, 0.9)),
            (DVec3::new(0.3, 0.6, 0.2), DVec3::new(7.7, 7.4, 0.4)),
            (DVec3::new(5.0, 5.0, 0.5), DVec3::new(5.0, 5.0, 0.2)),
        ];

        for (a, b) in cases {
            let mut forward = frame(10, 10);
            let mut backward = frame(10, 10);
            rasterize_line(&mut forward, a, b, &Color::WHITE).unwrap();
            rasterize_line(&mut backward, b, a, &Color::WHITE).unwrap();

            assert_eq!(painted(&forward), painted(&backward));
            assert_eq!(depths(&forward), depths(&backward));
        }
    }

    #[test]
    fn test_steep_line_walks_y() {
        let mut f = frame(10, 10);
        let written = rasterize_line(
            &mut f,
            DVec3::new(2.0, 0.0, 0.5),
            DVec3::new(3.0, 6.0, 0.5),
            &Color::WHITE,
        )
        .unwrap();

        // One pixel per row, no gaps
        assert_eq!(written, 7);
        let rows: Vec<u32> = painted(&f).iter().map(|&(_, y)| y).collect();
        assert_eq!(rows, vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_degenerate_line_is_a_point() {
        let mut f = frame(4, 4);
        let written = rasterize_line(
            &mut f,
            DVec3::new(2.0, 1.0, 0.8),
            DVec3::new(2.0, 1.0, 0.4),
            &Color::GREEN,
        )
        .unwrap();

        assert_eq!(written, 1);
        assert_eq!(painted(&f), vec![(2, 1)]);
        assert_eq!(f.depth().get(2, 1).unwrap(), 0.4);
    }

    #[test]
    fn test_line_skips_offscreen_pixels() {
        let mut f = frame(5, 5);
        let written = rasterize_line(
            &mut f,
            DVec3::new(-3.0, 2.0, 0.5),
            DVec3::new(8.0, 2.0, 0.5),
            &Color::WHITE,
        )
        .unwrap();

        assert_eq!(written, 5);
        assert_eq!(painted(&f), vec![(0, 2), (1, 2), (2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn test_filled_triangle_example() {
        let mut f = frame(10, 10);
        rasterize_triangle(
            &mut f,
            [
                DVec3::new(0.0, 0.0, 0.1),
                DVec3::new(4.0, 0.0, 0.1),
                DVec3::new(0.0, 4.0, 0.1),
            ],
            &Color::RED,
        )
        .unwrap();

        for y in 0..10 {
            for x in 0..10 {
                let inside = x + y <= 4;
                let color = f.color().get(x, y).unwrap();
                if inside {
                    assert_eq!(color, Color::RED, "({x}, {y}) should be filled");
                    assert!((f.depth().get(x, y).unwrap() - 0.1).abs() < 1e-12);
                } else {
                    assert_eq!(color, Color::BLACK, "({x}, {y}) should be empty");
                }
            }
        }
    }

    #[test]
    fn test_wide_triangle_has_no_holes() {
        let mut f = frame(20, 10);
        rasterize_triangle(
            &mut f,
            [
                DVec3::new(0.0, 2.0, 0.5),
                DVec3::new(19.0, 0.0, 0.5),
                DVec3::new(12.0, 9.0, 0.5),
            ],
            &Color::WHITE,
        )
        .unwrap();

        // Every column between the extreme x coordinates has a contiguous run
        for x in 0..20 {
            let rows: Vec<u32> = (0..10)
                .filter(|&y| f.depth().get(x, y).unwrap() < 1.0)
                .collect();
            assert!(!rows.is_empty(), "column {x} is empty");
            assert!(rows.windows(2).all(|w| w[1] == w[0] + 1), "column {x} has a gap");
        }
    }

    #[test]
    fn test_triangle_depth_interpolates() {
        let mut f = frame(10, 10);
        rasterize_triangle(
            &mut f,
            [
                DVec3::new(0.0, 0.0, 0.2),
                DVec3::new(8.0, 0.0, 0.2),
                DVec3::new(0.0, 8.0, 0.6),
            ],
            &Color::WHITE,
        )
        .unwrap();

        let top = f.depth().get(2, 0).unwrap();
        let lower = f.depth().get(2, 4).unwrap();
        assert!((top - 0.2).abs() < 1e-9);
        assert!(lower > top && lower < 0.6);
    }

    #[test]
    fn test_nearer_triangle_occludes_in_any_order() {
        let near = [
            DVec3::new(0.0, 0.0, 0.2),
            DVec3::new(6.0, 0.0, 0.2),
            DVec3::new(0.0, 6.0, 0.2),
        ];
        let far = [
            DVec3::new(0.0, 0.0, 0.6),
            DVec3::new(9.0, 0.0, 0.6),
            DVec3::new(0.0, 9.0, 0.6),
        ];

        for near_first in [true, false] {
            let mut f = frame(10, 10);
            if near_first {
                rasterize_triangle(&mut f, near, &Color::RED).unwrap();
                rasterize_triangle(&mut f, far, &Color::BLUE).unwrap();
            } else {
                rasterize_triangle(&mut f, far, &Color::BLUE).unwrap();
                rasterize_triangle(&mut f, near, &Color::RED).unwrap();
            }
            assert_eq!(f.color().get(1, 1).unwrap(), Color::RED);
            assert_eq!(f.color().get(7, 1).unwrap(), Color::BLUE);
        }
    }

    #[test]
    fn test_degenerate_triangles() {
        let mut f = frame(10, 10);
        let p = DVec3::new(3.0, 3.0, 0.5);
        assert_eq!(rasterize_triangle(&mut f, [p, p, p], &Color::WHITE).unwrap(), 1);

        let mut f = frame(10, 10);
        rasterize_triangle(
            &mut f,
            [
                DVec3::new(0.0, 5.0, 0.5),
                DVec3::new(2.0, 5.0, 0.5),
                DVec3::new(6.0, 5.0, 0.5),
            ],
            &Color::WHITE,
        )
        .unwrap();
        assert_eq!(painted(&f).len(), 7);
    }

    #[test]
    fn test_wireframe_leaves_interior_empty() {
        let mut f = frame(10, 10);
        let points = [
            DVec3::new(0.0, 0.0, 0.5),
            DVec3::new(8.0, 0.0, 0.5),
            DVec3::new(0.0, 8.0, 0.5),
        ];
        rasterize_primitive(
            &mut f,
            RenderMode::Wireframe,
            PrimitiveKind::Triangle,
            &points,
            &Color::WHITE,
        )
        .unwrap();

        assert_eq!(f.color().get(0, 4).unwrap(), Color::WHITE);
        assert_eq!(f.color().get(4, 0).unwrap(), Color::WHITE);
        assert_eq!(f.color().get(4, 4).unwrap(), Color::WHITE);
        assert_eq!(f.color().get(2, 2).unwrap(), Color::BLACK);
    }

    #[test]
    fn test_patch_produces_no_fragments() {
        let mut f = frame(4, 4);
        let points = [DVec3::new(1.0, 1.0, 0.5); 4];
        let written = rasterize_primitive(
            &mut f,
            RenderMode::Filled,
            PrimitiveKind::BicubicPatch,
            &points,
            &Color::WHITE,
        )
        .unwrap();
        assert_eq!(written, 0);
    }

    #[test]
    fn test_pattern_fill_uses_pixel_coordinates() {
        let mut f = frame(4, 1);
        let fill = Fill::checkerboard(Color::RED, Color::GREEN, 1);
        rasterize_line(
            &mut f,
            DVec3::new(0.0, 0.0, 0.5),
            DVec3::new(3.0, 0.0, 0.5),
            &fill,
        )
        .unwrap();

        assert_eq!(f.color().get(0, 0).unwrap(), Color::RED);
        assert_eq!(f.color().get(1, 0).unwrap(), Color::GREEN);
        assert_eq!(f.color().get(2, 0).unwrap(), Color::RED);
    }
}
