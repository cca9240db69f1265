//! Axis indicator solid.

use std::sync::Arc;

use prism_math::DVec3;

use crate::fill::{Color, Fill};
use crate::part::Part;
use crate::primitive::{Primitive, PrimitiveKind};
use crate::scene::SceneResult;
use crate::solid::Solid;
use crate::vertex::VertexArena;

/// Build a solid with three lines from the origin along +X (red), +Y (green)
/// and +Z (blue), each `length` units long. Vertices are added to `arena`.
pub fn axis_indicator(arena: &mut VertexArena, length: f64) -> SceneResult<Solid> {
    let origin = arena.add("axis.origin", DVec3::ZERO);
    let axes = [
        ("x", DVec3::X, Color::RED),
        ("y", DVec3::Y, Color::GREEN),
        ("z", DVec3::Z, Color::BLUE),
    ];

    let mut part = Part::new("axes", PrimitiveKind::Line);
    for (name, direction, color) in axes {
        let tip = arena.add(format!("axis.{name}"), direction * length);
        let line = Primitive::line(name, [origin, tip], Arc::new(Fill::solid(color)));
        part.push(line)?;
    }

    Ok(Solid::new("axis").with_part(part))
}
