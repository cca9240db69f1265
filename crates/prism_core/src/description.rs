//! Scene description decoding.
//!
//! Hosts load scene files however they like; this module turns the JSON
//! description format into a populated [`Scene`] plus its
//! [`ProjectionParams`]. Type tags (part type, fill type, transformation
//! type) are serde-tagged enums, so an unknown tag is a decode error.
//!
//! Vertices are declared inline on each primitive. Within one solid, every
//! declaration of a given vertex name refers to the same vertex, which is how
//! a description shares vertices between primitives.

use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use prism_math::DVec3;
use serde::Deserialize;
use thiserror::Error;

use crate::camera::Camera;
use crate::fill::{Color, Fill};
use crate::part::Part;
use crate::primitive::{Primitive, PrimitiveKind};
use crate::projection::ProjectionParams;
use crate::scene::{Scene, SceneError};
use crate::solid::Solid;
use crate::transformation::Transformation;
use crate::vertex::VertexId;

/// Errors that can occur while decoding a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Primitive '{primitive}' in a {kind} part has {found} vertices, expected {expected}")]
    VertexCount {
        primitive: String,
        kind: PrimitiveKind,
        expected: usize,
        found: usize,
    },

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Result type for description decoding.
pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// Top-level scene description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub name: String,
    pub camera: CameraDescription,
    pub projection: ProjectionDescription,
    #[serde(default)]
    pub solids: Vec<SolidDescription>,
    #[serde(default)]
    pub show_axis: bool,
}

/// Camera position and orientation (degrees).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CameraDescription {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub azimuth: f64,
    #[serde(default)]
    pub zenith: f64,
}

/// Projection and viewport parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionDescription {
    pub z_near: f64,
    pub z_far: f64,
    pub width: u32,
    pub height: u32,
    pub fov: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolidDescription {
    pub name: String,
    #[serde(default)]
    pub parts: Vec<PartDescription>,
    #[serde(default)]
    pub transformations: Vec<TransformationDescription>,
}

/// Part type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartType {
    Triangle,
    Line,
    Patch,
}

impl From<PartType> for PrimitiveKind {
    fn from(value: PartType) -> Self {
        match value {
            PartType::Triangle => PrimitiveKind::Triangle,
            PartType::Line => PrimitiveKind::Line,
            PartType::Patch => PrimitiveKind::BicubicPatch,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartDescription {
    #[serde(rename = "type")]
    pub part_type: PartType,
    pub name: String,
    #[serde(default)]
    pub primitives: Vec<PrimitiveDescription>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimitiveDescription {
    pub name: String,
    pub vertices: Vec<VertexDescription>,
    #[serde(default)]
    pub fill: FillDescription,
    /// Tessellation precision, only meaningful for patches.
    #[serde(default)]
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VertexDescription {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Fill tag plus its parameters. Colors are packed `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FillDescription {
    Solid {
        #[serde(rename = "colorValue")]
        color_value: u32,
    },
    Checkerboard {
        #[serde(rename = "colorValue")]
        color_value: u32,
        #[serde(rename = "alternateColor")]
        alternate_color: u32,
        #[serde(rename = "cellSize", default = "default_cell_size")]
        cell_size: u32,
    },
}

impl Default for FillDescription {
    fn default() -> Self {
        FillDescription::Solid {
            color_value: Color::WHITE.to_rgb(),
        }
    }
}

impl From<FillDescription> for Fill {
    fn from(value: FillDescription) -> Self {
        match value {
            FillDescription::Solid { color_value } => Fill::solid(Color::from_rgb(color_value)),
            FillDescription::Checkerboard {
                color_value,
                alternate_color,
                cell_size,
            } => Fill::checkerboard(
                Color::from_rgb(color_value),
                Color::from_rgb(alternate_color),
                cell_size,
            ),
        }
    }
}

fn default_cell_size() -> u32 {
    8
}

fn default_scale() -> f64 {
    1.0
}

/// Transformation tag plus its parameters. Rotation angles are degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransformationDescription {
    Translation {
        name: String,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        dz: f64,
    },
    Rotation {
        name: String,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        #[serde(default)]
        z: f64,
    },
    Scale {
        name: String,
        #[serde(default = "default_scale")]
        sx: f64,
        #[serde(default = "default_scale")]
        sy: f64,
        #[serde(default = "default_scale")]
        sz: f64,
    },
}

impl From<TransformationDescription> for Transformation {
    fn from(value: TransformationDescription) -> Self {
        match value {
            TransformationDescription::Translation { name, dx, dy, dz } => {
                Transformation::translation(name, DVec3::new(dx, dy, dz))
            }
            TransformationDescription::Rotation { name, x, y, z } => {
                Transformation::rotation(name, DVec3::new(x, y, z))
            }
            TransformationDescription::Scale { name, sx, sy, sz } => {
                Transformation::scale(name, DVec3::new(sx, sy, sz))
            }
        }
    }
}

/// A decoded scene together with its projection.
#[derive(Debug, Clone)]
pub struct DescribedScene {
    pub scene: Scene,
    pub projection: ProjectionParams,
}

impl SceneDescription {
    /// Decode a description from a JSON string.
    pub fn from_json(json: &str) -> DescriptionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a description from a reader.
    pub fn from_reader<R: Read>(reader: R) -> DescriptionResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build the scene graph.
    pub fn into_scene(self) -> DescriptionResult<DescribedScene> {
        let p = self.projection;
        let projection = ProjectionParams::new(p.z_near, p.z_far, p.fov, p.width, p.height)?;

        let c = self.camera;
        let camera = Camera::new(DVec3::new(c.x, c.y, c.z), c.azimuth, c.zenith);
        let mut scene = Scene::new(self.name, camera);

        for solid_desc in self.solids {
            let solid = build_solid(&mut scene, solid_desc)?;
            scene.add_solid(solid)?;
        }

        if self.show_axis {
            scene.show_axis();
        }

        log::info!(
            "Decoded scene '{}': {} solids, {} vertices, {} primitives",
            scene.name,
            scene.solids().len(),
            scene.vertices().len(),
            scene.primitive_count()
        );

        Ok(DescribedScene { scene, projection })
    }
}

fn build_solid(scene: &mut Scene, desc: SolidDescription) -> DescriptionResult<Solid> {
    let mut solid = Solid::new(desc.name);
    let mut by_name: HashMap<String, VertexId> = HashMap::new();

    for part_desc in desc.parts {
        let kind = PrimitiveKind::from(part_desc.part_type);
        let mut part = Part::new(part_desc.name, kind);

        for prim_desc in part_desc.primitives {
            if prim_desc.vertices.len() != kind.arity() {
                return Err(DescriptionError::VertexCount {
                    primitive: prim_desc.name,
                    kind,
                    expected: kind.arity(),
                    found: prim_desc.vertices.len(),
                });
            }

            let ids: Vec<VertexId> = prim_desc
                .vertices
                .iter()
                .map(|v| resolve_vertex(scene, &mut by_name, v))
                .collect();
            let fill = Arc::new(Fill::from(prim_desc.fill));
            let name = prim_desc.name;

            let primitive = match kind {
                PrimitiveKind::Triangle => Primitive::triangle(name, [ids[0], ids[1], ids[2]], fill),
                PrimitiveKind::Line => Primitive::line(name, [ids[0], ids[1]], fill),
                PrimitiveKind::BicubicPatch => Primitive::bicubic_patch(
                    name,
                    [ids[0], ids[1], ids[2], ids[3]],
                    prim_desc.precision.unwrap_or(1),
                    fill,
                ),
            };
            part.push(primitive)?;
        }

        solid.add_part(part);
    }

    for transformation in desc.transformations {
        solid.add_transformation(transformation.into());
    }

    Ok(solid)
}

fn resolve_vertex(
    scene: &mut Scene,
    by_name: &mut HashMap<String, VertexId>,
    desc: &VertexDescription,
) -> VertexId {
    let position = DVec3::new(desc.x, desc.y, desc.z);
    if let Some(&id) = by_name.get(&desc.name) {
        let known = scene.vertices().get(id).map(|v| v.position.truncate());
        if known != Some(position) {
            log::warn!(
                "Vertex '{}' redeclared at {:?}; keeping the first declaration",
                desc.name,
                position
            );
        }
        return id;
    }

    let id = scene.add_vertex(desc.name.clone(), position);
    by_name.insert(desc.name.clone(), id);
    id
}
