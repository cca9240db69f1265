//! Prism Core - Scene graph for the software rasterizer.
//!
//! This crate provides:
//!
//! - **Scene graph types**: `Scene`, `Solid`, `Part`, `Primitive`, `Vertex`
//! - **Viewing parameters**: `Camera`, `ProjectionParams`
//! - **Buffer builder**: flattening a scene into vertex/index/part buffers
//! - **Scene descriptions**: decoding the JSON scene format into a `Scene`
//!
//! # Example
//!
//! ```ignore
//! use prism_core::SceneDescription;
//!
//! let described = SceneDescription::from_json(&json)?.into_scene()?;
//! let mut scene = described.scene;
//! let buffers = scene.regenerate_buffers()?;
//! println!("{} unique vertices, {} parts",
//!     buffers.vertex_count(),
//!     buffers.parts().len());
//! ```

pub mod axis;
pub mod buffers;
pub mod camera;
pub mod description;
pub mod fill;
pub mod part;
pub mod primitive;
pub mod projection;
pub mod scene;
pub mod solid;
pub mod transformation;
pub mod vertex;

// Re-export commonly used types
pub use axis::axis_indicator;
pub use buffers::{BufferError, BufferResult, PartRecord, Placement, SceneBuffers};
pub use camera::Camera;
pub use description::{DescribedScene, DescriptionError, DescriptionResult, SceneDescription};
pub use fill::{Checkerboard, Color, Fill, PixelProvider};
pub use part::Part;
pub use primitive::{Primitive, PrimitiveKind, Shape};
pub use projection::ProjectionParams;
pub use scene::{Scene, SceneError, SceneResult};
pub use solid::Solid;
pub use transformation::{TransformKind, Transformation};
pub use vertex::{Vertex, VertexArena, VertexId};
