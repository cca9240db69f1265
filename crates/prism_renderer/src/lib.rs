//! Prism Renderer - software rasterization pipeline.
//!
//! Turns a `prism_core::Scene` into a color raster:
//!
//! 1. flatten the scene graph into vertex/index/part buffers
//! 2. model and view transforms ([`transform`])
//! 3. perspective projection and all-or-nothing clipping ([`clip`])
//! 4. perspective divide and viewport mapping ([`viewport`])
//! 5. z-buffered line and triangle rasterization ([`raster`])
//!
//! [`Renderer`] runs the stages in order for each frame.

pub mod clip;
pub mod depth;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod raster;
pub mod renderer;
pub mod transform;
pub mod viewport;

pub use clip::{clip_primitives, is_inside_clip_volume, project};
pub use depth::{DepthBuffer, DEFAULT_FAR_DEPTH};
pub use display::{Display, ImageDisplay};
pub use error::{RenderError, RenderResult};
pub use framebuffer::{ColorBuffer, FrameBuffer};
pub use raster::{rasterize_line, rasterize_outline, rasterize_primitive, rasterize_triangle, RenderMode};
pub use renderer::{FrameStats, RenderConfig, Renderer};
pub use transform::{model_stage, transform_stage, view_stage};
pub use viewport::{to_screen, viewport_map};

/// Re-export the scene types hosts need alongside the renderer
pub use prism_core::{Color, ProjectionParams, Scene, SceneDescription};
