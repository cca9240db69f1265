//! Frame orchestration.
//!
//! [`Renderer`] owns the scene, the projection and the output surfaces, and
//! runs the pipeline stages in order each time a frame is requested.

use std::time::Instant;

use prism_core::{
    axis_indicator, BufferError, Camera, Color, DescribedScene, PrimitiveKind, ProjectionParams,
    Scene,
};
use prism_math::DVec3;
use serde::Deserialize;

use crate::{
    clip_primitives, project, rasterize_primitive, to_screen, transform_stage, ColorBuffer,
    DepthBuffer, Display, FrameBuffer, RenderError, RenderMode, RenderResult, DEFAULT_FAR_DEPTH,
};

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Filled triangles or wireframe edges
    pub mode: RenderMode,
    /// Color the frame is cleared to
    pub background: Color,
    /// Depth the z-buffer is cleared to
    pub far_depth: f64,
    /// Length of each axis-indicator line in world units
    pub axis_length: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Filled,
            background: Color::BLACK,
            far_depth: DEFAULT_FAR_DEPTH,
            axis_length: 1.0,
        }
    }
}

/// Counters from the last rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Distinct vertices in the buffers
    pub vertices: usize,
    /// Primitives before clipping
    pub primitives: usize,
    /// Primitives removed by the clip test
    pub clipped: usize,
    /// Surviving patches, which are not rasterized
    pub patches_skipped: usize,
    /// Fragments that passed the depth test
    pub fragments: usize,
}

impl FrameStats {
    /// Primitives that survived clipping.
    pub fn visible(&self) -> usize {
        self.primitives - self.clipped
    }
}

/// Software renderer for one scene.
#[derive(Debug)]
pub struct Renderer {
    scene: Scene,
    projection: ProjectionParams,
    config: RenderConfig,
    frame: FrameBuffer,
    stats: FrameStats,
}

impl Renderer {
    /// Create a renderer, installing an axis indicator on the scene if it
    /// has none. The indicator stays hidden until [`Renderer::show_axis`]
    /// unless the scene already asked for it.
    pub fn new(
        mut scene: Scene,
        projection: ProjectionParams,
        config: RenderConfig,
    ) -> RenderResult<Self> {
        if scene.axis().is_none() {
            let axis = axis_indicator(scene.vertices_mut(), config.axis_length)?;
            scene.set_axis(axis)?;
        }

        let frame = FrameBuffer::new(
            projection.width(),
            projection.height(),
            config.background,
            config.far_depth,
        );

        log::info!(
            "Renderer for '{}': {}x{}, {:?} mode",
            scene.name,
            projection.width(),
            projection.height(),
            config.mode
        );

        Ok(Self {
            scene,
            projection,
            config,
            frame,
            stats: FrameStats::default(),
        })
    }

    /// Create a renderer for a decoded scene description.
    pub fn from_description(described: DescribedScene, config: RenderConfig) -> RenderResult<Self> {
        Self::new(described.scene, described.projection, config)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access; edits take effect on the next frame.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The camera, for input handlers that move it between frames.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.scene.camera
    }

    pub fn projection(&self) -> &ProjectionParams {
        &self.projection
    }

    /// Replace the projection. The output surfaces are reallocated when the
    /// viewport size changes.
    pub fn set_projection(&mut self, projection: ProjectionParams) {
        if projection.width() != self.frame.width() || projection.height() != self.frame.height() {
            log::debug!(
                "Resizing frame {}x{} -> {}x{}",
                self.frame.width(),
                self.frame.height(),
                projection.width(),
                projection.height()
            );
            self.frame = FrameBuffer::new(
                projection.width(),
                projection.height(),
                self.config.background,
                self.config.far_depth,
            );
        }
        self.projection = projection;
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_mode(&mut self, mode: RenderMode) {
        self.config.mode = mode;
    }

    /// Include the axis indicator from the next frame on.
    pub fn show_axis(&mut self) {
        self.scene.show_axis();
    }

    /// Leave the axis indicator out from the next frame on.
    pub fn hide_axis(&mut self) {
        self.scene.hide_axis();
    }

    pub fn frame(&self) -> &ColorBuffer {
        self.frame.color()
    }

    pub fn depth(&self) -> &DepthBuffer {
        self.frame.depth()
    }

    /// Counters from the last call to [`Renderer::render_frame`].
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Render one frame and return the color buffer.
    ///
    /// Any error aborts the frame; the surfaces may then hold a partial image.
    pub fn render_frame(&mut self) -> RenderResult<&ColorBuffer> {
        let start = Instant::now();

        let mut buffers = self.scene.regenerate_buffers()?.clone();
        let mut stats = FrameStats {
            vertices: buffers.vertex_count(),
            primitives: buffers.primitive_count(),
            ..FrameStats::default()
        };

        let eye = transform_stage(&self.scene, &buffers)?;
        let clip = project(&eye, &self.projection.matrix());
        stats.clipped = clip_primitives(&mut buffers, &clip);
        buffers.validate()?;

        let screen = to_screen(&clip, self.frame.width(), self.frame.height());
        self.frame.clear();

        let mut points: Vec<DVec3> = Vec::with_capacity(PrimitiveKind::BicubicPatch.arity());
        for (p, record) in buffers.parts().iter().enumerate() {
            let source_part = self
                .scene
                .renderable_solid(record.solid)
                .and_then(|solid| solid.parts.get(record.part));

            for (k, &source) in record.primitives().iter().enumerate() {
                let primitive = source_part
                    .and_then(|part| part.primitives().get(source))
                    .ok_or_else(|| {
                        RenderError::StaleBuffers(format!(
                            "part {p} has no source primitive {source}"
                        ))
                    })?;

                if record.kind == PrimitiveKind::BicubicPatch {
                    stats.patches_skipped += 1;
                    continue;
                }

                points.clear();
                for &placement in buffers.primitive_placements(p, k) {
                    let point = screen.get(placement).copied().ok_or(BufferError::DanglingIndex {
                        index: placement,
                        len: screen.len(),
                    })?;
                    points.push(point);
                }

                stats.fragments += rasterize_primitive(
                    &mut self.frame,
                    self.config.mode,
                    record.kind,
                    &points,
                    &*primitive.fill,
                )?;
            }
        }

        if stats.patches_skipped > 0 {
            log::warn!(
                "Skipped {} bicubic patches: no surface evaluator",
                stats.patches_skipped
            );
        }
        log::debug!(
            "Frame done in {:.2?}: {} vertices, {}/{} primitives visible, {} fragments",
            start.elapsed(),
            stats.vertices,
            stats.visible(),
            stats.primitives,
            stats.fragments
        );

        self.stats = stats;
        Ok(self.frame.color())
    }

    /// Render one frame and hand it to `display`.
    pub fn render_to(&mut self, display: &mut dyn Display) -> RenderResult<()> {
        self.render_frame()?;
        display.present(self.frame.color())
    }
}
