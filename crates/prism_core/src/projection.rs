use prism_math::{perspective, DMat4};

use crate::scene::{SceneError, SceneResult};

/// Perspective projection and viewport parameters.
///
/// Constructed through [`ProjectionParams::new`], which enforces
/// `0 < near < far`, a field of view strictly between 0° and 180°, and a
/// non-empty viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    near: f64,
    far: f64,
    fov: f64,
    width: u32,
    height: u32,
}

impl ProjectionParams {
    /// Validate and create projection parameters. `fov` is the vertical
    /// field of view in degrees.
    pub fn new(near: f64, far: f64, fov: f64, width: u32, height: u32) -> SceneResult<Self> {
        if !(near > 0.0 && near < far) {
            return Err(SceneError::InvalidProjection(format!(
                "depth planes must satisfy 0 < near < far (near={near}, far={far})"
            )));
        }
        if !(fov > 0.0 && fov < 180.0) {
            return Err(SceneError::InvalidProjection(format!(
                "field of view must be in (0, 180) degrees, got {fov}"
            )));
        }
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidProjection(format!(
                "viewport must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            near,
            far,
            fov,
            width,
            height,
        })
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    /// Vertical field of view in degrees.
    pub fn fov(&self) -> f64 {
        self.fov
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Viewport aspect ratio (width / height).
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Get the projection matrix (camera → clip space)
    pub fn matrix(&self) -> DMat4 {
        perspective(self.fov.to_radians(), self.aspect(), self.near, self.far)
    }

    /// Same projection at a new viewport size (e.g., on window resize).
    pub fn with_viewport(self, width: u32, height: u32) -> SceneResult<Self> {
        Self::new(self.near, self.far, self.fov, width, height)
    }
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            near: 0.1,
            far: 100.0,
            fov: 60.0,
            width: 640,
            height: 480,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_math::DVec4;

    #[test]
    fn test_valid_params() {
        let params = ProjectionParams::new(1.0, 50.0, 90.0, 320, 160).unwrap();
        assert_eq!(params.aspect(), 2.0);
        assert_eq!(params.width(), 320);
        assert_eq!(params.height(), 160);
    }

    #[test]
    fn test_rejects_inverted_planes() {
        assert!(matches!(
            ProjectionParams::new(10.0, 1.0, 60.0, 10, 10),
            Err(SceneError::InvalidProjection(_))
        ));
        assert!(ProjectionParams::new(1.0, 1.0, 60.0, 10, 10).is_err());
        assert!(ProjectionParams::new(0.0, 1.0, 60.0, 10, 10).is_err());
    }

    #[test]
    fn test_rejects_empty_viewport() {
        assert!(ProjectionParams::new(1.0, 10.0, 60.0, 0, 10).is_err());
        assert!(ProjectionParams::new(1.0, 10.0, 60.0, 10, 0).is_err());
    }

    #[test]
    fn test_rejects_bad_fov() {
        assert!(ProjectionParams::new(1.0, 10.0, 0.0, 10, 10).is_err());
        assert!(ProjectionParams::new(1.0, 10.0, 180.0, 10, 10).is_err());
    }

    #[test]
    fn test_matrix_maps_near_plane_to_zero() {
        let params = ProjectionParams::new(2.0, 20.0, 60.0, 100, 100).unwrap();
        let clip = params.matrix() * DVec4::new(0.0, 0.0, -2.0, 1.0);
        assert!(clip.z.abs() < 1e-9);
        assert!((clip.w - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_viewport() {
        let params = ProjectionParams::default().with_viewport(10, 20).unwrap();
        assert_eq!(params.aspect(), 0.5);
        assert!(ProjectionParams::default().with_viewport(0, 20).is_err());
    }
}
