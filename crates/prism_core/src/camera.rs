use prism_math::{look_to, DMat4, DVec3};

/// Viewer position and orientation.
///
/// Orientation is an azimuth (rotation about +Z, measured from +X) and a
/// zenith (elevation above the XY plane), both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: DVec3,
    pub azimuth: f64,
    pub zenith: f64,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: DVec3, azimuth: f64, zenith: f64) -> Self {
        Self {
            position,
            azimuth,
            zenith,
        }
    }

    /// Unit viewing direction.
    pub fn forward(&self) -> DVec3 {
        direction(self.azimuth, self.zenith)
    }

    /// Unit up vector: the viewing direction tilted a further 90° in zenith.
    pub fn up(&self) -> DVec3 {
        direction(self.azimuth, self.zenith + 90.0)
    }

    /// Get the view matrix (world → camera space)
    pub fn view_matrix(&self) -> DMat4 {
        look_to(self.position, self.forward(), self.up())
    }

    /// Rotate the view by angle deltas in degrees.
    pub fn turn(&mut self, delta_azimuth: f64, delta_zenith: f64) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(360.0);
        self.zenith += delta_zenith;
    }

    /// Move along the viewing direction.
    pub fn advance(&mut self, distance: f64) {
        self.position += self.forward() * distance;
    }
}

impl Default for Camera {
    fn default() -> Self {
        // Ten units back along -X, looking at the origin.
        Self::new(DVec3::new(-10.0, 0.0, 0.0), 0.0, 0.0)
    }
}

fn direction(azimuth: f64, zenith: f64) -> DVec3 {
    let (az, zen) = (azimuth.to_radians(), zenith.to_radians());
    DVec3::new(az.cos() * zen.cos(), az.sin() * zen.cos(), zen.sin())
}
