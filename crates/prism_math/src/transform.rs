// Transform-matrix constructors and homogeneous helpers.
//
// Thin wrappers over glam's double-precision matrices that pin down the
// conventions the pipeline relies on: column vectors, right-handed view
// space, and a projection that maps visible depth to [0, w].

use glam::{DMat4, DVec3, DVec4};

/// Translation by `delta`.
pub fn translation(delta: DVec3) -> DMat4 {
    DMat4::from_translation(delta)
}

/// Non-uniform scale about the origin.
pub fn scaling(factors: DVec3) -> DMat4 {
    DMat4::from_scale(factors)
}

/// Rotation from separate X/Y/Z axis angles in radians.
///
/// The X rotation is applied first, then Y, then Z. Axes with a zero angle
/// contribute the identity.
pub fn rotation_xyz(angles: DVec3) -> DMat4 {
    let mut matrix = DMat4::IDENTITY;
    if angles.x != 0.0 {
        matrix = DMat4::from_rotation_x(angles.x) * matrix;
    }
    if angles.y != 0.0 {
        matrix = DMat4::from_rotation_y(angles.y) * matrix;
    }
    if angles.z != 0.0 {
        matrix = DMat4::from_rotation_z(angles.z) * matrix;
    }
    matrix
}

/// Right-handed view matrix for an eye at `eye` looking along `forward`.
pub fn look_to(eye: DVec3, forward: DVec3, up: DVec3) -> DMat4 {
    DMat4::look_to_rh(eye, forward, up)
}

/// Right-handed perspective projection.
///
/// Points between the near and far planes end up with `0 ≤ z ≤ w` in clip
/// space (near maps to 0, far maps to `w`).
pub fn perspective(fov_y_radians: f64, aspect: f64, near: f64, far: f64) -> DMat4 {
    DMat4::perspective_rh(fov_y_radians, aspect, near, far)
}

/// Extension trait for homogeneous points.
pub trait HomogeneousExt {
    /// Scale x, y and z by `1/w`, leaving `w = 1`.
    ///
    /// A point with `w == 0` has no finite image and is returned unchanged;
    /// the clip stage never lets such a point through.
    fn perspective_divide(self) -> DVec4;

    /// Drop the w component.
    fn dehomogenize(self) -> DVec3;
}

impl HomogeneousExt for DVec4 {
    fn perspective_divide(self) -> DVec4 {
        if self.w == 0.0 {
            return self;
        }
        let inv_w = 1.0 / self.w;
        DVec4::new(self.x * inv_w, self.y * inv_w, self.z * inv_w, 1.0)
    }

    fn dehomogenize(self) -> DVec3 {
        self.truncate()
    }
}
