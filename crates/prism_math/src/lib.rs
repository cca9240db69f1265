// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod interval;
mod transform;

pub use interval::Interval;
pub use transform::{
    look_to, perspective, rotation_xyz, scaling, translation, HomogeneousExt,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dvec4_creation() {
        let v = DVec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
        assert_eq!(v.w, 1.0);
    }

    #[test]
    fn test_dmat4_vector_product() {
        let m = DMat4::from_translation(DVec3::new(1.0, 0.0, 0.0));
        let p = m * DVec4::new(1.0, 2.0, 3.0, 1.0);
        assert_eq!(p, DVec4::new(2.0, 2.0, 3.0, 1.0));
    }
}
