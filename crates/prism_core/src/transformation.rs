//! Model transformations attached to solids.

use prism_math::{rotation_xyz, scaling, translation, DMat4, DVec3};

/// A single affine operation. Rotation angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformKind {
    Translation(DVec3),
    /// Per-axis angles, applied X then Y then Z.
    Rotation(DVec3),
    Scale(DVec3),
}

/// A named transformation step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    pub name: String,
    pub kind: TransformKind,
}

impl Transformation {
    pub fn translation(name: impl Into<String>, delta: DVec3) -> Self {
        Self {
            name: name.into(),
            kind: TransformKind::Translation(delta),
        }
    }

    /// Rotation from X/Y/Z angles in degrees.
    pub fn rotation(name: impl Into<String>, degrees: DVec3) -> Self {
        Self {
            name: name.into(),
            kind: TransformKind::Rotation(degrees),
        }
    }

    pub fn scale(name: impl Into<String>, factors: DVec3) -> Self {
        Self {
            name: name.into(),
            kind: TransformKind::Scale(factors),
        }
    }

    /// The 4x4 matrix of this step.
    pub fn matrix(&self) -> DMat4 {
        match self.kind {
            TransformKind::Translation(delta) => translation(delta),
            TransformKind::Rotation(degrees) => rotation_xyz(DVec3::new(
                degrees.x.to_radians(),
                degrees.y.to_radians(),
                degrees.z.to_radians(),
            )),
            TransformKind::Scale(factors) => scaling(factors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_matrix() {
        let t = Transformation::translation("move", DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(
            t.matrix().transform_point3(DVec3::ZERO),
            DVec3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_rotation_uses_degrees() {
        let t = Transformation::rotation("spin", DVec3::new(0.0, 0.0, 90.0));
        let p = t.matrix().transform_point3(DVec3::X);
        assert!((p - DVec3::Y).length() < 1e-9);
    }

    #[test]
    fn test_scale_matrix() {
        let t = Transformation::scale("grow", DVec3::splat(2.0));
        assert_eq!(
            t.matrix().transform_point3(DVec3::ONE),
            DVec3::splat(2.0)
        );
    }
}
