use glam::{Mat3, Vec3};

use crate::options::CoordinateSystem;

/// Converts vectors from the file's axis convention into a target one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    system: CoordinateSystem,
    matrix: Mat3,
}

impl CoordinateMapper {
    pub fn new(system: CoordinateSystem) -> Self {
        let matrix = match system {
            CoordinateSystem::Native => Mat3::IDENTITY,
            // (x, y, z) -> (-y, z, -x)
            CoordinateSystem::OpenGl => Mat3::from_cols(Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            // (x, y, z) -> (-y, z, x)
            CoordinateSystem::DirectX => Mat3::from_cols(Vec3::Z, Vec3::NEG_X, Vec3::Y),
        };
        Self { system, matrix }
    }

    pub fn system(&self) -> CoordinateSystem {
        self.system
    }

    /// Map a position or direction.
    pub fn position(&self, v: Vec3) -> Vec3 {
        self.matrix * v
    }

    /// Map a per-axis scale. Scales carry no sign, so only the axes move.
    pub fn scale(&self, v: Vec3) -> Vec3 {
        match self.system {
            CoordinateSystem::Native => v,
            CoordinateSystem::OpenGl | CoordinateSystem::DirectX => Vec3::new(v.x, v.z, v.y),
        }
    }

    /// Map an axis-aligned box given by its corners.
    ///
    /// Negated axes swap the corners, so the result is re-sorted per axis.
    pub fn bounds(&self, min: Vec3, max: Vec3) -> (Vec3, Vec3) {
        if self.system == CoordinateSystem::Native {
            return (min, max);
        }
        let a = self.position(min);
        let b = self.position(max);
        (a.min(b), a.max(b))
    }

    /// Whether triangles must have their winding reversed.
    pub fn flips_winding(&self) -> bool {
        self.system == CoordinateSystem::OpenGl
    }

    /// Reorder triangle corners for the target convention.
    pub fn winding(&self, [a, b, c]: [u16; 3]) -> [u16; 3] {
        if self.flips_winding() {
            [a, c, b]
        } else {
            [a, b, c]
        }
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self::new(CoordinateSystem::Native)
    }
}
