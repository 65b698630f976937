// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };

/// Orthonormal shading basis. `z` is the shading normal; local directions
/// are expressed as (x, y, z) coordinates in this basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x: Vector3f,
    pub y: Vector3f,
    pub z: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            x: Vector3f::new(1.0, 0.0, 0.0),
            y: Vector3f::new(0.0, 1.0, 0.0),
            z: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    pub fn new(new_x: Vector3f, new_y: Vector3f, new_z: Vector3f) -> Frame {
        Frame {
            x: new_x,
            y: new_y,
            z: new_z
        }
    }

    /// Build a right-handed frame around a unit normal.
    pub fn from_normal(n: &Vector3f) -> Frame {
        let up = if n.z.abs() < 0.999 {
            Vector3f::new(0.0, 0.0, 1.0)
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let tangent = up.cross(n).normalize();
        let bitangent = n.cross(&tangent).normalize();
        Frame {
            x: tangent,
            y: bitangent,
            z: *n
        }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }

    pub fn cos_theta(v: &Vector3f) -> Float {
        v.z
    }
}
