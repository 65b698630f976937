// Copyright @yucwang 2023

use crate::math::constants::{ Vector2f, Vector3f };
use crate::math::frame::Frame;

/// Which quantity a path carries when a BSDF is evaluated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransportDirection {
    // Importance, traced from the light towards the sensor.
    LightToEye,
    // Radiance, traced from the sensor towards the light.
    EyeToLight,
}

/// Local geometry at a surface point, as handed to a BSDF by the integrator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceGeometry {
    sh_frame: Frame,
    geo_normal: Vector3f,
    uv: Vector2f,
}

impl SurfaceGeometry {
    pub fn new(new_sh_frame: Frame, new_geo_normal: Vector3f, new_uv: Vector2f) -> Self {
        Self { sh_frame: new_sh_frame, geo_normal: new_geo_normal, uv: new_uv }
    }

    /// Geometry whose shading normal coincides with the geometric normal.
    pub fn from_normal(n: &Vector3f, uv: Vector2f) -> Self {
        Self::new(Frame::from_normal(n), *n, uv)
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_local(v)
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        self.sh_frame.to_world(v)
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self::new(Frame::default(), Vector3f::new(0.0, 0.0, 1.0), Vector2f::new(0.0, 0.0))
    }
}
