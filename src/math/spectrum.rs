// Copyright 2020 @TwoCookingMice

use std::ops::{Add, AddAssign, Div, Index, Mul, Sub};

use super::constants::{Float, Vector3f};

/// Three band spectrum used for every reflectance quantity in the crate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0f32, 0.0f32, 0.0f32) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn from_rgb(rgb: &Vector3f) -> Self {
        Self { rgb: *rgb }
    }

    pub fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    pub fn to_rgb(&self) -> Vector3f {
        self.rgb
    }

    pub fn is_black(&self) -> bool {
        for idx in 0..3 {
            if self.rgb[idx] != 0.0f32 {
                return false;
            }
        }

        true
    }

    pub fn is_finite(&self) -> bool {
        self.rgb.iter().all(|v| v.is_finite())
    }

    pub fn max_component(&self) -> Float {
        self.rgb.x.max(self.rgb.y).max(self.rgb.z)
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, idx: usize) -> &Float {
        &self.rgb[idx]
    }
}

impl Add for RGBSpectrum {
    type Output = RGBSpectrum;

    fn add(self, rhs: RGBSpectrum) -> RGBSpectrum {
        Self { rgb: self.rgb + rhs.rgb }
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: RGBSpectrum) {
        self.rgb += rhs.rgb;
    }
}

impl Add<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    fn add(self, rhs: Float) -> RGBSpectrum {
        Self { rgb: self.rgb.add_scalar(rhs) }
    }
}

impl Sub for RGBSpectrum {
    type Output = RGBSpectrum;

    fn sub(self, rhs: RGBSpectrum) -> RGBSpectrum {
        Self { rgb: self.rgb - rhs.rgb }
    }
}

impl Sub<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    fn sub(self, rhs: Float) -> RGBSpectrum {
        Self { rgb: self.rgb.add_scalar(-rhs) }
    }
}

impl Mul for RGBSpectrum {
    type Output = RGBSpectrum;

    fn mul(self, rhs: RGBSpectrum) -> RGBSpectrum {
        Self { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    fn mul(self, rhs: Float) -> RGBSpectrum {
        Self { rgb: self.rgb * rhs }
    }
}

impl Div for RGBSpectrum {
    type Output = RGBSpectrum;

    fn div(self, rhs: RGBSpectrum) -> RGBSpectrum {
        Self { rgb: self.rgb.component_div(&rhs.rgb) }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    fn div(self, rhs: Float) -> RGBSpectrum {
        Self { rgb: self.rgb / rhs }
    }
}
