// Copyright @yucwang 2026

use crate::core::texture::Texture;
use crate::math::constants::Vector2f;
use crate::math::spectrum::RGBSpectrum;

/// Uniform reflectance; the scene loader builds these from
/// `<texture type="constant">` declarations.
#[derive(Clone, Copy, Debug)]
pub struct ConstantTexture {
    value: RGBSpectrum,
}

impl ConstantTexture {
    pub fn new(value: RGBSpectrum) -> Self {
        Self { value }
    }

    pub fn value(&self) -> RGBSpectrum {
        self.value
    }
}

impl Texture for ConstantTexture {
    fn eval(&self, _uv: Vector2f) -> RGBSpectrum {
        self.value
    }

    fn describe(&self) -> String {
        format!("ConstantTexture({}, {}, {})", self.value[0], self.value[1], self.value[2])
    }
}
