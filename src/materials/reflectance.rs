// Copyright @yucwang 2026

use crate::core::assets::TextureRef;
use crate::math::constants::Vector2f;
use crate::math::spectrum::RGBSpectrum;

/// Snapshot sentinel for "no texture bound".
pub const NO_TEXTURE: i32 = -1;

/// Albedo of a material: a constant, or a texture looked up at the surface
/// uv. A bound texture wins over the constant.
#[derive(Clone, Debug, Default)]
pub struct ReflectanceSource {
    constant: RGBSpectrum,
    texture: Option<TextureRef>,
}

impl ReflectanceSource {
    pub fn constant(value: RGBSpectrum) -> Self {
        Self { constant: value, texture: None }
    }

    pub fn textured(texture: TextureRef) -> Self {
        Self { constant: RGBSpectrum::default(), texture: Some(texture) }
    }

    pub fn from_parts(constant: RGBSpectrum, texture: Option<TextureRef>) -> Self {
        Self { constant, texture }
    }

    pub fn eval(&self, uv: Vector2f) -> RGBSpectrum {
        match &self.texture {
            Some(tex) => tex.texture().eval(uv),
            None => self.constant,
        }
    }

    pub fn constant_value(&self) -> RGBSpectrum {
        self.constant
    }

    pub fn texture(&self) -> Option<&TextureRef> {
        self.texture.as_ref()
    }

    pub fn texture_index(&self) -> i32 {
        self.texture.as_ref().map_or(NO_TEXTURE, |tex| tex.index() as i32)
    }
}
