// Copyright @yucwang 2026

use std::collections::HashMap;
use std::sync::Arc;

use crate::core::texture::Texture;

/// A texture bound to a material, together with its slot in the registry.
/// The slot index is what gets persisted in material snapshots.
#[derive(Clone)]
pub struct TextureRef {
    index: usize,
    texture: Arc<dyn Texture>,
}

impl TextureRef {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn texture(&self) -> &dyn Texture {
        self.texture.as_ref()
    }
}

impl std::fmt::Debug for TextureRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureRef")
            .field("index", &self.index)
            .field("texture", &self.texture.describe())
            .finish()
    }
}

/// Scene-wide registry of textures, addressable by id or by index.
#[derive(Default)]
pub struct Assets {
    textures: Vec<Arc<dyn Texture>>,
    ids: HashMap<String, usize>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under `id`. Re-registering an id replaces the
    /// lookup but keeps the previous slot alive for existing snapshots.
    pub fn add_texture(&mut self, id: &str, texture: Arc<dyn Texture>) -> usize {
        let index = self.textures.len();
        self.textures.push(texture);
        if self.ids.insert(id.to_string(), index).is_some() {
            log::warn!("Texture id {} registered twice, using the latest definition.", id);
        }
        index
    }

    pub fn texture_by_id(&self, id: &str) -> Option<TextureRef> {
        self.ids.get(id).and_then(|&index| self.texture_by_index(index))
    }

    pub fn texture_by_index(&self, index: usize) -> Option<TextureRef> {
        self.textures.get(index).map(|texture| TextureRef { index, texture: texture.clone() })
    }

    pub fn num_textures(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::Assets;
    use crate::math::spectrum::RGBSpectrum;
    use crate::math::constants::Vector2f;
    use crate::textures::constant::ConstantTexture;
    use std::sync::Arc;

    #[test]
    fn test_lookup_by_id_and_index() {
        let mut assets = Assets::new();
        let a = assets.add_texture("a", Arc::new(ConstantTexture::new(RGBSpectrum::splat(0.25))));
        let b = assets.add_texture("b", Arc::new(ConstantTexture::new(RGBSpectrum::splat(0.75))));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(assets.num_textures(), 2);

        let tex_b = assets.texture_by_id("b").expect("texture b");
        assert_eq!(tex_b.index(), 1);
        assert_eq!(tex_b.texture().eval(Vector2f::new(0.0, 0.0)), RGBSpectrum::splat(0.75));

        let tex_a = assets.texture_by_index(0).expect("texture a");
        assert_eq!(tex_a.texture().eval(Vector2f::new(0.5, 0.5)), RGBSpectrum::splat(0.25));
    }

    #[test]
    fn test_missing_texture() {
        let assets = Assets::new();
        assert!(assets.texture_by_id("missing").is_none());
        assert!(assets.texture_by_index(3).is_none());
    }
}
