// Copyright @yucwang 2026

use std::collections::HashMap;

use crate::core::assets::Assets;
use crate::core::bsdf::BSDF;
use crate::core::property::{LoadError, PropertyNode};

pub type BSDFConstructor = fn() -> Box<dyn BSDF>;

/// Maps component names such as `"bsdf::cook_torrance"` to constructors.
#[derive(Default)]
pub struct ComponentFactory {
    bsdfs: HashMap<String, BSDFConstructor>,
}

impl ComponentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with every BSDF this crate ships.
    pub fn with_builtins() -> Self {
        let mut factory = Self::new();
        crate::materials::register(&mut factory);
        factory
    }

    pub fn register(&mut self, name: &str, constructor: BSDFConstructor) {
        if self.bsdfs.insert(name.to_string(), constructor).is_some() {
            log::warn!("Component {} registered twice, keeping the latest.", name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bsdfs.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bsdfs.keys().map(|k| k.as_str()).collect();
        names.sort();
        names
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn BSDF>, LoadError> {
        let constructor = self.bsdfs.get(name)
            .ok_or_else(|| LoadError::UnknownComponent(name.to_string()))?;
        Ok(constructor())
    }

    /// Create a component and load it from `props`.
    pub fn load(&self, name: &str, props: &PropertyNode, assets: &Assets) -> Result<Box<dyn BSDF>, LoadError> {
        let mut bsdf = self.create(name)?;
        bsdf.load(props, assets)?;
        Ok(bsdf)
    }
}
