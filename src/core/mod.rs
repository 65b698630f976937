// Copyright @yucwang 2021

pub mod assets;
pub mod bsdf;
pub mod computation_node;
pub mod factory;
pub mod interaction;
pub mod property;
pub mod rng;
pub mod scene_loader;
pub mod serial;
pub mod texture;
