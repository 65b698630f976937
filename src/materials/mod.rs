// Copyright @yucwang 2026

pub mod cook_torrance;
pub mod fresnel;
pub mod microfacet;
pub mod reflectance;

use crate::core::bsdf::BSDF;
use crate::core::factory::ComponentFactory;

use self::cook_torrance::{BeckmannCookTorranceBSDF, GGXCookTorranceBSDF};

pub fn register(factory: &mut ComponentFactory) {
    factory.register("bsdf::cook_torrance", || Box::new(GGXCookTorranceBSDF::default()) as Box<dyn BSDF>);
    factory.register("bsdf::cook_torrance_beckmann", || Box::new(BeckmannCookTorranceBSDF::default()) as Box<dyn BSDF>);
}
