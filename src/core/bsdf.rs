// Copyright @yucwang 2023

use std::io::{Read, Write};

use crate::core::assets::Assets;
use crate::core::computation_node::ComputationNode;
use crate::core::interaction::{SurfaceGeometry, TransportDirection};
use crate::core::property::{LoadError, PropertyNode};
use crate::core::serial::{SerialError, UserData};
use crate::math::constants::{ COS_EPSILON, Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

// Definitions of types used in BSDF sampling and eval
// processes
pub type BSDFValue = RGBSpectrum;

/// Coarse classification of a scattering lobe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScatterType {
    Diffuse,
    Glossy,
    Specular,
}

impl ScatterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScatterType::Diffuse => "diffuse",
            ScatterType::Glossy => "glossy",
            ScatterType::Specular => "specular",
        }
    }
}

/// Densities returned by `eval_direction_pdf` are expressed with respect to
/// the projected solid angle of the outgoing direction.
pub trait BSDF: ComputationNode + Send + Sync {
    fn load(&mut self, props: &PropertyNode, assets: &Assets) -> Result<(), LoadError>;

    fn scatter_type(&self) -> ScatterType;
    fn is_delta_direction(&self) -> bool;
    fn is_delta_position(&self) -> bool;

    fn sample_direction(&self, u: Vector2f,
                               geom: &SurfaceGeometry,
                               wi: &Vector3f) -> Option<Vector3f>;
    fn eval_direction_pdf(&self, geom: &SurfaceGeometry,
                                 wi: &Vector3f,
                                 wo: &Vector3f) -> Float;
    fn eval_direction(&self, geom: &SurfaceGeometry,
                             wi: &Vector3f,
                             wo: &Vector3f,
                             trans_dir: TransportDirection) -> BSDFValue;

    fn serialize(&self, stream: &mut dyn Write) -> Result<(), SerialError>;
    fn deserialize(&mut self, stream: &mut dyn Read, user_data: &UserData) -> Result<(), SerialError>;

    fn glossiness(&self) -> Float;
    fn reflectance(&self) -> RGBSpectrum;
    fn reflectance_at(&self, geom: &SurfaceGeometry) -> RGBSpectrum;
}

/// Correction for the mismatch between geometric and shading normals.
/// Zero when a direction is seen from different sides by the two normals.
pub fn shading_normal_correction(geom: &SurfaceGeometry,
                                 wi: &Vector3f,
                                 wo: &Vector3f,
                                 trans_dir: TransportDirection) -> Float {
    let local_wi = geom.to_local(wi);
    let local_wo = geom.to_local(wo);
    let wi_dot_ng = wi.dot(&geom.geo_normal());
    let wo_dot_ng = wo.dot(&geom.geo_normal());
    let wi_dot_ns = local_wi.z;
    let wo_dot_ns = local_wo.z;
    if wi_dot_ng * wi_dot_ns <= 0.0 || wo_dot_ng * wo_dot_ns <= 0.0 {
        return 0.0;
    }

    match trans_dir {
        TransportDirection::LightToEye => {
            let denom = wo_dot_ns * wi_dot_ng;
            if denom.abs() <= COS_EPSILON * COS_EPSILON {
                return 0.0;
            }
            wi_dot_ns * wo_dot_ng / denom
        }
        TransportDirection::EyeToLight => 1.0,
    }
}
