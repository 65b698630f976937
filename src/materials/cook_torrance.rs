// Copyright @yucwang 2026

use std::io::{Read, Write};

use crate::core::assets::Assets;
use crate::core::bsdf::{shading_normal_correction, BSDFValue, ScatterType, BSDF};
use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::core::interaction::{SurfaceGeometry, TransportDirection};
use crate::core::property::{LoadError, PropertyNode};
use crate::core::serial::{
    read_f32, read_i32, read_spectrum, write_f32, write_i32, write_spectrum, SerialError, UserData,
};
use crate::materials::fresnel::fresnel_conductor;
use crate::materials::microfacet::{
    shadow_masking, BeckmannDistribution, GGXDistribution, MicrofacetDistribution,
};
use crate::materials::reflectance::{ReflectanceSource, NO_TEXTURE};
use crate::math::constants::{COS_EPSILON, Float, MIN_ROUGHNESS, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

// Silver.
pub const DEFAULT_ETA: [Float; 3] = [0.140000, 0.129000, 0.158500];
pub const DEFAULT_K: [Float; 3] = [4.586250, 3.348125, 2.329375];
pub const DEFAULT_ROUGHNESS: Float = 0.1;

/// Cook-Torrance glossy conductor. The microfacet distribution is fixed by
/// the type parameter when the material is created.
pub struct CookTorranceBSDF<D: MicrofacetDistribution> {
    id: String,
    reflectance: ReflectanceSource,
    eta: RGBSpectrum,
    k: RGBSpectrum,
    roughness: Float,
    distribution: D,
}

pub type GGXCookTorranceBSDF = CookTorranceBSDF<GGXDistribution>;
pub type BeckmannCookTorranceBSDF = CookTorranceBSDF<BeckmannDistribution>;

fn upper_hemisphere(v: &Vector3f) -> bool {
    v.z > COS_EPSILON
}

fn half_vector(wi: &Vector3f, wo: &Vector3f) -> Option<Vector3f> {
    let h = wi + wo;
    let len2 = h.norm_squared();
    if len2 <= 0.0 {
        return None;
    }
    Some(h / len2.sqrt())
}

fn spectrum_from(v: &[Float; 3]) -> RGBSpectrum {
    RGBSpectrum::new(v[0], v[1], v[2])
}

fn check_spectrum(name: &str, v: Vector3f) -> Result<RGBSpectrum, LoadError> {
    if v.iter().any(|c| !c.is_finite() || *c < 0.0) {
        return Err(LoadError::InvalidValue {
            name: name.to_string(),
            value: format!("({}, {}, {})", v.x, v.y, v.z),
        });
    }
    Ok(RGBSpectrum::from_rgb(&v))
}

/// Roughness must be finite and lie in [0, 1]; values below `MIN_ROUGHNESS`
/// (including zero) are raised to it.
pub fn check_roughness(roughness: Float) -> Result<Float, LoadError> {
    if !roughness.is_finite() || roughness < 0.0 || roughness > 1.0 {
        return Err(LoadError::InvalidValue {
            name: String::from("roughness"),
            value: roughness.to_string(),
        });
    }
    if roughness < MIN_ROUGHNESS {
        log::warn!("Roughness {} is too small, clamping to {}.", roughness, MIN_ROUGHNESS);
        return Ok(MIN_ROUGHNESS);
    }
    Ok(roughness)
}

impl<D: MicrofacetDistribution> Default for CookTorranceBSDF<D> {
    fn default() -> Self {
        Self::new(ReflectanceSource::default(),
                  spectrum_from(&DEFAULT_ETA),
                  spectrum_from(&DEFAULT_K),
                  DEFAULT_ROUGHNESS)
    }
}

impl<D: MicrofacetDistribution> CookTorranceBSDF<D> {
    pub fn new(reflectance: ReflectanceSource,
               eta: RGBSpectrum,
               k: RGBSpectrum,
               roughness: Float) -> Self {
        Self {
            id: generate_node_id("CookTorranceBSDF"),
            reflectance,
            eta,
            k,
            roughness: roughness.max(MIN_ROUGHNESS).min(1.0),
            distribution: D::default(),
        }
    }

    pub fn eta(&self) -> RGBSpectrum {
        self.eta
    }

    pub fn k(&self) -> RGBSpectrum {
        self.k
    }

    pub fn texture_index(&self) -> i32 {
        self.reflectance.texture_index()
    }

    pub fn distribution_name(&self) -> &'static str {
        D::NAME
    }
}

impl<D: MicrofacetDistribution> ComputationNode for CookTorranceBSDF<D> {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: &str) {
        self.id = id.to_string();
    }

    fn to_string(&self) -> String {
        format!("CookTorranceBSDF[{}, roughness = {}, texture = {}]",
                D::NAME, self.roughness, self.reflectance.texture_index())
    }
}

impl<D: MicrofacetDistribution> BSDF for CookTorranceBSDF<D> {
    fn load(&mut self, props: &PropertyNode, assets: &Assets) -> Result<(), LoadError> {
        let reflectance = match props.child_as_str("TexR")? {
            Some(tex_id) => {
                let tex = assets.texture_by_id(tex_id)
                    .ok_or_else(|| LoadError::UnknownAsset(tex_id.to_string()))?;
                ReflectanceSource::textured(tex)
            }
            None => ReflectanceSource::constant(check_spectrum("R", props.child_as_rgb("R", Vector3f::zeros())?)?),
        };
        let eta = check_spectrum("eta", props.child_as_rgb("eta", Vector3f::from(DEFAULT_ETA))?)?;
        let k = check_spectrum("k", props.child_as_rgb("k", Vector3f::from(DEFAULT_K))?)?;
        let roughness = check_roughness(props.child_as_float("roughness", DEFAULT_ROUGHNESS)?)?;

        self.reflectance = reflectance;
        self.eta = eta;
        self.k = k;
        self.roughness = roughness;
        log::debug!("Loaded {}.", ComputationNode::to_string(self));
        Ok(())
    }

    fn scatter_type(&self) -> ScatterType {
        ScatterType::Glossy
    }

    fn is_delta_direction(&self) -> bool {
        false
    }

    fn is_delta_position(&self) -> bool {
        false
    }

    fn sample_direction(&self, u: Vector2f,
                               geom: &SurfaceGeometry,
                               wi: &Vector3f) -> Option<Vector3f> {
        let local_wi = geom.to_local(wi);
        if !upper_hemisphere(&local_wi) {
            return None;
        }

        let h = self.distribution.sample(&u, self.roughness);
        let local_wo = -local_wi - 2.0 * (-local_wi).dot(&h) * h;
        if !upper_hemisphere(&local_wo) || !local_wo.iter().all(|v| v.is_finite()) {
            return None;
        }

        Some(geom.to_world(&local_wo))
    }

    fn eval_direction_pdf(&self, geom: &SurfaceGeometry,
                                 wi: &Vector3f,
                                 wo: &Vector3f) -> Float {
        let local_wi = geom.to_local(wi);
        let local_wo = geom.to_local(wo);
        if !upper_hemisphere(&local_wi) || !upper_hemisphere(&local_wo) {
            return 0.0;
        }

        let h = match half_vector(&local_wi, &local_wo) {
            Some(h) => h,
            None => return 0.0,
        };
        let wo_dot_h = local_wo.dot(&h);
        if wo_dot_h <= 0.0 {
            return 0.0;
        }

        // Half vector density -> outgoing solid angle -> projected solid angle.
        let d = self.distribution.eval(&h, self.roughness);
        let pdf = d * h.z / (4.0 * wo_dot_h) / local_wo.z;
        if pdf.is_finite() { pdf } else { 0.0 }
    }

    fn eval_direction(&self, geom: &SurfaceGeometry,
                             wi: &Vector3f,
                             wo: &Vector3f,
                             trans_dir: TransportDirection) -> BSDFValue {
        let local_wi = geom.to_local(wi);
        let local_wo = geom.to_local(wo);
        if !upper_hemisphere(&local_wi) || !upper_hemisphere(&local_wo) {
            return BSDFValue::default();
        }

        let h = match half_vector(&local_wi, &local_wo) {
            Some(h) => h,
            None => return BSDFValue::default(),
        };
        let d = self.distribution.eval(&h, self.roughness);
        let g = shadow_masking(&local_wi, &local_wo, &h);
        let f = fresnel_conductor(local_wi.dot(&h), &self.eta, &self.k);
        let r = self.reflectance.eval(geom.uv());

        let value = r * f * (d * g / (4.0 * local_wi.z * local_wo.z))
            * shading_normal_correction(geom, wi, wo, trans_dir);
        if value.is_finite() { value } else { BSDFValue::default() }
    }

    fn serialize(&self, stream: &mut dyn Write) -> Result<(), SerialError> {
        write_spectrum(stream, &self.reflectance.constant_value())?;
        write_i32(stream, self.reflectance.texture_index())?;
        write_spectrum(stream, &self.eta)?;
        write_spectrum(stream, &self.k)?;
        write_f32(stream, self.roughness)?;
        Ok(())
    }

    fn deserialize(&mut self, stream: &mut dyn Read, user_data: &UserData) -> Result<(), SerialError> {
        let r = read_spectrum(stream)?;
        let tex_index = read_i32(stream)?;
        let eta = read_spectrum(stream)?;
        let k = read_spectrum(stream)?;
        let roughness = check_roughness(read_f32(stream)?)
            .map_err(|err| SerialError::InvalidValue { name: "roughness", value: err.to_string() })?;

        let texture = if tex_index >= 0 {
            let assets = user_data.get::<Assets>("assets")
                .ok_or(SerialError::MissingUserData("assets"))?;
            let tex = assets.texture_by_index(tex_index as usize)
                .ok_or_else(|| SerialError::UnresolvedAsset(format!("texture index {}", tex_index)))?;
            Some(tex)
        } else if tex_index == NO_TEXTURE {
            None
        } else {
            return Err(SerialError::UnresolvedAsset(format!("texture index {}", tex_index)));
        };

        self.reflectance = ReflectanceSource::from_parts(r, texture);
        self.eta = eta;
        self.k = k;
        self.roughness = roughness;
        Ok(())
    }

    fn glossiness(&self) -> Float {
        self.roughness
    }

    fn reflectance(&self) -> RGBSpectrum {
        self.reflectance.constant_value()
    }

    fn reflectance_at(&self, geom: &SurfaceGeometry) -> RGBSpectrum {
        self.reflectance.eval(geom.uv())
    }
}
