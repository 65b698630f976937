// Copyright @yucwang 2026

use crate::math::constants::{EPSILON, Float, PI, Vector2f, Vector3f};

/// Normal distribution of microfacet orientations. All vectors live in the
/// local shading frame, with the macro normal along +z.
///
/// `sample` draws half vectors with density `eval(h) * h.z` per unit solid
/// angle, which is what the reflection Jacobian in the BSDF assumes.
pub trait MicrofacetDistribution: Default + Send + Sync {
    const NAME: &'static str;

    fn eval(&self, h: &Vector3f, alpha: Float) -> Float;
    fn sample(&self, u: &Vector2f, alpha: Float) -> Vector3f;
}

// [0,1] -> (0,1)
fn to_open_open(u: Float) -> Float {
    (1.0 - 2.0 * EPSILON) * u + EPSILON
}

// [0,1] -> (0,1]
fn to_open_closed(u: Float) -> Float {
    (1.0 - EPSILON) * u + EPSILON
}

/// Trowbridge-Reitz (GGX) distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct GGXDistribution;

impl MicrofacetDistribution for GGXDistribution {
    const NAME: &'static str = "ggx";

    fn eval(&self, h: &Vector3f, alpha: Float) -> Float {
        let cos_h = h.z;
        if cos_h <= 0.0 {
            return 0.0;
        }
        // cos^4 * (a^2 + tan^2)^2 == (cos^2 * (a^2 - 1) + 1)^2, without the
        // tangent blowing up near the horizon.
        let a2 = alpha * alpha;
        let cos2 = cos_h * cos_h;
        let t = cos2 * (a2 - 1.0) + 1.0;
        if t <= 0.0 {
            return 0.0;
        }
        a2 / (PI * t * t)
    }

    fn sample(&self, u: &Vector2f, alpha: Float) -> Vector3f {
        let u0 = to_open_closed(u.x);
        let u1 = to_open_open(u.y);

        let a2 = alpha * alpha;
        // 1 - (1 - a^2) u0, arranged to stay exact at u0 == 1.
        let denom = ((1.0 - u0) + a2 * u0).sqrt();
        let cos_theta = (1.0 - u0).max(0.0).sqrt() / denom;
        let sin_theta = alpha * u0.sqrt() / denom;
        let phi = PI * (2.0 * u1 - 1.0);

        let (sin_phi, cos_phi) = phi.sin_cos();
        Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }
}

/// Beckmann-Spizzichino distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct BeckmannDistribution;

impl MicrofacetDistribution for BeckmannDistribution {
    const NAME: &'static str = "beckmann";

    fn eval(&self, h: &Vector3f, alpha: Float) -> Float {
        let cos_h = h.z;
        if cos_h <= 0.0 {
            return 0.0;
        }
        let cos2 = cos_h * cos_h;
        let cos4 = cos2 * cos2;
        if cos4 <= 0.0 {
            return 0.0;
        }
        let a2 = alpha * alpha;
        let tan2 = (1.0 - cos2).max(0.0) / cos2;
        let e = (-tan2 / a2).exp();
        if e <= 0.0 {
            return 0.0;
        }
        e / (PI * a2 * cos4)
    }

    fn sample(&self, u: &Vector2f, alpha: Float) -> Vector3f {
        let cos_theta = if 1.0 - u.x < EPSILON {
            0.0
        } else {
            let tan2 = -alpha * alpha * (1.0 - u.x).ln();
            1.0 / (1.0 + tan2).sqrt()
        };
        let sin_theta = (1.0 - cos_theta * cos_theta).max(0.0).sqrt();
        let phi = 2.0 * PI * u.y;

        let (sin_phi, cos_phi) = phi.sin_cos();
        Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
    }
}

/// V-cavity shadowing-masking term of Cook and Torrance.
pub fn shadow_masking(wi: &Vector3f, wo: &Vector3f, h: &Vector3f) -> Float {
    let n_dot_h = h.z;
    let n_dot_wo = wo.z;
    let n_dot_wi = wi.z;
    let wo_dot_h = wo.dot(h).abs();
    let wi_dot_h = wi.dot(h).abs();
    if wo_dot_h <= 0.0 || wi_dot_h <= 0.0 {
        return 0.0;
    }

    let masking = 2.0 * n_dot_h * n_dot_wo / wo_dot_h;
    let shadowing = 2.0 * n_dot_h * n_dot_wi / wi_dot_h;
    masking.min(shadowing).min(1.0)
}
