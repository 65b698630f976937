// Copyright @yucwang 2026

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

/// Unpolarized Fresnel reflectance of a conductor with complex index of
/// refraction `eta + i k`. `cos_theta_i` must be non-negative.
pub fn fresnel_conductor(cos_theta_i: Float, eta: &RGBSpectrum, k: &RGBSpectrum) -> RGBSpectrum {
    let cos2 = cos_theta_i * cos_theta_i;
    let eta2_k2 = *eta * *eta + *k * *k;
    let two_eta_cos = *eta * (2.0 * cos_theta_i);

    let tmp = eta2_k2 * cos2;
    let r_parl2 = (tmp - two_eta_cos + 1.0) / (tmp + two_eta_cos + 1.0);
    let r_perp2 = (eta2_k2 - two_eta_cos + cos2) / (eta2_k2 + two_eta_cos + cos2);
    (r_parl2 + r_perp2) * 0.5
}

#[cfg(test)]
mod tests {
    use super::fresnel_conductor;
    use crate::math::spectrum::RGBSpectrum;

    fn silver() -> (RGBSpectrum, RGBSpectrum) {
        (RGBSpectrum::new(0.14, 0.129, 0.1585), RGBSpectrum::new(4.58625, 3.348125, 2.329375))
    }

    #[test]
    fn test_normal_incidence() {
        let (eta, k) = silver();
        let f = fresnel_conductor(1.0, &eta, &k);
        for idx in 0..3 {
            let n = eta[idx];
            let kk = k[idx];
            let expected = ((n - 1.0) * (n - 1.0) + kk * kk) / ((n + 1.0) * (n + 1.0) + kk * kk);
            assert!((f[idx] - expected).abs() < 1e-5, "channel {}: {} vs {}", idx, f[idx], expected);
        }
    }

    #[test]
    fn test_grazing_incidence_is_total() {
        let (eta, k) = silver();
        let f = fresnel_conductor(0.0, &eta, &k);
        for idx in 0..3 {
            assert!((f[idx] - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_range_over_angles() {
        let (eta, k) = silver();
        for i in 0..=64 {
            let cos_theta = i as f32 / 64.0;
            let f = fresnel_conductor(cos_theta, &eta, &k);
            assert!(f.is_finite());
            for idx in 0..3 {
                assert!(f[idx] > 0.0 && f[idx] <= 1.0 + 1e-5, "cos={} f={:?}", cos_theta, f);
            }
        }
    }

    #[test]
    fn test_dielectric_limit() {
        // With k = 0 the normal-incidence value reduces to ((n-1)/(n+1))^2.
        let eta = RGBSpectrum::splat(1.5);
        let k = RGBSpectrum::splat(0.0);
        let f = fresnel_conductor(1.0, &eta, &k);
        assert!((f[0] - 0.04).abs() < 1e-5);
    }
}
