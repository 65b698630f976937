/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = 3.14159265359;

// Local cosines at or below this value are treated as lying on the horizon.
pub const COS_EPSILON: Float = 1e-6;

// Lower bound applied to the microfacet roughness at load time.
pub const MIN_ROUGHNESS: Float = 1e-3;
