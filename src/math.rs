//! Small vector math for the galaxy.
//!
//! Interpolation goes through `mul_add` (FMA): `a + t * (b - a)` with one
//! rounding for the multiply-add. `b - a` is still rounded on its own, so the
//! result can land an ulp past `b` when `t` is close to 1. The animator keeps
//! `t < 1` and snaps onto the target once within its epsilon, which is what
//! rules out overshoot there.

use serde::{Deserialize, Serialize};

/// 3D vector / point in galaxy space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    #[inline(always)]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline(always)]
    pub fn scale(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    #[inline(always)]
    pub fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }

    #[inline(always)]
    pub fn dot(self, o: Self) -> f32 {
        fma(self.x, o.x, fma(self.y, o.y, self.z * o.z))
    }

    /// Squared length (no sqrt; use for comparisons).
    #[inline(always)]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline(always)]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline(always)]
    pub fn distance(self, o: Self) -> f32 {
        self.sub(o).length()
    }

    /// Component-wise lerp.
    #[inline(always)]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        Self::new(lerp(self.x, to.x, t), lerp(self.y, to.y, t), lerp(self.z, to.z, t))
    }

    /// Rotate around the Y axis by `angle` radians.
    #[inline]
    pub fn rotate_y(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(fma(self.x, c, self.z * s), self.y, fma(-self.x, s, self.z * c))
    }

    /// Rotate around the X axis by `angle` radians.
    #[inline]
    pub fn rotate_x(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x, fma(self.y, c, -self.z * s), fma(self.y, s, self.z * c))
    }

    /// Rotate around the Z axis by `angle` radians.
    #[inline]
    pub fn rotate_z(self, angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(fma(self.x, c, -self.y * s), fma(self.x, s, self.y * c), self.z)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// Fused multiply-add: `a * b + c`.
#[inline(always)]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Linear interpolation using FMA for precision.
/// lerp(a, b, t) = a + t * (b - a) = fma(t, b-a, a)
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    fma(t, b - a, a)
}

/// Exponential smoothing factor for a frame of `dt` seconds.
///
/// `k = 1 - e^(-rate * dt)`. Applying it once per frame gives the same decay
/// per second at any refresh rate. Returns 0.0 for non-positive or non-finite
/// input; the result is always in `[0, 1)`.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if !rate.is_finite() || !dt.is_finite() || rate <= 0.0 || dt <= 0.0 {
        return 0.0;
    }
    let k = 1.0 - (-rate * dt).exp();
    // exp() can round to 0 for huge exponents; keep k strictly below 1
    k.min(1.0 - f32::EPSILON)
}
