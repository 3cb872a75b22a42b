// Frosted glass as a cheap box blur in sample space: average the background
// over a small fixed grid of offsets around the (already refracted) coordinate.
// Visual: larger radius = softer, milkier glass. Deterministic, no noise.

use crate::types::{Rgba, Vec2};

/// Radii at or below this skip the blur.
pub const MIN_FROST_RADIUS: f32 = 0.1;

/// Square sampling grid: `(2*reach+1)²` taps spaced `spacing` pixels apart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrostKernel {
    pub reach: i32,
    pub spacing: f32,
}

impl FrostKernel {
    /// 5x5 grid spaced `radius * 0.5`, or `None` when frost is effectively off.
    pub fn for_radius(radius: f32) -> Option<Self> {
        if radius <= MIN_FROST_RADIUS {
            return None;
        }
        Some(Self { reach: 2, spacing: radius * 0.5 })
    }

    /// 3x3 grid used by the lighter secondary panels.
    pub fn light(spacing: f32) -> Self {
        Self { reach: 1, spacing }
    }

    pub fn taps(&self) -> usize {
        let side = (2 * self.reach + 1) as usize;
        side * side
    }
}

/// Average `sample` over the kernel around `p`; a single fetch when `kernel` is `None`.
pub fn frosted<F>(kernel: Option<FrostKernel>, p: Vec2, sample: F) -> Rgba
where
    F: Fn(Vec2) -> Rgba,
{
    let Some(k) = kernel else {
        return sample(p);
    };

    let mut sum = Rgba::TRANSPARENT;
    for y in -k.reach..=k.reach {
        for x in -k.reach..=k.reach {
            let offset = Vec2::new(x as f32, y as f32) * k.spacing;
            sum = sum.add(sample(p + offset));
        }
    }
    sum.scale(1.0 / k.taps() as f32)
}
