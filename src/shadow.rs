// Inner shadow / inner glow on the main glass, and its outer drop shadow.
// Visual: a dark lip along one edge, a light lip along the opposite edge,
// and a soft dark silhouette cast onto the page (never onto the glass itself).

use crate::refraction::MIN_EFFECT_AMOUNT;
use crate::sdf::smoothstep;
use crate::surface::Surface;
use crate::types::{Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// blur / offset / opacity for one shadow-like layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowParams {
    pub blur: f32,
    pub offset: Vec2,
    pub opacity: f32,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self { blur: 10.0, offset: Vec2::ZERO, opacity: 0.0 }
    }
}

impl ShadowParams {
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_off(&self) -> bool {
        self.opacity() < MIN_EFFECT_AMOUNT
    }
}

/// Inner shadow/glow field: 0 deep inside, rising toward the edge opposite `offset`.
#[inline]
pub fn inner_intensity(surface: &Surface, p: Vec2, params: &ShadowParams) -> f32 {
    smoothstep(0.0, params.blur, surface.sdf_shifted(p, params.offset))
}

/// Darken by the top shadow and lighten by the bottom glow, both scaled by the
/// glass's own alpha so neither outweighs the glass itself.
pub fn apply_inner(
    color: Rgba,
    surface: &Surface,
    p: Vec2,
    top_shadow: &ShadowParams,
    bottom_glow: &ShadowParams,
    glass_alpha: f32,
) -> Rgba {
    let alpha = glass_alpha.clamp(0.0, 1.0);
    let mut out = color;
    if !top_shadow.is_off() {
        let i = inner_intensity(surface, p, top_shadow);
        out = out.offset_rgb(-i * top_shadow.opacity() * alpha);
    }
    if !bottom_glow.is_off() {
        let i = inner_intensity(surface, p, bottom_glow);
        out = out.offset_rgb(i * bottom_glow.opacity() * alpha);
    }
    out.clamped()
}

/// Drop-shadow coverage at `p`: 1 inside the silhouette moved by `offset`,
/// fading to 0 over `blur` pixels, and always 0 on the surface itself.
pub fn drop_intensity(surface: &Surface, p: Vec2, params: &ShadowParams) -> f32 {
    if surface.sdf(p) <= 0.0 {
        return 0.0;
    }
    let d = surface.sdf_shifted(p, Vec2::ZERO - params.offset);
    if d <= 0.0 {
        1.0
    } else {
        1.0 - smoothstep(0.0, params.blur, d)
    }
}

/// Blend toward black by `intensity * opacity`.
#[inline]
pub fn apply_drop(color: Rgba, intensity: f32, params: &ShadowParams) -> Rgba {
    color.mix_rgb(Rgba::BLACK, intensity * params.opacity()).clamped()
}
