// Top-level per-pixel procedure and the whole-frame scan around it.
// Visual expectation: panels in priority order, each refracting and frosting
// what lies behind it, then the main glass's drop shadow on the page.

use crate::error::Error;
use crate::frost::{frosted, FrostKernel};
use crate::refraction::Refraction;
use crate::scene::{Material, PanelRecipe, Scene};
use crate::sdf::smoothstep;
use crate::shadow::{apply_drop, apply_inner, drop_intensity};
use crate::surface::{Surface, SurfaceKind, Zone};
use crate::types::{FrameBuffer, Rgba, Vec2};
use crate::background::Background;
use image::RgbaImage;
use std::path::Path;

/// Final color of scene point `p` (lower-left origin, pixels).
pub fn evaluate_pixel(p: Vec2, scene: &Scene) -> Rgba {
    let base = match scene.surface_at(p) {
        Some(SurfaceKind::MainGlass) => {
            shade_main_glass(p, &scene.main_glass, &scene.material, &scene.background)
        }
        Some(kind) => shade_panel(p, scene.surface(kind), &scene.panel_recipe, &scene.background),
        None => scene.background.sample(p),
    };
    apply_drop_shadow(p, base, scene).clamped()
}

/// Refraction for `p` on `surface`: displaced in the edge band, in place elsewhere.
fn refraction_for(p: Vec2, surface: &Surface, zone: Zone, strength: f32, chromatic: Option<f32>) -> Refraction {
    match zone {
        Zone::EdgeBand { u } => Refraction::at(p, surface.center, u, strength, chromatic),
        Zone::FlatInterior | Zone::Outside => Refraction::none(),
    }
}

fn shade_main_glass(p: Vec2, glass: &Surface, material: &Material, background: &Background) -> Rgba {
    let zone = glass.classify(p);
    let refraction = refraction_for(p, glass, zone, material.refraction_strength, material.chromatic());
    let seen = frosted(FrostKernel::for_radius(material.frost), p, |q| refraction.lookup(background, q));

    let tint = material.tint();
    let mut color = seen.mix_rgb(tint, tint.a);
    if let Zone::EdgeBand { u } = zone {
        color = color.offset_rgb(smoothstep(material.highlight_start, 1.0, u) * material.highlight);
    }
    apply_inner(color, glass, p, &material.top_shadow, &material.bottom_glow, tint.a)
}

fn shade_panel(p: Vec2, panel: &Surface, recipe: &PanelRecipe, background: &Background) -> Rgba {
    let zone = panel.classify(p);
    let refraction = refraction_for(p, panel, zone, recipe.refraction_strength, None);
    let kernel = FrostKernel::light(recipe.frost_spacing);
    let seen = frosted(Some(kernel), p, |q| refraction.lookup(background, q));

    let tint = recipe.tint.clamped();
    let mut color = seen.mix_rgb(tint, tint.a);
    if let Zone::EdgeBand { u } = zone {
        color = color.offset_rgb(smoothstep(recipe.edge_glow_start, 1.0, u) * recipe.edge_glow);
    }
    color.clamped()
}

/// Drop shadow of the main glass, applied after surface selection. Zero on the
/// glass itself, so only what lies around it darkens.
fn apply_drop_shadow(p: Vec2, color: Rgba, scene: &Scene) -> Rgba {
    let params = &scene.material.drop_shadow;
    if !scene.main_glass.visible || params.is_off() {
        return color;
    }
    let intensity = drop_intensity(&scene.main_glass, p, params);
    if intensity <= 0.0 {
        return color;
    }
    apply_drop(color, intensity, params)
}

/// Scene coordinate of the center of buffer pixel (x, row); rows run top-down.
#[inline]
pub fn pixel_center(x: usize, row: usize, height: usize) -> Vec2 {
    Vec2::new(x as f32 + 0.5, (height - 1 - row) as f32 + 0.5)
}

/// Evaluate every pixel of `fb` (0x00RRGGBB).
/// Visual: the window shows the full composited frame after `present`.
pub fn render(scene: &Scene, fb: &mut FrameBuffer) {
    let (w, h) = (fb.width, fb.height);
    for row in 0..h {
        let row_ofs = row * w;
        for x in 0..w {
            fb.pixels[row_ofs + x] = evaluate_pixel(pixel_center(x, row, h), scene).to_u32();
        }
    }
}

/// Render the scene's full canvas into an RGBA image.
pub fn render_image(scene: &Scene) -> RgbaImage {
    let w = scene.canvas.x.max(1.0) as u32;
    let h = scene.canvas.y.max(1.0) as u32;
    RgbaImage::from_fn(w, h, |x, row| {
        let p = pixel_center(x as usize, row as usize, h as usize);
        image::Rgba(evaluate_pixel(p, scene).to_rgba8())
    })
}

/// Headless: render one frame and write it as PNG.
pub fn save_png(scene: &Scene, path: &Path) -> Result<(), Error> {
    render_image(scene)
        .save(path)
        .map_err(|source| Error::FrameWrite { path: path.to_path_buf(), source })
}
