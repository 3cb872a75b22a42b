// The immutable-per-frame scene: surfaces, the main glass material, the
// lighter recipe shared by the secondary panels, and what sits behind them.
// Between frames the host mutates it directly or through named parameters.

use crate::animation::{ParamTarget, ParamValue};
use crate::background::Background;
use crate::config::SceneConfig;
use crate::shadow::ShadowParams;
use crate::surface::{Surface, SurfaceKind};
use crate::types::{Rgba, Vec2};
use serde::{Deserialize, Serialize};

/// Full material recipe of the main glass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub refraction_strength: f32,
    pub tint: Rgba,
    /// Frost radius in pixels; 0 = clear glass.
    pub frost: f32,
    pub chromatic_enabled: bool,
    pub chromatic_amount: f32,
    /// Rim highlight added near the boundary.
    pub highlight: f32,
    /// Edge-band position where the highlight starts ramping in.
    pub highlight_start: f32,
    pub top_shadow: ShadowParams,
    pub bottom_glow: ShadowParams,
    pub drop_shadow: ShadowParams,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            refraction_strength: 25.0,
            tint: Rgba::new(1.0, 1.0, 1.0, 0.10),
            frost: 0.0,
            chromatic_enabled: false,
            chromatic_amount: 2.0,
            highlight: 0.15,
            highlight_start: 0.85,
            top_shadow: ShadowParams { blur: 12.0, offset: Vec2::new(0.0, 6.0), opacity: 0.25 },
            bottom_glow: ShadowParams { blur: 12.0, offset: Vec2::new(0.0, -6.0), opacity: 0.30 },
            drop_shadow: ShadowParams { blur: 24.0, offset: Vec2::new(6.0, -10.0), opacity: 0.25 },
        }
    }
}

impl Material {
    /// Aberration amount when the effect is on.
    pub fn chromatic(&self) -> Option<f32> {
        self.chromatic_enabled.then_some(self.chromatic_amount)
    }

    pub fn tint(&self) -> Rgba {
        self.tint.clamped()
    }
}

/// Fixed recipe for the control panel, add-image button and grid controls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelRecipe {
    pub refraction_strength: f32,
    pub tint: Rgba,
    /// Tap spacing of the 3x3 frost kernel.
    pub frost_spacing: f32,
    pub edge_glow: f32,
    /// Edge-band position where the glow starts ramping in.
    pub edge_glow_start: f32,
}

impl Default for PanelRecipe {
    fn default() -> Self {
        Self {
            refraction_strength: 12.0,
            tint: Rgba::new(1.0, 1.0, 1.0, 0.18),
            frost_spacing: 0.8,
            edge_glow: 0.15,
            edge_glow_start: 0.7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    /// Canvas size in pixels.
    pub canvas: Vec2,
    pub background: Background,
    pub main_glass: Surface,
    pub control_panel: Surface,
    pub add_image_button: Surface,
    pub grid_controls: Surface,
    pub material: Material,
    pub panel_recipe: PanelRecipe,
}

impl Scene {
    pub fn new(config: &SceneConfig, canvas: Vec2) -> Self {
        Self {
            canvas,
            background: Background::new(config.grid),
            main_glass: config.main_glass,
            control_panel: config.control_panel,
            add_image_button: config.add_image_button,
            grid_controls: config.grid_controls,
            material: config.material,
            panel_recipe: config.panel_recipe,
        }
    }

    pub fn surface(&self, kind: SurfaceKind) -> &Surface {
        match kind {
            SurfaceKind::ControlPanel => &self.control_panel,
            SurfaceKind::AddImageButton => &self.add_image_button,
            SurfaceKind::GridControlsPanel => &self.grid_controls,
            SurfaceKind::MainGlass => &self.main_glass,
        }
    }

    /// Highest-priority visible surface containing `p`.
    pub fn surface_at(&self, p: Vec2) -> Option<SurfaceKind> {
        SurfaceKind::PRIORITY
            .into_iter()
            .find(|&kind| self.surface(kind).contains(p))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new(&SceneConfig::default(), Vec2::new(800.0, 600.0))
    }
}

/// A scene field that can be read and written as a [`ParamValue`].
trait ParamField {
    fn read(&self) -> ParamValue;
    /// False when the value has the wrong shape for this field.
    fn write(&mut self, value: &ParamValue) -> bool;
}

impl ParamField for f32 {
    fn read(&self) -> ParamValue {
        ParamValue::Number(*self)
    }
    fn write(&mut self, value: &ParamValue) -> bool {
        match value {
            ParamValue::Number(v) => {
                *self = *v;
                true
            }
            _ => false,
        }
    }
}

impl ParamField for bool {
    fn read(&self) -> ParamValue {
        ParamValue::Flag(*self)
    }
    fn write(&mut self, value: &ParamValue) -> bool {
        match value {
            ParamValue::Flag(v) => {
                *self = *v;
                true
            }
            _ => false,
        }
    }
}

impl ParamField for Rgba {
    fn read(&self) -> ParamValue {
        ParamValue::Color(self.to_array())
    }
    fn write(&mut self, value: &ParamValue) -> bool {
        match value {
            ParamValue::Color(c) => {
                *self = Rgba::from(*c);
                true
            }
            _ => false,
        }
    }
}

// One table drives both directions so names can't drift apart.
macro_rules! scene_params {
    ($($name:literal => $($field:ident).+;)*) => {
        /// Every parameter name a preset or animation may address.
        pub const PARAM_NAMES: &[&str] = &[$($name),*];

        impl Scene {
            pub fn get_param(&self, name: &str) -> Option<ParamValue> {
                match name {
                    $($name => Some(ParamField::read(&self.$($field).+)),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut dyn ParamField> {
                match name {
                    $($name => Some(&mut self.$($field).+),)*
                    _ => None,
                }
            }
        }
    };
}

scene_params! {
    "refraction_strength" => material.refraction_strength;
    "tint" => material.tint;
    "frost" => material.frost;
    "chromatic_enabled" => material.chromatic_enabled;
    "chromatic_amount" => material.chromatic_amount;
    "highlight" => material.highlight;
    "highlight_start" => material.highlight_start;
    "top_shadow_blur" => material.top_shadow.blur;
    "top_shadow_offset_x" => material.top_shadow.offset.x;
    "top_shadow_offset_y" => material.top_shadow.offset.y;
    "top_shadow_opacity" => material.top_shadow.opacity;
    "bottom_glow_blur" => material.bottom_glow.blur;
    "bottom_glow_offset_x" => material.bottom_glow.offset.x;
    "bottom_glow_offset_y" => material.bottom_glow.offset.y;
    "bottom_glow_opacity" => material.bottom_glow.opacity;
    "drop_shadow_blur" => material.drop_shadow.blur;
    "drop_shadow_offset_x" => material.drop_shadow.offset.x;
    "drop_shadow_offset_y" => material.drop_shadow.offset.y;
    "drop_shadow_opacity" => material.drop_shadow.opacity;
    "glass_x" => main_glass.center.x;
    "glass_y" => main_glass.center.y;
    "glass_width" => main_glass.size.x;
    "glass_height" => main_glass.size.y;
    "corner_radius" => main_glass.corner_radius;
    "edge_thickness" => main_glass.edge_thickness;
    "grid_spacing" => background.grid.spacing;
    "grid_visible" => background.grid.visible;
    "grid_color" => background.grid.line_color;
    "background_color" => background.grid.background_color;
}

impl ParamTarget for Scene {
    fn get_param(&self, name: &str) -> Option<ParamValue> {
        Scene::get_param(self, name)
    }

    fn set_param(&mut self, name: &str, value: &ParamValue) -> bool {
        let Some(field) = self.field_mut(name) else {
            tracing::warn!(name, "ignoring unknown scene parameter");
            return false;
        };
        if !field.write(value) {
            tracing::warn!(name, ?value, "ignoring scene parameter with mismatched type");
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_reads_back() {
        let scene = Scene::default();
        for name in PARAM_NAMES {
            assert!(scene.get_param(name).is_some(), "{name} has no value");
        }
    }

    #[test]
    fn set_param_writes_through_to_fields() {
        let mut scene = Scene::default();
        assert!(scene.set_param("frost", &ParamValue::Number(6.0)));
        assert!(scene.set_param("chromatic_enabled", &ParamValue::Flag(true)));
        assert!(scene.set_param("tint", &ParamValue::Color([0.1, 0.2, 0.3, 0.4])));
        assert!(scene.set_param("drop_shadow_offset_y", &ParamValue::Number(-3.0)));
        assert_eq!(scene.material.frost, 6.0);
        assert!(scene.material.chromatic_enabled);
        assert_eq!(scene.material.tint, Rgba::new(0.1, 0.2, 0.3, 0.4));
        assert_eq!(scene.material.drop_shadow.offset.y, -3.0);
    }

    #[test]
    fn unknown_or_mistyped_params_are_rejected() {
        let mut scene = Scene::default();
        let before = scene.material;
        assert!(!scene.set_param("no_such_param", &ParamValue::Number(1.0)));
        assert!(!scene.set_param("frost", &ParamValue::Flag(true)));
        assert_eq!(scene.material, before);
    }

    #[test]
    fn priority_picks_panels_before_main_glass() {
        let mut scene = Scene::default();
        scene.control_panel.center = scene.main_glass.center;
        assert_eq!(scene.surface_at(scene.main_glass.center), Some(SurfaceKind::ControlPanel));
        scene.control_panel.visible = false;
        assert_eq!(scene.surface_at(scene.main_glass.center), Some(SurfaceKind::MainGlass));
        assert_eq!(scene.surface_at(Vec2::new(-50.0, -50.0)), None);
    }
}
