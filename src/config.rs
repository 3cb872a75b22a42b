//! Glass configuration
//!
//! Loads window settings, the initial scene and named presets from
//! `glass.toml`, falling back to built-in defaults when the file is absent.
//! Environment variables override the file for quick experiments.

use crate::animation::{ParamMap, ParamValue};
use crate::background::Grid;
use crate::error::Error;
use crate::scene::{Material, PanelRecipe};
use crate::surface::Surface;
use crate::types::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "glass.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlassConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Initial scene
    pub scene: SceneConfig,
    /// Named target snapshots for the animation engine
    pub presets: BTreeMap<String, ParamMap>,
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    pub title: String,
}

/// Scene configuration: every surface plus the recipes that shade them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub grid: Grid,
    pub material: Material,
    pub panel_recipe: PanelRecipe,
    pub main_glass: Surface,
    pub control_panel: Surface,
    pub add_image_button: Surface,
    pub grid_controls: Surface,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Liquid Glass".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid: Grid::default(),
            material: Material::default(),
            panel_recipe: PanelRecipe::default(),
            main_glass: Surface::default(),
            control_panel: Surface {
                center: Vec2::new(690.0, 420.0),
                size: Vec2::new(180.0, 280.0),
                corner_radius: 20.0,
                edge_thickness: 12.0,
                visible: true,
            },
            add_image_button: Surface {
                center: Vec2::new(690.0, 230.0),
                size: Vec2::new(160.0, 44.0),
                corner_radius: 22.0,
                edge_thickness: 8.0,
                visible: true,
            },
            grid_controls: Surface {
                center: Vec2::new(110.0, 470.0),
                size: Vec2::new(180.0, 200.0),
                corner_radius: 20.0,
                edge_thickness: 12.0,
                visible: true,
            },
        }
    }
}

impl Default for GlassConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            scene: SceneConfig::default(),
            presets: builtin_presets(),
        }
    }
}

/// Presets shipped with the binary, used when the config file has none.
pub fn builtin_presets() -> BTreeMap<String, ParamMap> {
    fn preset(entries: &[(&str, ParamValue)]) -> ParamMap {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }
    use ParamValue::{Color, Flag, Number};

    let mut presets = BTreeMap::new();
    presets.insert(
        "clear".to_string(),
        preset(&[
            ("refraction_strength", Number(25.0)),
            ("frost", Number(0.0)),
            ("chromatic_enabled", Flag(false)),
            ("tint", Color([1.0, 1.0, 1.0, 0.10])),
            ("corner_radius", Number(30.0)),
        ]),
    );
    presets.insert(
        "frosted".to_string(),
        preset(&[
            ("refraction_strength", Number(12.0)),
            ("frost", Number(6.0)),
            ("chromatic_enabled", Flag(false)),
            ("tint", Color([0.95, 0.97, 1.0, 0.35])),
            ("top_shadow_opacity", Number(0.15)),
            ("corner_radius", Number(40.0)),
        ]),
    );
    presets.insert(
        "prism".to_string(),
        preset(&[
            ("refraction_strength", Number(45.0)),
            ("frost", Number(0.0)),
            ("chromatic_enabled", Flag(true)),
            ("chromatic_amount", Number(8.0)),
            ("tint", Color([0.85, 0.9, 1.0, 0.05])),
            ("edge_thickness", Number(60.0)),
        ]),
    );
    presets
}

impl GlassConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or defaults if it doesn't exist or can't be parsed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Environment variables take precedence over the config file.
    pub fn merge_with_env(&mut self) {
        if let Ok(val) = std::env::var("GLASS_WIDTH") {
            if let Ok(width) = val.parse::<usize>() {
                self.window.width = width;
            }
        }
        if let Ok(val) = std::env::var("GLASS_HEIGHT") {
            if let Ok(height) = val.parse::<usize>() {
                self.window.height = height;
            }
        }
        if let Ok(title) = std::env::var("GLASS_TITLE") {
            self.window.title = title;
        }
    }

    /// File (or defaults) first, then environment overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let mut config = Self::load_or_default(path);
        config.merge_with_env();
        config
    }

    pub fn preset(&self, name: &str) -> Result<&ParamMap, Error> {
        self.presets
            .get(name)
            .ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    /// Preset names in key order (what the 1-9 keys map to).
    pub fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    pub fn canvas(&self) -> Vec2 {
        Vec2::new(self.window.width as f32, self.window.height as f32)
    }
}
