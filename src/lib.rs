//! Liquid glass compositor
//!
//! Per-pixel rendering of translucent rounded-rectangle panels that refract,
//! frost, tint and shadow whatever sits behind them (a procedural grid plus
//! uploaded images), and a tween engine that animates the panel parameters.
//!
//! The entry point is [`evaluate_pixel`]: a pure function of a point and an
//! immutable [`Scene`]. [`render`] scans it over a whole frame.

pub mod animation;
pub mod background;
pub mod compositor;
pub mod config;
pub mod draw;
pub mod error;
pub mod frost;
pub mod raster;
pub mod refraction;
pub mod scene;
pub mod sdf;
pub mod shadow;
pub mod surface;
pub mod types;

pub use animation::{Animator, ParamMap, ParamTarget, ParamValue};
pub use compositor::{evaluate_pixel, render, save_png};
pub use config::GlassConfig;
pub use error::Error;
pub use scene::Scene;
pub use types::{FrameBuffer, Rgba, Vec2};
