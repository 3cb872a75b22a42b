// "Behind the glass": page color, procedural grid lines, then up to 8 images.
// Visual expectation: what you see wherever no glass panel sits, and what
// every panel refracts/frosts when it looks through itself.

use crate::error::Error;
use crate::raster::Raster;
use crate::types::{Rgba, Vec2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MAX_IMAGES: usize = 8;

/// Procedural grid over a flat page color. Derived per pixel, no state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub spacing: f32,
    pub line_color: Rgba,
    pub background_color: Rgba,
    pub visible: bool,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            spacing: 25.0,
            line_color: Rgba::new(0.82, 0.84, 0.88, 1.0),
            background_color: Rgba::new(0.96, 0.96, 0.97, 1.0),
            visible: true,
        }
    }
}

impl Grid {
    /// Page color, overwritten by the line color within 1px of every multiple of spacing.
    pub fn color_at(&self, p: Vec2) -> Rgba {
        if self.visible && self.spacing > 0.0 {
            let gx = p.x.rem_euclid(self.spacing);
            let gy = p.y.rem_euclid(self.spacing);
            if gx < 1.0 || gy < 1.0 {
                return self.line_color;
            }
        }
        self.background_color
    }
}

/// One uploaded image placed in the scene (lower-left origin).
#[derive(Clone, Debug)]
pub struct BackgroundImage {
    pub raster: Arc<Raster>,
    pub position: Vec2,
    pub size: Vec2,
    /// width / height, kept when resizing.
    pub aspect: f32,
}

impl BackgroundImage {
    /// Place a raster at `position`, `width` wide, height from its aspect ratio.
    pub fn new(raster: Arc<Raster>, position: Vec2, width: f32) -> Self {
        let aspect = raster.aspect();
        Self {
            raster,
            position,
            size: Vec2::new(width, width / aspect),
            aspect,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.position.x
            && p.y >= self.position.y
            && p.x <= self.position.x + self.size.x
            && p.y <= self.position.y + self.size.y
    }

    /// Change the width and derive the height so proportions never drift.
    pub fn resize_width(&mut self, width: f32) {
        let width = width.max(1.0);
        self.size = Vec2::new(width, width / self.aspect);
    }

    /// Raster color at scene point `p`. Image rows run top-down, the scene runs
    /// bottom-up, so v is flipped.
    pub fn sample(&self, p: Vec2) -> Rgba {
        let u = (p.x - self.position.x) / self.size.x;
        let v = 1.0 - (p.y - self.position.y) / self.size.y;
        self.raster.sample(u, v)
    }
}

/// Everything behind the glass. Read-only while a frame renders.
#[derive(Clone, Debug, Default)]
pub struct Background {
    pub grid: Grid,
    images: Vec<BackgroundImage>,
}

impl Background {
    pub fn new(grid: Grid) -> Self {
        Self { grid, images: Vec::with_capacity(MAX_IMAGES) }
    }

    /// Images bottom (index 0) to top.
    pub fn images(&self) -> &[BackgroundImage] {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut [BackgroundImage] {
        &mut self.images
    }

    /// Append on top of the stack; a ninth image is refused.
    pub fn push(&mut self, image: BackgroundImage) -> Result<usize, Error> {
        if self.images.len() >= MAX_IMAGES {
            return Err(Error::TooManyImages { max: MAX_IMAGES });
        }
        self.images.push(image);
        Ok(self.images.len() - 1)
    }

    /// Remove one entry; its raster is freed once the last frame holding it drops.
    pub fn remove(&mut self, index: usize) -> Result<BackgroundImage, Error> {
        if index >= self.images.len() {
            return Err(Error::NoSuchImage(index));
        }
        Ok(self.images.remove(index))
    }

    /// Composite color at `p`: page, grid, then images in ascending order.
    pub fn sample(&self, p: Vec2) -> Rgba {
        let mut color = self.grid.color_at(p);
        for image in &self.images {
            if image.contains(p) {
                color = Rgba::over(image.sample(p), color);
            }
        }
        color
    }
}
