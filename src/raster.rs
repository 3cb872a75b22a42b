// Decodes uploaded image files into read-only rasters the background stage samples.
// Visual expectation: once loaded, a raster is immutable for its whole life;
// removing its background entry drops the last handle and frees the pixels.

use crate::error::Error;
use crate::types::Rgba;
use image::{DynamicImage, RgbaImage};
use std::fmt;
use std::path::Path;

/// Straight-alpha RGBA pixels, row 0 = top of the image.
pub struct Raster {
    width: u32,
    height: u32,
    texels: Vec<Rgba>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Raster({}x{})", self.width, self.height)
    }
}

impl Raster {
    /// Open + decode any format the `image` crate was built with.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let img = image::open(path).map_err(|source| Error::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(&img))
    }

    pub fn from_image(img: &DynamicImage) -> Self {
        Self::from_rgba8(&img.to_rgba8())
    }

    pub fn from_rgba8(img: &RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        let mut texels = Vec::with_capacity((w as usize) * (h as usize));
        for (_x, _y, pixel) in img.enumerate_pixels() {
            texels.push(Rgba::new(
                pixel[0] as f32 / 255.0,
                pixel[1] as f32 / 255.0,
                pixel[2] as f32 / 255.0,
                pixel[3] as f32 / 255.0,
            ));
        }
        Self { width: w, height: h, texels }
    }

    /// A single-color raster; handy for tests and placeholder tiles.
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            texels: vec![color; (width as usize) * (height as usize)],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Width / height, used to keep proportions on resize.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 { 1.0 } else { self.width as f32 / self.height as f32 }
    }

    #[inline]
    fn texel(&self, x: i64, y: i64) -> Rgba {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.texels[y * self.width as usize + x]
    }

    /// Bilinear lookup at `uv` in [0,1]², clamp-to-edge, v = 0 at the top row.
    pub fn sample(&self, u: f32, v: f32) -> Rgba {
        if self.texels.is_empty() {
            return Rgba::TRANSPARENT;
        }
        // texel centers sit at half-integers
        let fx = u * self.width as f32 - 0.5;
        let fy = v * self.height as f32 - 0.5;
        let x0 = fx.floor();
        let y0 = fy.floor();
        let tx = fx - x0;
        let ty = fy - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).mix(self.texel(x0 + 1, y0), tx);
        let bottom = self.texel(x0, y0 + 1).mix(self.texel(x0 + 1, y0 + 1), tx);
        top.mix(bottom, ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba as Px;

    #[test]
    fn decodes_top_row_first() {
        let mut img = RgbaImage::new(1, 2);
        img.put_pixel(0, 0, Px([255, 0, 0, 255]));
        img.put_pixel(0, 1, Px([0, 0, 255, 255]));
        let r = Raster::from_rgba8(&img);
        assert_eq!(r.sample(0.5, 0.25), Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(r.sample(0.5, 0.75), Rgba::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn sampling_blends_between_texel_centers() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Px([0, 0, 0, 255]));
        img.put_pixel(1, 0, Px([255, 255, 255, 255]));
        let r = Raster::from_rgba8(&img);
        let mid = r.sample(0.5, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-5);
        // clamp-to-edge outside the centers
        assert_eq!(r.sample(0.0, 0.5).r, 0.0);
        assert_eq!(r.sample(1.0, 0.5).r, 1.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = match Raster::load(Path::new("/definitely/not/here.png")) {
            Err(e) => e,
            Ok(_) => panic!("expected a decode error"),
        };
        assert!(err.to_string().contains("not/here.png"));
    }
}
