// Glass surfaces and the outside / flat-interior / edge-band classifier.

use crate::sdf::{clamp_corner_radius, rounded_box};
use crate::types::Vec2;
use serde::{Deserialize, Serialize};

/// Bands thinner than this are treated as zero width.
pub const MIN_EDGE_THICKNESS: f32 = 0.001;

/// The fixed set of surfaces a scene carries, in resolution priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    ControlPanel,
    AddImageButton,
    GridControlsPanel,
    MainGlass,
}

impl SurfaceKind {
    /// First match wins when surfaces overlap.
    pub const PRIORITY: [SurfaceKind; 4] = [
        SurfaceKind::ControlPanel,
        SurfaceKind::AddImageButton,
        SurfaceKind::GridControlsPanel,
        SurfaceKind::MainGlass,
    ];
}

/// One rounded-rectangle glass panel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Surface {
    pub center: Vec2,
    /// Full width/height.
    pub size: Vec2,
    /// As set by the user; clamped on read by [`Surface::radius`].
    pub corner_radius: f32,
    pub edge_thickness: f32,
    pub visible: bool,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            center: Vec2::new(400.0, 300.0),
            size: Vec2::new(300.0, 200.0),
            corner_radius: 30.0,
            edge_thickness: 40.0,
            visible: true,
        }
    }
}

/// Where a pixel falls relative to one surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Zone {
    Outside,
    FlatInterior,
    /// `u` runs 0 (innermost) to 1 (boundary).
    EdgeBand { u: f32 },
}

impl Surface {
    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Corner radius clamped to half the shorter side.
    #[inline]
    pub fn radius(&self) -> f32 {
        clamp_corner_radius(self.corner_radius, self.size)
    }

    /// Signed distance from scene point `p` to this surface's boundary.
    #[inline]
    pub fn sdf(&self, p: Vec2) -> f32 {
        rounded_box(p - self.center, self.half_extents(), self.radius())
    }

    /// Signed distance with the query point shifted by `shift` first.
    #[inline]
    pub fn sdf_shifted(&self, p: Vec2, shift: Vec2) -> f32 {
        self.sdf(p + shift)
    }

    /// Containment used by surface selection. The boundary itself (`d == 0`)
    /// does not select the surface.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.visible && self.sdf(p) < 0.0
    }

    #[inline]
    pub fn classify(&self, p: Vec2) -> Zone {
        classify(self.sdf(p), self.edge_thickness)
    }
}

/// Classify an SDF value against an edge band of thickness `t`.
pub fn classify(d: f32, t: f32) -> Zone {
    if d > 0.0 {
        return Zone::Outside;
    }
    match edge_position(d, t) {
        Some(u) => Zone::EdgeBand { u },
        None => Zone::FlatInterior,
    }
}

/// Normalized edge-band position for `d` in `(-t, 0]`, `None` elsewhere
/// (including every `d` when the band is thinner than [`MIN_EDGE_THICKNESS`]).
pub fn edge_position(d: f32, t: f32) -> Option<f32> {
    if t < MIN_EDGE_THICKNESS || d <= -t || d > 0.0 {
        return None;
    }
    Some(((d + t) / t).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_three_zones() {
        assert_eq!(classify(1.0, 40.0), Zone::Outside);
        assert_eq!(classify(-40.0, 40.0), Zone::FlatInterior);
        assert_eq!(classify(-100.0, 40.0), Zone::FlatInterior);
        assert_eq!(classify(-20.0, 40.0), Zone::EdgeBand { u: 0.5 });
        assert_eq!(classify(0.0, 40.0), Zone::EdgeBand { u: 1.0 });
    }

    #[test]
    fn edge_position_is_monotonic_over_band() {
        let t = 40.0;
        let mut last = 0.0;
        for i in 1..=400 {
            let d = -t + t * (i as f32) / 400.0;
            let u = edge_position(d, t).unwrap();
            assert!(u >= last, "u decreased at d={d}");
            last = u;
        }
        assert_eq!(edge_position(0.0, t), Some(1.0));
        // just inside the band's inner edge
        assert!(edge_position(-t + 1e-3, t).unwrap() < 1e-3);
    }

    #[test]
    fn thin_band_has_no_edge_zone() {
        assert_eq!(classify(0.0, 0.0005), Zone::FlatInterior);
        assert_eq!(classify(-0.0001, 0.0), Zone::FlatInterior);
        assert_eq!(classify(0.5, 0.0), Zone::Outside);
    }

    #[test]
    fn oversized_radius_is_clamped_before_sdf() {
        let s = Surface {
            center: Vec2::new(0.0, 0.0),
            size: Vec2::new(100.0, 80.0),
            corner_radius: 500.0,
            edge_thickness: 10.0,
            visible: true,
        };
        assert_eq!(s.radius(), 40.0);
        // Fully rounded short sides: the top-center point sits on the boundary.
        assert!(s.sdf(Vec2::new(0.0, 40.0)).abs() < 1e-4);
        assert_eq!(s.corner_radius, 500.0);
    }

    #[test]
    fn hidden_surface_contains_nothing() {
        let s = Surface { visible: false, ..Surface::default() };
        assert!(!s.contains(s.center));
    }
}
