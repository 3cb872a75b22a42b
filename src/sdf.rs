// Signed distance to an axis-aligned rounded rectangle, plus the small
// shader-style helpers (smoothstep) the other stages lean on.

use crate::types::Vec2;

/// Clamp a corner radius to half the shorter side of a `size` (full extents) box.
/// Never stored clamped; callers clamp at read time.
#[inline]
pub fn clamp_corner_radius(radius: f32, size: Vec2) -> f32 {
    radius.min(size.min_element() * 0.5).max(0.0)
}

/// Rounded-box SDF. `p` is relative to the box center, `half` are half-extents,
/// `r` is an already-clamped corner radius. Negative inside, 0 on the boundary.
#[inline]
pub fn rounded_box(p: Vec2, half: Vec2, r: f32) -> f32 {
    // shrink the box by r, then add the rounded corner back
    let q = p.abs() - half + Vec2::new(r, r);
    q.max(0.0).length() + q.max_element().min(0.0) - r
}

/// Hermite smoothstep. A zero-width range degrades to a hard step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_inside_by_shortest_half_extent() {
        let d = rounded_box(Vec2::ZERO, Vec2::new(150.0, 100.0), 30.0);
        assert!((d + 100.0).abs() < 1e-4);
    }

    #[test]
    fn straight_edge_is_on_boundary() {
        let d = rounded_box(Vec2::new(-150.0, 0.0), Vec2::new(150.0, 100.0), 30.0);
        assert!(d.abs() < 1e-4);
    }

    #[test]
    fn rounded_corner_pulls_boundary_inward() {
        // The sharp corner point lies outside once the corner is rounded.
        let d = rounded_box(Vec2::new(150.0, 100.0), Vec2::new(150.0, 100.0), 30.0);
        let expected = (2.0f32 * 30.0 * 30.0).sqrt() - 30.0;
        assert!((d - expected).abs() < 1e-3);
    }

    #[test]
    fn radius_is_clamped_to_half_shorter_side() {
        assert_eq!(clamp_corner_radius(500.0, Vec2::new(100.0, 80.0)), 40.0);
        assert_eq!(clamp_corner_radius(12.0, Vec2::new(100.0, 80.0)), 12.0);
        assert_eq!(clamp_corner_radius(-3.0, Vec2::new(100.0, 80.0)), 0.0);
    }

    #[test]
    fn smoothstep_handles_degenerate_range() {
        assert_eq!(smoothstep(0.0, 0.0, -1.0), 0.0);
        assert_eq!(smoothstep(0.0, 0.0, 0.5), 1.0);
        assert_eq!(smoothstep(0.0, 2.0, 1.0), 0.5);
    }
}
