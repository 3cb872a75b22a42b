// Edge-band refraction: pixels near a panel's rim fetch the background from a
// displaced coordinate, optionally with a different displacement per channel.

use crate::background::Background;
use crate::types::{Rgba, Vec2};
use std::f32::consts::FRAC_1_SQRT_2;

/// Below this distance from the center the direction is undefined.
const DEGENERATE_DISTANCE: f32 = 1e-3;

/// Amounts under this are treated as off.
pub const MIN_EFFECT_AMOUNT: f32 = 0.001;

/// Unit vector from `p` toward `center`; a fixed 45° vector at the center itself.
#[inline]
pub fn direction_to_center(p: Vec2, center: Vec2) -> Vec2 {
    let d = center - p;
    let len = d.length();
    if len < DEGENERATE_DISTANCE {
        return Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    }
    d * (1.0 / len)
}

/// `strength * u^2`: zero on the inner edge of the band, full at the rim.
#[inline]
pub fn offset_magnitude(u: f32, strength: f32) -> f32 {
    strength * u * u
}

/// Displacement magnitudes for each color channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelOffsets {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl ChannelOffsets {
    pub fn uniform(magnitude: f32) -> Self {
        Self { red: magnitude, green: magnitude, blue: magnitude }
    }

    /// Spread red in and blue out by half the aberration amount each.
    pub fn chromatic(magnitude: f32, amount: f32) -> Self {
        let half = amount * 0.5;
        Self {
            red: (magnitude - half).max(0.0),
            green: magnitude,
            blue: magnitude + half,
        }
    }
}

/// How one pixel fetches its background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Refraction {
    pub direction: Vec2,
    pub offsets: ChannelOffsets,
    /// Fetch each channel separately.
    pub split_channels: bool,
}

impl Refraction {
    /// No displacement at all (flat interior).
    pub fn none() -> Self {
        Self {
            direction: Vec2::ZERO,
            offsets: ChannelOffsets::uniform(0.0),
            split_channels: false,
        }
    }

    /// Edge-band refraction at normalized position `u` for a panel centered at `center`.
    /// `chromatic` is the aberration amount, or `None` when the effect is off.
    pub fn at(p: Vec2, center: Vec2, u: f32, strength: f32, chromatic: Option<f32>) -> Self {
        let direction = direction_to_center(p, center);
        let magnitude = offset_magnitude(u, strength);
        match chromatic {
            Some(amount) if amount >= MIN_EFFECT_AMOUNT => Self {
                direction,
                offsets: ChannelOffsets::chromatic(magnitude, amount),
                split_channels: true,
            },
            _ => Self {
                direction,
                offsets: ChannelOffsets::uniform(magnitude),
                split_channels: false,
            },
        }
    }

    /// Background coordinate for a displacement magnitude.
    #[inline]
    pub fn sample_coord(&self, p: Vec2, magnitude: f32) -> Vec2 {
        p - self.direction * magnitude
    }

    /// Background color seen through the glass at `p`. Alpha comes from the green fetch.
    pub fn lookup(&self, background: &Background, p: Vec2) -> Rgba {
        let green = background.sample(self.sample_coord(p, self.offsets.green));
        if !self.split_channels {
            return green;
        }
        let red = background.sample(self.sample_coord(p, self.offsets.red));
        let blue = background.sample(self.sample_coord(p, self.offsets.blue));
        Rgba::new(red.r, green.g, blue.b, green.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_points_at_center() {
        let d = direction_to_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert_eq!(d, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn degenerate_direction_falls_back_to_diagonal() {
        let c = Vec2::new(400.0, 300.0);
        let d = direction_to_center(c, c);
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert_eq!(d.x, d.y);
    }

    #[test]
    fn magnitude_follows_square_curve() {
        assert_eq!(offset_magnitude(0.0, 25.0), 0.0);
        assert_eq!(offset_magnitude(0.5, 25.0), 6.25);
        assert_eq!(offset_magnitude(1.0, 25.0), 25.0);
    }

    #[test]
    fn chromatic_offsets_are_ordered() {
        for &m in &[0.0, 0.3, 2.0, 25.0] {
            for &a in &[0.0, 0.5, 1.0, 4.0, 60.0] {
                let o = ChannelOffsets::chromatic(m, a);
                assert!(o.red <= o.green && o.green <= o.blue, "m={m} a={a}");
                assert!(o.red >= 0.0);
            }
        }
    }

    #[test]
    fn tiny_chromatic_amount_is_ignored() {
        let r = Refraction::at(Vec2::ZERO, Vec2::new(5.0, 0.0), 1.0, 10.0, Some(0.0001));
        assert!(!r.split_channels);
        assert_eq!(r.offsets, ChannelOffsets::uniform(10.0));
    }

    #[test]
    fn flat_interior_samples_in_place() {
        let p = Vec2::new(123.0, 45.0);
        assert_eq!(Refraction::none().sample_coord(p, 0.0), p);
    }
}
