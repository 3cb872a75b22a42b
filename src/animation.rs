//! Parameter tweening between a captured start snapshot and a target snapshot.
//!
//! One animation at a time: starting a new one while another is in flight
//! drops the old one and captures the start values from wherever the scene
//! currently is. The host calls [`Animator::tick`] once per frame.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::mem;
use std::time::{Duration, Instant};

/// Fixed tween length.
pub const DURATION: Duration = Duration::from_secs(1);

/// Value of one named scene parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f32),
    /// RGBA tint-style vector, interpolated per component.
    Color([f32; 4]),
    /// Anything without a meaningful in-between; snaps to the target.
    Text(String),
}

/// Flat name -> value map.
pub type ParamMap = BTreeMap<String, ParamValue>;

/// Anything whose parameters can be read and written by name.
pub trait ParamTarget {
    fn get_param(&self, name: &str) -> Option<ParamValue>;
    /// Returns false when the name is unknown or the value has the wrong shape.
    fn set_param(&mut self, name: &str, value: &ParamValue) -> bool;
}

/// Parameter values captured at one instant.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub values: ParamMap,
    pub captured_at: Instant,
}

impl Snapshot {
    /// Read the current value of every name in `names` from `target`.
    pub fn capture<'a, T, I>(target: &T, names: I, now: Instant) -> Self
    where
        T: ParamTarget + ?Sized,
        I: IntoIterator<Item = &'a String>,
    {
        let values = names
            .into_iter()
            .filter_map(|name| target.get_param(name).map(|v| (name.clone(), v)))
            .collect();
        Self { values, captured_at: now }
    }
}

/// Ease-in-out cubic: slow start, fast middle, slow end.
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Value between `from` and `to` at eased progress `t`.
/// Numbers and colors lerp, flags switch at the midpoint, the rest snap.
pub fn interpolate(from: &ParamValue, to: &ParamValue, t: f32) -> ParamValue {
    match (from, to) {
        (ParamValue::Number(a), ParamValue::Number(b)) => ParamValue::Number(lerp(*a, *b, t)),
        (ParamValue::Color(a), ParamValue::Color(b)) => {
            ParamValue::Color(std::array::from_fn(|i| lerp(a[i], b[i], t)))
        }
        (ParamValue::Flag(a), ParamValue::Flag(b)) => ParamValue::Flag(if t < 0.5 { *a } else { *b }),
        _ => to.clone(),
    }
}

/// One in-flight tween.
#[derive(Clone, Debug)]
pub struct Tween {
    pub start: Snapshot,
    pub target: ParamMap,
    pub duration: Duration,
}

impl Tween {
    /// Linear progress in [0,1] at `now`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start.captured_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Every animated value at linear `progress`. At 1 this is the target, exactly.
    pub fn values_at(&self, progress: f32) -> ParamMap {
        if progress >= 1.0 {
            return self.target.clone();
        }
        let eased = ease_in_out_cubic(progress.clamp(0.0, 1.0));
        self.target
            .iter()
            .map(|(name, to)| {
                let value = match self.start.values.get(name) {
                    Some(from) => interpolate(from, to, eased),
                    None => to.clone(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

/// Idle -> Animating -> Idle.
#[derive(Clone, Debug, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Animating(Tween),
}

#[derive(Debug)]
pub struct Animator {
    state: AnimationState,
    duration: Duration,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator {
    pub fn new() -> Self {
        Self::with_duration(DURATION)
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self { state: AnimationState::Idle, duration }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating(_))
    }

    /// Linear progress of the running animation, `None` when idle.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        match &self.state {
            AnimationState::Animating(tween) => Some(tween.progress(now)),
            AnimationState::Idle => None,
        }
    }

    /// Begin tweening `target`'s parameters toward `values`, cancelling any
    /// animation already running. Names the target doesn't know, or whose
    /// value has a different shape than the current one, are dropped here
    /// so ticks never write them.
    pub fn start<T>(&mut self, target: &T, mut values: ParamMap, now: Instant)
    where
        T: ParamTarget + ?Sized,
    {
        values.retain(|name, value| match target.get_param(name) {
            Some(current) if mem::discriminant(&current) == mem::discriminant(value) => true,
            Some(current) => {
                tracing::warn!(name, ?value, ?current, "dropping animated parameter with mismatched type");
                false
            }
            None => {
                tracing::warn!(name, "dropping unknown animated parameter");
                false
            }
        });
        if self.is_animating() {
            tracing::debug!("cancelling in-flight animation");
        }
        let start = Snapshot::capture(target, values.keys(), now);
        tracing::info!(params = values.len(), "animation started");
        self.state = AnimationState::Animating(Tween {
            start,
            target: values,
            duration: self.duration,
        });
    }

    /// Drop the running animation, leaving parameters where they are.
    pub fn cancel(&mut self) {
        self.state = AnimationState::Idle;
    }

    /// Push this frame's values into `target`. Returns true while still animating.
    pub fn tick<T>(&mut self, target: &mut T, now: Instant) -> bool
    where
        T: ParamTarget + ?Sized,
    {
        let AnimationState::Animating(tween) = &self.state else {
            return false;
        };
        let progress = tween.progress(now);
        for (name, value) in tween.values_at(progress) {
            target.set_param(&name, &value);
        }
        if progress >= 1.0 {
            tracing::info!("animation finished");
            self.state = AnimationState::Idle;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Params(ParamMap);

    impl ParamTarget for Params {
        fn get_param(&self, name: &str) -> Option<ParamValue> {
            self.0.get(name).cloned()
        }
        fn set_param(&mut self, name: &str, value: &ParamValue) -> bool {
            self.0.insert(name.to_string(), value.clone());
            true
        }
    }

    fn map(entries: &[(&str, ParamValue)]) -> ParamMap {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn start_values() -> Params {
        Params(map(&[
            ("strength", ParamValue::Number(10.0)),
            ("tint", ParamValue::Color([0.0, 0.0, 0.0, 0.1])),
            ("chromatic", ParamValue::Flag(false)),
            ("label", ParamValue::Text("a".into())),
        ]))
    }

    fn target_values() -> ParamMap {
        map(&[
            ("strength", ParamValue::Number(0.3)),
            ("tint", ParamValue::Color([1.0, 0.5, 0.25, 0.7])),
            ("chromatic", ParamValue::Flag(true)),
            ("label", ParamValue::Text("b".into())),
        ])
    }

    #[test]
    fn easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!(ease_in_out_cubic(0.25) < 0.25);
        assert!(ease_in_out_cubic(0.75) > 0.75);
    }

    #[test]
    fn progress_zero_equals_start_snapshot() {
        let params = start_values();
        let t0 = Instant::now();
        let mut anim = Animator::new();
        anim.start(&params, target_values(), t0);
        let AnimationState::Animating(tween) = anim.state() else { panic!("not animating") };
        let values = tween.values_at(0.0);
        assert_eq!(values["strength"], ParamValue::Number(10.0));
        assert_eq!(values["tint"], ParamValue::Color([0.0, 0.0, 0.0, 0.1]));
        assert_eq!(values["chromatic"], ParamValue::Flag(false));
        // non-interpolable values snap straight away
        assert_eq!(values["label"], ParamValue::Text("b".into()));
    }

    #[test]
    fn flags_switch_at_half_progress() {
        let params = start_values();
        let mut anim = Animator::new();
        anim.start(&params, target_values(), Instant::now());
        let AnimationState::Animating(tween) = anim.state() else { panic!("not animating") };
        assert_eq!(tween.values_at(0.49)["chromatic"], ParamValue::Flag(false));
        assert_eq!(tween.values_at(0.5)["chromatic"], ParamValue::Flag(true));
    }

    #[test]
    fn finishing_writes_exact_target_and_goes_idle() {
        let mut params = start_values();
        let t0 = Instant::now();
        let mut anim = Animator::new();
        anim.start(&params, target_values(), t0);

        assert!(anim.tick(&mut params, t0 + Duration::from_millis(300)));
        assert_eq!(anim.progress(t0 + Duration::from_millis(300)), Some(0.3));

        assert!(!anim.tick(&mut params, t0 + Duration::from_millis(1000)));
        assert!(!anim.is_animating());
        assert_eq!(anim.progress(t0), None);
        for (name, value) in target_values() {
            assert_eq!(params.0[&name], value, "{name} not exact");
        }
    }

    #[test]
    fn midway_values_are_between_endpoints() {
        let mut params = start_values();
        let t0 = Instant::now();
        let mut anim = Animator::new();
        anim.start(&params, target_values(), t0);
        anim.tick(&mut params, t0 + Duration::from_millis(500));
        let ParamValue::Number(s) = params.0["strength"] else { panic!("wrong type") };
        assert!(s < 10.0 && s > 0.3);
        let ParamValue::Color(c) = params.0["tint"] else { panic!("wrong type") };
        assert!((c[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn restarting_cancels_and_captures_current_values() {
        let mut params = start_values();
        let t0 = Instant::now();
        let mut anim = Animator::new();
        anim.start(&params, target_values(), t0);
        let mid = t0 + Duration::from_millis(500);
        anim.tick(&mut params, mid);
        let halfway = params.0["strength"].clone();

        let back = map(&[("strength", ParamValue::Number(10.0))]);
        anim.start(&params, back, mid);
        let AnimationState::Animating(tween) = anim.state() else { panic!("not animating") };
        assert_eq!(tween.start.values["strength"], halfway);
        assert_eq!(tween.target.len(), 1);
        assert_eq!(tween.progress(mid), 0.0);
    }

    #[test]
    fn cancel_leaves_values_where_they_are() {
        let mut params = start_values();
        let t0 = Instant::now();
        let mut anim = Animator::new();
        anim.start(&params, target_values(), t0);
        anim.tick(&mut params, t0 + Duration::from_millis(250));
        let partial = params.0["strength"].clone();
        anim.cancel();
        assert!(!anim.tick(&mut params, t0 + Duration::from_secs(2)));
        assert_eq!(params.0["strength"], partial);
    }

    #[test]
    fn unknown_and_mistyped_targets_are_dropped_at_start() {
        let mut params = start_values();
        let mut target = target_values();
        target.insert("bogus".into(), ParamValue::Number(1.0));
        target.insert("strength".into(), ParamValue::Flag(true));
        let t0 = Instant::now();
        let mut anim = Animator::new();
        anim.start(&params, target, t0);

        let AnimationState::Animating(tween) = anim.state() else { panic!("not animating") };
        assert!(!tween.target.contains_key("bogus"));
        assert!(!tween.target.contains_key("strength"));
        assert_eq!(tween.target.len(), 3);

        anim.tick(&mut params, t0 + Duration::from_secs(1));
        assert!(!params.0.contains_key("bogus"));
        assert_eq!(params.0["strength"], ParamValue::Number(10.0));
        assert_eq!(params.0["chromatic"], ParamValue::Flag(true));
    }

    #[test]
    fn tick_while_idle_does_nothing() {
        let mut params = start_values();
        let mut anim = Animator::new();
        assert!(!anim.tick(&mut params, Instant::now()));
        assert_eq!(params.0["strength"], ParamValue::Number(10.0));
    }

    #[test]
    fn params_parse_from_toml_values() {
        #[derive(Deserialize)]
        struct Doc {
            p: ParamMap,
        }
        let doc: Doc = toml::from_str(
            "[p]\nfrost = 4\nchromatic_enabled = true\ntint = [1.0, 0.9, 0.8, 0.2]\nname = \"x\"\n",
        )
        .unwrap();
        assert_eq!(doc.p["frost"], ParamValue::Number(4.0));
        assert_eq!(doc.p["chromatic_enabled"], ParamValue::Flag(true));
        assert_eq!(doc.p["tint"], ParamValue::Color([1.0, 0.9, 0.8, 0.2]));
        assert_eq!(doc.p["name"], ParamValue::Text("x".into()));
    }
}
