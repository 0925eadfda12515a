//! Tweens kept in a side table and evaluated against one clock.
//!
//! A track's phase and value are pure functions of the time passed to
//! [`Tweens::advance`]; nothing arms a timer, so clearing the table is the
//! whole teardown.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::hash::Hash;

use crate::color::lerp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicInOut,
    SineInOut,
}

impl Easing {
    /// Maps progress `t` in `[0, 1]` onto the eased curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Easing::SineInOut => 0.5 * (1.0 - (PI * t).cos()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    Loop,
    /// Alternate direction every cycle.
    PingPong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
    pub repeat: Repeat,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            duration_ms,
            delay_ms: 0.0,
            easing: Easing::Linear,
            repeat: Repeat::Once,
        }
    }

    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Phase and value `local_ms` after the tween was started.
    pub fn sample(&self, local_ms: f64) -> (TweenPhase, f64) {
        let active_ms = local_ms - self.delay_ms;
        if active_ms < 0.0 {
            return (TweenPhase::Waiting, self.from);
        }
        if self.duration_ms <= 0.0 {
            return match self.repeat {
                Repeat::Once => (TweenPhase::Finished, self.to),
                _ => (TweenPhase::Running, self.to),
            };
        }

        let cycles = active_ms / self.duration_ms;
        let (phase, progress) = match self.repeat {
            Repeat::Once if cycles >= 1.0 => (TweenPhase::Finished, 1.0),
            Repeat::Once => (TweenPhase::Running, cycles),
            Repeat::Loop => (TweenPhase::Running, cycles.fract()),
            Repeat::PingPong => {
                let forward = (cycles.floor() as u64) % 2 == 0;
                let fract = cycles.fract();
                (TweenPhase::Running, if forward { fract } else { 1.0 - fract })
            }
        };
        (phase, lerp(self.from, self.to, self.easing.apply(progress)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenPhase {
    Waiting,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
struct Track {
    tween: Tween,
    started_at: f64,
    phase: TweenPhase,
    value: f64,
}

/// Per-object animation state, keyed by object identity.
#[derive(Debug, Clone)]
pub struct Tweens<K> {
    tracks: HashMap<K, Track>,
}

impl<K> Default for Tweens<K> {
    fn default() -> Self {
        Self {
            tracks: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tweens<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `tween` for `key` at `now_ms`, replacing any running one.
    pub fn insert(&mut self, key: K, tween: Tween, now_ms: f64) {
        let (phase, value) = tween.sample(0.0);
        self.tracks.insert(
            key,
            Track {
                tween,
                started_at: now_ms,
                phase,
                value,
            },
        );
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        self.tracks.remove(key).is_some()
    }

    pub fn value(&self, key: &K) -> Option<f64> {
        self.tracks.get(key).map(|track| track.value)
    }

    pub fn phase(&self, key: &K) -> Option<TweenPhase> {
        self.tracks.get(key).map(|track| track.phase)
    }

    /// Moves every track to `now_ms`. Returns the keys that finished in this
    /// step; finished tracks keep their final value until removed.
    pub fn advance(&mut self, now_ms: f64) -> Vec<K> {
        let mut finished = Vec::new();
        for (key, track) in self.tracks.iter_mut() {
            if track.phase == TweenPhase::Finished {
                continue;
            }
            let (phase, value) = track.tween.sample(now_ms - track.started_at);
            if phase == TweenPhase::Finished {
                finished.push(key.clone());
            }
            track.phase = phase;
            track.value = value;
        }
        finished
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
