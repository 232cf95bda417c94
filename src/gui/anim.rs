//! Time-driven eased scalars sampled from the render path.
//!
//! An [`Interpolator`] never ticks on its own: its value is a pure function of the
//! start value, the target, the instant the ease began, the duration and the easing
//! curve, evaluated whenever somebody asks.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    #[default]
    EaseOutCubic,
}

impl Easing {
    /// Maps linear progress to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutQuad => 1.0 - (1.0 - t).powi(2),
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Interpolator {
    start: f64,
    target: f64,
    start_time: Instant,
    duration: Duration,
    easing: Easing,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}

impl Interpolator {
    pub fn new(easing: Easing) -> Self {
        Self {
            start: 0.0,
            target: 0.0,
            start_time: Instant::now(),
            duration: Duration::ZERO,
            easing,
        }
    }

    /// Begins easing from the current value towards `target`.
    pub fn interpolate_to(&mut self, target: f64, duration: Duration) {
        self.interpolate_to_at(target, duration, Instant::now());
    }

    pub fn interpolate_to_at(&mut self, target: f64, duration: Duration, now: Instant) {
        self.start = self.value_at(now);
        self.target = target;
        self.start_time = now;
        self.duration = duration;
    }

    /// Jumps straight to `value`, cancelling any ease in flight.
    pub fn force_value(&mut self, value: f64) {
        self.start = value;
        self.target = value;
        self.start_time = Instant::now();
        self.duration = Duration::ZERO;
    }

    pub fn value(&self) -> f64 {
        self.value_at(Instant::now())
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        let progress = self.progress_at(now);
        if progress >= 1.0 {
            return self.target;
        }
        self.start + (self.target - self.start) * self.easing.apply(progress)
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn started_at(&self) -> Instant {
        self.start_time
    }

    pub fn is_settled(&self) -> bool {
        self.progress_at(Instant::now()) >= 1.0
    }

    fn progress_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}
