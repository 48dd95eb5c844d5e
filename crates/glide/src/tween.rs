use crate::ease::{Ease, lerp};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    /// Extra iterations after the first one.
    Times(u32),
    Forever,
}

/// A single property interpolation. Built with [`Tween::to`] and the builder
/// methods, then handed to an animator or added to a timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T, P> {
    pub target: T,
    pub prop: P,
    pub from: Option<f64>,
    pub to: f64,
    pub duration: Duration,
    pub delay: Duration,
    pub ease: Ease,
    pub repeat: Repeat,
    pub yoyo: bool,
}

impl<T, P> Tween<T, P> {
    pub fn to(target: T, prop: P, value: f64) -> Self {
        Self {
            target,
            prop,
            from: None,
            to: value,
            duration: Duration::from_millis(500),
            delay: Duration::ZERO,
            ease: Ease::default(),
            repeat: Repeat::Once,
            yoyo: false,
        }
    }

    pub fn from_to(target: T, prop: P, from: f64, to: f64) -> Self {
        Self {
            from: Some(from),
            ..Self::to(target, prop, to)
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn secs(self, seconds: f64) -> Self {
        self.duration(Duration::from_secs_f64(seconds.max(0.0)))
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Time from start (including delay) until the last iteration ends.
    /// `None` for tweens that repeat forever.
    pub fn total_duration(&self) -> Option<Duration> {
        let iterations = match self.repeat {
            Repeat::Once => 1,
            Repeat::Times(n) => n.saturating_add(1),
            Repeat::Forever => return None,
        };
        Some(self.delay + self.duration * iterations)
    }

    /// Value at `elapsed` (measured from the tween's own start, delay
    /// included) given the resolved start value. Returns `None` while the
    /// delay is still running, and a `true` flag once the tween has finished.
    pub fn sample(&self, start: f64, elapsed: Duration) -> Option<(f64, bool)> {
        let local = elapsed.checked_sub(self.delay)?;

        if let Some(total) = self.total_duration()
            && elapsed >= total
        {
            return Some((self.final_value(start), true));
        }

        let iteration_secs = self.duration.as_secs_f64();
        if iteration_secs <= f64::EPSILON {
            return Some((self.final_value(start), self.repeat != Repeat::Forever));
        }

        let local = local.as_secs_f64();
        let iteration = (local / iteration_secs).floor();
        let mut progress = (local - iteration * iteration_secs) / iteration_secs;
        if self.yoyo && iteration as u64 % 2 == 1 {
            progress = 1.0 - progress;
        }

        Some((lerp(start, self.to, self.ease.apply(progress)), false))
    }

    fn final_value(&self, start: f64) -> f64 {
        let reversed = self.yoyo && matches!(self.repeat, Repeat::Times(n) if n % 2 == 1);
        if reversed { start } else { self.to }
    }
}
