use glam::Vec3;
use std::time::Duration;

/// Easing curves used by the timelines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Default ease for time-based tweens.
    #[default]
    Power1Out,
    /// Scrub catch-up.
    Power3Out,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

pub trait Interpolate: Copy {
    fn interpolate(from: Self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * t
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(from: Vec3, to: Vec3, t: f32) -> Vec3 {
        from.lerp(to, t)
    }
}

/// Time-based tween between two values.
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    pub from: T,
    pub to: T,
    pub duration: Duration,
    pub ease: Ease,
    elapsed: Duration,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
            elapsed: Duration::ZERO,
        }
    }

    /// Step forward; returns the new value.
    pub fn advance(&mut self, dt: Duration) -> T {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    #[inline]
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        T::interpolate(self.from, self.to, self.ease.apply(self.progress()))
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
