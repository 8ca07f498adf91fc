//! Animation driver for widget transitions.
//!
//! Each widget owns one [`AnimationDriver`]: a normalized [0, 1] progress
//! scalar advanced over time toward a single target. The driver knows
//! nothing about what the value means; widgets request independent
//! [`interpolate`](AnimationDriver::interpolate) mappings (row counts,
//! indicator angles, label offsets) from the same progress.
//!
//! Time is passed in explicitly so render loops sample the clock once per
//! frame and tests stay deterministic.

use std::time::{Duration, Instant};

/// Easing curves for animation progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic Hermite interpolation with configurable control points.
    CubicHermite { c1: f32, c2: f32 },
}

impl Easing {
    /// Default curve: cubic hermite ease-out.
    pub const DEFAULT: Easing = Easing::CubicHermite { c1: 0.33, c2: 1.0 };

    /// Evaluate the curve at time t. Input is clamped to [0, 1].
    #[inline]
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            Easing::CubicHermite { c1, c2 } => {
                // f(t) = c1·3t(1-t)² + c2·3(1-t)t² + t³
                let omt = 1.0 - t;
                c1 * 3.0 * t * omt * omt + c2 * 3.0 * omt * t * t + t * t * t
            }
        }
    }
}

impl Default for Easing {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One in-flight interpolation.
#[derive(Debug, Clone, Copy)]
struct ActiveTween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl ActiveTween {
    /// Raw progress (0.0 to 1.0) of this tween at `now`.
    #[inline]
    fn raw_t(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started_at);
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    #[inline]
    fn sample(&self, now: Instant) -> f32 {
        let eased = self.easing.evaluate(self.raw_t(now));
        self.from + (self.to - self.from) * eased
    }
}

/// Time-based interpolation of a single progress value.
///
/// A new [`animate_to`](Self::animate_to) supersedes any in-flight
/// interpolation: last call wins, no queuing, and the new tween starts from
/// the progress sampled at that instant. There is no cancel without a
/// retarget.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    /// Settled progress; authoritative only while no tween is in flight.
    value: f32,
    active: Option<ActiveTween>,
}

impl AnimationDriver {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial.clamp(0.0, 1.0),
            active: None,
        }
    }

    /// Begin interpolating toward `target` over `duration` with `easing`.
    ///
    /// Calling with a target that is already reached and settled is a
    /// no-op.
    pub fn animate_to(&mut self, target: f32, duration: Duration, easing: Easing, now: Instant) {
        let target = target.clamp(0.0, 1.0);
        let from = self.progress(now);
        if (from - target).abs() < f32::EPSILON && self.is_settled(now) {
            self.value = target;
            self.active = None;
            return;
        }
        self.active = Some(ActiveTween {
            from,
            to: target,
            started_at: now,
            duration,
            easing,
        });
    }

    /// Jump straight to `target` with no intermediate frames.
    pub fn snap_to(&mut self, target: f32) {
        self.value = target.clamp(0.0, 1.0);
        self.active = None;
    }

    /// Progress sampled at `now`.
    #[inline]
    pub fn progress(&self, now: Instant) -> f32 {
        match &self.active {
            Some(tween) => tween.sample(now),
            None => self.value,
        }
    }

    /// The target the driver is moving toward, or resting at.
    #[inline]
    pub fn target(&self) -> f32 {
        self.active.map_or(self.value, |tween| tween.to)
    }

    /// True when no interpolation is still running at `now`.
    #[inline]
    pub fn is_settled(&self, now: Instant) -> bool {
        self.active.map_or(true, |tween| tween.raw_t(now) >= 1.0)
    }

    /// Fold a completed tween into the settled value.
    ///
    /// Render loops call this once per frame; harmless when nothing is
    /// running or the tween is still mid-flight.
    pub fn settle(&mut self, now: Instant) {
        if let Some(tween) = self.active {
            if tween.raw_t(now) >= 1.0 {
                self.value = tween.to;
                self.active = None;
            }
        }
    }

    /// Map progress at `now` from `input` onto `output`.
    ///
    /// With `clamped` the result is pinned inside the output range;
    /// otherwise the mapping extrapolates linearly beyond it.
    #[inline]
    pub fn interpolate(
        &self,
        now: Instant,
        input: (f32, f32),
        output: (f32, f32),
        clamped: bool,
    ) -> f32 {
        map_range(self.progress(now), input, output, clamped)
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Linearly map `v` from `input` onto `output`, optionally clamping.
#[inline]
pub fn map_range(v: f32, input: (f32, f32), output: (f32, f32), clamped: bool) -> f32 {
    let (i0, i1) = input;
    let (o0, o1) = output;
    if (i1 - i0).abs() < f32::EPSILON {
        return o0;
    }
    let t = (v - i0) / (i1 - i0);
    let t = if clamped { t.clamp(0.0, 1.0) } else { t };
    o0 + (o1 - o0) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = Easing::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_hermite_endpoints() {
        let hermite = Easing::DEFAULT;
        assert_eq!(hermite.evaluate(0.0), 0.0);
        assert!((hermite.evaluate(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_input_clamping() {
        let linear = Easing::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_driver_progress_over_time() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(1.0, Duration::from_millis(200), Easing::Linear, start);

        assert!(driver.progress(start) < 0.01);
        let mid = driver.progress(start + Duration::from_millis(100));
        assert!((mid - 0.5).abs() < 0.01, "expected ~0.5, got {}", mid);
        assert_eq!(driver.progress(start + Duration::from_millis(200)), 1.0);
        // Past the duration the value holds at the target.
        assert_eq!(driver.progress(start + Duration::from_millis(500)), 1.0);
    }

    #[test]
    fn test_retarget_supersedes_in_flight() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(1.0, Duration::from_millis(200), Easing::Linear, start);

        // Halfway up, reverse toward 0. The new tween starts at ~0.5.
        let mid = start + Duration::from_millis(100);
        driver.animate_to(0.0, Duration::from_millis(200), Easing::Linear, mid);
        assert_eq!(driver.target(), 0.0);
        assert!((driver.progress(mid) - 0.5).abs() < 0.01);

        // 100 ms later it is a quarter of the way back down.
        let later = mid + Duration::from_millis(100);
        assert!((driver.progress(later) - 0.25).abs() < 0.01);
        assert_eq!(driver.progress(mid + Duration::from_millis(200)), 0.0);
    }

    #[test]
    fn test_animate_to_reached_target_is_noop() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(1.0);
        driver.animate_to(1.0, Duration::from_millis(200), Easing::Linear, start);
        assert!(driver.is_settled(start));
        assert_eq!(driver.progress(start), 1.0);
    }

    #[test]
    fn test_snap_has_no_intermediate_frames() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(0.0);
        driver.snap_to(1.0);
        assert_eq!(driver.progress(start), 1.0);
        assert!(driver.is_settled(start));
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(1.0, Duration::ZERO, Easing::Linear, start);
        assert_eq!(driver.progress(start), 1.0);
        assert!(driver.is_settled(start));
    }

    #[test]
    fn test_settle_folds_completed_tween() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(1.0, Duration::from_millis(100), Easing::Linear, start);

        let done = start + Duration::from_millis(150);
        driver.settle(done);
        assert!(driver.is_settled(done));
        assert_eq!(driver.progress(done), 1.0);

        // Settling mid-flight leaves the tween running.
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(1.0, Duration::from_millis(100), Easing::Linear, start);
        driver.settle(start + Duration::from_millis(50));
        assert!(!driver.is_settled(start + Duration::from_millis(50)));
    }

    #[test]
    fn test_interpolate_output_ranges() {
        let start = Instant::now();
        let mut driver = AnimationDriver::new(0.0);
        driver.animate_to(1.0, Duration::from_millis(100), Easing::Linear, start);
        let mid = start + Duration::from_millis(50);

        // Rotation mapping: 0..180 degrees.
        let deg = driver.interpolate(mid, (0.0, 1.0), (0.0, 180.0), true);
        assert!((deg - 90.0).abs() < 2.0);

        // Font-size style mapping: 16 down to 12.
        let size = driver.interpolate(mid, (0.0, 1.0), (16.0, 12.0), true);
        assert!((size - 14.0).abs() < 0.1);
    }

    #[test]
    fn test_map_range_clamp_and_extrapolate() {
        assert_eq!(map_range(1.5, (0.0, 1.0), (0.0, 10.0), true), 10.0);
        assert_eq!(map_range(1.5, (0.0, 1.0), (0.0, 10.0), false), 15.0);
        assert_eq!(map_range(-0.5, (0.0, 1.0), (0.0, 10.0), true), 0.0);
        // Degenerate input range maps to the output start.
        assert_eq!(map_range(0.7, (0.5, 0.5), (3.0, 9.0), true), 3.0);
    }
}
