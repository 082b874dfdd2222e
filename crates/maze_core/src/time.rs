//! Frame timing and the per-level stopwatch.
//!
//! All times are seconds on a monotonic host clock. The host passes the
//! timestamp into each frame (like a display-refresh callback does), so the
//! simulation never reads the wall clock itself and tests can drive time by hand.

pub struct FrameClock {
    pub max_frame_dt: f64,
    pub frame_count: u64,
    pub real_dt: f64,
    last_timestamp: Option<f64>,
}

impl FrameClock {
    pub fn new(max_frame_dt: f64) -> Self {
        Self {
            max_frame_dt,
            frame_count: 0,
            real_dt: 0.0,
            last_timestamp: None,
        }
    }

    /// Advances to `now` and returns the clamped delta since the previous frame.
    /// The first frame has a delta of zero.
    pub fn advance(&mut self, now: f64) -> f64 {
        let raw = match self.last_timestamp {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now);
        self.frame_count += 1;

        // Large gaps (debugger, window drag) would blow up the integrator.
        self.real_dt = if raw > self.max_frame_dt {
            log::warn!(
                "Frame took {:.1}ms, capping step to {:.1}ms",
                raw * 1000.0,
                self.max_frame_dt * 1000.0
            );
            self.max_frame_dt
        } else {
            raw
        };
        self.real_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Stopwatch for a single level attempt. Frozen while paused.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElapsedTimer {
    start_time: Option<f64>,
    paused_at: Option<f64>,
    paused_total: f64,
}

impl ElapsedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: f64) {
        self.start_time = Some(now);
        self.paused_at = None;
        self.paused_total = 0.0;
    }

    pub fn pause(&mut self, now: f64) {
        if self.start_time.is_some() && self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += (now - paused_at).max(0.0);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some() && self.paused_at.is_none()
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        let end = self.paused_at.unwrap_or(now);
        (end - start - self.paused_total).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(12.5), 0.0);
        assert!((clock.advance(12.5 + 1.0 / 60.0) - 1.0 / 60.0).abs() < 1e-9);
        assert_eq!(clock.frame_count, 2);
    }

    #[test]
    fn long_frames_are_capped() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(0.0);
        assert!((clock.advance(3.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn backwards_timestamps_yield_zero_delta() {
        let mut clock = FrameClock::new(0.1);
        clock.advance(5.0);
        assert_eq!(clock.advance(4.0), 0.0);
    }

    #[test]
    fn unstarted_timer_reads_zero() {
        let timer = ElapsedTimer::new();
        assert_eq!(timer.elapsed(100.0), 0.0);
        assert!(!timer.is_running());
    }

    #[test]
    fn elapsed_is_frozen_while_paused() {
        let mut timer = ElapsedTimer::new();
        timer.start(10.0);
        timer.pause(12.0);
        let before = timer.elapsed(12.0);
        let after = timer.elapsed(47.0);
        assert_eq!(before, after);
        assert!((before - 2.0).abs() < 1e-12);
    }

    #[test]
    fn paused_interval_is_excluded_after_resume() {
        let mut timer = ElapsedTimer::new();
        timer.start(0.0);
        timer.pause(1.0);
        timer.resume(6.0);
        assert!((timer.elapsed(8.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn double_pause_keeps_first_pause_point() {
        let mut timer = ElapsedTimer::new();
        timer.start(0.0);
        timer.pause(1.0);
        timer.pause(4.0);
        timer.resume(5.0);
        assert!((timer.elapsed(5.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn restart_clears_pause_bookkeeping() {
        let mut timer = ElapsedTimer::new();
        timer.start(0.0);
        timer.pause(1.0);
        timer.start(20.0);
        assert!(timer.is_running());
        assert!((timer.elapsed(21.0) - 1.0).abs() < 1e-12);
        timer.reset();
        assert!(!timer.is_started());
    }
}
