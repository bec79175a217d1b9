//! # Frame Pacing
//!
//! Deadline-based frame limiter on the monotonic clock, plus the
//! instantaneous frame rate shown in the window title.
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! use gpu_life::performance::FrameTimer;
//!
//! let mut timer = FrameTimer::new(60, Duration::from_millis(100));
//! loop {
//!     // ... render and present ...
//!     if let Some(fps) = timer.tick() {
//!         println!("{:.1} fps", fps);
//!     }
//!     timer.pace();
//! }
//! ```

use std::time::{Duration, Instant};

/// Paces the frame loop to a target rate
pub struct FrameTimer {
    target_fps: u32,
    frame_duration: Duration,
    /// When the next frame may start
    next_deadline: Instant,
    /// End of the previous frame
    last_frame: Instant,
    /// Time since the frame rate was last reported
    since_report: Duration,
    report_interval: Duration,
    frame_rate: f32,
}

impl FrameTimer {
    /// Create a timer for `target_fps` that reports the rate every `report_interval`
    pub fn new(target_fps: u32, report_interval: Duration) -> Self {
        let target_fps = target_fps.max(1);
        let now = Instant::now();
        Self {
            target_fps,
            frame_duration: Duration::from_secs_f64(1.0 / target_fps as f64),
            next_deadline: now,
            last_frame: now,
            // Report on the first frame
            since_report: report_interval,
            report_interval,
            frame_rate: target_fps as f32,
        }
    }

    /// Marks the end of a presented frame.
    ///
    /// Returns the current frame rate when a report is due.
    pub fn tick(&mut self) -> Option<f32> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.frame_rate = instantaneous_rate(elapsed, self.target_fps);

        self.since_report += elapsed;
        if self.since_report >= self.report_interval {
            self.since_report = Duration::ZERO;
            Some(self.frame_rate)
        } else {
            None
        }
    }

    /// Sleeps until the next frame deadline
    pub fn pace(&mut self) {
        let now = Instant::now();
        self.next_deadline = next_deadline(self.next_deadline, now, self.frame_duration);
        let wait = self.next_deadline.saturating_duration_since(now);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }

    /// Most recent instantaneous frame rate
    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

/// Frame rate from one frame's duration, capped at the target
pub fn instantaneous_rate(elapsed: Duration, target_fps: u32) -> f32 {
    if elapsed.is_zero() {
        return target_fps as f32;
    }
    (1.0 / elapsed.as_secs_f32()).min(target_fps as f32)
}

/// Next deadline one period after `previous`.
///
/// A loop that fell behind restarts from `now` instead of bursting frames to
/// catch up.
pub fn next_deadline(previous: Instant, now: Instant, period: Duration) -> Instant {
    let next = previous + period;
    if next < now {
        now
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_is_capped_at_target() {
        assert_eq!(instantaneous_rate(Duration::from_millis(1), 60), 60.0);
        assert_eq!(instantaneous_rate(Duration::ZERO, 60), 60.0);
        let rate = instantaneous_rate(Duration::from_millis(50), 60);
        assert!((rate - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_deadline_advances_by_period() {
        let start = Instant::now();
        let period = Duration::from_millis(16);
        let next = next_deadline(start, start, period);
        assert_eq!(next, start + period);
    }

    #[test]
    fn test_deadline_resets_when_behind() {
        let start = Instant::now();
        let period = Duration::from_millis(16);
        let late = start + Duration::from_millis(100);
        assert_eq!(next_deadline(start, late, period), late);
    }

    #[test]
    fn test_first_tick_reports() {
        let mut timer = FrameTimer::new(60, Duration::from_secs(3600));
        assert!(timer.tick().is_some());
        assert!(timer.tick().is_none());
    }

    #[test]
    fn test_zero_fps_is_clamped() {
        let timer = FrameTimer::new(0, Duration::from_millis(100));
        assert_eq!(timer.frame_duration(), Duration::from_secs(1));
    }
}
