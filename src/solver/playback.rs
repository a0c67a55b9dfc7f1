//! Pull-based playback of a computed series.
//!
//! A front end drives a [`Playback`] from its own timer: every tick reveals
//! one more sample, exactly like a frame-by-frame plot animation. The series
//! itself is never recomputed.

use std::time::Duration;

use crate::error::{RcSimError, Result};

use super::simulator::{Sample, TimeSeries};

/// Fastest accepted frame interval (ms)
pub const INTERVAL_MIN_MS: u64 = 10;
/// Slowest accepted frame interval (ms)
pub const INTERVAL_MAX_MS: u64 = 200;
/// Default frame interval (ms)
pub const INTERVAL_DEFAULT_MS: u64 = 50;

/// One animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Number of samples revealed so far (1-based)
    pub index: usize,
    /// Samples visible in this frame
    pub visible: &'a [Sample],
    /// Charge indicator for the newest sample
    pub charge_level: f64,
}

impl Frame<'_> {
    /// The newest visible sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.visible.last()
    }
}

/// Cursor over a [`TimeSeries`] with pause/resume.
#[derive(Debug, Clone)]
pub struct Playback<'a> {
    series: &'a TimeSeries,
    revealed: usize,
    paused: bool,
    interval: Duration,
}

impl<'a> Playback<'a> {
    /// Start a playback at the default interval.
    pub fn new(series: &'a TimeSeries) -> Self {
        Self {
            series,
            revealed: 0,
            paused: false,
            interval: Duration::from_millis(INTERVAL_DEFAULT_MS),
        }
    }

    /// Set the frame interval in milliseconds.
    pub fn with_interval_ms(mut self, ms: u64) -> Result<Self> {
        if !(INTERVAL_MIN_MS..=INTERVAL_MAX_MS).contains(&ms) {
            return Err(RcSimError::invalid_parameter(
                "interval_ms",
                format!(
                    "must be between {} and {}, got {}",
                    INTERVAL_MIN_MS, INTERVAL_MAX_MS, ms
                ),
            ));
        }
        self.interval = Duration::from_millis(ms);
        Ok(self)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip between paused and running; returns the new paused state.
    pub fn toggle(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once every sample has been revealed.
    pub fn is_finished(&self) -> bool {
        self.revealed >= self.series.len()
    }

    /// Rewind to an empty plot.
    pub fn reset(&mut self) {
        self.revealed = 0;
    }

    /// The frame currently on screen, without advancing.
    pub fn current(&self) -> Frame<'a> {
        let visible = &self.series.samples()[..self.revealed];
        let charge_level = match self.revealed {
            0 => 0.0,
            n => self.series.charge_level_at(n - 1),
        };
        Frame {
            index: self.revealed,
            visible,
            charge_level,
        }
    }

    /// Reveal the next sample. Returns `None` while paused or once finished.
    pub fn tick(&mut self) -> Option<Frame<'a>> {
        if self.paused || self.is_finished() {
            return None;
        }
        self.revealed += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitConfig;
    use crate::solver::generate_series;

    fn series() -> TimeSeries {
        generate_series(&CircuitConfig::default(), 5).unwrap()
    }

    #[test]
    fn test_frames_grow_until_finished() {
        let series = series();
        let mut playback = Playback::new(&series);
        assert_eq!(playback.current().visible.len(), 0);
        assert_eq!(playback.current().charge_level, 0.0);

        let mut count = 0;
        while let Some(frame) = playback.tick() {
            count += 1;
            assert_eq!(frame.visible.len(), count);
            assert_eq!(frame.latest(), series.samples().get(count - 1));
        }
        assert_eq!(count, 5);
        assert!(playback.is_finished());

        playback.reset();
        assert!(!playback.is_finished());
    }

    #[test]
    fn test_pause_and_resume() {
        let series = series();
        let mut playback = Playback::new(&series);
        playback.tick();
        assert!(playback.toggle());
        assert!(playback.tick().is_none());
        assert!(!playback.is_finished());
        playback.resume();
        assert_eq!(playback.tick().map(|f| f.index), Some(2));
    }

    #[test]
    fn test_interval_bounds() {
        let series = series();
        assert_eq!(
            Playback::new(&series).interval(),
            Duration::from_millis(INTERVAL_DEFAULT_MS)
        );
        assert!(Playback::new(&series).with_interval_ms(10).is_ok());
        assert!(Playback::new(&series).with_interval_ms(200).is_ok());
        assert!(Playback::new(&series).with_interval_ms(5).is_err());
        assert!(Playback::new(&series).with_interval_ms(500).is_err());
    }
}
