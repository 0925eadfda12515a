//! Frame clock fed by the animator's timestamps.

pub const DEFAULT_MAX_DELTA_MS: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// Timestamp handed over by the frame scheduler.
    pub timestamp_ms: f64,
    /// Time since the first tick after construction or `reset`.
    pub elapsed_ms: f64,
    /// Time since the previous tick, clamped to `[0, max_delta_ms]`.
    pub delta_ms: f64,
    /// Zero-based frame counter.
    pub frame: u64,
}

#[derive(Debug, Clone)]
pub struct Clock {
    origin: Option<f64>,
    last: Option<f64>,
    frame: u64,
    max_delta_ms: f64,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA_MS)
    }

    pub fn with_max_delta(max_delta_ms: f64) -> Self {
        Self {
            origin: None,
            last: None,
            frame: 0,
            max_delta_ms,
        }
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> Tick {
        let origin = *self.origin.get_or_insert(timestamp_ms);
        let delta_ms = match self.last {
            Some(last) => (timestamp_ms - last).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        let tick = Tick {
            timestamp_ms,
            elapsed_ms: (timestamp_ms - origin).max(0.0),
            delta_ms,
            frame: self.frame,
        };
        self.last = Some(timestamp_ms);
        self.frame += 1;
        tick
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.last = None;
        self.frame = 0;
    }
}
