//! Leading/trailing throttle for bursty DOM events.
//!
//! Time is passed in explicitly so the state machine stays free of timers;
//! the caller owns the single trailing timeout that `RunAfter` asks for.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Run the handler now.
    Run,
    /// Arm one timeout and run the handler after this many milliseconds.
    RunAfter(f64),
    /// A trailing run is already armed; it will observe this event.
    Skip,
}

#[derive(Debug, Clone)]
pub struct Throttle {
    interval_ms: f64,
    last_run: Option<f64>,
    trailing_armed: bool,
}

impl Throttle {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: f64::from(interval_ms),
            last_run: None,
            trailing_armed: false,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.interval_ms <= 0.0
    }

    pub fn request(&mut self, now_ms: f64) -> Decision {
        if self.is_disabled() {
            self.last_run = Some(now_ms);
            return Decision::Run;
        }
        if self.trailing_armed {
            return Decision::Skip;
        }
        match self.last_run {
            Some(last) if now_ms - last < self.interval_ms => {
                self.trailing_armed = true;
                Decision::RunAfter(self.interval_ms - (now_ms - last))
            }
            _ => {
                self.last_run = Some(now_ms);
                Decision::Run
            }
        }
    }

    pub fn complete_trailing(&mut self, now_ms: f64) {
        self.trailing_armed = false;
        self.last_run = Some(now_ms);
    }

    pub fn is_trailing_armed(&self) -> bool {
        self.trailing_armed
    }

    pub fn reset(&mut self) {
        self.last_run = None;
        self.trailing_armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_always_runs() {
        let mut throttle = Throttle::new(0);
        assert!(throttle.is_disabled());
        for now in [0.0, 0.0, 1.0, 1.5] {
            assert_eq!(throttle.request(now), Decision::Run);
        }
    }

    #[test]
    fn burst_runs_leading_edge_then_one_trailing() {
        let mut throttle = Throttle::new(500);
        assert_eq!(throttle.request(1000.0), Decision::Run);
        assert_eq!(throttle.request(1100.0), Decision::RunAfter(400.0));
        assert_eq!(throttle.request(1200.0), Decision::Skip);
        assert_eq!(throttle.request(1499.0), Decision::Skip);

        throttle.complete_trailing(1500.0);
        assert!(!throttle.is_trailing_armed());
        assert_eq!(throttle.request(1600.0), Decision::RunAfter(400.0));
    }

    #[test]
    fn quiet_period_restores_leading_edge() {
        let mut throttle = Throttle::new(500);
        assert_eq!(throttle.request(0.0), Decision::Run);
        assert_eq!(throttle.request(500.0), Decision::Run);
        assert_eq!(throttle.request(2000.0), Decision::Run);
    }

    #[test]
    fn reset_forgets_history() {
        let mut throttle = Throttle::new(500);
        throttle.request(0.0);
        throttle.request(10.0);
        throttle.reset();
        assert_eq!(throttle.request(20.0), Decision::Run);
    }
}
