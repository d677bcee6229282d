//! Fixed-rate frame limiter

use std::time::{Duration, Instant};

/// Caps the loop at a fixed tick rate.
///
/// Sleeps away whatever is left of the current frame. A late frame does not
/// trigger catch-up ticks; the schedule simply restarts from now.
#[derive(Debug)]
pub struct FrameLimiter {
    period: Duration,
    next: Instant,
    realtime: bool,
}

impl FrameLimiter {
    pub fn new(rate_hz: u32, realtime: bool) -> Self {
        let period = Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)));
        Self {
            period,
            next: Instant::now() + period,
            realtime,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        if !self.realtime {
            return;
        }
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.period;
        } else {
            let late = now - self.next;
            if late > self.period {
                log::warn!("Frame overran by {:.1} ms", late.as_secs_f64() * 1000.0);
            }
            self.next = now + self.period;
        }
    }
}
