use std::time::{Duration, Instant};

/// A fire-once deadline polled from the frame loop.
///
/// The timer is plain data owned by whoever armed it, so dropping the owner
/// cancels it; nothing can fire into a torn down widget.
#[derive(Debug, Default)]
pub struct OneShotTimer {
    deadline: Option<Instant>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self { deadline: None }
    }

    /// Arm (or re-arm) the timer to fire `delay` after `now`
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before the timer fires, if armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new();
        assert!(!timer.fire(start));

        timer.arm(start, Duration::from_millis(1000));
        assert!(timer.is_armed());
        assert!(!timer.fire(start + Duration::from_millis(999)));
        assert!(timer.fire(start + Duration::from_millis(1000)));
        assert!(!timer.fire(start + Duration::from_millis(2000)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new();
        timer.arm(start, Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.fire(start + Duration::from_secs(1)));
    }

    #[test]
    fn rearming_moves_deadline() {
        let start = Instant::now();
        let mut timer = OneShotTimer::new();
        timer.arm(start, Duration::from_millis(1000));
        timer.arm(start + Duration::from_millis(500), Duration::from_millis(1000));
        assert!(!timer.fire(start + Duration::from_millis(1200)));
        assert_eq!(
            timer.remaining(start + Duration::from_millis(1200)),
            Some(Duration::from_millis(300))
        );
        assert!(timer.fire(start + Duration::from_millis(1500)));
    }
}
