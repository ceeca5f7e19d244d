use std::time::{Duration, Instant};

/// One-shot deadline owned by a mini-game.
///
/// The owner polls it with the current time. Dropping or cancelling the timer
/// guarantees it never fires again.
#[derive(Debug, Default, Clone)]
pub struct Timer
{
    deadline: Option<Instant>,
}

impl Timer
{
    pub fn arm(&mut self, now: Instant, after: Duration)
    {
        self.deadline = Some(now + after);
    }

    pub fn cancel(&mut self)
    {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool
    {
        self.deadline.is_some()
    }

    /// Returns true once when the deadline has passed, then disarms.
    pub fn fire(&mut self, now: Instant) -> bool
    {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn fires_once_after_deadline()
    {
        let start = Instant::now();
        let mut timer = Timer::default();
        timer.arm(start, Duration::from_millis(100));
        assert!(!timer.fire(start + Duration::from_millis(99)));
        assert!(timer.fire(start + Duration::from_millis(100)));
        assert!(!timer.fire(start + Duration::from_millis(500)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn cancelled_timer_never_fires()
    {
        let start = Instant::now();
        let mut timer = Timer::default();
        timer.arm(start, Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.fire(start + Duration::from_secs(5)));
    }
}
