use super::RequestTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSignal {
    Tick(u32),
    Expired,
}

/// One-second countdown for the active round.
///
/// The countdown only answers ticks carrying the tag it was started with, and
/// stops itself on expiry so `Expired` is reported exactly once.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    running_for: Option<RequestTag>,
    remaining: u32,
}

impl Countdown {
    /// Starts counting down from `duration_seconds`, replacing any previous run.
    pub fn start(&mut self, tag: RequestTag, duration_seconds: u32) {
        self.stop();
        self.running_for = Some(tag);
        self.remaining = duration_seconds;
    }

    /// Returns true if a countdown was running.
    pub fn stop(&mut self) -> bool {
        self.running_for.take().is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running_for.is_some()
    }

    pub fn is_running_for(&self, tag: RequestTag) -> bool {
        self.running_for == Some(tag)
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self, tag: RequestTag) -> Option<ClockSignal> {
        if !self.is_running_for(tag) {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running_for = None;
            Some(ClockSignal::Expired)
        } else {
            Some(ClockSignal::Tick(self.remaining))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_then_expires_once() {
        let tag = RequestTag::new_session();
        let mut countdown = Countdown::default();
        countdown.start(tag, 3);

        assert_eq!(countdown.tick(tag), Some(ClockSignal::Tick(2)));
        assert_eq!(countdown.tick(tag), Some(ClockSignal::Tick(1)));
        assert_eq!(countdown.tick(tag), Some(ClockSignal::Expired));
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(tag), None);
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn test_ignores_ticks_for_other_rounds() {
        let first = RequestTag::new_session();
        let second = first.next_round();
        let mut countdown = Countdown::default();
        countdown.start(first, 5);
        countdown.start(second, 5);

        assert_eq!(countdown.tick(first), None);
        assert_eq!(countdown.remaining(), 5);
        assert_eq!(countdown.tick(second), Some(ClockSignal::Tick(4)));
    }

    #[test]
    fn test_stopped_countdown_stays_silent() {
        let tag = RequestTag::new_session();
        let mut countdown = Countdown::default();
        countdown.start(tag, 1);
        assert!(countdown.stop());
        assert!(!countdown.stop());
        assert_eq!(countdown.tick(tag), None);
    }
}
