/// Why a respawn was scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespawnReason {
    SessionStart,
    TimedOut,
    Scored,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    due_at: f64,
    reason: RespawnReason,
}

/// Single owned respawn handle. Scheduling replaces (cancels) whatever was pending,
/// so at most one respawn is ever outstanding.
#[derive(Debug, Clone, Default)]
pub struct RespawnTimer {
    pending: Option<Pending>,
}

impl RespawnTimer {
    /// Schedule a respawn at `now + delay`. Returns the reason of a replaced pending respawn.
    pub fn schedule(&mut self, now: f64, delay: f64, reason: RespawnReason) -> Option<RespawnReason> {
        let replaced = self.pending.take().map(|p| p.reason);
        self.pending = Some(Pending {
            due_at: now + delay,
            reason,
        });
        replaced
    }

    /// Drop any pending respawn. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn due_at(&self) -> Option<f64> {
        self.pending.map(|p| p.due_at)
    }

    /// Fire the timer if it is due. A fired timer is consumed.
    pub fn poll(&mut self, now: f64) -> Option<RespawnReason> {
        match self.pending {
            Some(p) if now >= p.due_at => {
                self.pending = None;
                Some(p.reason)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_when_due() {
        let mut timer = RespawnTimer::default();
        timer.schedule(1.0, 2.5, RespawnReason::Scored);
        assert_eq!(timer.poll(3.4), None);
        assert_eq!(timer.poll(3.5), Some(RespawnReason::Scored));
        assert_eq!(timer.poll(10.0), None);
        assert_eq!(timer.due_at(), None);
    }

    #[test]
    fn rescheduling_replaces_pending() {
        let mut timer = RespawnTimer::default();
        assert_eq!(timer.schedule(0.0, 3.0, RespawnReason::TimedOut), None);
        let replaced = timer.schedule(1.0, 2.5, RespawnReason::Scored);
        assert_eq!(replaced, Some(RespawnReason::TimedOut));
        // The first 3.0s deadline no longer fires
        assert_eq!(timer.poll(3.0), None);
        assert_eq!(timer.poll(3.5), Some(RespawnReason::Scored));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut timer = RespawnTimer::default();
        assert!(!timer.cancel());
        timer.schedule(0.0, 1.0, RespawnReason::SessionStart);
        assert!(timer.cancel());
        assert_eq!(timer.poll(100.0), None);
    }

    #[test]
    fn due_at_reports_deadline() {
        let mut timer = RespawnTimer::default();
        timer.schedule(2.0, 3.0, RespawnReason::TimedOut);
        assert_eq!(timer.due_at(), Some(5.0));
    }
}
