//! Trigger scheduler.
//!
//! Decides *when* an update check should be requested. The host polls
//! [`TriggerScheduler::tick`] from its event loop. Overlapping triggers are
//! not coalesced here; the service's busy gate takes care of that.

use std::time::{Duration, Instant};

/// Interval timer plus the one-shot startup trigger
#[derive(Debug)]
pub struct TriggerScheduler {
    interval: Duration,
    /// When the timer fires next; `None` while no timer is registered
    next_tick: Option<Instant>,
}

impl TriggerScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the repeating timer is armed
    pub fn has_timer(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Instant of the next timer tick, if armed
    pub fn next_tick(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Arm the repeating timer. Returns `false` (and changes nothing) if a
    /// timer is already registered.
    pub fn register_timer(&mut self, now: Instant) -> bool {
        if self.next_tick.is_some() {
            log::debug!("Update timer already registered");
            return false;
        }
        self.next_tick = Some(now + self.interval);
        log::info!(
            "Update timer registered (every {}s)",
            self.interval.as_secs()
        );
        true
    }

    /// Startup trigger: fire once immediately if the host is already ready.
    pub fn start(&mut self, now: Instant, host_ready: bool) -> bool {
        self.register_timer(now);
        host_ready
    }

    /// Poll the timer. Returns `true` when a check should be requested and
    /// re-arms for one interval after `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if now >= due => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Disarm the timer.
    pub fn stop(&mut self) {
        self.next_tick = None;
    }
}
