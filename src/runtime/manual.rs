//! Virtual-time scheduler.  Time only moves when the owner says so, which
//! makes every timer interaction deterministic.

use std::collections::BTreeMap;
use std::time::Duration;

use super::{Scheduler, TimerId};

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Duration,
    period: Option<Duration>,
}

/// A clock that starts at zero and advances on request.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    timers: BTreeMap<TimerId, Pending>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of timers still armed.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time.  Ties fire in scheduling order.  Recurring timers are
    /// re-armed one period later.
    pub fn next_due(&mut self, until: Duration) -> Option<TimerId> {
        let (&id, &pending) = self
            .timers
            .iter()
            .filter(|(_, p)| p.due <= until)
            .min_by_key(|(id, p)| (p.due, **id))?;

        self.now = self.now.max(pending.due);
        match pending.period {
            Some(period) => {
                if let Some(p) = self.timers.get_mut(&id) {
                    p.due += period;
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
        Some(id)
    }

    /// Move the clock forward to `until` without firing anything.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Advance by `dt`, returning every firing in order.
    ///
    /// Timers scheduled by whoever handles these firings are not included;
    /// use [`ManualClock::next_due`] in a loop when handlers re-arm timers.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let until = self.now + dt;
        let mut fired = Vec::new();
        while let Some(id) = self.next_due(until) {
            fired.push(id);
        }
        self.settle(until);
        fired
    }
}

impl Scheduler for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_once(&mut self, delay: Duration) -> TimerId {
        let id = TimerId::next();
        self.timers.insert(
            id,
            Pending {
                due: self.now + delay,
                period: None,
            },
        );
        id
    }

    fn schedule_repeating(&mut self, period: Duration) -> TimerId {
        let id = TimerId::next();
        // A zero period would never let time move past it.
        let period = period.max(Duration::from_millis(1));
        self.timers.insert(
            id,
            Pending {
                due: self.now + period,
                period: Some(period),
            },
        );
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn once_timer_fires_exactly_once() {
        let mut clock = ManualClock::new();
        let id = clock.schedule_once(50 * MS);

        assert!(clock.advance(49 * MS).is_empty());
        assert_eq!(clock.advance(MS), vec![id]);
        assert!(clock.advance(1000 * MS).is_empty());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn repeating_timer_fires_once_per_period() {
        let mut clock = ManualClock::new();
        let id = clock.schedule_repeating(100 * MS);

        assert_eq!(clock.advance(350 * MS), vec![id, id, id]);
        assert_eq!(clock.now(), 350 * MS);
        assert_eq!(clock.advance(50 * MS), vec![id]);
    }

    #[test]
    fn firings_come_out_in_due_order() {
        let mut clock = ManualClock::new();
        let slow = clock.schedule_once(30 * MS);
        let fast = clock.schedule_once(10 * MS);
        let tie = clock.schedule_once(30 * MS);

        assert_eq!(clock.advance(30 * MS), vec![fast, slow, tie]);
    }

    #[test]
    fn next_due_moves_the_clock_to_the_firing() {
        let mut clock = ManualClock::new();
        clock.schedule_once(40 * MS);

        assert!(clock.next_due(100 * MS).is_some());
        assert_eq!(clock.now(), 40 * MS);
        assert!(clock.next_due(100 * MS).is_none());
        clock.settle(100 * MS);
        assert_eq!(clock.now(), 100 * MS);
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let mut clock = ManualClock::new();
        let id = clock.schedule_repeating(10 * MS);
        clock.cancel(id);
        assert!(clock.advance(100 * MS).is_empty());
        // Cancelling twice is harmless.
        clock.cancel(id);
    }
}
