//! One tick of the ring and its animatable opacity.

use std::time::Duration;

use crate::core::geometry::Placement;
use crate::core::Curve;
use crate::runtime::{Surface, TimerId};

// ───────────────────────────────────────── opacity ───────────

/// An in-flight opacity tween.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: f64,
    to: f64,
    start: Duration,
    duration: Duration,
    curve: Curve,
    /// Timer that reports completion.
    done: TimerId,
}

impl Transition {
    fn value_at(&self, now: Duration) -> f64 {
        let elapsed = now.saturating_sub(self.start);
        let t = if self.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / self.duration.as_secs_f64()
        };
        self.from + (self.to - self.from) * self.curve.apply(t)
    }
}

/// Opacity of one tick: either a resting value or a tween toward one.
#[derive(Debug, Clone, PartialEq)]
pub struct OpacityState {
    value: f64,
    transition: Option<Transition>,
}

impl OpacityState {
    pub fn new(value: f64) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            transition: None,
        }
    }

    /// Jump to `value`, dropping any tween.  The caller owns cancelling the
    /// dropped tween's completion timer.
    pub fn set(&mut self, value: f64) {
        self.value = value.clamp(0.0, 1.0);
        self.transition = None;
    }

    /// Tween from the current value (as seen at `now`) to `to`.
    pub fn animate(&mut self, to: f64, duration: Duration, curve: Curve, now: Duration, done: TimerId) {
        let from = self.value_at(now);
        self.value = from;
        self.transition = Some(Transition {
            from,
            to: to.clamp(0.0, 1.0),
            start: now,
            duration,
            curve,
            done,
        });
    }

    /// Opacity at `now`, clamped to `[0, 1]` even for overshooting curves.
    pub fn value_at(&self, now: Duration) -> f64 {
        match &self.transition {
            Some(tr) => tr.value_at(now).clamp(0.0, 1.0),
            None => self.value,
        }
    }

    /// Completion timer of the running tween, if any.
    pub fn completion(&self) -> Option<TimerId> {
        self.transition.map(|tr| tr.done)
    }

    /// Finish the tween at its target value.
    pub fn settle(&mut self) {
        if let Some(tr) = self.transition.take() {
            self.value = tr.to;
        }
    }

    /// Freeze the tween where it is at `now`.  Returns the completion timer
    /// so the caller can cancel it.
    pub fn halt(&mut self, now: Duration) -> Option<TimerId> {
        let done = self.completion();
        self.value = self.value_at(now);
        self.transition = None;
        done
    }
}

// ───────────────────────────────────────── tick ──────────────

/// A visual primitive plus its fixed placement and live opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct TickElement {
    pub surface: Surface,
    pub placement: Placement,
    pub opacity: OpacityState,
}

impl TickElement {
    /// Angular slot this tick occupies; never changes.
    pub fn slot(&self) -> usize {
        self.placement.slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn linear_tween_interpolates_and_settles() {
        let done = TimerId::next();
        let mut o = OpacityState::new(0.8);
        o.animate(0.0, 100 * MS, Curve::Linear, 1000 * MS, done);

        assert_eq!(o.completion(), Some(done));
        assert!((o.value_at(1000 * MS) - 0.8).abs() < 1e-9);
        assert!((o.value_at(1050 * MS) - 0.4).abs() < 1e-9);
        assert_eq!(o.value_at(5000 * MS), 0.0);

        o.settle();
        assert_eq!(o.completion(), None);
        assert_eq!(o.value_at(0 * MS), 0.0);
    }

    #[test]
    fn halt_freezes_mid_tween() {
        let done = TimerId::next();
        let mut o = OpacityState::new(1.0);
        o.animate(0.0, 100 * MS, Curve::Linear, 0 * MS, done);

        assert_eq!(o.halt(25 * MS), Some(done));
        assert!((o.value_at(999 * MS) - 0.75).abs() < 1e-9);
        assert_eq!(o.halt(30 * MS), None);
    }

    #[test]
    fn overshooting_curves_stay_in_range() {
        let mut o = OpacityState::new(0.0);
        o.animate(1.0, 100 * MS, Curve::OutBack, 0 * MS, TimerId::next());
        for ms in 0..=100 {
            let v = o.value_at(ms * MS);
            assert!((0.0..=1.0).contains(&v), "{v} at {ms}ms");
        }
    }

    #[test]
    fn set_clamps_and_drops_the_tween() {
        let mut o = OpacityState::new(2.0);
        assert_eq!(o.value_at(0 * MS), 1.0);
        o.animate(0.0, 10 * MS, Curve::Linear, 0 * MS, TimerId::next());
        o.set(-1.0);
        assert_eq!(o.completion(), None);
        assert_eq!(o.value_at(5 * MS), 0.0);
    }
}
