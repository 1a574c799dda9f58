//! The spinner widget: builds the ring, drives it from a timer and owns its
//! start / stop / spin / fade / reset lifecycle.
//!
//! Everything runs on the thread that owns the widget.  Timers scheduled
//! through the [`Scheduler`] come back as [`TimerId`]s passed to
//! [`Spinner::handle_timer`]; an id the widget no longer expects (for
//! instance a tick that was already queued when `stop` ran) is ignored.

use std::time::Duration;

use crate::core::{SpinnerConfig, SpinnerResult};
use crate::runtime::{ManualClock, SceneNode, Scheduler, Surface, TimerId, VisualContainer};

use super::barrier::CompletionBarrier;
use super::pattern::{Stepper, Variant};
use super::tick::{OpacityState, TickElement};

/// Callback fired when a lifecycle operation finishes.
pub type Completion = Box<dyn FnOnce()>;

/// Whether the periodic scheduler is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// A rotating ring of ticks.
pub struct Spinner<S: Scheduler, C: VisualContainer = SceneNode> {
    config: SpinnerConfig,
    stepper: Stepper,
    /// Angular order at construction; the `Ticks` flavour rotates it.
    ticks: Vec<TickElement>,
    state: RunState,
    scheduler: S,
    container: C,
    /// Live repeating step timer, only while running and not fading.
    tick_timer: Option<TimerId>,
    /// Pending auto-stop from `spin`.
    spin_timer: Option<(TimerId, Option<Completion>)>,
    /// Pending fade, released once every tick has faded out.
    fade: Option<CompletionBarrier<Option<Completion>>>,
}

impl<S: Scheduler, C: VisualContainer> Spinner<S, C> {
    /// Build a ring of `config.ticks` ticks and attach each one to
    /// `container`.  The spinner starts stopped.
    pub fn new(variant: Variant, config: SpinnerConfig, scheduler: S, mut container: C) -> SpinnerResult<Self> {
        config.validate()?;

        let count = config.ticks;
        let radius = config.radius();
        let ticks = (0..count)
            .map(|slot| {
                let surface = Surface::tick(&config);
                container.attach_child(surface);
                TickElement {
                    surface,
                    placement: variant.place(slot, count, radius, config.offset),
                    opacity: OpacityState::new(variant.falloff(slot, count)),
                }
            })
            .collect();

        tracing::debug!(%variant, count, radius, "built spinner ring");

        Ok(Self {
            config,
            stepper: Stepper::new(variant),
            ticks,
            state: RunState::Stopped,
            scheduler,
            container,
            tick_timer: None,
            spin_timer: None,
            fade: None,
        })
    }

    /// Radial ring with a linear trail, advanced by rotating the tick list.
    pub fn ticks(config: SpinnerConfig, scheduler: S, container: C) -> SpinnerResult<Self> {
        Self::new(Variant::Ticks, config, scheduler, container)
    }

    /// Rotational ring with a quadratic trail, advanced by a phase counter.
    pub fn sweep(config: SpinnerConfig, scheduler: S, container: C) -> SpinnerResult<Self> {
        Self::new(Variant::Sweep, config, scheduler, container)
    }

    // ── lifecycle ─────────────────────────────────────────────

    /// Show the ring and begin stepping.  A no-op while already running, so
    /// repeated calls never stack timers.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            tracing::debug!("start ignored: already running");
            return;
        }
        // A fade left over from a stopped spinner no longer applies.
        self.cancel_fade();
        self.stepper.apply(&mut self.ticks);

        self.state = RunState::Running;
        self.container.show();
        self.tick_timer = Some(self.scheduler.schedule_repeating(self.config.speed));
        tracing::debug!(variant = %self.variant(), speed = ?self.config.speed, "spinner started");
    }

    /// Stop stepping, cancel every pending timer and hide the ring.
    pub fn stop(&mut self) {
        self.stop_with(None);
    }

    /// [`Spinner::stop`], then call `done`.
    pub fn stop_then(&mut self, done: impl FnOnce() + 'static) {
        self.stop_with(Some(Box::new(done)));
    }

    /// Start, then stop automatically after `duration`.
    pub fn spin(&mut self, duration: Duration) {
        self.spin_with(duration, None);
    }

    /// [`Spinner::spin`], calling `done` once the automatic stop happens.
    pub fn spin_then(&mut self, duration: Duration, done: impl FnOnce() + 'static) {
        self.spin_with(duration, Some(Box::new(done)));
    }

    /// Tween every tick to transparent over `duration`, then stop.
    pub fn fade(&mut self, duration: Duration) {
        self.fade_with(duration, None);
    }

    /// [`Spinner::fade`], calling `done` once after the last tick fades.
    pub fn fade_then(&mut self, duration: Duration, done: impl FnOnce() + 'static) {
        self.fade_with(duration, Some(Box::new(done)));
    }

    /// Restore the initial gradient and tick order, then stop.
    pub fn reset(&mut self) {
        self.reset_with(None);
    }

    /// [`Spinner::reset`], calling `done` after the stop.
    pub fn reset_then(&mut self, done: impl FnOnce() + 'static) {
        self.reset_with(Some(Box::new(done)));
    }

    fn stop_with(&mut self, done: Option<Completion>) {
        let was_running = self.state == RunState::Running;
        self.state = RunState::Stopped;

        if let Some(id) = self.tick_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some((id, _dropped)) = self.spin_timer.take() {
            self.scheduler.cancel(id);
        }
        self.cancel_fade();

        if was_running {
            self.container.hide();
            tracing::debug!(variant = %self.variant(), phase = self.stepper.phase(), "spinner stopped");
        }
        if let Some(done) = done {
            done();
        }
    }

    fn spin_with(&mut self, duration: Duration, done: Option<Completion>) {
        // A newer spin supersedes the older auto-stop and its callback.
        if let Some((id, _superseded)) = self.spin_timer.take() {
            self.scheduler.cancel(id);
            tracing::debug!("previous spin superseded");
        }
        if self.fade.is_some() {
            // Still running, so `start` would not bring the steps back.
            self.cancel_fade();
            self.stepper.apply(&mut self.ticks);
            self.tick_timer = Some(self.scheduler.schedule_repeating(self.config.speed));
            tracing::debug!("fade interrupted by spin");
        }
        self.start();
        let id = self.scheduler.schedule_once(duration);
        self.spin_timer = Some((id, done));
    }

    fn fade_with(&mut self, duration: Duration, done: Option<Completion>) {
        self.cancel_fade();
        // Stepping would overwrite the tween.
        if let Some(id) = self.tick_timer.take() {
            self.scheduler.cancel(id);
        }
        // The fade now decides when the spinner stops, so a pending spin
        // hands its callback over instead of firing mid-fade.
        let spin_done = self.spin_timer.take().and_then(|(id, spin_done)| {
            self.scheduler.cancel(id);
            spin_done
        });
        let done = chain(spin_done, done);

        if duration.is_zero() {
            for tick in &mut self.ticks {
                tick.opacity.set(0.0);
            }
            self.stop_with(done);
            return;
        }

        let now = self.scheduler.now();
        let curve = self.config.fade_curve;
        for tick in &mut self.ticks {
            let id = self.scheduler.schedule_once(duration);
            tick.opacity.animate(0.0, duration, curve, now, id);
        }
        self.fade = Some(CompletionBarrier::new(self.ticks.len(), done));
        tracing::debug!(?duration, %curve, "fade started");
    }

    fn reset_with(&mut self, done: Option<Completion>) {
        self.cancel_fade();
        self.stepper.rewind(&mut self.ticks);
        self.stop_with(done);
    }

    /// Drop a pending fade: freeze every tween and cancel its timer.  The
    /// fade's callback is dropped without being called.
    fn cancel_fade(&mut self) {
        if self.fade.take().is_none() {
            return;
        }
        let now = self.scheduler.now();
        for tick in &mut self.ticks {
            if let Some(id) = tick.opacity.halt(now) {
                self.scheduler.cancel(id);
            }
        }
    }

    // ── timer dispatch ────────────────────────────────────────

    /// Deliver a timer firing.  Returns `false` for ids this spinner does not
    /// own (or no longer expects).
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.tick_timer == Some(id) {
            if self.state == RunState::Running {
                self.stepper.step(&mut self.ticks);
                tracing::trace!(phase = self.stepper.phase(), "tick");
            }
            return true;
        }

        if matches!(self.spin_timer, Some((spin, _)) if spin == id) {
            let done = self.spin_timer.take().and_then(|(_, done)| done);
            tracing::debug!("spin elapsed");
            self.stop_with(done);
            return true;
        }

        let Some(tick) = self.ticks.iter_mut().find(|t| t.opacity.completion() == Some(id)) else {
            return false;
        };
        tick.opacity.settle();
        let Some(barrier) = self.fade.as_mut() else {
            return true;
        };
        let released = barrier.arrive();
        tracing::trace!(remaining = barrier.remaining(), "tick faded");
        if let Some(done) = released {
            self.fade = None;
            tracing::debug!("fade complete");
            self.stop_with(done);
        }
        true
    }

    // ── accessors ─────────────────────────────────────────────

    pub fn variant(&self) -> Variant {
        self.stepper.variant()
    }

    pub fn config(&self) -> &SpinnerConfig {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Steps taken since construction or the last reset.
    pub fn phase(&self) -> u64 {
        self.stepper.phase()
    }

    /// Ticks in their current list order.
    pub fn tick_elements(&self) -> &[TickElement] {
        &self.ticks
    }

    /// Current opacity of every tick, indexed by angular slot.
    pub fn opacities(&self) -> Vec<f64> {
        let now = self.scheduler.now();
        let mut out = vec![0.0; self.ticks.len()];
        for tick in &self.ticks {
            out[tick.slot()] = tick.opacity.value_at(now);
        }
        out
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Run `first` then `then`, whichever of them are present.
fn chain(first: Option<Completion>, then: Option<Completion>) -> Option<Completion> {
    match (first, then) {
        (Some(first), Some(then)) => Some(Box::new(move || {
            first();
            then();
        })),
        (first, None) => first,
        (None, then) => then,
    }
}

impl<C: VisualContainer> Spinner<ManualClock, C> {
    /// Move virtual time forward by `dt`, delivering every timer that comes
    /// due, including ones re-armed by the firings themselves.
    pub fn advance(&mut self, dt: Duration) {
        let until = self.scheduler.now() + dt;
        while let Some(id) = self.scheduler.next_due(until) {
            self.handle_timer(id);
        }
        self.scheduler.settle(until);
    }
}
