//! The two ring flavours and how each advances its gradient.
//!
//! Both keep every tick at its fixed angular slot and only move the
//! opacity gradient, one slot per step: after a step, slot `s` shows what
//! slot `s + 1` showed before.  At any moment the opacities by slot are a
//! cyclic rotation of the initial gradient.

use std::fmt;

use crate::core::geometry::{self, Placement};

use super::tick::TickElement;

/// Which ring flavour a spinner draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Radial placement in degrees, linear falloff, advanced by rotating
    /// the tick list itself.
    Ticks,
    /// Rotational placement in radians, quadratic falloff, advanced by a
    /// phase counter over fixed ticks.
    Sweep,
}

impl Variant {
    pub fn place(self, slot: usize, count: usize, radius: f64, center: (f64, f64)) -> Placement {
        match self {
            Variant::Ticks => geometry::radial(slot, count, radius, center),
            Variant::Sweep => geometry::rotational(slot, count, radius, center),
        }
    }

    pub fn falloff(self, index: usize, count: usize) -> f64 {
        match self {
            Variant::Ticks => geometry::linear_falloff(index, count),
            Variant::Sweep => geometry::quadratic_falloff(index, count),
        }
    }

    /// How this flavour names its run state.
    pub fn state_label(self, running: bool) -> &'static str {
        match (self, running) {
            (Variant::Ticks, true) => "ON",
            (Variant::Ticks, false) => "OFF",
            (Variant::Sweep, true) => "running",
            (Variant::Sweep, false) => "stopped",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Ticks => "ticks",
            Variant::Sweep => "sweep",
        })
    }
}

/// Advances a ring's gradient one step at a time.
#[derive(Debug, Clone)]
pub struct Stepper {
    variant: Variant,
    /// Steps taken since construction or the last rewind.
    phase: u64,
}

impl Stepper {
    pub fn new(variant: Variant) -> Self {
        Self { variant, phase: 0 }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn phase(&self) -> u64 {
        self.phase
    }

    /// One animation step.
    pub fn step(&mut self, ticks: &mut [TickElement]) {
        self.phase = self.phase.wrapping_add(1);
        if self.variant == Variant::Ticks {
            // The last tick moves to the front, so every tick's list
            // position (and with it its falloff index) grows by one.
            ticks.rotate_right(1);
        }
        self.apply(ticks);
    }

    /// Write the gradient for the current phase onto every tick.
    pub fn apply(&self, ticks: &mut [TickElement]) {
        let n = ticks.len();
        match self.variant {
            // List position decides the opacity; the rotation did the shifting.
            Variant::Ticks => {
                for (pos, tick) in ticks.iter_mut().enumerate() {
                    tick.opacity.set(self.variant.falloff(pos, n));
                }
            }
            Variant::Sweep => {
                for tick in ticks.iter_mut() {
                    let index = geometry::phase_shift(tick.slot(), self.phase, n);
                    tick.opacity.set(self.variant.falloff(index, n));
                }
            }
        }
    }

    /// Back to phase 0 with ticks in slot order.
    pub fn rewind(&mut self, ticks: &mut [TickElement]) {
        self.phase = 0;
        ticks.sort_by_key(TickElement::slot);
        self.apply(ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SpinnerConfig;
    use crate::runtime::Surface;
    use crate::widget::tick::OpacityState;
    use std::time::Duration;

    fn ring(variant: Variant, n: usize) -> Vec<TickElement> {
        let surface = Surface::tick(&SpinnerConfig::default());
        (0..n)
            .map(|slot| TickElement {
                surface,
                placement: variant.place(slot, n, 10.0, (0.0, 0.0)),
                opacity: OpacityState::new(variant.falloff(slot, n)),
            })
            .collect()
    }

    fn by_slot(ticks: &[TickElement]) -> Vec<f64> {
        let mut v = vec![0.0; ticks.len()];
        for t in ticks {
            v[t.slot()] = t.opacity.value_at(Duration::ZERO);
        }
        v
    }

    #[test]
    fn every_step_is_a_cyclic_rotation_of_the_initial_gradient() {
        for variant in [Variant::Ticks, Variant::Sweep] {
            let mut ticks = ring(variant, 6);
            let initial = by_slot(&ticks);
            let mut stepper = Stepper::new(variant);

            for step in 1..=13u64 {
                stepper.step(&mut ticks);
                let now = by_slot(&ticks);
                let k = (step % 6) as usize;
                let mut expected = initial.clone();
                expected.rotate_left(k);
                assert_eq!(now, expected, "{variant} step {step}");
            }
        }
    }

    #[test]
    fn rotating_the_list_moves_the_last_tick_to_the_front() {
        let mut ticks = ring(Variant::Ticks, 4);
        Stepper::new(Variant::Ticks).step(&mut ticks);
        let order: Vec<usize> = ticks.iter().map(TickElement::slot).collect();
        assert_eq!(order, vec![3, 0, 1, 2]);
    }

    #[test]
    fn sweep_never_reorders_ticks() {
        let mut ticks = ring(Variant::Sweep, 5);
        let mut stepper = Stepper::new(Variant::Sweep);
        for _ in 0..7 {
            stepper.step(&mut ticks);
        }
        let order: Vec<usize> = ticks.iter().map(TickElement::slot).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(stepper.phase(), 7);
    }

    #[test]
    fn rewind_restores_order_and_gradient() {
        for variant in [Variant::Ticks, Variant::Sweep] {
            let mut ticks = ring(variant, 7);
            let initial = ticks.clone();
            let mut stepper = Stepper::new(variant);
            for _ in 0..5 {
                stepper.step(&mut ticks);
            }
            stepper.rewind(&mut ticks);
            assert_eq!(ticks, initial, "{variant}");
            assert_eq!(stepper.phase(), 0);
        }
    }
}
