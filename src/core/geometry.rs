//! Ring geometry and the opacity falloff that makes a static ring read as
//! motion.
//!
//! Angles are measured clockwise from the positive x axis in screen
//! coordinates (y grows downward), so slot 0 of a radial ring sits at
//! three o'clock and slot 0 of a rotational ring at twelve o'clock.

use std::f64::consts::TAU;

/// Fixed placement of one tick, computed once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Angular slot, `0..count`.
    pub slot: usize,
    /// Angular position in radians.
    pub angle: f64,
    /// Centre of the tick relative to the ring centre (offset included).
    pub offset: (f64, f64),
    /// Rotation applied to the tick so its long side points outward.
    pub rotation: f64,
}

impl Placement {
    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

// ───────────────────────────────────────── layouts ───────────

/// Radial layout: step of `360° / count`, the tick translated straight to
/// `(r·cos a, r·sin a)` and rotated by `a`.
pub fn radial(slot: usize, count: usize, radius: f64, center: (f64, f64)) -> Placement {
    let degrees = slot as f64 * (360.0 / count as f64);
    let angle = degrees.to_radians();
    Placement {
        slot,
        angle,
        offset: (
            center.0 + radius * angle.cos(),
            center.1 + radius * angle.sin(),
        ),
        rotation: angle,
    }
}

/// Rotational layout: step of `2π / count`, the tick placed at the fixed
/// local offset `(0, -r)` and the whole transform rotated by `a`.
pub fn rotational(slot: usize, count: usize, radius: f64, center: (f64, f64)) -> Placement {
    let angle = slot as f64 * (TAU / count as f64);
    // Rotating (0, -r) by a.
    let (sin, cos) = angle.sin_cos();
    Placement {
        slot,
        angle,
        offset: (center.0 + radius * sin, center.1 - radius * cos),
        rotation: angle,
    }
}

// ───────────────────────────────────────── falloff ───────────

/// Linear falloff `i/n + 0.1`: faint at slot 0, brightest at `n - 1`.
pub fn linear_falloff(index: usize, count: usize) -> f64 {
    index as f64 / count as f64 + 0.1
}

/// Quadratic falloff `pos² · 0.9 + 0.1` with `pos = 1 - ((n - i) mod n)/n`.
///
/// Index 0 is fully opaque, index 1 the faintest, and the rest ramp back up.
pub fn quadratic_falloff(index: usize, count: usize) -> f64 {
    let index = index % count;
    let pos = 1.0 - ((count - index) % count) as f64 / count as f64;
    pos * pos * 0.9 + 0.1
}

/// Shift `index` forward by `phase` steps around a ring of `count`.
pub fn phase_shift(index: usize, phase: u64, count: usize) -> usize {
    let n = count as u64;
    ((index as u64 + phase % n) % n) as usize
}
