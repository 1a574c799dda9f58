//! Spinner widgets – ring construction, stepping and lifecycle.

pub mod barrier;
pub mod pattern;
pub mod spinner;
pub mod tick;

pub use pattern::Variant;
pub use spinner::{Completion, RunState, Spinner};
pub use tick::{OpacityState, TickElement};
