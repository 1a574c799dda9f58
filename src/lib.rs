//! Rotating tick-ring loading spinners.
//!
//! A spinner is a ring of small ticks whose opacity gradient steps around
//! the ring on a timer.  The widgets in [`widget`] are host-agnostic: timers
//! come from a [`runtime::Scheduler`] and the ticks are handed to a
//! [`runtime::VisualContainer`].  [`ui`] draws a spinner with Ratatui.

pub mod core;
pub mod runtime;
pub mod ui;
pub mod widget;

pub use crate::core::{Curve, Rgb, SpinnerConfig, SpinnerError, SpinnerResult};
pub use crate::widget::{RunState, Spinner, Variant};
