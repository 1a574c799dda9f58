//! Core model – configuration, ring geometry, opacity falloff and easing.
//!
//! Nothing in this module depends on any TUI or rendering crate, and nothing
//! here touches a clock.  The widgets in [`crate::widget`] compose these
//! pieces with a scheduler and a render host.

pub mod color;
pub mod config;
pub mod curve;
pub mod error;
pub mod geometry;

pub use color::Rgb;
pub use config::SpinnerConfig;
pub use curve::Curve;
pub use error::{SpinnerError, SpinnerResult};
