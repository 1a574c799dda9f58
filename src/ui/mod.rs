//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes spinner snapshots and turns them into cells on the
//! terminal.  No timers are scheduled here.

pub mod layout;
pub mod ring;
pub mod theme;

pub use ring::RingView;
