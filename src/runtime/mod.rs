//! Host runtime seams: timers and the render tree.
//!
//! A spinner never talks to a clock or a GUI toolkit directly.  It asks a
//! [`Scheduler`] for timers and hands its surfaces to a [`VisualContainer`].
//! Timer firings come back to the widget as [`TimerId`]s on whatever thread
//! owns it, so no locking is involved anywhere.

pub mod manual;
pub mod tokio_timer;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::core::{Rgb, SpinnerConfig};

pub use manual::ManualClock;
pub use tokio_timer::TokioScheduler;

// ───────────────────────────────────────── timers ────────────

/// Handle for a scheduled timer.  Unique across every scheduler in the
/// process, so several widgets can share one delivery channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TimerId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// One-shot and recurring timers plus cancellation.
pub trait Scheduler {
    /// Time elapsed since this scheduler's origin.
    fn now(&self) -> Duration;

    /// Fire `id` once after `delay`.
    fn schedule_once(&mut self, delay: Duration) -> TimerId;

    /// Fire `id` every `period`, first after one full period.
    fn schedule_repeating(&mut self, period: Duration) -> TimerId;

    /// Stop `id` from firing again.  Unknown or finished ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

// ───────────────────────────────────────── render tree ───────

/// The visual primitive behind one tick: a small rounded rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub color: Rgb,
    pub border_radius: f64,
}

impl Surface {
    pub fn tick(config: &SpinnerConfig) -> Self {
        Self {
            width: config.tick_width,
            height: config.tick_height,
            color: config.color,
            border_radius: config.border_radius,
        }
    }
}

/// Minimal render-tree capability a spinner needs from its host.
pub trait VisualContainer {
    fn attach_child(&mut self, surface: Surface);
    fn show(&mut self);
    fn hide(&mut self);
}

/// Plain in-memory render node.  Records what was attached and whether the
/// node is currently shown.
#[derive(Debug, Default)]
pub struct SceneNode {
    children: Vec<Surface>,
    visible: bool,
}

impl SceneNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn children(&self) -> &[Surface] {
        &self.children
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl VisualContainer for SceneNode {
    fn attach_child(&mut self, surface: Surface) {
        self.children.push(surface);
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_ids_are_unique_and_increasing() {
        let a = TimerId::next();
        let b = TimerId::next();
        assert!(b > a);
    }

    #[test]
    fn scene_node_tracks_children_and_visibility() {
        let mut node = SceneNode::new();
        assert!(!node.is_visible());

        node.attach_child(Surface::tick(&SpinnerConfig::default()));
        node.show();
        assert_eq!(node.children().len(), 1);
        assert!(node.is_visible());

        node.hide();
        assert!(!node.is_visible());
    }
}
