//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ring_spinner::runtime::{TimerId, TokioScheduler};
use ring_spinner::Spinner;

pub type DemoSpinner = Spinner<TokioScheduler>;

/// Status-bar message slot.  Cloned into completion callbacks so a spinner
/// finishing on a timer can report back.
#[derive(Debug, Clone, Default)]
pub struct StatusLine(Rc<RefCell<Option<String>>>);

impl StatusLine {
    pub fn post(&self, message: impl Into<String>) {
        *self.0.borrow_mut() = Some(message.into());
    }

    pub fn current(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

/// Top-level application state.
pub struct AppState {
    /// The two demo rings, left then right.
    pub spinners: Vec<DemoSpinner>,
    /// Index into `spinners` that keys act on.
    pub focused: usize,
    /// How long `spin` runs before stopping itself.
    pub spin_duration: Duration,
    /// Controls the main event loop.
    pub should_quit: bool,
    pub status: StatusLine,
}

impl AppState {
    pub fn new(spinners: Vec<DemoSpinner>, spin_duration: Duration) -> Self {
        Self {
            spinners,
            focused: 0,
            spin_duration,
            should_quit: false,
            status: StatusLine::default(),
        }
    }

    pub fn focused_mut(&mut self) -> Option<&mut DemoSpinner> {
        self.spinners.get_mut(self.focused)
    }

    pub fn focus_next(&mut self) {
        if !self.spinners.is_empty() {
            self.focused = (self.focused + 1) % self.spinners.len();
        }
    }

    /// Route a timer firing to whichever spinner owns it.
    pub fn dispatch_timer(&mut self, id: TimerId) {
        if !self.spinners.iter_mut().any(|s| s.handle_timer(id)) {
            tracing::trace!(?id, "dropping unclaimed timer");
        }
    }
}
