//! Input handling: maps key events to spinner lifecycle calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;

// ───────────────────────────────────────── actions ───────────

/// Everything a key can do in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Toggle,
    Spin,
    Fade,
    Reset,
    SwitchFocus,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the status-bar hint).
    pub const ALL: &[Action] = &[
        Action::Toggle,
        Action::Spin,
        Action::Fade,
        Action::Reset,
        Action::SwitchFocus,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Toggle => "start/stop",
            Action::Spin => "spin",
            Action::Fade => "fade",
            Action::Reset => "reset",
            Action::SwitchFocus => "focus",
            Action::Quit => "quit",
        }
    }

    pub fn key_hint(self) -> &'static str {
        match self {
            Action::Toggle => "Space",
            Action::Spin => "s",
            Action::Fade => "f",
            Action::Reset => "r",
            Action::SwitchFocus => "Tab",
            Action::Quit => "q",
        }
    }

    pub fn from_key(key: KeyEvent) -> Option<Self> {
        // Ctrl+c always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
            KeyCode::Char('s') => Some(Action::Spin),
            KeyCode::Char('f') => Some(Action::Fade),
            KeyCode::Char('r') => Some(Action::Reset),
            KeyCode::Tab => Some(Action::SwitchFocus),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Build the status-bar hint string.
pub fn status_bar_hint() -> String {
    Action::ALL
        .iter()
        .map(|a| format!("{}: {}", a.key_hint(), a.label()))
        .collect::<Vec<_>>()
        .join(" | ")
}

// ───────────────────────────────────────── dispatch ──────────

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = Action::from_key(key) else {
        return;
    };

    let status = state.status.clone();
    let spin_for = state.spin_duration;
    match action {
        Action::Quit => state.should_quit = true,
        Action::SwitchFocus => state.focus_next(),
        Action::Toggle => {
            let Some(spinner) = state.focused_mut() else {
                return;
            };
            if spinner.is_running() {
                let variant = spinner.variant();
                spinner.stop_then(move || status.post(format!("{variant}: stopped")));
            } else {
                spinner.start();
                status.post(format!("{}: started", spinner.variant()));
            }
        }
        Action::Spin => {
            let Some(spinner) = state.focused_mut() else {
                return;
            };
            let variant = spinner.variant();
            status.post(format!("{variant}: spinning for {}ms", spin_for.as_millis()));
            spinner.spin_then(spin_for, move || status.post(format!("{variant}: spin finished")));
        }
        Action::Fade => {
            let Some(spinner) = state.focused_mut() else {
                return;
            };
            let variant = spinner.variant();
            let duration = spinner.config().fade_duration;
            spinner.fade_then(duration, move || status.post(format!("{variant}: faded out")));
        }
        Action::Reset => {
            let Some(spinner) = state.focused_mut() else {
                return;
            };
            let variant = spinner.variant();
            spinner.reset_then(move || status.post(format!("{variant}: reset")));
        }
    }
    tracing::debug!(?action, focused = state.focused, "handled key");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::DemoSpinner;
    use ring_spinner::runtime::{SceneNode, TokioScheduler};
    use ring_spinner::{Spinner, SpinnerConfig, Variant};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(Action::from_key(key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(Action::from_key(key(KeyCode::Char('f'))), Some(Action::Fade));
        assert_eq!(Action::from_key(key(KeyCode::Tab)), Some(Action::SwitchFocus));
        assert_eq!(Action::from_key(key(KeyCode::Char('x'))), None);
        assert_eq!(
            Action::from_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn hint_lists_every_action() {
        let hint = status_bar_hint();
        for action in Action::ALL {
            assert!(hint.contains(action.label()), "{hint}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn keys_drive_the_focused_spinner() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let make = |variant| -> DemoSpinner {
            Spinner::new(variant, SpinnerConfig::default(), TokioScheduler::new(tx.clone()), SceneNode::new())
                .unwrap()
        };
        let mut state = AppState::new(
            vec![make(Variant::Ticks), make(Variant::Sweep)],
            Duration::from_secs(2),
        );

        handle_key(&mut state, key(KeyCode::Char(' ')));
        assert!(state.spinners[0].is_running());
        assert!(!state.spinners[1].is_running());
        assert_eq!(state.status.current().as_deref(), Some("ticks: started"));

        handle_key(&mut state, key(KeyCode::Tab));
        handle_key(&mut state, key(KeyCode::Char('s')));
        assert!(state.spinners[1].is_running());

        handle_key(&mut state, key(KeyCode::Char('r')));
        assert!(!state.spinners[1].is_running());
        assert_eq!(state.status.current().as_deref(), Some("sweep: reset"));

        handle_key(&mut state, key(KeyCode::Char('q')));
        assert!(state.should_quit);
    }
}
