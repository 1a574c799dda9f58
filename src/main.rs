//! Terminal demo of the tick-ring spinners.
//!
//! Shows the `ticks` and `sweep` rings side by side.  Keys drive the focused
//! ring's lifecycle; see the status bar for bindings.

mod app;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use ring_spinner::runtime::{SceneNode, TimerId, TokioScheduler};
use ring_spinner::ui::{layout::AppLayout, theme::Theme, RingView};
use ring_spinner::{Rgb, Spinner, SpinnerConfig, Variant};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, DemoSpinner},
};

/// Redraw cadence while nothing else is happening.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Tick-ring spinner demo")]
struct Cli {
    /// Spinner config file (`key = value` lines).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks around each ring.
    #[arg(long)]
    ticks: Option<usize>,

    /// Milliseconds between animation steps.
    #[arg(long)]
    speed: Option<u64>,

    /// Fade-out duration in milliseconds.
    #[arg(long)]
    fade: Option<u64>,

    /// Tick colour (`#rrggbb`, `#rgb` or a basic name).
    #[arg(long)]
    color: Option<Rgb>,

    /// Spin both rings for this many milliseconds on launch.
    #[arg(long)]
    spin: Option<u64>,

    /// Duration of the `s` key spin, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    spin_key_ms: u64,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides on top.
    fn spinner_config(&self) -> Result<SpinnerConfig> {
        let mut config = match &self.config {
            Some(path) => SpinnerConfig::load(path)
                .with_context(|| format!("reading {}", path.display()))?,
            None => SpinnerConfig::default(),
        };
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(ms) = self.speed {
            config.speed = Duration::from_millis(ms);
        }
        if let Some(ms) = self.fade {
            config.fade_duration = Duration::from_millis(ms);
        }
        if let Some(color) = self.color {
            config.color = color;
        }
        Ok(config)
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let panes = [layout.left_area, layout.right_area];

    for (i, (spinner, area)) in state.spinners.iter().zip(panes).enumerate() {
        let variant = spinner.variant();
        let label = variant.state_label(spinner.is_running());
        let border = if i == state.focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        };
        let title_style = if spinner.is_running() {
            Theme::title_style()
        } else {
            Theme::idle_title_style()
        };
        let block = Block::default()
            .title(Line::styled(format!(" {variant} · {label} "), title_style))
            .borders(Borders::ALL)
            .border_style(border);

        frame.render_widget(RingView::new(spinner).block(block), area);
    }

    let hint = handler::status_bar_hint();
    let message = state.status.current();
    let status = Paragraph::new(message.as_deref().unwrap_or(&hint)).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    timers: &mut mpsc::UnboundedReceiver<TimerId>,
) -> Result<()> {
    let mut events = spawn_event_reader(FRAME_INTERVAL);

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            Some(id) = timers.recv() => {
                state.dispatch_timer(id);
                // Drain everything already queued before redrawing.
                while let Ok(id) = timers.try_recv() {
                    state.dispatch_timer(id);
                }
            }

            event = events.recv() => {
                match event {
                    Some(AppEvent::Key(k)) => handler::handle_key(state, k),
                    // The next draw picks up the new size.
                    Some(AppEvent::Resize(w, h)) => tracing::debug!(w, h, "terminal resized"),
                    Some(AppEvent::Frame) => {}
                    // Reader gave up on the terminal.
                    None => state.should_quit = true,
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never draw over the UI
        .init();

    let cli = Cli::parse();
    let config = cli.spinner_config()?;

    // ── spinners share one timer channel ──────────────────────
    let (timer_tx, mut timer_rx) = mpsc::unbounded_channel();
    let make = |variant| -> Result<DemoSpinner> {
        let scheduler = TokioScheduler::new(timer_tx.clone());
        Ok(Spinner::new(variant, config.clone(), scheduler, SceneNode::new())?)
    };
    let spinners = vec![make(Variant::Ticks)?, make(Variant::Sweep)?];
    let mut state = AppState::new(spinners, Duration::from_millis(cli.spin_key_ms));

    if let Some(ms) = cli.spin {
        for spinner in &mut state.spinners {
            spinner.spin(Duration::from_millis(ms));
        }
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state, &mut timer_rx).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
