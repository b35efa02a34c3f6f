//! Collapsing profile header preview.
//!
//! Run the binary to scroll a profile page in the terminal and watch the
//! header collapse.  Run with `--frame` to print one frame's parameters.

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};

use profile_header::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use profile_header::config::{self, AppConfig};
use profile_header::core::{compute_frame, Signals, Viewport};
use profile_header::ui::{layout::AppLayout, profile_view::ProfileView, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Collapsing profile header preview")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/profile-header/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the visual parameters for one frame and exit.
    #[arg(long)]
    frame: bool,

    /// Scroll amount for `--frame`, in points.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    scroll: f64,

    /// Title-to-header distance for `--frame`, in points.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    title_distance: f64,

    /// Viewport width for `--frame`, in points.
    #[arg(long, default_value_t = 390.0)]
    width: f64,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

type Term = Terminal<CrosstermBackend<Stderr>>;

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let user_config = AppConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let geometry = user_config.header_geometry()?;

    if cli.write_config {
        user_config.save(&config_path)?;
        println!("{}", config_path.display());
        return Ok(());
    }

    if cli.frame {
        let params = compute_frame(
            &geometry,
            Signals::new(cli.scroll, cli.title_distance),
            Viewport::new(cli.width),
        );
        println!("{params}");
        return Ok(());
    }

    let mut state = AppState::new(geometry, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stderr()))?;

    let outcome = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    outcome
}

/// Event loop: one engine pass, one draw, then wait for input.
async fn run(terminal: &mut Term, state: &mut AppState) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(50));

    loop {
        state.run_pass();

        terminal.draw(|frame| {
            let layout = AppLayout::from_area(frame.area());
            state.viewport_cols = layout.profile_area.width;
            state.viewport_rows = layout.profile_area.height;

            frame.render_widget(
                ProfileView::new(&state.params, state.content_offset, state.points_per_row()),
                layout.profile_area,
            );

            let hint = state.config.status_bar_hint();
            let signals: Signals = state.engine.signals();
            let readout = format!(
                " scroll {:>7.1} | title {:>7.1} | {} | {} ",
                signals.scroll_amount,
                signals.title_to_header_distance,
                state.params.regime.label(),
                state.engine.reduction().label(),
            );
            let status = Line::from(vec![
                Span::styled(readout, Theme::readout_style()),
                Span::raw(" "),
                Span::raw(state.status_message.as_deref().unwrap_or(&hint).to_string()),
            ]);
            frame.render_widget(
                Paragraph::new(status).style(Theme::status_bar_style()),
                layout.status_area,
            );
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(state, m),
            Some(AppEvent::Resize(w, h)) => {
                let layout = AppLayout::from_area(Rect::new(0, 0, w, h));
                state.viewport_cols = layout.profile_area.width;
                state.viewport_rows = layout.profile_area.height;
            }
            Some(AppEvent::Tick) => handler::handle_tick(state),
            None => break,
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
