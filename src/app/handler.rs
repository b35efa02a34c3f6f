//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::config::Action;

use super::state::AppState;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    let step = state.config.scroll_step;
    let page = (state.viewport_height() * 0.8).max(step);

    match action {
        Action::ScrollDown => state.scroll_by(step),
        Action::ScrollUp => state.scroll_by(-step),
        Action::PageDown => state.scroll_by(page),
        // A page jump stops at the top; pulling is done a step at a time.
        Action::PageUp => {
            let floor = state.content_offset.min(0.0);
            state.scroll_by(-page);
            state.content_offset = state.content_offset.max(floor);
        }
        Action::Reset => state.content_offset = 0.0,
        Action::ToggleReduction => {
            let next = state.engine.reduction().toggled();
            state.engine.set_reduction(next);
            state.config.reduction = next;
            state.status_message = Some(format!("Reduction: {}", next.label()));
            debug!(reduction = next.label(), "reduction toggled");
        }
        Action::Quit => state.should_quit = true,
    }
}

/// Process a mouse event (wheel only).
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let step = state.config.scroll_step;
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_by(step),
        MouseEventKind::ScrollUp => state.scroll_by(-step),
        _ => {}
    }
}

/// Idle tick: a pull releases back toward the collapse point.
pub fn handle_tick(state: &mut AppState) {
    if state.content_offset < 0.0 {
        state.content_offset = (state.content_offset + state.config.scroll_step).min(0.0);
    }
}
