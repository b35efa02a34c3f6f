//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── top bar ────────────────────────────────────────────────
    pub fn back_button_style() -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Color::Rgb(20, 20, 20))
            .add_modifier(Modifier::BOLD)
    }

    pub fn bar_title_modifier() -> Modifier {
        Modifier::BOLD
    }

    // ── profile body ───────────────────────────────────────────
    pub fn avatar_color() -> Color {
        Color::Rgb(196, 120, 72)
    }

    pub fn avatar_ring_color() -> Color {
        Color::Black
    }

    pub fn profile_name_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn handle_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn bio_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn follow_button_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn content_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn readout_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
