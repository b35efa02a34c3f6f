//! User configuration — header geometry, terminal scale and keybindings.
//!
//! Stored as plain `key = value` lines at
//! `$XDG_CONFIG_HOME/profile-header/config.toml` (default
//! `~/.config/profile-header/config.toml`).  A missing file means defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;
use tracing::info;

use crate::core::geometry::ensure_positive;
use crate::core::{GeometryError, GeometrySpec, HeaderGeometry, Reduction};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid value for `{key}`: {value:?}")]
    InvalidValue { key: String, value: String },
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    Reset,
    ToggleReduction,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollDown,
        Action::ScrollUp,
        Action::PageDown,
        Action::PageUp,
        Action::Reset,
        Action::ToggleReduction,
        Action::Quit,
    ];

    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollDown => "scroll_down",
            Action::ScrollUp => "scroll_up",
            Action::PageDown => "page_down",
            Action::PageUp => "page_up",
            Action::Reset => "reset",
            Action::ToggleReduction => "toggle_reduction",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SHIFT);

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & MODIFIER_MASK) == (event.modifiers & MODIFIER_MASK)
    }

    /// Short form for the status bar (e.g. `"↓"`, `"Ctrl+c"`).
    pub fn display(&self) -> String {
        self.render(true)
    }

    fn to_config_string(&self) -> String {
        self.render(false)
    }

    fn render(&self, pretty: bool) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        let key = match (self.code, pretty) {
            (KeyCode::Char(' '), _) => "Space".to_string(),
            (KeyCode::Char(c), _) => c.to_string(),
            (KeyCode::Up, true) => "↑".into(),
            (KeyCode::Down, true) => "↓".into(),
            (KeyCode::PageUp, true) => "PgUp".into(),
            (KeyCode::PageDown, true) => "PgDn".into(),
            (KeyCode::Up, false) => "Up".into(),
            (KeyCode::Down, false) => "Down".into(),
            (KeyCode::PageUp, false) => "PageUp".into(),
            (KeyCode::PageDown, false) => "PageDown".into(),
            (KeyCode::Home, _) => "Home".into(),
            (KeyCode::End, _) => "End".into(),
            (KeyCode::Enter, _) => "Enter".into(),
            (KeyCode::Esc, _) => "Esc".into(),
            (KeyCode::Tab, _) => "Tab".into(),
            (KeyCode::F(n), _) => format!("F{n}"),
            (other, _) => format!("{other:?}"),
        };
        s.push_str(&key);
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Down"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for part in mods {
            modifiers |= match part.to_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub geometry: GeometrySpec,
    /// Layout points per terminal row.
    pub points_per_row: f64,
    /// Points moved per scroll key press / wheel notch.
    pub scroll_step: f64,
    pub reduction: Reduction,
    pub bindings: HashMap<Action, Vec<KeyBind>>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            geometry: GeometrySpec::default(),
            points_per_row: 5.0,
            scroll_step: 10.0,
            reduction: Reduction::Sum,
            bindings: Self::default_bindings(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::{Quit, Reset, ScrollDown, ScrollUp, ToggleReduction};
        use KeyCode::{Char, Down, Esc, Home, Up};
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n)]);
        m.insert(Reset, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(ToggleReduction, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Validated geometry for the engine.
    pub fn header_geometry(&self) -> Result<HeaderGeometry, GeometryError> {
        HeaderGeometry::new(self.geometry)
    }

    /// Find the action bound to a key event; the binding with the most
    /// modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: reset | {}: reduction | {}: quit",
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::Reset),
            self.short_binding(Action::ToggleReduction),
            self.short_binding(Action::Quit),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse_config(&contents)?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    pub fn parse_config(s: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            if let Some(slot) = config.numeric_slot(key) {
                *slot = parse_number(key, value)?;
                continue;
            }
            if key == "reduction" {
                config.reduction = Reduction::parse(value).ok_or_else(|| ConfigError::InvalidValue {
                    key: key.into(),
                    value: value.into(),
                })?;
                continue;
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };
            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        HeaderGeometry::new(config.geometry)?;
        ensure_positive("points_per_row", config.points_per_row)?;
        ensure_positive("scroll_step", config.scroll_step)?;
        Ok(config)
    }

    fn numeric_slot(&mut self, key: &str) -> Option<&mut f64> {
        let g = &mut self.geometry;
        Some(match key {
            "origin_header_height" => &mut g.origin_header_height,
            "shrink_scale" => &mut g.shrink_scale,
            "original_icon_size" => &mut g.original_icon_size,
            "overlap_icon_scale" => &mut g.overlap_icon_scale,
            "scrolled_completion_threshold" => &mut g.scrolled_completion_threshold,
            "pulled_completion_threshold" => &mut g.pulled_completion_threshold,
            "max_blur_scrolled" => &mut g.max_blur_scrolled,
            "max_blur_pulled" => &mut g.max_blur_pulled,
            "max_overlay_opacity" => &mut g.max_overlay_opacity,
            "points_per_row" => &mut self.points_per_row,
            "scroll_step" => &mut self.scroll_step,
            _ => return None,
        })
    }

    fn serialise(&self) -> String {
        let g = &self.geometry;
        let mut lines = vec![
            "# profile-header configuration".to_string(),
            String::new(),
            "[header]".to_string(),
            format!("origin_header_height = {}", g.origin_header_height),
            format!("shrink_scale = {}", g.shrink_scale),
            format!("original_icon_size = {}", g.original_icon_size),
            format!("overlap_icon_scale = {}", g.overlap_icon_scale),
            format!("scrolled_completion_threshold = {}", g.scrolled_completion_threshold),
            format!("pulled_completion_threshold = {}", g.pulled_completion_threshold),
            format!("max_blur_scrolled = {}", g.max_blur_scrolled),
            format!("max_blur_pulled = {}", g.max_blur_pulled),
            format!("max_overlay_opacity = {}", g.max_overlay_opacity),
            String::new(),
            "[terminal]".to_string(),
            format!("points_per_row = {}", self.points_per_row),
            format!("scroll_step = {}", self.scroll_step),
            "# sum | last".to_string(),
            format!("reduction = {}", self.reduction.label()),
            String::new(),
            "[keys]".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64, ConfigError> {
    value.parse::<f64>().map_err(|_| ConfigError::InvalidValue {
        key: key.into(),
        value: value.into(),
    })
}

/// Return the config file path (`$XDG_CONFIG_HOME/profile-header/config.toml`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("profile-header").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::parse_config("").unwrap();
        assert_eq!(config.geometry, GeometrySpec::default());
        assert_eq!(config.reduction, Reduction::Sum);
        assert_eq!(config.match_key(key(KeyCode::Char('j'))), Some(Action::ScrollDown));
    }

    #[test]
    fn overrides_geometry_and_bindings() {
        let text = "\
# comment
[header]
origin_header_height = 200
shrink_scale = 0.25
reduction = last
quit = Ctrl+x, F10
unknown_key = 3
";
        let config = AppConfig::parse_config(text).unwrap();
        assert_eq!(config.geometry.origin_header_height, 200.0);
        assert_eq!(config.geometry.shrink_scale, 0.25);
        assert_eq!(config.reduction, Reduction::LastWriteWins);
        assert_eq!(
            config.match_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(config.match_key(key(KeyCode::F(10))), Some(Action::Quit));
        assert_eq!(config.match_key(key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn malformed_number_is_rejected() {
        let err = AppConfig::parse_config("max_blur_pulled = lots").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "max_blur_pulled"));
    }

    #[test]
    fn invalid_geometry_is_rejected_at_load() {
        let err = AppConfig::parse_config("overlap_icon_scale = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Geometry(GeometryError::ScaleOutOfRange { field: "overlap_icon_scale", .. })
        ));
    }

    #[test]
    fn non_positive_terminal_scale_is_rejected() {
        assert!(AppConfig::parse_config("points_per_row = 0").is_err());
        assert!(AppConfig::parse_config("scroll_step = -2").is_err());
    }

    #[test]
    fn non_finite_terminal_scale_is_rejected() {
        let err = AppConfig::parse_config("points_per_row = nan").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Geometry(GeometryError::NonPositive { field: "points_per_row", .. })
        ));
        let err = AppConfig::parse_config("scroll_step = inf").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Geometry(GeometryError::NonPositive { field: "scroll_step", .. })
        ));
    }

    #[test]
    fn default_page_keys_map_to_page_actions() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::PageDown)), Some(Action::PageDown));
        assert_eq!(config.match_key(key(KeyCode::PageUp)), Some(Action::PageUp));
        assert_eq!(config.match_key(key(KeyCode::Char(' '))), Some(Action::PageDown));
    }

    #[test]
    fn serialised_config_reads_back() {
        let mut config = AppConfig::default();
        config.geometry.max_blur_pulled = 42.0;
        config.reduction = Reduction::LastWriteWins;
        let reread = AppConfig::parse_config(&config.serialise()).unwrap();
        assert_eq!(reread.geometry, config.geometry);
        assert_eq!(reread.reduction, config.reduction);
        assert_eq!(reread.bindings, config.bindings);
    }

    #[test]
    fn key_strings_parse_with_modifiers() {
        let bind = KeyBind::parse("Alt+Shift+PgDn").unwrap();
        assert_eq!(bind.code, KeyCode::PageDown);
        assert_eq!(bind.modifiers, KeyModifiers::ALT | KeyModifiers::SHIFT);
        assert!(KeyBind::parse("Hyper+x").is_none());
        assert_eq!(KeyBind::new(KeyCode::Down, KeyModifiers::NONE).display(), "↓");
    }
}
