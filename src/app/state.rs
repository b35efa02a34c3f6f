//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and event handling works on `&mut AppState`.

use crate::config::AppConfig;
use crate::core::{HeaderEngine, HeaderGeometry, Viewport, VisualParameters};

use super::measure::ProfileLayout;

/// Terminal cells are roughly twice as tall as they are wide.
pub const CELL_ASPECT: f64 = 2.0;

/// Top-level application state.
pub struct AppState {
    pub engine: HeaderEngine,
    pub layout: ProfileLayout,
    pub config: AppConfig,
    /// Scroll position of the profile column in points.  Negative while
    /// pulling down past the top.
    pub content_offset: f64,
    /// Parameters from the most recent pass.
    pub params: VisualParameters,
    /// Drawable area in cells, updated on every draw.
    pub viewport_cols: u16,
    pub viewport_rows: u16,
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(geometry: HeaderGeometry, config: AppConfig) -> Self {
        let engine = HeaderEngine::new(geometry, config.reduction);
        let params = engine.frame(Viewport::new(0.0));
        Self {
            layout: ProfileLayout::new(&geometry),
            engine,
            config,
            content_offset: 0.0,
            params,
            viewport_cols: 0,
            viewport_rows: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn points_per_row(&self) -> f64 {
        self.config.points_per_row
    }

    /// Viewport in points, as handed to the engine.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(f64::from(self.viewport_cols) * self.points_per_row() / CELL_ASPECT)
    }

    pub fn viewport_height(&self) -> f64 {
        f64::from(self.viewport_rows) * self.points_per_row()
    }

    /// Lowest offset a pull may reach.
    pub fn min_offset(&self) -> f64 {
        -self.engine.geometry().pulled_completion_threshold()
    }

    pub fn max_offset(&self) -> f64 {
        self.layout.max_offset(self.viewport_height())
    }

    /// Move the column by `delta` points, bounded to the pull limit above
    /// and the content end below.
    pub fn scroll_by(&mut self, delta: f64) {
        let target = self.content_offset + delta;
        self.content_offset = target.min(self.max_offset()).max(self.min_offset());
    }

    /// Run one measurement pass and keep its parameters for the next draw.
    pub fn run_pass(&mut self) {
        // The viewport may have changed since the last input; keep the
        // offset inside the current bounds.
        self.scroll_by(0.0);
        let viewport = self.viewport();
        let layout = self.layout;
        let offset = self.content_offset;
        self.params = self
            .engine
            .run_pass(viewport, |pass| layout.report(offset, pass));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Regime;

    fn state() -> AppState {
        let config = AppConfig::default();
        let mut state = AppState::new(HeaderGeometry::default(), config);
        state.viewport_cols = 80;
        state.viewport_rows = 40;
        state
    }

    #[test]
    fn pull_is_bounded_by_pulled_threshold() {
        let mut s = state();
        s.scroll_by(-1_000.0);
        assert_eq!(s.content_offset, -200.0);
    }

    #[test]
    fn scroll_is_bounded_by_content_end() {
        let mut s = state();
        s.scroll_by(1e9);
        assert_eq!(s.content_offset, s.max_offset());
    }

    #[test]
    fn pass_feeds_engine_from_layout() {
        let mut s = state();
        s.scroll_by(60.0);
        s.run_pass();
        assert_eq!(s.engine.signals().scroll_amount, 60.0);
        assert_eq!(s.params.regime, Regime::Scrolled);
        assert_eq!(s.params.header_image_width, 200.0);
    }

    #[test]
    fn pass_reclamps_offset_after_viewport_grows() {
        let mut s = state();
        s.scroll_by(1e9);
        let before = s.max_offset();
        s.viewport_rows = 200;
        assert!(s.max_offset() < before);
        s.run_pass();
        assert_eq!(s.content_offset, s.max_offset());
        assert_eq!(s.engine.signals().scroll_amount, s.content_offset);
    }
}
