//! Simulated measurement source.
//!
//! The terminal has no layout engine to ask where the header image and the
//! profile title ended up, so this module lays the profile column out in
//! points and reports the two tracked anchors the way a GUI toolkit's
//! geometry callbacks would.

use crate::core::{Anchor, HeaderGeometry, PassCollector};

/// Height of the profile name line.
pub const TITLE_LINE_HEIGHT: f64 = 28.0;
/// `@handle` line under the name.
pub const HANDLE_LINE_HEIGHT: f64 = 20.0;
/// Bio paragraph.
pub const BIO_HEIGHT: f64 = 40.0;
/// Follow button, bottom-aligned with the avatar.
pub const FOLLOW_BUTTON_HEIGHT: f64 = 35.0;
/// Each placeholder row in the content list.
pub const CONTENT_ROW_HEIGHT: f64 = 100.0;
pub const CONTENT_ROWS: usize = 10;

/// Point-space layout of the scrolling profile column.
#[derive(Debug, Clone, Copy)]
pub struct ProfileLayout {
    origin_header_height: f64,
    overlap_icon_size: f64,
    icon_size: f64,
}

impl ProfileLayout {
    pub fn new(geometry: &HeaderGeometry) -> Self {
        Self {
            origin_header_height: geometry.origin_header_height(),
            overlap_icon_size: geometry.overlap_icon_size(),
            icon_size: geometry.original_icon_size(),
        }
    }

    /// Global minY of the header image's layout frame.
    pub fn header_top(&self, content_offset: f64) -> f64 {
        -content_offset
    }

    /// Top of the body column.  The pulled image grows by exactly what the
    /// body offset gives back, so the same expression holds in both regimes.
    pub fn body_top(&self, content_offset: f64) -> f64 {
        self.origin_header_height - self.overlap_icon_size - content_offset
    }

    /// Global maxY of the profile name.
    pub fn title_bottom(&self, content_offset: f64) -> f64 {
        self.body_top(content_offset) + self.icon_size + TITLE_LINE_HEIGHT
    }

    /// Total height of the column at rest.
    pub fn content_height(&self) -> f64 {
        self.body_top(0.0)
            + self.icon_size
            + TITLE_LINE_HEIGHT
            + HANDLE_LINE_HEIGHT
            + BIO_HEIGHT
            + CONTENT_ROW_HEIGHT * CONTENT_ROWS as f64
    }

    /// Furthest the content can scroll up inside a viewport this tall.
    pub fn max_offset(&self, viewport_height: f64) -> f64 {
        (self.content_height() - viewport_height).max(0.0)
    }

    /// Report both anchors for `content_offset` into the current pass.
    pub fn report(&self, content_offset: f64, pass: &mut PassCollector<'_>) {
        pass.report_anchor(Anchor::HeaderImageTop, self.header_top(content_offset));
        pass.report_anchor(Anchor::TitleBottom, self.title_bottom(content_offset));
    }
}
