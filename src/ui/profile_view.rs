//! The collapsing profile header, drawn from one frame's
//! [`VisualParameters`].
//!
//! Paint order follows the engine's z-order: the header image goes under the
//! body until the header has fully collapsed, then over it (the avatar slides
//! beneath the bar).  The fixed top bar is always painted last.

use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::app::measure::{BIO_HEIGHT, CONTENT_ROWS, CONTENT_ROW_HEIGHT, HANDLE_LINE_HEIGHT, TITLE_LINE_HEIGHT};
use crate::app::state::CELL_ASPECT;
use crate::core::{VisualParameters, ZOrder};

use super::artwork;
use super::theme::Theme;

pub const PROFILE_NAME: &str = "Katsushika Hokusai";
pub const PROFILE_HANDLE: &str = "@hokusai";
pub const PROFILE_BIO: &str = "I'm an ukiyo-e artist.";
pub const POST_COUNT: &str = "99,999 Posts";
const FOLLOW_LABEL: &str = "( Following )";
const BACK_LABEL: &str = " ← ";

/// Horizontal padding, in cells.
const PAD: i32 = 2;

pub struct ProfileView<'a> {
    params: &'a VisualParameters,
    content_offset: f64,
    points_per_row: f64,
}

impl<'a> ProfileView<'a> {
    pub fn new(params: &'a VisualParameters, content_offset: f64, points_per_row: f64) -> Self {
        Self {
            params,
            content_offset,
            points_per_row,
        }
    }

    fn rows(&self, points: f64) -> f64 {
        points / self.points_per_row
    }

    fn render_image(&self, area: Rect, buf: &mut Buffer) {
        let p = self.params;
        let cols = (self.rows(p.header_image_width) * CELL_ASPECT)
            .round()
            .min(f64::from(area.width));
        if cols < 1.0 || p.header_image_height <= 0.0 {
            return;
        }
        let top = self.rows(-self.content_offset + p.header_image_offset);
        let height = self.rows(p.header_image_height);
        let radius_u = p.blur_radius / p.header_image_width;
        let radius_v = p.blur_radius / p.header_image_height;

        let first = top.floor().max(0.0) as i32;
        let last = ((top + height).ceil() as i32).min(i32::from(area.height));
        for row in first..last {
            let v = (f64::from(row) + 0.5 - top) / height;
            for col in 0..cols as u16 {
                let u = (f64::from(col) + 0.5) / cols;
                let rgb = artwork::darken(artwork::blurred(u, v, radius_u, radius_v), p.overlay_opacity);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row as u16)) {
                    cell.set_symbol(" ");
                    cell.set_bg(artwork::to_color(rgb));
                }
            }
        }
    }

    fn render_body(&self, area: Rect, buf: &mut Buffer) {
        let p = self.params;
        let body_top = self.rows(-self.content_offset + p.header_image_height + p.body_offset);

        // Avatar: scaled about its bottom centre.
        let full_rows = self.rows(p.avatar_size);
        let full_cols = full_rows * CELL_ASPECT;
        let avatar_bottom = body_top + full_rows;
        let h = full_rows * p.avatar_scale;
        let w = full_cols * p.avatar_scale;
        let left = f64::from(PAD) + (full_cols - w) / 2.0;
        draw_disc(area, buf, left, avatar_bottom - h, w, h);

        let button_row = avatar_bottom.floor() as i32 - 1;
        let button_col = i32::from(area.width) - FOLLOW_LABEL.chars().count() as i32 - PAD;
        put_str(area, buf, button_col, button_row, FOLLOW_LABEL, Theme::follow_button_style());

        let mut cursor = avatar_bottom;
        let mut line = |height_pts: f64| {
            let top = cursor;
            cursor += self.rows(height_pts);
            (top, cursor)
        };
        let (_, name_bottom) = line(TITLE_LINE_HEIGHT);
        put_str(area, buf, PAD, last_row(name_bottom), PROFILE_NAME, Theme::profile_name_style());
        let (_, handle_bottom) = line(HANDLE_LINE_HEIGHT);
        put_str(area, buf, PAD, last_row(handle_bottom), PROFILE_HANDLE, Theme::handle_style());
        let (bio_top, _) = line(BIO_HEIGHT);
        put_str(area, buf, PAD, bio_top.ceil() as i32, PROFILE_BIO, Theme::bio_style());

        let label = "Content";
        let col = (i32::from(area.width) - label.len() as i32) / 2;
        for _ in 0..CONTENT_ROWS {
            let (top, bottom) = line(CONTENT_ROW_HEIGHT);
            put_str(area, buf, col, ((top + bottom) / 2.0).floor() as i32, label, Theme::content_style());
        }
    }

    fn render_bar(&self, area: Rect, buf: &mut Buffer) {
        let p = self.params;
        let bar_rows = (self.rows(p.header_container_height).round() as i32).min(i32::from(area.height));
        if bar_rows < 2 {
            return;
        }
        let base = bar_rows - 2;
        put_str(area, buf, PAD, base, BACK_LABEL, Theme::back_button_style());

        if p.title_opacity <= 0.0 {
            return;
        }
        let title_col = PAD + BACK_LABEL.chars().count() as i32 + 2;
        let name_row = base + self.rows(p.title_offset).round() as i32;
        for (row, text) in [(name_row, PROFILE_NAME), (name_row + 1, POST_COUNT)] {
            if row < bar_rows {
                put_faded(area, buf, title_col, row, text, p.title_opacity);
            }
        }
    }
}

impl Widget for ProfileView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        match self.params.header_image_z {
            ZOrder::Background => {
                self.render_image(area, buf);
                self.render_body(area, buf);
            }
            ZOrder::Foreground => {
                self.render_body(area, buf);
                self.render_image(area, buf);
            }
        }
        self.render_bar(area, buf);
    }
}

// ───────────────────────────────────────── drawing helpers ──

fn last_row(bottom: f64) -> i32 {
    bottom.ceil() as i32 - 1
}

fn in_area(area: Rect, col: i32, row: i32) -> Option<(u16, u16)> {
    let inside = (0..i32::from(area.width)).contains(&col) && (0..i32::from(area.height)).contains(&row);
    inside.then(|| (area.x + col as u16, area.y + row as u16))
}

/// Write `text` at a possibly off-screen position, clipping to `area`.
fn put_str(area: Rect, buf: &mut Buffer, col: i32, row: i32, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(pos) = in_area(area, col + i as i32, row) {
            if let Some(cell) = buf.cell_mut(pos) {
                cell.set_char(ch).set_style(style);
            }
        }
    }
}

/// Write `text` with its foreground blended from the cell's background
/// towards white by `opacity`.
fn put_faded(area: Rect, buf: &mut Buffer, col: i32, row: i32, text: &str, opacity: f64) {
    for (i, ch) in text.chars().enumerate() {
        if let Some(pos) = in_area(area, col + i as i32, row) {
            if let Some(cell) = buf.cell_mut(pos) {
                let fg = artwork::fade(cell.bg, [1.0; 3], opacity);
                cell.set_char(ch)
                    .set_style(Style::default().fg(fg).add_modifier(Theme::bar_title_modifier()));
            }
        }
    }
}

/// Filled ellipse inscribed in the given cell-space box, with a dark ring.
fn draw_disc(area: Rect, buf: &mut Buffer, left: f64, top: f64, width: f64, height: f64) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let (cx, cy) = (left + width / 2.0, top + height / 2.0);
    for row in top.floor() as i32..(top + height).ceil() as i32 {
        for col in left.floor() as i32..(left + width).ceil() as i32 {
            let dx = (f64::from(col) + 0.5 - cx) / (width / 2.0);
            let dy = (f64::from(row) + 0.5 - cy) / (height / 2.0);
            let d = dx * dx + dy * dy;
            if d > 1.0 {
                continue;
            }
            let color = if d > 0.7 {
                Theme::avatar_ring_color()
            } else {
                Theme::avatar_color()
            };
            if let Some(cell) = in_area(area, col, row).and_then(|pos| buf.cell_mut(pos)) {
                cell.set_symbol(" ");
                cell.set_bg(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{compute_frame, HeaderGeometry, Signals, Viewport};

    fn render(scroll: f64, title: f64) -> Buffer {
        let geo = HeaderGeometry::default();
        let params = compute_frame(&geo, Signals::new(scroll, title), Viewport::new(200.0));
        let area = Rect::new(0, 0, 80, 60);
        let mut buf = Buffer::empty(area);
        ProfileView::new(&params, scroll, 5.0).render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, row)).map_or(" ", |c| c.symbol()).to_string())
            .collect()
    }

    fn contains(buf: &Buffer, needle: &str) -> Option<u16> {
        (0..buf.area.height).find(|&y| row_text(buf, y).contains(needle))
    }

    #[test]
    fn title_hidden_while_profile_name_is_below_bar() {
        let buf = render(0.0, 125.5);
        assert!(contains(&buf, POST_COUNT).is_none());
        // The profile body shows the name instead.
        assert!(contains(&buf, PROFILE_NAME).is_some());
        assert!(contains(&buf, "Following").is_some());
    }

    #[test]
    fn title_appears_in_bar_once_collapsed() {
        let buf = render(160.0, -35.0);
        let row = contains(&buf, POST_COUNT).expect("subtitle in bar");
        assert!(row < 21, "subtitle stays inside the 21-row bar");
    }

    #[test]
    fn header_image_paints_rgb_background() {
        let buf = render(0.0, 125.5);
        let cell = buf.cell((40, 1)).unwrap();
        assert!(matches!(cell.bg, ratatui::style::Color::Rgb(..)));
    }
}
