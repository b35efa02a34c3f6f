//! Per-frame derivation of every visual parameter from signals + geometry.

use std::fmt;

use super::geometry::HeaderGeometry;
use super::interpolate::{clamp, remap, Span};
use super::regime::Regime;
use super::signals::Signals;

/// Viewport facts the consumer injects each pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
}

impl Viewport {
    pub const fn new(width: f64) -> Self {
        Self { width }
    }
}

/// Stacking of the header image relative to the fixed top bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    Background,
    Foreground,
}

impl ZOrder {
    pub fn label(self) -> &'static str {
        match self {
            ZOrder::Background => "background",
            ZOrder::Foreground => "foreground",
        }
    }
}

/// Everything a renderer needs to draw one frame of the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParameters {
    pub regime: Regime,
    pub header_container_height: f64,
    pub header_image_width: f64,
    pub header_image_height: f64,
    pub header_image_offset: f64,
    pub header_image_z: ZOrder,
    pub blur_radius: f64,
    pub overlay_opacity: f64,
    pub title_offset: f64,
    pub title_opacity: f64,
    pub avatar_size: f64,
    pub avatar_scale: f64,
    pub body_offset: f64,
}

/// Compute the full parameter set for one pass.  Pure: equal inputs give
/// bit-identical output.
pub fn compute_frame(geo: &HeaderGeometry, signals: Signals, viewport: Viewport) -> VisualParameters {
    // NaN reads as "no movement" so it cannot leak into unclamped offsets.
    let scroll = zero_if_nan(signals.scroll_amount);
    // How far the title has climbed towards the bar.
    let approach = -zero_if_nan(signals.title_to_header_distance);
    let regime = Regime::classify(scroll);

    let scrolled_span = Span::upto(geo.scrolled_completion_threshold());

    let (image_height, image_offset, body_offset) = match regime {
        Regime::Scrolled => (
            geo.origin_header_height(),
            (scroll - geo.shrink_height()).max(0.0),
            -geo.overlap_icon_size(),
        ),
        Regime::Pulled => (
            geo.origin_header_height() - scroll,
            scroll,
            -geo.overlap_icon_size() + scroll,
        ),
    };

    let blur_radius = match regime {
        Regime::Scrolled => remap(approach, scrolled_span, Span::upto(geo.max_blur_scrolled())),
        Regime::Pulled => remap(
            scroll.abs(),
            Span::upto(geo.pulled_completion_threshold()),
            Span::upto(geo.max_blur_pulled()),
        ),
    };

    let header_image_z = if scroll > geo.shrink_height() {
        ZOrder::Foreground
    } else {
        ZOrder::Background
    };

    let avatar_shrink = remap(
        scroll,
        Span::upto(geo.shrink_height()),
        Span::upto(geo.overlap_icon_scale()),
    );

    VisualParameters {
        regime,
        header_container_height: geo.min_header_height(),
        header_image_width: viewport.width.max(0.0),
        header_image_height: image_height,
        header_image_offset: image_offset,
        header_image_z,
        blur_radius,
        overlay_opacity: remap(approach, scrolled_span, Span::upto(geo.max_overlay_opacity())),
        title_offset: geo.scrolled_completion_threshold() - clamp(approach, scrolled_span),
        title_opacity: remap(approach, scrolled_span, Span::upto(1.0)),
        avatar_size: geo.original_icon_size(),
        avatar_scale: 1.0 - avatar_shrink,
        body_offset,
    }
}

fn zero_if_nan(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v
    }
}

impl fmt::Display for VisualParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "regime = {}", self.regime.label())?;
        writeln!(f, "header_container_height = {}", self.header_container_height)?;
        writeln!(f, "header_image_width = {}", self.header_image_width)?;
        writeln!(f, "header_image_height = {}", self.header_image_height)?;
        writeln!(f, "header_image_offset = {}", self.header_image_offset)?;
        writeln!(f, "header_image_z = {}", self.header_image_z.label())?;
        writeln!(f, "blur_radius = {}", self.blur_radius)?;
        writeln!(f, "overlay_opacity = {}", self.overlay_opacity)?;
        writeln!(f, "title_offset = {}", self.title_offset)?;
        writeln!(f, "title_opacity = {}", self.title_opacity)?;
        writeln!(f, "avatar_size = {}", self.avatar_size)?;
        writeln!(f, "avatar_scale = {}", self.avatar_scale)?;
        write!(f, "body_offset = {}", self.body_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn frame(scroll: f64, title: f64) -> VisualParameters {
        compute_frame(
            &HeaderGeometry::default(),
            Signals::new(scroll, title),
            Viewport::new(390.0),
        )
    }

    #[test]
    fn title_halfway_to_bar() {
        let p = frame(10.0, -15.0);
        assert!((p.title_opacity - 0.5).abs() < EPS);
        assert!((p.overlay_opacity - 0.25).abs() < EPS);
        assert!((p.title_offset - 15.0).abs() < EPS);
        assert!((p.blur_radius - 5.0).abs() < EPS);
    }

    #[test]
    fn fully_collapsed_header_moves_to_foreground() {
        let p = frame(60.0, -40.0);
        assert_eq!(p.regime, Regime::Scrolled);
        assert_eq!(p.header_image_z, ZOrder::Foreground);
        assert!((p.header_image_offset - 15.0).abs() < EPS);
        assert!((p.body_offset + 22.5).abs() < EPS);
        assert!((p.header_image_height - 150.0).abs() < EPS);
        assert!((p.avatar_scale - 0.7).abs() < EPS);
    }

    #[test]
    fn partially_collapsed_header_stays_behind_bar() {
        let p = frame(30.0, -60.0);
        assert_eq!(p.header_image_z, ZOrder::Background);
        assert_eq!(p.header_image_offset, 0.0);
    }

    #[test]
    fn pull_grows_and_blurs_header() {
        let p = frame(-100.0, -200.0);
        assert_eq!(p.regime, Regime::Pulled);
        assert!((p.blur_radius - 15.0).abs() < EPS);
        assert!((p.header_image_height - 250.0).abs() < EPS);
        assert!((p.header_image_offset + 100.0).abs() < EPS);
        assert!((p.body_offset + 122.5).abs() < EPS);
        assert_eq!(p.avatar_scale, 1.0);
    }

    #[test]
    fn blur_is_continuous_at_collapse_point() {
        let at_rest = frame(0.0, 0.0);
        let just_scrolled = frame(f64::MIN_POSITIVE, 0.0);
        assert_eq!(at_rest.regime, Regime::Pulled);
        assert_eq!(just_scrolled.regime, Regime::Scrolled);
        assert_eq!(at_rest.blur_radius, 0.0);
        assert_eq!(just_scrolled.blur_radius, 0.0);
    }

    #[test]
    fn title_below_bar_is_hidden_and_lowered() {
        let p = frame(5.0, 80.0);
        assert_eq!(p.title_opacity, 0.0);
        assert_eq!(p.overlay_opacity, 0.0);
        assert!((p.title_offset - 30.0).abs() < EPS);
    }

    #[test]
    fn title_past_bar_saturates() {
        let p = frame(200.0, -500.0);
        assert_eq!(p.title_opacity, 1.0);
        assert_eq!(p.overlay_opacity, 0.5);
        assert_eq!(p.title_offset, 0.0);
        assert_eq!(p.blur_radius, 10.0);
    }

    #[test]
    fn avatar_scale_bounded_while_scrolling() {
        for step in 0..=400 {
            let p = frame(step as f64 * 0.5, 0.0);
            assert!(p.avatar_scale <= 1.0 && p.avatar_scale >= 0.7 - EPS);
        }
    }

    #[test]
    fn viewport_width_passes_through() {
        let p = compute_frame(
            &HeaderGeometry::default(),
            Signals::default(),
            Viewport::new(-3.0),
        );
        assert_eq!(p.header_image_width, 0.0);
        assert_eq!(p.header_container_height, HeaderGeometry::default().min_header_height());
    }

    #[test]
    fn recompute_is_bit_identical() {
        let a = frame(37.25, -12.5);
        let b = frame(37.25, -12.5);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn nan_signals_give_the_rest_frame() {
        let rest = frame(0.0, 0.0);
        let p = frame(f64::NAN, f64::NAN);
        assert_eq!(p, rest);
        assert!(p.header_image_height.is_finite());
        assert!(p.header_image_offset.is_finite());
        assert!(p.body_offset.is_finite());
    }
}
