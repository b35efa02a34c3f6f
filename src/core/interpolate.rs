//! Clamped linear interpolation over closed scalar ranges.
//!
//! Every visual parameter the engine produces is some signal pushed through
//! [`remap`] or [`clamp`], so out-of-domain inputs always land inside the
//! destination range instead of surfacing as errors.

/// A closed interval `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub low: f64,
    pub high: f64,
}

impl Span {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `[0, high]` — the shape every engine range has.
    pub const fn upto(high: f64) -> Self {
        Self { low: 0.0, high }
    }

    pub fn width(self) -> f64 {
        self.high - self.low
    }
}

/// Restrict `value` to `span` without rescaling.
///
/// NaN collapses to `span.low` so a bad measurement never reaches a widget.
pub fn clamp(value: f64, span: Span) -> f64 {
    if value.is_nan() {
        return span.low;
    }
    value.max(span.low).min(span.high)
}

/// Map `value` linearly from `from` into `to`, clamping both ends.
///
/// A zero-width (or inverted) source range resolves to `to.low`.
pub fn remap(value: f64, from: Span, to: Span) -> f64 {
    let width = from.width();
    if width <= 0.0 || !width.is_finite() {
        return to.low;
    }
    let t = (value - from.low) / width;
    clamp(to.low + t * to.width(), to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_hits_both_endpoints() {
        let from = Span::upto(30.0);
        let to = Span::upto(0.5);
        assert_eq!(remap(0.0, from, to), 0.0);
        assert_eq!(remap(30.0, from, to), 0.5);
        assert_eq!(remap(15.0, from, to), 0.25);
    }

    #[test]
    fn remap_clamps_below_and_above() {
        let from = Span::upto(45.0);
        let to = Span::upto(0.3);
        assert_eq!(remap(-20.0, from, to), 0.0);
        assert_eq!(remap(1_000.0, from, to), 0.3);
    }

    #[test]
    fn remap_is_non_decreasing() {
        let from = Span::upto(200.0);
        let to = Span::upto(30.0);
        let mut prev = f64::NEG_INFINITY;
        for step in -50..=300 {
            let out = remap(step as f64, from, to);
            assert!(out >= prev, "remap decreased at {step}");
            prev = out;
        }
    }

    #[test]
    fn degenerate_source_range_returns_destination_low() {
        assert_eq!(remap(5.0, Span::upto(0.0), Span::new(2.0, 9.0)), 2.0);
        assert_eq!(remap(5.0, Span::new(3.0, 1.0), Span::new(2.0, 9.0)), 2.0);
    }

    #[test]
    fn clamp_leaves_interior_values_alone() {
        let span = Span::upto(30.0);
        assert_eq!(clamp(12.5, span), 12.5);
        assert_eq!(clamp(-1.0, span), 0.0);
        assert_eq!(clamp(31.0, span), 30.0);
        assert_eq!(clamp(f64::NAN, span), 0.0);
    }

    #[test]
    fn nan_input_resolves_to_low() {
        assert_eq!(remap(f64::NAN, Span::upto(10.0), Span::upto(1.0)), 0.0);
    }
}
