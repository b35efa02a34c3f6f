//! Interaction regime classification.

/// Which formula set drives the header this pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Content has moved up past the collapse point (`scroll_amount > 0`).
    Scrolled,
    /// Overscroll / pull-down, including rest (`scroll_amount <= 0`).
    Pulled,
}

impl Regime {
    /// Pure per-pass classification; no hysteresis.
    pub fn classify(scroll_amount: f64) -> Self {
        if scroll_amount > 0.0 {
            Regime::Scrolled
        } else {
            Regime::Pulled
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Regime::Scrolled => "scrolled",
            Regime::Pulled => "pulled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_point_belongs_to_pulled() {
        assert_eq!(Regime::classify(0.0), Regime::Pulled);
        assert_eq!(Regime::classify(-0.0), Regime::Pulled);
        assert_eq!(Regime::classify(-12.0), Regime::Pulled);
    }

    #[test]
    fn any_positive_amount_is_scrolled() {
        assert_eq!(Regime::classify(f64::MIN_POSITIVE), Regime::Scrolled);
        assert_eq!(Regime::classify(400.0), Regime::Scrolled);
    }

    #[test]
    fn nan_falls_back_to_pulled() {
        assert_eq!(Regime::classify(f64::NAN), Regime::Pulled);
    }
}
