//! Header geometry — the immutable constants the engine is built from and
//! the handful of values derived from them.

use thiserror::Error;

/// Rejected geometry.  Raised once, at construction, never per pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("{field} must be a positive finite number (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} must lie strictly between 0 and 1 (got {value})")]
    ScaleOutOfRange { field: &'static str, value: f64 },
}

/// Base constants, as written in a config file or by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometrySpec {
    pub origin_header_height: f64,
    pub shrink_scale: f64,
    pub original_icon_size: f64,
    pub overlap_icon_scale: f64,
    pub scrolled_completion_threshold: f64,
    pub pulled_completion_threshold: f64,
    pub max_blur_scrolled: f64,
    pub max_blur_pulled: f64,
    pub max_overlay_opacity: f64,
}

impl Default for GeometrySpec {
    fn default() -> Self {
        Self {
            origin_header_height: 150.0,
            shrink_scale: 0.3,
            original_icon_size: 75.0,
            overlap_icon_scale: 0.3,
            scrolled_completion_threshold: 30.0,
            pulled_completion_threshold: 200.0,
            max_blur_scrolled: 10.0,
            max_blur_pulled: 30.0,
            max_overlay_opacity: 0.5,
        }
    }
}

/// Validated geometry with its derived values precomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderGeometry {
    spec: GeometrySpec,
    shrink_height: f64,
    min_header_height: f64,
    overlap_icon_size: f64,
}

/// Accept only finite values above zero.
pub fn ensure_positive(field: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { field, value })
    }
}

fn unit_scale(field: &'static str, value: f64) -> Result<f64, GeometryError> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(GeometryError::ScaleOutOfRange { field, value })
    }
}

impl HeaderGeometry {
    pub fn new(spec: GeometrySpec) -> Result<Self, GeometryError> {
        ensure_positive("origin_header_height", spec.origin_header_height)?;
        unit_scale("shrink_scale", spec.shrink_scale)?;
        ensure_positive("original_icon_size", spec.original_icon_size)?;
        unit_scale("overlap_icon_scale", spec.overlap_icon_scale)?;
        ensure_positive("scrolled_completion_threshold", spec.scrolled_completion_threshold)?;
        ensure_positive("pulled_completion_threshold", spec.pulled_completion_threshold)?;
        ensure_positive("max_blur_scrolled", spec.max_blur_scrolled)?;
        ensure_positive("max_blur_pulled", spec.max_blur_pulled)?;
        ensure_positive("max_overlay_opacity", spec.max_overlay_opacity)?;

        Ok(Self::derive(spec))
    }

    fn derive(spec: GeometrySpec) -> Self {
        let shrink_height = spec.origin_header_height * spec.shrink_scale;
        Self {
            spec,
            shrink_height,
            min_header_height: spec.origin_header_height - shrink_height,
            overlap_icon_size: spec.original_icon_size * spec.overlap_icon_scale,
        }
    }

    pub fn origin_header_height(&self) -> f64 {
        self.spec.origin_header_height
    }

    /// How much of the header collapses away: `origin * shrink_scale`.
    pub fn shrink_height(&self) -> f64 {
        self.shrink_height
    }

    /// Height of the fixed top bar.
    pub fn min_header_height(&self) -> f64 {
        self.min_header_height
    }

    pub fn original_icon_size(&self) -> f64 {
        self.spec.original_icon_size
    }

    pub fn overlap_icon_scale(&self) -> f64 {
        self.spec.overlap_icon_scale
    }

    /// How far the avatar hangs over the header once collapsed.
    pub fn overlap_icon_size(&self) -> f64 {
        self.overlap_icon_size
    }

    pub fn scrolled_completion_threshold(&self) -> f64 {
        self.spec.scrolled_completion_threshold
    }

    pub fn pulled_completion_threshold(&self) -> f64 {
        self.spec.pulled_completion_threshold
    }

    pub fn max_blur_scrolled(&self) -> f64 {
        self.spec.max_blur_scrolled
    }

    pub fn max_blur_pulled(&self) -> f64 {
        self.spec.max_blur_pulled
    }

    pub fn max_overlay_opacity(&self) -> f64 {
        self.spec.max_overlay_opacity
    }
}

impl Default for HeaderGeometry {
    fn default() -> Self {
        Self::derive(GeometrySpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_collapse_values_from_defaults() {
        let geo = HeaderGeometry::new(GeometrySpec::default()).unwrap();
        assert!((geo.shrink_height() - 45.0).abs() < 1e-9);
        assert!((geo.min_header_height() - 105.0).abs() < 1e-9);
        assert!((geo.overlap_icon_size() - 22.5).abs() < 1e-9);
        assert_eq!(geo, HeaderGeometry::default());
    }

    #[test]
    fn rejects_scale_of_one() {
        let spec = GeometrySpec {
            shrink_scale: 1.0,
            ..GeometrySpec::default()
        };
        assert_eq!(
            HeaderGeometry::new(spec),
            Err(GeometryError::ScaleOutOfRange {
                field: "shrink_scale",
                value: 1.0
            })
        );
    }

    #[test]
    fn rejects_zero_threshold() {
        let spec = GeometrySpec {
            pulled_completion_threshold: 0.0,
            ..GeometrySpec::default()
        };
        assert!(matches!(
            HeaderGeometry::new(spec),
            Err(GeometryError::NonPositive {
                field: "pulled_completion_threshold",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_scale_and_infinite_height() {
        let nan_scale = GeometrySpec {
            overlap_icon_scale: f64::NAN,
            ..GeometrySpec::default()
        };
        assert!(HeaderGeometry::new(nan_scale).is_err());

        let inf_height = GeometrySpec {
            origin_header_height: f64::INFINITY,
            ..GeometrySpec::default()
        };
        assert!(HeaderGeometry::new(inf_height).is_err());
    }
}
