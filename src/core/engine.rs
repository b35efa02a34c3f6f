//! The engine instance a view owns: validated geometry plus the signal
//! aggregator, driven one layout pass at a time.

use tracing::{debug, info};

use super::geometry::HeaderGeometry;
use super::params::{compute_frame, Viewport, VisualParameters};
use super::signals::{PassCollector, Reduction, SignalAggregator, Signals};

#[derive(Debug, Clone)]
pub struct HeaderEngine {
    geometry: HeaderGeometry,
    aggregator: SignalAggregator,
}

impl HeaderEngine {
    pub fn new(geometry: HeaderGeometry, reduction: Reduction) -> Self {
        info!(
            shrink_height = geometry.shrink_height(),
            min_header_height = geometry.min_header_height(),
            reduction = reduction.label(),
            "header engine ready"
        );
        Self {
            aggregator: SignalAggregator::new(geometry.min_header_height(), reduction),
            geometry,
        }
    }

    pub fn geometry(&self) -> &HeaderGeometry {
        &self.geometry
    }

    pub fn signals(&self) -> Signals {
        self.aggregator.signals()
    }

    pub fn reduction(&self) -> Reduction {
        self.aggregator.reduction()
    }

    pub fn set_reduction(&mut self, reduction: Reduction) {
        self.aggregator.set_reduction(reduction);
    }

    /// Run one pass: `measure` reports anchors into a fresh collector, the
    /// sums are committed, then the frame is computed exactly once.
    pub fn run_pass<F>(&mut self, viewport: Viewport, measure: F) -> VisualParameters
    where
        F: FnOnce(&mut PassCollector<'_>),
    {
        let mut pass = self.aggregator.begin_pass();
        measure(&mut pass);
        let signals = pass.finish();
        let params = compute_frame(&self.geometry, signals, viewport);
        debug!(
            pass = self.aggregator.passes(),
            scroll_amount = signals.scroll_amount,
            title_to_header_distance = signals.title_to_header_distance,
            regime = params.regime.label(),
            "pass finalized"
        );
        params
    }

    /// Recompute from the last committed signals without a new pass.
    pub fn frame(&self, viewport: Viewport) -> VisualParameters {
        compute_frame(&self.geometry, self.aggregator.signals(), viewport)
    }
}
