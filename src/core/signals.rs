//! Signal aggregation — turns per-anchor geometry reports into the two
//! scalar signals the engine runs on.
//!
//! A layout pass is modelled as a [`PassCollector`] that mutably borrows the
//! [`SignalAggregator`].  Collectors accumulate into fresh zeroed slots; the
//! committed [`Signals`] only change when [`PassCollector::finish`] runs, so
//! nothing can observe a half-aggregated pass.  Dropping a collector without
//! finishing abandons the pass and leaves the previous signals in place.

use tracing::{trace, warn};

// ───────────────────────────────────────── signals ───────────

/// The engine's only mutable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Signals {
    /// Positive once content scrolls up past the collapse point, `<= 0`
    /// while the user pulls the header down.
    pub scroll_amount: f64,
    /// Title bottom minus the collapsed header's bottom edge.  Negative
    /// while the title is still below the bar.
    pub title_to_header_distance: f64,
}

impl Signals {
    pub const fn new(scroll_amount: f64, title_to_header_distance: f64) -> Self {
        Self {
            scroll_amount,
            title_to_header_distance,
        }
    }
}

// ───────────────────────────────────────── anchors ───────────

/// Tracked positions in the render tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Global minY of the header image.
    HeaderImageTop,
    /// Global maxY of the profile title.
    TitleBottom,
}

/// How multiple reports for one signal within a pass combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reduction {
    /// Add every report.  Correct only while one anchor feeds each signal.
    #[default]
    Sum,
    /// Keep the most recent report.
    LastWriteWins,
}

impl Reduction {
    pub fn label(self) -> &'static str {
        match self {
            Reduction::Sum => "sum",
            Reduction::LastWriteWins => "last",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sum" => Some(Reduction::Sum),
            "last" | "last_write_wins" => Some(Reduction::LastWriteWins),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Reduction::Sum => Reduction::LastWriteWins,
            Reduction::LastWriteWins => Reduction::Sum,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    value: f64,
    reports: u32,
}

impl Slot {
    fn push(&mut self, delta: f64, reduction: Reduction) {
        self.value = match reduction {
            Reduction::Sum => self.value + delta,
            Reduction::LastWriteWins => delta,
        };
        self.reports += 1;
    }
}

// ───────────────────────────────────────── aggregator ────────

/// Owns the committed signals between passes.
#[derive(Debug, Clone)]
pub struct SignalAggregator {
    signals: Signals,
    reduction: Reduction,
    /// Global y of the collapsed header's bottom edge; the title anchor is
    /// measured against it.
    title_baseline: f64,
    passes: u64,
}

impl SignalAggregator {
    pub fn new(title_baseline: f64, reduction: Reduction) -> Self {
        Self {
            signals: Signals::default(),
            reduction,
            title_baseline,
            passes: 0,
        }
    }

    /// Signals from the last finished pass (zero before the first).
    pub fn signals(&self) -> Signals {
        self.signals
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }

    pub fn set_reduction(&mut self, reduction: Reduction) {
        self.reduction = reduction;
    }

    /// Number of passes committed so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Open a new pass with both accumulators reset to zero.
    pub fn begin_pass(&mut self) -> PassCollector<'_> {
        PassCollector {
            aggregator: self,
            scroll: Slot::default(),
            title: Slot::default(),
        }
    }
}

// ───────────────────────────────────────── pass ──────────────

/// Accumulates reports for one layout pass.
#[derive(Debug)]
pub struct PassCollector<'a> {
    aggregator: &'a mut SignalAggregator,
    scroll: Slot,
    title: Slot,
}

impl PassCollector<'_> {
    /// Contribute a raw delta to `scroll_amount`.
    pub fn report_scroll(&mut self, delta: f64) {
        self.scroll.push(delta, self.aggregator.reduction);
    }

    /// Contribute a raw delta to `title_to_header_distance`.
    pub fn report_title_distance(&mut self, delta: f64) {
        self.title.push(delta, self.aggregator.reduction);
    }

    /// Report an anchor's global vertical position, converted into its
    /// signal contribution.
    pub fn report_anchor(&mut self, anchor: Anchor, global_y: f64) {
        trace!(?anchor, global_y, "anchor reported");
        match anchor {
            Anchor::HeaderImageTop => self.report_scroll(-global_y),
            Anchor::TitleBottom => {
                let baseline = self.aggregator.title_baseline;
                self.report_title_distance(global_y - baseline);
            }
        }
    }

    /// Commit the accumulated values as the new signals.
    pub fn finish(self) -> Signals {
        let PassCollector {
            aggregator,
            scroll,
            title,
        } = self;
        for (name, slot) in [("scroll_amount", scroll), ("title_to_header_distance", title)] {
            if slot.reports > 1 {
                warn!(
                    signal = name,
                    reports = slot.reports,
                    reduction = aggregator.reduction.label(),
                    "signal received more than one report in a single pass"
                );
            }
        }
        let signals = Signals::new(scroll.value, title.value);
        aggregator.signals = signals;
        aggregator.passes += 1;
        signals
    }
}
