//! Core engine – scroll signals in, header visual parameters out.
//!
//! Nothing in this module depends on any TUI or rendering crate, and no
//! function here touches I/O.  A renderer feeds anchor positions in once per
//! layout pass and reads back a [`params::VisualParameters`].

pub mod engine;
pub mod geometry;
pub mod interpolate;
pub mod params;
pub mod regime;
pub mod signals;

pub use engine::HeaderEngine;
pub use geometry::{GeometryError, GeometrySpec, HeaderGeometry};
pub use params::{compute_frame, Viewport, VisualParameters, ZOrder};
pub use regime::Regime;
pub use signals::{Anchor, PassCollector, Reduction, SignalAggregator, Signals};
