//! Collapsing profile header, driven by scroll signals.
//!
//! [`core`] holds the interpolation engine; [`app`] and [`ui`] wire it into
//! a terminal demo that plays the role of measurement source and renderer.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
