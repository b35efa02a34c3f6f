//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the engine's per-frame parameters and turns them into
//! cells on the terminal.  No signal aggregation happens here.

pub mod artwork;
pub mod layout;
pub mod profile_view;
pub mod theme;
