//! Application orchestration — state, event loop plumbing, input handling
//! and the simulated measurement source.

pub mod event;
pub mod handler;
pub mod measure;
pub mod state;
