//! Rendering subsystem.
//!
//! `service` folds input actions and rotation events into the view state; `ui` draws it.

pub mod service;
pub mod ui;

pub use service::RenderLoopState;
