//! Input subsystem.
//!
//! Translates terminal events into the small set of actions the banner display reacts to.

pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer importing
// from `crate::input` rather than reaching into submodules.
pub use service::{key_to_action, InputAction, InputService};
