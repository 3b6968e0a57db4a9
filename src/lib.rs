//! # banner-rotator - Timer-Driven Banner Rotation
//!
//! Cycles an "active" class across a fixed, ordered set of banner elements, one step per
//! timer firing, wrapping at the end of the set.
//!
//! ## Features
//!
//! - **Injected capabilities**: the document, the element class list and the repeating
//!   timer are traits, so rotation runs the same against tokio or a virtual clock
//! - **Owned state**: each [`Rotator`] owns its banner set and index; there are no globals
//! - **Empty-safe**: an empty banner set never starts a timer
//! - **Terminal UI**: a ratatui display of the rotation, or a headless logger
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`host`] - Capability traits plus in-memory, tokio and manual implementations
//! - [`banner`] - The ordered banner set
//! - [`rotator`] - The rotation itself
//! - [`config`] - Rotation settings
//! - [`render::ui`](crate::render::ui) - Terminal user interface components
//! - [`app`] - Application core and component coordination

// Core modules
pub mod banner;
pub mod config;
pub mod error;
pub mod host;
pub mod rotator;

// Terminal host
pub mod app;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{Result, RotatorError};

// Public API surface for external usage
pub use app::Application;
pub use banner::BannerSet;
pub use config::RotatorConfig;
pub use host::{
    Document, Element, ElementRef, IntervalHandle, ManualScheduler, MemoryDocument, Scheduler,
    Selector, TokioScheduler,
};
pub use rotator::{Rotation, Rotator};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
