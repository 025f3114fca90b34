//! # tapeforms-core
//!
//! Core types shared by every tapeforms crate. This crate has no dependency on
//! the form or template layers and provides the foundation for both.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`settings`] - Default template names and the [`Settings`] object
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`utils`] - CSS class joining and text helpers

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{TapeformsError, TapeformsResult, ValidationError};
pub use settings::Settings;
pub use utils::join_css_class;
