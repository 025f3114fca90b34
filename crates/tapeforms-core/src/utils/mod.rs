//! Utility functions for tapeforms.
//!
//! This module provides:
//! - [`join_css_class`]: set-union of space separated CSS class strings.
//! - [`text`]: String helpers used to derive labels from field names.

mod css;
pub mod text;

pub use css::join_css_class;
