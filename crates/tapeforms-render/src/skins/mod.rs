//! Bundled skins for common CSS frameworks.
//!
//! Each skin is a [`StyleResolver`] with preset template names and classes
//! plus a few widget-specific rules. Presets can still be adjusted through
//! [`StyleResolver::config_mut`] or the `configure` step of the
//! [`TapeformBuilder`](crate::tapeform::TapeformBuilder).

mod bootstrap;
mod bulma;
mod foundation;

pub use bootstrap::{Bootstrap4Style, Bootstrap5Style, BootstrapStyle};
pub use bulma::BulmaStyle;
pub use foundation::FoundationStyle;

use tapeforms_core::error::{TapeformsError, TapeformsResult};

use crate::style::{DefaultStyle, StyleResolver};

/// Names accepted by [`by_name`].
pub const SKIN_NAMES: [&str; 6] = [
    "default",
    "bootstrap",
    "bootstrap4",
    "bootstrap5",
    "bulma",
    "foundation",
];

/// Looks up a bundled skin by name (case-insensitive).
///
/// # Examples
///
/// ```
/// use tapeforms_render::skins;
///
/// let style = skins::by_name("Bulma").unwrap();
/// assert_eq!(style.name(), "bulma");
/// assert!(skins::by_name("tailwind").is_err());
/// ```
pub fn by_name(name: &str) -> TapeformsResult<Box<dyn StyleResolver>> {
    let style: Box<dyn StyleResolver> = match name.to_ascii_lowercase().as_str() {
        "default" => Box::new(DefaultStyle::new()),
        "bootstrap" | "bootstrap4" => Box::new(Bootstrap4Style::new()),
        "bootstrap5" => Box::new(Bootstrap5Style::new()),
        "bulma" => Box::new(BulmaStyle::new()),
        "foundation" => Box::new(FoundationStyle::new()),
        _ => {
            tracing::warn!(skin = name, "unknown skin");
            return Err(TapeformsError::ConfigurationError(format!(
                "Unknown skin '{name}', expected one of: {}",
                SKIN_NAMES.join(", ")
            )));
        }
    };
    Ok(style)
}
