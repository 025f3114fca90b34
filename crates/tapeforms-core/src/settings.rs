//! Settings for tapeforms.
//!
//! The default template names are plain constants. A [`Settings`] value
//! carries them (or replacements) and is handed explicitly to each
//! `Tapeform` and template `Engine` at construction time; nothing here is
//! process-wide mutable state, so tests can run side by side with
//! different defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Layout template used when neither the call site nor the form names one.
pub const LAYOUT_DEFAULT_TEMPLATE: &str = "tapeforms/layouts/default.html";

/// Field template used when no override, form template, or argument applies.
pub const FIELD_DEFAULT_TEMPLATE: &str = "tapeforms/fields/default.html";

/// Layout template for fieldsets without a template of their own.
pub const FIELDSET_DEFAULT_TEMPLATE: &str = "tapeforms/fieldsets/default.html";

/// The complete set of tapeforms settings.
///
/// # Examples
///
/// ```
/// use tapeforms_core::settings::{Settings, FIELD_DEFAULT_TEMPLATE};
///
/// let settings = Settings::default();
/// assert_eq!(settings.field_default_template, FIELD_DEFAULT_TEMPLATE);
/// assert_eq!(settings.log_level, "info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// Log filter directive (e.g. "info", "`tapeforms_render=debug`").
    pub log_level: String,

    // ── Templates ────────────────────────────────────────────────────

    /// Fallback layout template for whole forms.
    pub layout_default_template: String,
    /// Fallback field template.
    pub field_default_template: String,
    /// Fallback layout template for fieldsets.
    pub fieldset_default_template: String,
    /// Directories searched for user templates.
    pub template_dirs: Vec<PathBuf>,

    // ── Static files ─────────────────────────────────────────────────

    /// URL prefix for static assets referenced by form media.
    pub static_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            layout_default_template: LAYOUT_DEFAULT_TEMPLATE.to_string(),
            field_default_template: FIELD_DEFAULT_TEMPLATE.to_string(),
            fieldset_default_template: FIELDSET_DEFAULT_TEMPLATE.to_string(),
            template_dirs: Vec::new(),
            static_url: "/static/".to_string(),
        }
    }
}

impl Settings {
    /// Returns a copy of these settings with a different layout fallback.
    #[must_use]
    pub fn with_layout_default_template(mut self, name: impl Into<String>) -> Self {
        self.layout_default_template = name.into();
        self
    }

    /// Returns a copy of these settings with a different field fallback.
    #[must_use]
    pub fn with_field_default_template(mut self, name: impl Into<String>) -> Self {
        self.field_default_template = name.into();
        self
    }

    /// Returns a copy of these settings with a different fieldset fallback.
    #[must_use]
    pub fn with_fieldset_default_template(mut self, name: impl Into<String>) -> Self {
        self.fieldset_default_template = name.into();
        self
    }
}
