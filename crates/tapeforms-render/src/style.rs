//! Style strategies.
//!
//! A [`StyleResolver`] answers the per-field styling questions: which class
//! goes on the container, the label and the widget, which widget templates
//! are swapped, and which static assets the page needs. Every skin is an
//! independent implementation holding its own [`StyleConfig`]. A skin that
//! needs the plain behavior for some widgets calls the `base_*` functions of
//! this module directly instead of going through another skin.

use std::fmt;

use tapeforms_forms::{BoundField, WidgetType};

use crate::config::{StyleConfig, TemplateOverrides};
use crate::media::Media;

/// Container class of the plain style.
pub const DEFAULT_CONTAINER_CSS_CLASS: &str = "form-field";

/// Per-field styling decisions of one skin.
pub trait StyleResolver: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn config(&self) -> &StyleConfig;

    fn config_mut(&mut self) -> &mut StyleConfig;

    /// Class of the element wrapping label and widget.
    fn container_class(&self, field: &BoundField<'_>) -> Option<String> {
        base_container_class(self.config(), field)
    }

    /// Class of the label, before invalid styling is added.
    fn label_class(&self, field: &BoundField<'_>) -> Option<String> {
        base_label_class(self.config(), field)
    }

    /// Class joined onto the widget's `class` attribute at construction.
    fn widget_class(&self, field: &BoundField<'_>) -> Option<String> {
        base_widget_class(self.config(), field)
    }

    /// Class joined onto the widget's `class` attribute once the field has
    /// errors.
    fn widget_invalid_class(&self, field: &BoundField<'_>) -> Option<String> {
        base_widget_invalid_class(self.config(), field)
    }

    fn widget_template_overrides(&self) -> &TemplateOverrides<WidgetType> {
        &self.config().widget_template_overrides
    }

    /// Adjusts an already resolved field template. The plain style keeps it.
    fn refine_field_template(&self, _field: &BoundField<'_>, template: String) -> String {
        template
    }

    /// Layout template for fieldsets of this style.
    fn fieldset_template(&self) -> Option<&str> {
        non_empty(self.config().fieldset_template.as_ref())
    }

    /// Static assets the rendered markup relies on.
    fn media(&self) -> Media {
        Media::default()
    }
}

pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// The configured container class.
pub fn base_container_class(config: &StyleConfig, _field: &BoundField<'_>) -> Option<String> {
    non_empty(config.field_container_css_class.as_ref()).map(String::from)
}

/// The configured label class.
pub fn base_label_class(config: &StyleConfig, _field: &BoundField<'_>) -> Option<String> {
    non_empty(config.field_label_css_class.as_ref()).map(String::from)
}

/// The configured widget class.
pub fn base_widget_class(config: &StyleConfig, _field: &BoundField<'_>) -> Option<String> {
    non_empty(config.widget_css_class.as_ref()).map(String::from)
}

/// The configured invalid widget class.
pub fn base_widget_invalid_class(config: &StyleConfig, _field: &BoundField<'_>) -> Option<String> {
    non_empty(config.widget_invalid_css_class.as_ref()).map(String::from)
}

/// The plain style: a `form-field` container and nothing else unless
/// configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultStyle {
    config: StyleConfig,
}

impl DefaultStyle {
    pub fn new() -> Self {
        Self {
            config: StyleConfig::new().with_field_container_css_class(DEFAULT_CONTAINER_CSS_CLASS),
        }
    }

    /// Uses `config` as is, without the default container class.
    pub const fn with_config(config: StyleConfig) -> Self {
        Self { config }
    }
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver for DefaultStyle {
    fn name(&self) -> &'static str {
        "default"
    }

    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut StyleConfig {
        &mut self.config
    }
}
