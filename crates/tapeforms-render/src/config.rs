//! Resolution configuration: template names and CSS classes a skin or form
//! declares.
//!
//! Every value is optional; a missing value makes the resolver fall through
//! to its next rule. Configurations are plain data and can be loaded from
//! TOML:
//!
//! ```
//! use tapeforms_forms::WidgetType;
//! use tapeforms_render::config::StyleConfig;
//!
//! let config = StyleConfig::from_toml_str(r#"
//!     field_container_css_class = "box"
//!     widget_invalid_css_class = "bad"
//!
//!     [widget_template_overrides.by_type]
//!     RadioSelect = "my/radio.html"
//! "#).unwrap();
//!
//! assert_eq!(config.field_container_css_class.as_deref(), Some("box"));
//! assert_eq!(
//!     config.widget_template_overrides.get("any", WidgetType::RadioSelect),
//!     Some("my/radio.html"),
//! );
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tapeforms_core::error::{TapeformsError, TapeformsResult};
use tapeforms_forms::{FieldKind, WidgetType};

/// A two-tier override table: entries keyed by field name are consulted
/// before entries keyed by a type identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, bound(serialize = "K: Serialize", deserialize = "K: DeserializeOwned + Ord"))]
pub struct TemplateOverrides<K: Ord> {
    /// Templates selected by field name.
    pub by_name: BTreeMap<String, String>,
    /// Templates selected by type identity.
    pub by_type: BTreeMap<K, String>,
}

/// Which tier of a [`TemplateOverrides`] table produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideTier {
    Name,
    Type,
}

impl<K: Ord> Default for TemplateOverrides<K> {
    fn default() -> Self {
        Self {
            by_name: BTreeMap::new(),
            by_type: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> TemplateOverrides<K> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry keyed by field name.
    #[must_use]
    pub fn with_name(mut self, field_name: impl Into<String>, template: impl Into<String>) -> Self {
        self.by_name.insert(field_name.into(), template.into());
        self
    }

    /// Adds an entry keyed by type identity.
    #[must_use]
    pub fn with_type(mut self, kind: K, template: impl Into<String>) -> Self {
        self.by_type.insert(kind, template.into());
        self
    }

    /// Looks up `field_name` first, then `kind`. Empty template names count
    /// as missing.
    pub fn lookup(&self, field_name: &str, kind: K) -> Option<(&str, OverrideTier)> {
        fn non_empty(t: &String) -> Option<&str> {
            (!t.is_empty()).then_some(t.as_str())
        }
        self.by_name
            .get(field_name)
            .and_then(non_empty)
            .map(|t| (t, OverrideTier::Name))
            .or_else(|| {
                self.by_type
                    .get(&kind)
                    .and_then(non_empty)
                    .map(|t| (t, OverrideTier::Type))
            })
    }

    /// Like [`lookup`](Self::lookup) without the tier.
    pub fn get(&self, field_name: &str, kind: K) -> Option<&str> {
        self.lookup(field_name, kind).map(|(t, _)| t)
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty() && self.by_type.is_empty()
    }
}

/// Template names and CSS classes used while resolving a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Layout template for whole forms.
    pub layout_template: Option<String>,
    /// Field template used when no override matches.
    pub field_template: Option<String>,
    /// Field templates by field name, then by field kind.
    pub field_template_overrides: TemplateOverrides<FieldKind>,
    /// Widget templates by field name, then by widget type.
    pub widget_template_overrides: TemplateOverrides<WidgetType>,
    /// Class of the element wrapping label and widget.
    pub field_container_css_class: Option<String>,
    /// Class of the label.
    pub field_label_css_class: Option<String>,
    /// Class added to the label of a field with errors.
    pub field_label_invalid_css_class: Option<String>,
    /// Class added to every widget.
    pub widget_css_class: Option<String>,
    /// Class added to the widget of a field with errors.
    pub widget_invalid_css_class: Option<String>,
    /// Layout template for fieldsets.
    pub fieldset_template: Option<String>,
}

impl StyleConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML. Missing keys stay unset.
    pub fn from_toml_str(toml_str: &str) -> TapeformsResult<Self> {
        toml::from_str(toml_str).map_err(|e| {
            tracing::warn!(error = %e, "invalid style configuration");
            TapeformsError::ConfigurationError(format!("Invalid style configuration: {e}"))
        })
    }

    /// Parses a configuration from JSON. Missing keys stay unset.
    pub fn from_json_str(json_str: &str) -> TapeformsResult<Self> {
        serde_json::from_str(json_str).map_err(|e| {
            tracing::warn!(error = %e, "invalid style configuration");
            TapeformsError::ConfigurationError(format!("Invalid style configuration: {e}"))
        })
    }

    /// Overlays every value set in `other` onto `self`. Override tables are
    /// merged entry by entry.
    pub fn merge(&mut self, other: Self) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.layout_template, other.layout_template);
        take(&mut self.field_template, other.field_template);
        take(&mut self.field_container_css_class, other.field_container_css_class);
        take(&mut self.field_label_css_class, other.field_label_css_class);
        take(&mut self.field_label_invalid_css_class, other.field_label_invalid_css_class);
        take(&mut self.widget_css_class, other.widget_css_class);
        take(&mut self.widget_invalid_css_class, other.widget_invalid_css_class);
        take(&mut self.fieldset_template, other.fieldset_template);
        self.field_template_overrides.by_name.extend(other.field_template_overrides.by_name);
        self.field_template_overrides.by_type.extend(other.field_template_overrides.by_type);
        self.widget_template_overrides.by_name.extend(other.widget_template_overrides.by_name);
        self.widget_template_overrides.by_type.extend(other.widget_template_overrides.by_type);
    }

    #[must_use]
    pub fn with_layout_template(mut self, name: impl Into<String>) -> Self {
        self.layout_template = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_field_template(mut self, name: impl Into<String>) -> Self {
        self.field_template = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_field_template_overrides(mut self, overrides: TemplateOverrides<FieldKind>) -> Self {
        self.field_template_overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_widget_template_overrides(mut self, overrides: TemplateOverrides<WidgetType>) -> Self {
        self.widget_template_overrides = overrides;
        self
    }

    #[must_use]
    pub fn with_field_container_css_class(mut self, class: impl Into<String>) -> Self {
        self.field_container_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_field_label_css_class(mut self, class: impl Into<String>) -> Self {
        self.field_label_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_field_label_invalid_css_class(mut self, class: impl Into<String>) -> Self {
        self.field_label_invalid_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_widget_css_class(mut self, class: impl Into<String>) -> Self {
        self.widget_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_widget_invalid_css_class(mut self, class: impl Into<String>) -> Self {
        self.widget_invalid_css_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn with_fieldset_template(mut self, name: impl Into<String>) -> Self {
        self.fieldset_template = Some(name.into());
        self
    }
}
