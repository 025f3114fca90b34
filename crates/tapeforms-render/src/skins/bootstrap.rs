//! Bootstrap 4 and 5.

use tapeforms_core::utils::join_css_class;
use tapeforms_forms::{BoundField, WidgetType};

use crate::config::{StyleConfig, TemplateOverrides};
use crate::style::{base_container_class, base_label_class, base_widget_class, StyleResolver};

const MULTIPLEINPUT_TEMPLATE: &str = "tapeforms/widgets/bootstrap_multipleinput.html";

fn overrides(multiwidget: &str) -> TemplateOverrides<WidgetType> {
    TemplateOverrides::new()
        .with_type(WidgetType::SelectDateWidget, multiwidget)
        .with_type(WidgetType::SplitDateTimeWidget, multiwidget)
        .with_type(WidgetType::RadioSelect, MULTIPLEINPUT_TEMPLATE)
        .with_type(WidgetType::CheckboxSelectMultiple, MULTIPLEINPUT_TEMPLATE)
}

fn is_checkable(widget_type: WidgetType) -> bool {
    widget_type.is_multiple_input() || widget_type.is_checkbox()
}

/// Bootstrap 4 forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap4Style {
    config: StyleConfig,
}

/// The current Bootstrap skin.
pub type BootstrapStyle = Bootstrap4Style;

impl Bootstrap4Style {
    pub fn new() -> Self {
        Self {
            config: StyleConfig::new()
                .with_layout_template("tapeforms/layouts/bootstrap.html")
                .with_field_template("tapeforms/fields/bootstrap.html")
                .with_fieldset_template("tapeforms/fieldsets/bootstrap.html")
                .with_field_container_css_class("form-group")
                .with_widget_css_class("form-control")
                .with_widget_invalid_css_class("is-invalid")
                .with_widget_template_overrides(overrides(
                    "tapeforms/widgets/bootstrap_multiwidget.html",
                )),
        }
    }
}

impl Default for Bootstrap4Style {
    fn default() -> Self {
        Self::new()
    }
}

/// Checkboxes get `form-check` next to the configured container class.
fn bootstrap_container_class(config: &StyleConfig, field: &BoundField<'_>) -> Option<String> {
    let base = base_container_class(config, field);
    if field.widget().widget_type.is_checkbox() {
        Some(join_css_class(base.as_deref(), &[Some("form-check")]))
    } else {
        base
    }
}

fn bootstrap_label_class(config: &StyleConfig, field: &BoundField<'_>) -> Option<String> {
    if field.widget().widget_type.is_checkbox() {
        Some("form-check-label".to_string())
    } else {
        base_label_class(config, field)
    }
}

impl StyleResolver for Bootstrap4Style {
    fn name(&self) -> &'static str {
        "bootstrap4"
    }

    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut StyleConfig {
        &mut self.config
    }

    fn container_class(&self, field: &BoundField<'_>) -> Option<String> {
        bootstrap_container_class(&self.config, field)
    }

    fn label_class(&self, field: &BoundField<'_>) -> Option<String> {
        bootstrap_label_class(&self.config, field)
    }

    fn widget_class(&self, field: &BoundField<'_>) -> Option<String> {
        let widget_type = field.widget().widget_type;
        if is_checkable(widget_type) {
            Some("form-check-input".to_string())
        } else if widget_type.is_file_input() {
            Some("form-control-file".to_string())
        } else {
            base_widget_class(&self.config, field)
        }
    }
}

/// Bootstrap 5 forms.
///
/// Shares the Bootstrap 4 templates and container rules. Selects use
/// `form-select`, and file inputs are styled like any other control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap5Style {
    config: StyleConfig,
}

impl Bootstrap5Style {
    pub fn new() -> Self {
        let mut config = Bootstrap4Style::new().config;
        config.field_container_css_class = Some("mb-3".to_string());
        config.field_label_css_class = Some("form-label".to_string());
        config.widget_template_overrides = overrides("tapeforms/widgets/bootstrap5_multiwidget.html");
        Self { config }
    }
}

impl Default for Bootstrap5Style {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver for Bootstrap5Style {
    fn name(&self) -> &'static str {
        "bootstrap5"
    }

    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut StyleConfig {
        &mut self.config
    }

    fn container_class(&self, field: &BoundField<'_>) -> Option<String> {
        bootstrap_container_class(&self.config, field)
    }

    fn label_class(&self, field: &BoundField<'_>) -> Option<String> {
        bootstrap_label_class(&self.config, field)
    }

    fn widget_class(&self, field: &BoundField<'_>) -> Option<String> {
        let widget_type = field.widget().widget_type;
        if is_checkable(widget_type) {
            Some("form-check-input".to_string())
        } else if widget_type.is_select() {
            Some("form-select".to_string())
        } else {
            base_widget_class(&self.config, field)
        }
    }
}
