//! Foundation.

use tapeforms_forms::{BoundField, WidgetType};

use crate::config::{StyleConfig, TemplateOverrides};
use crate::style::{StyleResolver, DEFAULT_CONTAINER_CSS_CLASS};

const FIELDSET_FIELD_TEMPLATE: &str = "tapeforms/fields/foundation_fieldset.html";

/// Foundation forms.
///
/// Radio and checkbox lists are wrapped in a `<fieldset>` unless the field
/// template was overridden to something other than the skin's own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundationStyle {
    config: StyleConfig,
}

impl FoundationStyle {
    pub fn new() -> Self {
        let multipleinput = "tapeforms/widgets/foundation_multipleinput.html";
        Self {
            config: StyleConfig::new()
                .with_layout_template("tapeforms/layouts/foundation.html")
                .with_field_template("tapeforms/fields/foundation.html")
                .with_field_container_css_class(DEFAULT_CONTAINER_CSS_CLASS)
                .with_field_label_invalid_css_class("is-invalid-label")
                .with_widget_invalid_css_class("is-invalid-input")
                .with_widget_template_overrides(
                    TemplateOverrides::new()
                        .with_type(WidgetType::RadioSelect, multipleinput)
                        .with_type(WidgetType::CheckboxSelectMultiple, multipleinput),
                ),
        }
    }
}

impl Default for FoundationStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver for FoundationStyle {
    fn name(&self) -> &'static str {
        "foundation"
    }

    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut StyleConfig {
        &mut self.config
    }

    fn refine_field_template(&self, field: &BoundField<'_>, template: String) -> String {
        let is_skin_template = self.config.field_template.as_deref() == Some(template.as_str());
        if is_skin_template && field.widget().widget_type.is_multiple_input() {
            FIELDSET_FIELD_TEMPLATE.to_string()
        } else {
            template
        }
    }
}

#[cfg(test)]
mod tests {
    use tapeforms_forms::{Field, FieldKind, Form};

    use super::*;

    #[test]
    fn test_multiple_input_uses_fieldset_template() {
        let form = Form::new("FoundationForm").with_fields([
            Field::char("text"),
            Field::new("choice", FieldKind::ChoiceField).widget(WidgetType::RadioSelect),
        ]);
        let style = FoundationStyle::new();
        let skin_template = "tapeforms/fields/foundation.html".to_string();

        let choice = form.bound_field("choice").unwrap();
        assert_eq!(style.refine_field_template(&choice, skin_template.clone()), FIELDSET_FIELD_TEMPLATE);
        assert_eq!(style.refine_field_template(&choice, "custom.html".into()), "custom.html");

        let text = form.bound_field("text").unwrap();
        assert_eq!(style.refine_field_template(&text, skin_template.clone()), skin_template);
    }

    #[test]
    fn test_values() {
        let form = Form::new("FoundationForm").with_field(Field::char("text"));
        let bf = form.bound_field("text").unwrap();
        let style = FoundationStyle::new();
        assert_eq!(style.container_class(&bf).as_deref(), Some("form-field"));
        assert_eq!(style.label_class(&bf), None);
        assert_eq!(style.widget_class(&bf), None);
        assert_eq!(style.widget_invalid_class(&bf).as_deref(), Some("is-invalid-input"));
        assert_eq!(
            style.config().field_label_invalid_css_class.as_deref(),
            Some("is-invalid-label")
        );
    }
}
