//! Bulma.

use tapeforms_forms::{BoundField, WidgetType};

use crate::config::{StyleConfig, TemplateOverrides};
use crate::media::Media;
use crate::style::{base_label_class, base_widget_class, StyleResolver};

/// Bulma forms. File inputs need a small script to show the chosen file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulmaStyle {
    config: StyleConfig,
}

impl BulmaStyle {
    pub fn new() -> Self {
        let select = "tapeforms/widgets/bulma/select.html";
        Self {
            config: StyleConfig::new()
                .with_field_template("tapeforms/fields/bulma.html")
                .with_field_container_css_class("field")
                .with_field_label_css_class("label")
                .with_widget_invalid_css_class("is-danger")
                .with_widget_template_overrides(
                    TemplateOverrides::new()
                        .with_type(WidgetType::FileInput, "tapeforms/widgets/bulma/file.html")
                        .with_type(
                            WidgetType::ClearableFileInput,
                            "tapeforms/widgets/bulma/clearable_file_input.html",
                        )
                        .with_type(WidgetType::RadioSelect, "tapeforms/widgets/bulma/radio.html")
                        .with_type(WidgetType::Select, select)
                        .with_type(WidgetType::SelectMultiple, select)
                        .with_type(WidgetType::NullBooleanSelect, select),
                ),
        }
    }
}

impl Default for BulmaStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleResolver for BulmaStyle {
    fn name(&self) -> &'static str {
        "bulma"
    }

    fn config(&self) -> &StyleConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut StyleConfig {
        &mut self.config
    }

    fn label_class(&self, field: &BoundField<'_>) -> Option<String> {
        if field.widget().widget_type.is_checkbox() {
            Some("checkbox".to_string())
        } else {
            base_label_class(&self.config, field)
        }
    }

    fn widget_class(&self, field: &BoundField<'_>) -> Option<String> {
        let widget_type = field.widget().widget_type;
        let class = if widget_type == WidgetType::Textarea {
            "textarea"
        } else if widget_type.is_file_input() {
            "file-input"
        } else if widget_type.is_input() && !widget_type.is_checkbox() {
            "input"
        } else {
            return base_widget_class(&self.config, field);
        };
        Some(class.to_string())
    }

    fn media(&self) -> Media {
        Media::new().with_js("tapeforms/js/bulma_fileinput.js")
    }
}

#[cfg(test)]
mod tests {
    use tapeforms_forms::{Field, FieldKind, Form};

    use super::*;

    #[test]
    fn test_widget_classes() {
        let form = Form::new("BulmaForm").with_fields([
            Field::char("text"),
            Field::char("body").widget(WidgetType::Textarea),
            Field::new("upload", FieldKind::FileField),
            Field::new("agree", FieldKind::BooleanField),
            Field::new("pick", FieldKind::ChoiceField),
            Field::new("day", FieldKind::DateField),
        ]);
        let style = BulmaStyle::new();
        let widget_class = |name: &str| style.widget_class(&form.bound_field(name).unwrap());

        assert_eq!(widget_class("text").as_deref(), Some("input"));
        assert_eq!(widget_class("body").as_deref(), Some("textarea"));
        assert_eq!(widget_class("upload").as_deref(), Some("file-input"));
        assert_eq!(widget_class("agree"), None);
        assert_eq!(widget_class("pick"), None);
        assert_eq!(widget_class("day").as_deref(), Some("input"));
    }

    #[test]
    fn test_label_and_container_classes() {
        let form = Form::new("BulmaForm").with_fields([
            Field::char("text"),
            Field::new("agree", FieldKind::BooleanField),
        ]);
        let style = BulmaStyle::new();
        let text = form.bound_field("text").unwrap();
        let agree = form.bound_field("agree").unwrap();
        assert_eq!(style.label_class(&text).as_deref(), Some("label"));
        assert_eq!(style.label_class(&agree).as_deref(), Some("checkbox"));
        assert_eq!(style.container_class(&agree).as_deref(), Some("field"));
    }

    #[test]
    fn test_templates_and_media() {
        let style = BulmaStyle::new();
        let overrides = style.widget_template_overrides();
        assert_eq!(
            overrides.get("x", WidgetType::NullBooleanSelect),
            Some("tapeforms/widgets/bulma/select.html")
        );
        assert_eq!(
            overrides.get("x", WidgetType::ClearableFileInput),
            Some("tapeforms/widgets/bulma/clearable_file_input.html")
        );
        assert_eq!(overrides.get("x", WidgetType::CheckboxSelectMultiple), None);
        assert_eq!(style.media().js, ["tapeforms/js/bulma_fileinput.js"]);
        assert_eq!(style.config().layout_template, None);
    }
}
