//! Bound fields: a field paired with its form's data and errors.
//!
//! A [`BoundField`] borrows both the form and the field, so it is cheap to
//! create and always reflects the form's current state. Templates see it as
//! the `field` variable.

use std::collections::{BTreeMap, HashMap};

use tapeforms_core::error::TapeformsResult;
use tapeforms_core::utils::text::pretty_name;
use tapeforms_template::context::{Context, ContextValue};
use tapeforms_template::engine::TemplateRenderer;

use crate::fields::Field;
use crate::form::Form;
use crate::widgets::Widget;

/// A read-only view of one field within a form.
#[derive(Debug, Clone, Copy)]
pub struct BoundField<'a> {
    form: &'a Form,
    field: &'a Field,
}

impl<'a> BoundField<'a> {
    /// Binds `field` to `form`.
    pub const fn new(form: &'a Form, field: &'a Field) -> Self {
        Self { form, field }
    }

    /// The owning form.
    pub const fn form(&self) -> &'a Form {
        self.form
    }

    /// The field definition.
    pub const fn field(&self) -> &'a Field {
        self.field
    }

    /// The declared field name.
    pub fn name(&self) -> &'a str {
        &self.field.name
    }

    /// The html `name` attribute, including the form prefix.
    pub fn html_name(&self) -> String {
        self.form.add_prefix(&self.field.name)
    }

    /// The generated DOM id, or `""` when the form has no `auto_id`.
    pub fn auto_id(&self) -> String {
        self.form.auto_id_for(&self.field.name)
    }

    /// The id a label should target: a non-empty explicit `id` attribute wins
    /// over the generated one, and the widget formats the result.
    pub fn id_for_label(&self) -> String {
        let id = self
            .field
            .widget
            .attrs
            .get("id")
            .filter(|id| !id.is_empty())
            .cloned()
            .unwrap_or_else(|| self.auto_id());
        self.field.widget.id_for_label(&id)
    }

    /// The label text.
    pub fn label(&self) -> String {
        self.field
            .label
            .clone()
            .unwrap_or_else(|| pretty_name(&self.field.name))
    }

    pub fn help_text(&self) -> &'a str {
        &self.field.help_text
    }

    /// This field's validation errors.
    pub fn errors(&self) -> &'a [String] {
        self.form.errors().get(&self.field.name)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors().is_empty()
    }

    pub fn is_hidden(&self) -> bool {
        self.field.widget.is_hidden()
    }

    pub const fn required(&self) -> bool {
        self.field.required
    }

    /// The current raw value (bound data or initial).
    pub fn value(&self) -> Option<String> {
        self.form.raw_value(self.field)
    }

    pub const fn widget(&self) -> &'a Widget {
        &self.field.widget
    }

    /// The widget's attributes plus the id and the required/disabled flags.
    pub fn build_widget_attrs(&self) -> BTreeMap<String, String> {
        let mut attrs = self.field.widget.attrs.clone();
        let auto_id = self.auto_id();
        if !auto_id.is_empty() && attrs.get("id").map_or(true, String::is_empty) {
            attrs.insert("id".to_string(), auto_id);
        }
        if self.field.required && !self.is_hidden() && !self.field.widget.widget_type.is_multiple_input() {
            attrs.insert("required".to_string(), String::new());
        }
        if self.field.disabled {
            attrs.insert("disabled".to_string(), String::new());
        }
        attrs
    }

    /// Renders the widget, through its template when one is set.
    pub fn as_widget(&self, renderer: &dyn TemplateRenderer) -> TapeformsResult<String> {
        let widget = &self.field.widget;
        let name = self.html_name();
        let value = self.value();
        let attrs = self.build_widget_attrs();

        match &widget.template_name {
            Some(template) => {
                let mut widget_ctx = widget.get_context(&name, value.as_deref(), &attrs);
                widget_ctx.insert("required".to_string(), ContextValue::Bool(self.field.required));
                let mut context = Context::new();
                context.set("widget", ContextValue::Dict(widget_ctx));
                renderer.render_to_string(template, &context)
            }
            None => Ok(widget.render(&name, value.as_deref(), &attrs)),
        }
    }

    /// The bound field as a template value.
    ///
    /// The rendered widget is not included; callers that render add it under
    /// `html`.
    pub fn to_context_value(&self) -> ContextValue {
        let mut map = HashMap::new();
        map.insert("name".to_string(), ContextValue::from(self.name()));
        map.insert("html_name".to_string(), ContextValue::from(self.html_name()));
        map.insert("auto_id".to_string(), ContextValue::from(self.auto_id()));
        map.insert("id_for_label".to_string(), ContextValue::from(self.id_for_label()));
        map.insert("label".to_string(), ContextValue::from(self.label()));
        map.insert("help_text".to_string(), ContextValue::from(self.help_text()));
        map.insert("errors".to_string(), ContextValue::from(self.errors().to_vec()));
        map.insert("required".to_string(), ContextValue::Bool(self.required()));
        map.insert("is_hidden".to_string(), ContextValue::Bool(self.is_hidden()));
        map.insert("value".to_string(), ContextValue::from(self.value()));
        map.insert(
            "widget_type".to_string(),
            ContextValue::from(self.field.widget.widget_type.class_name()),
        );
        ContextValue::Dict(map)
    }
}

#[cfg(test)]
mod tests {
    use tapeforms_template::recording::RecordingRenderer;

    use super::*;
    use crate::data::FormData;
    use crate::fields::FieldKind;
    use crate::widgets::WidgetType;

    fn make_form() -> Form {
        Form::new("ProfileForm").with_fields([
            Field::char("first_name"),
            Field::char("nickname").required(false).label("Alias"),
            Field::new("when", FieldKind::SplitDateTimeField).required(false),
        ])
    }

    #[test]
    fn test_label_defaults_to_pretty_name() {
        let form = make_form();
        assert_eq!(form.bound_field("first_name").unwrap().label(), "First name");
        assert_eq!(form.bound_field("nickname").unwrap().label(), "Alias");
    }

    #[test]
    fn test_id_for_label_prefers_explicit_id() {
        let mut form = make_form();
        assert_eq!(form.bound_field("first_name").unwrap().id_for_label(), "id_first_name");
        form.field_mut("first_name").unwrap().widget.attrs.insert("id".into(), "custom".into());
        assert_eq!(form.bound_field("first_name").unwrap().id_for_label(), "custom");
    }

    #[test]
    fn test_empty_explicit_id_falls_back_to_auto_id() {
        let mut form = make_form();
        form.field_mut("first_name").unwrap().widget.attrs.insert("id".into(), String::new());
        let bf = form.bound_field("first_name").unwrap();
        assert_eq!(bf.id_for_label(), "id_first_name");
        assert_eq!(bf.build_widget_attrs().get("id").map(String::as_str), Some("id_first_name"));
    }

    #[test]
    fn test_id_for_label_composite_widget() {
        let form = make_form();
        assert_eq!(form.bound_field("when").unwrap().id_for_label(), "id_when_0");
    }

    #[test]
    fn test_id_for_label_without_auto_id() {
        let form = make_form().with_auto_id(None);
        assert_eq!(form.bound_field("first_name").unwrap().id_for_label(), "");
    }

    #[test]
    fn test_build_widget_attrs() {
        let form = make_form();
        let attrs = form.bound_field("first_name").unwrap().build_widget_attrs();
        assert_eq!(attrs.get("id").map(String::as_str), Some("id_first_name"));
        assert_eq!(attrs.get("required").map(String::as_str), Some(""));
        let attrs = form.bound_field("nickname").unwrap().build_widget_attrs();
        assert!(!attrs.contains_key("required"));
    }

    #[test]
    fn test_as_widget_inline() {
        let form = make_form().with_data([("first_name", "Ada")].into_iter().collect());
        let html = form
            .bound_field("first_name")
            .unwrap()
            .as_widget(&RecordingRenderer::new())
            .unwrap();
        assert!(html.starts_with("<input type=\"text\" name=\"first_name\" value=\"Ada\""));
        assert!(html.contains("id=\"id_first_name\""));
    }

    #[test]
    fn test_as_widget_through_template() {
        let mut form = make_form();
        form.field_mut("nickname").unwrap().widget.template_name = Some("my/widget.html".into());
        let renderer = RecordingRenderer::with_output("<custom>");
        let html = form.bound_field("nickname").unwrap().as_widget(&renderer).unwrap();
        assert_eq!(html, "<custom>");
        let (name, ctx) = renderer.last_call().unwrap();
        assert_eq!(name, "my/widget.html");
        assert_eq!(ctx.get("widget.name").and_then(ContextValue::as_str), Some("nickname"));
        assert_eq!(ctx.get("widget.required").and_then(ContextValue::as_bool), Some(false));
    }

    #[test]
    fn test_errors_follow_form() {
        let mut form = make_form().with_data(FormData::new());
        assert!(!form.bound_field("first_name").unwrap().has_errors());
        form.full_clean();
        let bf = form.bound_field("first_name").unwrap();
        assert_eq!(bf.errors(), ["This field is required."]);
    }

    #[test]
    fn test_hidden_widget() {
        let form = Form::new("F").with_field(Field::char("token").widget(WidgetType::HiddenInput));
        let bf = form.bound_field("token").unwrap();
        assert!(bf.is_hidden());
        assert!(!bf.build_widget_attrs().contains_key("required"));
    }

    #[test]
    fn test_to_context_value() {
        let form = make_form();
        let value = form.bound_field("nickname").unwrap().to_context_value();
        assert_eq!(value.get("label").and_then(ContextValue::as_str), Some("Alias"));
        assert_eq!(value.get("required").and_then(ContextValue::as_bool), Some(false));
        assert_eq!(value.get("widget_type").and_then(ContextValue::as_str), Some("TextInput"));
    }
}
