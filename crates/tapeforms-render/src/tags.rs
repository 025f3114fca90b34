//! Entry points for template tags.
//!
//! `form_tag` renders a whole form or fieldset with its layout template and
//! `formfield_tag` renders one field with its field template. Both accept any
//! [`TagArgument`] and refuse values of the wrong kind with a
//! [`TapeformsError::TemplateSyntaxError`] naming the type they got.

use tapeforms_core::error::{TapeformsError, TapeformsResult};
use tapeforms_forms::Form;
use tapeforms_template::context::ContextValue;
use tapeforms_template::engine::TemplateRenderer;

use crate::fieldset::Fieldset;
use crate::layout::Renderable;
use crate::tapeform::{Tapeform, TapeformField};

/// A value that may be handed to a tag.
pub trait TagArgument {
    /// Name reported when the value is rejected.
    fn type_name(&self) -> &str;

    /// The value as a layout unit, if it is one.
    fn as_layout(&self) -> Option<&dyn Renderable> {
        None
    }

    /// The value as a single field, if it is one.
    fn as_field(&self) -> Option<TapeformField<'_>> {
        None
    }
}

/// Renders a form or fieldset, optionally with an explicit layout template.
pub fn form_tag(
    renderer: &dyn TemplateRenderer,
    value: &dyn TagArgument,
    using: Option<&str>,
) -> TapeformsResult<String> {
    let Some(unit) = value.as_layout() else {
        tracing::warn!(actual = value.type_name(), "form tag given a non-form value");
        return Err(TapeformsError::TemplateSyntaxError(format!(
            "Provided form should be a `Form` instance, actual type: {}",
            value.type_name()
        )));
    };
    unit.render_layout(renderer, using)
}

/// Renders one field, optionally with an explicit field template.
pub fn formfield_tag(
    renderer: &dyn TemplateRenderer,
    value: &dyn TagArgument,
    using: Option<&str>,
) -> TapeformsResult<String> {
    let Some(field) = value.as_field() else {
        tracing::warn!(actual = value.type_name(), "formfield tag given a non-field value");
        return Err(TapeformsError::TemplateSyntaxError(format!(
            "Provided field should be a `BoundField` instance, actual type: {}",
            value.type_name()
        )));
    };
    field.render(renderer, using)
}

impl TagArgument for Tapeform {
    fn type_name(&self) -> &str {
        "Tapeform"
    }

    fn as_layout(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl TagArgument for Fieldset<'_> {
    fn type_name(&self) -> &str {
        "Fieldset"
    }

    fn as_layout(&self) -> Option<&dyn Renderable> {
        Some(self)
    }
}

impl TagArgument for TapeformField<'_> {
    fn type_name(&self) -> &str {
        "BoundField"
    }

    fn as_field(&self) -> Option<TapeformField<'_>> {
        Some(*self)
    }
}

/// A plain form has no style to render with.
impl TagArgument for Form {
    fn type_name(&self) -> &str {
        self.name()
    }
}

impl TagArgument for ContextValue {
    fn type_name(&self) -> &str {
        ContextValue::type_name(self)
    }
}

#[cfg(test)]
mod tests {
    use tapeforms_forms::Field;
    use tapeforms_template::recording::RecordingRenderer;

    use super::*;
    use crate::fieldset::FieldsetSpec;

    fn make_tapeform() -> Tapeform {
        Tapeform::new(Form::new("TagForm").with_fields([Field::char("first"), Field::char("second")]))
    }

    #[test]
    fn test_form_tag_renders_layout() {
        let tapeform = make_tapeform();
        let renderer = RecordingRenderer::with_output("ok");
        assert_eq!(form_tag(&renderer, &tapeform, None).unwrap(), "ok");
        assert_eq!(renderer.template_names().last().map(String::as_str), Some("tapeforms/layouts/default.html"));

        renderer.clear();
        form_tag(&renderer, &tapeform, Some("custom.html")).unwrap();
        assert_eq!(renderer.template_names().last().map(String::as_str), Some("custom.html"));
    }

    #[test]
    fn test_form_tag_accepts_fieldset() {
        let tapeform = make_tapeform();
        let fieldset = tapeform.fieldset(FieldsetSpec::fields(["second"])).unwrap();
        let renderer = RecordingRenderer::new();
        form_tag(&renderer, &fieldset, None).unwrap();
        assert_eq!(
            renderer.template_names(),
            ["tapeforms/fields/default.html", "tapeforms/fieldsets/default.html"]
        );
    }

    #[test]
    fn test_form_tag_rejects_other_values() {
        let renderer = RecordingRenderer::new();
        let err = form_tag(&renderer, &ContextValue::from("foo"), None).unwrap_err();
        assert_eq!(err.to_string(), "Provided form should be a `Form` instance, actual type: str");

        let err = form_tag(&renderer, &Form::new("PlainForm"), None).unwrap_err();
        assert!(matches!(err, TapeformsError::TemplateSyntaxError(ref msg) if msg.ends_with("PlainForm")));

        let tapeform = make_tapeform();
        let field = tapeform.field("first").unwrap();
        let err = form_tag(&renderer, &field, None).unwrap_err();
        assert!(err.to_string().ends_with("actual type: BoundField"));
        assert!(renderer.calls().is_empty());
    }

    #[test]
    fn test_formfield_tag() {
        let tapeform = make_tapeform();
        let renderer = RecordingRenderer::with_output("field");
        let field = tapeform.field("first").unwrap();
        assert_eq!(formfield_tag(&renderer, &field, None).unwrap(), "field");
        formfield_tag(&renderer, &field, Some("mine.html")).unwrap();
        assert_eq!(renderer.template_names(), ["tapeforms/fields/default.html", "mine.html"]);
    }

    #[test]
    fn test_formfield_tag_rejects_other_values() {
        let renderer = RecordingRenderer::new();
        let err = formfield_tag(&renderer, &ContextValue::Integer(1), None).unwrap_err();
        assert_eq!(err.to_string(), "Provided field should be a `BoundField` instance, actual type: int");

        let tapeform = make_tapeform();
        let err = formfield_tag(&renderer, &tapeform, None).unwrap_err();
        assert!(err.to_string().ends_with("actual type: Tapeform"));
    }
}
