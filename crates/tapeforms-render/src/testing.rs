//! Helpers for testing skins and templates.

use tapeforms_core::error::{TapeformsError, TapeformsResult};
use tapeforms_template::engine::TemplateRenderer;

use crate::tapeform::Tapeform;

/// Renders every declared field of `tapeform` through its field template.
///
/// Returns `(field name, html)` pairs in declaration order. Useful for
/// snapshotting how a skin renders each kind of field.
pub fn render_each_field(
    tapeform: &Tapeform,
    renderer: &dyn TemplateRenderer,
) -> TapeformsResult<Vec<(String, String)>> {
    let form = tapeform.form();
    if form.fields().is_empty() {
        tracing::warn!(form = form.name(), "render_each_field on a form without fields");
        return Err(TapeformsError::ImproperlyConfigured(format!(
            "{} does not declare any fields",
            form.name()
        )));
    }

    form.bound_fields()
        .iter()
        .map(|field| {
            let html = tapeform.render_field(renderer, field, None)?;
            Ok((field.name().to_string(), html))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tapeforms_forms::{Field, FieldKind, Form, WidgetType};
    use tapeforms_template::recording::RecordingRenderer;

    use super::*;

    #[test]
    fn test_renders_every_field_in_order() {
        let tapeform = Tapeform::new(Form::new("SnapshotForm").with_fields([
            Field::char("name"),
            Field::new("agree", FieldKind::BooleanField),
            Field::char("token").widget(WidgetType::HiddenInput),
        ]));
        let renderer = RecordingRenderer::with_output("html");
        let rendered = render_each_field(&tapeform, &renderer).unwrap();

        let names: Vec<&str> = rendered.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["name", "agree", "token"]);
        assert!(rendered.iter().all(|(_, html)| html == "html"));
        assert_eq!(renderer.calls().len(), 3);
    }

    #[test]
    fn test_form_without_fields() {
        let tapeform = Tapeform::new(Form::new("EmptyForm"));
        let err = render_each_field(&tapeform, &RecordingRenderer::new()).unwrap_err();
        assert!(matches!(err, TapeformsError::ImproperlyConfigured(ref msg) if msg.contains("EmptyForm")));
    }
}
