//! Layout rendering for whole forms and fieldsets.
//!
//! A [`Renderable`] is anything laid out by a layout template: it knows its
//! hidden and visible fields and its non-field errors. The provided methods
//! resolve the layout template and context and render the unit.

use std::collections::HashMap;

use tapeforms_core::error::TapeformsResult;
use tapeforms_core::logging::render_span;
use tapeforms_forms::BoundField;
use tapeforms_template::context::{Context, ContextValue};
use tapeforms_template::engine::TemplateRenderer;

use crate::style::non_empty;
use crate::tapeform::Tapeform;

/// A unit rendered through a layout template.
pub trait Renderable {
    /// The tapeform whose fields are rendered.
    fn tapeform(&self) -> &Tapeform;

    /// Layout template configured for this unit.
    fn layout_template(&self) -> Option<&str>;

    /// Layout template used when nothing else is configured.
    fn default_layout_template(&self) -> &str;

    fn hidden_fields(&self) -> Vec<BoundField<'_>>;

    fn visible_fields(&self) -> Vec<BoundField<'_>>;

    /// Visible fields grouped in rows; one field per row unless the unit
    /// declares columns.
    fn visible_rows(&self) -> Vec<Vec<BoundField<'_>>> {
        self.visible_fields().into_iter().map(|field| vec![field]).collect()
    }

    fn non_field_errors(&self) -> Vec<String>;

    /// The unit as the `form` template variable.
    fn unit_context(&self) -> ContextValue;

    /// Explicit argument, then the unit's layout template, then the default.
    fn resolve_layout_template(&self, using: Option<&str>) -> String {
        using
            .filter(|t| !t.is_empty())
            .or_else(|| self.layout_template().filter(|t| !t.is_empty()))
            .unwrap_or_else(|| self.default_layout_template())
            .to_string()
    }

    /// Errors are the non-field errors followed by the errors of every hidden
    /// field, since hidden fields cannot show their own.
    fn resolve_layout_context(&self) -> LayoutContext<'_> {
        let hidden_fields = self.hidden_fields();
        let mut errors = self.non_field_errors();
        for field in &hidden_fields {
            errors.extend(field.errors().iter().cloned());
        }

        LayoutContext {
            form: self.unit_context(),
            errors,
            hidden_fields,
            visible_fields: self.visible_fields(),
            rows: self.visible_rows(),
        }
    }

    /// Renders the unit with its layout template, pre-rendering every field.
    fn render_layout(&self, renderer: &dyn TemplateRenderer, using: Option<&str>) -> TapeformsResult<String> {
        let tapeform = self.tapeform();
        let span = render_span(tapeform.form().name());
        let _guard = span.enter();

        let template = self.resolve_layout_template(using);
        let context = self.resolve_layout_context().to_context(tapeform, renderer)?;
        tracing::debug!(template = %template, "rendering layout");
        renderer.render_to_string(&template, &context)
    }

    /// Renders with the resolved layout template and no explicit override.
    fn render_as_standalone(&self, renderer: &dyn TemplateRenderer) -> TapeformsResult<String> {
        self.render_layout(renderer, None)
    }
}

impl Renderable for Tapeform {
    fn tapeform(&self) -> &Tapeform {
        self
    }

    fn layout_template(&self) -> Option<&str> {
        non_empty(self.style().config().layout_template.as_ref())
    }

    fn default_layout_template(&self) -> &str {
        &self.settings().layout_default_template
    }

    fn hidden_fields(&self) -> Vec<BoundField<'_>> {
        self.form().hidden_fields()
    }

    fn visible_fields(&self) -> Vec<BoundField<'_>> {
        self.form().visible_fields()
    }

    fn non_field_errors(&self) -> Vec<String> {
        self.form().non_field_errors().to_vec()
    }

    fn unit_context(&self) -> ContextValue {
        self.to_context_value()
    }
}

/// The variables a layout template sees, before fields are rendered.
#[derive(Debug, Clone)]
pub struct LayoutContext<'a> {
    /// The unit itself.
    pub form: ContextValue,
    pub errors: Vec<String>,
    pub hidden_fields: Vec<BoundField<'a>>,
    pub visible_fields: Vec<BoundField<'a>>,
    /// `visible_fields` grouped in rows.
    pub rows: Vec<Vec<BoundField<'a>>>,
}

impl LayoutContext<'_> {
    /// Renders the fields and builds the template context.
    ///
    /// Visible fields carry their field template output as `rendered`;
    /// hidden fields carry their widget as `html`.
    pub fn to_context(
        &self,
        tapeform: &Tapeform,
        renderer: &dyn TemplateRenderer,
    ) -> TapeformsResult<Context> {
        let mut rendered: HashMap<&str, ContextValue> = HashMap::new();
        for field in &self.visible_fields {
            let html = tapeform.render_field(renderer, field, None)?;
            rendered.insert(field.name(), with_entry(field.to_context_value(), "rendered", html));
        }
        let entry = |field: &BoundField<'_>| {
            rendered
                .get(field.name())
                .cloned()
                .unwrap_or_else(|| field.to_context_value())
        };

        let hidden_fields = self
            .hidden_fields
            .iter()
            .map(|field| {
                let html = field.as_widget(renderer)?;
                Ok(with_entry(field.to_context_value(), "html", html))
            })
            .collect::<TapeformsResult<Vec<_>>>()?;
        let visible_fields: Vec<ContextValue> = self.visible_fields.iter().map(entry).collect();
        let rows: Vec<ContextValue> = self
            .rows
            .iter()
            .map(|row| ContextValue::List(row.iter().map(entry).collect()))
            .collect();

        let mut context = Context::new();
        context.set("form", self.form.clone());
        context.set("errors", self.errors.clone());
        context.set("hidden_fields", ContextValue::List(hidden_fields));
        context.set("visible_fields", ContextValue::List(visible_fields));
        context.set("rows", ContextValue::List(rows));
        Ok(context)
    }
}

fn with_entry(mut value: ContextValue, key: &str, html: String) -> ContextValue {
    if let ContextValue::Dict(map) = &mut value {
        map.insert(key.to_string(), ContextValue::safe(html));
    }
    value
}

#[cfg(test)]
mod tests {
    use tapeforms_core::settings::Settings;
    use tapeforms_forms::{Field, Form, FormData, WidgetType};
    use tapeforms_template::recording::RecordingRenderer;

    use super::*;
    use crate::config::StyleConfig;

    fn make_form() -> Form {
        Form::new("LayoutForm").with_fields([
            Field::char("hidden").widget(WidgetType::HiddenInput),
            Field::char("name"),
            Field::char("token").widget(WidgetType::HiddenInput).required(false),
        ])
    }

    #[test]
    fn test_layout_template_precedence() {
        let tapeform = Tapeform::new(make_form());
        assert_eq!(tapeform.resolve_layout_template(Some("x.html")), "x.html");
        assert_eq!(tapeform.resolve_layout_template(None), "tapeforms/layouts/default.html");

        let tapeform = Tapeform::builder(make_form())
            .configure(StyleConfig::new().with_layout_template("mine.html"))
            .build();
        assert_eq!(tapeform.resolve_layout_template(None), "mine.html");
        assert_eq!(tapeform.resolve_layout_template(Some("")), "mine.html");

        let tapeform = Tapeform::builder(make_form())
            .settings(Settings::default().with_layout_default_template("site.html"))
            .build();
        assert_eq!(tapeform.resolve_layout_template(None), "site.html");
    }

    #[test]
    fn test_layout_context_error_order() {
        let mut tapeform = Tapeform::new(make_form());
        tapeform.bind(FormData::new());
        tapeform.full_clean();
        tapeform.add_error(None, "Form error.").unwrap();
        tapeform.add_error(Some("token"), "Token error.").unwrap();

        let ctx = tapeform.resolve_layout_context();
        assert_eq!(
            ctx.errors,
            ["Form error.", "This field is required.", "Token error."]
        );
        let hidden: Vec<&str> = ctx.hidden_fields.iter().map(BoundField::name).collect();
        let visible: Vec<&str> = ctx.visible_fields.iter().map(BoundField::name).collect();
        assert_eq!(hidden, ["hidden", "token"]);
        assert_eq!(visible, ["name"]);
        assert_eq!(ctx.rows.len(), 1);
    }

    #[test]
    fn test_render_as_standalone_prerenders_fields() {
        let tapeform = Tapeform::new(make_form());
        let renderer = RecordingRenderer::with_output("OUT");
        let html = tapeform.render_as_standalone(&renderer).unwrap();
        assert_eq!(html, "OUT");

        assert_eq!(
            renderer.template_names(),
            ["tapeforms/fields/default.html", "tapeforms/layouts/default.html"]
        );
        let (_, ctx) = renderer.last_call().unwrap();
        assert_eq!(
            ctx.get("visible_fields.0.rendered").and_then(ContextValue::as_str),
            Some("OUT")
        );
        assert!(ctx
            .get("hidden_fields.1.html")
            .and_then(ContextValue::as_str)
            .is_some_and(|html| html.contains(r#"type="hidden" name="token""#)));
        assert_eq!(ctx.get("rows.0.0.name").and_then(ContextValue::as_str), Some("name"));
    }
}
