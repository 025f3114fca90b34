//! The [`Tapeform`]: a form combined with a style and settings.
//!
//! Building a tapeform runs the construction pass over every field, in
//! declaration order: widget options, then widget template, then widget CSS
//! class. Validation through the tapeform ([`Tapeform::full_clean`],
//! [`Tapeform::is_valid`], [`Tapeform::add_error`]) runs the invalid pass over
//! every field with errors. Invalid styling is therefore absent before
//! validation and present after it, and repeating validation never
//! duplicates a class token.
//!
//! ```
//! use tapeforms_forms::{Field, Form, FormData};
//! use tapeforms_render::prelude::*;
//! use tapeforms_render::skins::Bootstrap4Style;
//!
//! let form = Form::new("ContactForm").with_field(Field::char("name"));
//! let mut tapeform = Tapeform::builder(form).style(Bootstrap4Style::new()).build();
//!
//! let widget = &tapeform.field("name").unwrap().bound_field().widget().attrs;
//! assert_eq!(widget.get("class").map(String::as_str), Some("form-control"));
//!
//! tapeform.bind(FormData::new());
//! assert!(!tapeform.is_valid());
//! let widget = &tapeform.field("name").unwrap().bound_field().widget().attrs;
//! assert_eq!(widget.get("class").map(String::as_str), Some("form-control is-invalid"));
//! assert_eq!(widget.get("aria-invalid").map(String::as_str), Some("true"));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Deref;

use tapeforms_core::error::{TapeformsError, TapeformsResult};
use tapeforms_core::settings::Settings;
use tapeforms_core::utils::join_css_class;
use tapeforms_forms::{BoundField, Field, Form, FormData, WidgetType};
use tapeforms_template::context::{Context, ContextValue};
use tapeforms_template::engine::TemplateRenderer;

use crate::config::{OverrideTier, StyleConfig};
use crate::fieldset::FieldsetSpec;
use crate::layout::Renderable;
use crate::media::Media;
use crate::style::{non_empty, DefaultStyle, StyleResolver};

/// Builder for [`Tapeform`].
#[derive(Debug)]
pub struct TapeformBuilder {
    form: Form,
    style: Box<dyn StyleResolver>,
    settings: Settings,
    overrides: Option<StyleConfig>,
    fieldsets: Vec<FieldsetSpec>,
    media: Media,
}

impl TapeformBuilder {
    /// Uses `style` instead of [`DefaultStyle`].
    #[must_use]
    pub fn style(mut self, style: impl StyleResolver + 'static) -> Self {
        self.style = Box::new(style);
        self
    }

    /// Uses an already boxed style, e.g. one from [`skins::by_name`](crate::skins::by_name).
    #[must_use]
    pub fn boxed_style(mut self, style: Box<dyn StyleResolver>) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Form-specific values laid over the style's configuration.
    #[must_use]
    pub fn configure(mut self, config: StyleConfig) -> Self {
        match &mut self.overrides {
            Some(existing) => existing.merge(config),
            None => self.overrides = Some(config),
        }
        self
    }

    /// Declares the fieldsets generated by [`Tapeform::fieldsets`].
    #[must_use]
    pub fn fieldsets(mut self, specs: impl IntoIterator<Item = FieldsetSpec>) -> Self {
        self.fieldsets = specs.into_iter().collect();
        self
    }

    /// Form-specific assets, rendered after the style's own.
    #[must_use]
    pub fn media(mut self, media: Media) -> Self {
        self.media.extend(media);
        self
    }

    /// Builds the tapeform and runs the construction pass over every field.
    ///
    /// A form that was already validated also gets the invalid pass.
    pub fn build(mut self) -> Tapeform {
        if let Some(overrides) = self.overrides {
            self.style.config_mut().merge(overrides);
        }
        let mut tapeform = Tapeform {
            form: self.form,
            style: self.style,
            settings: self.settings,
            fieldsets: self.fieldsets,
            media: self.media,
            invalid_marks: BTreeMap::new(),
        };

        let names: Vec<String> = tapeform.form.field_names().into_iter().map(String::from).collect();
        for name in &names {
            tapeform.widget_options_step(name);
            tapeform.widget_template_step(name);
            tapeform.widget_css_class_step(name);
        }
        if tapeform.form.is_validated() {
            tapeform.invalid_pass();
        }
        tracing::debug!(
            form = tapeform.form.name(),
            style = tapeform.style.name(),
            fields = names.len(),
            "tapeform constructed"
        );
        tapeform
    }
}

/// A form rendered through templates with a particular style.
///
/// Dereferences to the wrapped [`Form`] for read access. Mutations go
/// through the tapeform so that widget styling stays in sync.
pub struct Tapeform {
    form: Form,
    style: Box<dyn StyleResolver>,
    settings: Settings,
    fieldsets: Vec<FieldsetSpec>,
    media: Media,
    /// Class tokens added by the invalid pass, per field. A field listed
    /// here also carries `aria-invalid`.
    invalid_marks: BTreeMap<String, Vec<String>>,
}

impl Tapeform {
    /// Starts building a tapeform around `form`.
    pub fn builder(form: Form) -> TapeformBuilder {
        TapeformBuilder {
            form,
            style: Box::new(DefaultStyle::new()),
            settings: Settings::default(),
            overrides: None,
            fieldsets: Vec::new(),
            media: Media::new(),
        }
    }

    /// A tapeform with the default style and settings.
    pub fn new(form: Form) -> Self {
        Self::builder(form).build()
    }

    pub const fn form(&self) -> &Form {
        &self.form
    }

    /// Unwraps the form, keeping all widget changes.
    pub fn into_form(self) -> Form {
        self.form
    }

    pub fn style(&self) -> &dyn StyleResolver {
        self.style.as_ref()
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The configured fieldset specs.
    pub fn fieldset_specs(&self) -> &[FieldsetSpec] {
        &self.fieldsets
    }

    fn unknown_field(&self, field_name: &str) -> TapeformsError {
        tracing::warn!(form = self.form.name(), field = field_name, "unknown field");
        TapeformsError::UnknownField(format!(
            "'{}' has no field named '{field_name}'.",
            self.form.name()
        ))
    }

    fn ensure_field(&self, field_name: &str) -> TapeformsResult<()> {
        if self.form.has_field(field_name) {
            Ok(())
        } else {
            Err(self.unknown_field(field_name))
        }
    }

    // -- Resolution --

    /// The field template: explicit argument, field-name override, field-kind
    /// override, style field template, then the settings default. The style
    /// may refine the result.
    pub fn resolve_field_template(&self, field: &BoundField<'_>, using: Option<&str>) -> String {
        let config = self.style.config();
        let (template, tier) = if let Some(explicit) = using.filter(|t| !t.is_empty()) {
            (explicit.to_string(), "argument")
        } else if let Some((template, tier)) =
            config.field_template_overrides.lookup(field.name(), field.field().kind)
        {
            let tier = match tier {
                OverrideTier::Name => "override by name",
                OverrideTier::Type => "override by type",
            };
            (template.to_string(), tier)
        } else if let Some(template) = non_empty(config.field_template.as_ref()) {
            (template.to_string(), "style")
        } else {
            (self.settings.field_default_template.clone(), "default")
        };

        let template = self.style.refine_field_template(field, template);
        tracing::trace!(field = field.name(), template = %template, tier, "field template resolved");
        template
    }

    /// The widget template override for a field, if any: by field name, then
    /// by widget type.
    pub fn resolve_widget_template_override(&self, field_name: &str, field: &Field) -> Option<String> {
        self.style
            .widget_template_overrides()
            .get(field_name, field.widget.widget_type)
            .map(String::from)
    }

    pub fn resolve_container_css_class(&self, field: &BoundField<'_>) -> Option<String> {
        self.style.container_class(field)
    }

    /// The label class, with the invalid class joined on when the field has
    /// errors.
    pub fn resolve_label_css_class(&self, field: &BoundField<'_>) -> Option<String> {
        let base = self.style.label_class(field);
        let invalid = non_empty(self.style.config().field_label_invalid_css_class.as_ref());
        match invalid {
            Some(invalid) if field.has_errors() => {
                Some(join_css_class(base.as_deref(), &[Some(invalid)]))
            }
            _ => base,
        }
    }

    pub fn resolve_widget_css_class(&self, field: &BoundField<'_>) -> Option<String> {
        self.style.widget_class(field)
    }

    pub fn resolve_widget_invalid_css_class(&self, field: &BoundField<'_>) -> Option<String> {
        self.style.widget_invalid_class(field)
    }

    /// The context a field template is rendered with.
    pub fn resolve_field_context<'a>(&'a self, field: &BoundField<'a>) -> FieldContext<'a> {
        let widget = field.widget();
        let widget_class_name = widget.widget_type.tag();
        let help_text = field.help_text();

        FieldContext {
            form: self.to_context_value(),
            field: *field,
            field_id: field.id_for_label(),
            field_name: field.name().to_string(),
            errors: field.errors().to_vec(),
            required: field.required(),
            label: field.label(),
            label_css_class: self.resolve_label_css_class(field),
            help_text: (!help_text.is_empty()).then(|| help_text.to_string()),
            container_css_class: self.resolve_container_css_class(field),
            widget_input_type: widget
                .input_type
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| widget_class_name.clone()),
            widget_class_name,
        }
    }

    // -- Construction pass --

    /// Sets browser input types on date and time widgets.
    pub fn apply_widget_options(&mut self, field_name: &str) -> TapeformsResult<()> {
        self.ensure_field(field_name)?;
        self.widget_options_step(field_name);
        Ok(())
    }

    /// Writes the resolved widget template override onto the widget.
    pub fn apply_widget_template(&mut self, field_name: &str) -> TapeformsResult<()> {
        self.ensure_field(field_name)?;
        self.widget_template_step(field_name);
        Ok(())
    }

    /// Joins the resolved widget class onto the widget's `class` attribute.
    pub fn apply_widget_css_class(&mut self, field_name: &str) -> TapeformsResult<()> {
        self.ensure_field(field_name)?;
        self.widget_css_class_step(field_name);
        Ok(())
    }

    /// Marks a field's widget invalid: joins the invalid class and sets
    /// `aria-invalid`.
    pub fn apply_widget_invalid_options(&mut self, field_name: &str) -> TapeformsResult<()> {
        self.ensure_field(field_name)?;
        self.widget_invalid_step(field_name);
        Ok(())
    }

    fn widget_options_step(&mut self, field_name: &str) {
        let Some(field) = self.form.field_mut(field_name) else {
            return;
        };
        let widget = &mut field.widget;
        match widget.widget_type {
            WidgetType::DateInput => widget.input_type = Some("date".to_string()),
            WidgetType::TimeInput => widget.input_type = Some("time".to_string()),
            WidgetType::SplitDateTimeWidget => {
                for (sub, input_type) in widget.subwidgets.iter_mut().zip(["date", "time"]) {
                    sub.input_type = Some(input_type.to_string());
                }
            }
            _ => {}
        }
    }

    fn widget_template_step(&mut self, field_name: &str) {
        let Some(template) = self
            .form
            .field(field_name)
            .and_then(|field| self.resolve_widget_template_override(field_name, field))
        else {
            return;
        };
        tracing::trace!(field = field_name, template = %template, "widget template applied");
        if let Some(field) = self.form.field_mut(field_name) {
            field.widget.template_name = Some(template);
        }
    }

    fn widget_css_class_step(&mut self, field_name: &str) {
        let Some(class) = self
            .form
            .bound_field(field_name)
            .and_then(|bf| self.style.widget_class(&bf))
        else {
            return;
        };
        if let Some(field) = self.form.field_mut(field_name) {
            join_class_attr(&mut field.widget.attrs, &class);
            tracing::trace!(field = field_name, class = %class, "widget class applied");
        }
    }

    fn widget_invalid_step(&mut self, field_name: &str) {
        let class = self
            .form
            .bound_field(field_name)
            .and_then(|bf| self.style.widget_invalid_class(&bf));
        let Some(field) = self.form.field_mut(field_name) else {
            return;
        };
        let attrs = &mut field.widget.attrs;
        let marks = self.invalid_marks.entry(field_name.to_string()).or_default();
        if let Some(class) = &class {
            let added: Vec<String> = {
                let existing: Vec<&str> = attrs
                    .get("class")
                    .map(|c| c.split_whitespace().collect())
                    .unwrap_or_default();
                class
                    .split_whitespace()
                    .filter(|token| !existing.contains(token))
                    .map(String::from)
                    .collect()
            };
            join_class_attr(attrs, class);
            marks.extend(added);
        }
        attrs.insert("aria-invalid".to_string(), "true".to_string());
        tracing::debug!(field = field_name, class = ?class, "invalid options applied");
    }

    /// Marks every field with errors invalid.
    fn invalid_pass(&mut self) {
        for name in self.form.errors().field_names() {
            if self.form.has_field(&name) {
                self.widget_invalid_step(&name);
            }
        }
    }

    /// Takes back what the invalid pass added, leaving other classes alone.
    fn clear_invalid_marks(&mut self) {
        for (name, tokens) in std::mem::take(&mut self.invalid_marks) {
            let Some(field) = self.form.field_mut(&name) else {
                continue;
            };
            let attrs = &mut field.widget.attrs;
            attrs.remove("aria-invalid");
            let kept = attrs.get("class").map(|class| {
                class
                    .split_whitespace()
                    .filter(|token| !tokens.iter().any(|t| t == token))
                    .collect::<Vec<_>>()
                    .join(" ")
            });
            match kept {
                Some(kept) if kept.is_empty() => {
                    attrs.remove("class");
                }
                Some(kept) => {
                    attrs.insert("class".to_string(), kept);
                }
                None => {}
            }
            tracing::trace!(field = %name, "invalid options cleared");
        }
    }

    // -- Validation --

    /// Binds new data. Validation state is reset, and so is invalid styling.
    pub fn bind(&mut self, data: FormData) {
        self.clear_invalid_marks();
        self.form.bind(data);
    }

    /// Validates the form and marks every field with errors invalid.
    pub fn full_clean(&mut self) {
        self.clear_invalid_marks();
        self.form.full_clean();
        self.invalid_pass();
    }

    /// Validates if needed. Returns `true` for a bound form without errors.
    pub fn is_valid(&mut self) -> bool {
        if !self.form.is_validated() {
            self.full_clean();
        }
        self.form.is_valid()
    }

    /// Adds an error and marks the field invalid. `None` adds a non-field
    /// error.
    pub fn add_error(&mut self, field_name: Option<&str>, message: impl Into<String>) -> TapeformsResult<()> {
        self.form.add_error(field_name, message)?;
        if let Some(name) = field_name {
            if self.form.has_field(name) {
                self.widget_invalid_step(name);
            }
        }
        Ok(())
    }

    // -- Rendering --

    /// One field with its tapeform, ready to render.
    pub fn field(&self, field_name: &str) -> TapeformsResult<TapeformField<'_>> {
        self.form
            .bound_field(field_name)
            .map(|bound_field| TapeformField {
                tapeform: self,
                bound_field,
            })
            .ok_or_else(|| self.unknown_field(field_name))
    }

    /// Renders one field through its field template.
    pub fn render_field(
        &self,
        renderer: &dyn TemplateRenderer,
        field: &BoundField<'_>,
        using: Option<&str>,
    ) -> TapeformsResult<String> {
        let template = self.resolve_field_template(field, using);
        let widget_html = field.as_widget(renderer)?;
        let context = self.resolve_field_context(field).to_context(&widget_html);
        renderer.render_to_string(&template, &context)
    }

    /// Renders the whole form with its layout template.
    pub fn as_tapeform(&self, renderer: &dyn TemplateRenderer) -> TapeformsResult<String> {
        self.render_as_standalone(renderer)
    }

    /// Assets the style needs, followed by the form's own.
    pub fn media(&self) -> Media {
        let mut media = self.style.media();
        media.extend(self.media.clone());
        media
    }

    /// The combined assets as HTML tags under the settings' static URL.
    pub fn render_media(&self) -> String {
        self.media().render(&self.settings.static_url)
    }

    /// The form as a template value (`form` in every context).
    pub fn to_context_value(&self) -> ContextValue {
        let form = &self.form;
        let mut map = HashMap::new();
        map.insert("name".to_string(), ContextValue::from(form.name()));
        map.insert("is_bound".to_string(), ContextValue::Bool(form.is_bound()));
        map.insert(
            "is_valid".to_string(),
            ContextValue::from(
                form.is_validated()
                    .then(|| form.is_bound() && form.errors().is_empty()),
            ),
        );
        map.insert(
            "fields".to_string(),
            ContextValue::from(form.field_names()),
        );
        map.insert(
            "non_field_errors".to_string(),
            ContextValue::from(form.non_field_errors().to_vec()),
        );
        map.insert("media".to_string(), ContextValue::safe(self.render_media()));
        ContextValue::Dict(map)
    }
}

fn join_class_attr(attrs: &mut BTreeMap<String, String>, class: &str) {
    let joined = join_css_class(attrs.get("class").map(String::as_str), &[Some(class)]);
    attrs.insert("class".to_string(), joined);
}

impl Deref for Tapeform {
    type Target = Form;

    fn deref(&self) -> &Form {
        &self.form
    }
}

impl fmt::Debug for Tapeform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tapeform")
            .field("form", &self.form)
            .field("style", &self.style.name())
            .field("fieldsets", &self.fieldsets.len())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Tapeform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.form, f)
    }
}

/// The variables a field template sees.
#[derive(Debug, Clone)]
pub struct FieldContext<'a> {
    /// The owning form.
    pub form: ContextValue,
    pub field: BoundField<'a>,
    /// Target of `<label for>`; empty without ids.
    pub field_id: String,
    pub field_name: String,
    pub errors: Vec<String>,
    pub required: bool,
    pub label: String,
    pub label_css_class: Option<String>,
    /// Rendered unescaped.
    pub help_text: Option<String>,
    pub container_css_class: Option<String>,
    /// Lower-cased widget type, e.g. `checkboxinput`.
    pub widget_class_name: String,
    /// The widget's input type, or `widget_class_name` without one.
    pub widget_input_type: String,
}

impl FieldContext<'_> {
    /// Converts to a template context; `widget_html` becomes `field.html`.
    pub fn to_context(&self, widget_html: &str) -> Context {
        let mut field = self.field.to_context_value();
        if let ContextValue::Dict(map) = &mut field {
            map.insert("html".to_string(), ContextValue::safe(widget_html));
        }

        let mut context = Context::new();
        context.set("form", self.form.clone());
        context.set("field", field);
        context.set("field_id", self.field_id.as_str());
        context.set("field_name", self.field_name.as_str());
        context.set("errors", self.errors.clone());
        context.set("required", self.required);
        context.set("label", self.label.as_str());
        context.set("label_css_class", self.label_css_class.clone());
        context.set("help_text", self.help_text.clone().map(ContextValue::safe));
        context.set("container_css_class", self.container_css_class.clone());
        context.set("widget_class_name", self.widget_class_name.as_str());
        context.set("widget_input_type", self.widget_input_type.as_str());
        context
    }
}

/// A field of a tapeform, accepted by [`formfield_tag`](crate::tags::formfield_tag).
#[derive(Debug, Clone, Copy)]
pub struct TapeformField<'a> {
    tapeform: &'a Tapeform,
    bound_field: BoundField<'a>,
}

impl<'a> TapeformField<'a> {
    pub const fn tapeform(&self) -> &'a Tapeform {
        self.tapeform
    }

    pub const fn bound_field(&self) -> &BoundField<'a> {
        &self.bound_field
    }

    pub fn render(&self, renderer: &dyn TemplateRenderer, using: Option<&str>) -> TapeformsResult<String> {
        self.tapeform.render_field(renderer, &self.bound_field, using)
    }
}
