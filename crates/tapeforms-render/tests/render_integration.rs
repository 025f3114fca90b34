//! End-to-end rendering through the Tera engine: layouts, skins, invalid
//! styling, fieldsets loaded from TOML, and template directories.

use std::fs;

use serde::Deserialize;
use tapeforms_core::settings::Settings;
use tapeforms_forms::{Field, FieldKind, Form, FormData, WidgetType};
use tapeforms_render::prelude::*;
use tapeforms_render::testing::render_each_field;
use tapeforms_template::{ContextValue, Engine};

// ── Helpers ─────────────────────────────────────────────────────────

fn signup_form() -> Form {
    Form::new("SignupForm").with_fields([
        Field::char("hidden").widget(WidgetType::HiddenInput).required(false),
        Field::char("name"),
    ])
}

fn boxed(form: Form) -> Tapeform {
    Tapeform::builder(form)
        .configure(StyleConfig::new().with_field_container_css_class("box"))
        .build()
}

// ── Layout ──────────────────────────────────────────────────────────

#[test]
fn test_layout_context_of_invalid_form() {
    let mut tapeform = boxed(signup_form());
    tapeform.bind(FormData::new());
    assert!(!tapeform.is_valid());

    let layout = tapeform.resolve_layout_context();
    let hidden: Vec<&str> = layout.hidden_fields.iter().map(|bf| bf.name()).collect();
    let visible: Vec<&str> = layout.visible_fields.iter().map(|bf| bf.name()).collect();
    assert_eq!(hidden, ["hidden"]);
    assert_eq!(visible, ["name"]);
    assert!(layout.errors.is_empty());

    let name = tapeform.bound_field("name").unwrap();
    let field_ctx = tapeform.resolve_field_context(&name);
    assert_eq!(field_ctx.container_css_class.as_deref(), Some("box"));
    assert!(field_ctx.required);
    assert_eq!(field_ctx.errors, ["This field is required."]);
}

#[test]
fn test_render_default_layout() {
    let mut tapeform = boxed(signup_form());
    tapeform.bind([("hidden", "abc")].into_iter().collect());
    tapeform.full_clean();
    tapeform.add_error(None, "Try again.").unwrap();

    let html = tapeform.as_tapeform(&Engine::new()).unwrap();
    assert!(html.contains(r#"<li>Try again.</li>"#), "{html}");
    assert!(html.contains(r#"<input type="hidden" name="hidden" value="abc" id="id_hidden">"#), "{html}");
    assert!(html.contains(r#"<div class="box">"#), "{html}");
    assert!(html.contains(r#"<label for="id_name">Name <span class="required">*</span></label>"#), "{html}");
    assert!(html.contains("This field is required."), "{html}");
}

#[test]
fn test_invalid_styling_joins_existing_classes() {
    let form = Form::new("CssForm").with_field(Field::char("name").attr("class", "my-css"));
    let mut tapeform = Tapeform::builder(form)
        .configure(StyleConfig::new().with_widget_invalid_css_class("bad"))
        .build();
    tapeform.apply_widget_invalid_options("name").unwrap();
    tapeform.apply_widget_invalid_options("name").unwrap();

    let attrs = &tapeform.field("name").unwrap().bound_field().widget().attrs;
    assert_eq!(attrs.get("class").map(String::as_str), Some("my-css bad"));
    assert_eq!(attrs.get("aria-invalid").map(String::as_str), Some("true"));
}

// ── Skins ───────────────────────────────────────────────────────────

#[test]
fn test_bootstrap_renders_invalid_field() {
    let mut tapeform = Tapeform::builder(signup_form()).style(Bootstrap4Style::new()).build();
    tapeform.bind(FormData::new());
    assert!(!tapeform.is_valid());

    let html = form_tag(&Engine::new(), &tapeform, None).unwrap();
    assert!(html.contains(r#"<div class="form-group">"#), "{html}");
    assert!(html.contains(r#"class="form-control is-invalid""#), "{html}");
    assert!(html.contains(r#"<div class="invalid-feedback d-block">This field is required.</div>"#), "{html}");
}

#[test]
fn test_bootstrap_checkbox_label_follows_input() {
    let form = Form::new("TermsForm").with_field(Field::new("agree", FieldKind::BooleanField));
    let tapeform = Tapeform::builder(form).style(Bootstrap4Style::new()).build();
    let field = tapeform.field("agree").unwrap();

    let html = formfield_tag(&Engine::new(), &field, None).unwrap();
    assert!(html.starts_with(r#"<div class="form-group form-check">"#), "{html}");
    let input = html.find("<input").unwrap();
    let label = html.find("<label").unwrap();
    assert!(input < label, "{html}");
    assert!(html.contains(r#"class="form-check-input""#), "{html}");
}

#[test]
fn test_bulma_select_uses_widget_template() {
    let form = Form::new("PickForm").with_field(
        Field::new("color", FieldKind::ChoiceField).choices([("r", "Red"), ("g", "Green")]),
    );
    let tapeform = Tapeform::builder(form).style(BulmaStyle::new()).build();

    let html = tapeform.field("color").unwrap().render(&Engine::new(), None).unwrap();
    assert!(html.contains(r#"<div class="select">"#), "{html}");
    assert!(html.contains(r#"<option value="g">Green</option>"#), "{html}");
    assert!(tapeform.render_media().contains("bulma_fileinput.js"));
}

#[test]
fn test_foundation_wraps_radio_in_fieldset() {
    let form = Form::new("SizeForm").with_field(
        Field::new("size", FieldKind::ChoiceField)
            .choices([("s", "Small"), ("l", "Large")])
            .widget(WidgetType::RadioSelect),
    );
    let tapeform = Tapeform::builder(form).style(FoundationStyle::new()).build();

    let rendered = render_each_field(&tapeform, &Engine::new()).unwrap();
    let (name, html) = &rendered[0];
    assert_eq!(name, "size");
    assert!(html.starts_with(r#"<fieldset class="fieldset form-field">"#), "{html}");
    assert!(html.contains(r#"<label for="id_size_1">Large</label>"#), "{html}");
}

// ── Fieldsets ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FormLayout {
    style: StyleConfig,
    fieldsets: Vec<FieldsetSpec>,
}

#[test]
fn test_fieldsets_from_toml() {
    let layout: FormLayout = toml::from_str(
        r#"
        [style]
        field_container_css_class = "cell"

        [[fieldsets]]
        fields = ["first", ["city", "zip"]]
        extra = { title = "Where", css_class = "wide" }

        [[fieldsets]]
        exclude = ["first", "city", "zip"]
        primary = true
        "#,
    )
    .unwrap();

    let form = Form::new("AddressForm").with_fields([
        Field::char("token").widget(WidgetType::HiddenInput).required(false),
        Field::char("first"),
        Field::char("city"),
        Field::char("zip"),
        Field::char("notes").required(false),
    ]);
    let tapeform = Tapeform::builder(form)
        .configure(layout.style)
        .fieldsets(layout.fieldsets)
        .build();

    let fieldsets = tapeform.fieldsets().unwrap();
    assert_eq!(fieldsets.len(), 2);
    assert!(!fieldsets[0].is_primary());
    assert!(fieldsets[1].is_primary());

    let engine = Engine::new();
    let first = fieldsets[0].as_tapeform(&engine).unwrap();
    assert!(first.starts_with(r#"<fieldset class="wide">"#), "{first}");
    assert!(first.contains("<legend>Where</legend>"), "{first}");
    assert!(first.contains(r#"<div class="row"><div class="column"><div class="cell">"#), "{first}");
    assert!(!first.contains(r#"name="token""#), "{first}");

    let second = form_tag(&engine, &fieldsets[1], None).unwrap();
    assert!(second.contains(r#"name="token""#), "{second}");
    assert!(second.contains(r#"name="notes""#), "{second}");
    assert!(!second.contains(r#"name="first""#), "{second}");
}

// ── Templates and configuration ─────────────────────────────────────

#[test]
fn test_user_template_dir_overrides_builtin() {
    let dir = tempfile::tempdir().unwrap();
    let fields_dir = dir.path().join("tapeforms").join("fields");
    fs::create_dir_all(&fields_dir).unwrap();
    fs::write(fields_dir.join("default.html"), "[{{ label }}|{{ container_css_class }}]").unwrap();

    let settings = Settings {
        template_dirs: vec![dir.path().to_path_buf()],
        ..Settings::default()
    };
    let engine = Engine::from_settings(&settings).unwrap();
    let tapeform = Tapeform::builder(signup_form()).settings(settings).build();

    let html = tapeform.field("name").unwrap().render(&engine, None).unwrap();
    assert_eq!(html, "[Name|form-field]");
}

#[test]
fn test_skin_by_name_from_config() {
    let style = tapeforms_render::skins::by_name("bootstrap5").unwrap();
    let form = Form::new("PickForm").with_field(
        Field::new("color", FieldKind::ChoiceField).choices([("r", "Red")]),
    );
    let tapeform = Tapeform::builder(form).boxed_style(style).build();

    let context = tapeform.to_context_value();
    assert_eq!(context.get("name").and_then(ContextValue::as_str), Some("PickForm"));
    let attrs = &tapeform.field("color").unwrap().bound_field().widget().attrs;
    assert_eq!(attrs.get("class").map(String::as_str), Some("form-select"));
}
