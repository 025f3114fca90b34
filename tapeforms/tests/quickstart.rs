//! The facade prelude used the way an application would.

use tapeforms::core::settings_loader;
use tapeforms::prelude::*;

#[test]
fn test_settings_drive_default_templates() {
    let settings = settings_loader::from_toml_str(
        r#"
        layout_default_template = "site/layout.html"
        static_url = "/assets/"
        "#,
    )
    .unwrap();
    setup_logging(&settings);

    let engine = Engine::new();
    engine
        .add_raw_template("site/layout.html", "{% for f in visible_fields %}{{ f.name }};{% endfor %}")
        .unwrap();

    let form = Form::new("ProfileForm").with_fields([Field::char("first"), Field::char("last")]);
    let tapeform = Tapeform::builder(form).settings(settings).build();
    assert_eq!(tapeform.as_tapeform(&engine).unwrap(), "first;last;");
}

#[test]
fn test_tags_reject_plain_values() {
    let engine = Engine::new();
    let err = form_tag(&engine, &ContextValue::Bool(true), None).unwrap_err();
    assert!(matches!(err, TapeformsError::TemplateSyntaxError(_)));
    assert_eq!(join_css_class(Some("a b"), &[Some("b"), Some("c")]), "a b c");
}
