//! Built-in templates shipped with tapeforms.
//!
//! Every skin's layout, field, fieldset, and widget templates are registered
//! with the [`Engine`](crate::engine::Engine) under their `tapeforms/...`
//! names. Templates found in user template directories win over these.
//!
//! Field and layout templates expect the context produced by the resolvers
//! in `tapeforms-render`; widget templates expect a single `widget` variable.

/// Default form layout.
pub const LAYOUT_DEFAULT: &str = r#"{% if errors %}<div class="errors"><ul class="errorlist nonfield">{% for error in errors %}<li>{{ error }}</li>{% endfor %}</ul></div>{% endif %}
{% for field in hidden_fields %}{{ field.html | safe }}{% endfor %}
{% for field in visible_fields %}{{ field.rendered | safe }}
{% endfor %}"#;

/// Default field wrapper.
pub const FIELD_DEFAULT: &str = r#"<div{% if container_css_class %} class="{{ container_css_class }}"{% endif %}>
{% if label %}<label{% if field_id %} for="{{ field_id }}"{% endif %}{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ label }}{% if required %} <span class="required">*</span>{% endif %}</label>{% endif %}
{{ field.html | safe }}
{% if help_text %}<p class="help">{{ help_text | safe }}</p>{% endif %}
{% if errors %}<ul class="errorlist">{% for error in errors %}<li>{{ error }}</li>{% endfor %}</ul>{% endif %}
</div>"#;

/// Default fieldset layout. Multi-field rows are wrapped in column containers.
pub const FIELDSET_DEFAULT: &str = r#"<fieldset{% if form.extra.css_class %} class="{{ form.extra.css_class }}"{% endif %}>
{% if form.extra.title %}<legend>{{ form.extra.title }}</legend>{% endif %}
{% if errors %}<ul class="errorlist nonfield">{% for error in errors %}<li>{{ error }}</li>{% endfor %}</ul>{% endif %}
{% for field in hidden_fields %}{{ field.html | safe }}{% endfor %}
{% for row in rows %}{% if row | length > 1 %}<div class="row">{% for field in row %}<div class="column">{{ field.rendered | safe }}</div>{% endfor %}</div>{% else %}{% for field in row %}{{ field.rendered | safe }}{% endfor %}{% endif %}
{% endfor %}</fieldset>"#;

/// Bootstrap form layout.
pub const LAYOUT_BOOTSTRAP: &str = r#"{% if errors %}<div class="alert alert-danger" role="alert">{% for error in errors %}<p class="mb-0">{{ error }}</p>{% endfor %}</div>{% endif %}
{% for field in hidden_fields %}{{ field.html | safe }}{% endfor %}
{% for field in visible_fields %}{{ field.rendered | safe }}
{% endfor %}"#;

/// Bootstrap field wrapper. Checkboxes put the label after the input.
pub const FIELD_BOOTSTRAP: &str = r#"<div class="{{ container_css_class }}">
{% if widget_class_name == "checkboxinput" %}{{ field.html | safe }}
<label{% if field_id %} for="{{ field_id }}"{% endif %}{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ label }}</label>{% else %}<label{% if field_id %} for="{{ field_id }}"{% endif %}{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ label }}</label>
{{ field.html | safe }}{% endif %}
{% for error in errors %}<div class="invalid-feedback d-block">{{ error }}</div>{% endfor %}
{% if help_text %}<small class="form-text text-muted">{{ help_text | safe }}</small>{% endif %}
</div>"#;

/// Bootstrap fieldset layout.
pub const FIELDSET_BOOTSTRAP: &str = r#"<fieldset{% if form.extra.css_class %} class="{{ form.extra.css_class }}"{% endif %}>
{% if form.extra.title %}<legend>{{ form.extra.title }}</legend>{% endif %}
{% if errors %}<div class="alert alert-danger" role="alert">{% for error in errors %}<p class="mb-0">{{ error }}</p>{% endfor %}</div>{% endif %}
{% for field in hidden_fields %}{{ field.html | safe }}{% endfor %}
{% for row in rows %}{% if row | length > 1 %}<div class="row">{% for field in row %}<div class="col">{{ field.rendered | safe }}</div>{% endfor %}</div>{% else %}{% for field in row %}{{ field.rendered | safe }}{% endfor %}{% endif %}
{% endfor %}</fieldset>"#;

/// Bulma field wrapper.
pub const FIELD_BULMA: &str = r#"<div class="{{ container_css_class }}">
{% if widget_class_name == "checkboxinput" %}<div class="control"><label{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ field.html | safe }} {{ label }}</label></div>{% else %}<label{% if field_id %} for="{{ field_id }}"{% endif %}{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ label }}</label>
<div class="control">{{ field.html | safe }}</div>{% endif %}
{% for error in errors %}<p class="help is-danger">{{ error }}</p>{% endfor %}
{% if help_text %}<p class="help">{{ help_text | safe }}</p>{% endif %}
</div>"#;

/// Foundation form layout.
pub const LAYOUT_FOUNDATION: &str = r#"{% if errors %}<div class="callout alert">{% for error in errors %}<p>{{ error }}</p>{% endfor %}</div>{% endif %}
{% for field in hidden_fields %}{{ field.html | safe }}{% endfor %}
{% for field in visible_fields %}{{ field.rendered | safe }}
{% endfor %}"#;

/// Foundation field wrapper.
pub const FIELD_FOUNDATION: &str = r#"<div{% if container_css_class %} class="{{ container_css_class }}"{% endif %}>
<label{% if field_id %} for="{{ field_id }}"{% endif %}{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ label }}
{{ field.html | safe }}</label>
{% for error in errors %}<span class="form-error is-visible">{{ error }}</span>{% endfor %}
{% if help_text %}<p class="help-text">{{ help_text | safe }}</p>{% endif %}
</div>"#;

/// Foundation wrapper for widgets rendering several inputs.
pub const FIELD_FOUNDATION_FIELDSET: &str = r#"<fieldset class="fieldset{% if container_css_class %} {{ container_css_class }}{% endif %}">
<legend{% if label_css_class %} class="{{ label_css_class }}"{% endif %}>{{ label }}</legend>
{{ field.html | safe }}
{% for error in errors %}<span class="form-error is-visible">{{ error }}</span>{% endfor %}
{% if help_text %}<p class="help-text">{{ help_text | safe }}</p>{% endif %}
</fieldset>"#;

/// Bootstrap 4 composite widget (date and time parts side by side).
pub const WIDGET_BOOTSTRAP_MULTIWIDGET: &str = r#"<div class="form-row">{% for subwidget in widget.subwidgets %}<div class="col">{{ subwidget.html | safe }}</div>{% endfor %}</div>"#;

/// Bootstrap 5 composite widget.
pub const WIDGET_BOOTSTRAP5_MULTIWIDGET: &str = r#"<div class="row g-2">{% for subwidget in widget.subwidgets %}<div class="col">{{ subwidget.html | safe }}</div>{% endfor %}</div>"#;

/// Bootstrap radio and checkbox lists.
pub const WIDGET_BOOTSTRAP_MULTIPLEINPUT: &str = r#"{% for option in widget.options %}<div class="form-check">
<input type="{{ widget.input_type }}" name="{{ widget.name }}" value="{{ option.value }}" id="{{ option.id }}"{% if widget.attrs.class %} class="{{ widget.attrs.class }}"{% endif %}{% if option.selected %} checked{% endif %}>
<label class="form-check-label" for="{{ option.id }}">{{ option.label }}</label>
</div>{% endfor %}"#;

/// Foundation radio and checkbox lists.
pub const WIDGET_FOUNDATION_MULTIPLEINPUT: &str = r#"{% for option in widget.options %}<input type="{{ widget.input_type }}" name="{{ widget.name }}" value="{{ option.value }}" id="{{ option.id }}"{% if widget.attrs.class %} class="{{ widget.attrs.class }}"{% endif %}{% if option.selected %} checked{% endif %}><label for="{{ option.id }}">{{ option.label }}</label>
{% endfor %}"#;

/// Bulma file input.
pub const WIDGET_BULMA_FILE: &str = r#"<div class="file"><label class="file-label">
<input type="file" name="{{ widget.name }}"{{ widget.attrs_html | safe }}>
<span class="file-cta"><span class="file-label">Choose a file…</span></span>
<span class="file-name"></span>
</label></div>"#;

/// Bulma clearable file input.
pub const WIDGET_BULMA_CLEARABLE_FILE: &str = r#"<div class="file"><label class="file-label">
<input type="file" name="{{ widget.name }}"{{ widget.attrs_html | safe }}>
<span class="file-cta"><span class="file-label">Choose a file…</span></span>
<span class="file-name">{% if widget.value %}{{ widget.value }}{% endif %}</span>
</label></div>{% if widget.value and not widget.required %}
<label class="checkbox"><input type="checkbox" name="{{ widget.name }}-clear" id="{{ widget.name }}-clear_id"> Clear</label>{% endif %}"#;

/// Bulma radio list.
pub const WIDGET_BULMA_RADIO: &str = r#"<div class="control">{% for option in widget.options %}<label class="radio">
<input type="radio" name="{{ widget.name }}" value="{{ option.value }}" id="{{ option.id }}"{% if option.selected %} checked{% endif %}> {{ option.label }}
</label>{% endfor %}</div>"#;

/// Bulma select wrapper (single and multiple).
pub const WIDGET_BULMA_SELECT: &str = r#"<div class="select{% if widget.multiple %} is-multiple{% endif %}">
<select name="{{ widget.name }}"{{ widget.attrs_html | safe }}{% if widget.multiple %} multiple{% endif %}>
{% for option in widget.options %}<option value="{{ option.value }}"{% if option.selected %} selected{% endif %}>{{ option.label }}</option>
{% endfor %}</select>
</div>"#;

/// All built-in templates as `(name, source)` pairs.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("tapeforms/layouts/default.html", LAYOUT_DEFAULT),
    ("tapeforms/fields/default.html", FIELD_DEFAULT),
    ("tapeforms/fieldsets/default.html", FIELDSET_DEFAULT),
    ("tapeforms/layouts/bootstrap.html", LAYOUT_BOOTSTRAP),
    ("tapeforms/fields/bootstrap.html", FIELD_BOOTSTRAP),
    ("tapeforms/fieldsets/bootstrap.html", FIELDSET_BOOTSTRAP),
    ("tapeforms/fields/bulma.html", FIELD_BULMA),
    ("tapeforms/layouts/foundation.html", LAYOUT_FOUNDATION),
    ("tapeforms/fields/foundation.html", FIELD_FOUNDATION),
    ("tapeforms/fields/foundation_fieldset.html", FIELD_FOUNDATION_FIELDSET),
    ("tapeforms/widgets/bootstrap_multiwidget.html", WIDGET_BOOTSTRAP_MULTIWIDGET),
    ("tapeforms/widgets/bootstrap5_multiwidget.html", WIDGET_BOOTSTRAP5_MULTIWIDGET),
    ("tapeforms/widgets/bootstrap_multipleinput.html", WIDGET_BOOTSTRAP_MULTIPLEINPUT),
    ("tapeforms/widgets/foundation_multipleinput.html", WIDGET_FOUNDATION_MULTIPLEINPUT),
    ("tapeforms/widgets/bulma/file.html", WIDGET_BULMA_FILE),
    ("tapeforms/widgets/bulma/clearable_file_input.html", WIDGET_BULMA_CLEARABLE_FILE),
    ("tapeforms/widgets/bulma/radio.html", WIDGET_BULMA_RADIO),
    ("tapeforms/widgets/bulma/select.html", WIDGET_BULMA_SELECT),
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_template_names_are_unique() {
        let names: HashSet<&str> = TEMPLATES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), TEMPLATES.len());
    }

    #[test]
    fn test_all_templates_live_under_namespace() {
        assert!(TEMPLATES
            .iter()
            .all(|(name, _)| name.starts_with("tapeforms/") && name.ends_with(".html")));
    }

    #[test]
    fn test_all_templates_parse() {
        let mut tera = tera::Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied()).unwrap();
    }
}
