//! Widget system for rendering HTML form elements.
//!
//! A [`Widget`] is the input behind a form field. Unlike a closed set of
//! widget structs, every widget here is one value carrying its
//! [`WidgetType`] plus the mutable slots a renderer may write into: the
//! `attrs` map, a `template_name` override, and an `input_type`. Composite
//! widgets (split date/time, select-date) own a fixed list of sub-widgets.
//!
//! Widgets render themselves to HTML directly. When a `template_name` is set,
//! [`BoundField::as_widget`](crate::bound_field::BoundField::as_widget)
//! renders [`Widget::get_context`] through a template instead.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tapeforms_template::context::{escape_html, ContextValue};

use crate::data::FormData;

/// Runtime type identity of a widget.
///
/// Serialized by class name (`"TextInput"`, `"RadioSelect"`, ...), so the
/// variants can key override tables loaded from TOML or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WidgetType {
    /// `<input type="text">`.
    TextInput,
    /// `<input type="number">`.
    NumberInput,
    /// `<input type="email">`.
    EmailInput,
    /// `<input type="url">`.
    UrlInput,
    /// `<input type="password">`.
    PasswordInput,
    /// `<input type="hidden">`.
    HiddenInput,
    /// `<textarea>`.
    Textarea,
    /// `<input type="checkbox">`.
    CheckboxInput,
    /// `<select>`.
    Select,
    /// `<select>` with unknown/yes/no options.
    NullBooleanSelect,
    /// `<select multiple>`.
    SelectMultiple,
    /// A set of `<input type="radio">` elements.
    RadioSelect,
    /// A set of `<input type="checkbox">` elements.
    CheckboxSelectMultiple,
    /// A date text input.
    DateInput,
    /// A date and time text input.
    DateTimeInput,
    /// A time text input.
    TimeInput,
    /// `<input type="file">`.
    FileInput,
    /// `<input type="file">` with a clear checkbox.
    ClearableFileInput,
    /// A date input and a time input side by side.
    SplitDateTimeWidget,
    /// Three selects for year, month, and day.
    SelectDateWidget,
}

impl WidgetType {
    /// Every widget type, in declaration order.
    pub const ALL: [Self; 20] = [
        Self::TextInput,
        Self::NumberInput,
        Self::EmailInput,
        Self::UrlInput,
        Self::PasswordInput,
        Self::HiddenInput,
        Self::Textarea,
        Self::CheckboxInput,
        Self::Select,
        Self::NullBooleanSelect,
        Self::SelectMultiple,
        Self::RadioSelect,
        Self::CheckboxSelectMultiple,
        Self::DateInput,
        Self::DateTimeInput,
        Self::TimeInput,
        Self::FileInput,
        Self::ClearableFileInput,
        Self::SplitDateTimeWidget,
        Self::SelectDateWidget,
    ];

    /// The display name of the widget class, e.g. `"TextInput"`.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::TextInput => "TextInput",
            Self::NumberInput => "NumberInput",
            Self::EmailInput => "EmailInput",
            Self::UrlInput => "URLInput",
            Self::PasswordInput => "PasswordInput",
            Self::HiddenInput => "HiddenInput",
            Self::Textarea => "Textarea",
            Self::CheckboxInput => "CheckboxInput",
            Self::Select => "Select",
            Self::NullBooleanSelect => "NullBooleanSelect",
            Self::SelectMultiple => "SelectMultiple",
            Self::RadioSelect => "RadioSelect",
            Self::CheckboxSelectMultiple => "CheckboxSelectMultiple",
            Self::DateInput => "DateInput",
            Self::DateTimeInput => "DateTimeInput",
            Self::TimeInput => "TimeInput",
            Self::FileInput => "FileInput",
            Self::ClearableFileInput => "ClearableFileInput",
            Self::SplitDateTimeWidget => "SplitDateTimeWidget",
            Self::SelectDateWidget => "SelectDateWidget",
        }
    }

    /// Lower-cased class name, e.g. `"textinput"`.
    pub fn tag(self) -> String {
        self.class_name().to_lowercase()
    }

    /// The `type` attribute the widget renders with before any adjustment.
    ///
    /// Date and time inputs default to plain `text`.
    pub const fn default_input_type(self) -> Option<&'static str> {
        match self {
            Self::TextInput | Self::DateInput | Self::DateTimeInput | Self::TimeInput => {
                Some("text")
            }
            Self::NumberInput => Some("number"),
            Self::EmailInput => Some("email"),
            Self::UrlInput => Some("url"),
            Self::PasswordInput => Some("password"),
            Self::HiddenInput => Some("hidden"),
            Self::CheckboxInput | Self::CheckboxSelectMultiple => Some("checkbox"),
            Self::RadioSelect => Some("radio"),
            Self::FileInput | Self::ClearableFileInput => Some("file"),
            Self::Textarea
            | Self::Select
            | Self::NullBooleanSelect
            | Self::SelectMultiple
            | Self::SplitDateTimeWidget
            | Self::SelectDateWidget => None,
        }
    }

    /// Widgets rendered as a single `<input>` element.
    pub const fn is_input(self) -> bool {
        matches!(
            self,
            Self::TextInput
                | Self::NumberInput
                | Self::EmailInput
                | Self::UrlInput
                | Self::PasswordInput
                | Self::HiddenInput
                | Self::CheckboxInput
                | Self::DateInput
                | Self::DateTimeInput
                | Self::TimeInput
                | Self::FileInput
                | Self::ClearableFileInput
        )
    }

    /// File upload widgets.
    pub const fn is_file_input(self) -> bool {
        matches!(self, Self::FileInput | Self::ClearableFileInput)
    }

    /// The `<select>` family.
    pub const fn is_select(self) -> bool {
        matches!(
            self,
            Self::Select | Self::NullBooleanSelect | Self::SelectMultiple
        )
    }

    /// A single checkbox.
    pub const fn is_checkbox(self) -> bool {
        matches!(self, Self::CheckboxInput)
    }

    /// Widgets rendering one input per choice.
    pub const fn is_multiple_input(self) -> bool {
        matches!(self, Self::RadioSelect | Self::CheckboxSelectMultiple)
    }

    /// Widgets made of sub-widgets.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::SplitDateTimeWidget | Self::SelectDateWidget)
    }

    /// Hidden inputs.
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::HiddenInput)
    }

    /// Widgets that submit several values under one name.
    pub const fn allows_multiple_values(self) -> bool {
        matches!(self, Self::SelectMultiple | Self::CheckboxSelectMultiple)
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for WidgetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.class_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown widget type '{s}'"))
    }
}

impl TryFrom<String> for WidgetType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WidgetType> for String {
    fn from(value: WidgetType) -> Self {
        value.class_name().to_string()
    }
}

/// One rendered choice of a select or multiple-input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetOption {
    /// Submitted value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// DOM id (empty without an id on the widget).
    pub id: String,
    /// Whether the option is currently selected.
    pub selected: bool,
}

/// A widget instance owned by a form field.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    /// Runtime type identity.
    pub widget_type: WidgetType,
    /// Free-form HTML attributes, including `class` and `id`.
    pub attrs: BTreeMap<String, String>,
    /// Template used instead of the built-in HTML when set.
    pub template_name: Option<String>,
    /// The `type` attribute for input widgets.
    pub input_type: Option<String>,
    /// Choices for select and multiple-input widgets.
    pub choices: Vec<(String, String)>,
    /// Fixed sub-widgets of composite widgets.
    pub subwidgets: Vec<Widget>,
}

impl Widget {
    /// Creates a widget of the given type with its default slots.
    pub fn new(widget_type: WidgetType) -> Self {
        let subwidgets = match widget_type {
            WidgetType::SplitDateTimeWidget => vec![
                Self::new(WidgetType::DateInput),
                Self::new(WidgetType::TimeInput),
            ],
            WidgetType::SelectDateWidget => select_date_parts(),
            _ => Vec::new(),
        };
        let choices = if widget_type == WidgetType::NullBooleanSelect {
            vec![
                ("unknown".to_string(), "Unknown".to_string()),
                ("true".to_string(), "Yes".to_string()),
                ("false".to_string(), "No".to_string()),
            ]
        } else {
            Vec::new()
        };

        Self {
            widget_type,
            attrs: BTreeMap::new(),
            template_name: None,
            input_type: widget_type.default_input_type().map(String::from),
            choices,
            subwidgets,
        }
    }

    /// Sets an HTML attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Sets the choices.
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
        self.choices = choices;
        self
    }

    /// Returns `true` for hidden inputs.
    pub const fn is_hidden(&self) -> bool {
        self.widget_type.is_hidden()
    }

    /// Formats a DOM id into the id a `<label for>` should point at.
    ///
    /// Composite and multiple-input widgets point at their first input.
    pub fn id_for_label(&self, id: &str) -> String {
        if id.is_empty() {
            return String::new();
        }
        if self.widget_type.is_composite() || self.widget_type.is_multiple_input() {
            format!("{id}_0")
        } else {
            id.to_string()
        }
    }

    /// Extracts the raw submitted value for `name`.
    pub fn value_from_data(&self, data: &FormData, name: &str) -> Option<String> {
        match self.widget_type {
            WidgetType::SplitDateTimeWidget => {
                let date = data.get(&format!("{name}_0"))?;
                let time = data.get(&format!("{name}_1")).unwrap_or("");
                Some(format!("{date} {time}").trim().to_string())
            }
            WidgetType::SelectDateWidget => {
                let parts: Option<Vec<&str>> = SELECT_DATE_PARTS
                    .iter()
                    .map(|part| data.get(&format!("{name}_{part}")))
                    .collect();
                parts.map(|p| p.join("-"))
            }
            WidgetType::ClearableFileInput if data.contains_key(&format!("{name}-clear")) => {
                Some(String::new())
            }
            t if t.allows_multiple_values() => data.get_list(name).map(|vals| vals.join(",")),
            _ => data.get(name).map(String::from),
        }
    }

    /// Renders the widget as HTML.
    ///
    /// `attrs` are the final attributes (the widget's own merged with the
    /// bound field's id and flags); `self.attrs` is not consulted.
    pub fn render(&self, name: &str, value: Option<&str>, attrs: &BTreeMap<String, String>) -> String {
        let val = value.unwrap_or("");
        match self.widget_type {
            WidgetType::Textarea => format!(
                r#"<textarea name="{}"{}>{}</textarea>"#,
                escape_html(name),
                render_attrs(attrs),
                escape_html(val)
            ),
            WidgetType::CheckboxInput => {
                let checked = matches!(val, "true" | "on" | "1");
                format!(
                    r#"<input type="{}" name="{}"{}{}>"#,
                    self.input_type.as_deref().unwrap_or("checkbox"),
                    escape_html(name),
                    if checked { " checked" } else { "" },
                    render_attrs(attrs)
                )
            }
            WidgetType::Select | WidgetType::NullBooleanSelect | WidgetType::SelectMultiple => {
                let multiple = if self.widget_type.allows_multiple_values() {
                    " multiple"
                } else {
                    ""
                };
                let options: String = self
                    .options(value, attrs)
                    .iter()
                    .map(|o| {
                        format!(
                            r#"<option value="{}"{}>{}</option>"#,
                            escape_html(&o.value),
                            if o.selected { " selected" } else { "" },
                            escape_html(&o.label)
                        )
                    })
                    .collect();
                format!(
                    r#"<select name="{}"{}{multiple}>{options}</select>"#,
                    escape_html(name),
                    render_attrs(attrs)
                )
            }
            WidgetType::RadioSelect | WidgetType::CheckboxSelectMultiple => {
                let input_type = self.input_type.as_deref().unwrap_or("radio");
                let class = attrs
                    .get("class")
                    .map(|c| format!(r#" class="{}""#, escape_html(c)))
                    .unwrap_or_default();
                let mut html = String::from("<div>");
                for option in self.options(value, attrs) {
                    let id = if option.id.is_empty() {
                        String::new()
                    } else {
                        format!(r#" id="{}""#, escape_html(&option.id))
                    };
                    html.push_str(&format!(
                        r#"<div><label><input type="{input_type}" name="{}" value="{}"{id}{class}{}> {}</label></div>"#,
                        escape_html(name),
                        escape_html(&option.value),
                        if option.selected { " checked" } else { "" },
                        escape_html(&option.label)
                    ));
                }
                html.push_str("</div>");
                html
            }
            WidgetType::SplitDateTimeWidget | WidgetType::SelectDateWidget => self
                .subwidget_parts(name, value, attrs)
                .into_iter()
                .map(|(sub, sub_name, sub_value, sub_attrs)| {
                    sub.render(&sub_name, sub_value.as_deref(), &sub_attrs)
                })
                .collect(),
            _ => {
                let input_type = self.input_type.as_deref().unwrap_or("text");
                let shown = if self.widget_type == WidgetType::PasswordInput
                    || self.widget_type.is_file_input()
                    || val.is_empty()
                {
                    String::new()
                } else {
                    format!(r#" value="{}""#, escape_html(val))
                };
                format!(
                    r#"<input type="{}" name="{}"{shown}{}>"#,
                    escape_html(input_type),
                    escape_html(name),
                    render_attrs(attrs)
                )
            }
        }
    }

    /// Builds the template context for rendering this widget through a
    /// template. Templates see it as the `widget` variable.
    pub fn get_context(
        &self,
        name: &str,
        value: Option<&str>,
        attrs: &BTreeMap<String, String>,
    ) -> HashMap<String, ContextValue> {
        let mut ctx = HashMap::new();
        ctx.insert("name".to_string(), ContextValue::from(name));
        ctx.insert("value".to_string(), ContextValue::from(value));
        ctx.insert(
            "attrs".to_string(),
            ContextValue::Dict(
                attrs
                    .iter()
                    .map(|(k, v)| (k.clone(), ContextValue::from(v)))
                    .collect(),
            ),
        );
        ctx.insert("attrs_html".to_string(), ContextValue::safe(render_attrs(attrs)));
        ctx.insert("type".to_string(), ContextValue::from(self.widget_type.class_name()));
        ctx.insert("input_type".to_string(), ContextValue::from(self.input_type.clone()));
        ctx.insert("template_name".to_string(), ContextValue::from(self.template_name.clone()));
        ctx.insert("is_hidden".to_string(), ContextValue::Bool(self.is_hidden()));
        ctx.insert(
            "multiple".to_string(),
            ContextValue::Bool(self.widget_type.allows_multiple_values()),
        );

        let options = self
            .options(value, attrs)
            .into_iter()
            .map(|o| {
                let mut option = HashMap::new();
                option.insert("value".to_string(), ContextValue::from(o.value));
                option.insert("label".to_string(), ContextValue::from(o.label));
                option.insert("id".to_string(), ContextValue::from(o.id));
                option.insert("selected".to_string(), ContextValue::Bool(o.selected));
                ContextValue::Dict(option)
            })
            .collect();
        ctx.insert("options".to_string(), ContextValue::List(options));

        let subwidgets = self
            .subwidget_parts(name, value, attrs)
            .into_iter()
            .map(|(sub, sub_name, sub_value, sub_attrs)| {
                let html = sub.render(&sub_name, sub_value.as_deref(), &sub_attrs);
                let mut entry = sub.get_context(&sub_name, sub_value.as_deref(), &sub_attrs);
                entry.insert("html".to_string(), ContextValue::safe(html));
                ContextValue::Dict(entry)
            })
            .collect();
        ctx.insert("subwidgets".to_string(), ContextValue::List(subwidgets));
        ctx
    }

    /// The choices as options, with selection state and DOM ids.
    pub fn options(&self, value: Option<&str>, attrs: &BTreeMap<String, String>) -> Vec<WidgetOption> {
        let selected: Vec<&str> = match value {
            Some(v) if self.widget_type.allows_multiple_values() => v.split(',').collect(),
            Some(v) => vec![v],
            None => Vec::new(),
        };
        let id_base = attrs.get("id").map_or("", String::as_str);

        self.choices
            .iter()
            .enumerate()
            .map(|(i, (val, label))| WidgetOption {
                value: val.clone(),
                label: label.clone(),
                id: if id_base.is_empty() {
                    String::new()
                } else {
                    format!("{id_base}_{i}")
                },
                selected: selected.contains(&val.as_str()),
            })
            .collect()
    }

    /// Splits a composite widget into `(sub-widget, name, value, attrs)`.
    fn subwidget_parts(
        &self,
        name: &str,
        value: Option<&str>,
        attrs: &BTreeMap<String, String>,
    ) -> Vec<(&Self, String, Option<String>, BTreeMap<String, String>)> {
        let (suffixes, values): (Vec<String>, Vec<Option<String>>) = match self.widget_type {
            WidgetType::SplitDateTimeWidget => {
                let mut parts = value.unwrap_or("").splitn(2, ' ');
                (
                    vec!["0".to_string(), "1".to_string()],
                    vec![
                        parts.next().filter(|s| !s.is_empty()).map(String::from),
                        parts.next().filter(|s| !s.is_empty()).map(String::from),
                    ],
                )
            }
            WidgetType::SelectDateWidget => {
                let mut parts = value.unwrap_or("").splitn(3, '-');
                (
                    SELECT_DATE_PARTS.iter().map(|p| (*p).to_string()).collect(),
                    SELECT_DATE_PARTS
                        .iter()
                        .map(|_| {
                            parts
                                .next()
                                .filter(|s| !s.is_empty())
                                .map(|s| s.trim_start_matches('0').to_string())
                        })
                        .collect(),
                )
            }
            _ => return Vec::new(),
        };

        self.subwidgets
            .iter()
            .zip(suffixes)
            .zip(values)
            .enumerate()
            .map(|(i, ((sub, suffix), sub_value))| {
                let mut sub_attrs = sub.attrs.clone();
                sub_attrs.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
                if let Some(id) = attrs.get("id") {
                    sub_attrs.insert("id".to_string(), format!("{id}_{i}"));
                }
                (sub, format!("{name}_{suffix}"), sub_value, sub_attrs)
            })
            .collect()
    }
}

impl From<WidgetType> for Widget {
    fn from(widget_type: WidgetType) -> Self {
        Self::new(widget_type)
    }
}

const SELECT_DATE_PARTS: [&str; 3] = ["year", "month", "day"];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn select_date_parts() -> Vec<Widget> {
    let this_year = chrono::Local::now().year();
    let numbered = |range: std::ops::RangeInclusive<i32>| -> Vec<(String, String)> {
        range.map(|n| (n.to_string(), n.to_string())).collect()
    };
    let months = MONTHS
        .iter()
        .zip(1..)
        .map(|(label, n): (&&str, i32)| (n.to_string(), (*label).to_string()))
        .collect();

    vec![
        Widget::new(WidgetType::Select).with_choices(numbered(this_year..=this_year + 9)),
        Widget::new(WidgetType::Select).with_choices(months),
        Widget::new(WidgetType::Select).with_choices(numbered(1..=31)),
    ]
}

/// Formats an attribute map as ` key="value"` pairs. Empty values render as
/// bare boolean attributes.
pub fn render_attrs(attrs: &BTreeMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(k, v)| {
            if v.is_empty() {
                format!(" {}", escape_html(k))
            } else {
                format!(r#" {}="{}""#, escape_html(k), escape_html(v))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_widget_type_tag_and_parse() {
        assert_eq!(WidgetType::TextInput.tag(), "textinput");
        assert_eq!(WidgetType::UrlInput.tag(), "urlinput");
        assert_eq!("RadioSelect".parse::<WidgetType>(), Ok(WidgetType::RadioSelect));
        assert_eq!("radioselect".parse::<WidgetType>(), Ok(WidgetType::RadioSelect));
        assert!("Bogus".parse::<WidgetType>().is_err());
    }

    #[test]
    fn test_widget_type_families() {
        assert!(WidgetType::ClearableFileInput.is_file_input());
        assert!(WidgetType::ClearableFileInput.is_input());
        assert!(WidgetType::NullBooleanSelect.is_select());
        assert!(!WidgetType::RadioSelect.is_select());
        assert!(!WidgetType::Textarea.is_input());
        assert!(WidgetType::CheckboxSelectMultiple.is_multiple_input());
    }

    #[test]
    fn test_date_inputs_default_to_text() {
        assert_eq!(Widget::new(WidgetType::DateInput).input_type.as_deref(), Some("text"));
        assert_eq!(Widget::new(WidgetType::Select).input_type, None);
    }

    #[test]
    fn test_composite_widgets_have_subwidgets() {
        let split = Widget::new(WidgetType::SplitDateTimeWidget);
        assert_eq!(split.subwidgets.len(), 2);
        assert_eq!(split.subwidgets[0].widget_type, WidgetType::DateInput);
        assert_eq!(split.subwidgets[1].widget_type, WidgetType::TimeInput);

        let select_date = Widget::new(WidgetType::SelectDateWidget);
        assert_eq!(select_date.subwidgets.len(), 3);
        assert_eq!(select_date.subwidgets[1].choices.len(), 12);
    }

    #[test]
    fn test_id_for_label() {
        assert_eq!(Widget::new(WidgetType::TextInput).id_for_label("id_x"), "id_x");
        assert_eq!(Widget::new(WidgetType::RadioSelect).id_for_label("id_x"), "id_x_0");
        assert_eq!(Widget::new(WidgetType::SplitDateTimeWidget).id_for_label("id_x"), "id_x_0");
        assert_eq!(Widget::new(WidgetType::RadioSelect).id_for_label(""), "");
    }

    #[test]
    fn test_text_input_render() {
        let w = Widget::new(WidgetType::TextInput);
        let html = w.render("name", Some("Al <i>"), &attrs(&[("class", "form-control"), ("required", "")]));
        assert_eq!(
            html,
            r#"<input type="text" name="name" value="Al &lt;i&gt;" class="form-control" required>"#
        );
    }

    #[test]
    fn test_render_uses_input_type_slot() {
        let mut w = Widget::new(WidgetType::DateInput);
        w.input_type = Some("date".to_string());
        assert!(w.render("d", None, &BTreeMap::new()).contains(r#"type="date""#));
    }

    #[test]
    fn test_password_never_renders_value() {
        let w = Widget::new(WidgetType::PasswordInput);
        assert!(!w.render("pw", Some("secret"), &BTreeMap::new()).contains("secret"));
    }

    #[test]
    fn test_select_render() {
        let w = Widget::new(WidgetType::Select)
            .with_choices(vec![("m".into(), "Male".into()), ("f".into(), "Female".into())]);
        let html = w.render("gender", Some("f"), &BTreeMap::new());
        assert!(html.contains(r#"<option value="m">Male</option>"#));
        assert!(html.contains(r#"<option value="f" selected>Female</option>"#));
    }

    #[test]
    fn test_select_multiple_render() {
        let w = Widget::new(WidgetType::SelectMultiple).with_choices(vec![
            ("r".into(), "Red".into()),
            ("g".into(), "Green".into()),
            ("b".into(), "Blue".into()),
        ]);
        let html = w.render("colors", Some("r,b"), &BTreeMap::new());
        assert!(html.contains(" multiple>"));
        assert!(html.contains(r#"<option value="r" selected>Red</option>"#));
        assert!(html.contains(r#"<option value="g">Green</option>"#));
    }

    #[test]
    fn test_radio_render_ids_and_class() {
        let w = Widget::new(WidgetType::RadioSelect)
            .with_choices(vec![("1".into(), "One".into()), ("2".into(), "Two".into())]);
        let html = w.render("choice", Some("2"), &attrs(&[("id", "id_choice"), ("class", "c")]));
        assert!(html.contains(r#"id="id_choice_0" class="c">"#));
        assert!(html.contains(r#"value="2" id="id_choice_1" class="c" checked>"#));
    }

    #[test]
    fn test_split_datetime_render() {
        let mut w = Widget::new(WidgetType::SplitDateTimeWidget);
        w.subwidgets[0].input_type = Some("date".to_string());
        w.subwidgets[1].input_type = Some("time".to_string());
        let html = w.render("when", Some("2024-01-15 10:30"), &attrs(&[("id", "id_when")]));
        assert!(html.contains(r#"<input type="date" name="when_0" value="2024-01-15" id="id_when_0">"#));
        assert!(html.contains(r#"<input type="time" name="when_1" value="10:30" id="id_when_1">"#));
    }

    #[test]
    fn test_get_context_lists_options_and_subwidgets() {
        let w = Widget::new(WidgetType::CheckboxSelectMultiple)
            .with_choices(vec![("a".into(), "A".into()), ("b".into(), "B".into())]);
        let ctx = w.get_context("letters", Some("b"), &attrs(&[("id", "id_letters")]));
        let options = ctx["options"].as_list().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].get("selected"), Some(&ContextValue::Bool(true)));
        assert_eq!(options[0].get("id").and_then(ContextValue::as_str), Some("id_letters_0"));
        assert_eq!(ctx["multiple"], ContextValue::Bool(true));
        assert!(ctx["subwidgets"].as_list().unwrap().is_empty());

        let split = Widget::new(WidgetType::SplitDateTimeWidget);
        let ctx = split.get_context("when", None, &BTreeMap::new());
        assert_eq!(ctx["subwidgets"].as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_value_from_data() {
        let data: FormData = [
            ("name", "Alice"),
            ("tags", "a"),
            ("tags", "b"),
            ("when_0", "2024-01-15"),
            ("when_1", "10:30"),
            ("born_year", "2000"),
            ("born_month", "2"),
            ("born_day", "29"),
        ]
        .into_iter()
        .collect();

        let text = Widget::new(WidgetType::TextInput);
        assert_eq!(text.value_from_data(&data, "name").as_deref(), Some("Alice"));
        assert_eq!(text.value_from_data(&data, "missing"), None);

        let multi = Widget::new(WidgetType::SelectMultiple);
        assert_eq!(multi.value_from_data(&data, "tags").as_deref(), Some("a,b"));

        let split = Widget::new(WidgetType::SplitDateTimeWidget);
        assert_eq!(split.value_from_data(&data, "when").as_deref(), Some("2024-01-15 10:30"));

        let select_date = Widget::new(WidgetType::SelectDateWidget);
        assert_eq!(select_date.value_from_data(&data, "born").as_deref(), Some("2000-2-29"));
    }

    #[test]
    fn test_widget_type_serde_by_class_name() {
        let name: String = WidgetType::CheckboxInput.into();
        assert_eq!(name, "CheckboxInput");
        assert_eq!(WidgetType::try_from("Textarea".to_string()), Ok(WidgetType::Textarea));
    }
}
