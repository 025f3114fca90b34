//! Form field definitions and type-level validation.
//!
//! A [`Field`] describes a single form field: its [`FieldKind`], constraints,
//! label, help text, and the [`Widget`] it renders with. [`Field::clean`]
//! performs type coercion and the built-in checks for its kind.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::data::CleanedValue;
use crate::widgets::{Widget, WidgetType};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid regex")
});

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("valid regex"));

/// Runtime type identity of a form field.
///
/// Serialized by class name (`"CharField"`, `"DateField"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldKind {
    /// Free text.
    CharField,
    /// Whole number.
    IntegerField,
    /// Floating point number.
    FloatField,
    /// Checkbox.
    BooleanField,
    /// Calendar date.
    DateField,
    /// Time of day.
    TimeField,
    /// Date and time in one input.
    DateTimeField,
    /// Date and time in two inputs.
    SplitDateTimeField,
    /// Email address.
    EmailField,
    /// URL.
    UrlField,
    /// One of a set of choices.
    ChoiceField,
    /// Several of a set of choices.
    MultipleChoiceField,
    /// File upload.
    FileField,
}

impl FieldKind {
    /// Every field kind, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::CharField,
        Self::IntegerField,
        Self::FloatField,
        Self::BooleanField,
        Self::DateField,
        Self::TimeField,
        Self::DateTimeField,
        Self::SplitDateTimeField,
        Self::EmailField,
        Self::UrlField,
        Self::ChoiceField,
        Self::MultipleChoiceField,
        Self::FileField,
    ];

    /// The display name of the field class.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::CharField => "CharField",
            Self::IntegerField => "IntegerField",
            Self::FloatField => "FloatField",
            Self::BooleanField => "BooleanField",
            Self::DateField => "DateField",
            Self::TimeField => "TimeField",
            Self::DateTimeField => "DateTimeField",
            Self::SplitDateTimeField => "SplitDateTimeField",
            Self::EmailField => "EmailField",
            Self::UrlField => "URLField",
            Self::ChoiceField => "ChoiceField",
            Self::MultipleChoiceField => "MultipleChoiceField",
            Self::FileField => "FileField",
        }
    }

    /// The widget a field of this kind uses unless told otherwise.
    pub const fn default_widget(self) -> WidgetType {
        match self {
            Self::CharField => WidgetType::TextInput,
            Self::IntegerField | Self::FloatField => WidgetType::NumberInput,
            Self::BooleanField => WidgetType::CheckboxInput,
            Self::DateField => WidgetType::DateInput,
            Self::TimeField => WidgetType::TimeInput,
            Self::DateTimeField => WidgetType::DateTimeInput,
            Self::SplitDateTimeField => WidgetType::SplitDateTimeWidget,
            Self::EmailField => WidgetType::EmailInput,
            Self::UrlField => WidgetType::UrlInput,
            Self::ChoiceField => WidgetType::Select,
            Self::MultipleChoiceField => WidgetType::SelectMultiple,
            Self::FileField => WidgetType::ClearableFileInput,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.class_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field kind '{s}'"))
    }
}

impl TryFrom<String> for FieldKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldKind> for String {
    fn from(value: FieldKind) -> Self {
        value.class_name().to_string()
    }
}

/// Complete definition of a form field.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field name.
    pub name: String,
    /// Runtime type identity.
    pub kind: FieldKind,
    /// Whether a value must be submitted.
    pub required: bool,
    /// Explicit label; the pretty-printed name is used when absent.
    pub label: Option<String>,
    /// Help text shown next to the field (may contain HTML).
    pub help_text: String,
    /// Initial raw value for unbound forms.
    pub initial: Option<String>,
    /// Disabled fields render but ignore submitted data.
    pub disabled: bool,
    /// The widget the field renders with.
    pub widget: Widget,
    /// Available choices for choice fields.
    pub choices: Vec<(String, String)>,
    /// Minimum text length.
    pub min_length: Option<usize>,
    /// Maximum text length.
    pub max_length: Option<usize>,
    /// Minimum numeric value.
    pub min_value: Option<f64>,
    /// Maximum numeric value.
    pub max_value: Option<f64>,
    /// Custom error messages keyed by code (`required`, `invalid`, ...).
    pub error_messages: HashMap<String, String>,
}

impl Field {
    /// Creates a required field of `kind` with its default widget.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            label: None,
            help_text: String::new(),
            initial: None,
            disabled: false,
            widget: Widget::new(kind.default_widget()),
            choices: Vec::new(),
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            error_messages: HashMap::new(),
        }
    }

    /// Shorthand for a `CharField`.
    pub fn char(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::CharField)
    }

    /// Sets whether this field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// Sets the initial value.
    #[must_use]
    pub fn initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }

    /// Sets whether this field is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Replaces the widget with a fresh one of `widget_type`, keeping choices.
    #[must_use]
    pub fn widget(mut self, widget_type: WidgetType) -> Self {
        let mut widget = Widget::new(widget_type);
        if !self.choices.is_empty() {
            widget.choices.clone_from(&self.choices);
        }
        self.widget = widget;
        self
    }

    /// Replaces the widget.
    #[must_use]
    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widget = widget;
        self
    }

    /// Sets an HTML attribute on the widget.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.widget.attrs.insert(key.into(), value.into());
        self
    }

    /// Sets the choices on the field and its widget.
    #[must_use]
    pub fn choices<K: Into<String>, V: Into<String>>(
        mut self,
        choices: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.choices = choices
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.widget.choices.clone_from(&self.choices);
        self
    }

    /// Sets the minimum text length.
    #[must_use]
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Sets the maximum text length.
    #[must_use]
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Sets the minimum numeric value.
    #[must_use]
    pub fn min_value(mut self, n: f64) -> Self {
        self.min_value = Some(n);
        self
    }

    /// Sets the maximum numeric value.
    #[must_use]
    pub fn max_value(mut self, n: f64) -> Self {
        self.max_value = Some(n);
        self
    }

    /// Sets a custom error message for a given code.
    #[must_use]
    pub fn error_message(mut self, code: impl Into<String>, msg: impl Into<String>) -> Self {
        self.error_messages.insert(code.into(), msg.into());
        self
    }

    fn message(&self, code: &str, default: &str) -> String {
        self.error_messages
            .get(code)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    /// Cleans (validates and coerces) a raw submitted string.
    ///
    /// Errors accumulate; all messages for this field are returned at once.
    pub fn clean(&self, raw: Option<&str>) -> Result<CleanedValue, Vec<String>> {
        let raw_str = raw.map_or("", str::trim);

        if raw_str.is_empty() {
            if self.required {
                return Err(vec![self.message("required", "This field is required.")]);
            }
            return Ok(match self.kind {
                FieldKind::BooleanField => CleanedValue::Bool(false),
                FieldKind::MultipleChoiceField => CleanedValue::List(Vec::new()),
                _ => CleanedValue::Null,
            });
        }

        let mut errors = Vec::new();
        let value = match self.kind {
            FieldKind::CharField => {
                let len = raw_str.chars().count();
                if let Some(min) = self.min_length {
                    if len < min {
                        errors.push(format!(
                            "Ensure this value has at least {min} characters (it has {len})."
                        ));
                    }
                }
                if let Some(max) = self.max_length {
                    if len > max {
                        errors.push(format!(
                            "Ensure this value has at most {max} characters (it has {len})."
                        ));
                    }
                }
                CleanedValue::String(raw_str.to_string())
            }

            FieldKind::IntegerField => match raw_str.parse::<i64>() {
                Ok(n) => {
                    #[allow(clippy::cast_precision_loss)]
                    self.check_range(n as f64, &mut errors);
                    CleanedValue::Int(n)
                }
                Err(_) => {
                    errors.push(self.message("invalid", "Enter a whole number."));
                    CleanedValue::Null
                }
            },

            FieldKind::FloatField => match raw_str.parse::<f64>() {
                Ok(n) if n.is_finite() => {
                    self.check_range(n, &mut errors);
                    CleanedValue::Float(n)
                }
                _ => {
                    errors.push(self.message("invalid", "Enter a number."));
                    CleanedValue::Null
                }
            },

            FieldKind::BooleanField => {
                let val = !matches!(raw_str.to_lowercase().as_str(), "false" | "0" | "off" | "no");
                if self.required && !val {
                    errors.push(self.message("required", "This field is required."));
                }
                CleanedValue::Bool(val)
            }

            FieldKind::DateField => match chrono::NaiveDate::parse_from_str(raw_str, "%Y-%m-%d") {
                Ok(d) => CleanedValue::Date(d),
                Err(_) => {
                    errors.push(self.message("invalid", "Enter a valid date."));
                    CleanedValue::Null
                }
            },

            FieldKind::TimeField => match parse_time(raw_str) {
                Some(t) => CleanedValue::Time(t),
                None => {
                    errors.push(self.message("invalid", "Enter a valid time."));
                    CleanedValue::Null
                }
            },

            FieldKind::DateTimeField | FieldKind::SplitDateTimeField => {
                match parse_datetime(raw_str) {
                    Some(dt) => CleanedValue::DateTime(dt),
                    None => {
                        errors.push(self.message("invalid", "Enter a valid date/time."));
                        CleanedValue::Null
                    }
                }
            }

            FieldKind::EmailField => {
                if !EMAIL_RE.is_match(raw_str) {
                    errors.push(self.message("invalid", "Enter a valid email address."));
                }
                CleanedValue::String(raw_str.to_string())
            }

            FieldKind::UrlField => {
                if !URL_RE.is_match(raw_str) {
                    errors.push(self.message("invalid", "Enter a valid URL."));
                }
                CleanedValue::String(raw_str.to_string())
            }

            FieldKind::ChoiceField => {
                if !self.choices.iter().any(|(v, _)| v == raw_str) {
                    errors.push(format!(
                        "Select a valid choice. {raw_str} is not one of the available choices."
                    ));
                }
                CleanedValue::String(raw_str.to_string())
            }

            FieldKind::MultipleChoiceField => {
                let mut selected = Vec::new();
                for s in raw_str.split(',').map(str::trim) {
                    if self.choices.iter().any(|(v, _)| v == s) {
                        selected.push(CleanedValue::String(s.to_string()));
                    } else {
                        errors.push(format!(
                            "Select a valid choice. {s} is not one of the available choices."
                        ));
                    }
                }
                CleanedValue::List(selected)
            }

            FieldKind::FileField => CleanedValue::String(raw_str.to_string()),
        };

        if errors.is_empty() {
            Ok(value)
        } else {
            Err(errors)
        }
    }

    fn check_range(&self, n: f64, errors: &mut Vec<String>) {
        if let Some(min) = self.min_value {
            if n < min {
                errors.push(format!("Ensure this value is greater than or equal to {min}."));
            }
        }
        if let Some(max) = self.max_value {
            if n > max {
                errors.push(format!("Ensure this value is less than or equal to {max}."));
            }
        }
    }
}

fn parse_time(s: &str) -> Option<chrono::NaiveTime> {
    chrono::NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| chrono::NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn parse_datetime(s: &str) -> Option<chrono::NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
}
