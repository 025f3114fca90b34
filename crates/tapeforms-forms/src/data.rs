//! Submitted data, validation errors, and cleaned values.

use std::collections::BTreeMap;
use std::fmt;

/// The reserved error key for errors that belong to the whole form.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Submitted form data: a key may carry several values.
///
/// [`get`](FormData::get) returns the last value for a key, while
/// [`get_list`](FormData::get_list) returns all of them.
///
/// # Examples
///
/// ```
/// use tapeforms_forms::data::FormData;
///
/// let data: FormData = [("color", "red"), ("color", "blue")].into_iter().collect();
/// assert_eq!(data.get("color"), Some("blue"));
/// assert_eq!(data.get_list("color").map(<[String]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    inner: BTreeMap<String, Vec<String>>,
}

impl FormData {
    /// Creates empty form data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value for a key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Replaces all values for a key with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// The last value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).and_then(|v| v.last()).map(String::as_str)
    }

    /// All values submitted for `key`.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// Returns `true` if any value was submitted for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns `true` if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (k, v) in iter {
            data.append(k, v);
        }
        data
    }
}

/// Validation errors keyed by field name, plus [`NON_FIELD_ERRORS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDict {
    inner: BTreeMap<String, Vec<String>>,
}

impl ErrorDict {
    /// Creates an empty error dict.
    pub const fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    /// Adds one error message under `key`.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(message.into());
    }

    /// Adds several error messages under `key`.
    pub fn extend(&mut self, key: impl Into<String>, messages: impl IntoIterator<Item = String>) {
        self.inner.entry(key.into()).or_default().extend(messages);
    }

    /// The errors under `key`, empty if there are none.
    pub fn get(&self, key: &str) -> &[String] {
        self.inner.get(key).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `key` has errors.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.get(key).is_some_and(|v| !v.is_empty())
    }

    /// All keys with errors, including [`NON_FIELD_ERRORS`].
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Keys of fields with errors, excluding [`NON_FIELD_ERRORS`].
    pub fn field_names(&self) -> Vec<String> {
        self.keys()
            .filter(|k| *k != NON_FIELD_ERRORS)
            .map(String::from)
            .collect()
    }

    /// Iterates `(key, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns `true` if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.inner.values().all(Vec::is_empty)
    }

    /// Number of keys with errors.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Removes all errors.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

/// A value after type coercion by a field.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanedValue {
    /// No value.
    Null,
    /// Text.
    String(String),
    /// Whole number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// Calendar date.
    Date(chrono::NaiveDate),
    /// Time of day.
    Time(chrono::NaiveTime),
    /// Date and time without a zone.
    DateTime(chrono::NaiveDateTime),
    /// Several values.
    List(Vec<CleanedValue>),
}

impl CleanedValue {
    /// Returns `true` for `Null`, empty strings, and empty lists.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(l) => l.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CleanedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::String(s) => write!(f, "{s}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join(","))
            }
        }
    }
}
