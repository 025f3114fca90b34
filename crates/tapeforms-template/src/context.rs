//! Template context for rendering.
//!
//! Provides [`ContextValue`] for representing dynamic template values and
//! [`Context`], the flat variable map handed to a renderer.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Serialize;

/// Represents a dynamic value in a template context.
///
/// Serializes as plain data: safe and unsafe strings alike become strings.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    /// A string value, escaped on output.
    String(String),
    /// A string marked as safe; auto-escaping will not be applied.
    SafeString(String),
    /// A 64-bit integer.
    Integer(i64),
    /// A 64-bit floating point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// An ordered list of values.
    List(Vec<ContextValue>),
    /// A key-value mapping.
    Dict(HashMap<String, ContextValue>),
    /// The absence of a value.
    None,
}

impl ContextValue {
    /// Creates a safe string value.
    pub fn safe(s: impl Into<String>) -> Self {
        Self::SafeString(s.into())
    }

    /// Returns `true` if this value is considered "truthy" in template logic.
    ///
    /// `None`, `false`, zero, and empty strings, lists, and dicts are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::String(s) | Self::SafeString(s) => !s.is_empty(),
            Self::List(l) => !l.is_empty(),
            Self::Dict(d) => !d.is_empty(),
        }
    }

    /// Returns `true` if this value is a safe string.
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::SafeString(_))
    }

    /// Marks a string value as safe.
    #[must_use]
    pub fn mark_safe(self) -> Self {
        match self {
            Self::String(s) => Self::SafeString(s),
            other => other,
        }
    }

    /// Returns the string contents if this is a String or `SafeString`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::SafeString(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a `Bool`.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Looks up a key if this is a `Dict`.
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Dict(map) => map.get(key),
            Self::List(list) => key.parse::<usize>().ok().and_then(|idx| list.get(idx)),
            _ => None,
        }
    }

    /// A short name for the kind of value, used in error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) | Self::SafeString(_) => "str",
            Self::Integer(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
            Self::Dict(_) => "dict",
            Self::None => "NoneType",
        }
    }

    /// Converts this value into JSON for engines that consume serde data.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(s) | Self::SafeString(s) => serde_json::Value::String(s.clone()),
            Self::Integer(i) => serde_json::json!(i),
            Self::Float(f) => serde_json::json!(f),
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Dict(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            Self::None => serde_json::Value::Null,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::SafeString(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::None => Ok(()),
            Self::List(_) | Self::Dict(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl PartialEq for ContextValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a) | Self::SafeString(a), Self::String(b) | Self::SafeString(b)) => {
                a == b
            }
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::None, Self::None) => true,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            _ => false,
        }
    }
}

// -- From implementations --

impl From<&str> for ContextValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&String> for ContextValue {
    fn from(s: &String) -> Self {
        Self::String(s.clone())
    }
}

impl From<i64> for ContextValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for ContextValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for ContextValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ContextValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<HashMap<String, T>> for ContextValue {
    fn from(m: HashMap<String, T>) -> Self {
        Self::Dict(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for ContextValue {
    fn from(o: Option<T>) -> Self {
        o.map_or(Self::None, Into::into)
    }
}

impl From<serde_json::Value> for ContextValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::None),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(arr) => Self::List(arr.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(map) => {
                Self::Dict(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

/// A template context: a flat map of variable names to values.
///
/// Keys are kept sorted so iteration order, and therefore anything derived
/// from it, is deterministic.
///
/// # Examples
///
/// ```
/// use tapeforms_template::context::{Context, ContextValue};
///
/// let mut ctx = Context::new();
/// ctx.set("field", ContextValue::Dict([("name".to_string(), "email".into())].into()));
/// assert_eq!(ctx.get("field.name").and_then(ContextValue::as_str), Some("email"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    vars: BTreeMap<String, ContextValue>,
}

impl Context {
    /// Creates a new empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Looks up a variable by name.
    ///
    /// Supports dot-separated paths like `field.name` or `errors.0`.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        let mut parts = key.split('.');
        let mut current = self.vars.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Returns `true` if the top-level variable exists.
    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Returns the sorted top-level variable names.
    pub fn keys(&self) -> Vec<&str> {
        self.vars.keys().map(String::as_str).collect()
    }

    /// Returns the number of top-level variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Converts the context into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.vars
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ContextValue>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut ctx = Self::new();
        for (k, v) in iter {
            ctx.set(k, v);
        }
        ctx
    }
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
