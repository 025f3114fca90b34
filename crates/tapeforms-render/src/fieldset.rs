//! Fieldsets: named views over part of a form's visible fields.
//!
//! A fieldset either lists the fields it shows (`fields`, where an entry may
//! be a row of several fields rendered as columns) or shows every visible
//! field except some (`exclude`). Exactly one fieldset of a generated set is
//! primary; only the primary one carries the form's hidden fields and
//! non-field errors.
//!
//! Specs are plain data and can be declared in TOML:
//!
//! ```
//! use tapeforms_render::fieldset::{FieldsetEntry, FieldsetSpec};
//!
//! #[derive(serde::Deserialize)]
//! struct Layout {
//!     fieldsets: Vec<FieldsetSpec>,
//! }
//!
//! let layout: Layout = toml::from_str(r#"
//!     [[fieldsets]]
//!     fields = ["name", ["city", "zip"]]
//!     extra = { title = "Address" }
//!
//!     [[fieldsets]]
//!     exclude = ["name", "city", "zip"]
//! "#).unwrap();
//!
//! assert_eq!(layout.fieldsets[0].fields.as_ref().unwrap()[1], FieldsetEntry::Row(vec!["city".into(), "zip".into()]));
//! assert_eq!(layout.fieldsets[1].exclude.as_deref().map(<[String]>::len), Some(3));
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tapeforms_core::error::{TapeformsError, TapeformsResult};
use tapeforms_forms::BoundField;
use tapeforms_template::context::ContextValue;
use tapeforms_template::engine::TemplateRenderer;

use crate::layout::Renderable;
use crate::tapeform::Tapeform;

/// One entry of a fieldset's `fields` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldsetEntry {
    /// A field on its own row.
    Field(String),
    /// Several fields on one row, rendered as columns.
    Row(Vec<String>),
}

impl FieldsetEntry {
    /// The field names of this entry.
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Field(name) => vec![name.as_str()],
            Self::Row(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for FieldsetEntry {
    fn from(name: &str) -> Self {
        Self::Field(name.to_string())
    }
}

impl From<String> for FieldsetEntry {
    fn from(name: String) -> Self {
        Self::Field(name)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for FieldsetEntry {
    fn from(names: [S; N]) -> Self {
        Self::Row(names.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldsetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(","))
    }
}

/// Declarative configuration of one fieldset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsetSpec {
    /// Fields to show, in this order.
    pub fields: Option<Vec<FieldsetEntry>>,
    /// Fields to leave out.
    pub exclude: Option<Vec<String>>,
    pub primary: bool,
    /// Layout template for this fieldset.
    pub template: Option<String>,
    /// Free-form data for the template, e.g. `title` or `css_class`.
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FieldsetSpec {
    /// A spec showing the given entries.
    pub fn fields<E: Into<FieldsetEntry>>(entries: impl IntoIterator<Item = E>) -> Self {
        Self {
            fields: Some(entries.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A spec showing every visible field except the given ones.
    pub fn exclude<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self::default().with_exclude(names)
    }

    #[must_use]
    pub fn with_exclude<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub const fn primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    #[must_use]
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Shorthand for the `title` extra.
    #[must_use]
    pub fn title(self, title: impl Into<String>) -> Self {
        self.extra("title", title.into())
    }

    fn has_fields(&self) -> bool {
        self.fields.as_ref().is_some_and(|f| !f.is_empty())
    }
}

/// A fieldset bound to a tapeform for one render pass.
#[derive(Debug, Clone)]
pub struct Fieldset<'a> {
    tapeform: &'a Tapeform,
    spec: FieldsetSpec,
}

impl<'a> Fieldset<'a> {
    /// Creates a fieldset. Fails when the spec names neither `fields` nor
    /// `exclude`; an empty `exclude` list counts as given.
    pub fn new(tapeform: &'a Tapeform, spec: FieldsetSpec) -> TapeformsResult<Self> {
        if !spec.has_fields() && spec.exclude.is_none() {
            tracing::warn!(form = tapeform.form().name(), "fieldset without fields or exclude");
            return Err(TapeformsError::ImproperlyConfigured(
                "Please provide fields or exclude argument.".to_string(),
            ));
        }
        Ok(Self { tapeform, spec })
    }

    pub const fn spec(&self) -> &FieldsetSpec {
        &self.spec
    }

    pub const fn is_primary(&self) -> bool {
        self.spec.primary
    }

    /// The `title` extra, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.spec.extra.get("title").and_then(serde_json::Value::as_str)
    }

    /// Visible fields grouped in rows.
    ///
    /// With `fields`, rows follow the list's order; otherwise every visible
    /// field is its own row in form order. Excluded and non-visible names are
    /// dropped, a name listed again is skipped, and rows left empty disappear.
    pub fn rows(&self) -> Vec<Vec<BoundField<'a>>> {
        let visible = self.tapeform.form().visible_fields();
        let excluded = |name: &str| {
            self.spec
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.iter().any(|e| e == name))
        };

        match self.spec.fields.as_ref().filter(|f| !f.is_empty()) {
            Some(entries) => {
                let mut placed: HashSet<&str> = HashSet::new();
                let mut rows = Vec::new();
                for entry in entries {
                    let row: Vec<BoundField<'a>> = entry
                        .names()
                        .into_iter()
                        .filter(|name| !excluded(*name) && placed.insert(*name))
                        .filter_map(|name| visible.iter().find(|bf| bf.name() == name).copied())
                        .collect();
                    if !row.is_empty() {
                        rows.push(row);
                    }
                }
                rows
            }
            None => visible
                .into_iter()
                .filter(|bf| !excluded(bf.name()))
                .map(|bf| vec![bf])
                .collect(),
        }
    }

    /// Renders the fieldset with its layout template.
    pub fn as_tapeform(&self, renderer: &dyn TemplateRenderer) -> TapeformsResult<String> {
        self.render_as_standalone(renderer)
    }
}

impl Renderable for Fieldset<'_> {
    fn tapeform(&self) -> &Tapeform {
        self.tapeform
    }

    /// The spec's template, then the style's fieldset template.
    fn layout_template(&self) -> Option<&str> {
        self.spec
            .template
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.tapeform.style().fieldset_template())
    }

    fn default_layout_template(&self) -> &str {
        &self.tapeform.settings().fieldset_default_template
    }

    fn hidden_fields(&self) -> Vec<BoundField<'_>> {
        if self.spec.primary {
            self.tapeform.form().hidden_fields()
        } else {
            Vec::new()
        }
    }

    fn visible_fields(&self) -> Vec<BoundField<'_>> {
        self.rows().into_iter().flatten().collect()
    }

    fn visible_rows(&self) -> Vec<Vec<BoundField<'_>>> {
        self.rows()
    }

    fn non_field_errors(&self) -> Vec<String> {
        if self.spec.primary {
            self.tapeform.form().non_field_errors().to_vec()
        } else {
            Vec::new()
        }
    }

    fn unit_context(&self) -> ContextValue {
        let mut map = std::collections::HashMap::new();
        map.insert("primary".to_string(), ContextValue::Bool(self.spec.primary));
        map.insert(
            "extra".to_string(),
            ContextValue::Dict(
                self.spec
                    .extra
                    .iter()
                    .map(|(k, v)| (k.clone(), ContextValue::from(v.clone())))
                    .collect(),
            ),
        );
        map.insert(
            "fields".to_string(),
            ContextValue::from(
                self.visible_fields()
                    .iter()
                    .map(|bf| bf.name().to_string())
                    .collect::<Vec<_>>(),
            ),
        );
        map.insert("form".to_string(), self.tapeform.to_context_value());
        ContextValue::Dict(map)
    }
}

impl fmt::Display for Fieldset<'_> {
    /// `<Fieldset form=<..>, primary=False, title=None, fields=(a;b,c)/(d)>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: Vec<String>| items.join(";");
        let fields = self
            .spec
            .fields
            .as_ref()
            .map(|entries| join(entries.iter().map(ToString::to_string).collect()))
            .unwrap_or_default();
        let exclude = self.spec.exclude.clone().map(join).unwrap_or_default();
        write!(
            f,
            "<Fieldset form={}, primary={}, title={}, fields=({fields})/({exclude})>",
            self.tapeform,
            if self.spec.primary { "True" } else { "False" },
            self.title().unwrap_or("None"),
        )
    }
}

/// Builds fieldsets from `specs` in order, making exactly one primary.
///
/// The first spec declaring `primary` wins; without one, the first fieldset
/// is made primary. Later explicit declarations are cleared so the
/// guarantee holds.
pub fn generate<'a>(tapeform: &'a Tapeform, specs: &[FieldsetSpec]) -> TapeformsResult<Vec<Fieldset<'a>>> {
    let mut has_primary = specs.iter().any(|spec| spec.primary);
    let mut primary_seen = false;

    specs
        .iter()
        .map(|spec| {
            let mut spec = spec.clone();
            if !has_primary {
                spec.primary = true;
                has_primary = true;
            }
            if spec.primary {
                spec.primary = !primary_seen;
                primary_seen = true;
            }
            Fieldset::new(tapeform, spec)
        })
        .collect()
}

impl Tapeform {
    /// The configured fieldsets; empty when none are configured.
    pub fn fieldsets(&self) -> TapeformsResult<Vec<Fieldset<'_>>> {
        generate(self, self.fieldset_specs())
    }

    /// Fieldsets from explicit specs instead of the configured ones.
    pub fn generate_fieldsets(&self, specs: &[FieldsetSpec]) -> TapeformsResult<Vec<Fieldset<'_>>> {
        generate(self, specs)
    }

    /// A single fieldset of this tapeform.
    pub fn fieldset(&self, spec: FieldsetSpec) -> TapeformsResult<Fieldset<'_>> {
        Fieldset::new(self, spec)
    }
}
