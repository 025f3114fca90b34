//! The [`Form`]: an ordered set of fields, bound data, and validation state.
//!
//! A form is unbound until [`Form::bind`] hands it submitted data. Validation
//! runs in [`Form::full_clean`]; until then the form is "unvalidated" and
//! [`Form::errors`] is empty. Renderers rely on that distinction: invalid
//! styling only ever follows a completed validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tapeforms_core::error::{TapeformsError, TapeformsResult, ValidationError};

use crate::bound_field::BoundField;
use crate::data::{CleanedValue, ErrorDict, FormData, NON_FIELD_ERRORS};
use crate::fields::Field;
use crate::validation::{self, FormCleaner};

/// Default `auto_id` format; `{}` is replaced by the field's html name.
pub const DEFAULT_AUTO_ID: &str = "id_{}";

static NO_ERRORS: ErrorDict = ErrorDict::new();

/// A form definition together with its binding and validation state.
///
/// # Examples
///
/// ```
/// use tapeforms_forms::{Field, Form, FormData};
///
/// let mut form = Form::new("ContactForm").with_field(Field::char("name"));
/// form.bind(FormData::new());
/// assert!(!form.is_valid());
/// assert_eq!(form.errors().get("name"), ["This field is required."]);
/// ```
#[derive(Clone)]
pub struct Form {
    name: String,
    fields: Vec<Field>,
    auto_id: Option<String>,
    prefix: Option<String>,
    data: Option<FormData>,
    errors: Option<ErrorDict>,
    cleaned_data: BTreeMap<String, CleanedValue>,
    cleaners: Vec<FormCleaner>,
}

impl Form {
    /// Creates an unbound form without fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            auto_id: Some(DEFAULT_AUTO_ID.to_string()),
            prefix: None,
            data: None,
            errors: None,
            cleaned_data: BTreeMap::new(),
            cleaners: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Sets the `auto_id` format. `None` disables generated ids.
    #[must_use]
    pub fn with_auto_id(mut self, auto_id: Option<&str>) -> Self {
        self.auto_id = auto_id.map(String::from);
        self
    }

    /// Sets the prefix used to namespace html names.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Adds a form-level cleaner.
    #[must_use]
    pub fn with_cleaner<F>(mut self, cleaner: F) -> Self
    where
        F: Fn(&BTreeMap<String, CleanedValue>) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.cleaners.push(Arc::new(cleaner));
        self
    }

    /// Binds submitted data, discarding any previous validation state.
    #[must_use]
    pub fn with_data(mut self, data: FormData) -> Self {
        self.bind(data);
        self
    }

    /// Binds submitted data, discarding any previous validation state.
    pub fn bind(&mut self, data: FormData) {
        self.data = Some(data);
        self.errors = None;
        self.cleaned_data.clear();
    }

    /// The form's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a declared field.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a declared field for modification.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Returns `true` if the form declares `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// The declared field names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// The `auto_id` format, if ids are generated.
    pub fn auto_id(&self) -> Option<&str> {
        self.auto_id.as_deref()
    }

    /// The html name prefix.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns `true` once data has been bound.
    pub const fn is_bound(&self) -> bool {
        self.data.is_some()
    }

    /// The bound data.
    pub const fn data(&self) -> Option<&FormData> {
        self.data.as_ref()
    }

    /// The html name for a field, including the prefix.
    pub fn add_prefix(&self, field_name: &str) -> String {
        match &self.prefix {
            Some(p) => format!("{p}-{field_name}"),
            None => field_name.to_string(),
        }
    }

    /// The generated DOM id for a field, or `""` without `auto_id`.
    pub fn auto_id_for(&self, field_name: &str) -> String {
        let html_name = self.add_prefix(field_name);
        match self.auto_id.as_deref() {
            Some(fmt) if fmt.contains("{}") => fmt.replace("{}", &html_name),
            Some(fmt) if !fmt.is_empty() => html_name,
            _ => String::new(),
        }
    }

    /// The raw value a field currently holds: submitted data when bound,
    /// else its initial value. Disabled fields always use the initial value.
    pub fn raw_value(&self, field: &Field) -> Option<String> {
        match &self.data {
            Some(data) if !field.disabled => {
                field.widget.value_from_data(data, &self.add_prefix(&field.name))
            }
            _ => field.initial.clone(),
        }
    }

    /// Runs field validation and form cleaners, replacing previous errors.
    ///
    /// Unbound forms end up validated with no errors.
    pub fn full_clean(&mut self) {
        let mut errors = ErrorDict::new();
        self.cleaned_data.clear();

        if self.is_bound() {
            let raw_values: BTreeMap<String, Option<String>> = self
                .fields
                .iter()
                .map(|f| (f.name.clone(), self.raw_value(f)))
                .collect();
            validation::clean_fields(&self.fields, &raw_values, &mut self.cleaned_data, &mut errors);
            validation::run_cleaners(&self.cleaners, &self.cleaned_data, &mut errors);
        }

        tracing::debug!(form = %self.name, errors = errors.len(), "form cleaned");
        self.errors = Some(errors);
    }

    /// Returns `true` once validation has run.
    pub const fn is_validated(&self) -> bool {
        self.errors.is_some()
    }

    /// Validates if needed and returns `true` for a bound form without errors.
    pub fn is_valid(&mut self) -> bool {
        if self.errors.is_none() {
            self.full_clean();
        }
        self.is_bound() && self.errors().is_empty()
    }

    /// The current errors (empty before validation).
    pub fn errors(&self) -> &ErrorDict {
        self.errors.as_ref().unwrap_or(&NO_ERRORS)
    }

    /// Adds an error to a field, or to the whole form when `field` is `None`.
    pub fn add_error(&mut self, field: Option<&str>, message: impl Into<String>) -> TapeformsResult<()> {
        let key = match field {
            Some(name) if name != NON_FIELD_ERRORS && !self.has_field(name) => {
                return Err(TapeformsError::UnknownField(format!(
                    "'{}' has no field named '{name}'.",
                    self.name
                )));
            }
            Some(name) => name,
            None => NON_FIELD_ERRORS,
        };
        self.cleaned_data.remove(key);
        self.errors
            .get_or_insert_with(ErrorDict::new)
            .add(key, message);
        Ok(())
    }

    /// Errors belonging to the whole form.
    pub fn non_field_errors(&self) -> &[String] {
        self.errors().get(NON_FIELD_ERRORS)
    }

    /// Values of fields that passed validation.
    pub const fn cleaned_data(&self) -> &BTreeMap<String, CleanedValue> {
        &self.cleaned_data
    }

    /// All fields bound to this form, in declaration order.
    pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
        self.fields.iter().map(|f| BoundField::new(self, f)).collect()
    }

    /// One bound field by name.
    pub fn bound_field(&self, name: &str) -> Option<BoundField<'_>> {
        self.field(name).map(|f| BoundField::new(self, f))
    }

    /// Fields rendered as hidden inputs.
    pub fn hidden_fields(&self) -> Vec<BoundField<'_>> {
        self.bound_fields().into_iter().filter(BoundField::is_hidden).collect()
    }

    /// Fields that are not hidden.
    pub fn visible_fields(&self) -> Vec<BoundField<'_>> {
        self.bound_fields().into_iter().filter(|bf| !bf.is_hidden()).collect()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("name", &self.name)
            .field("fields", &self.field_names())
            .field("bound", &self.is_bound())
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Form {
    /// `<Name bound=True, valid=False, fields=(a;b)>`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let py_bool = |b: bool| if b { "True" } else { "False" };
        let valid = self
            .errors
            .as_ref()
            .map_or("Unknown", |errors| py_bool(self.is_bound() && errors.is_empty()));
        write!(
            f,
            "<{} bound={}, valid={valid}, fields=({})>",
            self.name,
            py_bool(self.is_bound()),
            self.field_names().join(";")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;
    use crate::widgets::WidgetType;

    fn make_test_form() -> Form {
        Form::new("SignupForm").with_fields([
            Field::char("username").min_length(3),
            Field::new("email", FieldKind::EmailField),
            Field::new("age", FieldKind::IntegerField).required(false),
            Field::char("token").widget(WidgetType::HiddenInput).required(false),
        ])
    }

    #[test]
    fn test_form_unbound() {
        let mut form = make_test_form();
        assert!(!form.is_bound());
        assert!(!form.is_validated());
        assert!(!form.is_valid());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_form_bind_and_validate() {
        let mut form = make_test_form().with_data(
            [("username", "alice"), ("email", "alice@example.com"), ("age", "30")]
                .into_iter()
                .collect(),
        );
        assert!(form.is_valid());
        assert_eq!(form.cleaned_data().get("age"), Some(&CleanedValue::Int(30)));
    }

    #[test]
    fn test_form_validation_errors() {
        let mut form = make_test_form().with_data(
            [("username", "ab"), ("email", "not-email")].into_iter().collect(),
        );
        assert!(!form.is_valid());
        assert_eq!(form.errors().field_names(), ["email", "username"]);
    }

    #[test]
    fn test_form_with_prefix() {
        let mut form = make_test_form().with_prefix("signup").with_data(
            [("signup-username", "alice"), ("signup-email", "a@example.com")]
                .into_iter()
                .collect(),
        );
        assert!(form.is_valid());
        assert_eq!(form.auto_id_for("username"), "id_signup-username");
    }

    #[test]
    fn test_auto_id_variants() {
        let form = make_test_form();
        assert_eq!(form.auto_id_for("email"), "id_email");
        assert_eq!(form.clone().with_auto_id(Some("field_{}")).auto_id_for("email"), "field_email");
        assert_eq!(form.clone().with_auto_id(Some("yes")).auto_id_for("email"), "email");
        assert_eq!(form.with_auto_id(None).auto_id_for("email"), "");
    }

    #[test]
    fn test_rebind_clears_state() {
        let mut form = make_test_form().with_data(FormData::new());
        assert!(!form.is_valid());
        form.bind([("username", "alice"), ("email", "a@example.com")].into_iter().collect());
        assert!(!form.is_validated());
        assert!(form.is_valid());
    }

    #[test]
    fn test_cleaner_adds_non_field_error() {
        let mut form = make_test_form()
            .with_cleaner(|data| match data.get("age") {
                Some(CleanedValue::Int(n)) if *n < 18 => {
                    Err(ValidationError::new("Too young.", "age"))
                }
                _ => Ok(()),
            })
            .with_data(
                [("username", "alice"), ("email", "a@example.com"), ("age", "12")]
                    .into_iter()
                    .collect(),
            );
        assert!(!form.is_valid());
        assert_eq!(form.non_field_errors(), ["Too young."]);
    }

    #[test]
    fn test_add_error() {
        let mut form = make_test_form();
        form.add_error(Some("email"), "Taken.").unwrap();
        form.add_error(None, "Nope.").unwrap();
        assert_eq!(form.errors().get("email"), ["Taken."]);
        assert_eq!(form.non_field_errors(), ["Nope."]);
        assert!(matches!(
            form.add_error(Some("missing"), "x"),
            Err(TapeformsError::UnknownField(_))
        ));
    }

    #[test]
    fn test_hidden_and_visible_fields() {
        let form = make_test_form();
        let hidden: Vec<&str> = form.hidden_fields().iter().map(BoundField::name).collect();
        let visible: Vec<&str> = form.visible_fields().iter().map(BoundField::name).collect();
        assert_eq!(hidden, ["token"]);
        assert_eq!(visible, ["username", "email", "age"]);
    }

    #[test]
    fn test_disabled_field_uses_initial() {
        let form = Form::new("F")
            .with_field(Field::char("locked").initial("fixed").disabled(true))
            .with_data([("locked", "changed")].into_iter().collect());
        let field = form.field("locked").unwrap();
        assert_eq!(form.raw_value(field).as_deref(), Some("fixed"));
    }

    #[test]
    fn test_display() {
        let mut form = Form::new("DummyForm").with_fields([Field::char("a"), Field::char("b")]);
        assert_eq!(form.to_string(), "<DummyForm bound=False, valid=Unknown, fields=(a;b)>");
        form.bind(FormData::new());
        form.full_clean();
        assert_eq!(form.to_string(), "<DummyForm bound=True, valid=False, fields=(a;b)>");
    }
}
