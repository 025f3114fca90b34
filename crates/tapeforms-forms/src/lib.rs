//! # tapeforms-forms
//!
//! The form framework tapeforms renders. A [`Form`] holds an ordered list of
//! [`Field`]s, each backed by a [`Widget`]; binding [`FormData`] and calling
//! [`Form::full_clean`] fills an [`ErrorDict`]. [`BoundField`] is the read
//! view that templates and resolvers consume.
//!
//! Widgets carry writable `attrs`, `template_name` and `input_type` slots so
//! that styling layers can adjust them in place before rendering.

pub mod bound_field;
pub mod data;
pub mod fields;
pub mod form;
pub mod validation;
pub mod widgets;

pub use bound_field::BoundField;
pub use data::{CleanedValue, ErrorDict, FormData, NON_FIELD_ERRORS};
pub use fields::{Field, FieldKind};
pub use form::Form;
pub use validation::FormCleaner;
pub use widgets::{Widget, WidgetOption, WidgetType};
