//! # tapeforms
//!
//! Template driven form rendering with swappable CSS skins.
//!
//! This is the meta-crate that re-exports the tapeforms crates. Depend on
//! `tapeforms` for everything, or on individual crates when you only need
//! part of it.
//!
//! ```
//! use tapeforms::prelude::*;
//!
//! let form = Form::new("LoginForm").with_fields([
//!     Field::char("username"),
//!     Field::char("password").widget(WidgetType::PasswordInput),
//! ]);
//! let tapeform = Tapeform::builder(form).style(BulmaStyle::new()).build();
//!
//! let html = tapeform.as_tapeform(&Engine::new()).unwrap();
//! assert!(html.contains(r#"<div class="field">"#));
//! assert!(html.contains(r#"class="input""#));
//! ```

/// Errors, settings, logging and CSS class helpers.
pub use tapeforms_core as core;

/// Forms, fields, widgets and bound fields.
#[cfg(feature = "forms")]
pub use tapeforms_forms as forms;

/// Template contexts and the Tera-backed engine.
#[cfg(feature = "template")]
pub use tapeforms_template as template;

/// Styles, skins, layouts, fieldsets and tag entry points.
#[cfg(feature = "render")]
pub use tapeforms_render as render;

pub use tapeforms_core::{TapeformsError, TapeformsResult};

/// Everything needed to declare and render a form.
pub mod prelude {
    pub use tapeforms_core::logging::setup_logging;
    pub use tapeforms_core::{join_css_class, Settings, TapeformsError, TapeformsResult};

    #[cfg(feature = "forms")]
    pub use tapeforms_forms::{BoundField, Field, FieldKind, Form, FormData, Widget, WidgetType};

    #[cfg(feature = "template")]
    pub use tapeforms_template::{Context, ContextValue, Engine, RecordingRenderer, TemplateRenderer};

    #[cfg(feature = "render")]
    pub use tapeforms_render::prelude::*;
}
