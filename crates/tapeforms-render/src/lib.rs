//! # tapeforms-render
//!
//! Decides, for every field of a form, which template renders it and which
//! CSS classes go on its container, label and widget, then renders whole
//! forms, fieldsets and single fields through a
//! [`TemplateRenderer`](tapeforms_template::engine::TemplateRenderer).
//!
//! ## Modules
//!
//! - [`style`] - The [`StyleResolver`] strategy and the default style
//! - [`skins`] - Bootstrap 4/5, Bulma and Foundation styles
//! - [`config`] - Serializable style configuration and template overrides
//! - [`tapeform`] - [`Tapeform`]: a form plus style, with per-field resolution
//! - [`layout`] - Layout template and context resolution ([`Renderable`])
//! - [`fieldset`] - Fieldsets and fieldset generation
//! - [`tags`] - Entry points for `form` and `formfield` template tags
//! - [`media`] - Static assets required by a style
//! - [`testing`] - Helpers for skin and template tests

pub mod config;
pub mod fieldset;
pub mod layout;
pub mod media;
pub mod skins;
pub mod style;
pub mod tags;
pub mod tapeform;
pub mod testing;

pub use config::{OverrideTier, StyleConfig, TemplateOverrides};
pub use fieldset::{Fieldset, FieldsetEntry, FieldsetSpec};
pub use layout::{LayoutContext, Renderable};
pub use media::Media;
pub use style::{DefaultStyle, StyleResolver};
pub use tags::{form_tag, formfield_tag, TagArgument};
pub use tapeform::{FieldContext, Tapeform, TapeformBuilder, TapeformField};

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::config::{StyleConfig, TemplateOverrides};
    pub use crate::fieldset::{Fieldset, FieldsetEntry, FieldsetSpec};
    pub use crate::layout::Renderable;
    pub use crate::media::Media;
    pub use crate::skins::{Bootstrap4Style, Bootstrap5Style, BootstrapStyle, BulmaStyle, FoundationStyle};
    pub use crate::style::{DefaultStyle, StyleResolver};
    pub use crate::tags::{form_tag, formfield_tag, TagArgument};
    pub use crate::tapeform::{Tapeform, TapeformBuilder, TapeformField};
}
