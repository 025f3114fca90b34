//! # tapeforms-template
//!
//! The template side of tapeforms. Resolvers never talk to a concrete engine;
//! they build a [`Context`](context::Context) and hand it to a
//! [`TemplateRenderer`](engine::TemplateRenderer) together with a template name.
//!
//! [`Engine`](engine::Engine) is the stock renderer, built on Tera and
//! preloaded with the `tapeforms/...` templates for every bundled skin.
//! [`RecordingRenderer`](recording::RecordingRenderer) is a test double that
//! records calls instead of rendering.

pub mod builtin;
pub mod context;
pub mod engine;
pub mod recording;

pub use context::{Context, ContextValue};
pub use engine::{Engine, TemplateRenderer};
pub use recording::RecordingRenderer;
