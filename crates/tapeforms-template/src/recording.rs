//! A renderer that records calls instead of rendering.

use std::sync::Mutex;

use tapeforms_core::error::TapeformsResult;

use crate::context::Context;
use crate::engine::TemplateRenderer;

/// A [`TemplateRenderer`] that records every `(template, context)` pair it is
/// asked to render and returns a fixed output.
///
/// # Examples
///
/// ```
/// use tapeforms_template::{Context, RecordingRenderer, TemplateRenderer};
///
/// let renderer = RecordingRenderer::with_output("<form/>");
/// assert_eq!(renderer.render_to_string("x.html", &Context::new()).unwrap(), "<form/>");
/// assert_eq!(renderer.template_names(), ["x.html"]);
/// ```
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    output: String,
    calls: Mutex<Vec<(String, Context)>>,
}

impl RecordingRenderer {
    /// Creates a recorder that renders every template as the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recorder that renders every template as `output`.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            calls: Mutex::default(),
        }
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<(String, Context)> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// The names of the rendered templates, oldest first.
    pub fn template_names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    /// The most recent call, if any.
    pub fn last_call(&self) -> Option<(String, Context)> {
        self.calls().pop()
    }

    /// Forgets all recorded calls.
    pub fn clear(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }
}

impl TemplateRenderer for RecordingRenderer {
    fn render_to_string(&self, name: &str, context: &Context) -> TapeformsResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((name.to_string(), context.clone()));
        }
        Ok(self.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_calls_in_order() {
        let renderer = RecordingRenderer::new();
        let mut ctx = Context::new();
        ctx.set("n", 1_i64);
        renderer.render_to_string("a.html", &ctx).unwrap();
        renderer.render_to_string("b.html", &Context::new()).unwrap();

        assert_eq!(renderer.template_names(), ["a.html", "b.html"]);
        let (name, first_ctx) = &renderer.calls()[0];
        assert_eq!(name, "a.html");
        assert_eq!(first_ctx, &ctx);
        assert_eq!(renderer.last_call().unwrap().0, "b.html");
    }

    #[test]
    fn test_clear() {
        let renderer = RecordingRenderer::with_output("x");
        renderer.render_to_string("a.html", &Context::new()).unwrap();
        renderer.clear();
        assert!(renderer.calls().is_empty());
        assert!(renderer.last_call().is_none());
    }
}
