//! Template engine: loading and rendering templates.
//!
//! [`TemplateRenderer`] is the only thing the resolvers depend on: "render
//! template `name` with context `ctx` into a string". [`Engine`] implements it
//! on top of Tera, preloaded with the built-in `tapeforms/...` templates.
//! Templates found under [`Settings::template_dirs`] shadow built-ins with
//! the same name.

use std::error::Error as _;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tapeforms_core::error::{TapeformsError, TapeformsResult};
use tapeforms_core::settings::Settings;

use crate::builtin;
use crate::context::Context;

/// Renders a named template with a context.
pub trait TemplateRenderer: Send + Sync {
    /// Renders the template `name` with `context`.
    fn render_to_string(&self, name: &str, context: &Context) -> TapeformsResult<String>;
}

/// The Tera-backed template engine.
///
/// # Examples
///
/// ```
/// use tapeforms_template::context::Context;
/// use tapeforms_template::engine::{Engine, TemplateRenderer};
///
/// let engine = Engine::new();
/// engine.add_raw_template("hello.html", "Hello {{ name }}!").unwrap();
///
/// let mut ctx = Context::new();
/// ctx.set("name", "World");
/// assert_eq!(engine.render_to_string("hello.html", &ctx).unwrap(), "Hello World!");
/// ```
pub struct Engine {
    tera: RwLock<tera::Tera>,
    dirs: Vec<PathBuf>,
}

impl Engine {
    /// Creates an engine holding only the built-in templates.
    pub fn new() -> Self {
        let mut tera = tera::Tera::default();
        // Built-ins are checked by a unit test; a failure here leaves the set empty.
        if let Err(e) = tera.add_raw_templates(builtin::TEMPLATES.iter().copied()) {
            tracing::error!(error = %e, "built-in templates failed to parse");
        }
        Self {
            tera: RwLock::new(tera),
            dirs: Vec::new(),
        }
    }

    /// Creates an engine that also loads every `*.html` file under the
    /// configured template directories. Earlier directories win.
    pub fn from_settings(settings: &Settings) -> TapeformsResult<Self> {
        let mut user: Vec<(String, String)> = Vec::new();
        for dir in &settings.template_dirs {
            collect_templates(dir, dir, &mut user)?;
        }

        let mut templates = Vec::with_capacity(user.len() + builtin::TEMPLATES.len());
        for (name, source) in user {
            if !templates.iter().any(|(n, _): &(String, String)| *n == name) {
                templates.push((name, source));
            }
        }
        for (name, source) in builtin::TEMPLATES {
            if !templates.iter().any(|(n, _)| n == name) {
                templates.push(((*name).to_string(), (*source).to_string()));
            }
        }
        tracing::debug!(
            dirs = settings.template_dirs.len(),
            templates = templates.len(),
            "loaded templates"
        );

        let mut tera = tera::Tera::default();
        tera.add_raw_templates(templates).map_err(map_tera_error)?;
        Ok(Self {
            tera: RwLock::new(tera),
            dirs: settings.template_dirs.clone(),
        })
    }

    /// Adds (or replaces) an in-memory template.
    pub fn add_raw_template(&self, name: &str, source: &str) -> TapeformsResult<()> {
        let mut tera = self.tera.write().map_err(|_| poisoned())?;
        tera.add_raw_template(name, source).map_err(map_tera_error)
    }

    /// Returns `true` if a template with this name is registered.
    pub fn has_template(&self, name: &str) -> bool {
        self.tera
            .read()
            .map(|tera| tera.get_template_names().any(|n| n == name))
            .unwrap_or(false)
    }

    /// The user template directories this engine was loaded from.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("dirs", &self.dirs).finish_non_exhaustive()
    }
}

impl TemplateRenderer for Engine {
    fn render_to_string(&self, name: &str, context: &Context) -> TapeformsResult<String> {
        let tera_ctx = tera::Context::from_value(context.to_json()).map_err(map_tera_error)?;
        let tera = self.tera.read().map_err(|_| poisoned())?;
        tracing::trace!(template = name, "rendering template");
        tera.render(name, &tera_ctx).map_err(map_tera_error)
    }
}

fn poisoned() -> TapeformsError {
    TapeformsError::TemplateRenderError("template registry lock poisoned".to_string())
}

fn map_tera_error(err: tera::Error) -> TapeformsError {
    if let tera::ErrorKind::TemplateNotFound(name) = &err.kind {
        return TapeformsError::TemplateDoesNotExist(format!("Template '{name}' could not be found"));
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TapeformsError::TemplateRenderError(message)
}

/// Recursively collects `*.html` files below `dir`, named relative to `root`
/// with `/` separators.
fn collect_templates(
    root: &Path,
    dir: &Path,
    out: &mut Vec<(String, String)>,
) -> TapeformsResult<()> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_templates(root, &path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "html") {
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push((name, std::fs::read_to_string(&path)?));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextValue;

    #[test]
    fn test_engine_variable_render() {
        let engine = Engine::new();
        engine.add_raw_template("test.html", "Hello {{ name }}!").unwrap();

        let mut ctx = Context::new();
        ctx.set("name", "tapeforms");
        assert_eq!(engine.render_to_string("test.html", &ctx).unwrap(), "Hello tapeforms!");
    }

    #[test]
    fn test_engine_auto_escape() {
        let engine = Engine::new();
        engine.add_raw_template("test.html", "{{ content }}").unwrap();

        let mut ctx = Context::new();
        ctx.set("content", "<script>alert('xss')</script>");
        let result = engine.render_to_string("test.html", &ctx).unwrap();
        assert!(result.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_engine_safe_filter() {
        let engine = Engine::new();
        engine.add_raw_template("test.html", "{{ content | safe }}").unwrap();

        let mut ctx = Context::new();
        ctx.set("content", ContextValue::safe("<b>bold</b>"));
        assert_eq!(engine.render_to_string("test.html", &ctx).unwrap(), "<b>bold</b>");
    }

    #[test]
    fn test_engine_missing_template() {
        let engine = Engine::new();
        let err = engine.render_to_string("nope.html", &Context::new()).unwrap_err();
        assert!(matches!(err, TapeformsError::TemplateDoesNotExist(_)));
    }

    #[test]
    fn test_engine_render_error_keeps_cause() {
        let engine = Engine::new();
        engine.add_raw_template("broken.html", "{{ missing.value }}").unwrap();
        let err = engine.render_to_string("broken.html", &Context::new()).unwrap_err();
        assert!(matches!(err, TapeformsError::TemplateRenderError(_)));
    }

    #[test]
    fn test_engine_has_builtins() {
        let engine = Engine::new();
        assert!(engine.has_template("tapeforms/layouts/default.html"));
        assert!(engine.has_template("tapeforms/fields/bootstrap.html"));
        assert!(!engine.has_template("tapeforms/fields/unknown.html"));
    }

    #[test]
    fn test_from_settings_user_templates_shadow_builtins() {
        let dir = tempfile::tempdir().unwrap();
        let fields = dir.path().join("tapeforms").join("fields");
        std::fs::create_dir_all(&fields).unwrap();
        std::fs::write(fields.join("default.html"), "custom {{ label }}").unwrap();
        std::fs::write(dir.path().join("extra.html"), "extra").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let settings = Settings {
            template_dirs: vec![dir.path().to_path_buf()],
            ..Settings::default()
        };
        let engine = Engine::from_settings(&settings).unwrap();

        let mut ctx = Context::new();
        ctx.set("label", "Name");
        assert_eq!(
            engine.render_to_string("tapeforms/fields/default.html", &ctx).unwrap(),
            "custom Name"
        );
        assert!(engine.has_template("extra.html"));
        assert!(!engine.has_template("notes.txt"));
        assert!(engine.has_template("tapeforms/layouts/default.html"));
    }

    #[test]
    fn test_from_settings_missing_dir() {
        let settings = Settings {
            template_dirs: vec![PathBuf::from("/definitely/not/a/dir")],
            ..Settings::default()
        };
        assert!(matches!(
            Engine::from_settings(&settings).unwrap_err(),
            TapeformsError::IoError(_)
        ));
    }
}
