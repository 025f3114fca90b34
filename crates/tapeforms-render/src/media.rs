//! Static assets (scripts and stylesheets) a skin needs on the page.

use serde::{Deserialize, Serialize};
use tapeforms_template::context::escape_html;

/// Script and stylesheet paths, relative to the static URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub js: Vec<String>,
    pub css: Vec<String>,
}

impl Media {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_js(mut self, path: impl Into<String>) -> Self {
        self.js.push(path.into());
        self
    }

    #[must_use]
    pub fn with_css(mut self, path: impl Into<String>) -> Self {
        self.css.push(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.js.is_empty() && self.css.is_empty()
    }

    /// Adds the paths of `other` that are not present yet.
    pub fn extend(&mut self, other: Self) {
        for path in other.js {
            if !self.js.contains(&path) {
                self.js.push(path);
            }
        }
        for path in other.css {
            if !self.css.contains(&path) {
                self.css.push(path);
            }
        }
    }

    /// Renders `<link>` tags for stylesheets followed by `<script>` tags.
    ///
    /// Absolute paths and URLs are emitted unchanged; anything else is
    /// prefixed with `static_url`.
    pub fn render(&self, static_url: &str) -> String {
        let links = self.css.iter().map(|path| {
            format!(
                r#"<link href="{}" media="all" rel="stylesheet">"#,
                escape_html(&absolute_path(static_url, path))
            )
        });
        let scripts = self.js.iter().map(|path| {
            format!(
                r#"<script src="{}"></script>"#,
                escape_html(&absolute_path(static_url, path))
            )
        });
        links.chain(scripts).collect::<Vec<_>>().join("\n")
    }
}

fn absolute_path(static_url: &str, path: &str) -> String {
    if path.starts_with('/') || path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}/{path}", static_url.trim_end_matches('/'))
    }
}
