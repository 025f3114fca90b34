//! CSS class string joining.

use std::collections::HashSet;

/// Returns the union of one or more CSS class strings as a space separated string.
///
/// Every input may hold several whitespace separated tokens. Missing or empty
/// inputs are skipped and every token appears once in the result. Callers
/// must only rely on the token *set*; this implementation happens to keep
/// first-seen order so output is stable between runs.
///
/// # Examples
///
/// ```
/// use tapeforms_core::utils::join_css_class;
///
/// assert_eq!(join_css_class(None, &[]), "");
/// assert_eq!(join_css_class(Some("cls1"), &[None]), "cls1");
/// assert_eq!(join_css_class(Some("a b"), &[Some("b c")]), "a b c");
/// ```
pub fn join_css_class(css_class: Option<&str>, additional: &[Option<&str>]) -> String {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    let inputs = std::iter::once(css_class).chain(additional.iter().copied());
    for token in inputs.flatten().flat_map(str::split_whitespace) {
        if seen.insert(token) {
            tokens.push(token);
        }
    }

    tokens.join(" ")
}
