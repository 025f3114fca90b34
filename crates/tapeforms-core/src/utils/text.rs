//! String helpers.

/// Uppercases the first character of a string.
///
/// # Examples
///
/// ```
/// use tapeforms_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Turns a field name into a human readable label.
///
/// # Examples
///
/// ```
/// use tapeforms_core::utils::text::pretty_name;
///
/// assert_eq!(pretty_name("my_field1"), "My field1");
/// assert_eq!(pretty_name("first_name"), "First name");
/// ```
pub fn pretty_name(name: &str) -> String {
    capfirst(&name.replace('_', " "))
}
