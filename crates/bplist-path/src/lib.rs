//! Plist tree path grammar.
//!
//! A path is a `/`-separated sequence of component strings. Components
//! are dictionary keys or array indices; which one applies is decided
//! by the container the component lands on during navigation. Keys may
//! themselves contain `/` or `~`, so components are escaped with `~1`
//! and `~0` in the text form.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("plist path must be absolute or empty")]
    NotAbsolute,
}

/// Unescapes one path component.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes one path component.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse an absolute path into unescaped components.
///
/// Examples:
/// - `"" -> []`
/// - `"/" -> [""]`
/// - `"/a~1b/~0k/0" -> ["a/b", "~k", "0"]`
pub fn parse_plist_path(path: &str) -> Result<Vec<String>, PathError> {
    if path.is_empty() {
        return Ok(Vec::new());
    }
    if !path.starts_with('/') {
        return Err(PathError::NotAbsolute);
    }
    Ok(path.split('/').skip(1).map(unescape_component).collect())
}

/// Parse a path with convenience behavior: relative strings are
/// accepted by prefixing `/`.
pub fn parse_plist_path_relaxed(path: &str) -> Result<Vec<String>, PathError> {
    if path.starts_with('/') || path.is_empty() {
        return parse_plist_path(path);
    }
    let mut absolute = String::with_capacity(path.len() + 1);
    absolute.push('/');
    absolute.push_str(path);
    parse_plist_path(&absolute)
}

/// Format unescaped components into an absolute path.
pub fn format_plist_path(components: &[String]) -> String {
    if components.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in components {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}
