//! Lexical handling of slash-separated (POSIX) paths
//!
//! Nothing here touches the filesystem. The rules differ from
//! `std::path` in a few deliberate ways: `join` never collapses `..`,
//! a trailing separator is kept as a trailing `"."` element by
//! [`split_elements`], and `relative` refuses to climb above a root.

use crate::error::{RelativePathError, RelativeReason};

/// Path separator
pub const SEPARATOR: &str = "/";

/// Returns true if `path` is absolute
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Splits `path` into its elements.
///
/// If `path` is absolute the first element is `"/"`. If `path` ends with
/// `"/"` or `"/."` the last element is `"."`. Empty elements and `"."`
/// never appear anywhere else.
pub fn split_elements(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    if path.bytes().all(|b| b == b'/') {
        return vec![SEPARATOR.to_string()];
    }
    if path == "." {
        return vec![".".to_string()];
    }

    let mut elements = Vec::new();
    if is_absolute(path) {
        elements.push(SEPARATOR.to_string());
    }
    elements.extend(
        path.split('/')
            .filter(|e| !e.is_empty() && *e != ".")
            .map(str::to_string),
    );
    if path.ends_with('/') || path.ends_with("/.") {
        elements.push(".".to_string());
    }
    elements
}

/// Joins elements produced by [`split_elements`] back into a path
pub(crate) fn join_elements(elements: &[String]) -> String {
    match elements {
        [] => ".".to_string(),
        [only] => only.clone(),
        [first, rest @ ..] if first == SEPARATOR => format!("/{}", rest.join("/")),
        _ => elements.join("/"),
    }
}

/// Joins any number of path elements, adding separators as needed.
///
/// Empty inputs are ignored and doubled separators collapse. Unlike
/// `std::path::Path::join`, `..` is left alone: `join(&["a", "../b"])`
/// is `"a/../b"`. Joining nothing yields `""`.
pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    let mut elements = split_elements(&joined);
    if elements.last().is_some_and(|e| e == ".") {
        elements.pop();
    }
    if elements.is_empty() {
        return String::new();
    }
    join_elements(&elements)
}

/// Drops a trailing `"."` and resolves `".."` against preceding elements.
///
/// A leading root is never popped and leading `".."` elements of a
/// relative path are kept.
pub(crate) fn clean_elements(mut elements: Vec<String>) -> Vec<String> {
    if elements.last().is_some_and(|e| e == ".") {
        elements.pop();
    }

    let mut cleaned: Vec<String> = Vec::with_capacity(elements.len());
    for element in elements {
        if element == ".." {
            if cleaned.len() == 1 && cleaned[0] == SEPARATOR {
                continue;
            }
            if cleaned.last().is_some_and(|e| e != "..") {
                cleaned.pop();
                continue;
            }
        }
        cleaned.push(element);
    }
    cleaned
}

/// Returns the shortest path lexically equivalent to `path`
pub fn clean(path: &str) -> String {
    join_elements(&clean_elements(split_elements(path)))
}

/// Returns the last element of `path`.
///
/// `""` and paths ending in a separator give `"."`; `"/"` gives `"/"`.
pub fn base(path: &str) -> String {
    split_elements(path)
        .pop()
        .unwrap_or_else(|| ".".to_string())
}

/// Returns all but the last element of `path`. `..` is not resolved.
pub fn dir(path: &str) -> String {
    let mut elements = split_elements(path);
    match elements.len() {
        0 => ".".to_string(),
        1 if elements[0] == SEPARATOR => SEPARATOR.to_string(),
        1 => ".".to_string(),
        _ => {
            elements.pop();
            join_elements(&elements)
        }
    }
}

/// Returns a path that is lexically equivalent to `target` when joined
/// to `base`.
pub fn relative(base: &str, target: &str) -> Result<String, RelativePathError> {
    if is_absolute(base) != is_absolute(target) {
        return Err(RelativePathError::new(
            base,
            target,
            RelativeReason::IncompatibleRoots,
        ));
    }

    let base_elements = clean_elements(split_elements(base));
    let target_elements = clean_elements(split_elements(target));

    let common = base_elements
        .iter()
        .zip(&target_elements)
        .take_while(|(b, t)| b == t)
        .count();

    let remaining = &base_elements[common..];
    if !remaining.is_empty() && remaining.iter().all(|e| e == "..") {
        return Err(RelativePathError::new(
            base,
            target,
            RelativeReason::CannotRelativize,
        ));
    }

    let mut elements: Vec<String> = vec!["..".to_string(); remaining.len()];
    elements.extend_from_slice(&target_elements[common..]);
    Ok(join_elements(&elements))
}
