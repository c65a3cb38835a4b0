//! Lexical handling of Windows paths
//!
//! Backslash is the canonical separator but forward slashes are accepted
//! too. Each operation peels off a leading drive token (`C:`), converts
//! separators to `/`, hands the rest to [`crate::posix_path`] and turns
//! the separators back. Drive letters keep their case; `C:` and `c:` are
//! different drives as far as [`relative`] is concerned. UNC paths are
//! not recognised.

use crate::error::{RelativePathError, RelativeReason};
use crate::posix_path;

/// Path separator
pub const SEPARATOR: &str = "\\";

fn to_slashes(path: &str) -> String {
    path.replace('\\', "/")
}

fn to_backslashes(path: &str) -> String {
    path.replace('/', "\\")
}

/// Splits a leading `[A-Za-z]:` drive token off `path`.
///
/// Returns an empty drive when there is none.
pub fn split_drive(path: &str) -> (&str, &str) {
    match path.as_bytes() {
        [letter, b':', ..] if letter.is_ascii_alphabetic() => path.split_at(2),
        _ => ("", path),
    }
}

/// Returns the drive token of `path` (`"C:"`), if any
pub fn drive(path: &str) -> Option<&str> {
    match split_drive(path) {
        ("", _) => None,
        (drive, _) => Some(drive),
    }
}

/// Returns true if `path` has a drive followed by a separator
pub fn is_absolute(path: &str) -> bool {
    matches!(
        path.as_bytes(),
        [letter, b':', b'/' | b'\\', ..] if letter.is_ascii_alphabetic()
    )
}

/// Splits `path` into its elements.
///
/// If `path` is absolute the first element is `\` or `<drive>:\`; a
/// drive-relative path starts with the bare `<drive>:`. A trailing
/// separator adds a final `"."` element.
pub fn split_elements(path: &str) -> Vec<String> {
    let (drive, rest) = split_drive(path);
    let mut elements = posix_path::split_elements(&to_slashes(rest));
    if elements.first().is_some_and(|e| e == posix_path::SEPARATOR) {
        elements[0] = format!("{drive}{SEPARATOR}");
    } else if !drive.is_empty() {
        elements.insert(0, drive.to_string());
    }
    elements
}

/// Joins any number of path elements with `\`.
///
/// Only the first element may carry a drive. `..` is not resolved and
/// empty inputs are ignored.
pub fn join<S: AsRef<str>>(parts: &[S]) -> String {
    let mut converted: Vec<String> = parts.iter().map(|p| to_slashes(p.as_ref())).collect();
    let Some(first) = converted.first_mut() else {
        return String::new();
    };
    let (drive, rest) = split_drive(first);
    let drive = drive.to_string();
    *first = rest.to_string();

    format!("{drive}{}", to_backslashes(&posix_path::join(&converted)))
}

/// Returns the shortest path lexically equivalent to `path`
pub fn clean(path: &str) -> String {
    let (drive, rest) = split_drive(path);
    let cleaned = posix_path::clean(&to_slashes(rest));
    format!("{drive}{}", to_backslashes(&cleaned))
}

/// Returns the last element of `path`, without its drive
pub fn base(path: &str) -> String {
    let (_, rest) = split_drive(path);
    if rest.is_empty() {
        return ".".to_string();
    }
    to_backslashes(&posix_path::base(&to_slashes(rest)))
}

/// Returns all but the last element of `path`, keeping the drive
pub fn dir(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }
    let (drive, rest) = split_drive(path);
    if rest.is_empty() {
        return drive.to_string();
    }
    format!(
        "{drive}{}",
        to_backslashes(&posix_path::dir(&to_slashes(rest)))
    )
}

/// Returns a path that is lexically equivalent to `target` when joined
/// to `base`. Both paths must be on the same drive, compared by case.
pub fn relative(base: &str, target: &str) -> Result<String, RelativePathError> {
    let incompatible = || RelativePathError::new(base, target, RelativeReason::IncompatibleRoots);

    if is_absolute(base) != is_absolute(target) {
        return Err(incompatible());
    }
    let (base_drive, base_rest) = split_drive(base);
    let (target_drive, target_rest) = split_drive(target);
    if base_drive != target_drive {
        return Err(incompatible());
    }

    posix_path::relative(&to_slashes(base_rest), &to_slashes(target_rest))
        .map(|rel| to_backslashes(&rel))
        .map_err(|err| RelativePathError::new(base, target, err.reason))
}
