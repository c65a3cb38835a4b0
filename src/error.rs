//! Error handling for the sort utility

use std::io;
use thiserror::Error;

/// Custom error type for sort operations
#[derive(Error, Debug)]
pub enum SortError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Permission denied: {file}")]
    PermissionDenied { file: String },

    #[error("No such file or directory: {file}")]
    FileNotFound { file: String },

    #[error("{message}")]
    ConflictingOptions { message: String },

    #[error("{message}")]
    MissingOption { message: String },

    #[error("you cannot {option} when sorting by {strategy}")]
    UnsupportedOption { option: String, strategy: String },

    #[error("unknown sort type: {name}")]
    UnknownStrategy { name: String },

    #[error("could not find a locale matching {tag}: {message}")]
    InvalidLocale { tag: String, message: String },

    #[error("line {line} is not valid UTF-8")]
    InvalidUtf8 { line: usize },

    #[error("could not read any data from {file}")]
    EmptyInput { file: String },

    #[error("could not determine line ending from reading first {bytes} bytes of {file}")]
    UnknownLineEnding { file: String, bytes: usize },

    #[error("invalid IP address '{literal}' at line {line}")]
    InvalidIpAddress { line: usize, literal: String },

    #[error("invalid network address '{literal}' at line {line}")]
    InvalidNetworkAddress { line: usize, literal: String },

    #[error("invalid network prefix length in '{literal}' at line {line}")]
    InvalidPrefixLength { line: usize, literal: String },

    #[error("The {file} file is not sorted")]
    NotSorted { file: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SortError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SortError::NotSorted { .. } => crate::EXIT_NOT_SORTED,
            _ => crate::EXIT_FAILURE,
        }
    }

    /// Whether this error reports a failed check rather than a failure to run
    pub fn is_not_sorted(&self) -> bool {
        matches!(self, SortError::NotSorted { .. })
    }

    pub fn permission_denied(file: &str) -> Self {
        SortError::PermissionDenied {
            file: file.to_string(),
        }
    }

    pub fn file_not_found(file: &str) -> Self {
        SortError::FileNotFound {
            file: file.to_string(),
        }
    }

    pub fn conflicting_options(message: &str) -> Self {
        SortError::ConflictingOptions {
            message: message.to_string(),
        }
    }

    pub fn missing_option(message: &str) -> Self {
        SortError::MissingOption {
            message: message.to_string(),
        }
    }

    /// Create an error for an option the chosen strategy does not accept
    pub fn unsupported_option(option: &str, strategy: &str) -> Self {
        SortError::UnsupportedOption {
            option: option.to_string(),
            strategy: strategy.to_string(),
        }
    }

    pub fn unknown_strategy(name: &str) -> Self {
        SortError::UnknownStrategy {
            name: name.to_string(),
        }
    }

    pub fn invalid_locale(tag: &str, message: &str) -> Self {
        SortError::InvalidLocale {
            tag: tag.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_utf8(line: usize) -> Self {
        SortError::InvalidUtf8 { line }
    }

    pub fn empty_input(file: &str) -> Self {
        SortError::EmptyInput {
            file: file.to_string(),
        }
    }

    pub fn unknown_line_ending(file: &str, bytes: usize) -> Self {
        SortError::UnknownLineEnding {
            file: file.to_string(),
            bytes,
        }
    }

    /// Create an invalid IP error; `line` is 1-based
    pub fn invalid_ip_address(line: usize, literal: &str) -> Self {
        SortError::InvalidIpAddress {
            line,
            literal: literal.to_string(),
        }
    }

    pub fn invalid_network_address(line: usize, literal: &str) -> Self {
        SortError::InvalidNetworkAddress {
            line,
            literal: literal.to_string(),
        }
    }

    pub fn invalid_prefix_length(line: usize, literal: &str) -> Self {
        SortError::InvalidPrefixLength {
            line,
            literal: literal.to_string(),
        }
    }

    pub fn not_sorted(file: &str) -> Self {
        SortError::NotSorted {
            file: file.to_string(),
        }
    }

    pub fn internal(message: &str) -> Self {
        SortError::Internal {
            message: message.to_string(),
        }
    }
}

/// Result type for sort operations
pub type SortResult<T> = Result<T, SortError>;

/// Why a path could not be made relative to another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeReason {
    /// One path is absolute and the other is not, or their drives differ
    IncompatibleRoots,
    /// Reaching the target would mean climbing above the base's root
    CannotRelativize,
}

impl std::fmt::Display for RelativeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            RelativeReason::IncompatibleRoots => "incompatible-roots",
            RelativeReason::CannotRelativize => "cannot-relativize",
        };
        write!(f, "{tag}")
    }
}

/// Failure of a lexical `relative` computation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("can't make {target} relative to {base} ({reason})")]
pub struct RelativePathError {
    pub base: String,
    pub target: String,
    pub reason: RelativeReason,
}

impl RelativePathError {
    pub fn new(base: &str, target: &str, reason: RelativeReason) -> Self {
        Self {
            base: base.to_string(),
            target: target.to_string(),
            reason,
        }
    }
}

/// Context trait for adding context to errors
pub trait SortContext<T> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String;

    fn with_file_context(self, filename: &str) -> SortResult<T>;
}

impl<T> SortContext<T> for Result<T, io::Error> {
    fn with_context<F>(self, f: F) -> SortResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|io_err| {
            SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", f(), io_err),
            ))
        })
    }

    fn with_file_context(self, filename: &str) -> SortResult<T> {
        self.map_err(|io_err| match io_err.kind() {
            io::ErrorKind::PermissionDenied => SortError::permission_denied(filename),
            io::ErrorKind::NotFound => SortError::file_not_found(filename),
            _ => SortError::Io(io::Error::new(
                io_err.kind(),
                format!("{}: {}", filename, io_err),
            )),
        })
    }
}
