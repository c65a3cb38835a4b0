//! Line sorting for text files
//!
//! Sorts the lines of a file as plain text, numbered text, filesystem paths
//! (POSIX or Windows), IP addresses or CIDR networks. Text comparison can
//! follow the collation rules of a locale, ignore case, or be reversed.
//! The `posix_path` and `win_path` modules expose the lexical path helpers
//! used by the path strategy.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

pub mod error;
pub mod config;

pub mod locale;
pub mod posix_path;
pub mod win_path;
pub mod strategy;

pub mod input;
pub mod core_sort;
pub mod terminal;

// Re-export commonly used types
pub use config::{PathFlavor, SortConfig, SortConfigBuilder, SortParams};
pub use core_sort::CoreSort;
pub use error::{SortError, SortResult};
pub use locale::StringComparer;
pub use strategy::Strategy;

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_NOT_SORTED: i32 = 1;
pub const EXIT_FAILURE: i32 = 2;

/// Sort (or check) the file named by `config`
pub fn sort(config: &SortConfig) -> SortResult<i32> {
    let core_sort = CoreSort::new(config.clone())?;
    core_sort.run()?;
    Ok(EXIT_SUCCESS)
}

