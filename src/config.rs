//! Configuration management for sort operations

use crate::error::{SortError, SortResult};
use crate::locale::parse_locale;
use crate::strategy::Strategy;
use icu_locid::Locale;
use std::path::PathBuf;

/// Which lexical rules the path strategy splits lines with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathFlavor {
    #[default]
    Posix,
    Windows,
}

/// Resolved parameters for one sort invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortParams {
    /// Collation locale; `None` means code point order
    pub locale: Option<Locale>,
    pub case_insensitive: bool,
    pub reverse: bool,
    pub path_flavor: PathFlavor,
}

impl SortParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_path_flavor(mut self, path_flavor: PathFlavor) -> Self {
        self.path_flavor = path_flavor;
        self
    }
}

/// Main configuration structure for a run of the tool
#[derive(Debug, Clone, Default)]
pub struct SortConfig {
    /// Strategy used to order lines
    pub strategy: Option<Strategy>,
    /// Locale tag as given on the command line
    pub locale: Option<String>,
    /// Ignore case differences
    pub case_insensitive: bool,
    /// Reverse the result of comparisons
    pub reverse: bool,
    /// Parse paths with Windows rules
    pub windows: bool,
    /// Drop adjacent duplicate lines
    pub unique: bool,
    /// Overwrite the file without keeping a `.bak` copy
    pub in_place: bool,
    /// Print the result instead of rewriting the file
    pub to_stdout: bool,
    /// Only report whether the file is already sorted
    pub check: bool,
    /// Debug mode (for troubleshooting)
    pub debug: bool,
    /// File to sort
    pub file: Option<PathBuf>,
}

impl SortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_locale(mut self, locale: Option<String>) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> SortResult<()> {
        let strategy = self
            .strategy
            .ok_or_else(|| SortError::missing_option("you must set a --sort method"))?;

        if self.file.is_none() {
            return Err(SortError::missing_option(
                "you must pass a file to sort as the final argument",
            ));
        }

        if self.locale.is_some() && !strategy.supports_locale() {
            return Err(SortError::unsupported_option("set a locale", strategy.name()));
        }

        if self.windows && !strategy.supports_path_flavor() {
            return Err(SortError::unsupported_option(
                "pass the --windows flag",
                strategy.name(),
            ));
        }

        if self.to_stdout && self.in_place {
            return Err(SortError::conflicting_options(
                "you cannot set both --stdout and --in-place",
            ));
        }
        if self.to_stdout && self.check {
            return Err(SortError::conflicting_options(
                "you cannot set both --stdout and --check",
            ));
        }
        if self.in_place && self.check {
            return Err(SortError::conflicting_options(
                "you cannot set both --in-place and --check",
            ));
        }

        if let Some(tag) = &self.locale {
            parse_locale(tag)?;
        }

        Ok(())
    }

    /// The strategy, or an error if none was chosen
    pub fn strategy(&self) -> SortResult<Strategy> {
        self.strategy
            .ok_or_else(|| SortError::missing_option("you must set a --sort method"))
    }

    /// Resolve the parameters handed to the sorting engine
    pub fn sort_params(&self) -> SortResult<SortParams> {
        let locale = self.locale.as_deref().map(parse_locale).transpose()?;
        let path_flavor = if self.windows {
            PathFlavor::Windows
        } else {
            PathFlavor::Posix
        };
        Ok(SortParams {
            locale,
            case_insensitive: self.case_insensitive,
            reverse: self.reverse,
            path_flavor,
        })
    }

    /// File name for messages
    pub fn file_display(&self) -> String {
        self.file
            .as_ref()
            .map(|f| f.display().to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Builder pattern for creating configurations
pub struct SortConfigBuilder {
    config: SortConfig,
}

impl SortConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SortConfig::default(),
        }
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = Some(strategy);
        self
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.config.locale = Some(locale.to_string());
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.config.case_insensitive = true;
        self
    }

    pub fn reverse(mut self) -> Self {
        self.config.reverse = true;
        self
    }

    pub fn windows(mut self) -> Self {
        self.config.windows = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.config.unique = true;
        self
    }

    pub fn in_place(mut self) -> Self {
        self.config.in_place = true;
        self
    }

    pub fn to_stdout(mut self) -> Self {
        self.config.to_stdout = true;
        self
    }

    pub fn check(mut self) -> Self {
        self.config.check = true;
        self
    }

    pub fn debug(mut self) -> Self {
        self.config.debug = true;
        self
    }

    pub fn file(mut self, file: impl Into<PathBuf>) -> Self {
        self.config.file = Some(file.into());
        self
    }

    /// Build the final configuration
    pub fn build(self) -> SortResult<SortConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for SortConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
