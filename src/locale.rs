//! Locale-aware string comparison
//!
//! Without a locale, strings compare by code point, optionally after full
//! Unicode case folding. With a locale, the CLDR collation for that locale
//! decides, at secondary strength when case is to be ignored.

use crate::error::{SortError, SortResult};
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// Parse a locale tag such as `en-US`, `de` or `sv_SE`
pub fn parse_locale(tag: &str) -> SortResult<Locale> {
    let normalized = tag.replace('_', "-");
    normalized
        .parse::<Locale>()
        .map_err(|e| SortError::invalid_locale(tag, &e.to_string()))
}

enum Method {
    Ordinal,
    Folded,
    Collated(Collator),
}

/// Order predicate over two strings.
///
/// `reverse` flips the final result and nothing else.
pub struct StringComparer {
    method: Method,
    reverse: bool,
}

impl fmt::Debug for StringComparer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method {
            Method::Ordinal => "ordinal",
            Method::Folded => "folded",
            Method::Collated(_) => "collated",
        };
        f.debug_struct("StringComparer")
            .field("method", &method)
            .field("reverse", &self.reverse)
            .finish()
    }
}

impl StringComparer {
    pub fn new(locale: Option<&Locale>, case_insensitive: bool, reverse: bool) -> SortResult<Self> {
        let method = match locale {
            None if case_insensitive => Method::Folded,
            None => Method::Ordinal,
            Some(locale) => {
                let mut options = CollatorOptions::new();
                if case_insensitive {
                    options.strength = Some(Strength::Secondary);
                }
                let collator = Collator::try_new(&locale.into(), options)
                    .map_err(|e| SortError::invalid_locale(&locale.to_string(), &e.to_string()))?;
                Method::Collated(collator)
            }
        };
        Ok(Self { method, reverse })
    }

    /// The form of `s` that [`StringComparer::compare_prepared`] expects.
    ///
    /// Only case folding without a locale changes the text; everything
    /// else borrows.
    pub fn prepare<'a>(&self, s: &'a str) -> Cow<'a, str> {
        match self.method {
            Method::Folded => Cow::Owned(caseless::default_case_fold_str(s)),
            Method::Ordinal | Method::Collated(_) => Cow::Borrowed(s),
        }
    }

    /// Compare two strings already passed through [`StringComparer::prepare`]
    pub fn compare_prepared(&self, a: &str, b: &str) -> Ordering {
        let ord = match &self.method {
            Method::Ordinal | Method::Folded => a.cmp(b),
            Method::Collated(collator) => collator.compare(a, b),
        };
        if self.reverse {
            ord.reverse()
        } else {
            ord
        }
    }

    /// Three-way comparison honoring the reverse flag
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.compare_prepared(&self.prepare(a), &self.prepare(b))
    }

    /// True if `a` sorts strictly before `b`
    pub fn less(&self, a: &str, b: &str) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}
