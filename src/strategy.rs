//! Line ordering strategies and the catalog that names them
//!
//! Every strategy first turns each line into a typed key: a parsed
//! address, a numeric prefix, path elements, or the text itself, case
//! folded up front when case is ignored without a locale. A line that cannot
//! be keyed fails the whole call before anything is reordered, with its
//! 1-based line number. The sort itself then only compares keys and
//! cannot fail.

use crate::config::{PathFlavor, SortParams};
use crate::error::{SortError, SortResult};
use crate::locale::StringComparer;
use crate::{posix_path, win_path};
use itertools::Itertools;
use regex::Regex;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::OnceLock;

/// A named line-ordering algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Text,
    NumberedText,
    DatetimeText,
    Path,
    Ip,
    Network,
}

/// Catalog entry describing a strategy to the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyDescriptor {
    pub strategy: Strategy,
    pub name: &'static str,
    pub description: &'static str,
    pub supports_locale: bool,
    pub supports_path_flavor: bool,
}

/// All strategies, in the order they are presented to users
pub static CATALOG: [StrategyDescriptor; 6] = [
    StrategyDescriptor {
        strategy: Strategy::Text,
        name: "text",
        description: "sort the file as text according to the specified locale",
        supports_locale: true,
        supports_path_flavor: false,
    },
    StrategyDescriptor {
        strategy: Strategy::NumberedText,
        name: "numbered-text",
        description: "sort the file assuming that each line starts with a numeric prefix, \
                      then fall back to sorting by text according to the specified locale",
        supports_locale: true,
        supports_path_flavor: false,
    },
    StrategyDescriptor {
        strategy: Strategy::DatetimeText,
        name: "datetime-text",
        description: "sort the file assuming that each line starts with a date or datetime prefix, \
                      then fall back to sorting by text according to the specified locale",
        supports_locale: true,
        supports_path_flavor: false,
    },
    StrategyDescriptor {
        strategy: Strategy::Path,
        name: "path",
        description: "sort the file assuming that each line is a path, \
                      sorted so that deeper paths come after shorter",
        supports_locale: true,
        supports_path_flavor: true,
    },
    StrategyDescriptor {
        strategy: Strategy::Ip,
        name: "ip",
        description: "sort the file assuming that each line is an IP address",
        supports_locale: false,
        supports_path_flavor: false,
    },
    StrategyDescriptor {
        strategy: Strategy::Network,
        name: "network",
        description: "sort the file assuming that each line is a network in CIDR notation",
        supports_locale: false,
        supports_path_flavor: false,
    },
];

/// Compares two line indices; keys are owned by the closure
type Comparator<'a> = Box<dyn Fn(usize, usize) -> Ordering + 'a>;

impl Strategy {
    /// Every strategy, in catalog order
    pub fn all() -> impl Iterator<Item = Strategy> {
        CATALOG.iter().map(|d| d.strategy)
    }

    pub fn descriptor(self) -> &'static StrategyDescriptor {
        match self {
            Strategy::Text => &CATALOG[0],
            Strategy::NumberedText => &CATALOG[1],
            Strategy::DatetimeText => &CATALOG[2],
            Strategy::Path => &CATALOG[3],
            Strategy::Ip => &CATALOG[4],
            Strategy::Network => &CATALOG[5],
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn description(self) -> &'static str {
        self.descriptor().description
    }

    pub fn supports_locale(self) -> bool {
        self.descriptor().supports_locale
    }

    pub fn supports_path_flavor(self) -> bool {
        self.descriptor().supports_path_flavor
    }

    /// Look a strategy up by its catalog name
    pub fn from_name(name: &str) -> Option<Strategy> {
        CATALOG.iter().find(|d| d.name == name).map(|d| d.strategy)
    }

    /// Reorder `lines` in place.
    ///
    /// On error the lines are left untouched. `datetime-text` keeps the
    /// input order.
    pub fn sort(self, lines: &mut [String], params: &SortParams) -> SortResult<()> {
        if self == Strategy::DatetimeText {
            return Ok(());
        }

        let order = {
            let cmp = self.comparator(lines, params)?;
            let mut order: Vec<usize> = (0..lines.len()).collect();
            order.sort_by(|&a, &b| cmp(a, b));
            order
        };
        apply_order(lines, &order);
        Ok(())
    }

    /// Whether `lines` are already in the order [`Strategy::sort`] would produce
    pub fn is_sorted(self, lines: &[String], params: &SortParams) -> SortResult<bool> {
        let cmp = self.comparator(lines, params)?;
        Ok((0..lines.len())
            .tuple_windows()
            .all(|(a, b)| cmp(a, b) != Ordering::Greater))
    }

    fn comparator<'a>(self, lines: &'a [String], params: &SortParams) -> SortResult<Comparator<'a>> {
        let ascending: Comparator<'a> = match self {
            Strategy::Text => {
                let comparer = StringComparer::new(params.locale.as_ref(), params.case_insensitive, false)?;
                let keys: Vec<Cow<'a, str>> = lines.iter().map(|l| comparer.prepare(l)).collect();
                Box::new(move |a, b| comparer.compare_prepared(&keys[a], &keys[b]))
            }
            Strategy::NumberedText => {
                let comparer = StringComparer::new(params.locale.as_ref(), params.case_insensitive, false)?;
                let keys: Vec<NumberedLine<'a>> = lines.iter().map(|l| NumberedLine::parse(l, &comparer)).collect();
                Box::new(move |a, b| keys[a].compare(&keys[b], &comparer))
            }
            Strategy::DatetimeText => Box::new(|_, _| Ordering::Equal),
            Strategy::Path => {
                let comparer = StringComparer::new(params.locale.as_ref(), params.case_insensitive, false)?;
                let flavor = params.path_flavor;
                let keys: Vec<PathKey> = lines.iter().map(|l| PathKey::new(l, flavor, &comparer)).collect();
                Box::new(move |a, b| keys[a].compare(&keys[b], flavor, &comparer))
            }
            Strategy::Ip => {
                let keys = parse_all(lines, |line, n| {
                    line.parse::<IpAddr>()
                        .map_err(|_| SortError::invalid_ip_address(n, line))
                })?;
                Box::new(move |a, b| compare_addresses(&keys[a], &keys[b]))
            }
            Strategy::Network => {
                let keys = parse_all(lines, Network::parse_line)?;
                Box::new(move |a, b| keys[a].cmp(&keys[b]))
            }
        };

        if params.reverse {
            Ok(Box::new(move |a, b| ascending(a, b).reverse()))
        } else {
            Ok(ascending)
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Strategy {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::from_name(s).ok_or_else(|| SortError::unknown_strategy(s))
    }
}

/// Key every line, stopping at the first failure. `n` is 1-based.
fn parse_all<K>(
    lines: &[String],
    parse: impl Fn(&str, usize) -> SortResult<K>,
) -> SortResult<Vec<K>> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| parse(line, i + 1))
        .collect()
}

/// Move each line to the position given by `order`
fn apply_order(lines: &mut [String], order: &[usize]) {
    let mut taken: Vec<String> = lines.iter_mut().map(std::mem::take).collect();
    for (slot, &index) in lines.iter_mut().zip(order) {
        *slot = std::mem::take(&mut taken[index]);
    }
}

fn numbered_line_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    // Constant pattern, built on first use; `test_numbered_line_parse`
    // fails if it is ever rejected.
    RE.get_or_init(|| Regex::new(r"(?s)\A([0-9]+(?:\.[0-9]+)?)?(.*)\z").ok())
        .as_ref()
}

/// A line split into an optional numeric prefix and the text after it,
/// the text already prepared for `comparer`
#[derive(Debug, Clone, PartialEq)]
struct NumberedLine<'a> {
    number: Option<f64>,
    rest: Cow<'a, str>,
}

impl<'a> NumberedLine<'a> {
    fn parse(line: &'a str, comparer: &StringComparer) -> Self {
        let Some(caps) = numbered_line_re().and_then(|re| re.captures(line)) else {
            return Self {
                number: None,
                rest: comparer.prepare(line),
            };
        };
        let number = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok());
        let rest = caps.get(2).map_or("", |m| m.as_str());
        Self {
            number,
            rest: comparer.prepare(rest),
        }
    }

    /// Numbered lines come before unnumbered ones; equal numbers fall
    /// through to the text.
    fn compare(&self, other: &Self, comparer: &StringComparer) -> Ordering {
        let by_number = match (self.number, other.number) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_number.then_with(|| comparer.compare_prepared(&self.rest, &other.rest))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathKey {
    absolute: bool,
    drive: Option<String>,
    elements: Vec<String>,
}

impl PathKey {
    fn new(line: &str, flavor: PathFlavor, comparer: &StringComparer) -> Self {
        let mut key = match flavor {
            PathFlavor::Posix => Self {
                absolute: posix_path::is_absolute(line),
                drive: None,
                elements: posix_path::split_elements(line),
            },
            PathFlavor::Windows => Self {
                absolute: win_path::is_absolute(line),
                drive: win_path::drive(line).map(str::to_string),
                elements: win_path::split_elements(line),
            },
        };
        key.elements = key
            .elements
            .iter()
            .map(|e| comparer.prepare(e).into_owned())
            .collect();
        key
    }

    /// Absolute before relative, then drive letters (Windows only), then
    /// depth, then element by element.
    fn compare(&self, other: &Self, flavor: PathFlavor, comparer: &StringComparer) -> Ordering {
        let by_root = other.absolute.cmp(&self.absolute);
        let by_drive = || match flavor {
            PathFlavor::Posix => Ordering::Equal,
            PathFlavor::Windows => match (&self.drive, &other.drive) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        let by_elements = || {
            self.elements
                .iter()
                .zip(&other.elements)
                .map(|(a, b)| if a == b { Ordering::Equal } else { comparer.compare_prepared(a, b) })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        };

        by_root
            .then_with(by_drive)
            .then_with(|| self.elements.len().cmp(&other.elements.len()))
            .then_with(by_elements)
    }
}

/// IPv4 sorts before IPv6; within a family, by address bytes
fn compare_addresses(a: &IpAddr, b: &IpAddr) -> Ordering {
    match (a, b) {
        (IpAddr::V4(a), IpAddr::V4(b)) => a.octets().cmp(&b.octets()),
        (IpAddr::V6(a), IpAddr::V6(b)) => a.octets().cmp(&b.octets()),
        (IpAddr::V4(_), IpAddr::V6(_)) => Ordering::Less,
        (IpAddr::V6(_), IpAddr::V4(_)) => Ordering::Greater,
    }
}

/// A CIDR network, stored with its host bits cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Network {
    base: IpAddr,
    prefix: u8,
}

impl Network {
    pub fn new(addr: IpAddr, prefix: u8) -> Option<Self> {
        let base = match addr {
            IpAddr::V4(v4) if prefix <= 32 => {
                let mask = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(v4) & mask))
            }
            IpAddr::V6(v6) if prefix <= 128 => {
                let mask = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(v6) & mask))
            }
            _ => return None,
        };
        Some(Self { base, prefix })
    }

    pub fn base(&self) -> IpAddr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    fn parse_line(line: &str, n: usize) -> SortResult<Self> {
        let (addr, prefix) = line
            .split_once('/')
            .ok_or_else(|| SortError::invalid_network_address(n, line))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|_| SortError::invalid_network_address(n, line))?;

        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SortError::invalid_prefix_length(n, line));
        }
        prefix
            .parse::<u8>()
            .ok()
            .and_then(|p| Network::new(addr, p))
            .ok_or_else(|| SortError::invalid_prefix_length(n, line))
    }
}

impl Ord for Network {
    /// By base address, then the larger network (shorter prefix) first
    fn cmp(&self, other: &Self) -> Ordering {
        compare_addresses(&self.base, &other.base).then_with(|| self.prefix.cmp(&other.prefix))
    }
}

impl PartialOrd for Network {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::parse_locale;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn params(locale: Option<&str>, case_insensitive: bool, reverse: bool) -> SortParams {
        SortParams::new()
            .with_locale(locale.map(|tag| parse_locale(tag).expect("locale")))
            .with_case_insensitive(case_insensitive)
            .with_reverse(reverse)
    }

    fn windows(reverse: bool) -> SortParams {
        params(None, false, reverse).with_path_flavor(PathFlavor::Windows)
    }

    /// Sorts `input` and checks the result and its sortedness verdict
    fn check_case(strategy: Strategy, input: &[&str], expect: &[&str], params: &SortParams) {
        let mut sorted = lines(input);
        strategy.sort(&mut sorted, params).expect("sort should succeed");
        assert_eq!(sorted, lines(expect), "{strategy} with {params:?}");
        assert!(strategy.is_sorted(&sorted, params).expect("check should succeed"));

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut shuffled = lines(input);
        shuffled.shuffle(&mut rng);
        strategy.sort(&mut shuffled, params).expect("sort should succeed");
        assert_eq!(shuffled, lines(expect), "{strategy} on shuffled input");
    }

    const WORDS: &[&str] = &["go", "bears", "above", "And", "all", "home"];
    const ZOO: &[&str] = &["zoo", "foo", "öoo"];

    fn check_text_cases(strategy: Strategy) {
        let p = params;
        check_case(strategy, WORDS, &["And", "above", "all", "bears", "go", "home"], &p(None, false, false));
        check_case(strategy, WORDS, &["above", "all", "And", "bears", "go", "home"], &p(None, true, false));
        check_case(strategy, WORDS, &["home", "go", "bears", "all", "above", "And"], &p(None, false, true));
        check_case(strategy, WORDS, &["home", "go", "bears", "And", "all", "above"], &p(None, true, true));
        check_case(strategy, WORDS, &["above", "all", "And", "bears", "go", "home"], &p(Some("en-US"), false, false));
        check_case(strategy, WORDS, &["home", "go", "bears", "And", "all", "above"], &p(Some("en-US"), false, true));
        check_case(strategy, ZOO, &["foo", "öoo", "zoo"], &p(Some("de"), false, false));
        check_case(strategy, ZOO, &["zoo", "öoo", "foo"], &p(Some("de"), false, true));
        check_case(strategy, ZOO, &["foo", "zoo", "öoo"], &p(Some("sv"), false, false));
        check_case(strategy, ZOO, &["öoo", "zoo", "foo"], &p(Some("sv"), false, true));
    }

    #[test]
    fn test_catalog() {
        let names: Vec<&str> = Strategy::all().map(Strategy::name).collect();
        assert_eq!(
            names,
            ["text", "numbered-text", "datetime-text", "path", "ip", "network"]
        );
        for strategy in Strategy::all() {
            assert_eq!(strategy.descriptor().strategy, strategy);
            assert_eq!(strategy.name().parse::<Strategy>().ok(), Some(strategy));
        }
        assert!(Strategy::Path.supports_path_flavor());
        assert!(!Strategy::Text.supports_path_flavor());
        assert!(!Strategy::Ip.supports_locale());
        assert!(!Strategy::Network.supports_locale());
        assert!(Strategy::NumberedText.supports_locale());
        assert!("bogus".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_text_sort() {
        check_text_cases(Strategy::Text);
    }

    #[test]
    fn test_numbered_text_sort_handles_plain_text() {
        check_text_cases(Strategy::NumberedText);
    }

    #[test]
    fn test_numbered_text_sort() {
        let numbered = &["120001 go", "0. bears", "15 - above", "5. And", "1. all", "2. home"];
        let ascending = &["0. bears", "1. all", "2. home", "5. And", "15 - above", "120001 go"];
        let descending = &["120001 go", "15 - above", "5. And", "2. home", "1. all", "0. bears"];
        let p = params;
        let s = Strategy::NumberedText;

        check_case(s, numbered, ascending, &p(None, false, false));
        check_case(s, numbered, ascending, &p(None, true, false));
        check_case(s, numbered, descending, &p(None, false, true));
        check_case(s, numbered, descending, &p(None, true, true));

        let zoo = &["3. zoo", "1. foo", "2. öoo", "2. zoo"];
        check_case(s, zoo, &["1. foo", "2. öoo", "2. zoo", "3. zoo"], &p(Some("de"), false, false));
        check_case(s, zoo, &["3. zoo", "2. zoo", "2. öoo", "1. foo"], &p(Some("de"), false, true));
        check_case(s, zoo, &["1. foo", "2. zoo", "2. öoo", "3. zoo"], &p(Some("sv"), false, false));
        check_case(s, zoo, &["3. zoo", "2. öoo", "2. zoo", "1. foo"], &p(Some("sv"), false, true));

        let mixed = &["10. x", "aloe", "27. bar", "love", "1. hello"];
        check_case(s, mixed, &["1. hello", "10. x", "27. bar", "aloe", "love"], &p(None, false, false));
        check_case(s, mixed, &["love", "aloe", "27. bar", "10. x", "1. hello"], &p(None, false, true));

        let decimals = &["10.1 - x", "27.2314 - bar", "1.00 - hello"];
        check_case(s, decimals, &["1.00 - hello", "10.1 - x", "27.2314 - bar"], &p(None, false, false));
        check_case(s, decimals, &["27.2314 - bar", "10.1 - x", "1.00 - hello"], &p(None, false, true));
    }

    #[test]
    fn test_numbered_line_parse() {
        let ordinal = StringComparer::new(None, false, false).expect("comparer");
        let line = NumberedLine::parse("12.5 apples", &ordinal);
        assert_eq!(line.number, Some(12.5));
        assert_eq!(line.rest, " apples");

        let bare = NumberedLine::parse("12", &ordinal);
        assert_eq!(bare.number, Some(12.0));
        assert_eq!(bare.rest, "");

        let trailing_dot = NumberedLine::parse("3.", &ordinal);
        assert_eq!(trailing_dot.number, Some(3.0));
        assert_eq!(trailing_dot.rest, ".");

        let signed = NumberedLine::parse("-4 below", &ordinal);
        assert_eq!(signed.number, None);
        assert_eq!(signed.rest, "-4 below");

        let empty = NumberedLine::parse("", &ordinal);
        assert_eq!(empty.number, None);
        assert_eq!(empty.rest, "");

        let folded = StringComparer::new(None, true, false).expect("comparer");
        let shouting = NumberedLine::parse("7 APPLES", &folded);
        assert_eq!(shouting.number, Some(7.0));
        assert_eq!(shouting.rest, " apples");
    }

    #[test]
    fn test_path_key_folds_elements_once() {
        let folded = StringComparer::new(None, true, false).expect("comparer");
        let key = PathKey::new("/Usr/LOCAL/Bin", PathFlavor::Posix, &folded);
        assert!(key.absolute);
        assert_eq!(key.elements, ["/", "usr", "local", "bin"]);

        let win = PathKey::new(r"C:\Program Files", PathFlavor::Windows, &folded);
        assert_eq!(win.drive.as_deref(), Some("C:"));
        assert_eq!(win.elements, [r"c:\", "program files"]);
    }

    #[test]
    fn test_equal_numbers_fall_back_to_text() {
        check_case(
            Strategy::NumberedText,
            &["2.0 b", "2 a", "2.00 c"],
            &["2 a", "2.0 b", "2.00 c"],
            &params(None, false, false),
        );
    }

    #[test]
    fn test_path_sort() {
        let p = params;
        let s = Strategy::Path;

        let input = &["/foo", "/bar", "baz/quux", "a/q", "C:\\", "/X", "/A"];
        check_case(s, input, &["/A", "/X", "/bar", "/foo", "C:\\", "a/q", "baz/quux"], &p(None, false, false));
        check_case(s, input, &["/A", "/bar", "/foo", "/X", "C:\\", "a/q", "baz/quux"], &p(None, true, false));
        check_case(s, input, &["baz/quux", "a/q", "C:\\", "/foo", "/bar", "/X", "/A"], &p(None, false, true));
        check_case(s, input, &["baz/quux", "a/q", "C:\\", "/X", "/foo", "/bar", "/A"], &p(None, true, true));

        let depth = &["/zzz", "/bbb", "/xxx/a", "/aaaaaa/q/r"];
        check_case(s, depth, &["/bbb", "/zzz", "/xxx/a", "/aaaaaa/q/r"], &p(None, false, false));
        check_case(s, depth, &["/aaaaaa/q/r", "/xxx/a", "/zzz", "/bbb"], &p(None, false, true));

        let german = &["/foo", "/bar", "baz/quux", "/zoo", "/öoo", "a/q", "C:\\", "/X", "/A"];
        check_case(
            s,
            german,
            &["/A", "/bar", "/foo", "/öoo", "/X", "/zoo", "C:\\", "a/q", "baz/quux"],
            &p(Some("de"), false, false),
        );
        check_case(
            s,
            german,
            &["baz/quux", "a/q", "C:\\", "/zoo", "/X", "/öoo", "/foo", "/bar", "/A"],
            &p(Some("de"), false, true),
        );
    }

    #[test]
    fn test_windows_path_sort() {
        let input = &[r"C:\foo", r"\a\b", r"\b", r"C:\bar", r"E:\a", r"B:\x", r"C:\a\b\c", r"C:\a\b"];
        check_case(
            Strategy::Path,
            input,
            &[r"B:\x", r"C:\bar", r"C:\foo", r"C:\a\b", r"C:\a\b\c", r"E:\a", r"\b", r"\a\b"],
            &windows(false),
        );
        check_case(
            Strategy::Path,
            input,
            &[r"\a\b", r"\b", r"E:\a", r"C:\a\b\c", r"C:\a\b", r"C:\foo", r"C:\bar", r"B:\x"],
            &windows(true),
        );
    }

    #[test]
    fn test_windows_drive_relative_paths() {
        check_case(
            Strategy::Path,
            &["x", r"D:y", r"C:z\w", r"C:\a"],
            &[r"C:\a", r"C:z\w", r"D:y", "x"],
            &windows(false),
        );
    }

    #[test]
    fn test_ip_sort() {
        let p = params;
        let s = Strategy::Ip;

        let v4 = &["1.1.1.1", "0.1.255.255", "123.100.125.242", "1.255.0.0"];
        check_case(s, v4, &["0.1.255.255", "1.1.1.1", "1.255.0.0", "123.100.125.242"], &p(None, false, false));
        check_case(s, v4, &["123.100.125.242", "1.255.0.0", "1.1.1.1", "0.1.255.255"], &p(None, false, true));

        let v6 = &["::1", "::0", "9876::fe01:1234:457f", "1234::"];
        check_case(s, v6, &["::0", "::1", "1234::", "9876::fe01:1234:457f"], &p(None, false, false));
        check_case(s, v6, &["9876::fe01:1234:457f", "1234::", "::1", "::0"], &p(None, false, true));

        let mixed = &["::1", "::0", "255.255.255.255", "::1234", "9876::fe01:1234:457f", "1.2.3.4", "1234::"];
        check_case(
            s,
            mixed,
            &["1.2.3.4", "255.255.255.255", "::0", "::1", "::1234", "1234::", "9876::fe01:1234:457f"],
            &p(None, false, false),
        );
        check_case(
            s,
            mixed,
            &["9876::fe01:1234:457f", "1234::", "::1234", "::1", "::0", "255.255.255.255", "1.2.3.4"],
            &p(None, false, true),
        );
    }

    #[test]
    fn test_ip_sort_rejects_bad_line() {
        let mut input = lines(&["1.2.3.4", "not an ip", "4.3.2.1"]);
        let err = Strategy::Ip
            .sort(&mut input, &params(None, false, false))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid IP address 'not an ip' at line 2");
        assert!(matches!(err, SortError::InvalidIpAddress { line: 2, .. }));
        assert_eq!(input, lines(&["1.2.3.4", "not an ip", "4.3.2.1"]));

        let err = Strategy::Ip
            .is_sorted(&input, &params(None, false, false))
            .unwrap_err();
        assert!(matches!(err, SortError::InvalidIpAddress { line: 2, .. }));
    }

    #[test]
    fn test_network_sort() {
        let p = params;
        let s = Strategy::Network;

        let v4 = &["1.1.1.1/32", "0.1.255.0/24", "123.100.125.0/25", "1.255.0.0/17", "1.255.0.0/16"];
        check_case(
            s,
            v4,
            &["0.1.255.0/24", "1.1.1.1/32", "1.255.0.0/16", "1.255.0.0/17", "123.100.125.0/25"],
            &p(None, false, false),
        );
        check_case(
            s,
            v4,
            &["123.100.125.0/25", "1.255.0.0/17", "1.255.0.0/16", "1.1.1.1/32", "0.1.255.0/24"],
            &p(None, false, true),
        );

        let v6 = &["::1/128", "::0/127", "::0/42", "9876::fe01:1234:0/24", "1234::/90"];
        check_case(
            s,
            v6,
            &["::0/42", "::0/127", "::1/128", "1234::/90", "9876::fe01:1234:0/24"],
            &p(None, false, false),
        );
        check_case(
            s,
            v6,
            &["9876::fe01:1234:0/24", "1234::/90", "::1/128", "::0/127", "::0/42"],
            &p(None, false, true),
        );

        let mixed = &[
            "::1/128",
            "::0/127",
            "1.2.3.0/18",
            "::0/42",
            "1.2.3.0/16",
            "9876::fe01:1234:0/24",
            "255.255.255.0/25",
            "1234::/90",
        ];
        check_case(
            s,
            mixed,
            &[
                "1.2.3.0/16",
                "1.2.3.0/18",
                "255.255.255.0/25",
                "::0/42",
                "::0/127",
                "::1/128",
                "1234::/90",
                "9876::fe01:1234:0/24",
            ],
            &p(None, false, false),
        );
        check_case(
            s,
            mixed,
            &[
                "9876::fe01:1234:0/24",
                "1234::/90",
                "::1/128",
                "::0/127",
                "::0/42",
                "255.255.255.0/25",
                "1.2.3.0/18",
                "1.2.3.0/16",
            ],
            &p(None, false, true),
        );
    }

    #[test]
    fn test_network_sort_errors() {
        let p = params(None, false, false);

        let mut input = lines(&["1.2.3.4/32", "not a network", "4.3.2.0/24"]);
        let err = Strategy::Network.sort(&mut input, &p).unwrap_err();
        assert!(matches!(err, SortError::InvalidNetworkAddress { line: 2, .. }));
        assert!(err.to_string().contains("not a network"));

        for bad_prefix in ["1.1.1.1/-1", "1.1.1.1/33", "::1/129", "1.1.1.1/", "1.1.1.1/+8", "1.1.1.1/999"] {
            let mut input = lines(&["1.2.3.4/32", bad_prefix]);
            let err = Strategy::Network.sort(&mut input, &p).unwrap_err();
            assert!(
                matches!(err, SortError::InvalidPrefixLength { line: 2, .. }),
                "{bad_prefix}: {err}"
            );
            assert!(err.to_string().contains(bad_prefix));
        }

        let mut input = lines(&["300.1.1.1/8"]);
        let err = Strategy::Network.sort(&mut input, &p).unwrap_err();
        assert!(matches!(err, SortError::InvalidNetworkAddress { line: 1, .. }));
    }

    #[test]
    fn test_network_masks_host_bits() {
        let net = Network::parse_line("123.100.125.242/25", 1).expect("network");
        assert_eq!(net.base(), "123.100.125.128".parse::<IpAddr>().expect("addr"));
        assert_eq!(net.prefix(), 25);
        assert_eq!(net.to_string(), "123.100.125.128/25");

        let all = Network::parse_line("10.0.0.1/0", 1).expect("network");
        assert_eq!(all.base(), "0.0.0.0".parse::<IpAddr>().expect("addr"));

        let v6 = Network::parse_line("9876::fe01:1234:0/24", 1).expect("network");
        assert_eq!(v6.base(), "9876::".parse::<IpAddr>().expect("addr"));
    }

    #[test]
    fn test_datetime_text_keeps_input_order() {
        let input = &["2020-01-02 b", "2019-05-06 a", "garbage"];
        let mut sorted = lines(input);
        Strategy::DatetimeText
            .sort(&mut sorted, &params(None, false, true))
            .expect("no-op sort");
        assert_eq!(sorted, lines(input));
        assert!(Strategy::DatetimeText
            .is_sorted(&sorted, &params(None, false, false))
            .expect("no-op check"));
    }

    #[test]
    fn test_is_sorted_detects_disorder() {
        let p = params(None, false, false);
        assert!(!Strategy::Text.is_sorted(&lines(&["b", "a"]), &p).expect("check"));
        assert!(Strategy::Text.is_sorted(&lines(&["a", "a", "b"]), &p).expect("check"));
        assert!(Strategy::Text.is_sorted(&[], &p).expect("check"));
        assert!(Strategy::Ip.is_sorted(&lines(&["10.0.0.1"]), &p).expect("check"));
    }

    #[test]
    fn test_reverse_flips_every_pair() {
        let input = lines(&["/b", "a/b", "/a/c", "/a", "b", "10. x", "2 y"]);
        for strategy in [Strategy::Text, Strategy::NumberedText, Strategy::Path] {
            let forward = strategy.comparator(&input, &params(None, false, false)).expect("comparator");
            let backward = strategy.comparator(&input, &params(None, false, true)).expect("comparator");
            for a in 0..input.len() {
                for b in 0..input.len() {
                    assert_eq!(forward(a, b), backward(a, b).reverse(), "{strategy}: {a} vs {b}");
                    assert_eq!(forward(a, b), forward(b, a).reverse(), "{strategy}: {a} vs {b}");
                }
            }
        }
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let mut input = lines(&["B", "b", "A", "a"]);
        Strategy::Text
            .sort(&mut input, &params(None, true, false))
            .expect("sort");
        assert_eq!(input, lines(&["A", "a", "B", "b"]));
    }
}
