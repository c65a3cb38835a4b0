//! Terminal width detection and text wrapping for help output

use crate::strategy::CATALOG;

/// Help text never grows wider than this
pub const MAX_WIDTH: usize = 90;

/// Used when stderr is not a terminal
pub const DEFAULT_WIDTH: usize = 80;

/// Best guess at the width to wrap help text to.
///
/// `COLUMNS` wins if set to a positive number, then the size of the terminal
/// on stderr. The result is capped at [`MAX_WIDTH`].
pub fn terminal_width() -> usize {
    let width = std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse::<usize>().ok())
        .filter(|&w| w > 0)
        .or_else(stderr_width)
        .unwrap_or(DEFAULT_WIDTH);
    width.min(MAX_WIDTH)
}

#[cfg(unix)]
fn stderr_width() -> Option<usize> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ only writes into the winsize we pass in.
    let rc = unsafe { libc::ioctl(libc::STDERR_FILENO, libc::TIOCGWINSZ, &mut size) };
    if rc == 0 && size.ws_col > 0 {
        Some(usize::from(size.ws_col))
    } else {
        None
    }
}

#[cfg(not(unix))]
fn stderr_width() -> Option<usize> {
    None
}

/// Greedy word wrap. Existing line breaks and blank lines are kept and a
/// word longer than `width` gets a line to itself.
pub fn wrap(text: &str, width: usize) -> String {
    let width = width.max(1);
    text.split('\n')
        .map(|line| wrap_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

fn wrap_line(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut current = 0;
    for word in line.split_whitespace() {
        let len = word.chars().count();
        if current > 0 && current + 1 + len > width {
            out.push('\n');
            current = 0;
        } else if current > 0 {
            out.push(' ');
            current += 1;
        }
        out.push_str(word);
        current += len;
    }
    out
}

/// Prefix the first line with `prefix` and align the rest under it
pub fn indent(text: &str, prefix: &str) -> String {
    let padding = " ".repeat(prefix.chars().count());
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{prefix}{line}")
            } else {
                format!("{padding}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One bullet per catalog strategy, wrapped to fit `width`
pub fn strategy_overview(width: usize) -> String {
    let longest = CATALOG.iter().map(|d| d.name.len()).max().unwrap_or(0);
    let prefix_len = "  * ".len() + longest + " - ".len();
    let text_width = width.saturating_sub(prefix_len).max(20);

    let mut docs = String::from("Sorting Options:\n");
    for descriptor in CATALOG.iter() {
        let prefix = format!("  * {:<longest$} - ", descriptor.name);
        docs.push_str(&indent(&wrap(descriptor.description, text_width), &prefix));
        docs.push('\n');
    }
    docs
}

/// Extended per-strategy documentation, wrapped to `width`
pub fn extended_docs(width: usize) -> String {
    wrap(EXTENDED_DOCS, width)
}

const EXTENDED_DOCS: &str = "\
Several sorting methods are available.

## text

Every line is compared as plain text. Ordering is controlled by the --locale, --case-insensitive and --reverse flags. Without a locale lines are compared by Unicode code point.

## numbered-text

Each line may start with a number, followed by any text. The number must come first, with no leading space, and is either an integer or a decimal such as 2.5 (no sign and no exponent).

Lines are ordered by their number first. Lines with equal numbers are ordered by the text after the number, in the same way as the text method. Lines without a number come after all numbered lines.

Accepts --locale, --case-insensitive and --reverse.

## datetime-text

Intended for lines that start with a date or datetime such as 2019-08-27T19:13:16. Lines are currently left in their original order.

Accepts --locale, --case-insensitive and --reverse.

## path

Every line is treated as a filesystem path and ordered as follows:

* absolute paths come before relative ones
* with --windows, paths carrying a drive letter come first, ordered by drive letter
* shallower paths come before deeper ones, so /z sorts before /a/a
* otherwise paths are compared element by element as text

Accepts --locale, --case-insensitive, --reverse and --windows.

## ip

Every line must be an IPv4 or IPv6 address. Addresses are ordered numerically and IPv4 addresses come before IPv6 addresses.

Accepts --reverse.

## network

Every line must be an IPv4 or IPv6 network in CIDR notation. Networks are ordered by base address. When two networks share a base address the larger one comes first, so 1.1.1.0/24 sorts before 1.1.1.0/28.

Accepts --reverse.
";
