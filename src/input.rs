//! Reading a file into lines while remembering how they were terminated

use crate::error::{SortContext, SortError, SortResult};
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Number of leading bytes inspected to pick a line ending
pub const DETECTION_WINDOW: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    CrLf,
}

impl LineEnding {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::Cr => b"\r",
            LineEnding::CrLf => b"\r\n",
        }
    }

    /// Pick the ending used in `data`, preferring CRLF, then CR, then LF.
    ///
    /// Only the first [`DETECTION_WINDOW`] bytes are looked at.
    pub fn detect(data: &[u8]) -> Option<Self> {
        let sample = &data[..data.len().min(DETECTION_WINDOW)];
        if sample.windows(2).any(|w| w == b"\r\n") {
            Some(LineEnding::CrLf)
        } else if sample.contains(&b'\r') {
            Some(LineEnding::Cr)
        } else if sample.contains(&b'\n') {
            Some(LineEnding::Lf)
        } else {
            None
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
            LineEnding::CrLf => "CRLF",
        };
        write!(f, "{name}")
    }
}

/// Lines of a file together with the ending they were split on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputLines {
    pub lines: Vec<String>,
    pub ending: LineEnding,
}

/// Memory-map `path` and split it into UTF-8 lines
pub fn read_lines(path: &Path) -> SortResult<InputLines> {
    let name = path.display().to_string();
    let file = File::open(path).with_file_context(&name)?;
    let len = file.metadata().with_file_context(&name)?.len();
    if len == 0 {
        return Err(SortError::empty_input(&name));
    }

    // SAFETY: the map is only read while this function runs and the file is
    // not modified by us until the lines have been copied out.
    let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
    let input = parse_lines(&mmap, &name)?;
    debug!(
        file = %name,
        bytes = len,
        ending = %input.ending,
        lines = input.lines.len(),
        "read input"
    );
    Ok(input)
}

/// Split `data` on its detected line ending. `name` is used in errors.
pub fn parse_lines(data: &[u8], name: &str) -> SortResult<InputLines> {
    if data.is_empty() {
        return Err(SortError::empty_input(name));
    }
    let ending = LineEnding::detect(data)
        .ok_or_else(|| SortError::unknown_line_ending(name, DETECTION_WINDOW))?;

    let lines = split_on(data, ending.as_bytes())
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            std::str::from_utf8(raw)
                .map(str::to_string)
                .map_err(|_| SortError::invalid_utf8(i + 1))
        })
        .collect::<SortResult<Vec<_>>>()?;

    Ok(InputLines { lines, ending })
}

/// A terminator at the very end does not produce an empty last line
fn split_on<'a>(data: &'a [u8], separator: &[u8]) -> Vec<&'a [u8]> {
    let mut pieces = Vec::new();
    let mut rest = data;
    while !rest.is_empty() {
        match rest.windows(separator.len()).position(|w| w == separator) {
            Some(i) => {
                pieces.push(&rest[..i]);
                rest = &rest[i + separator.len()..];
            }
            None => {
                pieces.push(rest);
                break;
            }
        }
    }
    pieces
}
