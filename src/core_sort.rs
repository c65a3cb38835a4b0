use crate::config::{SortConfig, SortParams};
use crate::error::{SortContext, SortError, SortResult};
use crate::input::{read_lines, LineEnding};
use crate::strategy::Strategy;
use itertools::Itertools;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Sorts or checks a single file according to a validated configuration
pub struct CoreSort {
    config: SortConfig,
    strategy: Strategy,
    params: SortParams,
    file: PathBuf,
}

impl CoreSort {
    pub fn new(config: SortConfig) -> SortResult<Self> {
        config.validate()?;
        let strategy = config.strategy()?;
        let params = config.sort_params()?;
        let file = config
            .file
            .clone()
            .ok_or_else(|| SortError::internal("validated configuration has no file"))?;

        debug!(
            strategy = %strategy,
            locale = ?config.locale,
            case_insensitive = params.case_insensitive,
            reverse = params.reverse,
            path_flavor = ?params.path_flavor,
            unique = config.unique,
            file = %file.display(),
            "resolved configuration"
        );

        Ok(Self {
            config,
            strategy,
            params,
            file,
        })
    }

    pub fn run(&self) -> SortResult<()> {
        let input = read_lines(&self.file)?;

        if self.config.check {
            return self.check_lines(&input.lines);
        }

        let lines = self.sort_lines(input.lines)?;
        if self.config.to_stdout {
            let stdout = io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            write_lines(&mut out, &lines, input.ending)?;
            out.flush()?;
            Ok(())
        } else {
            self.replace_file(&lines, input.ending)
        }
    }

    /// Fails with [`SortError::NotSorted`] unless `lines` are in order.
    ///
    /// With `unique` set, adjacent duplicates also count as out of order.
    pub fn check_lines(&self, lines: &[String]) -> SortResult<()> {
        let ordered = self.strategy.is_sorted(lines, &self.params)?;
        let duplicated = self.config.unique && lines.iter().tuple_windows().any(|(a, b)| a == b);
        info!(
            file = %self.file.display(),
            ordered,
            duplicated,
            "checked sort order"
        );

        if ordered && !duplicated {
            Ok(())
        } else {
            Err(SortError::not_sorted(&self.config.file_display()))
        }
    }

    pub fn sort_lines(&self, mut lines: Vec<String>) -> SortResult<Vec<String>> {
        self.strategy.sort(&mut lines, &self.params)?;
        if self.config.unique {
            let before = lines.len();
            lines.dedup();
            debug!(removed = before - lines.len(), "dropped duplicate lines");
        }
        Ok(lines)
    }

    /// Path of the backup copy kept when not sorting in place
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.file.as_os_str());
        name.push(".bak");
        PathBuf::from(name)
    }

    fn replace_file(&self, lines: &[String], ending: LineEnding) -> SortResult<()> {
        let name = self.config.file_display();
        let dir = match self.file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).with_file_context(&dir.display().to_string())?;
        {
            let mut out = BufWriter::new(&mut tmp);
            write_lines(&mut out, lines, ending)?;
            out.flush()?;
        }

        let permissions = fs::metadata(&self.file).with_file_context(&name)?.permissions();
        fs::set_permissions(tmp.path(), permissions)?;

        if !self.config.in_place {
            let backup = self.backup_path();
            fs::copy(&self.file, &backup)
                .with_context(|| format!("error copying {} to {}", name, backup.display()))?;
            info!(backup = %backup.display(), "wrote backup");
        }

        tmp.persist(&self.file)
            .map_err(|e| e.error)
            .with_file_context(&name)?;
        info!(file = %name, lines = lines.len(), "wrote sorted file");
        Ok(())
    }
}

/// Write each line followed by `ending`
pub fn write_lines<W: Write>(out: &mut W, lines: &[String], ending: LineEnding) -> io::Result<()> {
    for line in lines {
        out.write_all(line.as_bytes())?;
        out.write_all(ending.as_bytes())?;
    }
    Ok(())
}
