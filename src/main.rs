//! Command line front end for linesort

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use linesort::{
    config::{SortConfig, SortConfigBuilder},
    error::SortResult,
    sort,
    strategy::{Strategy, CATALOG},
    terminal, EXIT_SUCCESS,
};

fn main() {
    let matches = build_cli(terminal::terminal_width()).get_matches();

    if matches.get_flag("docs") {
        print!("{}", terminal::extended_docs(terminal::terminal_width()));
        process::exit(EXIT_SUCCESS);
    }

    let config = match parse_config_from_matches(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
    };

    init_tracing(&config);

    match run(&config) {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) if e.is_not_sorted() => {
            eprintln!("{e}");
            process::exit(e.exit_code());
        }
        Err(e) => {
            eprintln!("error when sorting {}: {}", config.file_display(), e);
            process::exit(e.exit_code());
        }
    }
}

fn run(config: &SortConfig) -> SortResult<i32> {
    debug!(?config, "parsed options");
    sort(config)
}

/// `--debug` wins over `RUST_LOG`, which defaults to `warn`
fn log_filter(config: &SortConfig) -> EnvFilter {
    if config.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn init_tracing(config: &SortConfig) {
    let filter = log_filter(config);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_cli(width: usize) -> Command {
    let names: Vec<&'static str> = CATALOG.iter().map(|d| d.name).collect();

    Command::new("linesort")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Sort the lines of a file as text, numbered text, paths, IP addresses or networks")
        .after_help(terminal::strategy_overview(width))
        // Nothing is marked required so that --docs works on its own;
        // SortConfig::validate reports what is missing.
        .arg(Arg::new("sort")
            .short('s')
            .long("sort")
            .help("The type of sorting to use. See below for options.")
            .value_name("METHOD")
            .value_parser(names))
        .arg(Arg::new("locale")
            .short('l')
            .long("locale")
            .help("The locale to use for sorting. Without one, lines are sorted in code point order.")
            .value_name("LOCALE"))
        .arg(Arg::new("case-insensitive")
            .short('c')
            .long("case-insensitive")
            .help("Sort case-insensitively. Many locales ignore case at this level anyway, so with a locale the output may be case-insensitive regardless.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Sort in reverse order.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("windows")
            .long("windows")
            .help("Parse paths as Windows paths for path sort.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Drop duplicate lines. With --check, duplicates mean the file is not sorted.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("in-place")
            .short('i')
            .long("in-place")
            .help("Modify the file in place instead of making a backup.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("stdout")
            .long("stdout")
            .help("Print the sorted output to stdout instead of rewriting the file.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("check")
            .long("check")
            .help("Check that the file is sorted instead of sorting it. If it is not sorted the exit status is 1.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("debug")
            .long("debug")
            .help("Print debugging information to stderr while running.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("docs")
            .long("docs")
            .help("Print extended documentation for every sorting method.")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("file")
            .help("The file to sort.")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf)))
}

fn parse_config_from_matches(matches: &ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(name) = matches.get_one::<String>("sort") {
        builder = builder.strategy(name.parse::<Strategy>()?);
    }
    if let Some(locale) = matches.get_one::<String>("locale") {
        if !locale.is_empty() {
            builder = builder.locale(locale);
        }
    }
    if let Some(file) = matches.get_one::<PathBuf>("file") {
        builder = builder.file(file.clone());
    }

    if matches.get_flag("case-insensitive") {
        builder = builder.case_insensitive();
    }
    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("windows") {
        builder = builder.windows();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("in-place") {
        builder = builder.in_place();
    }
    if matches.get_flag("stdout") {
        builder = builder.to_stdout();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }
    if matches.get_flag("debug") {
        builder = builder.debug();
    }

    builder.build()
}
