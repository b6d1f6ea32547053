use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use pathpick::{
    error, Matcher, MatcherOptions, ScanOptions, Scanner, SearchOptions,
};

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("PATHPICK_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    query: &'a str,
    result_count: usize,
    results: &'a [String],
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        cli::generate_completions(shell);
        return Ok(());
    }

    init_tracing(cli.verbose, cli.quiet);

    let scanner = Scanner::new(
        &cli.dir,
        ScanOptions {
            max_files: cli.max_files,
            max_depth: cli.max_depth,
            scan_dot_directories: cli.scan_dot_directories,
            ignore: cli.ignore.clone(),
        },
    )?;

    let mut matcher = Matcher::new(
        scanner,
        MatcherOptions {
            always_show_dot_files: cli.show_dot_files,
            never_show_dot_files: cli.hide_dot_files,
        },
    );

    let options = SearchOptions {
        case_sensitive: cli.case_sensitive,
        limit: cli.limit,
        workers: cli.threads.unwrap_or(0),
        sort: !cli.no_sort,
        ignore_spaces: cli.ignore_spaces,
        recurse: !cli.no_recurse,
    };

    let abbrev = cli.abbrev.as_deref().unwrap_or_default();
    let results = matcher.rank_for(abbrev, &options)?;

    if cli.json {
        let output = JsonOutput {
            query: abbrev,
            result_count: results.len(),
            results: &results,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for path in &results {
            println!("{path}");
        }
    }

    Ok(())
}
