use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "pathpick",
    about = "A fast fuzzy path matcher for interactive file navigation"
)]
pub struct Cli {
    /// The abbreviation to match candidate paths against
    #[arg(required_unless_present = "completions")]
    pub abbrev: Option<String>,

    /// Directory to scan for candidates
    #[arg(short = 'd', long, default_value = ".")]
    pub dir: PathBuf,

    /// Number of results to return (0 = unlimited)
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,

    /// Worker threads for scoring (default: one per core)
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Match case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Strip spaces from the abbreviation before matching
    #[arg(long)]
    pub ignore_spaces: bool,

    /// Do not sort; results keep scan order
    #[arg(long)]
    pub no_sort: bool,

    /// Commit to the first alignment found instead of searching for the
    /// best-scoring one
    #[arg(long)]
    pub no_recurse: bool,

    /// Always show dot files
    #[arg(long, conflicts_with = "hide_dot_files")]
    pub show_dot_files: bool,

    /// Never show dot files
    #[arg(long)]
    pub hide_dot_files: bool,

    /// Descend into dot directories while scanning
    #[arg(long)]
    pub scan_dot_directories: bool,

    /// Stop scanning after this many files (0 = unlimited)
    #[arg(long, default_value = "30000")]
    pub max_files: usize,

    /// Maximum directory depth below the scan root
    #[arg(long, default_value = "15")]
    pub max_depth: usize,

    /// Glob pattern for paths to exclude from scanning (repeatable)
    #[arg(long = "ignore", value_name = "GLOB")]
    pub ignore: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, hide = true)]
    pub completions: Option<Shell>,
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "pathpick", &mut std::io::stdout());
}
