#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use lineage_core::config::{self, LineageConfig};
use lineage_core::error::ErrorCode;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "lineage",
    author,
    version,
    about = "lineage: descent, connectivity and duplicate queries over GEDCOM trees",
    long_about = None
)]
struct Cli {
    /// GEDCOM file to read.
    #[arg(short, long, global = true, env = "LINEAGE_FILE", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Output format (default: pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress malformed-line warnings and non-error logs.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Queries",
        about = "List every line of descent between two individuals",
        long_about = "Resolve the ancestor and descendant (by id or name) and print every \
                      parent-to-child chain linking them, descendant first.",
        after_help = "EXAMPLES:\n    # All lines from a great-grandfather\n    lineage -f tree.ged path -a \"Anders Holm\" -d @I42@\n\n    # Only lines through a given grandmother\n    lineage -f tree.ged path -a @I1@ -d @I42@ --via \"Ane Berg\"\n\n    # Graphviz output\n    lineage -f tree.ged path -a @I1@ -d @I42@ --dot | dot -Tsvg > lines.svg"
    )]
    Path(cmd::path::PathArgs),

    #[command(
        next_help_heading = "Queries",
        about = "List individuals not connected to a root individual",
        after_help = "EXAMPLES:\n    # Anyone with no relation at all to the root\n    lineage -f tree.ged unconnected --root @I1@\n\n    # Anyone outside the root's direct ancestors and descendants\n    lineage -f tree.ged unconnected --root @I1@ --direct"
    )]
    Unconnected(cmd::unconnected::UnconnectedArgs),

    #[command(
        next_help_heading = "Queries",
        about = "Find the most similar pairs of possibly duplicated individuals",
        after_help = "EXAMPLES:\n    # Top 10 pairs\n    lineage -f tree.ged dups\n\n    # Top 25, allowing a wider birth-year gap\n    lineage -f tree.ged dups --top 25 --max-year-gap 8\n\n    # Emit machine-readable output\n    lineage -f tree.ged dups --format json"
    )]
    Dups(cmd::dups::DupsArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Show one individual with parents, spouses and children",
        after_help = "EXAMPLES:\n    # By id\n    lineage -f tree.ged show @I12@\n\n    # By name, closest match\n    lineage -f tree.ged show \"ane hansdatter\""
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Inspect",
        about = "Count individuals, families and malformed lines",
        after_help = "EXAMPLES:\n    lineage -f tree.ged stats"
    )]
    Stats,

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Bash\n    lineage completions bash > ~/.local/share/bash-completion/completions/lineage\n\n    # Zsh\n    lineage completions zsh > ~/.zfunc/_lineage"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

/// Filter used when `LINEAGE_LOG` is unset.
///
/// Per-line parser warnings are muted: the load summary reports them, and
/// `--quiet` drops everything below error.
fn default_filter(verbose: bool, debug: bool, quiet: bool) -> &'static str {
    if quiet {
        "lineage=error,error"
    } else if verbose || debug {
        "lineage=debug,info,lineage_core::record=error"
    } else {
        "lineage=info,warn,lineage_core::record=error"
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("LINEAGE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(default_filter(verbose, env::var("DEBUG").is_ok(), quiet))
    });

    let format = env::var("LINEAGE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, config: &LineageConfig, output: OutputMode) -> anyhow::Result<()> {
    let ctx = cmd::Context {
        file: cli.file.as_deref(),
        output,
        quiet: cli.quiet,
        config,
    };

    match &cli.command {
        Commands::Path(args) => cmd::path::run_path(args, &ctx),
        Commands::Unconnected(args) => cmd::unconnected::run_unconnected(args, &ctx),
        Commands::Dups(args) => cmd::dups::run_dups(args, &ctx),
        Commands::Show(args) => cmd::show::run_show(args, &ctx),
        Commands::Stats => cmd::stats::run_stats(&ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = match env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|dir| config::load_config(&dir))
    {
        Ok(config) => config,
        Err(err) => {
            let mode = resolve_output_mode(cli.format, cli.json, &LineageConfig::default());
            let error = CliError::with_code(format!("{err:#}"), ErrorCode::ConfigParseError);
            let _ = render_error(mode, &error);
            return ExitCode::FAILURE;
        }
    };
    let output = resolve_output_mode(cli.format, cli.json, &config);
    debug!(output = output.as_str(), "output mode resolved");

    match run(&cli, &config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            let _ = render_error(output, &CliError::from(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_flag_is_global() {
        let cli = Cli::parse_from(["lineage", "stats", "--file", "tree.ged"]);
        assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("tree.ged")));
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn json_flag_is_hidden_alias() {
        let cli = Cli::parse_from(["lineage", "dups", "--json"]);
        assert!(cli.json);
        assert!(cli.format.is_none());
    }

    #[test]
    fn format_flag_accepts_value_enum() {
        let cli = Cli::parse_from(["lineage", "--format", "pretty", "stats"]);
        assert_eq!(cli.format, Some(OutputMode::Pretty));
        assert!(Cli::try_parse_from(["lineage", "--format", "yaml", "stats"]).is_err());
    }

    #[test]
    fn path_accepts_repeated_via() {
        let cli = Cli::parse_from([
            "lineage", "path", "-a", "@I1@", "-d", "Ane Berg", "--via", "@I2@", "--via", "@I3@",
            "--dot",
        ]);
        let Commands::Path(args) = cli.command else {
            panic!("expected path");
        };
        assert_eq!(args.ancestor, "@I1@");
        assert_eq!(args.descendant, "Ane Berg");
        assert_eq!(args.via, vec!["@I2@", "@I3@"]);
        assert!(args.dot);
    }

    #[test]
    fn path_requires_both_endpoints() {
        assert!(Cli::try_parse_from(["lineage", "path", "-a", "@I1@"]).is_err());
    }

    #[test]
    fn dups_flags() {
        let cli = Cli::parse_from([
            "lineage",
            "dups",
            "--top",
            "3",
            "--max-year-gap",
            "8",
            "--allow-undated",
        ]);
        let Commands::Dups(args) = cli.command else {
            panic!("expected dups");
        };
        assert_eq!(args.top, Some(3));
        assert_eq!(args.max_year_gap, Some(8));
        assert!(args.allow_undated);
    }

    #[test]
    fn unconnected_direct_flag() {
        let cli = Cli::parse_from(["lineage", "-q", "unconnected", "--root", "@I1@", "--direct"]);
        assert!(cli.quiet);
        let Commands::Unconnected(args) = cli.command else {
            panic!("expected unconnected");
        };
        assert!(args.direct);
        assert_eq!(args.root, "@I1@");
    }

    #[test]
    fn command_is_named_after_the_binary() {
        assert_eq!(Cli::command().get_name(), "lineage");
    }

    #[test]
    fn default_filter_mutes_per_line_parser_warnings() {
        for (verbose, debug) in [(false, false), (true, false), (false, true)] {
            let filter = default_filter(verbose, debug, false);
            assert!(filter.ends_with(",lineage_core::record=error"), "{filter}");
        }
        assert!(default_filter(true, false, false).starts_with("lineage=debug"));
        assert!(default_filter(false, false, false).starts_with("lineage=info"));
    }

    #[test]
    fn quiet_filter_keeps_only_errors() {
        assert_eq!(default_filter(false, false, true), "lineage=error,error");
        assert_eq!(default_filter(true, true, true), "lineage=error,error");
        assert!(EnvFilter::try_new(default_filter(false, false, true)).is_ok());
        assert!(EnvFilter::try_new(default_filter(false, false, false)).is_ok());
    }
}
