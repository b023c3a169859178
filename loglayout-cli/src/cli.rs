//! CLI argument parsing using clap derive API
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// loglayout -- render structured log events as paginated HTML tables.
///
/// Use `loglayout <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "loglayout", version, about, long_about = None)]
pub struct Cli {
    /// Path to the loglayout.toml configuration file.
    ///
    /// A missing file is not an error: built-in defaults apply.
    #[arg(short, long, default_value = "loglayout.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a JSON-lines event file into an HTML document.
    Render(RenderArgs),

    /// List the table columns a conversion pattern produces.
    Columns(ColumnsArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

// ---- render ----

/// Render events (one JSON object per line) through the HTML layout.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON-lines input file (`-` reads stdin).
    #[arg(short, long)]
    pub input: PathBuf,

    /// Destination HTML file (default: stdout).
    #[arg(short = 'O', long = "out")]
    pub out: Option<PathBuf>,

    /// Override the conversion pattern from the configuration.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Override the document title.
    #[arg(long)]
    pub title: Option<String>,

    /// Override the number of rows per table.
    #[arg(long)]
    pub row_limit: Option<usize>,
}

// ---- columns ----

/// Show the header cells a pattern would produce.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    /// Conversion pattern (e.g. `%date%level%msg`).
    pub pattern: String,
}

// ---- config ----

/// Manage loglayout configuration.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors.
    Validate,
    /// Show the effective configuration (file + env overrides + defaults).
    Show {
        /// Show only a specific section (general, layout).
        #[arg(long)]
        section: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_render_minimal() {
        let cli = Cli::try_parse_from(["loglayout", "render", "--input", "events.jsonl"])
            .expect("should parse render");
        assert_eq!(cli.config, PathBuf::from("loglayout.toml"));
        assert_eq!(cli.output, OutputFormat::Text);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.input, PathBuf::from("events.jsonl"));
                assert!(args.out.is_none(), "out should default to stdout");
                assert!(args.pattern.is_none());
                assert!(args.title.is_none());
                assert!(args.row_limit.is_none());
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_render_overrides() {
        let cli = Cli::try_parse_from([
            "loglayout",
            "render",
            "-i",
            "-",
            "--out",
            "report.html",
            "--pattern",
            "%level%msg",
            "--title",
            "Audit",
            "--row-limit",
            "2",
        ])
        .expect("should parse render overrides");
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.input, PathBuf::from("-"));
                assert_eq!(args.out, Some(PathBuf::from("report.html")));
                assert_eq!(args.pattern.as_deref(), Some("%level%msg"));
                assert_eq!(args.title.as_deref(), Some("Audit"));
                assert_eq!(args.row_limit, Some(2));
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn test_cli_parse_render_requires_input() {
        let result = Cli::try_parse_from(["loglayout", "render"]);
        assert!(result.is_err(), "render without --input should fail");
    }

    #[test]
    fn test_cli_parse_render_rejects_negative_row_limit() {
        let result = Cli::try_parse_from([
            "loglayout",
            "render",
            "--input",
            "a.jsonl",
            "--row-limit",
            "-3",
        ]);
        assert!(result.is_err(), "negative row limit should be rejected");
    }

    #[test]
    fn test_cli_parse_columns() {
        let cli = Cli::try_parse_from(["loglayout", "columns", "%level%msg"])
            .expect("should parse columns");
        match cli.command {
            Commands::Columns(args) => assert_eq!(args.pattern, "%level%msg"),
            _ => panic!("expected Columns command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show_section() {
        let cli = Cli::try_parse_from(["loglayout", "config", "show", "--section", "layout"])
            .expect("should parse config show");
        match cli.command {
            Commands::Config(args) => match args.action {
                ConfigAction::Show { section } => assert_eq!(section.as_deref(), Some("layout")),
                ConfigAction::Validate => panic!("expected Show action"),
            },
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "loglayout",
            "config",
            "validate",
            "--output",
            "json",
            "--log-level",
            "debug",
        ])
        .expect("global flags should be accepted after the subcommand");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_cli_parse_custom_config_path() {
        let cli = Cli::try_parse_from(["loglayout", "-c", "/etc/loglayout.toml", "config", "validate"])
            .expect("should parse custom config path");
        assert_eq!(cli.config, PathBuf::from("/etc/loglayout.toml"));
    }

    #[test]
    fn test_cli_parse_unknown_output_format() {
        let result = Cli::try_parse_from(["loglayout", "--output", "yaml", "config", "validate"]);
        assert!(result.is_err(), "unknown output format should be rejected");
    }
}
