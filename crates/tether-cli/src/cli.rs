use clap::{Parser, Subcommand, ValueEnum};

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

/// Top-level CLI parser for the `ttr` binary.
#[derive(Debug, Parser)]
#[command(name = "ttr", version, about = "Tether - submit product analyses and poll for results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Submit an analysis request and print its correlation handle
    Submit(SubmitArgs),
    /// One-shot status check for a submitted identifier
    Status(StatusArgs),
    /// Poll until the result arrives (or Ctrl-C)
    Watch(StatusArgs),
    /// Show locally recorded completed analyses
    History(HistoryArgs),
}

#[derive(Debug, clap::Args)]
pub struct SubmitArgs {
    /// Product model identifier (the correlation key)
    #[arg(long)]
    pub model: String,

    /// Competitor product reference (ASIN)
    #[arg(long)]
    pub asin: Option<String>,

    /// Product category
    #[arg(long)]
    pub category: Option<String>,

    /// Feature list, free text
    #[arg(long)]
    pub features: Option<String>,

    /// Usage scenario, free text
    #[arg(long)]
    pub scenario: Option<String>,

    /// Target audience, free text
    #[arg(long)]
    pub audience: Option<String>,

    /// Target price, free text
    #[arg(long)]
    pub price: Option<String>,

    /// Open user-concern questions from the competitor listing
    #[arg(long)]
    pub rufus_questions: Option<String>,

    /// Keep polling for the result after submitting
    #[arg(long)]
    pub watch: bool,
}

#[derive(Debug, clap::Args)]
pub struct StatusArgs {
    /// The submitted model identifier
    pub model: String,

    /// Store-assigned id of the request row (diagnostic status display)
    #[arg(long)]
    pub record_id: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct HistoryArgs {
    /// Max entries to show, newest last
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn submit_parses_all_fields() {
        let cli = Cli::try_parse_from([
            "ttr",
            "submit",
            "--model",
            "G7-Pro",
            "--asin",
            "B0C5T9JM59",
            "--price",
            "59.99",
            "--watch",
        ])
        .expect("cli should parse");

        match cli.command {
            Commands::Submit(args) => {
                assert_eq!(args.model, "G7-Pro");
                assert_eq!(args.asin.as_deref(), Some("B0C5T9JM59"));
                assert_eq!(args.price.as_deref(), Some("59.99"));
                assert!(args.watch);
                assert!(args.features.is_none());
            }
            _ => panic!("expected submit"),
        }
    }

    #[test]
    fn global_flags_parse_before_or_after_subcommand() {
        let cli = Cli::try_parse_from(["ttr", "--format", "table", "status", "G7-Pro"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Table);

        let cli = Cli::try_parse_from(["ttr", "status", "G7-Pro", "--format", "raw", "--quiet"])
            .expect("cli should parse");
        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn watch_takes_positional_model_and_record_id_flag() {
        let cli = Cli::try_parse_from(["ttr", "watch", "G7-Pro", "--record-id", "rec123"])
            .expect("cli should parse");
        match cli.command {
            Commands::Watch(args) => {
                assert_eq!(args.model, "G7-Pro");
                assert_eq!(args.record_id.as_deref(), Some("rec123"));
            }
            _ => panic!("expected watch"),
        }
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["ttr", "--format", "xml", "history"]);
        assert!(parsed.is_err());
    }
}
