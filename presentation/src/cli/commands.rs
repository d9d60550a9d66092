//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use huddle_domain::{ContactableConfig, ResponseOption};
use std::path::PathBuf;

/// Output format for run results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary, per-participant tally and every result
    Full,
    /// One line per result
    Results,
    /// The outcome as JSON
    Json,
}

impl From<OutputFormat> for huddle_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => huddle_domain::OutputFormat::Full,
            OutputFormat::Results => huddle_domain::OutputFormat::Results,
            OutputFormat::Json => huddle_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for huddle
#[derive(Parser, Debug)]
#[command(name = "huddle")]
#[command(author, version, about = "Time-boxed response collection from a group of participants")]
#[command(long_about = r#"
huddle asks a group of participants for responses over their channels,
accepts up to a per-participant cap, and stops when everyone is done or
the time limit is reached.

Participants are given as TYPE:ID (for example cli:me or memory:p1).
The cli channel reads replies from this terminal.

Configuration files are loaded from (in priority order):
1. HUDDLE_* environment variables
2. --config <path>     Explicit config file
3. ./huddle.toml       Project-level config
4. ~/.config/huddle/config.toml   Global config

Example:
  huddle collect "What should we build next?" --max-responses 3
  huddle for-each -s "Tea is best" -s "Mornings are great" -O "Agree=a,y" -O "Disagree=d,n"
  huddle pairwise -s cats -s dogs -s fish --choice "Which pet?"
  huddle flow response_for_each --inputs inputs.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the configured format, then "results")
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Write the run transcript (JSONL) to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub transcript: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect free-text responses to a prompt
    Collect(CollectArgs),
    /// Collect a reaction to each statement from a fixed set of options
    ForEach(ForEachArgs),
    /// Collect a choice between every pair of statements
    Pairwise(PairwiseArgs),
    /// Run a flow component with JSON inputs and print its output events
    Flow(FlowArgs),
}

/// Arguments shared by the interactive subcommands
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Participant as TYPE:ID (repeatable)
    #[arg(short, long = "participant", value_name = "TYPE:ID", value_parser = parse_participant, default_value = "cli:me")]
    pub participants: Vec<ContactableConfig>,

    /// Seconds before the run stops on its own (defaults to the configured value)
    #[arg(short = 't', long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_time: Option<u64>,
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Prompt sent after the rules
    pub prompt: String,

    /// Responses each participant may give (defaults to the configured value, else unlimited)
    #[arg(short = 'n', long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_responses: Option<u64>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct ForEachArgs {
    /// Statement to react to (repeatable, presented in order)
    #[arg(short, long = "statement", value_name = "TEXT", required = true)]
    pub statements: Vec<String>,

    /// Response option as TEXT=TRIGGER[,TRIGGER...]; `*` matches anything (repeatable)
    #[arg(short = 'O', long = "option", value_name = "SPEC", value_parser = parse_option, required = true)]
    pub options: Vec<ResponseOption>,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct PairwiseArgs {
    /// Statement to compare (repeatable)
    #[arg(short, long = "statement", value_name = "TEXT", required = true)]
    pub statements: Vec<String>,

    /// Question shown before the first pair
    #[arg(short, long, default_value = "Which do you prefer?")]
    pub choice: String,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Args, Debug)]
pub struct FlowArgs {
    /// Component name: response_for_each, pairwise_comparison or collect_responses
    pub component: String,

    /// JSON object of named inputs; `-` reads standard input
    #[arg(short, long, value_name = "PATH", default_value = "-")]
    pub inputs: PathBuf,
}

fn parse_participant(value: &str) -> Result<ContactableConfig, String> {
    match value.split_once(':') {
        Some((kind, id)) if !kind.is_empty() && !id.is_empty() => {
            Ok(ContactableConfig::new(kind, id))
        }
        _ => Err(format!("expected TYPE:ID, got '{}'", value)),
    }
}

fn parse_option(value: &str) -> Result<ResponseOption, String> {
    ResponseOption::parse_spec(value).map_err(|e| e.to_string())
}
