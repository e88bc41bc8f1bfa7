//! Clap derive structures for the `enigmatv` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use enigmatv_core::ChannelType;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// enigmatv -- Live TV from Enigma2 receivers on the command line
#[derive(Debug, Parser)]
#[command(
    name = "enigmatv",
    version,
    about = "Browse channels, guide, recordings and timers of an Enigma2 receiver",
    long_about = "Talks to the OpenWebIf interface of an Enigma2 set-top box.\n\n\
        Lists the channels of a bouquet, the programme guide, recordings and\n\
        timers, schedules and cancels recordings, and resolves live stream URLs.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Receiver profile to use
    #[arg(long, short = 'p', env = "ENIGMATV_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Receiver hostname or IP (overrides profile)
    #[arg(long, short = 'H', env = "ENIGMATV_HOST", global = true)]
    pub host: Option<String>,

    /// Web interface port (overrides profile)
    #[arg(long, env = "ENIGMATV_WEB_PORT", global = true)]
    pub web_port: Option<u16>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ENIGMATV_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ENIGMATV_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the channels of the configured bouquet(s)
    #[command(alias = "ch")]
    Channels(ChannelsArgs),

    /// Show the programme guide of one channel
    #[command(alias = "epg")]
    Guide(GuideArgs),

    /// List and delete recordings
    #[command(alias = "rec")]
    Recordings(RecordingsArgs),

    /// List, add and cancel timers
    Timers(TimersArgs),

    /// Resolve the live stream of a channel
    Stream(StreamArgs),

    /// Show receiver status and tuners
    Status,

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Channels ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ChannelsArgs {
    /// Only show channels of this type (tv, radio)
    #[arg(long = "type", short = 't')]
    pub channel_type: Option<ChannelType>,
}

// ── Guide ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GuideArgs {
    /// Channel name or service reference
    pub channel: String,

    /// Hours of guide to show, from now
    #[arg(long, default_value = "24")]
    pub hours: u32,
}

// ── Recordings ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RecordingsArgs {
    #[command(subcommand)]
    pub command: RecordingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RecordingsCommand {
    /// List recordings, matched to catalog channels
    #[command(alias = "ls")]
    List,

    /// Delete a recording
    #[command(alias = "rm")]
    Delete {
        /// Recording id (its service reference)
        id: String,
    },
}

// ── Timers ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TimersArgs {
    #[command(subcommand)]
    pub command: TimersCommand,
}

#[derive(Debug, Subcommand)]
pub enum TimersCommand {
    /// List waiting and running timers
    #[command(alias = "ls")]
    List,

    /// Record a guide entry
    Add {
        /// Program id as printed by `guide`
        program: String,
    },

    /// Cancel a timer
    #[command(alias = "rm")]
    Cancel {
        /// Timer id as printed by `timers list`
        timer: String,
    },
}

// ── Stream ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Channel name or service reference
    pub channel: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Display current configuration (secrets masked)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
