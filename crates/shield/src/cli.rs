//! Clap derive structures for the `koala-shield` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// koala-shield -- block whole autonomous systems with AWS WAF
#[derive(Debug, Parser)]
#[command(
    name = "koala-shield",
    version,
    about = "Block the IP prefixes announced by an ASN using AWS WAF Classic",
    long_about = "Resolve IP addresses and ASNs through bgpview.io, and turn an ASN's\n\
        announced IPv4 prefixes into a WAF Classic (regional) IP set attached\n\
        to the KOALA-SHIELD-BLOCK-LIST rule.",
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
    /// AWS region of the WAF Classic Regional resources [default: us-east-1]
    #[arg(long, env = "AWS_REGION", global = true)]
    pub aws_region: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// AWS operation timeout in seconds [default: 30]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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
    /// Block all the prefixes owned by an ASN using an AWS WAF IP set
    Block(AsnArgs),

    /// Detach an ASN's IP set from the block rule
    #[command(alias = "unblock")]
    UnBlock(AsnArgs),

    /// List the AWS WAF Classic IP sets in the region
    #[command(alias = "ip-sets")]
    Ipsets,

    /// Look up information about IP addresses and ASNs
    Lookup(LookupArgs),

    /// Inspect CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Block / Lookup ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AsnArgs {
    /// ASNs to act on, e.g. 20473 or AS20473 (processed in order)
    #[arg(required = true, value_name = "ASN")]
    pub asns: Vec<String>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// IP addresses or ASNs to describe
    #[arg(required = true, value_name = "RECORD")]
    pub records: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file + environment)
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
