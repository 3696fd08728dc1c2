//! Clap derive structures for the `nso` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of crate-internal imports so `build.rs` can include it directly.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nso -- drive a Cisco NSO orchestrator over RESTCONF
#[derive(Debug, Parser)]
#[command(
    name = "nso",
    version,
    about = "Manage NSO devices and loopback interfaces over RESTCONF",
    long_about = "A small RESTCONF client for Cisco NSO.\n\n\
        Registers devices, triggers SSH host-key fetch and sync-from, and\n\
        manages Cisco IOS loopback interfaces. `nso demo` runs the whole\n\
        provisioning walkthrough against a netsim device.",
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
    /// Connection profile to use
    #[arg(long, short = 'p', env = "NSO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// NSO hostname or IP (overrides profile)
    #[arg(long, env = "NSO_HOST", global = true)]
    pub host: Option<String>,

    /// RESTCONF port (overrides profile)
    #[arg(long, env = "NSO_PORT", global = true)]
    pub port: Option<u16>,

    /// RESTCONF username (overrides profile)
    #[arg(long, short = 'u', env = "NSO_USERNAME", global = true)]
    pub username: Option<String>,

    /// RESTCONF password
    #[arg(long, env = "NSO_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "NSO_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NSO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The selected output format, defaulting to a table.
    pub fn output_format(&self) -> OutputFormat {
        self.output.clone().unwrap_or(OutputFormat::Table)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
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
    /// Manage devices registered in NSO
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage Cisco IOS loopback interfaces on a device
    #[command(alias = "lo")]
    Loopbacks(LoopbacksArgs),

    /// Run the end-to-end provisioning walkthrough
    Demo(DemoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List device names
    #[command(alias = "ls")]
    List,

    /// Register a new device (admin-state unlocked)
    Create {
        /// Unique device name
        name: String,

        /// Management IP address of the device
        #[arg(long)]
        address: String,

        /// SSH port of the device
        #[arg(long, default_value = "22")]
        ssh_port: u16,

        /// NSO authgroup used to log into the device
        #[arg(long, default_value = "default")]
        authgroup: String,

        /// NED package, e.g. cisco-ios-cli-3.8
        #[arg(long)]
        ned: String,
    },

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Device name
        name: String,
    },

    /// Fetch the device's SSH host keys
    FetchHostKeys {
        /// Device name
        name: String,
    },

    /// Synchronize configuration from the device into NSO
    SyncFrom {
        /// Device name
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LOOPBACKS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoopbacksArgs {
    #[command(subcommand)]
    pub command: LoopbacksCommand,
}

#[derive(Debug, Subcommand)]
pub enum LoopbacksCommand {
    /// List loopback interfaces on a device
    #[command(alias = "ls")]
    List {
        /// Device name
        device: String,
    },

    /// Create a loopback interface with a primary address
    Create {
        /// Device name
        device: String,

        /// Loopback number, e.g. 50 for Loopback50
        name: String,

        /// Primary IPv4 address
        #[arg(long)]
        ip: String,

        /// Subnet mask
        #[arg(long, default_value = "255.255.255.255")]
        mask: String,
    },

    /// Change a loopback's primary address
    SetIp {
        /// Device name
        device: String,

        /// Loopback number
        name: String,

        /// New primary IPv4 address
        ip: String,
    },

    /// Delete a loopback interface
    #[command(alias = "rm")]
    Delete {
        /// Device name
        device: String,

        /// Loopback number
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEMO
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Walkthrough parameters. Defaults match a stock netsim IOS lab.
#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Name of the device to (re)create
    #[arg(long, default_value = "ios1")]
    pub device: String,

    /// Device address
    #[arg(long, default_value = "127.0.0.1")]
    pub address: String,

    /// Device SSH port
    #[arg(long, default_value = "10023")]
    pub ssh_port: u16,

    /// NSO authgroup for the device
    #[arg(long, default_value = "netsim_auth")]
    pub authgroup: String,

    /// NED package
    #[arg(long, default_value = "cisco-ios-cli-3.8")]
    pub ned: String,

    /// Loopback number to create
    #[arg(long, default_value = "50")]
    pub loopback: String,

    /// Initial loopback address
    #[arg(long, default_value = "10.11.50.1")]
    pub ip: String,

    /// Loopback mask
    #[arg(long, default_value = "255.255.255.255")]
    pub mask: String,

    /// Address the loopback is changed to
    #[arg(long, default_value = "10.11.50.2")]
    pub new_ip: String,

    /// Stop at the first failed step instead of reporting and continuing
    #[arg(long)]
    pub strict: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
