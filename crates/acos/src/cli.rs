//! Clap derive structures for the `acos` CLI.
//!
//! Defines the command tree, global flags, and shared types. This file is
//! also compiled by `build.rs` for man page generation, so it must only
//! depend on `clap` and `clap_complete`.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// acos -- manage A10 Networks ACOS load balancers
#[derive(Debug, Parser)]
#[command(
    name = "acos",
    version,
    about = "Manage A10 Networks ACOS load balancers from the command line",
    long_about = "Administer SLB servers, service groups and virtual servers on\n\
        A10 Networks ACOS devices through the v2.1 REST management API.",
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
    /// Device profile to use
    #[arg(long, short = 'p', env = "ACOS_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Device host or URL (overrides profile)
    #[arg(long, short = 'H', env = "ACOS_HOST", global = true)]
    pub host: Option<String>,

    /// Admin username (overrides profile)
    #[arg(long, short = 'u', env = "ACOS_USERNAME", global = true)]
    pub username: Option<String>,

    /// Admin password
    #[arg(long, env = "ACOS_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format [default: `defaults.output` from the config, else table]
    #[arg(long, short = 'o', env = "ACOS_OUTPUT", global = true)]
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ACOS_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "ACOS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Log create/update/delete requests instead of sending them
    #[arg(long, env = "ACOS_DRY_RUN", global = true)]
    pub dry_run: bool,
}

impl GlobalOpts {
    /// Selected output format, table unless chosen by flag, env or config.
    pub fn format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }
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
    /// Plain text, one name per line (scripting)
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
    /// Manage SLB real servers
    #[command(alias = "server", alias = "s")]
    Servers(ServersArgs),

    /// Manage SLB service groups
    #[command(alias = "group", alias = "sg")]
    Groups(GroupsArgs),

    /// Manage SLB virtual servers
    #[command(alias = "vserver", alias = "vs")]
    Vservers(VserversArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ServersArgs {
    #[command(subcommand)]
    pub command: ServersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServersCommand {
    /// List real servers
    #[command(alias = "ls")]
    List,

    /// Create a real server
    Create(ServerSpecArgs),

    /// Update a real server, replacing its port list
    Update(ServerSpecArgs),

    /// Delete a real server
    #[command(alias = "rm")]
    Delete {
        /// Server name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct ServerSpecArgs {
    /// Server name
    pub name: String,

    /// Server IP address or host name
    pub host: String,

    /// Ports as "port[,protocol]", e.g. "80" "53,udp" "443,2"
    pub ports: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SERVICE GROUPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct GroupsArgs {
    #[command(subcommand)]
    pub command: GroupsCommand,
}

#[derive(Debug, Subcommand)]
pub enum GroupsCommand {
    /// List service groups
    #[command(alias = "ls")]
    List,

    /// Create a service group
    Create(GroupSpecArgs),

    /// Update a service group, replacing its member list
    Update(GroupSpecArgs),

    /// Delete a service group
    #[command(alias = "rm")]
    Delete {
        /// Service group name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct GroupSpecArgs {
    /// Service group name
    pub name: String,

    /// Members as "server,port[,protocol]", e.g. "web01,80"
    pub members: Vec<String>,

    /// Group protocol: tcp, udp or a numeric code
    #[arg(long, short = 'P', default_value = "tcp")]
    pub protocol: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VIRTUAL SERVERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VserversArgs {
    #[command(subcommand)]
    pub command: VserversCommand,
}

#[derive(Debug, Subcommand)]
pub enum VserversCommand {
    /// List virtual servers
    #[command(alias = "ls")]
    List,

    /// Create a virtual server
    Create(VserverSpecArgs),

    /// Update a virtual server, replacing its virtual ports
    Update(VserverSpecArgs),

    /// Delete a virtual server
    #[command(alias = "rm")]
    Delete {
        /// Virtual server name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct VserverSpecArgs {
    /// Virtual server name
    pub name: String,

    /// Virtual IP address
    pub address: String,

    /// Virtual ports as "service_group,port[,protocol]", e.g. "sg-web,80"
    pub ports: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Store the active profile's password in the system keyring
    SetPassword,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
