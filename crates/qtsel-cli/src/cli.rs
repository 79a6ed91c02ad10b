//! CLI argument definitions for the Qt installer selector.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use qtsel_model::{Host, QtVersion, Target};

#[derive(Parser)]
#[command(
    name = "qtsel",
    version,
    about = "Qt installer selector - choose a Qt build and print the install command",
    long_about = "Browse Qt versions, architectures, modules, archives and tools from \
                  a local metadata cache.\n\n\
                  Renders the selection as an aqt command, an install-qt-action \
                  workflow step, or an official online installer script."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: settings.toml in the platform config folder).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Root of the metadata cache (overrides the settings file).
    #[arg(long = "cache-dir", value_name = "DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List Qt versions, grouped by minor release.
    Versions(PlatformArgs),

    /// List the tools published for a host and target.
    Tools(PlatformArgs),

    /// List the architectures of a Qt version.
    Arches(VersionArgs),

    /// List the add-on modules of a Qt build.
    Modules(BuildArgs),

    /// List the archives of a Qt build and the chosen modules.
    Archives(ArchivesArgs),

    /// List the installable variants of a tool.
    Variants(VariantsArgs),

    /// Print install commands for a selection.
    Render(RenderArgs),
}

#[derive(Args, Clone)]
pub struct PlatformArgs {
    /// Host operating system (default: the running one).
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<Host>,

    /// Target platform.
    #[arg(long = "target", value_name = "TARGET", default_value = "desktop")]
    pub target: Target,
}

impl PlatformArgs {
    pub fn host(&self) -> Host {
        self.host.unwrap_or_else(Host::current)
    }
}

#[derive(Args, Clone)]
pub struct VersionArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Qt version, e.g. 6.5.3.
    #[arg(value_name = "VERSION")]
    pub version: QtVersion,
}

#[derive(Args, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Qt version, e.g. 6.5.3.
    #[arg(value_name = "VERSION")]
    pub version: QtVersion,

    /// Architecture (may be omitted when the version has only one).
    #[arg(value_name = "ARCH")]
    pub arch: Option<String>,
}

#[derive(Args, Clone)]
pub struct ArchivesArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Modules whose archives are listed too (short or package names).
    #[arg(long = "module", short = 'm', value_name = "MODULE")]
    pub modules: Vec<String>,
}

#[derive(Args, Clone)]
pub struct VariantsArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Tool name, e.g. tools_ifw.
    #[arg(value_name = "TOOL")]
    pub tool: String,
}

#[derive(Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub platform: PlatformArgs,

    /// Qt version (omit to install tools only).
    #[arg(long = "version", value_name = "VERSION")]
    pub version: Option<QtVersion>,

    /// Architecture (may be omitted when the version has only one).
    #[arg(long = "arch", value_name = "ARCH")]
    pub arch: Option<String>,

    /// Modules to install (short or package names).
    #[arg(long = "module", short = 'm', value_name = "MODULE", conflicts_with = "all_modules")]
    pub modules: Vec<String>,

    /// Install every module.
    #[arg(long = "all-modules")]
    pub all_modules: bool,

    /// Install only these archives.
    #[arg(long = "archive", value_name = "ARCHIVE", conflicts_with = "no_archives")]
    pub archives: Vec<String>,

    /// Skip every archive of the build.
    #[arg(long = "no-archives")]
    pub no_archives: bool,

    /// Tools to install: TOOL for every variant, TOOL=VARIANT for one.
    #[arg(long = "tool", short = 't', value_name = "TOOL[=VARIANT]")]
    pub tools: Vec<String>,

    /// install-qt-action major version.
    #[arg(long = "action-version", value_enum, default_value = "v4")]
    pub action_version: ActionVersionArg,

    /// Output to print.
    #[arg(long = "format", value_enum, default_value = "all")]
    pub format: RenderFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ActionVersionArg {
    V2,
    V3,
    V4,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormatArg {
    Aqt,
    Action,
    Official,
    All,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
