//! Command-line interface definitions for kconfgen.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Kconfig `.config` translators for the CMake build.
#[derive(Parser)]
#[command(name = "kconfgen", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Project settings file (default: ./kconfgen.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print per-input details and timings.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Translate .config files into CMake `set()` assignments.
    Cmake(CmakeArgs),
    /// Translate .config files into a C header of #defines.
    Header(HeaderArgs),
    /// Merge a parameter list with .config values into .config, .cmake and .json files.
    Params(ParamsArgs),
    /// Assemble the root Kconfig menu from app, board and src fragments.
    Catalog(CatalogArgs),
}

/// Input candidates shared by the `.config` translators.
#[derive(Args)]
pub struct ConfigInput {
    /// Input config files, space separated, e.g. "a.config b.config". [.config]
    #[arg(short = 'c', long = "config", value_name = "PATHS")]
    pub config: Option<String>,
}

/// Arguments for the `cmake` subcommand.
#[derive(Parser)]
pub struct CmakeArgs {
    #[command(flatten)]
    pub input: ConfigInput,

    /// Output file. [config.h]
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `header` subcommand.
#[derive(Parser)]
pub struct HeaderArgs {
    #[command(flatten)]
    pub input: ConfigInput,

    /// Output header file. [config.h]
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Header template containing @CONFIG_HEADER_CONTEXT@. [config.h.in]
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Extra string defines: KEY:::"VALUE"***KEY2:::"VALUE2".
    #[arg(short = 'p', long, default_value = "", hide_default_value = true)]
    pub params: String,
}

/// Arguments for the `params` subcommand.
#[derive(Parser)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub input: ConfigInput,

    /// Output stem; .config, .cmake and .json are appended. [params_file]
    #[arg(short = 'o', long, value_name = "STEM")]
    pub output: Option<PathBuf>,

    /// Parameter list: KEY:::"VALUE"***KEY2:::"VALUE2".
    #[arg(short = 'p', long, default_value = "", hide_default_value = true)]
    pub params: String,
}

/// Arguments for the `catalog` subcommand.
#[derive(Parser)]
pub struct CatalogArgs {
    /// Board directory.
    #[arg(short = 'b', long, value_name = "DIR")]
    pub board: Option<PathBuf>,

    /// Source directory. [src]
    #[arg(short = 's', long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Application directory; its name becomes PROJECT_NAME.
    #[arg(short = 'a', long, value_name = "DIR")]
    pub app: Option<PathBuf>,

    /// Output Kconfig file. [cache/Kconfig]
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
