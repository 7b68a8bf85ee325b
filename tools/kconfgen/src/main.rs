//! Kconfig build-support generators.
//!
//! Turns the `.config` produced by menuconfig into the files a CMake build
//! consumes, and assembles the root Kconfig menu for an app/board pair.
//!
//! Every command is a one-shot transform: resolve inputs, render the whole
//! output in memory, then replace the destination in a single rename.

mod catalog;
mod cli;
mod cmake;
mod dotconfig;
mod error;
mod header;
mod output;
mod params;
mod settings;
mod verbose;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::settings::Settings;
use crate::verbose::{dprintln, vprintln};

const DEFAULT_CONFIG: &str = ".config";
const DEFAULT_CMAKE_OUTPUT: &str = "config.h";
const DEFAULT_HEADER_OUTPUT: &str = "config.h";
const DEFAULT_HEADER_TEMPLATE: &str = "config.h.in";
const DEFAULT_PARAMS_STEM: &str = "params_file";
const DEFAULT_SRC_DIR: &str = "src";
const DEFAULT_CATALOG_OUTPUT: &str = "cache/Kconfig";

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    verbose::init(cli.quiet, cli.verbose);

    let settings = Settings::load(cli.settings.as_deref())?;

    match cli.command {
        cli::Command::Cmake(ref args) => cmd_cmake(args, &settings),
        cli::Command::Header(ref args) => cmd_header(args, &settings),
        cli::Command::Params(ref args) => cmd_params(args, &settings),
        cli::Command::Catalog(ref args) => cmd_catalog(args, &settings),
    }
}

// ===========================================================================
// Option resolution: flag > settings file > built-in default
// ===========================================================================

fn pick_str(flag: Option<&str>, setting: Option<&str>, default: &str) -> String {
    flag.or(setting).unwrap_or(default).to_string()
}

fn pick_path(flag: Option<&Path>, setting: Option<&Path>, default: &str) -> PathBuf {
    flag.or(setting)
        .map_or_else(|| PathBuf::from(default), Path::to_path_buf)
}

/// Resolve the `-c` candidates to existing files.
fn resolve_inputs(flag: Option<&str>, setting: Option<&str>) -> Result<Vec<PathBuf>> {
    let candidates = pick_str(flag, setting, DEFAULT_CONFIG);
    vprintln!("Resolving inputs: {candidates}");
    Ok(dotconfig::resolve_inputs(&candidates)?)
}

// ===========================================================================
// Commands
// ===========================================================================

/// `.config` → CMake `set()` lines.
fn cmd_cmake(args: &cli::CmakeArgs, settings: &Settings) -> Result<()> {
    let inputs = resolve_inputs(args.input.config.as_deref(), settings.cmake.config.as_deref())?;
    let output = pick_path(
        args.output.as_deref(),
        settings.cmake.output.as_deref(),
        DEFAULT_CMAKE_OUTPUT,
    );

    let lines = cmake::generate(&inputs, &output)
        .with_context(|| format!("generating {}", output.display()))?;
    dprintln!("Wrote {} ({} lines from {} inputs)", output.display(), lines, inputs.len());
    Ok(())
}

/// `.config` → C header.
fn cmd_header(args: &cli::HeaderArgs, settings: &Settings) -> Result<()> {
    let inputs = resolve_inputs(args.input.config.as_deref(), settings.header.config.as_deref())?;
    let output = pick_path(
        args.output.as_deref(),
        settings.header.output.as_deref(),
        DEFAULT_HEADER_OUTPUT,
    );
    let template = pick_path(
        args.template.as_deref(),
        settings.header.template.as_deref(),
        DEFAULT_HEADER_TEMPLATE,
    );
    let params = params::ParamList::parse(&args.params);

    header::generate(&inputs, &output, &template, &params)
        .with_context(|| format!("generating {}", output.display()))?;
    dprintln!("Wrote {}", output.display());
    Ok(())
}

/// Parameter list + `.config` → `.config`, `.cmake`, `.json`.
fn cmd_params(args: &cli::ParamsArgs, settings: &Settings) -> Result<()> {
    let inputs = resolve_inputs(args.input.config.as_deref(), settings.params.config.as_deref())?;
    let stem = pick_path(
        args.output.as_deref(),
        settings.params.output.as_deref(),
        DEFAULT_PARAMS_STEM,
    );
    let params = params::ParamList::parse(&args.params);

    let outputs = params::generate(&inputs, &stem, &params)
        .with_context(|| format!("generating parameter files for {}", stem.display()))?;
    dprintln!(
        "Wrote {}, {}, {}",
        outputs.config.display(),
        outputs.cmake.display(),
        outputs.json.display()
    );
    Ok(())
}

/// Root Kconfig menu.
fn cmd_catalog(args: &cli::CatalogArgs, settings: &Settings) -> Result<()> {
    let board = args.board.as_deref().or(settings.catalog.board.as_deref());
    let app = args.app.as_deref().or(settings.catalog.app.as_deref());
    let src = pick_path(args.src.as_deref(), settings.catalog.src.as_deref(), DEFAULT_SRC_DIR);
    let output = pick_path(
        args.output.as_deref(),
        settings.catalog.output.as_deref(),
        DEFAULT_CATALOG_OUTPUT,
    );

    let sources = catalog::CatalogSources { app, board, src: &src };
    catalog::generate(&sources, &output)
        .with_context(|| format!("generating {}", output.display()))?;
    dprintln!("Wrote {}", output.display());
    Ok(())
}
