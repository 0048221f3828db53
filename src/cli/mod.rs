//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod check;
mod render;
mod show;
mod tokens;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PxdConfig};

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PXD_LOG";

/// PixelDraw - compile pixel-art drawing scripts and render them
#[derive(Parser)]
#[command(name = "pxd")]
#[command(about = "PixelDraw - compile pixel-art drawing scripts (.pxd) and render them")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Compiler settings shared by every command that compiles a script
#[derive(Args, Debug, Default, Clone)]
pub struct CompileArgs {
    /// Drawing color before the first `color` statement (#RRGGBB or a name)
    #[arg(long)]
    pub default_color: Option<String>,

    /// Fail once the drawing would emit more than this many pixels
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_pixels: Option<u64>,

    /// Path to pxd.toml (default: discovered from the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CompileArgs {
    /// Config-file overrides carried by these flags.
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            default_color: self.default_color.clone(),
            max_pixels: self.max_pixels.map(|n| usize::try_from(n).unwrap_or(usize::MAX)),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a drawing script and save it as PNG
    Render {
        /// Input drawing script
        input: PathBuf,

        /// Output file or directory (ends with /).
        /// If omitted: {input_stem}.png next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Screen pixels per grid cell (1-64, default from pxd.toml or 20)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: Option<u32>,

        /// Do not outline painted cells
        #[arg(long)]
        no_grid: bool,

        /// Background color (#RRGGBB or a CSS color name)
        #[arg(long)]
        background: Option<String>,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Compile a drawing script and report the result
    Check {
        /// Input drawing script
        input: PathBuf,

        /// Print the compiled drawing (or the error) as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Preview a drawing in the terminal
    Show {
        /// Input drawing script
        input: PathBuf,

        /// Print a plain grid with row and column numbers instead of colors
        #[arg(long)]
        coords: bool,

        #[command(flatten)]
        compile: CompileArgs,
    },

    /// Print the token stream of a drawing script
    Tokens {
        /// Input drawing script
        input: PathBuf,
    },
}

/// Install the stderr log subscriber.
///
/// `PXD_LOG` takes precedence over the verbosity flag.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed when running in-process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Read a script from disk, reporting failures as invalid arguments.
pub(crate) fn read_source(input: &Path) -> Result<String, ExitCode> {
    fs::read_to_string(input).map_err(|e| {
        eprintln!("Error: Cannot read input file '{}': {}", input.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Load pxd.toml (explicit or discovered) and apply command-line overrides.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<PxdConfig, ExitCode> {
    load_config(config_path)
        .and_then(|config| merge_cli_overrides(config, overrides))
        .map_err(|e| {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render { input, output, scale, no_grid, background, compile } => {
            let overrides = CliOverrides {
                scale,
                grid: no_grid.then_some(false),
                background,
                ..compile.overrides()
            };
            render::run_render(&input, output.as_deref(), compile.config.as_deref(), &overrides)
        }
        Commands::Check { input, json, compile } => {
            check::run_check(&input, json, compile.config.as_deref(), &compile.overrides())
        }
        Commands::Show { input, coords, compile } => {
            show::run_show(&input, coords, compile.config.as_deref(), &compile.overrides())
        }
        Commands::Tokens { input } => tokens::run_tokens(&input),
    }
}
