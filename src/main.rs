//! qfp-land-pattern: generate QFP footprints from an IPC-7351 name.
//!
//! The footprint geometry is implicit from the name, except for the
//! terminal (lead) size which is given separately.
//!
//! Some package examples:
//!
//! - Atmel `ATmega8` 32A (TQFP-32, 0.8mm pitch, JEDEC MS-026 ABA):
//!   `-n QFP80P900X900X100-32 -W 0.45`
//! - STM32F102x8 LQFP-48, 0.5mm pitch: `-n QFP50P900X900X100-48 -W 0.27`
//! - STM32F102x8 LQFP-64, 0.5mm pitch: `-n QFP50P1200X1200X100-64 -W 0.27`
//! - JEDEC MS-026D BJC (256 pins, 0.4mm pitch): `-n QFP40P3000X3000-256 -W 0.23`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use qfp_land_pattern::config::{self, Config};
use qfp_land_pattern::ipc7351::density::DensityLevel;
use qfp_land_pattern::ipc7351::packages::qfp::QfpCalculator;
use qfp_land_pattern::ipc7351::packages::{LandPattern, ParameterOverrides, QfpParameters};
use qfp_land_pattern::render::{json, kicad, raster};

/// Generate a QFP footprint (land pattern) from an IPC name.
///
/// The name is given on the form QFP<pitch>P<L1>X<L2>[X<height>]-<pincount>,
/// where pitch is the distance between the centre of the pins; L1 and L2 are
/// the nominal X and Y spans of the package measured between opposite pin
/// toes; height is optionally the thickness of the package (ignored); and
/// pincount is the number of pins. All measurements are mm in 1/100ths. For
/// example QFP50P900X900-48 is a square 48-pin package with 9.00mm between
/// pin ends and 0.50mm pitch (a standard 7x7mm LQFP).
#[derive(Parser, Debug)]
#[command(name = "qfp-land-pattern")]
#[command(author, version, about, long_about)]
struct Args {
    /// IPC device name, for example QFP50P900X900-48
    #[arg(short = 'n', long, value_name = "IPCNAME")]
    name: String,

    /// Output file format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::KicadMod)]
    format: OutputFormat,

    /// Output file name
    #[arg(short = 'o', long = "output", value_name = "FILE", default_value = "out")]
    output: PathBuf,

    /// Nominal terminal (lead) length, heel-to-toe, in mm
    #[arg(short = 'T', long, value_name = "N")]
    terminal_length: Option<f64>,

    /// Maximum terminal (lead) width, in mm
    #[arg(short = 'W', long, value_name = "N")]
    terminal_width: Option<f64>,

    /// IPC-7351 density level: L (least), N (nominal), M (most)
    #[arg(short = 'D', long, value_name = "L|N|M")]
    density: Option<String>,

    /// Override toe protrusion (outside pad length), in mm
    #[arg(long = "toe-protrusion", value_name = "N")]
    toe_protrusion: Option<f64>,

    /// Draw package outline and orientation mark (inside pads) on silkscreen
    #[arg(long, help_heading = "Silkscreen options")]
    draw_outline: bool,

    /// Draw courtyard and orientation mark (outside pads) on silkscreen
    #[arg(long, help_heading = "Silkscreen options")]
    draw_courtyard: bool,

    /// Draw terminal (pin) outlines on drawing layer (Dwgs.User)
    #[arg(long, help_heading = "Silkscreen options")]
    draw_terminals: bool,

    /// Image scale in number of pixels per mm
    #[arg(long, value_name = "N", help_heading = "Image output options")]
    scale: Option<u32>,

    /// Path to configuration file
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `KiCad` footprint (S-expression)
    #[value(alias = "kicad_mod")]
    KicadMod,
    /// PNG preview image
    Png,
    /// JSON dump of the land pattern
    Json,
}

impl Args {
    /// Merges command-line options over the configured defaults.
    fn overrides(&self, cfg: &Config) -> Result<ParameterOverrides, String> {
        let mut overrides = cfg.overrides().map_err(|e| e.to_string())?;
        if let Some(density) = &self.density {
            overrides.density = density
                .parse::<DensityLevel>()
                .map_err(|e| e.to_string())?;
        }
        if let Some(length) = self.terminal_length {
            overrides.terminal_length = length;
        }
        if let Some(width) = self.terminal_width {
            overrides.terminal_width = width;
        }
        overrides.toe_override = self.toe_protrusion;
        overrides.draw.outline |= self.draw_outline;
        overrides.draw.courtyard |= self.draw_courtyard;
        overrides.draw.terminals |= self.draw_terminals;
        Ok(overrides)
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes the pattern in the requested format.
fn write_pattern(args: &Args, cfg: &Config, pattern: &LandPattern) -> Result<(), String> {
    match args.format {
        OutputFormat::KicadMod => {
            let command_line = std::env::args().collect::<Vec<_>>().join(" ");
            let provenance = kicad::Provenance::now(command_line);
            kicad::write_kicad_mod(pattern, Some(&provenance), &args.output)
        }
        OutputFormat::Png => {
            let scale = args.scale.unwrap_or(cfg.image.pixels_per_mm);
            raster::write_png(pattern, scale, &args.output)
        }
        OutputFormat::Json => json::write_json(pattern, &args.output),
    }
    .map_err(|e| e.to_string())
}

/// Entry point for qfp-land-pattern.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config_or_default(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        name = %args.name,
        format = ?args.format,
        "Generating land pattern"
    );

    let overrides = match args.overrides(&cfg) {
        Ok(overrides) => overrides,
        Err(e) => {
            error!(error = %e, "Invalid options");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let params = match QfpParameters::resolve(&args.name, &overrides) {
        Ok(params) => params,
        Err(e) => {
            error!(error = %e, "Cannot resolve package");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pattern = match QfpCalculator::new().calculate(&args.name, &params) {
        Ok(pattern) => pattern,
        Err(e) => {
            error!(error = %e, "Cannot calculate land pattern");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match write_pattern(&args, &cfg, &pattern) {
        Ok(()) => {
            info!(output = %args.output.display(), "Footprint written");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Output error");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
