//! aware - operator CLI for the device management service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod device;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use aware_core::source::JsonFileSource;

use device::{CliError, DeviceCommand};

/// Operator CLI for IoT devices.
#[derive(Parser, Debug)]
#[command(name = "aware", about = "Operator CLI for IoT devices", version)]
struct Args {
    /// JSON device inventory.
    #[arg(long, global = true, env = "AWARE_DEVICES", default_value = "devices.json")]
    devices: PathBuf,

    /// Write logs to this file. Interactive views discard logs without it.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage devices.
    #[command(subcommand)]
    Device(DeviceCommand),
}

impl Command {
    /// Interactive commands own the terminal, so logs must not go to stderr.
    fn is_interactive(&self) -> bool {
        match self {
            Command::Device(cmd) => cmd.is_interactive(),
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to `log_file` when given, otherwise to stderr for plain commands
/// and nowhere for interactive ones.
fn init_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
    interactive: bool,
) -> Result<(), String> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for crate_name in ["aware", "aware_core"] {
        if let Ok(directive) = format!("{}={}", crate_name, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if interactive => (BoxMakeWriter::new(std::io::sink), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_logging(
        args.verbose,
        args.quiet,
        args.log_file.as_deref(),
        args.command.is_interactive(),
    ) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    info!("aware {} starting", env!("CARGO_PKG_VERSION"));
    debug!("device inventory: {}", args.devices.display());
    let source = JsonFileSource::new(&args.devices);

    let result = match args.command {
        Command::Device(cmd) => device::run(cmd, source),
    };

    match result {
        Ok(()) => {}
        Err(CliError::NoResults) => {
            eprintln!("{}", CliError::NoResults);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
