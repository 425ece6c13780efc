//! `aware device` commands.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};
use tracing::{info, warn};

use aware_core::bridge::{AppendHandle, AppendSlot, Producer, SampleSource};
use aware_core::source::{DeviceSource, JsonFileSource, SourceError};
use aware_core::table::{RefreshFn, TableError, TableOptions};
use aware_core::telemetry::{DeviceSampler, JsonLinesSink, SinkError};
use aware_core::tui::{App, EventHandler};
use aware_core::view::{DeviceList, DisplayFormat, telemetry_columns};

/// Terminal poll timeout of the interactive views.
const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Subcommand, Debug)]
pub enum DeviceCommand {
    /// List devices.
    #[command(alias = "ls")]
    List(ListArgs),
    /// Device telemetry.
    #[command(subcommand)]
    Telemetry(TelemetryCommand),
}

impl DeviceCommand {
    pub fn is_interactive(&self) -> bool {
        match self {
            DeviceCommand::List(args) => !args.plain,
            DeviceCommand::Telemetry(_) => true,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print tab-aligned text instead of the interactive table.
    #[arg(long)]
    pub plain: bool,

    /// Omit the header line in plain output.
    #[arg(long)]
    pub no_headers: bool,

    /// Columns to show, comma separated (e.g. "uid,parent,enabled").
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Show all columns in plain output.
    #[arg(long)]
    pub no_truncate: bool,
}

#[derive(Subcommand, Debug)]
pub enum TelemetryCommand {
    /// Generate random telemetry for a device and show it live.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Device id.
    pub id: String,

    /// Generate one sample and stop.
    #[arg(short, long)]
    pub single_value: bool,

    /// Seconds between samples.
    #[arg(long, default_value_t = 30)]
    pub frequency_seconds: u64,

    /// Minutes between samples, added to --frequency-seconds.
    #[arg(long, default_value_t = 0)]
    pub frequency_minutes: u64,

    /// Append published values as JSON lines to this file.
    #[arg(long, value_name = "PATH")]
    pub publish: Option<PathBuf>,
}

impl GenerateArgs {
    fn period(&self) -> Result<Duration, CliError> {
        let secs = self
            .frequency_minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(self.frequency_seconds))
            .ok_or(CliError::InvalidPeriod)?;
        if secs == 0 {
            return Err(CliError::InvalidPeriod);
        }
        Ok(Duration::from_secs(secs))
    }
}

/// Errors reported by the device commands.
#[derive(Debug)]
pub enum CliError {
    NoResults,
    InvalidPeriod,
    Source(SourceError),
    Table(TableError),
    Sink(SinkError),
    Io(io::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::NoResults => write!(f, "No results found"),
            CliError::InvalidPeriod => write!(f, "sampling period must be greater than zero"),
            CliError::Source(e) => write!(f, "{}", e),
            CliError::Table(e) => write!(f, "{}", e),
            CliError::Sink(e) => write!(f, "cannot publish telemetry: {}", e),
            CliError::Io(e) => write!(f, "terminal error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        CliError::Table(e)
    }
}

impl From<SinkError> for CliError {
    fn from(e: SinkError) -> Self {
        CliError::Sink(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

pub fn run(cmd: DeviceCommand, source: JsonFileSource) -> Result<(), CliError> {
    let source: Arc<dyn DeviceSource> = Arc::new(source);
    match cmd {
        DeviceCommand::List(args) => list(args, source),
        DeviceCommand::Telemetry(TelemetryCommand::Generate(args)) => generate(args, source),
    }
}

fn display_format(args: ListArgs) -> DisplayFormat {
    DisplayFormat {
        plain: args.plain,
        no_headers: args.no_headers,
        columns: args.columns,
        no_truncate: args.no_truncate,
    }
}

fn list(args: ListArgs, source: Arc<dyn DeviceSource>) -> Result<(), CliError> {
    let display = display_format(args);
    let devices = source.list_devices()?;
    if devices.is_empty() {
        return Err(CliError::NoResults);
    }
    info!("Listing {} devices", devices.len());

    let view = DeviceList::new(devices, display.clone());
    if display.plain {
        view.render_plain(&mut io::stdout().lock())?;
        return Ok(());
    }

    let fetch: RefreshFn = Arc::new(move || {
        let devices = source.list_devices()?;
        Ok(DeviceList::new(devices, display.clone()).table_data())
    });
    let data = view.table_data();
    let table = TableOptions::new()
        .columns(data.columns)
        .rows(data.rows)
        .autowidth(true)
        .focused(true)
        .refresh(fetch)
        .copy_column(0)
        .build()?;

    let events = EventHandler::new(TICK_RATE)?;
    App::new(table).run(events)?;
    Ok(())
}

fn generate(args: GenerateArgs, source: Arc<dyn DeviceSource>) -> Result<(), CliError> {
    let device = source.get_device(&args.id)?;
    let period = if args.single_value {
        None
    } else {
        Some(args.period()?)
    };

    let mut sampler = DeviceSampler::new(&device);
    if let Some(path) = &args.publish {
        info!("Publishing telemetry to {}", path.display());
        sampler = sampler.with_sink(Box::new(JsonLinesSink::open(path)?));
    }
    if device.device_type.parameters.is_empty() {
        warn!("Device {} has no parameters", device.id);
    }

    let slot = AppendSlot::new();
    let table = TableOptions::new()
        .columns(telemetry_columns(&device))
        .rows(vec![sampler.sample().into_row()])
        .autowidth(true)
        .focused(true)
        .sticky_cursor(true)
        .appending(slot.clone())
        .copy_column(0)
        .build()?;

    let events = EventHandler::new(TICK_RATE)?;
    let mut app = App::new(table);
    if let Some(period) = period {
        let producer = Producer::spawn(
            &device.id,
            sampler,
            period,
            AppendHandle::new(slot, events.sender()),
        )?;
        app = app.with_producer(producer);
    }
    app.run(events)?;
    Ok(())
}
