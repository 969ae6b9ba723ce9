//! nodeboard - terminal dashboard for a fleet of monitored nodes.
//!
//! Usage:
//!   nodeboard                              # demo fleet, 2 second refresh
//!   nodeboard 5 --demo 60                  # 60 demo nodes, 5 second refresh
//!   nodeboard --nodes nodes.json --live live.json
//!   nodeboard --nodes nodes.json --mobile  # force the narrow layout

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use nodeboard::provider::{DataProvider, DemoProvider, FileProvider};
use nodeboard::settings::{FileBackend, MemoryBackend, SettingsBackend, SettingsStore};
use nodeboard::tui::App;
use nodeboard::view::common::ViewOptions;

/// Nodes generated when `--demo` is given without a count.
const DEFAULT_DEMO_NODES: usize = 24;

/// Terminal dashboard for a fleet of monitored nodes.
#[derive(Parser)]
#[command(name = "nodeboard", about = "Terminal dashboard for monitored nodes", version)]
struct Args {
    /// Refresh interval in seconds.
    #[arg(value_name = "INTERVAL", default_value = "2")]
    interval: u64,

    /// Node roster JSON (array of nodes, optionally wrapped in {"status", "data"}).
    #[arg(long, value_name = "PATH")]
    nodes: Option<PathBuf>,

    /// Live telemetry JSON ({"online": [...], "data": {...}}).
    /// Without it every node is shown offline.
    #[arg(long, value_name = "PATH", requires = "nodes")]
    live: Option<PathBuf>,

    /// Generate a demo fleet. Used when no --nodes is given.
    #[arg(long, value_name = "N", num_args = 0..=1, default_missing_value = "24", conflicts_with = "nodes")]
    demo: Option<usize>,

    /// Force the narrow (mobile) layout regardless of terminal width.
    #[arg(long, conflicts_with = "desktop")]
    mobile: bool,

    /// Force the wide (desktop) layout regardless of terminal width.
    #[arg(long)]
    desktop: bool,

    /// Show cumulative traffic totals instead of quota bars.
    #[arg(long)]
    traffic_text: bool,

    /// Preferences file. Default: <config dir>/nodeboard/settings.json
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the dashboard).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber writing to `path`.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(path: &Path, verbose: u8, quiet: bool) -> std::io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nodeboard={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn settings_store(path: Option<PathBuf>) -> SettingsStore<Box<dyn SettingsBackend>> {
    let backend: Box<dyn SettingsBackend> = match path.map_or_else(FileBackend::default_path, Ok) {
        Ok(path) => {
            info!(path = %path.display(), "using settings file");
            Box::new(FileBackend::new(path))
        }
        Err(e) => {
            warn!(error = %e, "preferences will not be persisted");
            Box::new(MemoryBackend::new())
        }
    };
    SettingsStore::new(backend)
}

fn main() {
    let args = Args::parse();

    if let Some(path) = &args.log_file
        && let Err(e) = init_logging(path, args.verbose, args.quiet)
    {
        eprintln!("Error: cannot open log file '{}': {}", path.display(), e);
        std::process::exit(1);
    }

    if args.interval == 0 {
        eprintln!("Error: interval must be at least 1 second");
        std::process::exit(1);
    }

    info!("nodeboard {} starting", env!("CARGO_PKG_VERSION"));

    let provider: Box<dyn DataProvider> = match args.nodes {
        Some(nodes) => Box::new(FileProvider::new(nodes, args.live)),
        None => Box::new(DemoProvider::new(args.demo.unwrap_or(DEFAULT_DEMO_NODES))),
    };

    let forced_mobile = if args.mobile {
        Some(true)
    } else if args.desktop {
        Some(false)
    } else {
        None
    };

    let options = ViewOptions {
        force_traffic_text: args.traffic_text,
    };
    let app = App::new(provider, settings_store(args.settings), forced_mobile)
        .with_view_options(options);
    if let Err(e) = app.run(Duration::from_secs(args.interval)) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
