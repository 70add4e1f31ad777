//! clientctx-dump - collect and print client context data.
//!
//! Runs the context-data aggregator against the Linux host or a JSON device
//! profile and prints the merged map as a table, as JSON, or as the encoded
//! header value.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

use clientctx_core::collector::{
    ApplicationManifest, DeviceProfile, HostPlatform, Platform, RealFs,
};
use clientctx_core::payload::ContextPayload;
use clientctx_core::storage::{FileStore, KeyValueStore};
use clientctx_core::{AggregationTiming, ContextData, ContextDataAggregator};

/// Collects client context data and prints it.
#[derive(Parser)]
#[command(name = "clientctx-dump", about = "Collect and print client context data", version)]
struct Args {
    /// JSON device profile to collect from instead of the host.
    #[arg(long, env = "CLIENTCTX_PROFILE", value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Directory holding the persisted device agent id.
    #[arg(long, env = "CLIENTCTX_STORE_DIR", default_value = "./clientctx-data")]
    store_dir: PathBuf,

    /// Application name reported for the host platform.
    #[arg(long, default_value = "clientctx-dump")]
    app_name: String,

    /// Application package id reported for the host platform.
    #[arg(long, default_value = "io.clientctx.dump")]
    app_package: String,

    /// Installed application version. Omitted from the output when not set.
    #[arg(long)]
    app_version: Option<String>,

    /// Target SDK level reported for the host platform.
    #[arg(long)]
    target_sdk: Option<u32>,

    /// Include telephony data.
    #[arg(long)]
    telephony: bool,

    /// Output as JSON.
    #[arg(long, conflicts_with = "header")]
    json: bool,

    /// Output the encoded header value.
    #[arg(long)]
    header: bool,

    /// Username embedded in the header payload.
    #[arg(long, requires = "user_pool_id")]
    username: Option<String>,

    /// User pool id embedded in the header payload.
    #[arg(long, requires = "username")]
    user_pool_id: Option<String>,

    /// Print per-collector timings to stderr.
    #[arg(long)]
    timing: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber. Default level is WARN so stdout
/// stays clean; logs always go to stderr.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["clientctx_dump", "clientctx_core"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn build_platform(args: &Args, store: Arc<dyn KeyValueStore>) -> Result<Box<dyn Platform>, String> {
    if let Some(path) = &args.profile {
        let profile = DeviceProfile::load(path)
            .map_err(|e| format!("failed to load profile {}: {}", path.display(), e))?;
        info!("Platform: device profile {}", path.display());
        return Ok(Box::new(profile.with_store(store)));
    }

    let mut manifest = ApplicationManifest::new(&args.app_name, &args.app_package);
    if let Some(sdk) = args.target_sdk {
        manifest = manifest.with_target_sdk(sdk);
    }
    if let Some(version) = &args.app_version {
        manifest = manifest.with_version(version);
    }
    info!("Platform: host");
    Ok(Box::new(HostPlatform::new(RealFs::new(), manifest, store)))
}

fn print_table(data: &ContextData) {
    let width = data.keys().map(String::len).max().unwrap_or(0);
    for (key, value) in data {
        println!("{:<width$}  {}", key, value, width = width);
    }
}

fn print_timing(timing: &AggregationTiming) {
    for (name, elapsed) in &timing.collectors {
        eprintln!("{:<12} {:>10.3?}", name, elapsed);
    }
    eprintln!("{:<12} {:>10.3?}", "total", timing.total);
}

fn build_payload(args: &Args, data: ContextData) -> ContextPayload {
    let payload = ContextPayload::new(data);
    match (&args.username, &args.user_pool_id) {
        (Some(user), Some(pool)) => payload.with_user(user, pool),
        _ => payload,
    }
}

fn run(args: &Args) -> Result<(), String> {
    let store = FileStore::open(&args.store_dir).map_err(|e| {
        format!(
            "failed to open store at {}: {}",
            args.store_dir.display(),
            e
        )
    })?;
    debug!("Store: {}", store.root().display());

    let platform = build_platform(args, Arc::new(store))?;

    let mut aggregator = ContextDataAggregator::new();
    if args.telephony {
        aggregator = aggregator.with_telephony();
    }
    info!("Collectors: {}", aggregator.collector_names().join(", "));

    let (data, timing) = aggregator.aggregated_data_timed(platform.as_ref());
    info!("Collected {} keys in {:?}", data.len(), timing.total);
    if args.timing {
        print_timing(&timing);
    }

    if args.header {
        let encoded = build_payload(args, data)
            .encode()
            .map_err(|e| format!("failed to encode payload: {}", e))?;
        println!("{}", encoded);
    } else if args.json {
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| format!("failed to serialize: {}", e))?;
        println!("{}", json);
    } else {
        print_table(&data);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
