//! cloudrecon CLI
//!
//! Runs discovery against exported inventories, or serves the discovery API.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use cloudrecon::discovery::{DiscoveryContext, DiscoveryEngine, Discoverer, Provider, ResourceTypes};
use cloudrecon::providers::InventoryProvider;
use cloudrecon::server::{self, AppState};
use cloudrecon::{telemetry, DiscoveryResult, Settings};

#[derive(Parser, Debug)]
#[command(name = "cloudrecon", version, about = "Concurrent cloud resource discovery")]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info", env = "CLOUDRECON_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "CLOUDRECON_JSON_LOGS")]
    json_logs: bool,

    /// Settings file (JSON)
    #[arg(long, global = true, env = "CLOUDRECON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan one provider type by type
    Discover(DiscoverArgs),

    /// Discover accounts and resources across several providers
    DiscoverAll {
        /// Inventory files, one provider each
        #[arg(long = "inventory", required = true, env = "CLOUDRECON_INVENTORY", value_delimiter = ',')]
        inventories: Vec<PathBuf>,

        /// Only discover these providers
        #[arg(long = "provider")]
        providers: Vec<String>,

        /// Write the result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Serve the discovery API
    Serve {
        #[arg(long = "inventory", required = true, env = "CLOUDRECON_INVENTORY", value_delimiter = ',')]
        inventories: Vec<PathBuf>,

        #[arg(long, default_value = "0.0.0.0:8080", env = "CLOUDRECON_ADDR")]
        addr: SocketAddr,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct DiscoverArgs {
    /// Inventory file backing the provider
    #[arg(long, env = "CLOUDRECON_INVENTORY")]
    inventory: PathBuf,

    /// Resource types to scan (repeatable); defaults to the built-in catalog
    #[arg(long = "resource-type")]
    resource_types: Vec<String>,

    /// Run the enrichment and findings passes
    #[arg(long)]
    deep_scan: bool,

    #[arg(long)]
    include_costs: bool,

    /// Enable the in-memory resource cache
    #[arg(long)]
    cache: bool,

    /// Maximum concurrent resource-type scans
    #[arg(long, env = "CLOUDRECON_WORKERS")]
    workers: Option<usize>,

    /// Run timeout in seconds
    #[arg(long, env = "CLOUDRECON_TIMEOUT")]
    timeout: Option<u64>,

    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level, cli.json_logs);

    let settings = match &cli.config {
        Some(path) => Settings::load(path).context("Failed to load settings")?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Discover(args) => run_discover(&settings, args).await,
        Command::DiscoverAll {
            inventories,
            providers,
            output,
        } => run_discover_all(&settings, &inventories, &providers, output.as_deref()).await,
        Command::Serve { inventories, addr } => run_serve(&settings, &inventories, addr).await,
        Command::Version => {
            println!("cloudrecon {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn run_discover(settings: &Settings, args: DiscoverArgs) -> Result<()> {
    let mut options = settings
        .discovery_options()
        .context("Invalid discovery settings")?;
    if !args.resource_types.is_empty() {
        options.resource_types = ResourceTypes::Only(args.resource_types);
    }
    if let Some(workers) = args.workers {
        options.max_workers = workers;
    }
    if let Some(timeout) = args.timeout {
        options.timeout = Duration::from_secs(timeout);
    }
    options.deep_scan |= args.deep_scan;
    options.include_costs |= args.include_costs;
    options.cache_enabled |= args.cache;

    let provider = InventoryProvider::from_path(&args.inventory).context("Failed to load inventory")?;
    let discoverer = Discoverer::new(Arc::new(provider), options).context("Invalid discovery options")?;

    let result = discoverer.discover(&cancel_on_ctrl_c()).await;
    report(&result);
    write_output(&result, args.output.as_deref())
}

async fn run_discover_all(
    settings: &Settings,
    inventories: &[PathBuf],
    providers: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let engine = build_engine(settings, inventories)?;
    let result = engine
        .discover_selected(&cancel_on_ctrl_c(), providers)
        .await
        .context("Discovery failed")?;
    report(&result);
    write_output(&result, output)
}

async fn run_serve(settings: &Settings, inventories: &[PathBuf], addr: SocketAddr) -> Result<()> {
    let engine = build_engine(settings, inventories)?;
    let state = AppState::new(Arc::new(engine), settings.timeout());
    server::serve(addr, state, async {
        let _ = tokio::signal::ctrl_c().await;
        info!("Shutting down");
    })
    .await
}

fn build_engine(settings: &Settings, inventories: &[PathBuf]) -> Result<DiscoveryEngine> {
    let config = settings
        .discovery_config()
        .context("Invalid discovery settings")?;
    let engine = DiscoveryEngine::new(config)?;
    for path in inventories {
        let provider = InventoryProvider::from_path(path)
            .with_context(|| format!("Failed to load inventory {}", path.display()))?;
        let name = provider.name().to_string();
        engine.register_provider(name, Arc::new(provider));
    }
    Ok(engine)
}

/// Root context cancelled by Ctrl-C; work collected so far is still reported
fn cancel_on_ctrl_c() -> DiscoveryContext {
    let (ctx, cancel) = DiscoveryContext::new();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling discovery");
            cancel.cancel();
        }
    });
    ctx
}

fn report(result: &DiscoveryResult) {
    info!(
        run_id = %result.run_id,
        accounts = result.summary.total_accounts,
        resources = result.summary.total_resources,
        errors = result.summary.error_count,
        retryable = result.retryable_errors().len(),
        duration_ms = result.duration.as_millis() as u64,
        "Discovery finished"
    );
    for error in &result.errors {
        warn!(
            provider = %error.provider,
            account = error.account.as_deref().unwrap_or(""),
            resource_type = error.resource_type.as_deref().unwrap_or(""),
            retryable = error.retryable,
            "{}",
            error.error
        );
    }
}

fn write_output(result: &DiscoveryResult, output: Option<&Path>) -> Result<()> {
    let json = result.to_json().context("Failed to serialize result")?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote discovery result");
        }
        None => println!("{}", json),
    }
    Ok(())
}
