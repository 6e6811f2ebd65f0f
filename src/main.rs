//! navlink - merged go-to-definition from the command line
//!
//! Loads fixture providers from a `.navlink.toml` manifest, resolves one
//! query through the definition aggregator and prints the merged targets.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, unreadable manifest, etc.)
//!   2 - No targets found and --fail-on-empty set

use anyhow::{Context, Result};
use navlink::cli::{Args, OutputFormat};
use navlink::config::{Config, DEFAULT_CONFIG_FILE};
use navlink::navigation::{CommandTable, DefinitionAggregator};
use navlink::output::{render_json, render_text, Resolution};
use navlink::sink::{CollectingErrorSink, ErrorSink, FanoutErrorSink, TracingErrorSink};
use navlink::CancellationToken;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Load the manifest before logging so its verbose flag applies
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(&args, &config);

    debug!("navlink v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run_query(args, config).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Query failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a sample .navlink.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", DEFAULT_CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("Created {} with sample providers.", DEFAULT_CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let level = if !args.quiet && config.general.verbose {
        tracing::Level::DEBUG
    } else {
        args.log_level()
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Resolve the requested query. Returns exit code (0 or 2).
async fn run_query(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    if config.providers.is_empty() {
        warn!("No providers configured; every query will come back empty");
    }

    let features = Arc::new(config.build_features());
    let failures = Arc::new(CollectingErrorSink::new());
    let sinks: Vec<Arc<dyn ErrorSink>> = vec![
        Arc::new(TracingErrorSink) as Arc<dyn ErrorSink>,
        failures.clone() as Arc<dyn ErrorSink>,
    ];
    let aggregator = DefinitionAggregator::new(features, Arc::new(FanoutErrorSink::new(sinks)));

    let document = args.document();
    let position = args.position();
    let category = args.effective_category();

    let links = match args.command {
        Some(ref id) => CommandTable::new(aggregator)
            .execute(id, &document, position)
            .await
            .with_context(|| format!("Failed to run command {}", id))?,
        None => {
            aggregator
                .resolve(category, &document, position, &CancellationToken::none())
                .await
        }
    };

    info!(
        "Resolved {} {} target(s) in {:.1}ms",
        links.len(),
        category,
        start_time.elapsed().as_secs_f64() * 1000.0
    );

    let found = !links.is_empty();
    let resolution = Resolution::new(category, document, position, links, &failures.errors());

    // The manifest format was validated at load time
    let format = OutputFormat::from_config(&config.general.format).unwrap_or_default();
    let output = match format {
        OutputFormat::Json => render_json(&resolution)?,
        OutputFormat::Text => render_text(&resolution),
    };
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    if args.fail_on_empty && !found {
        return Ok(2);
    }

    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        debug!("Loading config from: {}", config_path.display());
        return Config::load(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            debug!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => Err(e).context("Failed to load default config"),
    }
}
