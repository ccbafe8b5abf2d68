//! Policyscope - privacy policy summaries with severity badges
//!
//! A CLI that sends privacy policy text to an analysis service and shows
//! a four-part summary (collection, sharing, retention, overall risk). The
//! same binary can run that analysis service in front of an
//! OpenAI-compatible model.
//!
//! Exit codes:
//!   0 - Summary shown (real or sample) / service stopped cleanly
//!   1 - Input validation, configuration or runtime error

mod bridge;
mod cli;
mod config;
mod dispatcher;
mod models;
mod service;
mod ui;

use anyhow::{Context, Result};
use bridge::{HostRuntime, LocalHost, PageSource};
use chrono::Utc;
use cli::{AnalyzeArgs, Args, Command, OutputFormat, ServeArgs};
use config::Config;
use dispatcher::{ReqwestTransport, RequestDispatcher};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;
use ui::{Popup, PopupState};

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

    // Load configuration first so the file can turn on verbose logging
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("Policyscope v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Configuration: {:?}", config);

    let result = match args.command.clone() {
        Some(Command::Analyze(analyze)) => run_analyze(&args, &config, analyze).await,
        Some(Command::Serve(serve)) => run_serve(&config, serve).await,
        None => Ok(1),
    };

    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .policyscope.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", config::CONFIG_FILE_NAME);
    println!("   Set client.endpoint to your analysis service URL.");
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

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            eprintln!("⚠️  Failed to load config, using defaults: {:#}", e);
            Ok(Config::default())
        }
    }
}

/// Summarize one policy and print it. Returns the exit code.
async fn run_analyze(args: &Args, config: &Config, analyze: AnalyzeArgs) -> Result<i32> {
    let transport = ReqwestTransport::new(config.client.timeout_seconds)
        .context("Failed to set up the HTTP transport")?;
    let dispatcher = Arc::new(RequestDispatcher::new(&config.client, Arc::new(transport)));
    let (runtime, _worker) = bridge::spawn_worker(dispatcher);

    let source = match (analyze.text, analyze.file) {
        (Some(text), _) => PageSource::Inline(text),
        (None, Some(path)) => PageSource::File(path),
        (None, None) => PageSource::Stdin,
    };
    let host: Box<dyn HostRuntime> = Box::new(LocalHost::new(runtime, source));

    let text = host.active_page_text().await?;

    let mut popup = Popup::new();
    let message = match popup.submit(&text) {
        Ok(message) => message,
        Err(e) => {
            eprintln!("⚠️  {}", e);
            return Ok(1);
        }
    };

    let spinner = pending_spinner(args.quiet);
    let response = host.send_message(message).await?;
    spinner.finish_and_clear();

    if let PopupState::RenderedWithFallback(fallback) = popup.complete(response) {
        debug!(
            "Showing sample summary: {}",
            fallback.error.as_deref().unwrap_or("unknown error")
        );
    }

    let Some(response) = popup.rendered() else {
        return Ok(1);
    };

    let output = match analyze.format {
        OutputFormat::Text => ui::render_text(response, popup.status_line()),
        OutputFormat::Markdown => ui::render_markdown(response, Utc::now()),
        OutputFormat::Json => ui::render_json(response)?,
    };

    println!("{}", output.trim_end());

    if let Some(ref path) = analyze.output {
        ui::write_output(&output, path)?;
        info!("Summary saved to: {}", path.display());
    }

    Ok(0)
}

/// Spinner shown while a request is pending.
fn pending_spinner(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Analyzing policy...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run the analysis service until stopped.
async fn run_serve(config: &Config, serve: ServeArgs) -> Result<i32> {
    let api_key = serve
        .api_key
        .context("An API key is required: pass --api-key or set OPENAI_API_KEY")?;

    println!("🛰️  Starting analysis service...");
    println!("   Model: {}", config.service.model);
    println!("   Provider: {}", config.service.openai_url);
    println!("   Bind: {}", config.service.bind);

    let provider = service::OpenAiProvider::new(&config.service, api_key)
        .context("Failed to set up the model provider")?;
    service::run(&config.service.bind, Arc::new(provider)).await?;

    Ok(0)
}
