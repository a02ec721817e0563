use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use vintner::{
    AnswererBuilder, AssistantConfig, ConfigError, Controller, ModelSelection,
    ServingClientBuilder, Session, VectorSearchClientBuilder, logging, tui,
};

/// vintner - RAG-backed California wine country visit assistant
#[derive(Parser)]
#[command(name = "vintner")]
#[command(about = "A terminal visit assistant for California wine country")]
#[command(version)]
struct Cli {
    /// Env file to load before reading configuration
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Initial foundation model selection
    #[arg(long, value_name = "MODEL")]
    model: Option<String>,

    /// Start with brochure context enabled
    #[arg(long)]
    use_context: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        // Configuration mistakes are the user's to fix; everything else is
        // an internal failure
        let exit_code = if is_config_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e}");
        std::process::exit(exit_code);
    }
}

/// Determines if an error is a configuration error (vs internal error).
fn is_config_error(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| cause.is::<ConfigError>())
}

/// Loads configuration, wires the clients, and hands off to the TUI.
fn run(cli: &Cli) -> Result<()> {
    // An explicitly named env file must exist; the implicit .env lookup in
    // from_env stays best effort
    if let Some(path) = &cli.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("Failed to load env file: {}", path.display()))?;
    }

    // Fail fast: no client is built until all four settings are present
    let config = AssistantConfig::from_env().context("Configuration is incomplete")?;

    if let Some(log_dir) = logging::default_log_dir() {
        logging::init(&log_dir);
    }

    let initial_model = match cli.model.as_deref() {
        Some(name) => ModelSelection::parse(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown model: {name}"))?,
        None => ModelSelection::default(),
    };

    let retriever = VectorSearchClientBuilder::new()
        .host(config.host())
        .token(config.token())
        .endpoint(config.vs_endpoint())
        .index(config.vs_index())
        .build()
        .context("Failed to create vector search client")?;

    let serving = ServingClientBuilder::new()
        .host(config.host())
        .token(config.token())
        .build()
        .context("Failed to create serving client")?;

    let answerer = AnswererBuilder::new()
        .retriever(Arc::new(retriever))
        .client(Arc::new(serving))
        .build();

    let mut session = Session::new();
    session.set_model(initial_model);
    session.set_use_context(cli.use_context);

    let mut app = tui::App::new(Controller::new(answerer), session);
    tui::run(&mut app)
}
