// Main entry point - Dependency injection, CLI and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::table_source::TableSource;
use crate::application::template_service::TemplateService;
use crate::infrastructure::config::{load_config, AppConfig, SourceKind, DEFAULT_CONFIG_PATH};
use crate::infrastructure::document_writer::JsonDocumentWriter;
use crate::infrastructure::file_source::JsonFileSource;
use crate::infrastructure::sheets_source::SheetsSource;
use crate::infrastructure::uuid_generator::UuidGenerator;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{generate_templates, health_check};

#[derive(Debug, Parser)]
#[command(
    name = "board-templates",
    version,
    about = "Build dashboard and report templates from an outline sheet."
)]
struct Args {
    /// Config file, with or without extension.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch the outline once and write the template document (default).
    Generate {
        /// Overrides output.path from the config.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve freshly generated templates over HTTP.
    Serve {
        /// Overrides server.addr from the config.
        #[arg(long)]
        addr: Option<SocketAddr>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Load configuration
    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config))?;

    // Create services (application layer)
    let template_service = build_service(&config)?;

    match args.command.unwrap_or(Command::Generate { output: None }) {
        Command::Generate { output } => {
            let writer = JsonDocumentWriter::new(output.unwrap_or_else(|| config.output.path.clone().into()));
            let document = template_service.generate().await?;
            writer.write(&document).await?;
            tracing::info!("Template JSON generated successfully at {}", writer.path().display());
        }
        Command::Serve { addr } => {
            let addr = match addr {
                Some(addr) => addr,
                None => config
                    .server
                    .addr
                    .parse()
                    .with_context(|| format!("Invalid server.addr {}", config.server.addr))?,
            };
            serve(template_service, addr).await?;
        }
    }

    Ok(())
}

fn build_service(config: &AppConfig) -> anyhow::Result<TemplateService> {
    // Create row source (infrastructure layer)
    let source: Arc<dyn TableSource> = match config.source.kind {
        SourceKind::Sheets => Arc::new(SheetsSource::new(config.sheets.clone())?),
        SourceKind::File => Arc::new(JsonFileSource::new(&config.source.path)),
    };

    Ok(TemplateService::new(
        source,
        Arc::new(UuidGenerator),
        config.template.name.clone(),
        config.parser.clone(),
    ))
}

async fn serve(template_service: TemplateService, addr: SocketAddr) -> anyhow::Result<()> {
    let state = Arc::new(AppState { template_service });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/templates", get(generate_templates))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Starting board-templates service on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
