mod agent;
mod config;
mod errors;
mod experience;
mod knowledge;
mod llm_client;
mod models;
mod prompts;
mod render;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::agent::Agent;
use crate::config::Config;
use crate::experience::ExperienceDb;
use crate::knowledge::KnowledgeBase;
use crate::llm_client::LlmClient;
use crate::prompts::PromptRegistry;
use crate::render::DocumentRenderer;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars,
    // including the API credential)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Dossier API v{}", env!("CARGO_PKG_VERSION"));

    // All shared state is constructed here, before serving begins, and is
    // read-only afterwards. Prompt and knowledge sources load lazily on
    // first use and stay cached for the process lifetime.
    let experience = ExperienceDb::load(&config.experience_path())?;

    let knowledge = KnowledgeBase::new(config.knowledge_dir());
    let prompt_registry = PromptRegistry::new(config.prompts_path());

    let renderer = DocumentRenderer::load(&config.templates_dir())?;
    info!("Document templates registered");

    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let agent = Agent::new(
        experience,
        knowledge,
        prompt_registry,
        renderer,
        Arc::new(llm),
    );

    let state = AppState {
        agent: Arc::new(agent),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
