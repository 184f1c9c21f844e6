use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use triage_core::config::{knowledge_pack_from_env_value, max_symptoms_from_env_value};
use triage_core::constants::DEFAULT_MAX_SYMPTOM_CHARS;
use triage_core::{CoreConfig, TriageService};

/// Main entry point for the triage server
///
/// Resolves configuration from the environment once, loads the knowledge tables, and serves the
/// REST API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `TRIAGE_KNOWLEDGE_PACK`: YAML knowledge pack replacing the built-in tables (optional)
/// - `TRIAGE_MAX_SYMPTOMS`: maximum symptoms per request (default: 32)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, knowledge loading, or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("triage_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("TRIAGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        knowledge_pack_from_env_value(std::env::var("TRIAGE_KNOWLEDGE_PACK").ok()),
        max_symptoms_from_env_value(std::env::var("TRIAGE_MAX_SYMPTOMS").ok())?,
        DEFAULT_MAX_SYMPTOM_CHARS,
    )?;

    match cfg.knowledge_pack() {
        Some(path) => tracing::info!("++ Using knowledge pack {}", path.display()),
        None => tracing::info!("++ Using built-in knowledge base"),
    }

    let triage_service = TriageService::new(&cfg)?;

    tracing::info!("++ Starting triage REST on {}", rest_addr);
    api_rest::serve(&rest_addr, AppState::new(triage_service)).await?;

    Ok(())
}
