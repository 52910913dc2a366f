//! FitnessApp - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitnessapp_engine::{
    api,
    infrastructure::{
        clock::SystemClock,
        config::{AppSettings, Environment},
        persistence::Database,
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    let environment = Environment::from_env();
    let content_root = std::env::current_dir().context("resolving content root")?;
    let settings = AppSettings::load(&content_root, environment)
        .with_context(|| format!("loading {environment} settings"))?;

    // RUST_LOG wins over the configured filter.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.logging.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(%environment, "Starting FitnessApp");

    let database = Database::connect(&settings.connection_strings.fitness_app_database).await?;
    database.initialize_schema().await?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let app = Arc::new(App::new(database, settings, Arc::new(SystemClock::new())));

    app.seed_identity().await?;

    let router = api::routes(app).layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
