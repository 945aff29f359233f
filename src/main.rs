//! PoolPays Intelligence Hub server entry point.

use mimalloc::MiMalloc;

/// Global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use poolpays_hub::AppState;
use poolpays_hub::agents::{Orchestrator, Supervisor};
use poolpays_hub::config::AppConfig;
use poolpays_hub::llm::{Embedder, GeminiClient, Generator, load_gemini_settings};
use poolpays_hub::search::{RetrievalPolicy, SearchEngine};
use poolpays_hub::server::start_server;
use poolpays_hub::session::ThreadStore;
use poolpays_hub::store::VectorStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env (if present)
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let settings = match load_gemini_settings() {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Configuration error: {msg}");
            std::process::exit(1);
        }
    };

    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        fast_model = %settings.fast_model,
        smart_model = %settings.smart_model,
        embedding_model = %settings.embedding_model,
        "Gemini configuration loaded"
    );

    let gemini = Arc::new(GeminiClient::new(settings));
    let embedder: Arc<dyn Embedder> = Arc::clone(&gemini) as Arc<dyn Embedder>;
    let generator: Arc<dyn Generator> = gemini as Arc<dyn Generator>;

    let store = Arc::new(
        VectorStore::open(&config.persistence.store_path, Arc::clone(&embedder)).await?,
    );
    info!(
        name: "store.ready",
        path = %config.persistence.store_path,
        documents = store.stats().await.total_docs,
        "Vector store ready"
    );

    let policy = RetrievalPolicy::from(&config.retrieval);
    let search = SearchEngine::new(Arc::clone(&store), embedder, policy);
    let supervisor = Supervisor::new(Arc::clone(&generator));
    let orchestrator = Arc::new(Orchestrator::new(supervisor, search, generator));

    let state = AppState {
        store,
        orchestrator,
        threads: ThreadStore::new(),
        config: Arc::clone(&config),
    };

    start_server(config, state).await
}
