//! Application configuration.
//!
//! Layering, lowest to highest priority: built-in defaults, optional config
//! file, `HUB_`-prefixed environment variables (`__` separator, e.g.
//! `HUB_SERVER__PORT=8000`), then explicit CLI flags.

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::search::RetrievalPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Host to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Path of the persisted vector store snapshot
    #[arg(long, env = "STORE_PATH")]
    pub store_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub retrieval: RetrievalConfig,
    pub persistence: PersistenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Tuned retrieval constants (see [`RetrievalPolicy`] for semantics).
#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    pub similarity_floor: f32,
    pub max_results: usize,
    pub history_window: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PersistenceConfig {
    /// Path of the single JSON snapshot holding the document collection.
    pub store_path: String,
}

impl From<&RetrievalConfig> for RetrievalPolicy {
    fn from(cfg: &RetrievalConfig) -> Self {
        Self {
            similarity_floor: cfg.similarity_floor,
            max_results: cfg.max_results,
            history_window: cfg.history_window,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let defaults = RetrievalPolicy::default();

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("retrieval.similarity_floor", f64::from(defaults.similarity_floor))?
            .set_default("retrieval.max_results", defaults.max_results as u64)?
            .set_default("retrieval.history_window", defaults.history_window as u64)?
            .set_default("persistence.store_path", "data/vector-store.json")?;

        if let Some(path) = &cli.config {
            builder = builder.add_source(File::with_name(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("HUB")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(path) = cli.store_path {
            builder = builder.set_override("persistence.store_path", path)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
