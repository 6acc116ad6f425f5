//! Server configuration read from the environment.

use std::net::SocketAddr;

use facetfetch_core::principal::Principal;
use facetfetch_quest::domain::quest::QuestDefinition;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_LEDGER_NAME: &str = "facet-fetch";
const DEFAULT_GENESIS_QUESTS: &str = "Genesis Quest";

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to listen on.
    pub listen_addr: SocketAddr,
    /// PostgreSQL URL. `None` selects the in-memory event store.
    pub database_url: Option<String>,
    /// PostgreSQL pool size.
    pub database_max_connections: u32,
    /// Name of the ledger instance; selects its event streams.
    pub ledger_name: String,
    /// Principal that deploys the ledger and becomes its first admin.
    pub deployer: Principal,
    /// Titles of quests seeded at deployment, in id order.
    pub genesis_quests: Vec<String>,
    /// OTLP gRPC endpoint. `None` disables trace export.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or malformed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = non_empty("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };
        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;

        let database_max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}"))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let deployer = non_empty("DEPLOYER_PRINCIPAL")
            .ok_or_else(|| {
                AppError::Config("DEPLOYER_PRINCIPAL environment variable must be set".to_owned())
            })
            .and_then(|raw| {
                Principal::parse(&raw)
                    .map_err(|e| AppError::Config(format!("DEPLOYER_PRINCIPAL: {e}")))
            })?;

        // An explicitly empty list disables seeding.
        let genesis_quests: Vec<String> = lookup("GENESIS_QUESTS")
            .unwrap_or_else(|| DEFAULT_GENESIS_QUESTS.to_owned())
            .split(',')
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(str::to_owned)
            .collect();
        for title in &genesis_quests {
            QuestDefinition::new(title, None, None)
                .map_err(|e| AppError::Config(format!("GENESIS_QUESTS: {e}")))?;
        }

        Ok(Self {
            listen_addr,
            database_url: non_empty("DATABASE_URL"),
            database_max_connections,
            ledger_name: non_empty("LEDGER_NAME").unwrap_or_else(|| DEFAULT_LEDGER_NAME.to_owned()),
            deployer,
            genesis_quests,
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
