use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Postgres
    pub database_url: String,

    // Neo4j
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,

    // Twitter API
    pub twitter_bearer_token: String,
    pub twitter_api_base: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            database_url: required_env("DATABASE_URL"),
            neo4j_uri: required_env("NEO4J_URI"),
            neo4j_user: required_env("NEO4J_USER"),
            neo4j_password: required_env("NEO4J_PASSWORD"),
            twitter_bearer_token: required_env("TWITTER_BEARER_TOKEN"),
            twitter_api_base: env::var("TWITTER_API_BASE").ok(),
        }
    }

    /// Log the effective configuration with credentials redacted.
    pub fn log_redacted(&self) {
        tracing::info!(
            neo4j_uri = %self.neo4j_uri,
            neo4j_user = %self.neo4j_user,
            twitter_api_base = %self
                .twitter_api_base
                .as_deref()
                .unwrap_or("(default)"),
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
