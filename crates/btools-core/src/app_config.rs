use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Catalog location: an `http(s)://` URL or a local JSON/YAML path.
    pub catalog: String,
    pub data_dir: PathBuf,
    pub api_keys: Vec<String>,
    pub catalog_timeout_secs: u64,
    pub catalog_user_agent: String,
    pub catalog_max_retries: u32,
    pub catalog_retry_backoff_ms: u64,
    pub saved_searches_max: usize,
    /// Implicit minimum dominant-gender share (percent) for the audience
    /// gender filter.
    pub gender_dominance_min: f64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("catalog", &self.catalog)
            .field("data_dir", &self.data_dir)
            .field(
                "api_keys",
                &format_args!("[{} redacted]", self.api_keys.len()),
            )
            .field("catalog_timeout_secs", &self.catalog_timeout_secs)
            .field("catalog_user_agent", &self.catalog_user_agent)
            .field("catalog_max_retries", &self.catalog_max_retries)
            .field("catalog_retry_backoff_ms", &self.catalog_retry_backoff_ms)
            .field("saved_searches_max", &self.saved_searches_max)
            .field("gender_dominance_min", &self.gender_dominance_min)
            .finish()
    }
}
