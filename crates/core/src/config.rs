use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `PRODUCT_LOBBY__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_instance_id")]
    pub instance_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub digest: DigestConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Weekly creator digest settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    #[serde(default = "default_digest_enabled")]
    pub enabled: bool,
    /// How often the scheduler fires. 168h = weekly.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
    /// Activity window summarized in each digest.
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

// Default functions
fn default_instance_id() -> String {
    "lobby-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_digest_enabled() -> bool {
    true
}
fn default_interval_hours() -> u64 {
    168
}
fn default_window_days() -> i64 {
    7
}
fn default_from_email() -> String {
    "digest@productlobby.example".to_string()
}
fn default_from_name() -> String {
    "ProductLobby Weekly".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            enabled: default_digest_enabled(),
            interval_hours: default_interval_hours(),
            window_days: default_window_days(),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            instance_id: default_instance_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            digest: DigestConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("PRODUCT_LOBBY")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
