// src/config.rs - Configuration loading: defaults, optional TOML file, .env and environment
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub keep_alive: u64,
    pub client_timeout: u64,
}

/// Where the biosample API lives.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub page_size: i64,
    /// Pause between a saved form and the detail screen.
    pub redirect_delay_ms: u64,
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            workers: None,
            keep_alive: 30,
            client_timeout: 30,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            redirect_delay_ms: 1500,
            static_dir: "static".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    load_env_file()?;

    let mut config = if let Ok(config_file) = env::var("CONFIG_FILE") {
        load_config_file(Path::new(&config_file))?
    } else {
        Config::default()
    };

    config.apply_overrides(|key| env::var(key).ok());

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            None
        }
    }
}

impl Config {
    /// Applies environment-style overrides. `lookup` is `env::var` outside
    /// of tests.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BIOSAMPLE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = parsed(&lookup, "API_TIMEOUT_SECONDS") {
            self.api.timeout_seconds = timeout;
        }
        if let Some(host) = lookup("BIND_ADDRESS") {
            self.server.host = host;
        }
        if let Some(port) = parsed(&lookup, "UI_PORT") {
            self.server.port = port;
        }
        if let Some(workers) = parsed(&lookup, "UI_WORKERS") {
            self.server.workers = Some(workers);
        }
        if let Some(size) = parsed(&lookup, "UI_PAGE_SIZE") {
            self.ui.page_size = size;
        }
        if let Some(delay) = parsed(&lookup, "UI_REDIRECT_DELAY_MS") {
            self.ui.redirect_delay_ms = delay;
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.ui.static_dir = dir;
        }
        if let Some(level) = lookup("RUST_LOG") {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .with_context(|| format!("BIOSAMPLE_API_URL is not a valid URL: {}", self.api.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "BIOSAMPLE_API_URL must use http or https (got {})",
                url.scheme()
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.ui.page_size) {
            return Err(anyhow::anyhow!(
                "page_size must be between 1 and {} (current: {})",
                MAX_PAGE_SIZE,
                self.ui.page_size
            ));
        }

        if self.api.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("API timeout must be at least one second"));
        }

        if self.server.workers == Some(0) {
            return Err(anyhow::anyhow!("workers must be greater than zero"));
        }

        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.ui.redirect_delay_ms)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn print_startup_info(&self) {
        log::info!("🧪 BioSample UI starting up...");
        log::info!("🌐 Server: http://{}", self.bind_address());
        log::info!("🔗 API: {} ({}s timeout)", self.api.base_url, self.api.timeout_seconds);
        log::info!("📄 Page size: {}, redirect delay: {}ms", self.ui.page_size, self.ui.redirect_delay_ms);
        log::info!("📁 Static assets: {}", self.ui.static_dir);
        log::info!("📊 Logging: {} level", self.logging.level);
    }
}

pub fn load_env_file() -> Result<()> {
    if let Ok(env_file) = env::var("ENV_FILE") {
        dotenvy::from_filename(&env_file)
            .with_context(|| format!("Failed to load environment file: {}", env_file))?;
    } else if Path::new(".env").exists() {
        dotenvy::dotenv().context("Failed to load .env file")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use tokio_test::{assert_err, assert_ok};

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.ui.page_size, 10);
        assert_eq!(config.redirect_delay(), Duration::from_millis(1500));
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[
            ("BIOSAMPLE_API_URL", "https://api.example.org/v1"),
            ("UI_PORT", "8081"),
            ("UI_PAGE_SIZE", "25"),
            ("UI_WORKERS", "4"),
            ("API_TIMEOUT_SECONDS", "5"),
            ("RUST_LOG", "debug"),
        ]));
        assert_eq!(config.api.base_url, "https://api.example.org/v1");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.server.workers, Some(4));
        assert_eq!(config.api_timeout(), Duration::from_secs(5));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unparseable_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(vars(&[("UI_PORT", "not-a-port")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.ui.page_size = 0;
        assert_err!(config.validate());
        config.ui.page_size = 101;
        assert_err!(config.validate());
        config.ui.page_size = 100;
        assert_ok!(config.validate());

        config.api.base_url = "not a url".to_string();
        assert_err!(config.validate());
        config.api.base_url = "ftp://files.example.org".to_string();
        assert_err!(config.validate());
    }

    #[test]
    fn test_partial_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://backend:9000\"\n\n[ui]\npage_size = 20").unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://backend:9000");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.ui.page_size, 20);
        assert_eq!(config.ui.redirect_delay_ms, 1500);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config_file(Path::new("/nonexistent/biosample-ui.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
