use crate::constants::{
    DEFAULT_BACKOFF_BASE_MS, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_MAX_ATTEMPTS, DEFAULT_PORT,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_WORDPRESS_ACF_URL, DEFAULT_WORDPRESS_API_URL,
};
use crate::error::{Result, SiteError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cms: CmsConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CmsConfig {
    pub api_url: String,
    pub acf_url: String,
    pub timeout_seconds: u64,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
    pub cache_ttl_seconds: u64,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_WORDPRESS_API_URL.to_string(),
            acf_url: DEFAULT_WORDPRESS_ACF_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl CmsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn backoff_base(&self) -> Duration {
        Duration::from_millis(self.backoff_base_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Where booking and career submissions are forwarded. Submissions are
    /// only logged when unset.
    pub submission_forward_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            submission_forward_url: None,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory (if present) and applies
    /// environment overrides, including those from a `.env` file.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::load_from(DEFAULT_CONFIG_PATH, |key| std::env::var(key).ok())
    }

    pub fn load_from<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let config_content = fs::read_to_string(path).map_err(|e| {
                SiteError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            toml::from_str(&config_content)?
        } else {
            Config::default()
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WORDPRESS_API_URL") {
            self.cms.api_url = url;
        }
        if let Some(url) = lookup("WORDPRESS_ACF_URL") {
            self.cms.acf_url = url;
        }
        if let Some(v) = lookup("CMS_TIMEOUT_SECONDS") {
            self.cms.timeout_seconds = parse_var("CMS_TIMEOUT_SECONDS", &v)?;
        }
        if let Some(v) = lookup("CMS_MAX_ATTEMPTS") {
            self.cms.max_attempts = parse_var("CMS_MAX_ATTEMPTS", &v)?;
        }
        if let Some(v) = lookup("CMS_BACKOFF_BASE_MS") {
            self.cms.backoff_base_ms = parse_var("CMS_BACKOFF_BASE_MS", &v)?;
        }
        if let Some(v) = lookup("CMS_CACHE_TTL_SECONDS") {
            self.cms.cache_ttl_seconds = parse_var("CMS_CACHE_TTL_SECONDS", &v)?;
        }
        if let Some(url) = lookup("SUBMISSION_FORWARD_URL") {
            self.server.submission_forward_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_var("PORT", &v)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.cms.api_url.trim().is_empty() || self.cms.acf_url.trim().is_empty() {
            return Err(SiteError::Config("CMS base URLs must not be empty".into()));
        }
        if self.cms.max_attempts == 0 {
            return Err(SiteError::Config("cms.max_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| SiteError::Config(format!("Invalid value for {}: '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml"), |_| None).unwrap();
        assert_eq!(config.cms.api_url, DEFAULT_WORDPRESS_API_URL);
        assert_eq!(config.cms.acf_url, DEFAULT_WORDPRESS_ACF_URL);
        assert_eq!(config.cms.max_attempts, 3);
        assert_eq!(config.cms.timeout(), Duration::from_secs(10));
        assert_eq!(config.cms.cache_ttl(), Duration::from_secs(3600));
        assert!(config.server.submission_forward_url.is_none());
    }

    #[test]
    fn file_values_are_overridden_by_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cms]\napi_url = \"http://file.example/wp-json/wp/v2\"\nmax_attempts = 5\n\n[server]\nport = 8081"
        )
        .unwrap();

        let vars = env(&[
            ("WORDPRESS_API_URL", "http://cms.example/wp-json/wp/v2"),
            ("PORT", "9000"),
        ]);
        let config = Config::load_from(file.path(), |k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.cms.api_url, "http://cms.example/wp-json/wp/v2");
        assert_eq!(config.cms.acf_url, DEFAULT_WORDPRESS_ACF_URL);
        assert_eq!(config.cms.max_attempts, 5);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn rejects_unparseable_override() {
        let vars = env(&[("CMS_MAX_ATTEMPTS", "three")]);
        let err = Config::load_from("does-not-exist.toml", |k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn rejects_zero_attempts() {
        let vars = env(&[("CMS_MAX_ATTEMPTS", "0")]);
        assert!(Config::load_from("does-not-exist.toml", |k| vars.get(k).cloned()).is_err());
    }
}
