use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

const ENV_CONFIG_PATH: &str = "HACKCOURT_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "GROQ_API_KEY";
const ENV_BASE_URL: &str = "INFERENCE_BASE_URL";
const ENV_MODEL: &str = "INFERENCE_MODEL";
const ENV_TIMEOUT_MS: &str = "INFERENCE_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Inference service settings as written in the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InferenceFileConfig {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout_ms: Option<u64>,
    pub temperature: Option<f32>,
    /// File holding a locally persisted credential
    pub credential_file: Option<String>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub inference: InferenceFileConfig,
}

/// Resolved inference service settings
#[derive(Clone)]
pub struct InferenceConfig {
    pub base_url: Url,
    pub model: String,
    pub timeout: Duration,
    pub temperature: f32,
    /// Absent credential routes every case to the deterministic engine
    pub api_key: Option<String>,
}

impl std::fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            temperature: DEFAULT_TEMPERATURE,
            api_key: None,
        }
    }
}

impl InferenceConfig {
    /// Merge file settings with environment overrides
    fn resolve(file: InferenceFileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = env(ENV_BASE_URL)
            .or(file.base_url)
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(url = %raw, error = %e, "Invalid inference base URL, using default");
                    None
                }
            })
            .unwrap_or_else(default_base_url);

        let model = env(ENV_MODEL)
            .or(file.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let timeout_ms = env(ENV_TIMEOUT_MS)
            .and_then(|v| v.parse().ok())
            .or(file.timeout_ms)
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let api_key = env(ENV_API_KEY)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .or_else(|| file.credential_file.as_deref().and_then(read_credential_file));

        Self {
            base_url,
            model,
            timeout: Duration::from_millis(timeout_ms),
            temperature: file.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            api_key,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub inference: InferenceConfig,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();
        let inference = InferenceConfig::resolve(file.inference, |key| std::env::var(key).ok());

        Self {
            inference,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => parse_config_file(&contents, path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_config_file(contents: &str, path: &Path) -> Option<ConfigFile> {
    let contents = contents.trim();
    if contents.is_empty() {
        tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
        return Some(ConfigFile::default());
    }

    match serde_yaml::from_str(contents) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Loaded configuration from file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
            None
        }
    }
}

/// First non-empty line of the persisted credential file
fn read_credential_file(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string),
        Err(e) => {
            tracing::debug!(path = %path, error = %e, "Credential file unavailable");
            None
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = InferenceConfig::resolve(InferenceFileConfig::default(), env_from(&[]));
        assert_eq!(config.base_url.as_str(), "https://api.groq.com/openai/v1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_millis(2000));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let file = InferenceFileConfig {
            model: Some("file-model".to_string()),
            timeout_ms: Some(500),
            ..Default::default()
        };
        let config = InferenceConfig::resolve(
            file,
            env_from(&[(ENV_MODEL, "env-model"), (ENV_API_KEY, " gsk-123 ")]),
        );
        assert_eq!(config.model, "env-model");
        assert_eq!(config.timeout, Duration::from_millis(500));
        assert_eq!(config.api_key.as_deref(), Some("gsk-123"));
    }

    #[test]
    fn test_blank_api_key_counts_as_absent() {
        let config =
            InferenceConfig::resolve(InferenceFileConfig::default(), env_from(&[(ENV_API_KEY, "  ")]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_base_url_falls_back() {
        let config = InferenceConfig::resolve(
            InferenceFileConfig::default(),
            env_from(&[(ENV_BASE_URL, "not a url")]),
        );
        assert_eq!(config.base_url.as_str(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_parse_yaml_file() {
        let yaml = "inference:\n  model: mixtral\n  timeout_ms: 1500\n  temperature: 0.5\n";
        let file = parse_config_file(yaml, Path::new("config.yaml")).unwrap();
        assert_eq!(file.inference.model.as_deref(), Some("mixtral"));
        assert_eq!(file.inference.timeout_ms, Some(1500));
        assert_eq!(file.inference.temperature, Some(0.5));
    }

    #[test]
    fn test_empty_and_broken_yaml() {
        assert!(parse_config_file("   ", Path::new("c.yaml")).is_some());
        assert!(parse_config_file("inference: [oops", Path::new("c.yaml")).is_none());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = InferenceConfig {
            api_key: Some("secret-key".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
