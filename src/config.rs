//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.policyscope.toml` files.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".policyscope.toml";

/// Endpoint value shipped in fresh configs; never contacted.
pub const PLACEHOLDER_ENDPOINT: &str = "YOUR_API_GATEWAY_ENDPOINT_URL";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Client (analyze) settings.
    #[serde(default)]
    pub client: ClientConfig,

    /// Analysis service (serve) settings.
    #[serde(default)]
    pub service: ServiceConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Settings for the request dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Analysis service URL (`.../analyze`).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Maximum characters of policy text sent upstream.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Maximum characters echoed back in the summary excerpt.
    #[serde(default = "default_excerpt_chars")]
    pub excerpt_chars: usize,

    /// Request timeout in seconds. Unset means the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            max_input_chars: default_max_input_chars(),
            excerpt_chars: default_excerpt_chars(),
            timeout_seconds: None,
        }
    }
}

fn default_endpoint() -> String {
    PLACEHOLDER_ENDPOINT.to_string()
}

fn default_max_input_chars() -> usize {
    3000
}

fn default_excerpt_chars() -> usize {
    300
}

/// Settings for the analysis service and its LLM provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_openai_url")]
    pub openai_url: String,

    /// Chat model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff.
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Provider request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            openai_url: default_openai_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-5.1".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_top_p() -> f32 {
    0.1
}

fn default_timeout() -> u64 {
    120
}

/// Whether an endpoint value must never be contacted.
pub fn is_placeholder_endpoint(endpoint: &str) -> bool {
    let endpoint = endpoint.trim();
    endpoint.is_empty() || endpoint == PLACEHOLDER_ENDPOINT || endpoint.contains("YOUR_")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Reject values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.client.max_input_chars == 0 {
            bail!("client.max_input_chars must be greater than 0");
        }
        Ok(())
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.policyscope.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if args.verbose {
            self.general.verbose = true;
        }

        match &args.command {
            Some(crate::cli::Command::Analyze(analyze)) => {
                if let Some(ref endpoint) = analyze.endpoint {
                    self.client.endpoint = endpoint.clone();
                }
                if let Some(timeout) = analyze.timeout {
                    self.client.timeout_seconds = Some(timeout);
                }
            }
            Some(crate::cli::Command::Serve(serve)) => {
                if let Some(ref bind) = serve.bind {
                    self.service.bind = bind.clone();
                }
                if let Some(ref model) = serve.model {
                    self.service.model = model.clone();
                }
                if let Some(ref url) = serve.openai_url {
                    self.service.openai_url = url.clone();
                }
            }
            None => {}
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.client.max_input_chars, 3000);
        assert_eq!(config.client.excerpt_chars, 300);
        assert!(config.client.timeout_seconds.is_none());
        assert_eq!(config.service.model, "gpt-5.1");
        assert!(is_placeholder_endpoint(&config.client.endpoint));
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[client]
endpoint = "https://abc123.execute-api.us-east-1.amazonaws.com/prod/analyze"
max_input_chars = 1500

[service]
model = "gpt-4o-mini"
top_p = 0.2
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.client.max_input_chars, 1500);
        assert_eq!(config.client.excerpt_chars, 300);
        assert!(!is_placeholder_endpoint(&config.client.endpoint));
        assert_eq!(config.service.model, "gpt-4o-mini");
        assert_eq!(config.service.top_p, 0.2);
        assert_eq!(config.service.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder_endpoint(""));
        assert!(is_placeholder_endpoint("   "));
        assert!(is_placeholder_endpoint(PLACEHOLDER_ENDPOINT));
        assert!(is_placeholder_endpoint("https://YOUR_API_ID.execute-api.amazonaws.com/analyze"));
        assert!(!is_placeholder_endpoint("http://127.0.0.1:8080/analyze"));
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[client]\nendpoint = \"http://localhost:9000/analyze\"\n",
        )
        .unwrap();

        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.client.endpoint, "http://localhost:9000/analyze");
    }

    #[test]
    fn test_load_rejects_zero_input_cap() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[client]\nmax_input_chars = 0\n",
        )
        .unwrap();

        let err = Config::load_from_dir(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("max_input_chars must be greater than 0"));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[client\nendpoint =").unwrap();
        assert!(Config::load_from_dir(dir.path()).is_err());
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[client]"));
        assert!(toml_str.contains("[service]"));
        assert!(toml_str.contains(PLACEHOLDER_ENDPOINT));
    }
}
