//! Server configuration

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Model artifact holding the vectorizer and classifier
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl ServerConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };

        config.apply_overrides(cli);
        Ok(config)
    }

    /// Parse configuration from YAML
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply CLI overrides
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.model_path = model.clone();
        }

        if let Some(listen) = &cli.listen {
            self.listen = listen.clone();
        }

        if let Some(port) = cli.port {
            self.port = port;
        }
    }

    /// Address to bind
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.listen, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            listen: default_listen(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Install the Prometheus recorder and serve /metrics
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_model_path() -> PathBuf {
    PathBuf::from("spam_bundle.json")
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.model_path, PathBuf::from("spam_bundle.json"));
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:5000");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = ServerConfig::from_yaml(
            r#"
model_path: ./models/prod.yaml
port: 8080
metrics:
  enabled: false
"#,
        )
        .unwrap();

        assert_eq!(config.model_path, PathBuf::from("./models/prod.yaml"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.listen, "127.0.0.1");
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "model_path: from-file.json\nport: 7000").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from([
            "mailsift",
            "--config",
            &path,
            "--model",
            "from-cli.json",
            "-l",
            "0.0.0.0",
        ]);
        let config = ServerConfig::load(&cli.config, &cli).unwrap();

        assert_eq!(config.model_path, PathBuf::from("from-cli.json"));
        assert_eq!(config.port, 7000);
        assert_eq!(config.listen, "0.0.0.0");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cli = Cli::parse_from(["mailsift", "--config", "/no/such/mailsift.yaml", "-P", "9999"]);
        let config = ServerConfig::load(&cli.config, &cli).unwrap();

        assert_eq!(config.port, 9999);
        assert_eq!(config.model_path, PathBuf::from("spam_bundle.json"));
    }

    #[test]
    fn test_invalid_listen_address() {
        let config = ServerConfig {
            listen: "not an address".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
