//! Server configuration
//!
//! Read from an optional TOML file; every key falls back to its default:
//! ```toml
//! bind = "127.0.0.1:5000"
//! max_upload_bytes = 1048576
//! allowed_extensions = ["yml", "yaml"]
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on (localhost only by default)
    pub bind: SocketAddr,
    /// Largest accepted request body for uploads
    pub max_upload_bytes: usize,
    /// Accepted deck file extensions, lowercase, without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_upload_bytes: 1024 * 1024,
            allowed_extensions: vec!["yml".to_string(), "yaml".to_string()],
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Whether `filename` has one of the allowed extensions (case-insensitive)
    pub fn allows_file(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|e| *e == ext)
            }
            None => false,
        }
    }

    /// Allowed extensions as shown to users, e.g. ".yml or .yaml"
    pub fn allowed_extensions_display(&self) -> String {
        let exts: Vec<String> = self
            .allowed_extensions
            .iter()
            .map(|e| format!(".{}", e))
            .collect();
        match exts.split_last() {
            Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
            Some((last, _)) => last.clone(),
            None => "no".to_string(),
        }
    }

    /// Upload limit in human-readable form
    pub fn upload_limit_display(&self) -> String {
        const MB: usize = 1024 * 1024;
        const KB: usize = 1024;
        let n = self.max_upload_bytes;
        if n >= MB && n % MB == 0 {
            format!("{} MB", n / MB)
        } else if n >= KB && n % KB == 0 {
            format!("{} KB", n / KB)
        } else {
            format!("{} bytes", n)
        }
    }
}
