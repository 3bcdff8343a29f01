//! Processor configuration, loaded once and immutable afterwards

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::network::client::Timeouts;
use crate::tls::{PemTlsProvider, TlsContextProvider};

/// TLS section: trust bundle used for https targets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TlsConfig {
    pub ca_certs: PathBuf,
    #[serde(default)]
    pub use_native_roots: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// URL template, may contain placeholders
    pub url: String,
    /// JSON body template, may contain placeholders
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tls: Option<TlsConfig>,
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
    #[serde(default)]
    pub read_timeout_ms: Option<u64>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ProcessorConfig {
    pub fn new(url: impl Into<String>, body: Option<String>) -> Self {
        ProcessorConfig {
            url: url.into(),
            body,
            tls: None,
            connect_timeout_ms: None,
            read_timeout_ms: None,
            log_level: default_log_level(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: ProcessorConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Field-level checks; templates are only fully checked per work item
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("'url' must not be empty"));
        }
        if let Some(body) = &self.body {
            if body.trim().is_empty() {
                return Err(anyhow!("'body' must not be empty when set"));
            }
        }
        if self.connect_timeout_ms == Some(0) || self.read_timeout_ms == Some(0) {
            return Err(anyhow!("timeouts must be greater than zero"));
        }
        Ok(())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: self.connect_timeout_ms.map(Duration::from_millis),
            read: self.read_timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn build_tls_provider(&self) -> Result<Option<Arc<dyn TlsContextProvider>>> {
        match &self.tls {
            Some(tls) => {
                let provider = PemTlsProvider::from_pem_file(&tls.ca_certs, tls.use_native_roots)?;
                tracing::info!(roots = provider.root_count(), "Loaded TLS trust bundle");
                let provider: Arc<dyn TlsContextProvider> = Arc::new(provider);
                Ok(Some(provider))
            }
            None => Ok(None),
        }
    }
}
