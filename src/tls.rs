//! TLS client context provider
//!
//! The exchange asks the provider for a client context on every https POST.
//! Returning `None` is a normal outcome: the connection then falls back to
//! the platform default TLS configuration.

use anyhow::{anyhow, Context, Result};
use rustls::{ClientConfig, RootCertStore};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Client authentication policy requested from the provider
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientAuth {
    None,
    Want,
    Required,
}

/// Capability that yields a ready-to-use TLS client context on demand
pub trait TlsContextProvider: Send + Sync {
    fn create_client_context(&self, auth: ClientAuth) -> Option<ClientConfig>;
}

/// Provider backed by a PEM trust bundle, optionally merged with the
/// operating system's native roots
#[derive(Debug, Clone)]
pub struct PemTlsProvider {
    roots: Arc<RootCertStore>,
    source: PathBuf,
}

impl PemTlsProvider {
    pub fn from_pem_file(path: impl AsRef<Path>, use_native_roots: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open CA bundle {}", path.display()))?;
        let mut reader = BufReader::new(file);

        let mut roots = RootCertStore::empty();
        for cert in rustls_pemfile::certs(&mut reader) {
            let cert = cert.with_context(|| format!("Invalid PEM in {}", path.display()))?;
            roots
                .add(cert)
                .with_context(|| format!("Rejected certificate in {}", path.display()))?;
        }
        if roots.is_empty() {
            return Err(anyhow!("No certificates found in {}", path.display()));
        }

        if use_native_roots {
            let native = rustls_native_certs::load_native_certs();
            for err in &native.errors {
                tracing::warn!(error = %err, "Failed to load a native root certificate");
            }
            let (added, ignored) = roots.add_parsable_certificates(native.certs);
            tracing::debug!(added, ignored, "Merged native root certificates");
        }

        Ok(PemTlsProvider {
            roots: Arc::new(roots),
            source: path.to_path_buf(),
        })
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }
}

impl TlsContextProvider for PemTlsProvider {
    fn create_client_context(&self, auth: ClientAuth) -> Option<ClientConfig> {
        if auth != ClientAuth::None {
            // No client identity is held, so mutual TLS cannot be offered
            tracing::warn!(?auth, source = %self.source.display(), "Client authentication not supported by PEM provider");
            return None;
        }

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        match ClientConfig::builder_with_provider(provider).with_safe_default_protocol_versions() {
            Ok(builder) => Some(
                builder
                    .with_root_certificates(self.roots.clone())
                    .with_no_client_auth(),
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build TLS client context");
                None
            }
        }
    }
}
