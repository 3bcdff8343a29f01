//! Raw HTTP/1.1 remotes shared by the integration tests.
//!
//! These answer exactly one connection with a canned response and hand the
//! received request bytes back through a oneshot channel. A dropped sender
//! means no request was served (e.g. the TLS handshake was rejected).

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const CREATED_RESPONSE: &str = "HTTP/1.1 201 Created\r\n\
Content-Type: application/json\r\n\
Content-Length: 16\r\n\
Connection: close\r\n\
\r\n\
{\"message\":\"ok\"}";

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0)
}

/// Read one request (head plus Content-Length body), then write `response`
pub async fn answer_raw<S>(mut stream: S, response: &str) -> Vec<u8>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
        if let Some(end) = head_end(&request) {
            if request.len() >= end + 4 + content_length(&request[..end]) {
                break;
            }
        }
    }
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
    request
}

/// Plain TCP remote answering a single connection
pub async fn serve_raw_once(response: &'static str) -> (SocketAddr, oneshot::Receiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let _ = tx.send(answer_raw(stream, response).await);
    });
    (addr, rx)
}

/// Self-signed certificate for `localhost`
pub struct SelfSigned {
    pub cert_pem: String,
    pub cert_der: CertificateDer<'static>,
    key_der: Vec<u8>,
}

impl SelfSigned {
    pub fn generate() -> Self {
        let key_pair = rcgen::KeyPair::generate().unwrap();
        let params = rcgen::CertificateParams::new(vec!["localhost".to_string()]).unwrap();
        let cert = params.self_signed(&key_pair).unwrap();
        SelfSigned {
            cert_pem: cert.pem(),
            cert_der: cert.der().clone(),
            key_der: key_pair.serialize_der(),
        }
    }

    /// Trust store holding only this certificate
    pub fn roots(&self) -> rustls::RootCertStore {
        let mut roots = rustls::RootCertStore::empty();
        roots.add(self.cert_der.clone()).unwrap();
        roots
    }
}

/// TLS remote answering a single connection with `identity`
pub async fn serve_tls_once(
    identity: &SelfSigned,
    response: &'static str,
) -> (SocketAddr, oneshot::Receiver<Vec<u8>>) {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(identity.key_der.clone()));
    let config = rustls::ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![identity.cert_der.clone()], key)
        .unwrap();
    let acceptor = tokio_rustls::TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let Ok(stream) = acceptor.accept(stream).await else {
            return;
        };
        let _ = tx.send(answer_raw(stream, response).await);
    });
    (addr, rx)
}
