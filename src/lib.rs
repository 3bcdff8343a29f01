//! # json-post
//!
//! A data-flow processor that POSTs a templated JSON body to a templated URL
//! and routes the triggering work item on the response status.
//!
//! ## Features
//! - `${attr}` / `{attr}` placeholders in URL and body templates
//! - JSON body validation and minification before any I/O
//! - Optional TLS trust bundle for https targets
//! - Response status, message, host, content type and body captured as attributes
//! - Routing to `Success` (200/201) or `Failure` (everything else, and errors)
//!
//! ## Architecture
//! - Request builder (templates -> concrete request)
//! - HTTP exchange (reqwest on the host's Tokio runtime)
//! - Router (response or error -> destination + attributes)

pub mod config;
pub mod constants;
pub mod error;
pub mod expression;
pub mod models;
pub mod network;
pub mod processor;
pub mod request;
pub mod router;
pub mod session;
pub mod tls;

// Re-export commonly used types
pub use config::{ProcessorConfig, TlsConfig};
pub use error::ProcessError;
pub use expression::evaluate;
pub use models::{Attributes, Relationship, RequestSpec, ResponseRecord, WorkItem};
pub use network::{HttpExchange, Timeouts};
pub use processor::PostJsonProcessor;
pub use request::resolve;
pub use router::{route, Routing};
pub use session::{MemorySession, Session};
pub use tls::{ClientAuth, PemTlsProvider, TlsContextProvider};
