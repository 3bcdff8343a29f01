//! Processor - drives one trigger from work item to routed outcome
//!
//! Each trigger resolves the templates against the item's attributes, POSTs
//! the body, and routes the item. Errors route the item to `Failure` first
//! and are then returned to the host so both the routed item and the
//! processing error are observable.

use anyhow::Result;
use std::sync::Arc;

use crate::config::ProcessorConfig;
use crate::error::ProcessError;
use crate::models::{Relationship, ResponseRecord, WorkItem};
use crate::network::client::HttpExchange;
use crate::request;
use crate::router::route;
use crate::session::Session;
use crate::tls::TlsContextProvider;

pub struct PostJsonProcessor {
    url_template: String,
    body_template: Option<String>,
    exchange: HttpExchange,
}

impl PostJsonProcessor {
    /// Build from validated configuration, loading the TLS provider if set
    pub fn new(config: &ProcessorConfig) -> Result<Self> {
        config.validate()?;
        let tls_provider = config.build_tls_provider()?;
        let exchange = HttpExchange::new(tls_provider, config.timeouts())?;
        Ok(Self::with_exchange(
            config.url.clone(),
            config.body.clone(),
            exchange,
        ))
    }

    /// Build with an explicit TLS provider instead of the configured one
    pub fn with_tls_provider(
        config: &ProcessorConfig,
        tls_provider: Arc<dyn TlsContextProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let exchange = HttpExchange::new(Some(tls_provider), config.timeouts())?;
        Ok(Self::with_exchange(
            config.url.clone(),
            config.body.clone(),
            exchange,
        ))
    }

    pub fn with_exchange(
        url_template: String,
        body_template: Option<String>,
        exchange: HttpExchange,
    ) -> Self {
        PostJsonProcessor {
            url_template,
            body_template,
            exchange,
        }
    }

    /// Process one work item; a fresh item is created when none is queued
    pub async fn on_trigger<S: Session>(&self, session: &mut S) -> Result<Relationship, ProcessError> {
        let mut item = match session.get() {
            Some(item) => item,
            None => session.create(),
        };

        let outcome = self.execute(&item).await;
        match &outcome {
            Ok(record) if record.relationship() == Relationship::Failure => {
                tracing::error!(
                    status = record.status_code,
                    message = %record.status_message,
                    "There was an error with POST request"
                );
            }
            Ok(record) => {
                tracing::info!(status = record.status_code, host = %record.host_url, "POST request succeeded");
            }
            Err(e) => {
                tracing::error!(error = %e, local = e.is_local(), "POST request failed");
            }
        }

        let destination = route(outcome.as_ref()).apply(&mut item);
        session.transfer(item, destination);
        tracing::debug!(%destination, "Work item transferred");

        outcome.map(|_| destination)
    }

    async fn execute(&self, item: &WorkItem) -> Result<ResponseRecord, ProcessError> {
        let spec = request::resolve(
            &self.url_template,
            self.body_template.as_deref(),
            &item.attributes,
        )?;
        self.exchange.post(&spec.url, &spec.body).await
    }
}
