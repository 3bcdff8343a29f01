//! HTTP exchange - performs the JSON POST and normalizes the response

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::constants::{ACCEPT_VALUE, CONTENT_TYPE_VALUE, RECORD_DELIMITER, USER_AGENT_VALUE};
use crate::error::ProcessError;
use crate::models::{flatten_headers, ResponseRecord};
use crate::tls::{ClientAuth, TlsContextProvider};

/// Optional connect/read limits; `None` waits indefinitely
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub read: Option<Duration>,
}

/// Owns the network side of a single POST round trip
pub struct HttpExchange {
    client: reqwest::Client,
    tls_provider: Option<Arc<dyn TlsContextProvider>>,
    timeouts: Timeouts,
}

impl HttpExchange {
    pub fn new(
        tls_provider: Option<Arc<dyn TlsContextProvider>>,
        timeouts: Timeouts,
    ) -> Result<Self, ProcessError> {
        let client = create_client(timeouts, None).map_err(ProcessError::Transport)?;
        Ok(HttpExchange {
            client,
            tls_provider,
            timeouts,
        })
    }

    /// POST `json` to `url` and capture status, headers and body
    pub async fn post(&self, url: &Url, json: &str) -> Result<ResponseRecord, ProcessError> {
        let client = self.client_for(url)?;
        let headers = request_headers(json);

        tracing::debug!(
            method = "POST",
            url = %url,
            headers = %flatten_headers(collect_headers(&headers).iter()),
            body = json,
            "Sending request"
        );

        let response = client
            .post(url.clone())
            .headers(headers)
            .body(json.as_bytes().to_vec())
            .send()
            .await
            .map_err(ProcessError::Transport)?;

        Ok(read_response(response).await)
    }

    /// Bind the provider's TLS context for https targets when one is available.
    ///
    /// The provider is asked on every https POST and may hand out a different
    /// context each time, so a client bound to it is built per call rather
    /// than cached.
    fn client_for(&self, url: &Url) -> Result<reqwest::Client, ProcessError> {
        if !url.scheme().eq_ignore_ascii_case("https") {
            return Ok(self.client.clone());
        }

        let context = self
            .tls_provider
            .as_ref()
            .and_then(|provider| provider.create_client_context(ClientAuth::None));

        match context {
            Some(tls) => create_client(self.timeouts, Some(tls)).map_err(ProcessError::Transport),
            None => Ok(self.client.clone()),
        }
    }
}

/// The fixed header set sent with every POST
pub fn request_headers(json: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_VALUE));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(json.len()));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers
}

/// Group header values by name, joining repeats with commas
pub fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name: &HeaderName| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(RECORD_DELIMITER);
            (name.as_str().to_string(), joined)
        })
        .collect()
}

async fn read_response(response: reqwest::Response) -> ResponseRecord {
    let status_code = response.status().as_u16();
    let status_message = status_message(&response);
    let headers = collect_headers(response.headers());
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
    let host_url = response.url().host_str().unwrap_or_default().to_string();
    let body = try_read_body(response).await;

    ResponseRecord {
        status_code,
        status_message,
        content_type,
        body,
        headers,
        host_url,
    }
}

/// Reason phrase as sent by the server, falling back to the canonical one
fn status_message(response: &reqwest::Response) -> String {
    response
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| response.status().canonical_reason().map(str::to_string))
        .unwrap_or_default()
}

/// Read the body permissively: an unreadable or absent body becomes ""
async fn try_read_body(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(text) => join_lines(&text),
        Err(e) => {
            tracing::debug!(error = %e, "Response body unavailable");
            String::new()
        }
    }
}

/// Concatenate lines, dropping `\n`, `\r\n` and `\r` terminators
pub fn join_lines(text: &str) -> String {
    text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// Create an HTTP client, optionally bound to a preconfigured TLS context.
///
/// Redirects are never followed: a 3xx answer is routed as-is
pub fn create_client(
    timeouts: Timeouts,
    tls: Option<rustls::ClientConfig>,
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder().redirect(reqwest::redirect::Policy::none());
    if let Some(connect) = timeouts.connect {
        builder = builder.connect_timeout(connect);
    }
    if let Some(read) = timeouts.read {
        builder = builder.read_timeout(read);
    }
    if let Some(tls) = tls {
        builder = builder.use_preconfigured_tls(tls);
    }
    builder.build()
}
