//! Request builder - resolves URL and body templates into a concrete request

use reqwest::Url;

use crate::error::ProcessError;
use crate::expression::evaluate;
use crate::models::{Attributes, RequestSpec};

/// Resolve both templates against the work item's attributes
pub fn resolve(
    url_template: &str,
    body_template: Option<&str>,
    attributes: &Attributes,
) -> Result<RequestSpec, ProcessError> {
    let url = parse_url(url_template, attributes)?;
    let body = parse_json_body(body_template, attributes)?;
    Ok(RequestSpec { url, body })
}

/// Resolve placeholders, trim, and require an absolute http(s) URL
pub fn parse_url(url_template: &str, attributes: &Attributes) -> Result<Url, ProcessError> {
    let resolved = evaluate(url_template, attributes);
    let resolved = resolved.trim();

    let url = Url::parse(resolved).map_err(|e| ProcessError::InvalidUrl {
        url: resolved.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        "http" | "https" => Err(ProcessError::InvalidUrl {
            url: resolved.to_string(),
            reason: "missing host".to_string(),
        }),
        scheme => Err(ProcessError::InvalidUrl {
            url: resolved.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

/// Resolve placeholders, trim, and canonicalize the body as minified JSON
pub fn parse_json_body(
    body_template: Option<&str>,
    attributes: &Attributes,
) -> Result<String, ProcessError> {
    let template = body_template.ok_or(ProcessError::MissingBody)?;
    let resolved = evaluate(template, attributes);
    let resolved = resolved.trim();
    if resolved.is_empty() {
        return Err(ProcessError::MissingBody);
    }

    let value: serde_json::Value = serde_json::from_str(resolved)?;
    Ok(serde_json::to_string(&value)?)
}
