use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::RECORD_DELIMITER;

/// Attribute map carried by a work item
pub type Attributes = BTreeMap<String, String>;

/// Unit of work handed over by the host
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkItem {
    pub attributes: Attributes,
    pub content: Vec<u8>,
}

impl WorkItem {
    pub fn new() -> Self {
        WorkItem::default()
    }

    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        WorkItem {
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            content: Vec::new(),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Merges attributes into the item; existing keys not in `attributes` survive
    pub fn put_all_attributes(&mut self, attributes: Attributes) {
        self.attributes.extend(attributes);
    }

    pub fn write_content(&mut self, content: Vec<u8>) {
        self.content = content;
    }

    pub fn content_str(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

/// Routing destination of a processed work item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relationship {
    Success,
    Failure,
}

impl Relationship {
    /// Only 200 and 201 count as success
    pub fn from_status(status_code: u16) -> Self {
        match status_code {
            200 | 201 => Relationship::Success,
            _ => Relationship::Failure,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Relationship::Success => "Success",
            Relationship::Failure => "Failure",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete request resolved from the templates for one invocation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSpec {
    pub url: Url,
    pub body: String,
}

/// Normalized result of one HTTP exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseRecord {
    pub status_code: u16,
    pub status_message: String,
    pub content_type: Option<String>,
    pub body: String,
    /// Header name to comma-joined values
    pub headers: BTreeMap<String, String>,
    pub host_url: String,
}

impl ResponseRecord {
    pub fn relationship(&self) -> Relationship {
        Relationship::from_status(self.status_code)
    }

    /// Headers rendered as `Name: v1,v2` entries joined by commas
    pub fn flattened_headers(&self) -> String {
        flatten_headers(self.headers.iter())
    }
}

/// Renders `(name, joined values)` pairs for diagnostics
pub fn flatten_headers<'a, I>(headers: I) -> String
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    headers
        .into_iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join(RECORD_DELIMITER)
}
