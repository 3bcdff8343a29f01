//! Router - maps an exchange outcome to a destination and attribute set

use crate::constants::{
    ATTR_ERROR_MESSAGE, ATTR_HOST_URL, ATTR_MIME_TYPE, ATTR_RESPONSE_BODY, ATTR_STATUS_CODE,
    ATTR_STATUS_MESSAGE,
};
use crate::error::ProcessError;
use crate::models::{Attributes, Relationship, ResponseRecord, WorkItem};

/// What to do with the work item once the exchange is over
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Routing {
    pub destination: Relationship,
    pub attributes: Attributes,
    /// Replacement content; `None` leaves the item's content untouched
    pub content: Option<Vec<u8>>,
}

impl Routing {
    /// Merge attributes and content into the item
    pub fn apply(self, item: &mut WorkItem) -> Relationship {
        item.put_all_attributes(self.attributes);
        if let Some(content) = self.content {
            item.write_content(content);
        }
        self.destination
    }
}

pub fn route(outcome: Result<&ResponseRecord, &ProcessError>) -> Routing {
    match outcome {
        Ok(record) => route_response(record),
        Err(error) => route_error(error),
    }
}

/// Full response metadata; body becomes content only when non-empty
pub fn route_response(record: &ResponseRecord) -> Routing {
    let mut attributes = Attributes::new();
    attributes.insert(ATTR_STATUS_CODE.to_string(), record.status_code.to_string());
    attributes.insert(ATTR_STATUS_MESSAGE.to_string(), record.status_message.clone());
    attributes.insert(ATTR_HOST_URL.to_string(), record.host_url.clone());
    if let Some(content_type) = &record.content_type {
        attributes.insert(ATTR_MIME_TYPE.to_string(), content_type.clone());
    }
    attributes.insert(ATTR_RESPONSE_BODY.to_string(), record.body.clone());

    let content = if record.body.is_empty() {
        None
    } else {
        Some(record.body.as_bytes().to_vec())
    };

    Routing {
        destination: record.relationship(),
        attributes,
        content,
    }
}

/// A single error attribute, no content change
pub fn route_error(error: &ProcessError) -> Routing {
    let mut attributes = Attributes::new();
    attributes.insert(ATTR_ERROR_MESSAGE.to_string(), error.to_string());
    Routing {
        destination: Relationship::Failure,
        attributes,
        content: None,
    }
}
