//! JSON:API documents exchanged on the `/api/links` resource.

use crate::pagination::PaginationLinks;
use linkshelf_core::{Link, NewLink};
use serde::{Deserialize, Serialize};

pub const RESOURCE_TYPE: &str = "links";
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// A stored link rendered as a resource object.
#[derive(Debug, Serialize)]
pub struct LinkResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub attributes: Link,
}

impl From<Link> for LinkResource {
    fn from(link: Link) -> Self {
        Self {
            kind: RESOURCE_TYPE,
            id: link.id.to_string(),
            attributes: link,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LinkDocument {
    pub data: LinkResource,
}

impl From<Link> for LinkDocument {
    fn from(link: Link) -> Self {
        Self { data: link.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    /// Number of stored links, regardless of the requested page.
    pub links: usize,
}

#[derive(Debug, Serialize)]
pub struct LinkListDocument {
    pub data: Vec<LinkResource>,
    pub meta: ListMeta,
    pub links: PaginationLinks,
}

/// Body of `POST` and `PATCH` requests.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub data: LinkRequestData,
}

#[derive(Debug, Deserialize)]
pub struct LinkRequestData {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attributes: NewLink,
}

#[derive(Debug, Serialize)]
pub struct ErrorDocument {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

impl ErrorObject {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            title: title.into(),
            detail: None,
            source: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Points the error at an attribute of the request document.
    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.source = Some(ErrorSource {
            pointer: format!("/data/attributes/{attribute}"),
        });
        self
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorSource {
    pub pointer: String,
}
