mod document;

pub use document::{
    ErrorDocument, ErrorObject, ErrorSource, LinkDocument, LinkListDocument, LinkRequest,
    LinkRequestData, LinkResource, ListMeta, JSON_API_MEDIA_TYPE, RESOURCE_TYPE,
};
