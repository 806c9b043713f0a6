//! Core types and traits for the linkshelf URL shortener.
//!
//! This crate provides the [`Link`] record, the [`LinkStorage`] contract
//! implemented by every storage engine, and the small pure helpers
//! (pagination, field validation) shared by the engines and the HTTP layer.

pub mod error;
pub mod link;
pub mod pagination;
pub mod storage;
pub mod validation;

pub use error::{Result, StorageError};
pub use link::{
    Link, LinkId, LinkPage, NewLink, ParseLinkIdError, MAX_COMMENT_CHARS, MAX_ORIGINAL_URL_CHARS,
    MAX_SHORT_NAME_CHARS,
};
pub use pagination::slice_paginate;
pub use storage::LinkStorage;
pub use validation::{FieldError, ValidationErrors};
