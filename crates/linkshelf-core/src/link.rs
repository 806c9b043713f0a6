use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a stored [`Link`].
///
/// Ids are assigned by the storage engine on insert and are never reused,
/// not even after the record they belonged to has been deleted.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkId(u64);

impl LinkId {
    /// Wraps a raw identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid link id '{input}': {source}")]
pub struct ParseLinkIdError {
    input: String,
    source: ParseIntError,
}

impl FromStr for LinkId {
    type Err = ParseLinkIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(LinkId)
            .map_err(|source| ParseLinkIdError {
                input: s.to_string(),
                source,
            })
    }
}

/// Longest short name, in characters, any engine stores.
pub const MAX_SHORT_NAME_CHARS: usize = 255;
/// Longest destination URL, in characters, any engine stores.
pub const MAX_ORIGINAL_URL_CHARS: usize = 8192;
/// Longest comment, in characters, any engine stores.
pub const MAX_COMMENT_CHARS: usize = 255;

/// Rejects values that exceed the column limits shared by every engine.
fn check_storable(short_name: &str, original_url: &str, comment: &str) -> Result<(), StorageError> {
    let fields = [
        ("short name", short_name, MAX_SHORT_NAME_CHARS),
        ("original url", original_url, MAX_ORIGINAL_URL_CHARS),
        ("comment", comment, MAX_COMMENT_CHARS),
    ];

    for (field, value, max) in fields {
        if value.chars().count() > max {
            return Err(StorageError::InvalidData(format!(
                "{field} is longer than {max} characters"
            )));
        }
    }
    Ok(())
}

/// A stored alias-to-URL mapping.
///
/// Values handed out by a storage engine are copies; mutating one has no
/// effect on the engine until it is passed back through `update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(skip)]
    pub id: LinkId,
    /// The short alias, unique across all stored links.
    pub short_name: String,
    /// Where visitors of the alias are redirected to.
    pub original_url: String,
    /// Free text annotation.
    pub comment: String,
}

/// A link that has not been stored yet.
///
/// An empty `short_name` asks the engine to generate one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLink {
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub comment: String,
}

impl Link {
    /// Checks that every field fits into storage.
    pub fn check_storable(&self) -> Result<(), StorageError> {
        check_storable(&self.short_name, &self.original_url, &self.comment)
    }
}

impl NewLink {
    /// Checks that every field fits into storage.
    pub fn check_storable(&self) -> Result<(), StorageError> {
        check_storable(&self.short_name, &self.original_url, &self.comment)
    }

    /// Creates a new link draft with an empty comment.
    pub fn new(short_name: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            original_url: original_url.into(),
            comment: String::new(),
        }
    }

    /// Sets the comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Attaches an engine-assigned id, turning the draft into a [`Link`].
    pub fn into_link(self, id: LinkId) -> Link {
        Link {
            id,
            short_name: self.short_name,
            original_url: self.original_url,
            comment: self.comment,
        }
    }
}

/// One page of a link listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPage {
    /// The links inside the requested window, ordered by ascending id.
    pub links: Vec<Link>,
    /// Number of stored links, regardless of the window.
    pub total: usize,
}
