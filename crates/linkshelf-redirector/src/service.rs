use std::sync::Arc;

use crate::metrics::RedirectMetrics;
use crate::negotiate::{negotiate, Representation};
use linkshelf_core::{LinkStorage, StorageError};
use serde_json::json;
use tracing::{debug, error, trace};

pub const RESOURCE_NOT_FOUND: &str = "resource not found";
pub const INTERNAL_SERVER_ERROR: &str = "internal server error";

const NOT_FOUND_PAGE: &str = r#"<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <meta name="viewport" content="width=device-width, initial-scale=1">
        <meta name="robots" content="noindex">
        <title>Error 404 - Not Found!</title>
        <style>
          body { font-family: sans-serif; margin: 3em; }
          h1.error { font-size: 7em; font-weight: 500; margin: 0; }
        </style>
    </head>
    <body>
        <h1 class="error">Oops!</h1>
        <h2>Error 404 - Not Found</h2>
        <p>Sorry, the link you requested has not been found!</p>
    </body>
</html>
"#;

/// The outcome of resolving one alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Permanently redirect the visitor to `location`.
    Redirect { location: String },
    /// No link uses the alias; answer in the negotiated representation.
    NotFound { representation: Representation },
    /// The storage failed while looking the alias up.
    Failed,
}

impl Resolution {
    pub fn status(&self) -> u16 {
        match self {
            Resolution::Redirect { .. } => 301,
            Resolution::NotFound { .. } => 404,
            Resolution::Failed => 500,
        }
    }

    /// Content type of [`Resolution::body`].
    pub fn content_type(&self) -> &'static str {
        match self {
            Resolution::NotFound { representation } => match representation {
                Representation::Html => "text/html; charset=utf-8",
                other => other.content_type(),
            },
            _ => "text/plain; charset=utf-8",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Resolution::Redirect { .. } => String::new(),
            Resolution::NotFound { representation } => match representation {
                Representation::PlainText => RESOURCE_NOT_FOUND.to_string(),
                Representation::Html => NOT_FOUND_PAGE.to_string(),
                Representation::Json | Representation::JsonApi => json!({
                    "errors": {
                        "status": 404,
                        "title": RESOURCE_NOT_FOUND,
                    }
                })
                .to_string(),
            },
            Resolution::Failed => INTERNAL_SERVER_ERROR.to_string(),
        }
    }
}

/// Service for handling alias redirects.
///
/// Only reads from the storage. Every resolution is counted by its status
/// code.
#[derive(Debug)]
pub struct RedirectorService<S: ?Sized> {
    storage: Arc<S>,
    metrics: RedirectMetrics,
}

impl<S: ?Sized> Clone for RedirectorService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            metrics: self.metrics.clone(),
        }
    }
}

impl<S: LinkStorage + ?Sized> RedirectorService<S> {
    pub fn new(storage: Arc<S>, metrics: RedirectMetrics) -> Self {
        Self { storage, metrics }
    }

    pub fn metrics(&self) -> &RedirectMetrics {
        &self.metrics
    }

    /// Resolves `alias` into a redirect, or into a not-found answer rendered
    /// for the client's `Accept` header.
    ///
    /// Leading and trailing slashes and spaces are ignored.
    pub async fn resolve(&self, alias: &str, accept: Option<&str>) -> Resolution {
        let alias = alias.trim_matches(|c: char| c == '/' || c == ' ');
        trace!(alias, "resolving alias");

        let resolution = match self.storage.get_one_by_short_name(alias).await {
            Ok(link) => {
                debug!(alias, url = %link.original_url, "resolved alias");
                Resolution::Redirect {
                    location: link.original_url,
                }
            }
            Err(StorageError::NotFound(_)) => {
                trace!(alias, "alias not found");
                Resolution::NotFound {
                    representation: negotiate(accept),
                }
            }
            Err(err) => {
                error!(alias, error = %err, "failed to resolve alias");
                Resolution::Failed
            }
        };

        self.metrics.record(resolution.status());
        resolution
    }
}
