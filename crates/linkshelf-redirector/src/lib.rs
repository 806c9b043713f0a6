//! Alias resolution for incoming visitor requests.
//!
//! [`RedirectorService`] looks an alias up through any
//! [`LinkStorage`][linkshelf_core::LinkStorage] and turns the result into a
//! [`Resolution`]: a permanent redirect, or a not-found answer rendered in
//! the representation the client asked for.

pub mod metrics;
pub mod negotiate;
pub mod service;

pub use metrics::RedirectMetrics;
pub use negotiate::{negotiate, Representation};
pub use service::{Resolution, RedirectorService};
