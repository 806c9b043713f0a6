//! Storage engines implementing the [`LinkStorage`] contract.
//!
//! [`InMemoryLinkStorage`] keeps everything in process memory behind a single
//! reader/writer lock. [`MySqlLinkStorage`] persists links in MySQL; the
//! [`schema`] module provisions the database it expects.

pub mod memory;
pub mod mysql;
pub mod schema;

pub use linkshelf_core::{LinkStorage, StorageError};
pub use memory::InMemoryLinkStorage;
pub use mysql::MySqlLinkStorage;
pub use schema::{DropConfirmation, InitMode, MySqlSettings};
