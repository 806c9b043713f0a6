use crate::error::Result;
use crate::link::{Link, LinkId, LinkPage, NewLink};
use async_trait::async_trait;

/// The storage contract shared by every link engine.
///
/// Implementations must produce the same outcomes for the same sequence of
/// calls; they differ only in durability and latency. Records returned by
/// any method are copies owned by the caller.
#[async_trait]
pub trait LinkStorage: Send + Sync + 'static {
    /// Returns the window of links for a 1-based `page_number`, together with
    /// the total number of stored links.
    ///
    /// A `page_size` of zero returns no links but still reports the total.
    async fn paginated_get_all(&self, page_number: usize, page_size: usize) -> Result<LinkPage>;

    /// Retrieves a link by id.
    /// Returns `Err(NotFound)` if no stored link has that id.
    async fn get_one(&self, id: LinkId) -> Result<Link>;

    /// Retrieves a link by its short name.
    /// Returns `Err(NotFound)` if no stored link uses that short name.
    async fn get_one_by_short_name(&self, short_name: &str) -> Result<Link>;

    /// Stores a new link and returns it with its assigned id.
    ///
    /// An empty short name is replaced by a generated one. Returns
    /// `Err(ShortNameConflict)` carrying the stored link if the short name is
    /// already taken.
    async fn insert(&self, link: NewLink) -> Result<Link>;

    /// Deletes the link with the given id.
    /// Returns `Err(NotFound)` if no stored link has that id.
    async fn delete(&self, id: LinkId) -> Result<()>;

    /// Replaces every field of the stored link with the same id.
    ///
    /// Returns `Err(NotFound)` if the id is unknown and
    /// `Err(ShortNameConflict)` if another link already uses the new short name.
    async fn update(&self, link: Link) -> Result<()>;
}
