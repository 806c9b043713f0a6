use async_trait::async_trait;
use linkshelf_core::{
    slice_paginate, Link, LinkId, LinkPage, LinkStorage, NewLink, Result, StorageError,
};
use linkshelf_generator::{Generator, RandomGenerator};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Everything guarded by the engine lock.
///
/// `order` holds the ids of all stored links in ascending order. Ids are
/// issued under the write lock, so appending keeps it sorted.
#[derive(Debug, Default)]
struct State {
    links: HashMap<LinkId, Link>,
    by_short_name: HashMap<String, LinkId>,
    order: Vec<LinkId>,
    last_id: u64,
}

impl State {
    fn conflict_for(&self, short_name: &str) -> Option<&Link> {
        self.by_short_name
            .get(short_name)
            .and_then(|id| self.links.get(id))
    }
}

/// In-memory implementation of [`LinkStorage`].
///
/// A single reader/writer lock guards the primary map, the short name index
/// and the ordered id list, so readers never observe a half-applied write.
/// No I/O ever happens under the lock. Contents are lost when the engine is
/// dropped.
#[derive(Debug)]
pub struct InMemoryLinkStorage<G = RandomGenerator> {
    state: RwLock<State>,
    generator: G,
}

impl InMemoryLinkStorage {
    /// Creates an empty engine generating random short names.
    pub fn new() -> Self {
        Self::with_generator(RandomGenerator::new())
    }
}

impl Default for InMemoryLinkStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Generator> InMemoryLinkStorage<G> {
    /// Creates an empty engine using the given short name generator.
    pub fn with_generator(generator: G) -> Self {
        Self {
            state: RwLock::new(State::default()),
            generator,
        }
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<G: Generator> LinkStorage for InMemoryLinkStorage<G> {
    async fn paginated_get_all(&self, page_number: usize, page_size: usize) -> Result<LinkPage> {
        let state = self.state.read();

        let total = state.order.len();
        let window = slice_paginate(page_number.saturating_sub(1), page_size, total);
        let links = state.order[window]
            .iter()
            .filter_map(|id| state.links.get(id).cloned())
            .collect();

        Ok(LinkPage { links, total })
    }

    async fn get_one(&self, id: LinkId) -> Result<Link> {
        trace!(%id, "fetching link by id");

        self.state
            .read()
            .links
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("link for id {id} not found")))
    }

    async fn get_one_by_short_name(&self, short_name: &str) -> Result<Link> {
        trace!(short_name, "fetching link by short name");

        let state = self.state.read();
        state
            .by_short_name
            .get(short_name)
            .and_then(|id| state.links.get(id))
            .cloned()
            .ok_or_else(|| {
                StorageError::NotFound(format!("link for short name {short_name} not found"))
            })
    }

    async fn insert(&self, mut link: NewLink) -> Result<Link> {
        if link.short_name.is_empty() {
            link.short_name = self.generator.generate();
        }
        link.check_storable()?;

        let mut state = self.state.write();

        if let Some(existing) = state.conflict_for(&link.short_name) {
            debug!(short_name = %link.short_name, existing_id = %existing.id, "short name already taken");
            return Err(StorageError::conflict(existing.clone()));
        }

        state.last_id += 1;
        let id = LinkId::new(state.last_id);
        let link = link.into_link(id);

        state.by_short_name.insert(link.short_name.clone(), id);
        state.links.insert(id, link.clone());
        state.order.push(id);

        debug!(%id, short_name = %link.short_name, "inserted link");
        Ok(link)
    }

    async fn delete(&self, id: LinkId) -> Result<()> {
        let mut state = self.state.write();

        let Some(link) = state.links.remove(&id) else {
            return Err(StorageError::NotFound(format!("link for id {id} not found")));
        };
        state.by_short_name.remove(&link.short_name);
        if let Ok(position) = state.order.binary_search(&id) {
            state.order.remove(position);
        }

        debug!(%id, short_name = %link.short_name, "deleted link");
        Ok(())
    }

    async fn update(&self, link: Link) -> Result<()> {
        link.check_storable()?;
        let mut state = self.state.write();

        if !state.links.contains_key(&link.id) {
            return Err(StorageError::NotFound(format!(
                "link for id {} not found",
                link.id
            )));
        }

        if let Some(existing) = state.conflict_for(&link.short_name) {
            if existing.id != link.id {
                return Err(StorageError::conflict(existing.clone()));
            }
        }

        let state = &mut *state;
        let Some(current) = state.links.get_mut(&link.id) else {
            return Err(StorageError::Failure(format!(
                "link for id {} vanished under the write lock",
                link.id
            )));
        };

        // keep the secondary index pointing at the new short name
        if current.short_name != link.short_name {
            state.by_short_name.remove(&current.short_name);
            state.by_short_name.insert(link.short_name.clone(), link.id);
        }

        debug!(id = %link.id, short_name = %link.short_name, "updated link");
        *current = link;
        Ok(())
    }
}
