//! Short name generators.
//!
//! Storage engines ask a [`Generator`] for an alias whenever a link is
//! inserted without one.

pub mod random;
pub mod seq;

pub use random::RandomGenerator;
pub use seq::SeqGenerator;

/// Maximum length of a generated short name.
pub const MAX_GENERATED_LEN: usize = 8;

/// Trait for generating short names.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is statistical at best; engines still check every generated
/// name against the stored ones.
pub trait Generator: Send + Sync + 'static {
    /// Generates a URL-safe short name made of `[A-Za-z0-9-]` characters.
    fn generate(&self) -> String;
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self) -> String {
        (**self).generate()
    }
}

impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    fn generate(&self) -> String {
        (**self).generate()
    }
}
