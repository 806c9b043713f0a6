use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};

/// A short name generator using a sequential counter.
///
/// This generator produces sequential names like "ls000000", "ls000001", etc.
/// Names never repeat within a single instance, which makes it handy for
/// tests and for reproducible deployments. Prefixes must only contain
/// `[A-Za-z0-9-]` characters.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    ///
    /// Useful for resuming from a known state.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> String {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}{:06}", self.prefix, count)
    }
}
