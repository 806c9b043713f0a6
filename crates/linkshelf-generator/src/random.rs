use crate::{Generator, MAX_GENERATED_LEN};
use uuid::Uuid;

/// Generates short names from random v4 UUIDs.
///
/// The 16 UUID bytes are base58 encoded and truncated to
/// [`MAX_GENERATED_LEN`] characters, which keeps the alphabet free of
/// look-alike characters and of anything needing URL escaping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> String {
        let mut encoded = bs58::encode(Uuid::new_v4().as_bytes()).into_string();
        encoded.truncate(MAX_GENERATED_LEN);
        encoded
    }
}
