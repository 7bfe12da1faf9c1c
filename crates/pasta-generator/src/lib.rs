pub mod random;
pub mod seq;

pub use random::{generate_random_string, RandomGenerator, ALPHABET, DEFAULT_ID_LENGTH};
pub use seq::SeqGenerator;

use pasta_core::PasteId;

/// Trait for generating paste ids.
///
/// Implementations are pure generators that don't interact with storage.
/// Uniqueness is not guaranteed by construction: the store rejects
/// duplicates and the caller asks for another id.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<PasteId>;

    /// Generates a candidate id for a new paste.
    fn generate(&self) -> Self::Output;
}
