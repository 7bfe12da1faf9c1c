use crate::Generator;
use pasta_core::PasteId;
use std::sync::atomic::{AtomicU64, Ordering};

/// A predictable id generator using a sequential counter.
///
/// Produces ids like "seq000000", "seq000001", etc. Handy for fixtures
/// and tests where ids need to be known in advance. The prefix must be
/// alphanumeric for the output to be a valid [`PasteId`].
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
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    type Output = PasteId;

    fn generate(&self) -> Self::Output {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        PasteId::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_sequential_ids() {
        let generator = SeqGenerator::with_prefix("seq");

        assert_eq!(generator.generate().as_str(), "seq000000");
        assert_eq!(generator.generate().as_str(), "seq000001");
        assert_eq!(generator.generate().as_str(), "seq000002");
    }

    #[test]
    fn with_offset() {
        let generator = SeqGenerator::with_offset("p", 1000);

        assert_eq!(generator.generate().as_str(), "p001000");
        assert_eq!(generator.generate().as_str(), "p001001");
    }

    #[test]
    fn clone_preserves_counter_state() {
        let generator = SeqGenerator::with_prefix("seq");
        generator.generate();
        generator.generate();

        let cloned = generator.clone();

        assert_eq!(generator.generate().as_str(), "seq000002");
        assert_eq!(cloned.generate().as_str(), "seq000002");
    }

    #[test]
    fn output_is_a_valid_paste_id() {
        let generator = SeqGenerator::with_prefix("abc");
        let id = generator.generate();
        assert!(PasteId::new(id.as_str()).is_ok());
    }
}
