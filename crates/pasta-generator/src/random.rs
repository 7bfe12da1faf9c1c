use crate::Generator;
use pasta_core::PasteId;
use rand::{thread_rng, Rng};

/// Characters an id may contain.
///
/// Glyphs that are easy to confuse depending on the font are left out:
/// `0` and `O`, and `1`, `I`, `L`, `l` and `i`.
pub const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789abcdefghjkmnopqrstuvwxyz";

/// Length of ids handed out by [`RandomGenerator::default`].
pub const DEFAULT_ID_LENGTH: usize = 8;

const MAX_ID_LENGTH: usize = 64;

/// Returns a string of exactly `length` characters, each drawn uniformly
/// from [`ALPHABET`].
///
/// Uses the thread-local CSPRNG, which is seeded from the operating system.
pub fn generate_random_string(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Generates random, human-friendly paste ids of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator for ids of `length` characters.
    ///
    /// The length is clamped to `1..=64` so every output is a valid [`PasteId`].
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_ID_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LENGTH)
    }
}

impl Generator for RandomGenerator {
    type Output = PasteId;

    fn generate(&self) -> Self::Output {
        PasteId::new_unchecked(generate_random_string(self.length))
    }
}
