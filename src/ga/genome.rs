//! Genome representation for the passcode search.
//!
//! A genome is a fixed-length bit vector. Fitness against a target is the
//! number of positions where the two agree, so it ranges over `0..=len`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Passcode length used when none is specified.
pub const DEFAULT_GENOME_LENGTH: usize = 32;

/// A fixed-length bit string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genome {
    bits: Vec<bool>,
}

impl Genome {
    /// Create a genome from explicit bits.
    #[must_use]
    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create a uniformly random genome of `len` bits.
    ///
    /// Each bit is independently set with probability 0.5.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R, len: usize) -> Self {
        Self {
            bits: (0..len).map(|_| rng.gen_bool(0.5)).collect(),
        }
    }

    /// Number of bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the genome has no bits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits in order.
    #[must_use]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub(crate) fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    /// Count of positions where `self` matches `target`.
    ///
    /// # Panics
    ///
    /// Panics if the genomes differ in length.
    #[must_use]
    pub fn fitness(&self, target: &Genome) -> usize {
        assert_eq!(
            self.len(),
            target.len(),
            "fitness requires genomes of equal length"
        );
        self.bits
            .iter()
            .zip(&target.bits)
            .filter(|(a, b)| a == b)
            .count()
    }
}

impl From<Vec<bool>> for Genome {
    fn from(bits: Vec<bool>) -> Self {
        Self::from_bits(bits)
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Error parsing a genome from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseGenomeError {
    /// Input contained no bits.
    #[error("genome string is empty")]
    Empty,
    /// A character other than `0` or `1`.
    #[error("invalid bit {found:?} at position {position}")]
    InvalidBit {
        /// Offending character.
        found: char,
        /// Zero-based character index.
        position: usize,
    },
}

impl FromStr for Genome {
    type Err = ParseGenomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseGenomeError::Empty);
        }
        let bits = s
            .chars()
            .enumerate()
            .map(|(position, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => Err(ParseGenomeError::InvalidBit { found, position }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bits })
    }
}
