//! Chromosome representation.
//!
//! A [`Chromosome`] is an ordered, fixed-length sequence of bits. Genes are
//! stored as `bool` so the 0/1 invariant holds by construction; the `u8`
//! views exist for interop with callers that think in 0/1 lists.

use crate::error::{GaError, Result};
use rand::Rng;
use std::fmt;

/// A candidate solution encoded as a bit sequence.
///
/// Chromosomes are treated as immutable values: the genetic operators
/// return new chromosomes instead of editing their inputs.
///
/// ```
/// use u_bitga::ga::Chromosome;
///
/// let c = Chromosome::from_bits(&[1, 0, 1, 1]).unwrap();
/// assert_eq!(c.len(), 4);
/// assert_eq!(c.to_string(), "[1, 0, 1, 1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    genes: Vec<bool>,
}

impl Chromosome {
    /// Builds a chromosome from 0/1 values.
    ///
    /// # Errors
    /// [`GaError::InvalidInput`] if any value is neither 0 nor 1.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        let genes = bits
            .iter()
            .enumerate()
            .map(|(i, &b)| match b {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(GaError::input(format!(
                    "gene {i} has value {other}, expected 0 or 1"
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Self { genes })
    }

    /// Draws `len` bits, each independently uniform over {0, 1}.
    pub fn random<R: Rng>(len: usize, rng: &mut R) -> Self {
        let genes = (0..len).map(|_| rng.random_bool(0.5)).collect();
        Self { genes }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Genes as booleans, most significant first.
    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Gene at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.genes.get(index).copied()
    }

    /// Genes as 0/1 values.
    pub fn to_bits(&self) -> Vec<u8> {
        self.genes.iter().map(|&g| g as u8).collect()
    }
}

impl From<Vec<bool>> for Chromosome {
    fn from(genes: Vec<bool>) -> Self {
        Self { genes }
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, &g) in self.genes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", g as u8)?;
        }
        f.write_str("]")
    }
}
