//! Fitness evaluation.
//!
//! Two encodings of "bigger is better" are provided so their behaviour can
//! be compared on the same run:
//!
//! - [`value_fitness`]: the chromosome read as a big-endian binary number
//! - [`ones_fitness`]: the number of 1-bits (OneMax)
//!
//! Both are pure and total. Higher fitness is better.

use super::types::Chromosome;

/// Interprets the chromosome as a big-endian unsigned integer.
///
/// For a chromosome of length `L <= 64` the result lies in `[0, 2^L - 1]`.
/// An empty chromosome evaluates to 0. Longer chromosomes keep only their
/// lowest 64 bits; [`GaConfig::validate`](super::GaConfig::validate)
/// rejects such lengths for a run.
///
/// ```
/// use u_bitga::ga::{value_fitness, Chromosome};
///
/// let c = Chromosome::from_bits(&[1, 0, 1, 0]).unwrap();
/// assert_eq!(value_fitness(&c), 10);
/// ```
pub fn value_fitness(chromosome: &Chromosome) -> u64 {
    chromosome
        .genes()
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | bit as u64)
}

/// Counts the 1-bits in the chromosome. Result lies in `[0, L]`.
pub fn ones_fitness(chromosome: &Chromosome) -> u64 {
    chromosome.genes().iter().filter(|&&bit| bit).count() as u64
}

/// Fitness function used by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessFn {
    /// [`value_fitness`].
    #[default]
    Value,
    /// [`ones_fitness`].
    Ones,
}

impl FitnessFn {
    /// Evaluates `chromosome` with this function.
    pub fn evaluate(self, chromosome: &Chromosome) -> u64 {
        match self {
            FitnessFn::Value => value_fitness(chromosome),
            FitnessFn::Ones => ones_fitness(chromosome),
        }
    }

    /// Largest fitness reachable by a chromosome of `bit_length` genes.
    pub fn optimum(self, bit_length: usize) -> u64 {
        match self {
            FitnessFn::Value if bit_length >= 64 => u64::MAX,
            FitnessFn::Value => (1u64 << bit_length) - 1,
            FitnessFn::Ones => bit_length as u64,
        }
    }
}
