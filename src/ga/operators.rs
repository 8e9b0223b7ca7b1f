//! Bitstring crossover and mutation operators.
//!
//! Both operators take an explicit position rather than drawing one
//! themselves, which keeps them pure: the driver owns the RNG and decides
//! where to cut or flip.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: swap the tails of two parents after a cut point
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: invert a single gene
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use super::types::Chromosome;
use crate::error::{GaError, Result};
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Produces `(parent1[..point] + parent2[point..], parent2[..point] + parent1[point..])`.
/// With `point == 0` the offspring are copies of the swapped parents.
/// Applying the same point to the offspring restores the parents.
///
/// # Errors
/// [`GaError::InvalidInput`] if the parents differ in length or
/// `point >= parent1.len()`.
///
/// # Complexity
/// O(L) time, O(L) space
///
/// ```
/// use u_bitga::ga::{one_point_crossover, Chromosome};
///
/// let p1 = Chromosome::from_bits(&[0, 0, 0, 0]).unwrap();
/// let p2 = Chromosome::from_bits(&[1, 1, 1, 1]).unwrap();
/// let (c1, c2) = one_point_crossover(&p1, &p2, 1).unwrap();
/// assert_eq!(c1.to_bits(), vec![0, 1, 1, 1]);
/// assert_eq!(c2.to_bits(), vec![1, 0, 0, 0]);
/// ```
pub fn one_point_crossover(
    parent1: &Chromosome,
    parent2: &Chromosome,
    point: usize,
) -> Result<(Chromosome, Chromosome)> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(GaError::input(format!(
            "parents must have equal length, got {} and {}",
            n,
            parent2.len()
        )));
    }
    check_point(point, n)?;

    let (head1, tail1) = parent1.genes().split_at(point);
    let (head2, tail2) = parent2.genes().split_at(point);

    let child1: Vec<bool> = head1.iter().chain(tail2).copied().collect();
    let child2: Vec<bool> = head2.iter().chain(tail1).copied().collect();

    Ok((child1.into(), child2.into()))
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation: returns a copy of `chromosome` with the gene at
/// `point` inverted. Flipping the same point twice is the identity.
///
/// # Errors
/// [`GaError::InvalidInput`] if `point >= chromosome.len()`.
///
/// # Complexity
/// O(L) for the copy
pub fn bit_flip_mutation(chromosome: &Chromosome, point: usize) -> Result<Chromosome> {
    check_point(point, chromosome.len())?;
    let mut genes = chromosome.genes().to_vec();
    genes[point] = !genes[point];
    Ok(genes.into())
}

// ============================================================================
// Helpers
// ============================================================================

/// Draws a uniform position in `0..len`.
///
/// # Panics
/// Panics if `len` is zero.
pub fn random_point<R: Rng>(len: usize, rng: &mut R) -> usize {
    assert!(len > 0, "cannot pick a point in an empty chromosome");
    rng.random_range(0..len)
}

fn check_point(point: usize, len: usize) -> Result<()> {
    if point >= len {
        return Err(GaError::input(format!(
            "point {point} out of range for chromosome length {len}"
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
