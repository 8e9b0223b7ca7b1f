//! Binary tournament selection.
//!
//! Two population indices are drawn uniformly with replacement and the
//! fitter of the two candidates wins. Higher fitness is better.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Chromosome;
use crate::error::{GaError, Result};
use rand::Rng;

/// Number of candidates compared per tournament.
pub const TOURNAMENT_SIZE: usize = 2;

/// Picks the winner of a tournament between two population members.
///
/// Returns a copy of the candidate with the strictly greater fitness. When
/// both candidates have equal fitness the first-listed index wins, so the
/// result never depends on iteration order.
///
/// `fitness` must be index-aligned with `population`.
///
/// # Errors
/// [`GaError::InvalidInput`] if the slices differ in length or either
/// index is out of range.
///
/// ```
/// use u_bitga::ga::{tournament_selection, Chromosome};
///
/// let pop = vec![
///     Chromosome::from_bits(&[0, 1]).unwrap(),
///     Chromosome::from_bits(&[1, 1]).unwrap(),
/// ];
/// let winner = tournament_selection(&pop, &[1, 3], [0, 1]).unwrap();
/// assert_eq!(winner, pop[1]);
/// ```
pub fn tournament_selection(
    population: &[Chromosome],
    fitness: &[u64],
    tournament: [usize; TOURNAMENT_SIZE],
) -> Result<Chromosome> {
    if population.len() != fitness.len() {
        return Err(GaError::input(format!(
            "fitness length {} does not match population size {}",
            fitness.len(),
            population.len()
        )));
    }
    let [first, second] = tournament;
    for idx in [first, second] {
        if idx >= population.len() {
            return Err(GaError::input(format!(
                "tournament index {idx} out of range for population size {}",
                population.len()
            )));
        }
    }

    let winner = if fitness[second] > fitness[first] {
        second
    } else {
        first
    };
    Ok(population[winner].clone())
}

/// Draws a tournament: two indices in `0..population_size`, with replacement.
///
/// # Panics
/// Panics if `population_size` is zero.
pub fn sample_tournament<R: Rng>(population_size: usize, rng: &mut R) -> [usize; TOURNAMENT_SIZE] {
    assert!(population_size > 0, "cannot sample from empty population");
    [
        rng.random_range(0..population_size),
        rng.random_range(0..population_size),
    ]
}

/// Builds a mating pool the same size as `population` by running one
/// freshly sampled tournament per slot.
pub fn select_mating_pool<R: Rng>(
    population: &[Chromosome],
    fitness: &[u64],
    rng: &mut R,
) -> Result<Vec<Chromosome>> {
    if population.is_empty() {
        return Err(GaError::input("cannot select from empty population"));
    }
    (0..population.len())
        .map(|_| {
            let tournament = sample_tournament(population.len(), rng);
            tournament_selection(population, fitness, tournament)
        })
        .collect()
}
