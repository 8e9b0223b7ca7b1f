//! Genetic Algorithm over fixed-length bitstrings.
//!
//! A generational, non-elitist GA that maximises the fitness of a
//! bitstring. Operators are pure functions; [`Evolution`] owns the
//! population and drives the loop.
//!
//! # Key Types
//!
//! - [`Chromosome`]: A candidate solution, one bit per gene
//! - [`GaConfig`]: Run parameters (length, population, generations, rates)
//! - [`Evolution`]: Stepwise driver owning population and statistics
//! - [`GaRunner`]: Executes a complete run
//! - [`GaRunResult`]: Final population, fitness, and history
//!
//! # Submodules
//!
//! - [`fitness`]: Binary-value and count-of-ones fitness functions
//! - [`operators`]: Single-point crossover and bit-flip mutation
//! - [`selection`]: Binary tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod fitness;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::{GaConfig, MAX_BIT_LENGTH};
pub use fitness::{ones_fitness, value_fitness, FitnessFn};
pub use operators::{bit_flip_mutation, one_point_crossover};
pub use runner::{Evolution, FitnessHistory, GaRunResult, GaRunner, GenerationStats, RunState};
pub use selection::{sample_tournament, select_mating_pool, tournament_selection};
pub use types::Chromosome;
