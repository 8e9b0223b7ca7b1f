//! Bitstring-maximising genetic algorithm.
//!
//! Evolves a fixed-length bitstring toward its largest value with a
//! textbook generational GA:
//!
//! - **Initialization**: uniformly random bits
//! - **Evaluation**: binary value or count of ones
//! - **Selection**: binary tournament
//! - **Crossover**: single point, gated per pair
//! - **Mutation**: single bit flip, gated per individual
//! - **Replacement**: the whole population, no elitism
//!
//! ```
//! use u_bitga::ga::{GaConfig, GaRunner};
//!
//! let result = GaRunner::run(&GaConfig::default().with_seed(42)).unwrap();
//! assert_eq!(result.fitness.len(), 10);
//! ```

pub mod error;
pub mod ga;

pub use error::{GaError, Result};
