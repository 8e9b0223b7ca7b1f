//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! The parameters stay fixed for the whole run.

use super::fitness::FitnessFn;
use crate::error::{GaError, Result};

/// Longest chromosome whose binary value fits in a `u64` fitness.
pub const MAX_BIT_LENGTH: usize = 64;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_bitga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.bit_length, 16);
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.generations, 100);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitga::ga::{FitnessFn, GaConfig};
///
/// let config = GaConfig::default()
///     .with_bit_length(32)
///     .with_population_size(40)
///     .with_fitness(FitnessFn::Ones)
///     .with_mutation_rate(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of genes per chromosome (1..=64).
    pub bit_length: usize,

    /// Number of individuals in the population.
    ///
    /// Must be even: crossover pairs consecutive members of the mating pool.
    pub population_size: usize,

    /// Number of generations to run. Zero runs only the final evaluation.
    pub generations: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the pair passes through unchanged.
    pub crossover_rate: f64,

    /// Probability of flipping one random bit of an individual (0.0–1.0).
    pub mutation_rate: f64,

    /// Fitness function to maximise.
    pub fitness: FitnessFn,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Only has an effect when the `parallel` feature is enabled.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            bit_length: 16,
            population_size: 10,
            generations: 100,
            crossover_rate: 0.70,
            mutation_rate: 0.10,
            fitness: FitnessFn::Value,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the chromosome length.
    pub fn with_bit_length(mut self, n: usize) -> Self {
        self.bit_length = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover rate.
    ///
    /// Out-of-range values are kept as given and reported by
    /// [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the fitness function.
    pub fn with_fitness(mut self, fitness: FitnessFn) -> Self {
        self.fitness = fitness;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] describing the first invalid
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.bit_length == 0 {
            return Err(GaError::config("bit_length must be at least 1"));
        }
        if self.bit_length > MAX_BIT_LENGTH {
            return Err(GaError::config(format!(
                "bit_length must be at most {MAX_BIT_LENGTH}, got {}",
                self.bit_length
            )));
        }
        if self.population_size == 0 {
            return Err(GaError::config("population_size must be at least 1"));
        }
        if self.population_size % 2 != 0 {
            return Err(GaError::config(format!(
                "population_size must be even for pairwise crossover, got {}",
                self.population_size
            )));
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        Ok(())
    }
}

fn check_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GaError::config(format!(
            "{name} must be within [0, 1], got {rate}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.bit_length, 16);
        assert_eq!(config.population_size, 10);
        assert_eq!(config.generations, 100);
        assert!((config.crossover_rate - 0.70).abs() < 1e-10);
        assert!((config.mutation_rate - 0.10).abs() < 1e-10);
        assert_eq!(config.fitness, FitnessFn::Value);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_bit_length(8)
            .with_population_size(20)
            .with_generations(50)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_fitness(FitnessFn::Ones)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.bit_length, 8);
        assert_eq!(config.population_size, 20);
        assert_eq!(config.generations, 50);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.fitness, FitnessFn::Ones);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_generations_ok() {
        assert!(GaConfig::default().with_generations(0).validate().is_ok());
    }

    #[test]
    fn test_validate_boundary_rates_ok() {
        let config = GaConfig::default()
            .with_crossover_rate(0.0)
            .with_mutation_rate(1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_bit_length() {
        let err = GaConfig::default().with_bit_length(0).validate().unwrap_err();
        assert!(matches!(err, GaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_validate_bit_length_too_long() {
        assert!(GaConfig::default().with_bit_length(64).validate().is_ok());
        assert!(GaConfig::default().with_bit_length(65).validate().is_err());
    }

    #[test]
    fn test_validate_zero_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_odd_population() {
        let err = GaConfig::default()
            .with_population_size(9)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("even"));
    }

    #[test]
    fn test_validate_rates_out_of_range() {
        assert!(GaConfig::default().with_crossover_rate(-0.1).validate().is_err());
        assert!(GaConfig::default().with_crossover_rate(1.5).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(2.0).validate().is_err());
        assert!(GaConfig::default().with_mutation_rate(f64::NAN).validate().is_err());
    }
}
