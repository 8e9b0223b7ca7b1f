//! GA evolutionary loop execution.
//!
//! [`Evolution`] owns the population and statistics and advances one
//! generation per [`step`](Evolution::step):
//! evaluate → select → crossover → mutate → replace.
//! [`GaRunner`] drives a complete run from a [`GaConfig`].

use super::config::GaConfig;
use super::fitness::FitnessFn;
use super::operators::{bit_flip_mutation, one_point_crossover, random_point};
use super::selection::select_mating_pool;
use super::types::Chromosome;
use crate::error::{GaError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, trace};

/// Phase of the evolutionary loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Building the initial population.
    Initializing,
    /// Computing fitness and recording statistics.
    Evaluating,
    /// Filling the mating pool by tournament.
    Selecting,
    /// Applying crossover to consecutive pool pairs.
    Recombining,
    /// Applying bit-flip mutation to pool members.
    Mutating,
    /// Swapping the pool in as the new population.
    Replacing,
    /// Final evaluation done; no further generations.
    Terminated,
}

/// Statistics of one evaluated generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    /// Zero-based generation index. The final evaluation has index `G`.
    pub generation: usize,
    /// Highest fitness in the population.
    pub max_fitness: u64,
    /// Mean fitness, rounded down.
    pub average_fitness: u64,
}

/// Append-only per-generation fitness statistics.
///
/// Both series have one entry per evaluation, so a completed run of `G`
/// generations holds `G + 1` entries. The series are for reporting only
/// and never influence the search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitnessHistory {
    /// Maximum fitness per generation.
    pub max: Vec<u64>,
    /// Floor-divided average fitness per generation.
    pub average: Vec<u64>,
}

impl FitnessHistory {
    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.max.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.max.is_empty()
    }

    /// Iterates over the recorded generations in order.
    pub fn iter(&self) -> impl Iterator<Item = GenerationStats> + '_ {
        self.max
            .iter()
            .zip(&self.average)
            .enumerate()
            .map(|(generation, (&max_fitness, &average_fitness))| GenerationStats {
                generation,
                max_fitness,
                average_fitness,
            })
    }

    fn record(&mut self, fitness: &[u64]) -> GenerationStats {
        let max_fitness = fitness.iter().copied().max().unwrap_or(0);
        let average_fitness = if fitness.is_empty() {
            0
        } else {
            let sum: u128 = fitness.iter().map(|&f| f as u128).sum();
            (sum / fitness.len() as u128) as u64
        };
        let stats = GenerationStats {
            generation: self.len(),
            max_fitness,
            average_fitness,
        };
        self.max.push(max_fitness);
        self.average.push(average_fitness);
        stats
    }
}

/// Result of a GA run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaRunResult {
    /// Population after the last generation.
    pub population: Vec<Chromosome>,

    /// Fitness of each member of `population`, index-aligned.
    pub fitness: Vec<u64>,

    /// Fittest member of the final population (first on ties).
    pub best: Chromosome,

    /// Fitness of `best`.
    pub best_fitness: u64,

    /// Number of generations executed.
    pub generations: usize,

    /// Max/average fitness of every evaluation, including the final one.
    pub history: FitnessHistory,
}

/// Stepwise generational GA driver.
///
/// # Usage
///
/// ```
/// use u_bitga::ga::{Evolution, GaConfig};
///
/// let config = GaConfig::default().with_generations(5).with_seed(42);
/// let mut evo = Evolution::new(config).unwrap();
/// while evo.step().unwrap() {}
/// let result = evo.finish().unwrap();
/// assert_eq!(result.history.len(), 6);
/// ```
#[derive(Debug)]
pub struct Evolution {
    config: GaConfig,
    rng: StdRng,
    population: Vec<Chromosome>,
    generation: usize,
    history: FitnessHistory,
    state: RunState,
}

impl Evolution {
    /// Validates `config` and draws a random initial population.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if `config` fails validation.
    pub fn new(config: GaConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        let population = (0..config.population_size)
            .map(|_| Chromosome::random(config.bit_length, &mut rng))
            .collect();
        Ok(Self::from_parts(config, rng, population))
    }

    /// Starts from a caller-supplied initial population.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if `config` fails validation;
    /// [`GaError::InvalidInput`] if the population size or any chromosome
    /// length disagrees with `config`.
    pub fn with_population(config: GaConfig, population: Vec<Chromosome>) -> Result<Self> {
        config.validate()?;
        if population.len() != config.population_size {
            return Err(GaError::input(format!(
                "initial population has {} members, expected {}",
                population.len(),
                config.population_size
            )));
        }
        if let Some((i, c)) = population
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != config.bit_length)
        {
            return Err(GaError::input(format!(
                "chromosome {i} has length {}, expected {}",
                c.len(),
                config.bit_length
            )));
        }
        let rng = create_rng(config.seed);
        Ok(Self::from_parts(config, rng, population))
    }

    fn from_parts(config: GaConfig, rng: StdRng, population: Vec<Chromosome>) -> Self {
        let mut evo = Self {
            history: FitnessHistory {
                max: Vec::with_capacity(config.generations + 1),
                average: Vec::with_capacity(config.generations + 1),
            },
            config,
            rng,
            population,
            generation: 0,
            state: RunState::Initializing,
        };
        evo.enter(RunState::Evaluating);
        evo
    }

    /// Runs one generation.
    ///
    /// Returns `Ok(false)` without doing anything once the configured number
    /// of generations has been reached or the run has been finished.
    /// On error the stored population is left as it was.
    pub fn step(&mut self) -> Result<bool> {
        if self.state == RunState::Terminated || self.generation >= self.config.generations {
            return Ok(false);
        }

        self.enter(RunState::Evaluating);
        let fitness = self.evaluate();
        let stats = self.history.record(&fitness);
        debug!(
            generation = stats.generation,
            max_fitness = stats.max_fitness,
            average_fitness = stats.average_fitness,
            "evaluated generation"
        );

        self.enter(RunState::Selecting);
        let mut pool = select_mating_pool(&self.population, &fitness, &mut self.rng)?;

        self.enter(RunState::Recombining);
        self.recombine(&mut pool)?;

        self.enter(RunState::Mutating);
        self.mutate(&mut pool)?;

        self.enter(RunState::Replacing);
        self.population = pool;
        self.generation += 1;

        self.enter(RunState::Evaluating);
        Ok(true)
    }

    /// Performs the final evaluation and returns the run result.
    ///
    /// Can be called before all generations have run; the result then
    /// reflects the generations executed so far.
    ///
    /// # Errors
    /// [`GaError::InvalidInput`] if the run was already finished.
    pub fn finish(&mut self) -> Result<GaRunResult> {
        if self.state == RunState::Terminated {
            return Err(GaError::input("run already terminated"));
        }

        let fitness = self.evaluate();
        let stats = self.history.record(&fitness);
        self.enter(RunState::Terminated);

        let (best_idx, best_fitness) = fitness.iter().copied().enumerate().fold(
            (0, 0),
            |(bi, bf), (i, f)| if f > bf { (i, f) } else { (bi, bf) },
        );

        info!(
            generations = self.generation,
            max_fitness = stats.max_fitness,
            average_fitness = stats.average_fitness,
            "evolution finished"
        );

        Ok(GaRunResult {
            best: self.population[best_idx].clone(),
            best_fitness,
            population: self.population.clone(),
            fitness,
            generations: self.generation,
            history: self.history.clone(),
        })
    }

    /// Current phase of the loop.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Statistics recorded so far.
    pub fn history(&self) -> &FitnessHistory {
        &self.history
    }

    /// Configuration of this run.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    fn enter(&mut self, state: RunState) {
        trace!(from = ?self.state, to = ?state, generation = self.generation, "state transition");
        self.state = state;
    }

    fn evaluate(&self) -> Vec<u64> {
        evaluate_population(self.config.fitness, &self.population, self.config.parallel)
    }

    /// Crossover on pairs (0,1), (2,3), ..., each gated by the crossover rate.
    fn recombine(&mut self, pool: &mut [Chromosome]) -> Result<()> {
        for pair in pool.chunks_exact_mut(2) {
            if self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                let point = random_point(self.config.bit_length, &mut self.rng);
                let (c1, c2) = one_point_crossover(&pair[0], &pair[1], point)?;
                trace!(point, "crossover");
                pair[0] = c1;
                pair[1] = c2;
            }
        }
        Ok(())
    }

    /// Flips one random bit per individual, gated by the mutation rate.
    fn mutate(&mut self, pool: &mut [Chromosome]) -> Result<()> {
        for slot in pool.iter_mut() {
            if self.rng.random_range(0.0..1.0) < self.config.mutation_rate {
                let point = random_point(self.config.bit_length, &mut self.rng);
                *slot = bit_flip_mutation(slot, point)?;
                trace!(point, "mutation");
            }
        }
        Ok(())
    }
}

/// Executes a complete GA run.
///
/// # Usage
///
/// ```
/// use u_bitga::ga::{GaConfig, GaRunner};
///
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&config).unwrap();
/// assert_eq!(result.population.len(), 10);
/// assert_eq!(result.history.len(), 101);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA from a random initial population.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if `config` is invalid.
    pub fn run(config: &GaConfig) -> Result<GaRunResult> {
        Self::drive(Evolution::new(config.clone())?)
    }

    /// Runs the GA from the given initial population.
    ///
    /// # Errors
    /// See [`Evolution::with_population`].
    pub fn run_with_population(
        config: &GaConfig,
        population: Vec<Chromosome>,
    ) -> Result<GaRunResult> {
        Self::drive(Evolution::with_population(config.clone(), population)?)
    }

    fn drive(mut evo: Evolution) -> Result<GaRunResult> {
        let config = evo.config();
        info!(
            bit_length = config.bit_length,
            population_size = config.population_size,
            generations = config.generations,
            crossover_rate = config.crossover_rate,
            mutation_rate = config.mutation_rate,
            fitness = ?config.fitness,
            "starting evolution"
        );
        while evo.step()? {}
        evo.finish()
    }
}

fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// Evaluate all individuals in the population, index-aligned.
fn evaluate_population(fitness_fn: FitnessFn, population: &[Chromosome], parallel: bool) -> Vec<u64> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return population
                .par_iter()
                .map(|c| fitness_fn.evaluate(c))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    population.iter().map(|c| fitness_fn.evaluate(c)).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_population() -> Vec<Chromosome> {
        [[0, 0, 0, 0], [1, 1, 1, 1], [1, 0, 1, 0], [0, 1, 0, 1]]
            .iter()
            .map(|bits| Chromosome::from_bits(bits).unwrap())
            .collect()
    }

    fn small_config() -> GaConfig {
        GaConfig::default()
            .with_bit_length(4)
            .with_population_size(4)
            .with_generations(1)
            .with_crossover_rate(0.0)
            .with_mutation_rate(0.0)
            .with_seed(42)
    }

    #[test]
    fn test_history_record_floors_average() {
        let mut history = FitnessHistory::default();
        let stats = history.record(&[0, 15, 10, 5]);
        assert_eq!(stats.max_fitness, 15);
        assert_eq!(stats.average_fitness, 7); // 30 / 4 = 7.5
        assert_eq!(history.max, vec![15]);
        assert_eq!(history.average, vec![7]);
    }

    #[test]
    fn test_history_average_does_not_overflow() {
        let mut history = FitnessHistory::default();
        let stats = history.record(&[u64::MAX, u64::MAX]);
        assert_eq!(stats.average_fitness, u64::MAX);
    }

    #[test]
    fn test_history_iter() {
        let mut history = FitnessHistory::default();
        history.record(&[1, 3]);
        history.record(&[4, 4]);
        let rows: Vec<_> = history.iter().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].generation, 1);
        assert_eq!(rows[1].max_fitness, 4);
        assert_eq!(rows[0].average_fitness, 2);
    }

    #[test]
    fn test_initial_state() {
        let evo = Evolution::new(GaConfig::default().with_seed(1)).unwrap();
        assert_eq!(evo.state(), RunState::Evaluating);
        assert_eq!(evo.generation(), 0);
        assert_eq!(evo.population().len(), 10);
        assert!(evo.population().iter().all(|c| c.len() == 16));
        assert!(evo.history().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Evolution::new(GaConfig::default().with_population_size(7)).unwrap_err();
        assert!(matches!(err, GaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_with_population_checks_shape() {
        let config = small_config();

        let mut short = fixed_population();
        short.pop();
        assert!(matches!(
            Evolution::with_population(config.clone(), short).unwrap_err(),
            GaError::InvalidInput(_)
        ));

        let mut ragged = fixed_population();
        ragged[2] = Chromosome::from_bits(&[1, 0, 1]).unwrap();
        assert!(matches!(
            Evolution::with_population(config, ragged).unwrap_err(),
            GaError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_step_stops_at_generation_budget() {
        let mut evo = Evolution::new(small_config()).unwrap();
        assert!(evo.step().unwrap());
        assert!(!evo.step().unwrap());
        assert_eq!(evo.generation(), 1);
        assert_eq!(evo.history().len(), 1);
    }

    #[test]
    fn test_finish_terminates() {
        let mut evo = Evolution::with_population(small_config(), fixed_population()).unwrap();
        while evo.step().unwrap() {}
        let result = evo.finish().unwrap();
        assert_eq!(evo.state(), RunState::Terminated);
        assert_eq!(result.generations, 1);
        assert_eq!(result.history.len(), 2);

        assert!(!evo.step().unwrap());
        assert!(evo.finish().is_err());
    }

    #[test]
    fn test_no_operators_only_reshuffles() {
        let initial = fixed_population();
        let config = small_config().with_generations(10);
        let result = GaRunner::run_with_population(&config, initial.clone()).unwrap();

        assert_eq!(result.history.max[0], 15);
        assert_eq!(result.history.average[0], 7);
        assert!(result.population.iter().all(|c| initial.contains(c)));
        // Selection alone never invents a better chromosome.
        assert!(result.history.max.iter().all(|&m| m <= 15));
    }

    #[test]
    fn test_best_matches_fitness() {
        let result = GaRunner::run(&GaConfig::default().with_seed(3)).unwrap();
        assert_eq!(result.best_fitness, *result.fitness.iter().max().unwrap());
        assert_eq!(result.best_fitness, FitnessFn::Value.evaluate(&result.best));
        assert_eq!(result.history.max.last(), Some(&result.best_fitness));
    }

    #[test]
    fn test_value_fitness_improves() {
        let config = GaConfig::default()
            .with_population_size(20)
            .with_generations(100)
            .with_seed(42);
        let result = GaRunner::run(&config).unwrap();
        let first = result.history.average[0];
        let last = *result.history.average.last().unwrap();
        assert!(
            last > first,
            "average fitness should rise: first={first}, last={last}"
        );
    }

    #[test]
    fn test_onemax_convergence() {
        let config = GaConfig::default()
            .with_bit_length(20)
            .with_population_size(50)
            .with_generations(200)
            .with_mutation_rate(0.3)
            .with_fitness(FitnessFn::Ones)
            .with_seed(42);
        let result = GaRunner::run(&config).unwrap();
        assert!(
            result.best_fitness >= 15,
            "expected at least 15 ones out of 20, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_zero_generations() {
        let config = GaConfig::default().with_generations(0).with_seed(5);
        let result = GaRunner::run(&config).unwrap();
        assert_eq!(result.generations, 0);
        assert_eq!(result.history.len(), 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = GaConfig::default().with_seed(42);
        let seq = GaRunner::run(&config).unwrap();
        let par = GaRunner::run(&config.clone().with_parallel(true)).unwrap();
        assert_eq!(seq, par);
    }
}
