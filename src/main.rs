//! Runs one GA and prints the final fitness values and population.

use clap::{Parser, ValueEnum};
use tracing::error;
use u_bitga::ga::{FitnessFn, GaConfig, GaRunResult, GaRunner};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FitnessArg {
    /// Bitstring read as a binary number
    Value,
    /// Number of 1-bits
    Ones,
}

impl From<FitnessArg> for FitnessFn {
    fn from(arg: FitnessArg) -> Self {
        match arg {
            FitnessArg::Value => FitnessFn::Value,
            FitnessArg::Ones => FitnessFn::Ones,
        }
    }
}

#[derive(Parser)]
#[command(name = "max-bitstring")]
#[command(about = "Evolve a bitstring toward its maximum value with a genetic algorithm")]
struct Args {
    /// Genes per chromosome
    #[arg(long, default_value = "16")]
    bit_length: usize,

    /// Individuals per generation (must be even)
    #[arg(long, default_value = "10")]
    population_size: usize,

    /// Number of generations
    #[arg(long, default_value = "100")]
    generations: usize,

    /// Probability of crossover per pair
    #[arg(long, default_value = "0.7")]
    crossover_rate: f64,

    /// Probability of a bit flip per individual
    #[arg(long, default_value = "0.1")]
    mutation_rate: f64,

    /// Fitness function
    #[arg(long, value_enum, default_value = "value")]
    fitness: FitnessArg,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also print max/average fitness per generation
    #[arg(long)]
    history: bool,

    /// Logging level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn config(&self) -> GaConfig {
        let config = GaConfig::default()
            .with_bit_length(self.bit_length)
            .with_population_size(self.population_size)
            .with_generations(self.generations)
            .with_crossover_rate(self.crossover_rate)
            .with_mutation_rate(self.mutation_rate)
            .with_fitness(self.fitness.into());
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let result = match GaRunner::run(&args.config()) {
        Ok(result) => result,
        Err(e) => {
            error!("GA run failed: {}", e);
            return Err(e.into());
        }
    };

    print_result(&result, args.history);
    Ok(())
}

fn print_result(result: &GaRunResult, history: bool) {
    println!("{}", format_list(result.fitness.iter()));
    println!("{}", format_list(result.population.iter()));

    if history {
        println!("generation\tmax\taverage");
        for stats in result.history.iter() {
            println!(
                "{}\t{}\t{}",
                stats.generation, stats.max_fitness, stats.average_fitness
            );
        }
    }
}

fn format_list<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let parts: Vec<String> = items.map(|item| item.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
