//! Parameter sweeps over generated instances.

use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;
use u_numflow::random::create_rng;

use super::record::ExperimentRecord;
use crate::error::Result;
use crate::instance::generator::{generate_instance_with_seed, DEFAULT_SEED};
use crate::instance::Instance;
use crate::rs::{RsConfig, RsRunner};
use crate::sa::{default_temperature, SaConfig, SaRunner};

/// An algorithm and its base configuration.
///
/// The sweep overrides the iteration budget and the seed of each run;
/// every other setting is taken from the config as given.
#[derive(Debug, Clone)]
pub enum Algorithm {
    RandomSearch(RsConfig),
    SimulatedAnnealing(SaConfig),
}

impl Algorithm {
    /// Name written to the `algorithm` column.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::RandomSearch(_) => "random_search",
            Algorithm::SimulatedAnnealing(_) => "simulated_annealing",
        }
    }
}

/// Grid of runs: every algorithm × size × budget × repetition.
///
/// # Examples
///
/// ```
/// use u_knapsack::experiment::{Algorithm, Sweep};
/// use u_knapsack::rs::RsConfig;
/// use u_knapsack::sa::SaConfig;
///
/// let records = Sweep::default()
///     .with_sizes(vec![10, 20])
///     .with_iterations(vec![100])
///     .with_algorithms(vec![
///         Algorithm::RandomSearch(RsConfig::default()),
///         Algorithm::SimulatedAnnealing(SaConfig::default()),
///     ])
///     .run()
///     .unwrap();
/// assert_eq!(records.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Sweep {
    /// Item counts of the generated instances.
    pub sizes: Vec<usize>,
    /// Iteration budgets.
    pub iterations: Vec<usize>,
    /// Algorithms to compare.
    pub algorithms: Vec<Algorithm>,
    /// Runs per grid point.
    pub repetitions: usize,
    /// Seed of the instance generator.
    pub instance_seed: i64,
    /// Run `k` of the grid (in enumeration order) is seeded with
    /// `base_seed + k`.
    pub base_seed: u64,
    /// Replace each SA config's initial temperature with
    /// [`default_temperature`] of the instance.
    pub scale_temperature: bool,
    /// Distribute runs over rayon's thread pool. Ignored without the
    /// `parallel` feature.
    pub parallel: bool,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            sizes: vec![20],
            iterations: vec![100],
            algorithms: vec![
                Algorithm::RandomSearch(RsConfig::default()),
                Algorithm::SimulatedAnnealing(SaConfig::default()),
            ],
            repetitions: 1,
            instance_seed: DEFAULT_SEED,
            base_seed: 0,
            scale_temperature: true,
            parallel: false,
        }
    }
}

struct Job<'a> {
    instance: &'a Instance,
    algorithm: &'a Algorithm,
    iterations: usize,
    seed: u64,
}

impl Sweep {
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_iterations(mut self, iterations: Vec<usize>) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_instance_seed(mut self, seed: i64) -> Self {
        self.instance_seed = seed;
        self
    }

    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_scale_temperature(mut self, scale: bool) -> Self {
        self.scale_temperature = scale;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Executes every run and returns the records in grid order
    /// (size, budget, algorithm, repetition).
    pub fn run(&self) -> Result<Vec<ExperimentRecord>> {
        let instances = self
            .sizes
            .iter()
            .map(|&n| generate_instance_with_seed(n, self.instance_seed))
            .collect::<Result<Vec<_>>>()?;

        let mut jobs = Vec::new();
        for instance in &instances {
            for &iterations in &self.iterations {
                for algorithm in &self.algorithms {
                    for _ in 0..self.repetitions {
                        let seed = self.base_seed.wrapping_add(jobs.len() as u64);
                        jobs.push(Job {
                            instance,
                            algorithm,
                            iterations,
                            seed,
                        });
                    }
                }
            }
        }

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                return jobs.par_iter().map(|job| self.execute(job)).collect();
            }
        }

        jobs.iter().map(|job| self.execute(job)).collect()
    }

    fn execute(&self, job: &Job<'_>) -> Result<ExperimentRecord> {
        let mut rng = create_rng(job.seed);
        let start = Instant::now();

        let (value, weight) = match job.algorithm {
            Algorithm::RandomSearch(base) => {
                let config = base.clone().with_iterations(job.iterations);
                let result = RsRunner::run_with_rng(job.instance, &config, &mut rng)?;
                (result.value, result.weight)
            }
            Algorithm::SimulatedAnnealing(base) => {
                let mut config = base.clone().with_iterations(job.iterations);
                if self.scale_temperature {
                    config.initial_temperature = default_temperature(job.instance);
                }
                let result = SaRunner::run_with_rng(job.instance, &config, &mut rng)?;
                (result.value, result.weight)
            }
        };

        let record = ExperimentRecord {
            algorithm: job.algorithm.name().to_string(),
            item_count: job.instance.item_count(),
            iterations: job.iterations,
            elapsed: start.elapsed(),
            value,
            weight,
            seed: job.seed,
        };
        info!(
            algorithm = %record.algorithm,
            items = record.item_count,
            iterations = record.iterations,
            elapsed_ms = record.elapsed.as_millis() as u64,
            value = record.value,
            weight = record.weight,
            "experiment run finished"
        );
        Ok(record)
    }
}
