//! SA execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, trace};
use u_numflow::random::create_rng;

use super::config::{AcceptanceRule, CoolingKind, SaConfig};
use crate::error::Result;
use crate::init::{InitialPolicy, InitialSolution};
use crate::instance::{Candidate, Evaluation, Instance};
use crate::neighbor::flip_neighbor;

const HISTORY_INTERVAL: usize = 100;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// The best candidate seen during the run.
    pub best: Candidate,

    /// Total value of `best`, recomputed from it.
    pub value: u64,

    /// Total weight of `best`, recomputed from it.
    pub weight: u64,

    /// Total number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that strictly increased the value.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Best value sampled every 100 iterations.
    pub value_history: Vec<u64>,
}

/// One iteration as seen by an observer of [`SaRunner::run_observed`].
#[derive(Debug, Clone, Copy)]
pub struct SaStep {
    /// Zero-based iteration index.
    pub iteration: usize,
    /// Temperature during this iteration, before cooling.
    pub temperature: f64,
    /// Value and weight of the proposed neighbor.
    pub neighbor: Evaluation,
    /// Whether the neighbor became the current candidate.
    pub accepted: bool,
    /// Current value after the acceptance decision.
    pub current_value: u64,
    /// Best value after this iteration.
    pub best_value: u64,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed`.
    pub fn run(instance: &Instance, config: &SaConfig) -> Result<SaResult> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs SA drawing from the caller's RNG. `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult> {
        Self::run_observed(instance, config, rng, None, |_| {})
    }

    /// Runs SA with an optional cancellation token.
    pub fn run_with_cancel<R: Rng>(
        instance: &Instance,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SaResult> {
        Self::run_observed(instance, config, rng, cancel, |_| {})
    }

    /// Runs SA, reporting every iteration to `observer`.
    ///
    /// Per iteration the RNG is drawn for the flipped index and then, only
    /// when the neighbor is feasible and not strictly better, once more for
    /// the acceptance test. Seeded replays are therefore deterministic.
    pub fn run_observed<R, F>(
        instance: &Instance,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
        mut observer: F,
    ) -> Result<SaResult>
    where
        R: Rng,
        F: FnMut(&SaStep),
    {
        debug!(
            items = instance.item_count(),
            iterations = config.iterations,
            initial_temperature = config.initial_temperature,
            final_temperature = config.final_temperature,
            alpha = config.alpha,
            cooling = %config.cooling,
            initial = %config.initial,
            "starting simulated annealing"
        );

        let mut current = config.initial.initial_solution(instance, rng)?;
        let mut current_eval = instance.evaluate(&current)?;

        // Independent copy: later moves on `current` never touch `best`.
        let mut best = current.clone();
        let mut best_value = current_eval.value;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut value_history = vec![best_value];

        while iterations < config.iterations && temperature > config.final_temperature {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let Some((neighbor, index)) = flip_neighbor(&current, rng) else {
                break;
            };
            let neighbor_eval = instance.evaluate(&neighbor)?;
            let improves = neighbor_eval.value > current_eval.value;

            let accepted = instance.is_feasible(&neighbor_eval)
                && (improves || {
                    // Non-positive; f64 only for the exponential.
                    let delta = -((current_eval.value - neighbor_eval.value) as f64);
                    accept_worse(delta, temperature, config, rng)
                });

            if accepted {
                if improves {
                    improving_moves += 1;
                }
                accepted_moves += 1;
                trace!(
                    iteration = iterations,
                    index,
                    value = neighbor_eval.value,
                    temperature,
                    "accepted move"
                );
                current = neighbor;
                current_eval = neighbor_eval;
            }

            if current_eval.value > best_value {
                best = current.clone();
                best_value = current_eval.value;
            }

            observer(&SaStep {
                iteration: iterations,
                temperature,
                neighbor: neighbor_eval,
                accepted,
                current_value: current_eval.value,
                best_value,
            });

            temperature = config.cooling.cool(temperature, config.alpha);
            iterations += 1;

            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                value_history.push(best_value);
            }
        }

        let eval = instance.evaluate(&best)?;
        if value_history.last() != Some(&eval.value) {
            value_history.push(eval.value);
        }

        debug!(
            value = eval.value,
            weight = eval.weight,
            iterations,
            accepted_moves,
            final_temperature = temperature,
            cancelled,
            "simulated annealing finished"
        );

        Ok(SaResult {
            best,
            value: eval.value,
            weight: eval.weight,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            value_history,
        })
    }
}

/// Acceptance test for a feasible neighbor that is not strictly better.
fn accept_worse<R: Rng>(delta: f64, temperature: f64, config: &SaConfig, rng: &mut R) -> bool {
    match config.acceptance {
        AcceptanceRule::InitialTemperature => {
            (-delta / config.initial_temperature).exp() > rng.random::<f64>()
        }
        AcceptanceRule::Metropolis => {
            if temperature > 0.0 {
                (delta / temperature).exp() > rng.random::<f64>()
            } else {
                false
            }
        }
    }
}

/// Runs Simulated Annealing from explicit parameters.
///
/// Uses [`AcceptanceRule::InitialTemperature`]; build an [`SaConfig`] to
/// choose otherwise.
#[allow(clippy::too_many_arguments)]
pub fn simulated_annealing<R: Rng>(
    instance: &Instance,
    iterations: usize,
    initial_temperature: f64,
    alpha: f64,
    cooling: CoolingKind,
    initial: InitialPolicy,
    final_temperature: f64,
    rng: &mut R,
) -> Result<SaResult> {
    let config = SaConfig::default()
        .with_iterations(iterations)
        .with_initial_temperature(initial_temperature)
        .with_alpha(alpha)
        .with_cooling(cooling)
        .with_initial(initial)
        .with_final_temperature(final_temperature);
    SaRunner::run_with_rng(instance, &config, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::generator::generate_instance;

    fn small() -> Instance {
        Instance::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap()
    }

    #[test]
    fn test_sa_geometric_stops_on_temperature() {
        // 100 -> 50 -> 25 -> 12.5 -> 6.25 -> 3.125 -> 1.5625 -> 0.78125
        let instance = generate_instance(20).unwrap();
        let config = SaConfig::default()
            .with_iterations(1000)
            .with_initial_temperature(100.0)
            .with_final_temperature(1.0)
            .with_alpha(0.5)
            .with_cooling(CoolingKind::Geometric)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).unwrap();

        assert_eq!(result.iterations, 7);
        assert_eq!(result.final_temperature, 0.78125);
    }

    #[test]
    fn test_sa_linear_stops_on_temperature() {
        let instance = generate_instance(20).unwrap();
        let config = SaConfig::default()
            .with_iterations(1000)
            .with_initial_temperature(10.0)
            .with_alpha(1.0)
            .with_cooling(CoolingKind::Linear)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).unwrap();

        assert_eq!(result.iterations, 10);
        assert_eq!(result.final_temperature, 0.0);
    }

    #[test]
    fn test_sa_stops_on_iteration_budget() {
        let instance = generate_instance(20).unwrap();
        let config = SaConfig::default()
            .with_iterations(250)
            .with_initial_temperature(1e6)
            .with_alpha(0.9999)
            .with_seed(42);

        let result = SaRunner::run(&instance, &config).unwrap();
        assert_eq!(result.iterations, 250);
    }

    #[test]
    fn test_sa_equal_temperatures_run_zero_iterations() {
        let instance = generate_instance(30).unwrap();
        let config = SaConfig::default()
            .with_iterations(1000)
            .with_initial_temperature(5.0)
            .with_final_temperature(5.0)
            .with_seed(8);

        let result = SaRunner::run(&instance, &config).unwrap();

        let mut rng = create_rng(8);
        let start = config.initial.initial_solution(&instance, &mut rng).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, start);
        assert_eq!(result.final_temperature, 5.0);
    }

    #[test]
    fn test_sa_best_is_running_maximum() {
        let instance = generate_instance(50).unwrap();
        let config = SaConfig::default()
            .with_iterations(5000)
            .with_initial_temperature(10.0)
            .with_alpha(0.999)
            .with_acceptance(AcceptanceRule::Metropolis)
            .with_seed(42);
        let mut rng = create_rng(42);

        let mut max_current = 0;
        let mut steps = 0;
        let result = SaRunner::run_observed(&instance, &config, &mut rng, None, |step| {
            assert!(step.best_value >= step.current_value);
            max_current = max_current.max(step.current_value);
            steps += 1;
        })
        .unwrap();

        assert_eq!(steps, result.iterations);
        assert!(result.value >= max_current);
        assert!(result.weight <= instance.capacity());
    }

    #[test]
    fn test_sa_initial_temperature_accepts_every_feasible_neighbor() {
        let instance = generate_instance(30).unwrap();
        let config = SaConfig::default()
            .with_iterations(2000)
            .with_initial_temperature(1.0)
            .with_alpha(0.9999)
            .with_seed(3);
        let mut rng = create_rng(3);

        SaRunner::run_observed(&instance, &config, &mut rng, None, |step| {
            assert_eq!(
                step.accepted,
                step.neighbor.weight <= instance.capacity(),
                "iteration {}",
                step.iteration
            );
        })
        .unwrap();
    }

    #[test]
    fn test_sa_current_temperature_rejects_worse_when_cold() {
        let instance = generate_instance(30).unwrap();
        let config = SaConfig::default()
            .with_iterations(2000)
            .with_initial_temperature(1e-9)
            .with_alpha(0.9999)
            .with_acceptance(AcceptanceRule::Metropolis)
            .with_initial(InitialPolicy::Zeros)
            .with_seed(3);
        let mut rng = create_rng(3);

        // Values are integral, so any worsening move has delta <= -1 and
        // exp(delta / T) underflows to 0.
        let mut previous = 0;
        SaRunner::run_observed(&instance, &config, &mut rng, None, |step| {
            if step.accepted {
                assert!(step.neighbor.value >= previous);
            }
            assert!(step.current_value >= previous);
            previous = step.current_value;
        })
        .unwrap();
    }

    #[test]
    fn test_sa_counts_unit_improvements_on_large_values() {
        // 2^60 + 1 is not representable in f64, so a +1 step is only
        // visible through integer comparison.
        let big = 1u64 << 60;
        let instance = Instance::new(vec![1, 1], vec![big, 1], 2).unwrap();
        let config = SaConfig::default()
            .with_iterations(200)
            .with_initial_temperature(10.0)
            .with_alpha(0.999)
            .with_initial(InitialPolicy::Zeros);

        let mut unit_steps = 0;
        for seed in 0..10 {
            let mut rng = create_rng(seed);
            let mut previous = 0;
            let mut increases = 0;
            let result = SaRunner::run_observed(&instance, &config, &mut rng, None, |step| {
                if step.current_value > previous {
                    increases += 1;
                    if previous == big {
                        unit_steps += 1;
                    }
                }
                previous = step.current_value;
            })
            .unwrap();

            assert_eq!(result.improving_moves, increases, "seed {seed}");
            assert_eq!(result.value, big + 1);
        }
        assert!(unit_steps > 0);
    }

    #[test]
    fn test_sa_result_consistent_and_feasible() {
        let instance = generate_instance(60).unwrap();
        let config = SaConfig::default()
            .with_iterations(5000)
            .with_temperature_for(&instance)
            .with_seed(17);

        let result = SaRunner::run(&instance, &config).unwrap();
        let eval = instance.evaluate(&result.best).unwrap();

        assert_eq!(eval.value, result.value);
        assert_eq!(eval.weight, result.weight);
        assert!(result.weight <= instance.capacity());
        assert!(result.accepted_moves >= result.improving_moves);
        for window in result.value_history.windows(2) {
            assert!(window[1] >= window[0]);
        }
    }

    #[test]
    fn test_sa_small_instance() {
        let instance = small();
        let mut rng = create_rng(42);
        let result = simulated_annealing(
            &instance,
            2000,
            10.0,
            0.999,
            CoolingKind::Geometric,
            InitialPolicy::Zeros,
            0.0,
            &mut rng,
        )
        .unwrap();

        // Accepting every feasible neighbor makes the walk visit all five
        // feasible subsets, the optimum included.
        assert_eq!(result.value, 7);
        assert_eq!(result.weight, 5);
    }

    #[test]
    fn test_sa_seeded_runs_are_reproducible() {
        let instance = generate_instance(40).unwrap();
        let config = SaConfig::default()
            .with_iterations(3000)
            .with_acceptance(AcceptanceRule::Metropolis)
            .with_seed(1234);

        let a = SaRunner::run(&instance, &config).unwrap();
        let b = SaRunner::run(&instance, &config).unwrap();

        assert_eq!(a.best, b.best);
        assert_eq!(a.accepted_moves, b.accepted_moves);
        assert_eq!(a.value_history, b.value_history);
    }

    #[test]
    fn test_sa_empty_instance() {
        let instance = Instance::new(vec![], vec![], 0).unwrap();
        let result = SaRunner::run(&instance, &SaConfig::default().with_seed(1)).unwrap();
        assert!(result.best.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_sa_cancellation() {
        let instance = generate_instance(20).unwrap();
        let config = SaConfig::default().with_iterations(1_000_000);
        let mut rng = create_rng(42);

        let cancel = Arc::new(AtomicBool::new(true));

        let result = SaRunner::run_with_cancel(&instance, &config, &mut rng, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }
}
