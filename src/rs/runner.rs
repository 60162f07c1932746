//! Random Search execution loop.
//!
//! # Algorithm
//!
//! 1. Build the initial candidate from the configured policy
//! 2. For each iteration:
//!    a. Propose a copy of the current candidate with one random bit flipped
//!    b. Replace the current candidate iff the proposal fits in the
//!    knapsack and its value is strictly greater
//! 3. Stop when the iteration budget is spent
//!
//! Because only strict improvements are accepted, the returned value is
//! never below the initial value, and the result stays feasible whenever
//! the start was.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, trace};
use u_numflow::random::create_rng;

use super::config::RsConfig;
use crate::error::Result;
use crate::init::{InitialPolicy, InitialSolution};
use crate::instance::{Candidate, Instance};
use crate::neighbor::flip_neighbor;

const HISTORY_INTERVAL: usize = 100;

/// Result of a Random Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RsResult {
    /// Final candidate.
    pub best: Candidate,
    /// Total value of `best`.
    pub value: u64,
    /// Total weight of `best`.
    pub weight: u64,
    /// Value of the initial candidate.
    pub initial_value: u64,
    /// Iterations actually performed.
    pub iterations: usize,
    /// Number of accepted (strictly improving) proposals.
    pub improving_moves: usize,
    /// Whether cancelled externally.
    pub cancelled: bool,
    /// Current value sampled every 100 iterations.
    pub value_history: Vec<u64>,
}

/// Executes Random Search.
pub struct RsRunner;

impl RsRunner {
    /// Runs Random Search with an RNG seeded from `config.seed`.
    pub fn run(instance: &Instance, config: &RsConfig) -> Result<RsResult> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(instance, config, &mut rng)
    }

    /// Runs Random Search drawing from the caller's RNG.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        config: &RsConfig,
        rng: &mut R,
    ) -> Result<RsResult> {
        Self::run_with_cancel(instance, config, rng, None)
    }

    /// Runs Random Search with an optional cancellation token, checked
    /// before every iteration.
    pub fn run_with_cancel<R: Rng>(
        instance: &Instance,
        config: &RsConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RsResult> {
        debug!(
            items = instance.item_count(),
            iterations = config.iterations,
            initial = %config.initial,
            "starting random search"
        );

        let mut current = config.initial.initial_solution(instance, rng)?;
        let mut current_eval = instance.evaluate(&current)?;
        let initial_value = current_eval.value;

        let mut iterations = 0usize;
        let mut improving_moves = 0usize;
        let mut cancelled = false;
        let mut value_history = vec![current_eval.value];

        while iterations < config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            // The proposal is a copy; `current` is only replaced on acceptance.
            let Some((neighbor, index)) = flip_neighbor(&current, rng) else {
                break;
            };
            let neighbor_eval = instance.evaluate(&neighbor)?;

            if instance.is_feasible(&neighbor_eval) && neighbor_eval.value > current_eval.value {
                trace!(
                    iteration = iterations,
                    index,
                    value = neighbor_eval.value,
                    "improving move"
                );
                current = neighbor;
                current_eval = neighbor_eval;
                improving_moves += 1;
            }

            iterations += 1;
            if iterations.is_multiple_of(HISTORY_INTERVAL) {
                value_history.push(current_eval.value);
            }
        }

        let eval = instance.evaluate(&current)?;
        if value_history.last() != Some(&eval.value) {
            value_history.push(eval.value);
        }

        debug!(
            value = eval.value,
            weight = eval.weight,
            iterations,
            improving_moves,
            cancelled,
            "random search finished"
        );

        Ok(RsResult {
            best: current,
            value: eval.value,
            weight: eval.weight,
            initial_value,
            iterations,
            improving_moves,
            cancelled,
            value_history,
        })
    }
}

/// Runs Random Search from explicit parameters.
///
/// Shorthand for [`RsRunner::run_with_rng`] with a config built from
/// `iterations` and `initial`.
pub fn random_search<R: Rng>(
    instance: &Instance,
    iterations: usize,
    initial: InitialPolicy,
    rng: &mut R,
) -> Result<RsResult> {
    let config = RsConfig::default()
        .with_iterations(iterations)
        .with_initial(initial);
    RsRunner::run_with_rng(instance, &config, rng)
}
