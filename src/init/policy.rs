//! Initial-solution strategies and the policy enum that selects them.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use tracing::warn;

use super::types::InitialSolution;
use crate::error::{KnapsackError, Result};
use crate::instance::{Candidate, Instance};

/// Sample count used by [`BestOfN`] when none is given.
pub const DEFAULT_BEST_OF_N: usize = 100;

/// All-zero candidate. Always feasible, value 0. Consumes no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zeros;

impl InitialSolution for Zeros {
    fn initial_solution<R: Rng>(&self, instance: &Instance, _rng: &mut R) -> Result<Candidate> {
        Ok(Candidate::zeros(instance.item_count()))
    }
}

/// Rejection-samples uniform random candidates until one is feasible.
///
/// With `max_attempts: None` the loop is unbounded: if the capacity is
/// small relative to the item weights, a feasible sample may never come
/// up. Callers that cannot rule this out should set a cap, in which case
/// exhausting it fails with [`KnapsackError::NoFeasibleSample`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomFeasible {
    pub max_attempts: Option<usize>,
}

impl RandomFeasible {
    pub fn with_max_attempts(n: usize) -> Self {
        Self {
            max_attempts: Some(n),
        }
    }
}

impl InitialSolution for RandomFeasible {
    fn initial_solution<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Result<Candidate> {
        let mut attempts = 0usize;
        loop {
            if let Some(cap) = self.max_attempts {
                if attempts >= cap {
                    warn!(attempts, "random-feasible initialization exhausted its attempts");
                    return Err(KnapsackError::NoFeasibleSample { attempts });
                }
            }
            attempts += 1;

            let candidate = Candidate::random(instance.item_count(), rng);
            if instance.is_feasible(&instance.evaluate(&candidate)?) {
                return Ok(candidate);
            }
        }
    }
}

/// Keeps the most valuable feasible candidate among `n` uniform samples.
///
/// Only a strictly greater value replaces the incumbent, so ties go to
/// the first sample seen and a feasible sample of value 0 never displaces
/// the all-zero fallback. If no sample is feasible the all-zero candidate
/// is returned.
#[derive(Debug, Clone, Copy)]
pub struct BestOfN {
    pub n: usize,
}

impl Default for BestOfN {
    fn default() -> Self {
        Self {
            n: DEFAULT_BEST_OF_N,
        }
    }
}

impl InitialSolution for BestOfN {
    fn initial_solution<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Result<Candidate> {
        let mut best = Candidate::zeros(instance.item_count());
        let mut best_value = 0;

        for _ in 0..self.n {
            let candidate = Candidate::random(instance.item_count(), rng);
            let eval = instance.evaluate(&candidate)?;
            if eval.value > best_value && instance.is_feasible(&eval) {
                best_value = eval.value;
                best = candidate;
            }
        }

        Ok(best)
    }
}

/// Which initial-solution strategy a run starts from.
///
/// Parses from a name (`"zeros"`, `"random-feasible"`,
/// `"random-feasible-<cap>"`, `"best-of-n"` or `"best-of-<N>"`) or from the numeric tags 0, 1, 2 used by experiment
/// tables. Unknown input fails with [`KnapsackError::InvalidConfiguration`].
///
/// ```
/// use u_knapsack::init::InitialPolicy;
///
/// let policy: InitialPolicy = "best-of-20".parse().unwrap();
/// assert_eq!(policy, InitialPolicy::BestOfN { n: 20 });
/// assert!("greedy".parse::<InitialPolicy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitialPolicy {
    /// See [`Zeros`].
    Zeros,
    /// See [`RandomFeasible`].
    RandomFeasible { max_attempts: Option<usize> },
    /// See [`BestOfN`].
    BestOfN { n: usize },
}

impl Default for InitialPolicy {
    fn default() -> Self {
        InitialPolicy::BestOfN {
            n: DEFAULT_BEST_OF_N,
        }
    }
}

impl InitialSolution for InitialPolicy {
    fn initial_solution<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Result<Candidate> {
        match *self {
            InitialPolicy::Zeros => Zeros.initial_solution(instance, rng),
            InitialPolicy::RandomFeasible { max_attempts } => {
                RandomFeasible { max_attempts }.initial_solution(instance, rng)
            }
            InitialPolicy::BestOfN { n } => BestOfN { n }.initial_solution(instance, rng),
        }
    }
}

impl fmt::Display for InitialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialPolicy::Zeros => f.write_str("zeros"),
            InitialPolicy::RandomFeasible { max_attempts: None } => f.write_str("random-feasible"),
            InitialPolicy::RandomFeasible {
                max_attempts: Some(n),
            } => write!(f, "random-feasible-{n}"),
            InitialPolicy::BestOfN { n } => write!(f, "best-of-{n}"),
        }
    }
}

impl FromStr for InitialPolicy {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        match name.as_str() {
            "zeros" => Ok(InitialPolicy::Zeros),
            "random-feasible" => Ok(InitialPolicy::RandomFeasible { max_attempts: None }),
            "best-of-n" => Ok(InitialPolicy::default()),
            _ => {
                if let Some(Ok(n)) = name.strip_prefix("best-of-").map(str::parse::<usize>) {
                    return Ok(InitialPolicy::BestOfN { n });
                }
                if let Some(Ok(n)) = name
                    .strip_prefix("random-feasible-")
                    .map(str::parse::<usize>)
                {
                    return Ok(InitialPolicy::RandomFeasible {
                        max_attempts: Some(n),
                    });
                }
                Err(KnapsackError::InvalidConfiguration(format!(
                    "unknown initial-solution policy {s:?}"
                )))
            }
        }
    }
}

impl TryFrom<u8> for InitialPolicy {
    type Error = KnapsackError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(InitialPolicy::Zeros),
            1 => Ok(InitialPolicy::RandomFeasible { max_attempts: None }),
            2 => Ok(InitialPolicy::default()),
            _ => Err(KnapsackError::InvalidConfiguration(format!(
                "unknown initial-solution policy tag {tag}"
            ))),
        }
    }
}
