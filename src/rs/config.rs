//! Random Search configuration.

use crate::init::InitialPolicy;

/// Configuration for Random Search.
///
/// # Examples
///
/// ```
/// use u_knapsack::init::InitialPolicy;
/// use u_knapsack::rs::RsConfig;
///
/// let config = RsConfig::default()
///     .with_iterations(5_000)
///     .with_initial(InitialPolicy::Zeros)
///     .with_seed(7);
/// assert_eq!(config.iterations, 5_000);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RsConfig {
    /// Number of bit-flip proposals to evaluate.
    pub iterations: usize,
    /// How the starting candidate is produced.
    pub initial: InitialPolicy,
    /// Random seed (None for a random seed).
    pub seed: Option<u64>,
}

impl Default for RsConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            initial: InitialPolicy::default(),
            seed: None,
        }
    }
}

impl RsConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_initial(mut self, initial: InitialPolicy) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
