//! SA configuration and cooling schedules.

use std::fmt;
use std::str::FromStr;

use crate::error::{KnapsackError, Result};
use crate::init::InitialPolicy;
use crate::instance::Instance;

/// How the temperature drops after every iteration.
///
/// Both kinds are parameterized by [`SaConfig::alpha`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingKind {
    /// `T_{k+1} = T_k - alpha`.
    Linear,
    /// `T_{k+1} = alpha * T_k`. Typical `alpha`: 0.95–0.99.
    #[default]
    Geometric,
}

impl CoolingKind {
    /// Applies one cooling step.
    pub fn cool(self, temperature: f64, alpha: f64) -> f64 {
        match self {
            CoolingKind::Linear => temperature - alpha,
            CoolingKind::Geometric => temperature * alpha,
        }
    }
}

impl fmt::Display for CoolingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoolingKind::Linear => f.write_str("linear"),
            CoolingKind::Geometric => f.write_str("geometric"),
        }
    }
}

impl FromStr for CoolingKind {
    type Err = KnapsackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(CoolingKind::Linear),
            "geometric" => Ok(CoolingKind::Geometric),
            _ => Err(KnapsackError::InvalidConfiguration(format!(
                "unknown cooling kind {s:?}"
            ))),
        }
    }
}

/// Numeric tags as stored in experiment tables: 0 linear, 1 geometric.
impl TryFrom<u8> for CoolingKind {
    type Error = KnapsackError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(CoolingKind::Linear),
            1 => Ok(CoolingKind::Geometric),
            _ => Err(KnapsackError::InvalidConfiguration(format!(
                "unknown cooling kind tag {tag}"
            ))),
        }
    }
}

/// Rule deciding whether a feasible, not strictly better neighbor is
/// accepted. `delta = neighbor_value - current_value <= 0` here.
///
/// [`InitialTemperature`](AcceptanceRule::InitialTemperature) tests
/// `exp(-delta / T_0) > U(0, 1)` and reproduces earlier experiment tables.
/// Since the exponent is never negative, every feasible neighbor passes;
/// the temperature only decides when the run stops.
///
/// [`Metropolis`](AcceptanceRule::Metropolis) tests
/// `exp(delta / T) > U(0, 1)` with the current temperature `T`, the
/// criterion of Kirkpatrick et al. (1983) for maximization. It never
/// accepts a worse move once `T <= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcceptanceRule {
    #[default]
    InitialTemperature,
    Metropolis,
}

/// Configuration for Simulated Annealing.
///
/// The run stops as soon as either `iterations` proposals were evaluated
/// or the temperature is no longer above `final_temperature`. Numeric
/// parameters are not validated: a geometric `alpha` outside (0, 1) or a
/// non-positive linear `alpha` never cools toward the threshold, and the
/// run then ends only on the iteration budget.
///
/// # Examples
///
/// ```
/// use u_knapsack::sa::{CoolingKind, SaConfig};
///
/// let config = SaConfig::default()
///     .with_iterations(10_000)
///     .with_initial_temperature(50.0)
///     .with_alpha(0.98)
///     .with_cooling(CoolingKind::Geometric)
///     .with_seed(42);
/// assert_eq!(config.final_temperature, 0.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Maximum number of iterations (neighbor evaluations).
    pub iterations: usize,

    /// Starting temperature.
    pub initial_temperature: f64,

    /// The run stops once the temperature drops to or below this.
    pub final_temperature: f64,

    /// Cooling parameter: subtrahend for linear, factor for geometric.
    pub alpha: f64,

    /// Cooling schedule.
    pub cooling: CoolingKind,

    /// Acceptance test for moves that do not improve the value.
    pub acceptance: AcceptanceRule,

    /// How the starting candidate is produced.
    pub initial: InitialPolicy,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            initial_temperature: 100.0,
            final_temperature: 0.0,
            alpha: 0.98,
            cooling: CoolingKind::default(),
            acceptance: AcceptanceRule::default(),
            initial: InitialPolicy::default(),
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the initial temperature to [`default_temperature`] of `instance`.
    pub fn with_temperature_for(mut self, instance: &Instance) -> Self {
        self.initial_temperature = default_temperature(instance);
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingKind) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_acceptance(mut self, acceptance: AcceptanceRule) -> Self {
        self.acceptance = acceptance;
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

/// Starting temperature heuristic: a tenth of the instance's total value.
pub fn default_temperature(instance: &Instance) -> f64 {
    instance.total_value() as f64 / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert_eq!(config.final_temperature, 0.0);
        assert_eq!(config.cooling, CoolingKind::Geometric);
        assert_eq!(config.acceptance, AcceptanceRule::InitialTemperature);
    }

    #[test]
    fn test_cool_linear_and_geometric() {
        assert!((CoolingKind::Linear.cool(10.0, 0.5) - 9.5).abs() < 1e-12);
        assert!((CoolingKind::Geometric.cool(10.0, 0.5) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_cooling_kind() {
        assert_eq!("linear".parse::<CoolingKind>().unwrap(), CoolingKind::Linear);
        assert_eq!(
            " Geometric ".parse::<CoolingKind>().unwrap(),
            CoolingKind::Geometric
        );
        let err = "exponential".parse::<CoolingKind>().unwrap_err();
        assert!(matches!(err, KnapsackError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_cooling_kind_tags() {
        assert_eq!(CoolingKind::try_from(0).unwrap(), CoolingKind::Linear);
        assert_eq!(CoolingKind::try_from(1).unwrap(), CoolingKind::Geometric);
        assert!(CoolingKind::try_from(2).is_err());
    }

    #[test]
    fn test_temperature_for_instance() {
        let instance = Instance::new(vec![1, 1, 1], vec![10, 20, 30], 2).unwrap();
        let config = SaConfig::default().with_temperature_for(&instance);
        assert!((config.initial_temperature - 6.0).abs() < 1e-12);
    }
}
