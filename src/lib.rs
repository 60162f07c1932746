//! Stochastic local search for the 0/1 knapsack problem.
//!
//! Provides two single-solution metaheuristics over the bit-flip
//! neighborhood, plus the pieces they are built from:
//!
//! - **Instances**: immutable weights, values, and capacity, with exact
//!   integer evaluation and a seeded generator for synthetic instances.
//! - **Initial solutions**: empty knapsack, first feasible random sample,
//!   or best feasible of N random samples.
//! - **Random Search (RS)**: accepts a random neighbor only when it fits
//!   and strictly improves the value.
//! - **Simulated Annealing (SA)**: temperature-gated acceptance with
//!   linear or geometric cooling, tracking the best candidate separately.
//! - **Experiments**: timed parameter sweeps producing tabular records.
//!
//! Every run draws from an explicit RNG, either passed in by the caller
//! or seeded from the run's configuration, so seeded runs are
//! reproducible and independent runs share no generator state.
//!
//! # Example
//!
//! ```
//! use u_knapsack::instance::Instance;
//! use u_knapsack::sa::{SaConfig, SaRunner};
//!
//! let instance = Instance::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
//! let config = SaConfig::default().with_iterations(500).with_seed(42);
//! let result = SaRunner::run(&instance, &config).unwrap();
//! assert!(result.weight <= instance.capacity());
//! ```

pub mod error;
pub mod experiment;
pub mod init;
pub mod instance;
pub mod neighbor;
pub mod rs;
pub mod sa;

pub use error::{KnapsackError, Result};
