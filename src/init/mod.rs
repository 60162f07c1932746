//! Initial-solution strategies.
//!
//! Every local search in this crate starts from a candidate produced by an
//! [`InitialSolution`] implementor:
//!
//! - [`Zeros`]: the empty knapsack
//! - [`RandomFeasible`]: first feasible uniform sample
//! - [`BestOfN`]: most valuable feasible sample among N
//!
//! Run configurations hold an [`InitialPolicy`], a closed enum over the
//! three strategies.

mod policy;
mod types;

pub use policy::{BestOfN, InitialPolicy, RandomFeasible, Zeros, DEFAULT_BEST_OF_N};
pub use types::InitialSolution;
