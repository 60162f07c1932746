//! Random Search (RS).
//!
//! Single-solution hill climbing over the bit-flip neighborhood: a random
//! neighbor replaces the current candidate only when it fits in the
//! knapsack and is strictly more valuable. The baseline against which
//! Simulated Annealing is compared.

mod config;
mod runner;

pub use config::RsConfig;
pub use runner::{random_search, RsResult, RsRunner};
