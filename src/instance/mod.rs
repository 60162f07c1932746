//! Knapsack instances and candidate solutions.
//!
//! - [`Instance`]: immutable weights, values, and capacity
//! - [`Candidate`]: binary inclusion vector, one bit per item
//! - [`Evaluation`]: exact total value and weight of a candidate
//! - [`generator`]: seeded synthetic instance generation

pub mod generator;
mod types;

pub use types::{Candidate, Evaluation, Instance};
