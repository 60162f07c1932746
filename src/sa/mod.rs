//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Feasible neighbors that are not better may still be
//! accepted with probability `exp(-delta / T)`, letting the walk leave
//! local optima; the best candidate seen is kept separately from the
//! current one.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;

pub use config::{default_temperature, AcceptanceRule, CoolingKind, SaConfig};
pub use runner::{simulated_annealing, SaResult, SaRunner, SaStep};
