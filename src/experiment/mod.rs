//! Batch experiments.
//!
//! A [`Sweep`] runs every configured algorithm over a grid of problem
//! sizes and iteration budgets on generated instances, timing each run
//! and producing one [`ExperimentRecord`] per run. Records can be written
//! as CSV with [`write_records`].
//!
//! Every run owns an RNG seeded from the sweep's base seed and the run's
//! position in the grid, so results do not depend on execution order. With
//! the `parallel` feature runs are distributed over rayon's thread pool.

mod record;
mod sweep;

pub use record::{write_records, ExperimentRecord};
pub use sweep::{Algorithm, Sweep};
