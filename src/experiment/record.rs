//! Experiment records and their tabular form.

use std::io::Write;
use std::time::Duration;

use crate::error::Result;

/// Column names written by [`write_records`].
const HEADER: &str = "algorithm,items,iterations,elapsed_s,value,weight,seed";

/// Outcome of a single timed run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentRecord {
    /// Algorithm name, see [`Algorithm::name`](super::Algorithm::name).
    pub algorithm: String,
    /// Number of items in the instance.
    pub item_count: usize,
    /// Configured iteration budget.
    pub iterations: usize,
    /// Wall-clock time of the run, initialization included.
    pub elapsed: Duration,
    /// Value of the returned candidate.
    pub value: u64,
    /// Weight of the returned candidate.
    pub weight: u64,
    /// Seed of the run's RNG.
    pub seed: u64,
}

impl ExperimentRecord {
    /// CSV row matching the header written by [`write_records`].
    pub fn to_row(&self) -> String {
        format!(
            "{},{},{},{:.6},{},{},{}",
            self.algorithm,
            self.item_count,
            self.iterations,
            self.elapsed.as_secs_f64(),
            self.value,
            self.weight,
            self.seed
        )
    }
}

/// Writes `records` as CSV, header first.
pub fn write_records<W: Write>(records: &[ExperimentRecord], mut writer: W) -> Result<()> {
    writeln!(writer, "{HEADER}")?;
    for record in records {
        writeln!(writer, "{}", record.to_row())?;
    }
    writer.flush()?;
    Ok(())
}
