//! Instance, candidate, and evaluation types.

use std::fmt;

use rand::Rng;

use crate::error::{KnapsackError, Result};

/// An immutable 0/1 knapsack problem.
///
/// Holds one weight and one value per item plus the knapsack capacity.
/// The item count is the length of both sequences, which is checked on
/// construction.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::{Candidate, Instance};
///
/// let instance = Instance::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
/// let eval = instance.evaluate(&Candidate::from(vec![true, true, false])).unwrap();
/// assert_eq!((eval.value, eval.weight), (7, 5));
/// assert!(instance.is_feasible(&eval));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instance {
    weights: Vec<u64>,
    values: Vec<u64>,
    capacity: u64,
}

impl Instance {
    /// Creates an instance from per-item weights and values.
    ///
    /// Fails with [`KnapsackError::DimensionMismatch`] if the sequences
    /// differ in length, and with [`KnapsackError::SumOverflow`] if either
    /// sums past `u64::MAX`. Every candidate's evaluation is bounded by
    /// these totals, so evaluation itself never overflows.
    pub fn new(weights: Vec<u64>, values: Vec<u64>, capacity: u64) -> Result<Self> {
        if weights.len() != values.len() {
            return Err(KnapsackError::DimensionMismatch {
                expected: weights.len(),
                actual: values.len(),
            });
        }
        if checked_total(&weights).is_none() {
            return Err(KnapsackError::SumOverflow { field: "weight" });
        }
        if checked_total(&values).is_none() {
            return Err(KnapsackError::SumOverflow { field: "value" });
        }
        Ok(Self {
            weights,
            values,
            capacity,
        })
    }

    pub fn weights(&self) -> &[u64] {
        &self.weights
    }

    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.weights.len()
    }

    /// Sum of all item values. Upper bound on any candidate's value.
    pub fn total_value(&self) -> u64 {
        self.values.iter().sum()
    }

    /// Computes the total value and weight of `candidate`.
    ///
    /// Uses integer sums, so the result is exact.
    pub fn evaluate(&self, candidate: &Candidate) -> Result<Evaluation> {
        if candidate.len() != self.item_count() {
            return Err(KnapsackError::DimensionMismatch {
                expected: self.item_count(),
                actual: candidate.len(),
            });
        }

        let mut eval = Evaluation::default();
        for i in candidate.selected() {
            eval.value += self.values[i];
            eval.weight += self.weights[i];
        }
        Ok(eval)
    }

    /// Whether an evaluated candidate fits in the knapsack.
    pub fn is_feasible(&self, eval: &Evaluation) -> bool {
        eval.weight <= self.capacity
    }
}

fn checked_total(xs: &[u64]) -> Option<u64> {
    xs.iter().try_fold(0u64, |acc, &x| acc.checked_add(x))
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "weights: {:?}, values: {:?}, capacity: {}, items: {}",
            self.weights,
            self.values,
            self.capacity,
            self.item_count()
        )
    }
}

/// Total value and weight of a candidate.
///
/// Never cached on the candidate; recompute with [`Instance::evaluate`]
/// whenever the candidate changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    pub value: u64,
    pub weight: u64,
}

/// Binary inclusion vector over the items of an instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    bits: Vec<bool>,
}

impl Candidate {
    /// The empty knapsack over `n` items.
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Samples each bit independently with probability 1/2.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self {
            bits: (0..n).map(|_| rng.random::<bool>()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Returns bit `i`, or `None` if out of range.
    pub fn get(&self, i: usize) -> Option<bool> {
        self.bits.get(i).copied()
    }

    /// Flips bit `i` in place.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    pub fn flip(&mut self, i: usize) {
        self.bits[i] = !self.bits[i];
    }

    /// Indices of the included items, in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    /// Number of included items.
    pub fn count_selected(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Number of positions where `self` and `other` differ.
    ///
    /// Positions beyond the shorter candidate count as differences.
    pub fn hamming_distance(&self, other: &Candidate) -> usize {
        let common = self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count();
        common + self.len().abs_diff(other.len())
    }
}

impl From<Vec<bool>> for Candidate {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}
