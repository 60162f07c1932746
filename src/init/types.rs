//! Core trait for initial-solution strategies.

use rand::Rng;

use crate::error::Result;
use crate::instance::{Candidate, Instance};

/// Produces the starting candidate of a local search.
///
/// Implementations must return a candidate of length
/// `instance.item_count()`. Whether it is feasible depends on the
/// strategy; see each implementor.
///
/// # Examples
///
/// ```
/// use u_knapsack::init::{BestOfN, InitialSolution};
/// use u_knapsack::instance::Instance;
///
/// let instance = Instance::new(vec![2, 3, 4], vec![3, 4, 5], 5).unwrap();
/// let mut rng = u_numflow::random::create_rng(42);
/// let start = BestOfN::default().initial_solution(&instance, &mut rng).unwrap();
/// assert_eq!(start.len(), 3);
/// ```
pub trait InitialSolution {
    /// Creates an initial candidate for `instance`.
    fn initial_solution<R: Rng>(&self, instance: &Instance, rng: &mut R) -> Result<Candidate>;
}
