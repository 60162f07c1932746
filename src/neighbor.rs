//! Single-bit-flip neighborhood.
//!
//! The only move operator in the crate: the neighborhood of a candidate is
//! every candidate at Hamming distance 1, i.e. the edges of the binary
//! hypercube over the items.

use rand::Rng;

use crate::instance::Candidate;

/// Returns a copy of `candidate` with one uniformly chosen bit flipped,
/// along with the flipped index.
///
/// The input is never mutated. Returns `None` for an empty candidate,
/// which has no neighbors. Exactly one index is drawn from `rng`.
pub fn flip_neighbor<R: Rng>(candidate: &Candidate, rng: &mut R) -> Option<(Candidate, usize)> {
    if candidate.is_empty() {
        return None;
    }
    let index = rng.random_range(0..candidate.len());
    let mut neighbor = candidate.clone();
    neighbor.flip(index);
    Some((neighbor, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use u_numflow::random::create_rng;

    #[test]
    fn test_empty_candidate_has_no_neighbor() {
        let mut rng = create_rng(42);
        assert!(flip_neighbor(&Candidate::zeros(0), &mut rng).is_none());
    }

    #[test]
    fn test_single_item_always_flips_it() {
        let mut rng = create_rng(42);
        let (n, i) = flip_neighbor(&Candidate::zeros(1), &mut rng).unwrap();
        assert_eq!(i, 0);
        assert_eq!(n.bits(), &[true]);
    }

    #[test]
    fn test_every_index_reachable() {
        let mut rng = create_rng(7);
        let base = Candidate::zeros(8);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            let (_, i) = flip_neighbor(&base, &mut rng).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s), "indices seen: {seen:?}");
    }

    proptest! {
        #[test]
        fn prop_neighbor_is_at_hamming_distance_one(
            bits in prop::collection::vec(any::<bool>(), 1..128),
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let original = Candidate::from(bits);
            let snapshot = original.clone();

            let (neighbor, index) = flip_neighbor(&original, &mut rng).unwrap();

            prop_assert_eq!(&original, &snapshot);
            prop_assert_eq!(neighbor.hamming_distance(&original), 1);
            prop_assert_ne!(neighbor.get(index), original.get(index));
        }
    }
}
