//! Derangement generation for gift assignments.
//!
//! A derangement is a permutation with no fixed points: nobody may be
//! assigned to themselves. Generation uses rejection sampling ("shuffle and
//! verify"): draw uniformly random permutations via Fisher-Yates until one
//! has no fixed point. A random permutation of N >= 2 elements is a
//! derangement with probability ~1/e, so the expected attempt count is
//! under 3 regardless of N. Hitting the attempt ceiling therefore signals a
//! broken randomness source, not bad luck, and is surfaced as a hard error.

use std::collections::HashMap;
use std::hash::Hash;

use rand::seq::SliceRandom;

/// Maximum shuffle attempts before giving up.
///
/// At an acceptance rate of ~1/e per attempt, 1000 attempts fail with
/// probability on the order of 10^-175.
pub const MAX_SHUFFLE_ATTEMPTS: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum DerangementError {
    #[error("a derangement needs at least 2 elements, got {count}")]
    TooFewElements { count: usize },

    #[error("no fixed-point-free permutation found after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}

/// Generate a uniformly random derangement of `ids`.
///
/// Returns a map from each element to its assigned recipient. The result is
/// a bijection over the input set in which no element maps to itself.
///
/// Elements must be distinct; duplicates would make "fixed point" ambiguous
/// and the returned map could not be a bijection.
pub fn generate<T>(ids: &[T]) -> Result<HashMap<T, T>, DerangementError>
where
    T: Copy + Eq + Hash,
{
    generate_with_attempts(ids, MAX_SHUFFLE_ATTEMPTS)
}

/// [`generate`] with an explicit attempt ceiling.
pub fn generate_with_attempts<T>(
    ids: &[T],
    max_attempts: u32,
) -> Result<HashMap<T, T>, DerangementError>
where
    T: Copy + Eq + Hash,
{
    if ids.len() < 2 {
        return Err(DerangementError::TooFewElements { count: ids.len() });
    }

    let mut rng = rand::rng();
    let mut receivers: Vec<T> = ids.to_vec();

    for _ in 0..max_attempts {
        receivers.shuffle(&mut rng);

        let has_fixed_point = ids
            .iter()
            .zip(receivers.iter())
            .any(|(giver, receiver)| giver == receiver);

        if !has_fixed_point {
            return Ok(ids.iter().copied().zip(receivers.iter().copied()).collect());
        }
    }

    Err(DerangementError::AttemptsExhausted {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use assert_matches::assert_matches;

    use super::*;

    /// Assert the map is a self-free bijection over `ids`.
    fn assert_valid_derangement(ids: &[i64], mapping: &HashMap<i64, i64>) {
        assert_eq!(mapping.len(), ids.len(), "every element must be a key");

        let values: HashSet<i64> = mapping.values().copied().collect();
        let inputs: HashSet<i64> = ids.iter().copied().collect();
        assert_eq!(values, inputs, "image must equal the input set");

        for (giver, receiver) in mapping {
            assert_ne!(giver, receiver, "element {giver} maps to itself");
        }
    }

    #[test]
    fn valid_for_small_and_large_inputs() {
        for n in [2usize, 3, 5, 50, 1000] {
            let ids: Vec<i64> = (1..=n as i64).collect();
            let mapping = generate(&ids).expect("generation should succeed");
            assert_valid_derangement(&ids, &mapping);
        }
    }

    #[test]
    fn two_elements_always_swap() {
        // The only derangement of {A, B} is the swap.
        for _ in 0..100 {
            let mapping = generate(&[10i64, 20]).unwrap();
            assert_eq!(mapping[&10], 20);
            assert_eq!(mapping[&20], 10);
        }
    }

    #[test]
    fn three_elements_both_cycles_occur() {
        // For N = 3 exactly two derangements exist, the two 3-cycles.
        // Distinguish them by where the first element goes. Over 10k runs
        // each should land near 50%; 4200 is > 15 standard deviations off.
        let ids = [1i64, 2, 3];
        let mut first_goes_to_2 = 0u32;
        let mut first_goes_to_3 = 0u32;

        for _ in 0..10_000 {
            let mapping = generate(&ids).unwrap();
            assert_valid_derangement(&ids, &mapping);
            match mapping[&1] {
                2 => first_goes_to_2 += 1,
                3 => first_goes_to_3 += 1,
                other => panic!("impossible assignment 1 -> {other}"),
            }
        }

        assert!(
            first_goes_to_2 > 4200 && first_goes_to_3 > 4200,
            "distribution is grossly biased: 1->2 {first_goes_to_2} times, 1->3 {first_goes_to_3} times"
        );
    }

    #[test]
    fn rejects_fewer_than_two_elements() {
        assert_matches!(
            generate::<i64>(&[]),
            Err(DerangementError::TooFewElements { count: 0 })
        );
        assert_matches!(
            generate(&[42i64]),
            Err(DerangementError::TooFewElements { count: 1 })
        );
    }

    #[test]
    fn zero_attempts_exhausts() {
        assert_matches!(
            generate_with_attempts(&[1i64, 2], 0),
            Err(DerangementError::AttemptsExhausted { attempts: 0 })
        );
    }
}
