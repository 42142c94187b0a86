//! The two homework answers computed over a list of literals.

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::arena::SnailfishNumber;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::literal::Literal;
use crate::domain::reduce::Reducer;

/// Best ordered pair found by [`largest_pair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargestPair {
    /// Position of the left operand in the input
    pub lhs: usize,
    /// Position of the right operand in the input
    pub rhs: usize,
    pub magnitude: u64,
}

/// Adds all numbers left to right.
#[instrument(level = "debug", skip(literals, reducer), fields(count = literals.len()))]
pub fn final_sum(literals: &[Literal], reducer: &Reducer) -> DomainResult<SnailfishNumber> {
    let (first, rest) = literals
        .split_first()
        .ok_or(DomainError::NotEnoughNumbers {
            required: 1,
            found: 0,
        })?;

    rest.iter()
        .try_fold(SnailfishNumber::from_literal(first), |sum, literal| {
            reducer.add(sum, SnailfishNumber::from_literal(literal))
        })
}

/// Largest magnitude of `x + y` over every ordered pair of distinct positions.
///
/// Addition consumes its operands, so both are rebuilt from their literals
/// for every pair.
#[instrument(level = "debug", skip(literals, reducer), fields(count = literals.len()))]
pub fn largest_pair(literals: &[Literal], reducer: &Reducer) -> DomainResult<LargestPair> {
    if literals.len() < 2 {
        return Err(DomainError::NotEnoughNumbers {
            required: 2,
            found: literals.len(),
        });
    }

    let mut best: Option<LargestPair> = None;
    for (lhs, rhs) in (0..literals.len())
        .cartesian_product(0..literals.len())
        .filter(|(lhs, rhs)| lhs != rhs)
    {
        let sum = reducer.add(
            SnailfishNumber::from_literal(&literals[lhs]),
            SnailfishNumber::from_literal(&literals[rhs]),
        )?;
        let magnitude = sum.magnitude()?;
        if best.map_or(true, |b| magnitude > b.magnitude) {
            best = Some(LargestPair {
                lhs,
                rhs,
                magnitude,
            });
        }
    }

    let best = best.ok_or(DomainError::NotEnoughNumbers {
        required: 2,
        found: literals.len(),
    })?;
    debug!("largest pair: {:?}", best);
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literals(lines: &[&str]) -> Vec<Literal> {
        lines.iter().map(|l| l.parse().unwrap()).collect()
    }

    #[test]
    fn given_four_pairs_when_summing_then_no_reduction_needed() {
        let input = literals(&["[1,1]", "[2,2]", "[3,3]", "[4,4]"]);
        let sum = final_sum(&input, &Reducer::default()).unwrap();
        assert_eq!(sum.to_string(), "[[[[1,1],[2,2]],[3,3]],[4,4]]");
        assert_eq!(sum.magnitude().unwrap(), 445);
    }

    #[test]
    fn given_five_pairs_when_summing_then_one_explode_chain() {
        let input = literals(&["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]"]);
        let sum = final_sum(&input, &Reducer::default()).unwrap();
        assert_eq!(sum.to_string(), "[[[[3,0],[5,3]],[4,4]],[5,5]]");
        assert_eq!(sum.magnitude().unwrap(), 791);
    }

    #[test]
    fn given_six_pairs_when_summing_then_matches_known_sum() {
        let input = literals(&["[1,1]", "[2,2]", "[3,3]", "[4,4]", "[5,5]", "[6,6]"]);
        let sum = final_sum(&input, &Reducer::default()).unwrap();
        assert_eq!(sum.to_string(), "[[[[5,0],[7,4]],[5,5]],[6,6]]");
        assert_eq!(sum.magnitude().unwrap(), 1137);
    }

    #[test]
    fn given_single_number_when_summing_then_returns_it_unreduced() {
        let sum = final_sum(&literals(&["[12,1]"]), &Reducer::default()).unwrap();
        assert_eq!(sum.to_string(), "[12,1]");
    }

    #[test]
    fn given_no_numbers_when_summing_then_fails() {
        let err = final_sum(&[], &Reducer::default()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotEnoughNumbers {
                required: 1,
                found: 0
            }
        ));
    }

    #[test]
    fn given_one_number_when_searching_pairs_then_fails() {
        let err = largest_pair(&literals(&["[1,2]"]), &Reducer::default()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotEnoughNumbers {
                required: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn given_two_numbers_when_searching_pairs_then_tries_both_orders() {
        // [[1,2],[3,4]] = 55, [[3,4],[1,2]] = 65
        let best = largest_pair(&literals(&["[1,2]", "[3,4]"]), &Reducer::default()).unwrap();
        assert_eq!(
            best,
            LargestPair {
                lhs: 1,
                rhs: 0,
                magnitude: 65
            }
        );
    }
}
