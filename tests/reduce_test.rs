//! Tests for the explode/split rewrite rules and addition

use rstest::rstest;

use snailfish::domain::{DomainError, Reducer, SnailfishNumber, Step, MAX_DEPTH, SPLIT_THRESHOLD};
use snailfish::util::testing;

fn number(s: &str) -> SnailfishNumber {
    s.parse().expect("valid literal")
}

// ============================================================
// Explode
// ============================================================

#[rstest]
#[case("[[[[[9,8],1],2],3],4]", "[[[[0,9],2],3],4]")]
#[case("[7,[6,[5,[4,[3,2]]]]]", "[7,[6,[5,[7,0]]]]")]
#[case("[[6,[5,[4,[3,2]]]],1]", "[[6,[5,[7,0]]],3]")]
#[case("[[3,[2,[1,[7,3]]]],[6,[5,[4,[3,2]]]]]", "[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]")]
#[case("[[3,[2,[8,0]]],[9,[5,[4,[3,2]]]]]", "[[3,[2,[8,0]]],[9,[5,[7,0]]]]")]
fn given_deep_pair_when_exploding_once_then_matches_expected(
    #[case] input: &str,
    #[case] expected: &str,
) {
    testing::init_test_setup();
    let mut n = number(input);

    assert!(n.explode().unwrap());

    assert_eq!(n.to_string(), expected);
}

#[test]
fn given_pair_below_four_pairs_with_pair_child_when_exploding_then_malformed_depth() {
    let mut n = number("[1,[2,[3,[4,[[5,6],7]]]]]");

    let err = n.explode().unwrap_err();

    assert!(
        matches!(err, DomainError::MalformedDepth { depth: 4, ref pair } if pair == "[[5,6],7]"),
        "unexpected error: {err}"
    );
}

// ============================================================
// Reduction loop
// ============================================================

#[test]
fn given_documented_addition_when_stepping_then_follows_documented_sequence() {
    let mut n = number("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
    let expected = [
        (Step::Explode, "[[[[0,7],4],[7,[[8,4],9]]],[1,1]]"),
        (Step::Explode, "[[[[0,7],4],[15,[0,13]]],[1,1]]"),
        (Step::Split, "[[[[0,7],4],[[7,8],[0,13]]],[1,1]]"),
        (Step::Split, "[[[[0,7],4],[[7,8],[0,[6,7]]]],[1,1]]"),
        (Step::Explode, "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]"),
    ];

    for (step, rendered) in expected {
        assert_eq!(n.step().unwrap(), Some(step));
        assert_eq!(n.to_string(), rendered);
    }
    assert_eq!(n.step().unwrap(), None);
    assert!(!n.needs_reduction());
}

#[test]
fn given_fresh_sum_when_reducing_then_counts_every_step() {
    let mut n = number("[[[[[4,3],4],4],[7,[[8,4],9]]],[1,1]]");
    assert_eq!(n.reduce().unwrap(), 5);
    assert_eq!(n.to_string(), "[[[[0,7],4],[[7,8],[6,0]]],[8,1]]");
}

#[rstest]
#[case("[[[0,[4,5]],[0,0]],[[[4,5],[2,6]],[9,5]]]", "[7,[[[3,7],[4,3]],[[6,3],[8,8]]]]", "[[[[4,0],[5,4]],[[7,7],[6,0]]],[[8,[7,7]],[[7,9],[5,0]]]]")]
#[case("[[[[4,0],[5,4]],[[7,7],[6,0]]],[[8,[7,7]],[[7,9],[5,0]]]]", "[[2,[[0,8],[3,4]]],[[[6,7],1],[7,[1,6]]]]", "[[[[6,7],[6,7]],[[7,7],[0,7]]],[[[8,7],[7,7]],[[8,8],[8,0]]]]")]
#[case("[[[[7,7],[7,8]],[[9,5],[8,7]]],[[[6,8],[0,8]],[[9,9],[9,0]]]]", "[[2,[2,2]],[8,[8,1]]]", "[[[[6,6],[6,6]],[[6,0],[6,7]]],[[[7,7],[8,9]],[8,[8,1]]]]")]
fn given_reduced_operands_when_adding_then_matches_documented_sum(
    #[case] lhs: &str,
    #[case] rhs: &str,
    #[case] expected: &str,
) {
    let sum = number(lhs).add(number(rhs)).unwrap();
    assert_eq!(sum.to_string(), expected);
    assert!(sum.height() <= MAX_DEPTH);
    assert!(sum.max_value() <= SPLIT_THRESHOLD);
}

#[test]
fn given_bounded_reducer_with_enough_steps_when_adding_then_succeeds() {
    let reducer = Reducer::new(Some(5));
    let sum = reducer
        .add(number("[[[[4,3],4],4],[7,[[8,4],9]]]"), number("[1,1]"))
        .unwrap();
    assert_eq!(sum.magnitude().unwrap(), 1384);
}

// ============================================================
// Magnitude
// ============================================================

#[rstest]
#[case("[[1,2],[[3,4],5]]", 143)]
#[case("[[[[0,7],4],[[7,8],[6,0]]],[8,1]]", 1384)]
#[case("[[[[1,1],[2,2]],[3,3]],[4,4]]", 445)]
#[case("[[[[3,0],[5,3]],[4,4]],[5,5]]", 791)]
#[case("[[[[5,0],[7,4]],[5,5]],[6,6]]", 1137)]
#[case("[[[[8,7],[7,7]],[[8,6],[7,7]]],[[[0,7],[6,6]],[8,7]]]", 3488)]
fn given_literal_when_computing_magnitude_then_matches(#[case] input: &str, #[case] expected: u64) {
    assert_eq!(number(input).magnitude().unwrap(), expected);
}
