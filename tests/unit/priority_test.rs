//! Tie-break and registration-order contract

use patscan::scanner::{FnMatcher, PatternError, PatternTable, RuleId, Tokenizer};

use crate::common::Expr;

fn two_letters(rest: &str) -> Option<usize> {
    let n = rest.bytes().take_while(u8::is_ascii_lowercase).count();
    (n >= 2).then_some(2)
}

#[test]
fn test_equal_length_goes_to_lower_ordinal() {
    let (first, second) = (RuleId::nth(0), RuleId::nth(1));
    let table = PatternTable::builder()
        .pattern(first, FnMatcher::new("two-letters", two_letters))
        .literal(second, "ab")
        .build()
        .unwrap();

    let mut tokenizer = Tokenizer::with_input(&table, "ab");
    assert_eq!(tokenizer.scan(&[]).unwrap().kind(), first);
}

#[test]
fn test_winner_follows_registration_not_matcher() {
    let (first, second) = (RuleId::nth(0), RuleId::nth(1));
    let table = PatternTable::builder()
        .literal(first, "ab")
        .pattern(second, FnMatcher::new("two-letters", two_letters))
        .build()
        .unwrap();

    let mut tokenizer = Tokenizer::with_input(&table, "ab");
    let token = tokenizer.scan(&[]).unwrap();
    assert_eq!(token.kind(), first);
    assert_eq!(table.priority(token.kind()), Some(0));
}

#[test]
fn test_longer_match_beats_priority() {
    let (first, second) = (RuleId::nth(0), RuleId::nth(1));
    let table = PatternTable::builder().literal(first, "ab").regex(second, "[a-z]+").build().unwrap();

    let mut tokenizer = Tokenizer::with_input(&table, "abc");
    assert_eq!(tokenizer.scan(&[]).unwrap().kind(), second);
}

#[test]
fn test_candidate_order_does_not_matter() {
    let (first, second) = (RuleId::nth(0), RuleId::nth(1));
    let table = PatternTable::builder().literal(first, "ab").regex(second, "[a-z]{2}").build().unwrap();

    let mut forward = Tokenizer::with_input(&table, "ab");
    let mut backward = Tokenizer::with_input(&table, "ab");
    assert_eq!(forward.scan(&[first, second]).unwrap(), backward.scan(&[second, first]).unwrap());
}

#[test]
fn test_registration_against_ordinal_order_is_rejected() {
    let err = PatternTable::builder()
        .regex(Expr::Identifier, "[a-z]+")
        .literal(Expr::If, "if")
        .build()
        .unwrap_err();
    match err {
        PatternError::OutOfOrder { kind, previous } => {
            assert_eq!(kind, "IF");
            assert_eq!(previous, "IDENTIFIER");
        },
        other => panic!("expected OutOfOrder, got {other:?}"),
    }
}

#[test]
fn test_gaps_in_ordinals_are_allowed() {
    let table = PatternTable::builder()
        .literal(Expr::PlusMinus, "+")
        .regex(Expr::Integer, "[0-9]+")
        .end_of_input(Expr::Eof)
        .build()
        .unwrap();
    assert_eq!(table.priority(Expr::Integer), Some(1));
    assert_eq!(table.kinds().collect::<Vec<_>>(), vec![Expr::PlusMinus, Expr::Integer, Expr::Eof]);
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let err = PatternTable::builder()
        .regex(Expr::Integer, "[0-9]+")
        .regex(Expr::Integer, "[0-9]")
        .build()
        .unwrap_err();
    assert!(matches!(err, PatternError::DuplicateKind { ref kind } if kind == "INTEGER"));
}
