//! Property-based tests for the tokenizer
//!
//! Uses proptest to verify properties that should hold for all inputs.

use patscan::scanner::{Token, Tokenizer};
use proptest::prelude::*;

use crate::common::{Expr, expression_table, scan_all};

const INPUT: &str = "[a-z0-9+*/()<=. \n@]{0,40}";

proptest! {
    /// Looking ahead twice without scanning returns the same token
    #[test]
    fn look_ahead_is_idempotent(input in INPUT) {
        let table = expression_table();
        let mut tokenizer = Tokenizer::with_input(&table, &input);
        let first = tokenizer.look_ahead(&[]).unwrap();
        let skipped = tokenizer.skipped_tokens().len();
        let second = tokenizer.look_ahead(&[]).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(tokenizer.skipped_tokens().len(), skipped);
        prop_assert_eq!(tokenizer.offset().unwrap(), 0);
    }

    /// Returned tokens and skipped spans cover the input without gaps
    #[test]
    fn tokens_and_skips_tile_input(input in INPUT) {
        let table = expression_table();
        let mut tokenizer = Tokenizer::with_input(&table, &input);
        let tokens = scan_all(&mut tokenizer);

        let mut all: Vec<Token<'_, Expr>> = tokens.clone();
        all.extend(tokenizer.skipped_tokens().iter().cloned());
        all.sort_by_key(|t| (t.start(), t.end()));

        let mut offset = 0;
        for token in &all {
            prop_assert_eq!(token.start(), offset);
            prop_assert_eq!(token.text(), &input[token.start()..token.end()]);
            offset = token.end();
        }
        prop_assert_eq!(offset, input.len());
        prop_assert_eq!(tokens.last().map(Token::kind), Some(Expr::Eof));
    }

    /// Skip kinds never reach the caller
    #[test]
    fn skip_kinds_are_never_returned(input in INPUT) {
        let table = expression_table();
        let mut tokenizer = Tokenizer::with_input(&table, &input);
        for token in scan_all(&mut tokenizer) {
            prop_assert!(token.kind() != Expr::Whitespace && token.kind() != Expr::Comment);
        }
    }

    /// A keyword prefix never splits a longer identifier
    #[test]
    fn keyword_prefix_stays_identifier(suffix in "[a-z0-9_]{1,8}") {
        let input = format!("if{suffix}");
        let table = expression_table();
        let mut tokenizer = Tokenizer::with_input(&table, &input);
        let token = tokenizer.scan(&[]).unwrap();
        prop_assert_eq!(token.kind(), Expr::Identifier);
        prop_assert_eq!(token.text(), input.as_str());
    }

    /// The committed location agrees with a fresh count over the consumed text
    #[test]
    fn location_matches_consumed_text(input in INPUT) {
        let table = expression_table();
        let mut tokenizer = Tokenizer::with_input(&table, &input);
        loop {
            let token = tokenizer.scan(&[]).unwrap();
            let loc = tokenizer.location().unwrap();
            let consumed = &input[..loc.offset];
            let line = 1 + consumed.matches('\n').count();
            prop_assert_eq!(loc.line as usize, line);
            if token.is_empty() {
                break;
            }
        }
    }
}
