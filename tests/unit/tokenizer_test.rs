//! Tokenizer behaviour over the expression vocabulary

use patscan::scanner::{Location, ScanError, Span, Token, TokenValue, Tokenizer};

use crate::common::{Expr, expression_table, scan_all, summary};

#[test]
fn test_repeated_look_ahead_is_identical() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "  /* note */ total + 1");

    let first = tokenizer.look_ahead(&[Expr::Identifier]).unwrap();
    let skipped_after_first = tokenizer.skipped_tokens().to_vec();
    let second = tokenizer.look_ahead(&[Expr::Identifier]).unwrap();
    let third = tokenizer.look_ahead(&[Expr::Identifier]).unwrap();

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(tokenizer.skipped_tokens(), skipped_after_first.as_slice());
    assert_eq!(tokenizer.offset(), Ok(0));
}

#[test]
fn test_longest_match_beats_keyword() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "ifx");
    let token = tokenizer.scan(&[]).unwrap();
    assert_eq!(summary(&token), (Expr::Identifier, "ifx", 0, 3));
}

#[test]
fn test_keyword_wins_equal_length_tie() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "if then");
    let tokens = scan_all(&mut tokenizer);
    let kinds: Vec<Expr> = tokens.iter().map(Token::kind).collect();
    assert_eq!(kinds, vec![Expr::If, Expr::Then, Expr::Eof]);
}

#[test]
fn test_skip_transparency() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, " x");

    let token = tokenizer.scan(&[]).unwrap();
    assert_eq!(summary(&token), (Expr::Identifier, "x", 1, 2));

    let skipped = tokenizer.skipped_tokens();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].kind(), Expr::Whitespace);
    assert_eq!(skipped[0].span(), Span::new(0, 1));
    assert_eq!(skipped[0].text(), " ");
}

#[test]
fn test_skip_log_keeps_comments_in_order() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "/* a */ 1 /* b\n c */ 2");
    scan_all(&mut tokenizer);
    let comments: Vec<&str> = tokenizer
        .skipped_tokens()
        .iter()
        .filter(|t| t.kind() == Expr::Comment)
        .map(Token::text)
        .collect();
    assert_eq!(comments, vec!["/* a */", "/* b\n c */"]);
}

#[test]
fn test_end_of_input_is_stable() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "7 ");
    assert_eq!(tokenizer.scan(&[]).unwrap().kind(), Expr::Integer);

    for _ in 0..5 {
        let end = tokenizer.scan(&[]).unwrap();
        assert_eq!(end.kind(), Expr::Eof);
        assert_eq!(end.span(), Span::empty(2));
        assert_eq!(end.text(), "");
    }
}

#[test]
fn test_end_of_input_on_empty_input() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "");
    let end = tokenizer.scan(&[Expr::Eof]).unwrap();
    assert_eq!(summary(&end), (Expr::Eof, "", 0, 0));
}

#[test]
fn test_position_correctness() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "12 + 34");
    let tokens: Vec<_> = scan_all(&mut tokenizer)
        .iter()
        .filter(|t| t.kind() != Expr::Eof)
        .map(summary)
        .collect();
    assert_eq!(
        tokens,
        vec![
            (Expr::Integer, "12", 0, 2),
            (Expr::PlusMinus, "+", 3, 4),
            (Expr::Integer, "34", 5, 7),
        ]
    );
}

#[test]
fn test_restricted_kinds_like_a_parser() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "12 + 34");
    let a = tokenizer.scan(&[Expr::Integer]).unwrap();
    let op = tokenizer.scan(&[Expr::PlusMinus, Expr::MultDiv]).unwrap();
    let b = tokenizer.scan(&[Expr::Integer]).unwrap();
    let end = tokenizer.scan(&[Expr::Eof]).unwrap();
    assert_eq!(summary(&a), (Expr::Integer, "12", 0, 2));
    assert_eq!(summary(&op), (Expr::PlusMinus, "+", 3, 4));
    assert_eq!(summary(&b), (Expr::Integer, "34", 5, 7));
    assert_eq!(end.kind(), Expr::Eof);
}

#[test]
fn test_unrecognized_character_recovery() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "12 @ 34");

    assert_eq!(tokenizer.scan(&[]).unwrap().kind(), Expr::Integer);

    let bad = tokenizer.scan(&[]).unwrap();
    assert!(bad.is_undetermined());
    assert_eq!(bad.len(), 1);
    assert_eq!(bad.start(), 3);
    assert_eq!(bad.text(), "@");

    let recovered = tokenizer.scan(&[]).unwrap();
    assert_eq!(summary(&recovered), (Expr::Integer, "34", 5, 7));
}

#[test]
fn test_wrong_candidates_yield_undetermined_then_retry() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "( x");
    tokenizer.scan(&[Expr::BrOpen]).unwrap();

    let miss = tokenizer.look_ahead(&[Expr::Integer, Expr::Number]).unwrap();
    assert!(miss.is_undetermined());
    assert_eq!(miss.start(), 2);

    let hit = tokenizer.scan(&[Expr::Identifier]).unwrap();
    assert_eq!(summary(&hit), (Expr::Identifier, "x", 2, 3));
    assert_eq!(tokenizer.skipped_tokens().len(), 1);
}

#[test]
fn test_line_and_column_after_commits() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "a +\n  /* c */\n    b");

    tokenizer.scan(&[]).unwrap();
    tokenizer.scan(&[]).unwrap();
    assert_eq!(tokenizer.location(), Ok(Location { offset: 3, line: 1, column: 4 }));

    tokenizer.look_ahead(&[]).unwrap();
    assert_eq!(tokenizer.location().unwrap().line, 1);

    let b = tokenizer.scan(&[]).unwrap();
    assert_eq!(b.text(), "b");
    let loc = tokenizer.location().unwrap();
    assert_eq!((loc.line, loc.column), (3, 6));
    assert_eq!(loc.offset, b.end());
}

#[test]
fn test_value_slot_is_left_to_caller() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::with_input(&table, "42");
    let mut token = tokenizer.scan(&[]).unwrap();
    assert!(token.value().is_none());

    let parsed: i64 = token.text().parse().unwrap();
    token.set_value(TokenValue::Integer(parsed));
    assert_eq!(token.value(), Some(&TokenValue::Integer(42)));
}

#[test]
fn test_one_table_many_tokenizers() {
    let table = expression_table();
    let inputs = ["1 + 2", "a * (b)", "x <= 3.5"];

    let counts: Vec<usize> = std::thread::scope(|s| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let table = &table;
                s.spawn(move || {
                    let mut tokenizer = Tokenizer::with_input(table, input);
                    scan_all(&mut tokenizer).len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![4, 6, 4]);
}

#[test]
fn test_init_switches_input() {
    let table = expression_table();
    let mut tokenizer = Tokenizer::new(&table);
    assert_eq!(tokenizer.scan(&[]), Err(ScanError::NotInitialized));

    tokenizer.init(" 1");
    scan_all(&mut tokenizer);
    assert_eq!(tokenizer.skipped_tokens().len(), 1);

    tokenizer.init("2");
    assert!(tokenizer.skipped_tokens().is_empty());
    assert_eq!(tokenizer.location(), Ok(Location::START));
    assert_eq!(tokenizer.scan(&[]).unwrap().text(), "2");
}
