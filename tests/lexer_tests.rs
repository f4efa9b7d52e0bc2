// tests/lexer_tests.rs

use petrel::{tokenize, QueryError, Token, TokenKind};

fn texts(query: &str) -> Vec<(String, TokenKind)> {
    tokenize(query)
        .unwrap()
        .into_iter()
        .map(|t| (t.text, t.kind))
        .collect()
}

fn t(text: &str, kind: TokenKind) -> (String, TokenKind) {
    (text.to_string(), kind)
}

#[test]
fn test_simple_relation() {
    let tokens = tokenize("age > 10").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].text, "age");
    assert_eq!(tokens[0].kind, TokenKind::Bareword);
    assert_eq!(tokens[0].position, 0);
    assert_eq!(tokens[1].text, ">");
    assert_eq!(tokens[1].kind, TokenKind::Operator);
    assert_eq!(tokens[1].position, 4);
    assert_eq!(tokens[2].text, "10");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].position, 6);
}

#[test]
fn test_whitespace_only_separates() {
    assert_eq!(
        texts("  age\t>\n10  "),
        vec![
            t("age", TokenKind::Bareword),
            t(">", TokenKind::Operator),
            t("10", TokenKind::Number),
        ]
    );

    // No whitespace needed where the class changes.
    assert_eq!(
        texts("age>10&&name=='bob'"),
        vec![
            t("age", TokenKind::Bareword),
            t(">", TokenKind::Operator),
            t("10", TokenKind::Number),
            t("&&", TokenKind::Join),
            t("name", TokenKind::Bareword),
            t("==", TokenKind::Operator),
            t("bob", TokenKind::StringLiteral),
        ]
    );
}

#[test]
fn test_operator_maximal_munch() {
    assert_eq!(texts(">="), vec![t(">=", TokenKind::Operator)]);
    assert_eq!(texts("!="), vec![t("!=", TokenKind::Operator)]);
    // The whole run is one token even when no operator spells that way;
    // rejecting it is the validator's job, not the lexer's.
    assert_eq!(texts(">=<"), vec![t(">=<", TokenKind::Operator)]);
    assert_eq!(texts("=!"), vec![t("=!", TokenKind::Operator)]);
}

#[test]
fn test_join_maximal_munch() {
    assert_eq!(texts("&&"), vec![t("&&", TokenKind::Join)]);
    assert_eq!(texts("|"), vec![t("|", TokenKind::Join)]);
    assert_eq!(texts("&&||"), vec![t("&&||", TokenKind::Join)]);
    // Spaced joins stay separate tokens.
    assert_eq!(
        texts("&& ||"),
        vec![t("&&", TokenKind::Join), t("||", TokenKind::Join)]
    );
}

#[test]
fn test_number_class_is_digits_and_dots() {
    assert_eq!(texts("9.75"), vec![t("9.75", TokenKind::Number)]);
    // The lexer does not judge numeric syntax; this fails much later, at
    // evaluation, where it parses as neither integer nor double.
    assert_eq!(texts("1.2.3"), vec![t("1.2.3", TokenKind::Number)]);
    assert_eq!(texts(".5"), vec![t(".5", TokenKind::Number)]);
}

#[test]
fn test_hyphen_belongs_to_barewords() {
    // `-` is a bareword character, so a negative number does not exist at
    // the token level.
    assert_eq!(texts("-1"), vec![t("-1", TokenKind::Bareword)]);
    assert_eq!(
        texts("first-name"),
        vec![t("first-name", TokenKind::Bareword)]
    );
}

#[test]
fn test_leading_digit_opens_a_number() {
    // Digits belong to both classes; number wins at the start of a token,
    // but digits continue a bareword once one has begun.
    assert_eq!(
        texts("2acl"),
        vec![t("2", TokenKind::Number), t("acl", TokenKind::Bareword)]
    );
    assert_eq!(texts("acl2"), vec![t("acl2", TokenKind::Bareword)]);
}

#[test]
fn test_string_literal_quotes_stripped() {
    assert_eq!(
        texts("'two words'"),
        vec![t("two words", TokenKind::StringLiteral)]
    );
    assert_eq!(texts("''"), vec![t("", TokenKind::StringLiteral)]);
    // Anything short of the closing quote is literal content.
    assert_eq!(
        texts("'a && b > 1'"),
        vec![t("a && b > 1", TokenKind::StringLiteral)]
    );
}

#[test]
fn test_positions_are_char_offsets() {
    // Multi-byte characters inside a literal must not skew positions.
    let tokens = tokenize("name == 'héllo' && age > 1").unwrap();
    assert_eq!(tokens[2].text, "héllo");
    assert_eq!(tokens[2].position, 8);
    assert_eq!(tokens[3].text, "&&");
    assert_eq!(tokens[3].position, 16);
}

#[test]
fn test_retokenize_round_trip() {
    fn render(tokens: &[Token]) -> String {
        let parts: Vec<String> = tokens
            .iter()
            .map(|token| match token.kind {
                TokenKind::StringLiteral => format!("'{}'", token.text),
                _ => token.text.clone(),
            })
            .collect();
        parts.join(" ")
    }

    let queries = vec![
        "age > 10",
        "age>10&&name=='bob'",
        "score <= 9.75 | alive != T",
        "name == 'two words' && age >= -1",
    ];

    for query in queries {
        let first = tokenize(query).unwrap();
        let second = tokenize(&render(&first)).unwrap();
        let strip = |tokens: Vec<Token>| -> Vec<(String, TokenKind)> {
            tokens.into_iter().map(|t| (t.text, t.kind)).collect()
        };
        assert_eq!(strip(first), strip(second), "query: {}", query);
    }
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        tokenize("name == 'bob").unwrap_err(),
        QueryError::UnterminatedString { start: 8 }
    );
    // The error discards everything scanned before it.
    assert!(tokenize("'").is_err());
}

#[test]
fn test_unknown_characters() {
    assert_eq!(
        tokenize("age @ 10").unwrap_err(),
        QueryError::UnknownCharacter {
            ch: '@',
            position: 4
        }
    );
    // No grouping syntax: parentheses are not part of the language.
    assert_eq!(
        tokenize("(age > 10)").unwrap_err(),
        QueryError::UnknownCharacter {
            ch: '(',
            position: 0
        }
    );
}

#[test]
fn test_empty_query_yields_no_tokens() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("   \t\n").unwrap().is_empty());
}
