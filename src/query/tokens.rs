use std::fmt;

/// A classified fragment of query source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw text. String literals store their content with the surrounding
    /// quotes already removed.
    pub text: String,
    /// Character class the token was scanned under.
    pub kind: TokenKind,
    /// Offset of the token's first character in the query.
    pub position: usize,
}

/// Character classes recognized by the lexer.
///
/// Each token is a maximal run of characters from one class. Digits belong
/// to both the number and bareword classes; the number class wins at the
/// start of a token, but digits continue a bareword once one has begun, so
/// `123abc` is a number then a bareword while `abc123` is a single bareword.
/// `-` is a bareword character only, which makes `-1` a bareword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A run of `>`, `<`, `=`, `!`
    ///
    /// # Examples
    /// ```text
    /// ==
    /// >=
    /// ```
    Operator,

    /// A run of ASCII letters, digits, `_`, `-`
    ///
    /// Names columns on the left of a relation; on the right it is an
    /// unquoted literal.
    ///
    /// # Examples
    /// ```text
    /// age
    /// first_name
    /// -1
    /// ```
    Bareword,

    /// A run of `&`, `|`
    ///
    /// # Examples
    /// ```text
    /// &&
    /// |
    /// ```
    Join,

    /// Single-quoted literal
    ///
    /// Consumes verbatim characters until the closing quote; there are no
    /// escape sequences.
    ///
    /// # Examples
    /// ```text
    /// 'bob'
    /// 'two words'
    /// ```
    StringLiteral,

    /// A run of ASCII digits and `.`
    ///
    /// The lexer does not check numeric syntax; `1.2.3` is a single number
    /// token and fails later, at evaluation, where it parses as neither
    /// integer nor double.
    ///
    /// # Examples
    /// ```text
    /// 10
    /// 9.75
    /// ```
    Number,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Operator => "operator",
            TokenKind::Bareword => "bareword",
            TokenKind::Join => "join",
            TokenKind::StringLiteral => "string",
            TokenKind::Number => "number",
        };
        write!(f, "{}", name)
    }
}
