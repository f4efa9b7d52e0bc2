/// Comparison operators usable inside a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal (`=` or `==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
}

impl CompareOp {
    /// Resolves an operator token's text. `None` for any other spelling
    /// the operator character class can produce, such as `>>` or `=!`.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "=" | "==" => Some(CompareOp::Equal),
            "!=" => Some(CompareOp::NotEqual),
            "<" => Some(CompareOp::LessThan),
            ">" => Some(CompareOp::GreaterThan),
            "<=" => Some(CompareOp::LessEqual),
            ">=" => Some(CompareOp::GreaterEqual),
            _ => None,
        }
    }

    /// True for the operators that apply to booleans and strings.
    pub fn is_equality(self) -> bool {
        matches!(self, CompareOp::Equal | CompareOp::NotEqual)
    }
}

/// Join operators between relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOp {
    /// Conjunction (`&` or `&&`); binds tighter than [JoinOp::Or].
    And,
    /// Disjunction (`|` or `||`).
    Or,
}

impl JoinOp {
    /// Resolves a join token's text. `None` for longer runs like `&&&`.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "&" | "&&" => Some(JoinOp::And),
            "|" | "||" => Some(JoinOp::Or),
            _ => None,
        }
    }
}
