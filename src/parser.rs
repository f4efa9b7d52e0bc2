use crate::error::QueryError;
use crate::query::{Relation, RelationGroup, Token, TokenKind};

/// Assembles a token stream into relation and join groups.
pub struct Grouper {
    tokens: Vec<Token>,
    position: usize,
    last_position: usize,
}

impl Grouper {
    pub fn new(tokens: Vec<Token>) -> Self {
        Grouper {
            tokens,
            position: 0,
            last_position: 0,
        }
    }

    fn take(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        self.last_position = token.position;
        Some(token)
    }

    fn expect(
        &mut self,
        expected: &'static str,
        want: fn(TokenKind) -> bool,
    ) -> Result<Token, QueryError> {
        match self.take() {
            Some(token) if want(token.kind) => Ok(token),
            Some(token) => Err(QueryError::MalformedRelation {
                position: token.position,
                expected,
                found: Some(token.kind),
            }),
            None => Err(QueryError::MalformedRelation {
                position: self.last_position,
                expected,
                found: None,
            }),
        }
    }

    /// Next group, or `None` once the tokens are exhausted.
    ///
    /// A bareword opens a relation and must be followed by an operator and
    /// then a literal (bareword, string, or number). A join token forms a
    /// group on its own. Nothing else can start a group.
    pub fn next_group(&mut self) -> Result<Option<RelationGroup>, QueryError> {
        let Some(token) = self.take() else {
            return Ok(None);
        };

        match token.kind {
            TokenKind::Bareword => {
                let operator = self.expect("operator", |kind| kind == TokenKind::Operator)?;
                let literal = self.expect("bareword, string, or number", |kind| {
                    matches!(
                        kind,
                        TokenKind::Bareword | TokenKind::StringLiteral | TokenKind::Number
                    )
                })?;
                Ok(Some(RelationGroup::Relation(Relation {
                    column: token,
                    operator,
                    literal,
                })))
            }
            TokenKind::Join => Ok(Some(RelationGroup::Join(token))),
            _ => Err(QueryError::MalformedRelation {
                position: token.position,
                expected: "bareword or join",
                found: Some(token.kind),
            }),
        }
    }
}

/// Runs the grouper over a whole token sequence.
pub fn group(tokens: Vec<Token>) -> Result<Vec<RelationGroup>, QueryError> {
    let mut grouper = Grouper::new(tokens);
    let mut groups = Vec::new();
    while let Some(group) = grouper.next_group()? {
        groups.push(group);
    }
    Ok(groups)
}
