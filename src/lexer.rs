use crate::error::QueryError;
use crate::query::{Token, TokenKind};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

fn is_operator_char(ch: char) -> bool {
    matches!(ch, '>' | '<' | '=' | '!')
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn is_bareword_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

fn is_join_char(ch: char) -> bool {
    matches!(ch, '&' | '|')
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Consumes the current character and every following character of the
    /// same class into one token.
    fn read_run(&mut self, kind: TokenKind, in_class: fn(char) -> bool) -> Token {
        let start = self.position;
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            if in_class(ch) {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        Token {
            text,
            kind,
            position: start,
        }
    }

    fn read_string(&mut self) -> Result<Token, QueryError> {
        let start = self.position;
        self.advance(); // consume opening quote

        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '\'' {
                return Ok(Token {
                    text,
                    kind: TokenKind::StringLiteral,
                    position: start,
                });
            }
            text.push(ch);
        }

        Err(QueryError::UnterminatedString { start })
    }

    /// Next token, or `None` once the input is exhausted.
    ///
    /// Class order matters at the start of a token: number wins over
    /// bareword, so a leading digit opens a number even though digits also
    /// continue barewords.
    pub fn next_token(&mut self) -> Result<Option<Token>, QueryError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(None),
            Some(ch) if is_operator_char(ch) => {
                Ok(Some(self.read_run(TokenKind::Operator, is_operator_char)))
            }
            Some(ch) if is_number_char(ch) => {
                Ok(Some(self.read_run(TokenKind::Number, is_number_char)))
            }
            Some(ch) if is_bareword_char(ch) => {
                Ok(Some(self.read_run(TokenKind::Bareword, is_bareword_char)))
            }
            Some(ch) if is_join_char(ch) => {
                Ok(Some(self.read_run(TokenKind::Join, is_join_char)))
            }
            Some('\'') => self.read_string().map(Some),
            Some(ch) => Err(QueryError::UnknownCharacter {
                ch,
                position: self.position,
            }),
        }
    }
}

/// Tokenizes a whole query. Errors discard all tokens scanned so far.
pub fn tokenize(query: &str) -> Result<Vec<Token>, QueryError> {
    let mut lexer = Lexer::new(query);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

#[test]
fn test_class_priority() {
    let tokens = tokenize("123abc").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(
        (tokens[0].text.as_str(), tokens[0].kind),
        ("123", TokenKind::Number)
    );
    assert_eq!(
        (tokens[1].text.as_str(), tokens[1].kind),
        ("abc", TokenKind::Bareword)
    );

    let tokens = tokenize("abc123").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Bareword);
}

#[test]
fn test_string_quotes_stripped() {
    let tokens = tokenize("name == 'bob'").unwrap();
    assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[2].text, "bob");
    assert_eq!(tokens[2].position, 8);
}
