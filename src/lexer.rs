use std::fmt;

use logos::Logos;

use crate::op::Op;

pub use _hide_warnings::*;
mod _hide_warnings {
    #![allow(unused_assignments)]

    use miette::{Diagnostic, SourceSpan};
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
    pub enum Error {
        #[error("unexpected character '{found}'")]
        UnexpectedChar {
            found: char,
            #[label("not a number, name, operator or parenthesis")]
            span: SourceSpan,
        },
        #[error("integer literal out of range")]
        InvalidInteger {
            #[label("does not fit in 64 bits")]
            span: SourceSpan,
        },
    }
}

/// Raw lexeme classes recognized by the scanner.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum TokenKind {
    #[regex("[0-9]+")]
    Integer,
    #[regex(r"[_\p{L}][_\p{L}\p{Nd}]*")]
    Ident,

    #[token("*")]
    Mul,
    #[token("/")]
    Div,
    #[token("%")]
    Rem,
    #[token("+")]
    Add,
    #[token("-")]
    Sub,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("&&")]
    And,
    #[token("||")]
    Or,

    #[token("(")]
    ParenL,
    #[token(")")]
    ParenR,
}

/// A classified token, as handed from the scanner to the transformer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Integer(i64),
    Ident(String),
    Op(Op),
    ParenL,
    ParenR,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Integer(n) => write!(f, "{n}"),
            Token::Ident(name) => f.write_str(name),
            Token::Op(op) => write!(f, "{op}"),
            Token::ParenL => f.write_str("("),
            Token::ParenR => f.write_str(")"),
            Token::Eof => f.write_str("<eof>"),
        }
    }
}

/// Turns the raw lexeme stream into classified tokens, ending with a
/// single [`Token::Eof`].
pub struct TokenIter<'a> {
    lexer: logos::Lexer<'a, TokenKind>,
    finished: bool,
}

impl<'a> From<logos::Lexer<'a, TokenKind>> for TokenIter<'a> {
    fn from(lexer: logos::Lexer<'a, TokenKind>) -> Self {
        Self {
            lexer,
            finished: false,
        }
    }
}

impl<'a> TokenIter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::from(TokenKind::lexer(source))
    }

    fn classify(&self, kind: TokenKind) -> Result<Token, Error> {
        let token = match kind {
            TokenKind::Integer => {
                let value = self.lexer.slice().parse::<i64>().map_err(|_| {
                    Error::InvalidInteger {
                        span: self.lexer.span().into(),
                    }
                })?;
                Token::Integer(value)
            }
            TokenKind::Ident => Token::Ident(self.lexer.slice().to_string()),
            TokenKind::Mul => Token::Op(Op::Mul),
            TokenKind::Div => Token::Op(Op::Div),
            TokenKind::Rem => Token::Op(Op::Rem),
            TokenKind::Add => Token::Op(Op::Add),
            TokenKind::Sub => Token::Op(Op::Sub),
            TokenKind::Lt => Token::Op(Op::Lt),
            TokenKind::Gt => Token::Op(Op::Gt),
            TokenKind::LtEq => Token::Op(Op::LtEq),
            TokenKind::GtEq => Token::Op(Op::GtEq),
            TokenKind::Eq => Token::Op(Op::Eq),
            TokenKind::NotEq => Token::Op(Op::NotEq),
            TokenKind::And => Token::Op(Op::And),
            TokenKind::Or => Token::Op(Op::Or),
            TokenKind::ParenL => Token::ParenL,
            TokenKind::ParenR => Token::ParenR,
        };
        Ok(token)
    }
}

impl Iterator for TokenIter<'_> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.lexer.next() {
            Some(Ok(kind)) => Some(self.classify(kind)),
            Some(Err(())) => {
                let found = self.lexer.slice().chars().next().unwrap_or_default();
                Some(Err(Error::UnexpectedChar {
                    found,
                    span: self.lexer.span().into(),
                }))
            }
            None => {
                self.finished = true;
                Some(Ok(Token::Eof))
            }
        }
    }
}

/// Scans the whole source, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    TokenIter::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn empty_source_is_just_eof() {
        assert_eq!(tokenize(""), Ok(vec![Token::Eof]));
        assert_eq!(tokenize(" \t\n "), Ok(vec![Token::Eof]));
    }

    #[test]
    fn numbers_names_and_parens() {
        assert_eq!(
            tokenize("(x_1 + 42)"),
            Ok(vec![
                Token::ParenL,
                Token::Ident("x_1".to_string()),
                Token::Op(Op::Add),
                Token::Integer(42),
                Token::ParenR,
                Token::Eof,
            ])
        );
    }

    #[test]
    fn two_char_operators_win_over_prefixes() {
        assert_eq!(
            tokenize("1<=2>=3==4!=5&&6||7<8>9"),
            Ok(vec![
                Token::Integer(1),
                Token::Op(Op::LtEq),
                Token::Integer(2),
                Token::Op(Op::GtEq),
                Token::Integer(3),
                Token::Op(Op::Eq),
                Token::Integer(4),
                Token::Op(Op::NotEq),
                Token::Integer(5),
                Token::Op(Op::And),
                Token::Integer(6),
                Token::Op(Op::Or),
                Token::Integer(7),
                Token::Op(Op::Lt),
                Token::Integer(8),
                Token::Op(Op::Gt),
                Token::Integer(9),
                Token::Eof,
            ])
        );
    }

    #[test]
    fn digits_then_letters_split() {
        assert_eq!(
            tokenize("2abc"),
            Ok(vec![
                Token::Integer(2),
                Token::Ident("abc".to_string()),
                Token::Eof
            ])
        );
    }

    #[test]
    fn unicode_identifiers() {
        assert_eq!(
            tokenize("größe"),
            Ok(vec![Token::Ident("größe".to_string()), Token::Eof])
        );
    }

    #[test]
    fn unexpected_char() {
        assert_eq!(
            tokenize("1 + $"),
            Err(Error::UnexpectedChar {
                found: '$',
                span: (4..5).into(),
            })
        );
        assert!(matches!(
            tokenize("a = 1"),
            Err(Error::UnexpectedChar { found: '=', .. })
        ));
        assert!(matches!(
            tokenize("a & b"),
            Err(Error::UnexpectedChar { found: '&', .. })
        ));
    }

    #[test]
    fn integer_out_of_range() {
        assert_eq!(
            tokenize("99999999999999999999"),
            Err(Error::InvalidInteger {
                span: (0..20).into()
            })
        );
        assert_eq!(
            tokenize("9223372036854775807"),
            Ok(vec![Token::Integer(i64::MAX), Token::Eof])
        );
    }

    #[test]
    fn iterator_ends_after_eof() {
        let mut iter = TokenIter::new("7");
        assert_eq!(iter.next(), Some(Ok(Token::Integer(7))));
        assert_eq!(iter.next(), Some(Ok(Token::Eof)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn display() {
        let shown: Vec<String> = tokenize("(a % 3)")
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(shown, ["(", "a", "%", "3", ")", "<eof>"]);
    }
}
