use std::fmt;

use tracing::debug;

use crate::Mode;
use crate::lexer::Token;
use crate::op::Op;

#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("')' without a matching '('")]
    UnmatchedParenR,
    #[error("'(' is never closed")]
    #[diagnostic(help("add the missing ')'"))]
    UnmatchedParenL,
}

/// A token sequence in postfix order: every operator follows its operands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Postfix(Vec<Token>);

impl Postfix {
    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Token>> for Postfix {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Entries of the operator stack. An open paren is a barrier that
/// operators are never popped past.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Op(Op),
    ParenL,
}

/// Reorders an infix token stream into postfix form (shunting-yard).
///
/// Consumption stops at the first [`Token::Eof`] or when the stream runs
/// out, whichever comes first; the operator stack is then drained. In
/// [`Mode::Lenient`] an unclosed `(` is drained into the output as-is and
/// left for the evaluator to reject.
pub fn to_postfix<I>(tokens: I, mode: Mode) -> Result<Postfix, Error>
where
    I: IntoIterator<Item = Token>,
{
    let mut output = Vec::new();
    let mut pending: Vec<Pending> = Vec::new();

    for token in tokens {
        match token {
            Token::Integer(_) | Token::Ident(_) => output.push(token),
            Token::ParenL => pending.push(Pending::ParenL),
            Token::ParenR => loop {
                match pending.pop() {
                    Some(Pending::Op(op)) => output.push(Token::Op(op)),
                    Some(Pending::ParenL) => break,
                    None => return Err(Error::UnmatchedParenR),
                }
            },
            Token::Op(op) => {
                while let Some(&Pending::Op(top)) = pending.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    pending.pop();
                    output.push(Token::Op(top));
                }
                pending.push(Pending::Op(op));
            }
            Token::Eof => break,
        }
    }

    while let Some(entry) = pending.pop() {
        match entry {
            Pending::Op(op) => output.push(Token::Op(op)),
            Pending::ParenL if mode == Mode::Strict => return Err(Error::UnmatchedParenL),
            Pending::ParenL => output.push(Token::ParenL),
        }
    }

    let postfix = Postfix(output);
    debug!(%postfix, "converted to postfix");
    Ok(postfix)
}
