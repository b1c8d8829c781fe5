use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use tracing::trace;

use crate::lexer::Token;
use crate::op;
use crate::rpn::Postfix;
use crate::stack::{self, Stack};

#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("empty result")]
    #[diagnostic(help("the expression produced no value"))]
    EmptyResult,
    #[error("stack underflow: an operator is missing an operand")]
    StackUnderflow,
    #[error("unknown identifier: {0}")]
    UnknownIdentifier(String),
    #[error("incorrect input token: {0}")]
    IncorrectToken(Token),
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0} operands left without an operator")]
    LeftoverOperands(usize),
}

impl From<stack::Error> for Error {
    fn from(err: stack::Error) -> Self {
        match err {
            stack::Error::Underflow => Error::StackUnderflow,
        }
    }
}

impl From<op::Error> for Error {
    fn from(err: op::Error) -> Self {
        match err {
            op::Error::DivisionByZero => Error::DivisionByZero,
        }
    }
}

/// Read-only source of variable values, looked up by exact name.
pub trait Variables {
    fn get(&self, name: &str) -> Option<i64>;
}

impl<K, S> Variables for HashMap<K, i64, S>
where
    K: Borrow<str> + Hash + Eq,
    S: BuildHasher,
{
    fn get(&self, name: &str) -> Option<i64> {
        HashMap::get(self, name).copied()
    }
}

impl<K> Variables for BTreeMap<K, i64>
where
    K: Borrow<str> + Ord,
{
    fn get(&self, name: &str) -> Option<i64> {
        BTreeMap::get(self, name).copied()
    }
}

impl<V: Variables + ?Sized> Variables for &V {
    fn get(&self, name: &str) -> Option<i64> {
        (**self).get(name)
    }
}

/// Walks `postfix` once and returns the operand stack it leaves behind.
pub fn eval<V>(postfix: &Postfix, variables: &V) -> Result<Stack, Error>
where
    V: Variables + ?Sized,
{
    let mut stack = Stack::new();
    for token in postfix {
        trace!(%token, depth = stack.len(), "eval");
        match token {
            Token::Integer(n) => stack.push(*n),
            Token::Ident(name) => {
                let value = variables
                    .get(name)
                    .ok_or_else(|| Error::UnknownIdentifier(name.clone()))?;
                stack.push(value);
            }
            Token::Op(op) => {
                let y = stack.pop()?;
                let x = stack.pop()?;
                stack.push(op.apply(x, y)?);
            }
            Token::ParenL | Token::ParenR | Token::Eof => {
                return Err(Error::IncorrectToken(token.clone()));
            }
        }
    }
    Ok(stack)
}
