//! Integer expression evaluator.
//!
//! An expression is scanned into tokens, reordered into postfix form with
//! the shunting-yard algorithm and then reduced on an operand stack, with
//! identifiers resolved against a caller-supplied set of [`Variables`].
//!
//! ```
//! use std::collections::HashMap;
//!
//! let vars: HashMap<String, i64> = HashMap::from([("x".into(), 1), ("y".into(), 2)]);
//! assert_eq!(shunt::evaluate("x + y * 2", &vars), Ok(5));
//! ```

use tracing::debug;

pub mod eval;
pub mod lexer;
pub mod op;
pub mod rpn;
pub mod stack;

pub use eval::Variables;
pub use lexer::Token;
pub use op::Op;
pub use rpn::Postfix;

/// How much malformed input is tolerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Unclosed `(` are passed on to the evaluator, and operands left over
    /// beneath the result are ignored.
    #[default]
    Lenient,
    /// Unclosed `(` and leftover operands are errors.
    Strict,
}

#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexer(#[from] lexer::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Rpn(#[from] rpn::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] eval::Error),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    mode: Mode,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.mode = if strict { Mode::Strict } else { Mode::Lenient };
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Scans and reorders `expression` without evaluating it.
    pub fn postfix(&self, expression: &str) -> Result<Postfix, Error> {
        let tokens = lexer::tokenize(expression)?;
        Ok(rpn::to_postfix(tokens, self.mode)?)
    }

    pub fn evaluate<V>(&self, expression: &str, variables: &V) -> Result<i64, Error>
    where
        V: Variables + ?Sized,
    {
        let result = self.evaluate_impl(expression, variables);
        match &result {
            Ok(value) => debug!(expression, value, "evaluated"),
            Err(err) => debug!(expression, %err, "evaluation failed"),
        }
        result
    }

    fn evaluate_impl<V>(&self, expression: &str, variables: &V) -> Result<i64, Error>
    where
        V: Variables + ?Sized,
    {
        let postfix = self.postfix(expression)?;
        let mut stack = eval::eval(&postfix, variables)?;
        if stack.is_empty() {
            return Err(eval::Error::EmptyResult.into());
        }
        let value = stack.pop().map_err(eval::Error::from)?;
        if self.mode == Mode::Strict && !stack.is_empty() {
            return Err(eval::Error::LeftoverOperands(stack.len()).into());
        }
        Ok(value)
    }
}

/// Evaluates `expression` against `variables` with the default,
/// [`Mode::Lenient`], settings.
pub fn evaluate<V>(expression: &str, variables: &V) -> Result<i64, Error>
where
    V: Variables + ?Sized,
{
    Evaluator::new().evaluate(expression, variables)
}
