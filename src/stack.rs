#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("pop from an empty stack")]
    Underflow,
}

/// LIFO stack of operands for a single evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    #[inline]
    pub fn pop(&mut self) -> Result<i64, Error> {
        self.values.pop().ok_or(Error::Underflow)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}
