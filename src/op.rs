use std::fmt;

#[derive(thiserror::Error, miette::Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,
}

/// The dyadic operators understood by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
}

impl Op {
    pub const ALL: [Op; 13] = [
        Op::Mul,
        Op::Div,
        Op::Rem,
        Op::Add,
        Op::Sub,
        Op::Lt,
        Op::Gt,
        Op::LtEq,
        Op::GtEq,
        Op::Eq,
        Op::NotEq,
        Op::And,
        Op::Or,
    ];

    /// Binding strength; higher binds tighter. Every level is left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            Op::Mul | Op::Div | Op::Rem => 5,
            Op::Add | Op::Sub => 4,
            Op::Lt | Op::Gt | Op::LtEq | Op::GtEq | Op::Eq | Op::NotEq => 3,
            Op::And => 2,
            Op::Or => 1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Op::Mul => "*",
            Op::Div => "/",
            Op::Rem => "%",
            Op::Add => "+",
            Op::Sub => "-",
            Op::Lt => "<",
            Op::Gt => ">",
            Op::LtEq => "<=",
            Op::GtEq => ">=",
            Op::Eq => "==",
            Op::NotEq => "!=",
            Op::And => "&&",
            Op::Or => "||",
        }
    }

    /// Applies the operator to `x` (left) and `y` (right).
    ///
    /// Arithmetic wraps on overflow. Division and remainder truncate toward
    /// zero. Comparisons and logical operators yield `1` or `0`, with any
    /// nonzero operand counting as true.
    pub fn apply(self, x: i64, y: i64) -> Result<i64, Error> {
        let value = match self {
            Op::Mul => x.wrapping_mul(y),
            Op::Div => {
                if y == 0 {
                    return Err(Error::DivisionByZero);
                }
                x.wrapping_div(y)
            }
            Op::Rem => {
                if y == 0 {
                    return Err(Error::DivisionByZero);
                }
                x.wrapping_rem(y)
            }
            Op::Add => x.wrapping_add(y),
            Op::Sub => x.wrapping_sub(y),
            Op::Lt => bool_value(x < y),
            Op::Gt => bool_value(x > y),
            Op::LtEq => bool_value(x <= y),
            Op::GtEq => bool_value(x >= y),
            Op::Eq => bool_value(x == y),
            Op::NotEq => bool_value(x != y),
            Op::And => bool_value(x != 0 && y != 0),
            Op::Or => bool_value(x != 0 || y != 0),
        };
        Ok(value)
    }
}

#[inline]
fn bool_value(b: bool) -> i64 {
    i64::from(b)
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn precedence_levels() {
        assert!(Op::Mul.precedence() > Op::Add.precedence());
        assert!(Op::Sub.precedence() > Op::Lt.precedence());
        assert!(Op::NotEq.precedence() > Op::And.precedence());
        assert!(Op::And.precedence() > Op::Or.precedence());
        assert_eq!(Op::Div.precedence(), Op::Rem.precedence());
        assert_eq!(Op::Lt.precedence(), Op::Eq.precedence());
    }

    #[test]
    fn arithmetic() {
        assert_eq!(Op::Add.apply(2, 3), Ok(5));
        assert_eq!(Op::Sub.apply(5, 2), Ok(3));
        assert_eq!(Op::Mul.apply(-4, 3), Ok(-12));
        assert_eq!(Op::Div.apply(7, 2), Ok(3));
        assert_eq!(Op::Div.apply(-7, 2), Ok(-3));
        assert_eq!(Op::Rem.apply(-7, 2), Ok(-1));
        assert_eq!(Op::Rem.apply(7, -2), Ok(1));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(Op::Add.apply(i64::MAX, 1), Ok(i64::MIN));
        assert_eq!(Op::Div.apply(i64::MIN, -1), Ok(i64::MIN));
        assert_eq!(Op::Rem.apply(i64::MIN, -1), Ok(0));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(Op::Div.apply(1, 0), Err(Error::DivisionByZero));
        assert_eq!(Op::Rem.apply(1, 0), Err(Error::DivisionByZero));
    }

    #[test]
    fn comparisons() {
        assert_eq!(Op::Lt.apply(1, 2), Ok(1));
        assert_eq!(Op::Gt.apply(1, 2), Ok(0));
        assert_eq!(Op::LtEq.apply(2, 2), Ok(1));
        assert_eq!(Op::GtEq.apply(1, 2), Ok(0));
        assert_eq!(Op::Eq.apply(3, 3), Ok(1));
        assert_eq!(Op::NotEq.apply(3, 3), Ok(0));
    }

    #[test]
    fn logic_uses_truthiness() {
        assert_eq!(Op::And.apply(5, -1), Ok(1));
        assert_eq!(Op::And.apply(5, 0), Ok(0));
        assert_eq!(Op::Or.apply(0, 7), Ok(1));
        assert_eq!(Op::Or.apply(0, 0), Ok(0));
    }

    #[test]
    fn symbols_are_distinct() {
        for (i, a) in Op::ALL.iter().enumerate() {
            for b in &Op::ALL[i + 1..] {
                assert_ne!(a.symbol(), b.symbol());
            }
        }
    }
}
