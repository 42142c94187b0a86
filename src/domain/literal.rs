//! Nested-pair literals as they appear in homework input.
//!
//! The bracket notation `[[1,2],3]` happens to be valid JSON, so lines are
//! parsed with `serde_json` and then checked for the pair/number shape.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};

/// A snailfish number before it is loaded into an arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Regular(u64),
    Pair(Box<Literal>, Box<Literal>),
}

impl Literal {
    pub fn pair(left: Literal, right: Literal) -> Self {
        Literal::Pair(Box::new(left), Box::new(right))
    }
}

impl TryFrom<&Value> for Literal {
    type Error = DomainError;

    fn try_from(value: &Value) -> DomainResult<Self> {
        match value {
            Value::Array(items) => match items.as_slice() {
                [left, right] => Ok(Literal::pair(
                    Literal::try_from(left)?,
                    Literal::try_from(right)?,
                )),
                _ => Err(DomainError::invalid_literal(format!(
                    "a pair needs exactly 2 elements, found {}",
                    items.len()
                ))),
            },
            Value::Number(n) => n.as_u64().map(Literal::Regular).ok_or_else(|| {
                DomainError::invalid_literal(format!("not a non-negative integer: {n}"))
            }),
            other => Err(DomainError::invalid_literal(format!(
                "expected a pair or a number, found {other}"
            ))),
        }
    }
}

impl FromStr for Literal {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let value: Value = serde_json::from_str(s.trim())
            .map_err(|e| DomainError::invalid_literal(format!("{}: {}", s.trim(), e)))?;
        Literal::try_from(&value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Regular(v) => write!(f, "{v}"),
            Literal::Pair(left, right) => write!(f, "[{left},{right}]"),
        }
    }
}
