//! Tagged node value for graphs with heterogeneous contents
//!
//! Containers in this crate are generic, so mixing element types is normally
//! a compile error. A graph that has to hold values of several kinds uses
//! [`Value`] as its node type and may still restrict itself to one kind at
//! runtime with [`ValueKind::guard`].

use crate::graph::TypeGuard;
use std::fmt;

/// A node value of one of several kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Int(i64),
    Str(String),
    Bool(bool),
    Char(char),
}

/// Runtime discriminant of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Str,
    Bool,
    Char,
}

impl Value {
    /// Returns the kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Str(_) => ValueKind::Str,
            Value::Bool(_) => ValueKind::Bool,
            Value::Char(_) => ValueKind::Char,
        }
    }
}

impl ValueKind {
    /// Name used in type mismatch errors
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Str => "str",
            ValueKind::Bool => "bool",
            ValueKind::Char => "char",
        }
    }

    /// Returns a guard accepting only values of this kind
    ///
    /// # Example
    ///
    /// ```rust
    /// use strict_adts::graph::{Graph, GraphConfig};
    /// use strict_adts::error::GraphError;
    /// use strict_adts::value::{Value, ValueKind};
    ///
    /// let mut graph: Graph<Value> =
    ///     Graph::with_type_guard(GraphConfig::default(), ValueKind::Int.guard()).unwrap();
    /// assert_eq!(graph.add_node(Value::from(1)), Ok(true));
    /// assert_eq!(
    ///     graph.add_node(Value::from("one")),
    ///     Err(GraphError::TypeMismatch { expected: "int" })
    /// );
    /// ```
    pub fn guard(self) -> TypeGuard<Value> {
        match self {
            ValueKind::Int => TypeGuard::new("int", |v| matches!(v, Value::Int(_))),
            ValueKind::Str => TypeGuard::new("str", |v| matches!(v, Value::Str(_))),
            ValueKind::Bool => TypeGuard::new("bool", |v| matches!(v, Value::Bool(_))),
            ValueKind::Char => TypeGuard::new("char", |v| matches!(v, Value::Char(_))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{:?}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{:?}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_guard_agree() {
        let values = [
            Value::from(3),
            Value::from("three"),
            Value::from(true),
            Value::from('3'),
        ];
        for value in &values {
            let guard = value.kind().guard();
            assert!(guard.check(value).is_ok());
            assert_eq!(guard.expected(), value.kind().name());
        }
        assert!(ValueKind::Int.guard().check(&Value::from('x')).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(-4).to_string(), "-4");
        assert_eq!(Value::from("a b").to_string(), "\"a b\"");
        assert_eq!(Value::from('c').to_string(), "'c'");
    }
}
