//! Typed filter, sort and projection expressions
//!
//! Queries are written as small expressions over a resource's fields. An
//! [`Expr`] is a closed tree of member accesses, constants, comparisons,
//! boolean combinations, negations and membership tests; the
//! [`compile`] module turns it into field paths and
//! [`SearchPredicate`](crate::search::SearchPredicate)s.
//!
//! Most callers never build an `Expr` by hand: resource types expose typed
//! field views ([`Field`]) whose comparison methods produce the tree, and
//! `!`, `&` and `|` combine them.
//!
//! # Example
//!
//! ```rust
//! use dofusdb_client::expr::{compile, Expr, Lambda};
//! use dofusdb_client::search::SearchPredicate;
//!
//! let i = Expr::parameter("i");
//! let body = !(i.clone().member("level").eq(1) & i.member("typeId").ne(2));
//!
//! let predicate = compile::predicate(&Lambda::new("i", body)).unwrap();
//! assert_eq!(
//!     predicate,
//!     SearchPredicate::or([
//!         SearchPredicate::not_eq("level", "1"),
//!         SearchPredicate::eq("typeId", "2"),
//!     ])
//! );
//! ```

pub mod compile;
mod typed;
mod value;

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

pub use typed::{Field, Fields};
pub use value::Value;

/// Binary operators an expression may contain
///
/// Only the comparisons and the two boolean combinators compile into
/// predicates; arithmetic is representable so that it can be rejected with a
/// useful diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    AndAlso,
    OrElse,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::AndAlso => "&&",
            Self::OrElse => "||",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        };
        f.write_str(symbol)
    }
}

/// An expression over the query subject
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The query subject itself
    Parameter(String),
    /// Member access; a `None` target is a static member and ends the chain
    Member {
        target: Option<Box<Expr>>,
        name: String,
    },
    /// Widening or boxing conversion
    Convert(Box<Expr>),
    /// Literal value
    Constant(Value),
    /// Variable captured from the enclosing scope
    Captured { name: String, value: Value },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Boolean negation
    Not(Box<Expr>),
    /// Method call, e.g. `collection.Contains(i.typeId)`
    Call {
        target: Option<Box<Expr>>,
        method: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::Parameter(name.into())
    }

    pub fn constant(value: impl Into<Value>) -> Self {
        Self::Constant(value.into())
    }

    pub fn captured(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Captured {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn static_member(name: impl Into<String>) -> Self {
        Self::Member {
            target: None,
            name: name.into(),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn member(self, name: impl Into<String>) -> Self {
        Self::Member {
            target: Some(Box::new(self)),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn convert(self) -> Self {
        Self::Convert(Box::new(self))
    }

    #[must_use]
    pub fn call(self, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            target: Some(Box::new(self)),
            method: method.into(),
            args,
        }
    }

    /// `self.Contains(item)`, with `self` the collection
    #[must_use]
    pub fn contains(self, item: Expr) -> Self {
        self.call("Contains", vec![item])
    }

    pub fn eq(self, value: impl Into<Value>) -> Self {
        Self::binary(BinaryOp::Equal, self, Self::constant(value))
    }

    pub fn ne(self, value: impl Into<Value>) -> Self {
        Self::binary(BinaryOp::NotEqual, self, Self::constant(value))
    }

    pub fn gt(self, value: impl Into<Value>) -> Self {
        Self::binary(BinaryOp::GreaterThan, self, Self::constant(value))
    }

    pub fn ge(self, value: impl Into<Value>) -> Self {
        Self::binary(BinaryOp::GreaterThanOrEqual, self, Self::constant(value))
    }

    pub fn lt(self, value: impl Into<Value>) -> Self {
        Self::binary(BinaryOp::LessThan, self, Self::constant(value))
    }

    pub fn le(self, value: impl Into<Value>) -> Self {
        Self::binary(BinaryOp::LessThanOrEqual, self, Self::constant(value))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::AndAlso, self, rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::OrElse, self, rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(name) => f.write_str(name),
            Self::Member {
                target: Some(target),
                name,
            } => write!(f, "{}.{}", target, name),
            Self::Member { target: None, name } => f.write_str(name),
            Self::Convert(inner) => write!(f, "Convert({})", inner),
            Self::Constant(value) => write!(f, "{}", value),
            Self::Captured { name, .. } => f.write_str(name),
            Self::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Self::Not(inner) => write!(f, "!{}", inner),
            Self::Call {
                target,
                method,
                args,
            } => {
                if let Some(target) = target {
                    write!(f, "{}.", target)?;
                }
                write!(f, "{}(", method)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// An expression together with the name of the parameter it is rooted at
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub parameter: String,
    pub body: Expr,
}

impl Lambda {
    pub fn new(parameter: impl Into<String>, body: Expr) -> Self {
        Self {
            parameter: parameter.into(),
            body,
        }
    }

    /// Build a lambda from a typed closure over a field view
    ///
    /// ```rust
    /// use dofusdb_client::expr::{Field, Lambda};
    ///
    /// let lambda = Lambda::of::<Field<i32>, _>("i", |level| level.gt(10));
    /// assert_eq!(lambda.to_string(), "i => (i > 10)");
    /// ```
    pub fn of<F, B>(parameter: &str, body: B) -> Self
    where
        F: Fields,
        B: FnOnce(F) -> Expr,
    {
        let root = F::from_expr(Expr::parameter(parameter));
        Self::new(parameter, body(root))
    }
}

impl fmt::Display for Lambda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.parameter, self.body)
    }
}
