use std::fmt;
use std::marker::PhantomData;

use super::{Expr, Value};

/// A typed view over an expression
///
/// Resource types implement this for a struct that wraps the expression for
/// the query subject and hands out one accessor per field. Views compose:
/// an accessor may return another view for a nested object.
pub trait Fields: Sized {
    fn from_expr(expr: Expr) -> Self;

    fn expr(&self) -> &Expr;

    fn into_expr(self) -> Expr {
        self.expr().clone()
    }

    /// Access a member of the viewed expression as another view
    fn field<F: Fields>(&self, name: &str) -> F {
        F::from_expr(self.expr().clone().member(name))
    }
}

impl Fields for Expr {
    fn from_expr(expr: Expr) -> Self {
        expr
    }

    fn expr(&self) -> &Expr {
        self
    }

    fn into_expr(self) -> Expr {
        self
    }
}

/// A scalar field of type `T`
pub struct Field<T> {
    expr: Expr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self::from_expr(self.expr.clone())
    }
}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.expr).finish()
    }
}

impl<T> Fields for Field<T> {
    fn from_expr(expr: Expr) -> Self {
        Self {
            expr,
            _marker: PhantomData,
        }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }

    fn into_expr(self) -> Expr {
        self.expr
    }
}

impl<T: Into<Value>> Field<T> {
    pub fn eq(&self, value: impl Into<T>) -> Expr {
        self.expr.clone().eq(value.into())
    }

    pub fn ne(&self, value: impl Into<T>) -> Expr {
        self.expr.clone().ne(value.into())
    }

    pub fn gt(&self, value: impl Into<T>) -> Expr {
        self.expr.clone().gt(value.into())
    }

    pub fn ge(&self, value: impl Into<T>) -> Expr {
        self.expr.clone().ge(value.into())
    }

    pub fn lt(&self, value: impl Into<T>) -> Expr {
        self.expr.clone().lt(value.into())
    }

    pub fn le(&self, value: impl Into<T>) -> Expr {
        self.expr.clone().le(value.into())
    }

    /// Membership in an in-memory collection
    pub fn is_in<I>(&self, values: I) -> Expr
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        let values: Vec<Value> = values.into_iter().map(|v| v.into().into()).collect();
        Expr::captured("values", Value::List(values)).contains(self.expr.clone())
    }

    /// View the field as a wider type, e.g. an `i32` compared to an `i64`
    pub fn widen<U>(&self) -> Field<U>
    where
        U: From<T>,
    {
        Field::from_expr(self.expr.clone().convert())
    }
}
