//! Expression compiler
//!
//! Turns [`Lambda`]s into dotted field paths, string-formatted values and
//! [`SearchPredicate`] trees. Any shape outside the supported set fails with
//! [`Error::InvalidExpression`] naming the offending sub-expression.
//!
//! | Expression                          | Result                        |
//! |-------------------------------------|-------------------------------|
//! | `i.a == v`, `!=`, `>`, `>=`, `<`, `<=` | `Eq`, `NotEq`, `GreaterThan`, ... |
//! | `collection.Contains(i.a)`          | `In(a, collection)`           |
//! | `x && y`, `x \|\| y`                | `And`, `Or` (flattened)       |
//! | `!x`                                | `negate(x)`                   |

use super::{BinaryOp, Expr, Lambda, Value};
use crate::error::{Error, Result};
use crate::search::{camel_case, PredicateKind, SearchPredicate};

/// Dotted, camel-cased path of the member chain a lambda selects
///
/// `i => i.Name.Fr` yields `name.fr`. Conversions anywhere in the chain are
/// looked through, and a static member (no target) ends the chain early.
pub fn property_path(lambda: &Lambda) -> Result<String> {
    member_path(&lambda.parameter, &lambda.body)
}

fn member_path(root: &str, expr: &Expr) -> Result<String> {
    let mut segments = Vec::new();
    let mut current = expr;

    loop {
        match current {
            Expr::Parameter(name) if name == root => break,
            Expr::Convert(inner) => current = inner.as_ref(),
            Expr::Member { target, name } => {
                segments.push(camel_case(name));
                match target {
                    Some(target) => current = target.as_ref(),
                    None => break,
                }
            }
            other => {
                return Err(Error::invalid_expression(
                    other.to_string(),
                    format!("expected a member chain rooted at `{}`", root),
                ))
            }
        }
    }

    segments.reverse();
    Ok(segments.join("."))
}

/// String form of a constant or captured scalar, looking through conversions
pub fn value_as_string(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Convert(inner) => value_as_string(inner),
        Expr::Constant(value) | Expr::Captured { value, .. } => scalar(expr, value),
        other => Err(Error::invalid_expression(
            other.to_string(),
            "expected a constant value",
        )),
    }
}

/// String forms of an in-memory collection, constant or captured
pub fn collection_as_strings(expr: &Expr) -> Result<Vec<String>> {
    match expr {
        Expr::Convert(inner) => collection_as_strings(inner),
        Expr::Constant(Value::List(items)) | Expr::Captured {
            value: Value::List(items),
            ..
        } => items.iter().map(|item| scalar(expr, item)).collect(),
        other => Err(Error::invalid_expression(
            other.to_string(),
            "expected an in-memory collection",
        )),
    }
}

fn scalar(expr: &Expr, value: &Value) -> Result<String> {
    value
        .to_wire_string()
        .ok_or_else(|| Error::invalid_expression(expr.to_string(), "expected a scalar value"))
}

/// Compile a boolean lambda into a predicate tree
///
/// An operand of `&&` that compiles to an `And` has its children spliced
/// into the parent, in source order. The same holds for `||` and `Or`,
/// including operands that only become one through negation.
pub fn predicate(lambda: &Lambda) -> Result<SearchPredicate> {
    compile(&lambda.parameter, &lambda.body)
}

fn compile(root: &str, expr: &Expr) -> Result<SearchPredicate> {
    match expr {
        Expr::Binary { op, left, right } => match op {
            BinaryOp::AndAlso => {
                let mut children = Vec::new();
                splice_and(compile(root, left)?, &mut children);
                splice_and(compile(root, right)?, &mut children);
                Ok(SearchPredicate::And(children))
            }
            BinaryOp::OrElse => {
                let mut children = Vec::new();
                splice_or(compile(root, left)?, &mut children);
                splice_or(compile(root, right)?, &mut children);
                Ok(SearchPredicate::Or(children))
            }
            _ => {
                let kind = comparison_kind(*op).ok_or_else(|| {
                    Error::invalid_expression(
                        expr.to_string(),
                        format!("operator `{}` is not a comparison", op),
                    )
                })?;
                let field = member_path(root, left)?;
                let value = value_as_string(right)?;
                SearchPredicate::leaf(kind, field, value)
            }
        },
        Expr::Call {
            target,
            method,
            args,
        } if method.eq_ignore_ascii_case("contains") => {
            let Some(collection) = target else {
                return Err(Error::invalid_expression(
                    expr.to_string(),
                    "Contains must be called on a collection",
                ));
            };
            let [item] = args.as_slice() else {
                return Err(Error::invalid_expression(
                    expr.to_string(),
                    "Contains takes exactly one argument",
                ));
            };
            let field = member_path(root, item)?;
            let values = collection_as_strings(collection)?;
            Ok(SearchPredicate::In { field, values })
        }
        Expr::Not(inner) => Ok(compile(root, inner)?.negate()),
        other => Err(Error::invalid_expression(
            other.to_string(),
            "could not extract a predicate",
        )),
    }
}

fn splice_and(predicate: SearchPredicate, children: &mut Vec<SearchPredicate>) {
    match predicate {
        SearchPredicate::And(inner) => children.extend(inner),
        other => children.push(other),
    }
}

fn splice_or(predicate: SearchPredicate, children: &mut Vec<SearchPredicate>) {
    match predicate {
        SearchPredicate::Or(inner) => children.extend(inner),
        other => children.push(other),
    }
}

fn comparison_kind(op: BinaryOp) -> Option<PredicateKind> {
    match op {
        BinaryOp::Equal => Some(PredicateKind::Eq),
        BinaryOp::NotEqual => Some(PredicateKind::NotEq),
        BinaryOp::GreaterThan => Some(PredicateKind::GreaterThan),
        BinaryOp::GreaterThanOrEqual => Some(PredicateKind::GreaterThanOrEqual),
        BinaryOp::LessThan => Some(PredicateKind::LessThan),
        BinaryOp::LessThanOrEqual => Some(PredicateKind::LessThanOrEqual),
        _ => None,
    }
}
