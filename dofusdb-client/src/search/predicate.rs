//! Filter tree for search queries
//!
//! A [`SearchPredicate`] is either a leaf comparison on a dotted field path or an
//! `And`/`Or` composite. Field paths and values are already string-formatted;
//! the serializer embeds them as-is.
//!
//! # Example
//!
//! ```rust
//! use dofusdb_client::search::SearchPredicate;
//!
//! let predicate = SearchPredicate::and([
//!     SearchPredicate::eq("level", "200"),
//!     SearchPredicate::not_in("typeId", ["1", "2"]),
//! ]);
//!
//! assert_eq!(
//!     predicate.negate(),
//!     SearchPredicate::or([
//!         SearchPredicate::not_eq("level", "200"),
//!         SearchPredicate::is_in("typeId", ["1", "2"]),
//!     ])
//! );
//! ```

use std::fmt;

use crate::error::Error;

/// A node in the filter tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPredicate {
    /// `field == value`
    Eq { field: String, value: String },
    /// `field != value`
    NotEq { field: String, value: String },
    /// `field > value`
    GreaterThan { field: String, value: String },
    /// `field >= value`
    GreaterThanOrEqual { field: String, value: String },
    /// `field < value`
    LessThan { field: String, value: String },
    /// `field <= value`
    LessThanOrEqual { field: String, value: String },
    /// `field` is one of `values`
    In { field: String, values: Vec<String> },
    /// `field` is none of `values`
    NotIn { field: String, values: Vec<String> },
    /// Every child holds
    And(Vec<SearchPredicate>),
    /// At least one child holds
    Or(Vec<SearchPredicate>),
}

impl SearchPredicate {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn not_eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotEq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn gt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn gte(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::GreaterThanOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::LessThan {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn lte(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::LessThanOrEqual {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self::NotIn {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn and(children: impl IntoIterator<Item = SearchPredicate>) -> Self {
        Self::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = SearchPredicate>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    /// Build a single-value leaf from its wire operator (`$eq`, `$gt`, ...)
    ///
    /// Set operators and composites cannot be built this way.
    pub fn leaf(
        kind: PredicateKind,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, Error> {
        let (field, value) = (field.into(), value.into());
        Ok(match kind {
            PredicateKind::Eq => Self::Eq { field, value },
            PredicateKind::NotEq => Self::NotEq { field, value },
            PredicateKind::GreaterThan => Self::GreaterThan { field, value },
            PredicateKind::GreaterThanOrEqual => Self::GreaterThanOrEqual { field, value },
            PredicateKind::LessThan => Self::LessThan { field, value },
            PredicateKind::LessThanOrEqual => Self::LessThanOrEqual { field, value },
            PredicateKind::In
            | PredicateKind::NotIn
            | PredicateKind::And
            | PredicateKind::Or => {
                return Err(Error::UnsupportedPredicateKind(format!(
                    "{} is not a single-value comparison",
                    kind
                )))
            }
        })
    }

    /// The variant of this node
    pub fn kind(&self) -> PredicateKind {
        match self {
            Self::Eq { .. } => PredicateKind::Eq,
            Self::NotEq { .. } => PredicateKind::NotEq,
            Self::GreaterThan { .. } => PredicateKind::GreaterThan,
            Self::GreaterThanOrEqual { .. } => PredicateKind::GreaterThanOrEqual,
            Self::LessThan { .. } => PredicateKind::LessThan,
            Self::LessThanOrEqual { .. } => PredicateKind::LessThanOrEqual,
            Self::In { .. } => PredicateKind::In,
            Self::NotIn { .. } => PredicateKind::NotIn,
            Self::And(_) => PredicateKind::And,
            Self::Or(_) => PredicateKind::Or,
        }
    }

    /// Logical negation, pushed down to the leaves
    ///
    /// Comparisons invert (`>` becomes `<=`), set membership flips, and
    /// composites follow De Morgan: `!(a && b)` is `!a || !b`.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Eq { field, value } => Self::NotEq { field, value },
            Self::NotEq { field, value } => Self::Eq { field, value },
            Self::In { field, values } => Self::NotIn { field, values },
            Self::NotIn { field, values } => Self::In { field, values },
            Self::GreaterThan { field, value } => Self::LessThanOrEqual { field, value },
            Self::GreaterThanOrEqual { field, value } => Self::LessThan { field, value },
            Self::LessThan { field, value } => Self::GreaterThanOrEqual { field, value },
            Self::LessThanOrEqual { field, value } => Self::GreaterThan { field, value },
            Self::And(children) => Self::Or(children.into_iter().map(Self::negate).collect()),
            Self::Or(children) => Self::And(children.into_iter().map(Self::negate).collect()),
        }
    }
}

/// Discriminant of [`SearchPredicate`], named by its wire operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateKind {
    Eq,
    NotEq,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    And,
    Or,
}

impl PredicateKind {
    /// The operator token used in the query string
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::NotEq => "$neq",
            Self::GreaterThan => "$gt",
            Self::GreaterThanOrEqual => "$gte",
            Self::LessThan => "$lt",
            Self::LessThanOrEqual => "$lte",
            Self::In => "$in",
            Self::NotIn => "$nin",
            Self::And => "$and",
            Self::Or => "$or",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}
