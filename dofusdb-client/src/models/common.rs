//! Shapes shared by several resources

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::expr::{Expr, Field, Fields};

/// A string in every language the game ships
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MultiLangString {
    pub de: Option<String>,
    pub en: Option<String>,
    pub es: Option<String>,
    pub fr: Option<String>,
    pub pt: Option<String>,
}

/// Field view over a [`MultiLangString`]
#[derive(Debug, Clone)]
pub struct MultiLangStringFields {
    expr: Expr,
}

impl Fields for MultiLangStringFields {
    fn from_expr(expr: Expr) -> Self {
        Self { expr }
    }

    fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl MultiLangStringFields {
    pub fn de(&self) -> Field<String> {
        self.field("de")
    }

    pub fn en(&self) -> Field<String> {
        self.field("en")
    }

    pub fn es(&self) -> Field<String> {
        self.field("es")
    }

    pub fn fr(&self) -> Field<String> {
        self.field("fr")
    }

    pub fn pt(&self) -> Field<String> {
        self.field("pt")
    }
}

/// A value the server replaces with a bare `false` when it is absent
///
/// ```rust
/// use dofusdb_client::models::ValueOrFalse;
///
/// let absent: ValueOrFalse<u32> = serde_json::from_str("false").unwrap();
/// assert!(absent.is_false());
///
/// let present: ValueOrFalse<u32> = serde_json::from_str("7").unwrap();
/// assert_eq!(present.value(), Some(&7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueOrFalse<T> {
    False,
    Value(T),
}

impl<T> ValueOrFalse<T> {
    pub fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::False => None,
            Self::Value(value) => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::False => None,
            Self::Value(value) => Some(value),
        }
    }
}

impl<T> From<T> for ValueOrFalse<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueOrFalseRepr<T> {
    Bool(bool),
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ValueOrFalse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ValueOrFalseRepr::deserialize(deserializer)? {
            ValueOrFalseRepr::Bool(false) => Ok(Self::False),
            ValueOrFalseRepr::Bool(true) => Err(de::Error::custom("expected a value or `false`, found `true`")),
            ValueOrFalseRepr::Value(value) => Ok(Self::Value(value)),
        }
    }
}

impl<T: Serialize> Serialize for ValueOrFalse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::False => serializer.serialize_bool(false),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}
