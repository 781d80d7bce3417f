//! Typed JSON columns shared by several entities.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// A list of strings stored as a JSON array (strengths, improvements, objectives).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl StringList {
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// A list of ids stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct IdList(pub Vec<i64>);

impl From<Vec<i64>> for IdList {
    fn from(v: Vec<i64>) -> Self {
        Self(v)
    }
}
