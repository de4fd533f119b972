use serde::{Deserialize, Serialize};

use crate::ast::ValueKind;

/// A table as the surrounding query engine identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    /// Alias used to qualify columns, if the query gives the table one.
    #[serde(default)]
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Name used to qualify column references.
    pub fn qualifier(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        TableRef::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        TableRef::new(name)
    }
}

/// A typed column of a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: TableRef,
    pub column: String,
    pub kind: ValueKind,
}

impl ColumnRef {
    pub fn new(table: impl Into<TableRef>, column: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            kind,
        }
    }
}
