//! Catalog names and definitions.
//!
//! SQL identifiers are always rendered escaped: wrapped in double quotes
//! with embedded quotes doubled. `unescaped()` gives the raw name (used for
//! the CSV header).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(String);

impl Name {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    pub fn unescaped(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.replace('"', "\"\""))
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Schema-qualified table name: `"schema"."table"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableName {
    pub schema: Name,
    pub name: Name,
}

impl TableName {
    pub fn new(schema: impl Into<Name>, name: impl Into<Name>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: Name,
    /// Declared type as the engine reports it (may be empty).
    pub sql_type: String,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub table: TableName,
    /// Definition order.
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.name.unescaped().to_string())
            .collect()
    }
}
