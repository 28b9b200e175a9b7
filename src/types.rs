/// Report tree data structures
///
/// A report is a single root `Column`. Composite columns hold rows, rows hold
/// at least one column, and leaf columns carry an `Endpoint`.
use crate::error::ConstructionError;
use std::fmt;

/// Leaf payload: the printable text of a reported value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Endpoint(String);

impl Endpoint {
    /// Capture the printed form of any displayable value
    pub fn new(value: impl fmt::Display) -> Self {
        Endpoint(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        Endpoint(s.to_string())
    }
}

impl From<String> for Endpoint {
    fn from(s: String) -> Self {
        Endpoint(s)
    }
}

/// A node of the report: a nested table or a leaf value
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Column {
    Composite(Vec<Row>),
    Leaf(Endpoint),
}

impl Column {
    pub fn leaf(value: impl Into<Endpoint>) -> Self {
        Column::Leaf(value.into())
    }

    pub fn composite(rows: Vec<Row>) -> Self {
        Column::Composite(rows)
    }

    /// Dispatch to exactly one handler depending on the variant
    pub fn extract<'a, R>(
        &'a self,
        on_composite: impl FnOnce(&'a [Row]) -> R,
        on_leaf: impl FnOnce(&'a Endpoint) -> R,
    ) -> R {
        match self {
            Column::Composite(rows) => on_composite(rows),
            Column::Leaf(endpoint) => on_leaf(endpoint),
        }
    }

    pub fn as_leaf(&self) -> Option<&Endpoint> {
        self.extract(|_| None, Some)
    }

    pub fn as_rows(&self) -> Option<&[Row]> {
        self.extract(Some, |_| None)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Column::Leaf(_))
    }
}

/// Free-function form of [`Column::extract`]
pub fn extract<'a, R>(
    column: &'a Column,
    on_composite: impl FnOnce(&'a [Row]) -> R,
    on_leaf: impl FnOnce(&'a Endpoint) -> R,
) -> R {
    column.extract(on_composite, on_leaf)
}

/// A non-empty, ordered sequence of columns
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Row {
    columns: Vec<Column>,
}

impl Row {
    /// Build a row, rejecting an empty column list
    pub fn new(columns: Vec<Column>) -> Result<Self, ConstructionError> {
        if columns.is_empty() {
            return Err(ConstructionError);
        }
        Ok(Row { columns })
    }

    /// Convenience for rows made only of leaf text
    pub fn leaves<I, T>(values: I) -> Result<Self, ConstructionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Endpoint>,
    {
        Row::new(values.into_iter().map(|v| Column::Leaf(v.into())).collect())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

impl TryFrom<Vec<Column>> for Row {
    type Error = ConstructionError;

    fn try_from(columns: Vec<Column>) -> Result<Self, Self::Error> {
        Row::new(columns)
    }
}

impl From<Row> for Vec<Column> {
    fn from(row: Row) -> Self {
        row.columns
    }
}

/// Collect the leaf texts of a tree in depth-first, left-to-right order
pub fn leaf_texts(column: &Column) -> Vec<String> {
    let mut out = Vec::new();
    collect_leaves(column, &mut out);
    out
}

fn collect_leaves(column: &Column, out: &mut Vec<String>) {
    match column {
        Column::Composite(rows) => {
            for col in rows.iter().flat_map(|row| row.columns()) {
                collect_leaves(col, out);
            }
        }
        Column::Leaf(endpoint) => out.push(endpoint.as_str().to_string()),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
