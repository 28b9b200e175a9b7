//! Error types for reporting, formatting and parsing.
//!
//! Reporter and formatter failures abort the whole call. Parse failures are
//! ordinary, recoverable outcomes for malformed input.

use std::io;
use thiserror::Error;

/// A row was built with zero columns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("a row must contain at least one column")]
pub struct ConstructionError;

/// A query could not read what it needed from its bound source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct QueryError {
    pub message: String,
}

impl QueryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Failure of a whole `report` call. No partial tree is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A query produced no column for a row.
    #[error("query `{query}` built an invalid row: {source}")]
    Construction {
        query: String,
        #[source]
        source: ConstructionError,
    },

    /// A predicate or content computation failed.
    #[error("query `{query}` failed: {source}")]
    Query {
        query: String,
        #[source]
        source: QueryError,
    },
}

impl ReportError {
    pub fn query(query: impl Into<String>, source: QueryError) -> Self {
        Self::Query { query: query.into(), source }
    }

    pub fn construction(query: impl Into<String>) -> Self {
        Self::Construction { query: query.into(), source: ConstructionError }
    }

    /// Label of the query that failed.
    pub fn query_label(&self) -> &str {
        match self {
            Self::Construction { query, .. } | Self::Query { query, .. } => query,
        }
    }
}

/// A tree cannot be drawn without breaking the table grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("leaf text {text:?} contains reserved character {found:?}")]
    ReservedCharacter { text: String, found: char },

    /// Only a composite root can be drawn as a table.
    #[error("report root must be a table, found leaf {text:?}")]
    LeafRoot { text: String },
}

/// Malformed report text. `line` is 1-based, `column` is a 0-based display column.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input contains no table")]
    Empty,

    #[error("line {line}, column {column}: expected {expected}, found {found}")]
    UnexpectedCharacter {
        line: usize,
        column: usize,
        expected: &'static str,
        found: String,
    },

    #[error("line {line}, column {column}: column boundary is misaligned ({detail})")]
    Misaligned { line: usize, column: usize, detail: String },

    #[error("line {line}: table is not closed")]
    Unterminated { line: usize },

    #[error("line {line}: unexpected content after the table")]
    TrailingContent { line: usize },
}

impl ParseError {
    /// Location of the error as (1-based line, 0-based column), when known.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Self::UnexpectedCharacter { line, column, .. } | Self::Misaligned { line, column, .. } => {
                Some((*line, *column))
            }
            Self::Unterminated { line } | Self::TrailingContent { line } => Some((*line, 0)),
            Self::Empty => None,
        }
    }
}

/// Top-level error for the command line front end.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("cannot render report: {0}")]
    Format(#[from] FormatError),

    #[error("cannot parse report: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid report tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
