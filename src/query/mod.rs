//! Query model - describes how rows and columns are derived from a source.
//!
//! The bound source is passed explicitly into every evaluation; queries never
//! store it. Only the stateful column queries (`Counter`, `RunningDifference`)
//! mutate anything, and they say so in their docs.
//!
//! # Module Organization
//!
//! - `row` - `OneTimeRowQuery` (static rows) and `EveryRowQuery` (iterating, filtering, branching)
//! - `column` - `Value`, `Getter` and `Nested` column queries
//! - `stateful` - `Counter` and `RunningDifference` (with the `CheckedDelta` bound)

mod column;
mod row;
mod stateful;

pub use column::{Getter, Nested, Value};
pub use row::{EveryRowQuery, OneTimeRowQuery};
pub use stateful::{CheckedDelta, Counter, RunningDifference};

use crate::error::{QueryError, ReportError};
use crate::reporter::Reporter;
use crate::types::{Endpoint, Row};

/// Hierarchical source adapter: exposes ordered children of the same kind.
///
/// Implement this on a wrapper around the domain value rather than on the
/// domain type itself.
pub trait Node: Sized {
    fn children(&self) -> Vec<Self>;
}

/// Boxed row queries over sources of type `S`
pub type RowQueries<S> = Vec<Box<dyn RowQuery<S>>>;

/// Boxed column queries over sources of type `S`
pub type ColumnQueries<S> = Vec<Box<dyn ColumnQuery<S>>>;

/// Produces zero, one or many rows for a bound source.
pub trait RowQuery<S> {
    /// Expand into rows, using `reporter` to build each row's columns
    fn expand(&self, source: &S, reporter: &Reporter) -> Result<Vec<Row>, ReportError>;

    /// Name used in logs and error messages
    fn label(&self) -> &str;
}

/// What a column query yields for one bound source
pub enum Content<'q, S> {
    /// Rendered as a leaf column
    Literal(Endpoint),
    /// Expanded by the reporter into a nested composite column
    Nested(&'q [Box<dyn RowQuery<S>>]),
}

/// Produces the content of a single column.
pub trait ColumnQuery<S> {
    fn content(&self, source: &S) -> Result<Content<'_, S>, QueryError>;

    /// Name used in logs and error messages
    fn label(&self) -> &str;
}

/// Box a row query for use in a query list
pub fn row<S, Q: RowQuery<S> + 'static>(query: Q) -> Box<dyn RowQuery<S>> {
    Box::new(query)
}

/// Box a column query for use in a query list
pub fn col<S, Q: ColumnQuery<S> + 'static>(query: Q) -> Box<dyn ColumnQuery<S>> {
    Box::new(query)
}
