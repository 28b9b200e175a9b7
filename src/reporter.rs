/// Projection engine
///
/// Walks a source with a list of row queries and builds a fresh `Column`
/// tree. The bound source is threaded through every call as a parameter:
/// row queries pick which sources their rows are built from, the reporter
/// turns column query content into leaf or composite columns.
///
/// Evaluation is depth-first and strictly in declaration order, so row order
/// is (row query order) x (child order) and column order is column query order.
use crate::error::ReportError;
use crate::query::{ColumnQuery, Content, RowQuery};
use crate::types::{Column, Row};
use log::{debug, trace};

/// Builds report trees from sources and queries. Holds no state of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reporter;

impl Reporter {
    pub fn new() -> Self {
        Reporter
    }

    /// Report on `root`; the result is always a composite column.
    ///
    /// Fails as a whole if any query fails. Stateful queries evaluated before
    /// the failure keep their advanced state.
    pub fn report<S>(&self, root: &S, queries: &[Box<dyn RowQuery<S>>]) -> Result<Column, ReportError> {
        debug!("Reporting with {} top-level row queries", queries.len());
        let rows = self.rows(root, queries)?;
        debug!("Report produced {} top-level rows", rows.len());
        Ok(Column::Composite(rows))
    }

    /// Expand every row query against `source` and concatenate the rows
    pub fn rows<S>(&self, source: &S, queries: &[Box<dyn RowQuery<S>>]) -> Result<Vec<Row>, ReportError> {
        let mut rows = Vec::new();
        for query in queries {
            let emitted = query.expand(source, self)?;
            trace!("{}: {} rows", query.label(), emitted.len());
            rows.extend(emitted);
        }
        Ok(rows)
    }

    /// Build one row by evaluating `columns` in order against `source`.
    ///
    /// `owner` is the label of the row query asking, used if the row is empty.
    pub fn row<S>(&self, source: &S, owner: &str, columns: &[Box<dyn ColumnQuery<S>>]) -> Result<Row, ReportError> {
        let mut built = Vec::with_capacity(columns.len());
        for query in columns {
            let content = query.content(source).map_err(|e| ReportError::query(query.label(), e))?;
            let column = match content {
                Content::Literal(endpoint) => Column::Leaf(endpoint),
                Content::Nested(nested) => Column::Composite(self.rows(source, nested)?),
            };
            built.push(column);
        }
        Row::new(built).map_err(|_| ReportError::construction(owner))
    }
}

/// Report on `root` with a default `Reporter`
pub fn report<S>(root: &S, queries: &[Box<dyn RowQuery<S>>]) -> Result<Column, ReportError> {
    Reporter::new().report(root, queries)
}

#[cfg(test)]
#[path = "reporter_test.rs"]
mod reporter_test;
