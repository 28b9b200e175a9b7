//! Row queries: static header rows and iterating rows over source children.

use super::{ColumnQueries, Node, RowQuery};
use crate::error::{QueryError, ReportError};
use crate::reporter::Reporter;
use crate::types::Row;
use log::trace;

/// Emits exactly one row, evaluated against the currently bound source.
///
/// Used for fixed header rows; it does not look at the source's children.
pub struct OneTimeRowQuery<S> {
    label: String,
    columns: ColumnQueries<S>,
}

impl<S> OneTimeRowQuery<S> {
    pub fn new(columns: ColumnQueries<S>) -> Self {
        Self { label: "one-time row".to_string(), columns }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<S> RowQuery<S> for OneTimeRowQuery<S> {
    fn expand(&self, source: &S, reporter: &Reporter) -> Result<Vec<Row>, ReportError> {
        Ok(vec![reporter.row(source, &self.label, &self.columns)?])
    }

    fn label(&self) -> &str {
        &self.label
    }
}

type Branch<S, C> = Box<dyn Fn(&S) -> Vec<C>>;
type Predicate<C> = Box<dyn Fn(&C) -> Result<bool, QueryError>>;

/// Emits one row per child of the bound source that passes the predicate.
///
/// Each child becomes the bound source for the predicate and for every column
/// query of the row. Children come from `Node::children` by default, or from
/// a custom branch function picking another collection (see [`EveryRowQuery::branch`]).
/// Children failing the predicate contribute nothing.
pub struct EveryRowQuery<S, C = S> {
    label: String,
    branch: Branch<S, C>,
    predicate: Predicate<C>,
    columns: ColumnQueries<C>,
}

impl<S: Node + 'static> EveryRowQuery<S, S> {
    /// Iterate the default children of the bound source
    pub fn new(columns: ColumnQueries<S>) -> Self {
        Self::branch(S::children, columns)
    }
}

impl<S: 'static, C: 'static> EveryRowQuery<S, C> {
    /// Iterate the collection returned by `branch` instead of the default children
    pub fn branch(branch: impl Fn(&S) -> Vec<C> + 'static, columns: ColumnQueries<C>) -> Self {
        Self {
            label: "every row".to_string(),
            branch: Box::new(branch),
            predicate: Box::new(|_| Ok(true)),
            columns,
        }
    }

    /// Keep only children for which `predicate` holds
    pub fn filter(self, predicate: impl Fn(&C) -> bool + 'static) -> Self {
        self.try_filter(move |child| Ok(predicate(child)))
    }

    /// Like `filter`, for predicates that can fail while reading the child
    pub fn try_filter(mut self, predicate: impl Fn(&C) -> Result<bool, QueryError> + 'static) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    /// Keep only children whose `field` equals `expected`
    pub fn where_eq<V>(self, field: impl Fn(&C) -> V + 'static, expected: V) -> Self
    where
        V: PartialEq + 'static,
    {
        self.filter(move |child| field(child) == expected)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<S, C> RowQuery<S> for EveryRowQuery<S, C> {
    fn expand(&self, source: &S, reporter: &Reporter) -> Result<Vec<Row>, ReportError> {
        let children = (self.branch)(source);
        let mut rows = Vec::with_capacity(children.len());

        for (index, child) in children.iter().enumerate() {
            let keep = (self.predicate)(child).map_err(|e| ReportError::query(&self.label, e))?;
            if !keep {
                trace!("{}: child {} filtered out", self.label, index);
                continue;
            }
            rows.push(reporter.row(child, &self.label, &self.columns)?);
        }

        trace!("{}: {} of {} children emitted rows", self.label, rows.len(), children.len());
        Ok(rows)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

