//! Column queries: fixed literals, computed values and nested row queries.

use super::{ColumnQuery, Content, RowQueries};
use crate::error::QueryError;
use crate::types::Endpoint;
use std::fmt::Display;

/// A fixed literal, independent of the bound source
pub struct Value {
    label: String,
    value: Endpoint,
}

impl Value {
    pub fn new(value: impl Into<Endpoint>) -> Self {
        let value = value.into();
        Self { label: format!("value {:?}", value.as_str()), value }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<S> ColumnQuery<S> for Value {
    fn content(&self, _source: &S) -> Result<Content<'_, S>, QueryError> {
        Ok(Content::Literal(self.value.clone()))
    }

    fn label(&self) -> &str {
        &self.label
    }
}

type Read<S> = Box<dyn Fn(&S) -> Result<Endpoint, QueryError>>;

/// A value computed from the bound source
pub struct Getter<S> {
    label: String,
    read: Read<S>,
}

impl<S: 'static> Getter<S> {
    pub fn new<T: Display + 'static>(get: impl Fn(&S) -> T + 'static) -> Self {
        Self { label: "getter".to_string(), read: Box::new(move |s| Ok(Endpoint::new(get(s)))) }
    }

    /// A getter whose read can fail; the error aborts the report
    pub fn try_new<T, E>(get: impl Fn(&S) -> Result<T, E> + 'static) -> Self
    where
        T: Display + 'static,
        E: Display + 'static,
    {
        Self {
            label: "getter".to_string(),
            read: Box::new(move |s| get(s).map(Endpoint::new).map_err(|e| QueryError::new(e.to_string()))),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<S> ColumnQuery<S> for Getter<S> {
    fn content(&self, source: &S) -> Result<Content<'_, S>, QueryError> {
        (self.read)(source).map(Content::Literal)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// A nested table: the row queries are expanded against the bound source
pub struct Nested<S> {
    label: String,
    rows: RowQueries<S>,
}

impl<S> Nested<S> {
    pub fn new(rows: RowQueries<S>) -> Self {
        Self { label: "nested".to_string(), rows }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<S> ColumnQuery<S> for Nested<S> {
    fn content(&self, _source: &S) -> Result<Content<'_, S>, QueryError> {
        Ok(Content::Nested(&self.rows))
    }

    fn label(&self) -> &str {
        &self.label
    }
}
