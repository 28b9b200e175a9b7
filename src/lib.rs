//! Hierarchical data to box-drawn report tables, and back.
//!
//! ```text
//! Source + queries --report--> Column tree --format--> text
//! text --parse--> Column tree --extract--> values
//! ```
//!
//! # Module Organization
//!
//! - `types` - the report tree (`Column`, `Row`, `Endpoint`) and `extract`
//! - `query` - row and column queries, the `Node` source adapter trait
//! - `reporter` - the projection engine
//! - `table` - formatter and parser for the box-drawn text
//! - `store` - passthrough storage of report text
//! - `demo` - a sample source adapter and query set
//! - `error` - error types

pub mod demo;
pub mod error;
pub mod query;
pub mod reporter;
pub mod store;
pub mod table;
pub mod types;

pub use error::{ConstructionError, Error, FormatError, ParseError, QueryError, ReportError};
pub use query::{ColumnQuery, Content, Node, RowQuery};
pub use reporter::{Reporter, report};
pub use store::{read_report, write_report};
pub use table::{format, parse};
pub use types::{Column, Endpoint, Row, extract};
