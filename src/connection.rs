// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The connection surface the dialect consumes.
//!
//! The host owns connections; the dialect only borrows one per call and
//! issues read-only catalog statements through [`CatalogConnection`].

use crate::error::Result;
use crate::metadata::parse;
use crate::reader::ExecuteResult;
use std::fmt;

/// A SQL statement plus its positional `?` parameters.
///
/// Every caller-supplied value (schema, table, sequence, type name) travels
/// as a parameter; only fixed catalog view and column names appear in the
/// SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<String>,
}

impl BoundQuery {
    /// A statement without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Append a positional parameter.
    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.params.push(value.into());
        self
    }
}

impl fmt::Display for BoundQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.sql)
        } else {
            write!(f, "{} -- params: {:?}", self.sql, self.params)
        }
    }
}

/// A single cell read from a catalog result.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CatalogValue {
    /// Truthiness the way catalog `EXISTS` results are read: booleans as-is,
    /// integers by non-zero, text by the usual spellings of true.
    pub fn as_bool(&self) -> bool {
        match self {
            CatalogValue::Boolean(b) => *b,
            CatalogValue::Integer(i) => *i != 0,
            CatalogValue::Float(f) => *f != 0.0,
            CatalogValue::Text(s) => parse::parse_bool_text(s),
        }
    }

    /// Text rendering of the value.
    pub fn into_string(self) -> String {
        match self {
            CatalogValue::Boolean(b) => b.to_string(),
            CatalogValue::Integer(i) => i.to_string(),
            CatalogValue::Float(f) => f.to_string(),
            CatalogValue::Text(s) => s,
        }
    }
}

/// A live connection supplied by the host.
///
/// Implementations wrap the native driver's connection. Errors raised by the
/// driver must surface as [`Error::Driver`](crate::Error::Driver) so
/// disconnect detection can recognise them.
pub trait CatalogConnection {
    /// Execute a statement and return its rows.
    fn execute(&self, query: &BoundQuery) -> Result<ExecuteResult>;

    /// Whether the underlying connection reports itself closed.
    fn is_closed(&self) -> bool;

    /// First column of the first row, or `None` for an empty result or a
    /// NULL cell.
    fn scalar(&self, query: &BoundQuery) -> Result<Option<CatalogValue>> {
        parse::parse_scalar(self.execute(query)?)
    }
}
