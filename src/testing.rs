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

//! Shared test doubles for unit tests.

use crate::connection::{BoundQuery, CatalogConnection};
use crate::error::{Error, Result};
use crate::reader::ExecuteResult;
use arrow_array::{Array, BooleanArray, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Response {
    Batches(Vec<RecordBatch>),
    Fail(String),
}

/// Connection that answers by SQL substring and records every statement.
///
/// The first matching rule wins; unmatched statements return no rows.
#[derive(Debug, Default)]
pub struct MockConnection {
    rules: Vec<(String, Response)>,
    executed: Mutex<Vec<BoundQuery>>,
    closed: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, sql_fragment: &str, batches: Vec<RecordBatch>) -> Self {
        self.rules
            .push((sql_fragment.to_string(), Response::Batches(batches)));
        self
    }

    pub fn failing(mut self, sql_fragment: &str, message: &str) -> Self {
        self.rules
            .push((sql_fragment.to_string(), Response::Fail(message.to_string())));
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn executed(&self) -> Vec<BoundQuery> {
        self.executed.lock().unwrap().clone()
    }

    pub fn count_matching(&self, sql_fragment: &str) -> usize {
        self.executed()
            .iter()
            .filter(|q| q.sql.contains(sql_fragment))
            .count()
    }
}

impl CatalogConnection for MockConnection {
    fn execute(&self, query: &BoundQuery) -> Result<ExecuteResult> {
        self.executed.lock().unwrap().push(query.clone());
        let rule = self
            .rules
            .iter()
            .find(|(fragment, _)| query.sql.contains(fragment.as_str()));
        match rule {
            Some((_, Response::Batches(batches))) => Ok(ExecuteResult::from_batches(batches.clone())),
            Some((_, Response::Fail(message))) => Err(Error::driver(message.clone())),
            None => Ok(ExecuteResult::empty()),
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

fn batch(fields: Vec<Field>, arrays: Vec<Arc<dyn Array>>) -> RecordBatch {
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

/// One text column.
pub fn names_batch(column: &str, values: &[&str]) -> RecordBatch {
    batch(
        vec![Field::new(column, DataType::Utf8, true)],
        vec![Arc::new(StringArray::from(values.to_vec()))],
    )
}

/// A single-row boolean, as returned by `SELECT EXISTS (...)`.
pub fn bool_batch(value: bool) -> RecordBatch {
    batch(
        vec![Field::new("exists", DataType::Boolean, false)],
        vec![Arc::new(BooleanArray::from(vec![value]))],
    )
}

/// `table_schema, table_name` rows.
pub fn qualified_batch(rows: &[(&str, &str)]) -> RecordBatch {
    let schemas: Vec<&str> = rows.iter().map(|(s, _)| *s).collect();
    let names: Vec<&str> = rows.iter().map(|(_, n)| *n).collect();
    batch(
        vec![
            Field::new("table_schema", DataType::Utf8, false),
            Field::new("table_name", DataType::Utf8, false),
        ],
        vec![
            Arc::new(StringArray::from(schemas)),
            Arc::new(StringArray::from(names)),
        ],
    )
}

/// Rows of the column union query:
/// `(name, data_type, default, nullable, identity)`.
pub fn columns_batch(rows: &[(&str, &str, Option<&str>, bool, bool)]) -> RecordBatch {
    batch(
        vec![
            Field::new("column_name", DataType::Utf8, false),
            Field::new("data_type", DataType::Utf8, false),
            Field::new("column_default", DataType::Utf8, true),
            Field::new("is_nullable", DataType::Boolean, false),
            Field::new("is_identity", DataType::Boolean, false),
            Field::new("ordinal_position", DataType::Int64, false),
        ],
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.2).collect::<Vec<_>>(),
            )),
            Arc::new(BooleanArray::from(
                rows.iter().map(|r| r.3).collect::<Vec<_>>(),
            )),
            Arc::new(BooleanArray::from(
                rows.iter().map(|r| r.4).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                (1..=rows.len() as i64).collect::<Vec<_>>(),
            )),
        ],
    )
}

/// One identity sequence row.
pub fn sequence_batch(name: &str, start: i64, increment: i64) -> RecordBatch {
    batch(
        vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("start", DataType::Int64, false),
            Field::new("increment", DataType::Int64, false),
        ],
        vec![
            Arc::new(StringArray::from(vec![name])),
            Arc::new(Int64Array::from(vec![start])),
            Arc::new(Int64Array::from(vec![increment])),
        ],
    )
}

/// `(constraint_name, column_name)` rows.
pub fn constraint_batch(rows: &[(&str, &str)]) -> RecordBatch {
    batch(
        vec![
            Field::new("constraint_id", DataType::Int64, false),
            Field::new("constraint_name", DataType::Utf8, false),
            Field::new("column_name", DataType::Utf8, false),
        ],
        vec![
            Arc::new(Int64Array::from(
                (0..rows.len() as i64).map(|i| 45035996273704000 + i).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            )),
        ],
    )
}

/// `(name, src)` check-constraint rows.
pub fn check_batch(rows: &[(&str, &str)]) -> RecordBatch {
    batch(
        vec![
            Field::new("name", DataType::Utf8, false),
            Field::new("src", DataType::Utf8, false),
        ],
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.0).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.1).collect::<Vec<_>>(),
            )),
        ],
    )
}
