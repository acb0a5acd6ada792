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

//! Result readers for catalog query results.
//!
//! Drivers hand rows back as Arrow [`RecordBatch`]es through the
//! [`ResultReader`] trait. [`BatchReader`] covers the common case of a
//! driver that has already materialised the (small) catalog result.

use crate::error::Result;
use arrow_array::RecordBatch;
use arrow_schema::{Schema, SchemaRef};
use std::collections::VecDeque;
use std::sync::Arc;

/// Streams Arrow batches for one executed statement.
pub trait ResultReader {
    /// Schema shared by every batch.
    fn schema(&self) -> Result<SchemaRef>;

    /// Next batch, or `None` once the result is exhausted.
    fn next_batch(&mut self) -> Result<Option<RecordBatch>>;
}

/// Rows returned by [`CatalogConnection::execute`](crate::CatalogConnection::execute).
pub struct ExecuteResult {
    pub reader: Box<dyn ResultReader + Send>,
}

impl ExecuteResult {
    /// Wrap already-fetched batches.
    pub fn from_batches(batches: Vec<RecordBatch>) -> Self {
        Self {
            reader: Box::new(BatchReader::new(batches)),
        }
    }

    /// A result with no rows and no columns.
    pub fn empty() -> Self {
        Self::from_batches(Vec::new())
    }

    /// Drain the reader into memory.
    pub fn collect_batches(mut self) -> Result<Vec<RecordBatch>> {
        let mut batches = Vec::new();
        while let Some(batch) = self.reader.next_batch()? {
            batches.push(batch);
        }
        Ok(batches)
    }
}

impl std::fmt::Debug for ExecuteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecuteResult").finish_non_exhaustive()
    }
}

/// In-memory reader over a fixed list of batches.
#[derive(Debug)]
pub struct BatchReader {
    batches: VecDeque<RecordBatch>,
    schema: SchemaRef,
}

impl BatchReader {
    pub fn new(batches: Vec<RecordBatch>) -> Self {
        let schema = batches
            .first()
            .map(|b| b.schema())
            .unwrap_or_else(|| Arc::new(Schema::empty()));
        Self {
            batches: batches.into(),
            schema,
        }
    }
}

impl ResultReader for BatchReader {
    fn schema(&self) -> Result<SchemaRef> {
        Ok(self.schema.clone())
    }

    fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
        Ok(self.batches.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::StringArray;
    use arrow_schema::{DataType, Field};

    fn names_batch(names: Vec<&str>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "schema_name",
            DataType::Utf8,
            false,
        )]));
        RecordBatch::try_new(schema, vec![Arc::new(StringArray::from(names))]).unwrap()
    }

    #[test]
    fn test_batch_reader_yields_in_order() {
        let mut reader = BatchReader::new(vec![names_batch(vec!["a"]), names_batch(vec!["b", "c"])]);
        assert_eq!(reader.schema().unwrap().fields().len(), 1);
        assert_eq!(reader.next_batch().unwrap().unwrap().num_rows(), 1);
        assert_eq!(reader.next_batch().unwrap().unwrap().num_rows(), 2);
        assert!(reader.next_batch().unwrap().is_none());
    }

    #[test]
    fn test_empty_result() {
        let result = ExecuteResult::empty();
        assert!(result.reader.schema().unwrap().fields().is_empty());
        assert!(result.collect_batches().unwrap().is_empty());
    }
}
