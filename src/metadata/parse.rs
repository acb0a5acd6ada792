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

//! Result parsing for catalog queries.
//!
//! Parses `ExecuteResult` readers into intermediate rows and reflection
//! records. Column names match the aliases chosen in
//! [`CatalogQueryBuilder`](crate::metadata::sql::CatalogQueryBuilder);
//! lookup falls back to a case-insensitive match for drivers that
//! upper-case result column names.

use crate::connection::CatalogValue;
use crate::error::{Error, Result};
use crate::metadata::types::{
    CheckConstraint, PrimaryKeyConstraint, SequenceInfo, UniqueConstraint,
};
use crate::reader::ExecuteResult;
use arrow_array::cast::AsArray;
use arrow_array::types::{
    Decimal128Type, Decimal256Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow_array::{Array, RecordBatch};
use arrow_schema::DataType;

/// Raw row from the column union query.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub column_default: Option<String>,
    pub is_nullable: bool,
    pub is_identity: bool,
}

/// Raw row from `v_catalog.constraint_columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintColumnRow {
    pub constraint_name: String,
    pub column_name: String,
}

/// A schema-qualified relation name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct QualifiedName {
    pub schema_name: String,
    pub name: String,
}

/// Get the index of a column by name, or return an error.
fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    let schema = batch.schema();
    if let Ok(idx) = schema.index_of(name) {
        return Ok(idx);
    }
    schema
        .fields()
        .iter()
        .position(|f| f.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| {
            Error::InvalidState(format!("Expected column '{}' in catalog result", name))
        })
}

/// Read one cell as a [`CatalogValue`], `None` for NULL.
pub fn get_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<Option<CatalogValue>> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Boolean => CatalogValue::Boolean(array.as_boolean().value(row)),
        DataType::Utf8 => CatalogValue::Text(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => {
            CatalogValue::Text(array.as_string::<i64>().value(row).to_string())
        }
        DataType::Int8 => CatalogValue::Integer(array.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => {
            CatalogValue::Integer(array.as_primitive::<Int16Type>().value(row).into())
        }
        DataType::Int32 => {
            CatalogValue::Integer(array.as_primitive::<Int32Type>().value(row).into())
        }
        DataType::Int64 => CatalogValue::Integer(array.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => {
            CatalogValue::Integer(array.as_primitive::<UInt8Type>().value(row).into())
        }
        DataType::UInt16 => {
            CatalogValue::Integer(array.as_primitive::<UInt16Type>().value(row).into())
        }
        DataType::UInt32 => {
            CatalogValue::Integer(array.as_primitive::<UInt32Type>().value(row).into())
        }
        DataType::UInt64 => {
            let v = array.as_primitive::<UInt64Type>().value(row);
            CatalogValue::Integer(i64::try_from(v).map_err(|_| {
                Error::InvalidState(format!("Catalog value {} does not fit in i64", v))
            })?)
        }
        DataType::Float32 => {
            CatalogValue::Float(array.as_primitive::<Float32Type>().value(row).into())
        }
        DataType::Float64 => CatalogValue::Float(array.as_primitive::<Float64Type>().value(row)),
        DataType::Decimal128(_, scale) => {
            decimal_value(array.as_primitive::<Decimal128Type>().value(row), *scale)?
        }
        DataType::Decimal256(_, scale) => {
            let v = array.as_primitive::<Decimal256Type>().value(row);
            let v = v.to_i128().ok_or_else(|| {
                Error::InvalidState(format!("Catalog value {} does not fit in i128", v))
            })?;
            decimal_value(v, *scale)?
        }
        dt => {
            return Err(Error::InvalidState(format!(
                "Unsupported catalog column type {:?}",
                dt
            )))
        }
    };
    Ok(Some(value))
}

/// Whole decimals read as integers, others as floats.
fn decimal_value(unscaled: i128, scale: i8) -> Result<CatalogValue> {
    if scale == 0 {
        let v = i64::try_from(unscaled).map_err(|_| {
            Error::InvalidState(format!("Catalog value {} does not fit in i64", unscaled))
        })?;
        return Ok(CatalogValue::Integer(v));
    }
    Ok(CatalogValue::Float(
        unscaled as f64 / 10f64.powi(i32::from(scale)),
    ))
}

/// Get a string value, NULL read as empty.
fn get_string_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<String> {
    Ok(get_optional_string_value(batch, col_idx, row)?.unwrap_or_default())
}

/// Get an optional string value.
fn get_optional_string_value(
    batch: &RecordBatch,
    col_idx: usize,
    row: usize,
) -> Result<Option<String>> {
    Ok(get_value(batch, col_idx, row)?.map(CatalogValue::into_string))
}

/// Get a boolean value, NULL read as false.
fn get_bool_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<bool> {
    Ok(get_value(batch, col_idx, row)?
        .map(|v| v.as_bool())
        .unwrap_or(false))
}

/// Get an integer value, accepting integer or numeric-text cells.
fn get_int64_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<i64> {
    match get_value(batch, col_idx, row)? {
        Some(CatalogValue::Integer(i)) => Ok(i),
        Some(CatalogValue::Float(f)) if f.fract() == 0.0 => Ok(f as i64),
        Some(CatalogValue::Text(s)) => s.trim().parse().map_err(|_| {
            Error::InvalidState(format!("Expected integer catalog value, got '{}'", s))
        }),
        Some(other) => Err(Error::InvalidState(format!(
            "Expected integer catalog value, got {:?}",
            other
        ))),
        None => Err(Error::InvalidState(
            "Expected integer catalog value, got NULL".to_string(),
        )),
    }
}

/// Text spellings the catalog and drivers use for true.
pub(crate) fn parse_bool_text(text: &str) -> bool {
    matches!(
        text.trim().to_ascii_lowercase().as_str(),
        "t" | "true" | "y" | "yes" | "1"
    )
}

/// First cell of the first row.
pub fn parse_scalar(result: ExecuteResult) -> Result<Option<CatalogValue>> {
    let mut reader = result.reader;
    while let Some(batch) = reader.next_batch()? {
        if batch.num_rows() > 0 && batch.num_columns() > 0 {
            return get_value(&batch, 0, 0);
        }
    }
    Ok(None)
}

/// Values of one named column, NULLs skipped.
pub fn parse_names(result: ExecuteResult, column: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let idx = column_index(&batch, column)?;
        for row in 0..batch.num_rows() {
            if let Some(name) = get_optional_string_value(&batch, idx, row)? {
                names.push(name);
            }
        }
    }
    Ok(names)
}

/// Parse `table_schema, table_name` rows.
pub fn parse_qualified_names(result: ExecuteResult) -> Result<Vec<QualifiedName>> {
    let mut names = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let schema_idx = column_index(&batch, "table_schema")?;
        let name_idx = column_index(&batch, "table_name")?;
        for row in 0..batch.num_rows() {
            names.push(QualifiedName {
                schema_name: get_string_value(&batch, schema_idx, row)?,
                name: get_string_value(&batch, name_idx, row)?,
            });
        }
    }
    Ok(names)
}

/// Parse rows of the column union query.
/// Result columns: `column_name`, `data_type`, `column_default`,
/// `is_nullable`, `is_identity`.
pub fn parse_column_rows(result: ExecuteResult) -> Result<Vec<ColumnRow>> {
    let mut columns = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let name_idx = column_index(&batch, "column_name")?;
        let type_idx = column_index(&batch, "data_type")?;
        let default_idx = column_index(&batch, "column_default")?;
        let nullable_idx = column_index(&batch, "is_nullable")?;
        let identity_idx = column_index(&batch, "is_identity")?;

        for row in 0..batch.num_rows() {
            columns.push(ColumnRow {
                column_name: get_string_value(&batch, name_idx, row)?,
                data_type: get_string_value(&batch, type_idx, row)?,
                column_default: get_optional_string_value(&batch, default_idx, row)?
                    .filter(|d| !d.is_empty()),
                is_nullable: get_bool_value(&batch, nullable_idx, row)?,
                is_identity: get_bool_value(&batch, identity_idx, row)?,
            });
        }
    }
    Ok(columns)
}

/// Parse the first row of the identity-sequence query.
/// Result columns: `name`, `start`, `increment`.
pub fn parse_sequence(result: ExecuteResult) -> Result<Option<SequenceInfo>> {
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        if batch.num_rows() == 0 {
            continue;
        }
        let name_idx = column_index(&batch, "name")?;
        let start_idx = column_index(&batch, "start")?;
        let increment_idx = column_index(&batch, "increment")?;
        return Ok(Some(SequenceInfo {
            name: get_string_value(&batch, name_idx, 0)?,
            start: get_int64_value(&batch, start_idx, 0)?,
            increment: get_int64_value(&batch, increment_idx, 0)?,
        }));
    }
    Ok(None)
}

/// Parse `v_catalog.constraint_columns` rows.
pub fn parse_constraint_columns(result: ExecuteResult) -> Result<Vec<ConstraintColumnRow>> {
    let mut rows = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let name_idx = column_index(&batch, "constraint_name")?;
        let column_idx = column_index(&batch, "column_name")?;
        for row in 0..batch.num_rows() {
            rows.push(ConstraintColumnRow {
                constraint_name: get_string_value(&batch, name_idx, row)?,
                column_name: get_string_value(&batch, column_idx, row)?,
            });
        }
    }
    Ok(rows)
}

/// Parse check constraints, stripping the catalog's surrounding quote
/// characters from each predicate.
/// Result columns: `name`, `src`.
pub fn parse_check_constraints(result: ExecuteResult) -> Result<Vec<CheckConstraint>> {
    let mut checks = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let name_idx = column_index(&batch, "name")?;
        let src_idx = column_index(&batch, "src")?;
        for row in 0..batch.num_rows() {
            let src = get_string_value(&batch, src_idx, row)?;
            checks.push(CheckConstraint {
                name: get_string_value(&batch, name_idx, row)?,
                sqltext: strip_outer_chars(&src),
            });
        }
    }
    Ok(checks)
}

/// Drop the first and last character. Shorter inputs become empty.
pub fn strip_outer_chars(text: &str) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

/// Group unique-constraint rows by name, in first-seen order.
pub fn group_unique_constraints(rows: Vec<ConstraintColumnRow>) -> Vec<UniqueConstraint> {
    let mut constraints: Vec<UniqueConstraint> = Vec::new();
    for row in rows {
        match constraints
            .iter_mut()
            .find(|c| c.name == row.constraint_name)
        {
            Some(existing) => existing.column_names.push(row.column_name),
            None => constraints.push(UniqueConstraint {
                name: row.constraint_name,
                column_names: vec![row.column_name],
            }),
        }
    }
    constraints
}

/// Fold primary-key rows into one constraint: the first name seen and the
/// union of columns.
pub fn build_primary_key(rows: Vec<ConstraintColumnRow>) -> PrimaryKeyConstraint {
    let mut pk = PrimaryKeyConstraint::default();
    for row in rows {
        if pk.name.is_none() && !row.constraint_name.is_empty() {
            pk.name = Some(row.constraint_name);
        }
        if !pk.constrained_columns.contains(&row.column_name) {
            pk.constrained_columns.push(row.column_name);
        }
    }
    pk
}
