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

//! Data structures for reflection results.
//!
//! These are the records the dialect hands back to its caller. Each one is
//! built fresh per introspection call from `v_catalog` rows and never
//! persisted.

use crate::metadata::type_mapping::SqlType;

/// Identity sequence linked to a column through
/// `v_catalog.sequences.identity_table_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceInfo {
    /// The sequence name.
    pub name: String,
    /// First value handed out (`minimum` in the catalog).
    pub start: i64,
    /// Step between values (`increment_by` in the catalog).
    pub increment: i64,
}

/// Column information from `v_catalog.columns` / `v_catalog.view_columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    /// The column name.
    pub name: String,
    /// Resolved portable type.
    pub sql_type: SqlType,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Raw default expression; `None` when the catalog has none.
    pub default: Option<String>,
    /// Part of the primary key, or an identity column.
    pub primary_key: bool,
    /// Set for identity columns.
    pub autoincrement: bool,
    /// The identity sequence, when one could be resolved.
    pub sequence: Option<SequenceInfo>,
}

/// A unique constraint and its columns in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueConstraint {
    pub name: String,
    pub column_names: Vec<String>,
}

/// The table's primary key.
///
/// A table without a primary key reflects as no name and no columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryKeyConstraint {
    pub name: Option<String>,
    pub constrained_columns: Vec<String>,
}

/// A check constraint and its predicate text, catalog quoting removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConstraint {
    pub name: String,
    pub sqltext: String,
}

/// Table comment from `v_catalog.comments`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableComment {
    pub text: Option<String>,
}

/// Foreign key information. Vertica reflection never reports any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyInfo {
    pub name: Option<String>,
    pub constrained_columns: Vec<String>,
    pub referred_schema: Option<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
}

/// Index information. Vertica has no indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexInfo {
    pub name: String,
    pub column_names: Vec<String>,
    pub unique: bool,
}
