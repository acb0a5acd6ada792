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

//! SQL builder for `v_catalog` reflection queries.
//!
//! Builds the read-only catalog statements behind every reflection call.
//! Schema, table, sequence and type names are always bound as `?`
//! parameters; the SQL text only ever contains fixed view and column names.

use crate::connection::BoundQuery;
use crate::error::{Error, Result};

/// Constraint kinds as stored in `v_catalog` `constraint_type` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    Check,
}

impl ConstraintKind {
    /// The single-letter catalog code.
    pub fn code(&self) -> &'static str {
        match self {
            ConstraintKind::PrimaryKey => "p",
            ConstraintKind::Unique => "u",
            ConstraintKind::Check => "c",
        }
    }
}

/// Builds catalog queries for reflection.
///
/// Uses the builder pattern to carry the optional schema filter and the
/// table a per-table query targets.
///
/// # Examples
///
/// ```ignore
/// let query = CatalogQueryBuilder::new()
///     .with_schema(Some("public"))
///     .build_table_names();
/// assert_eq!(
///     query.sql,
///     "SELECT table_schema, table_name FROM v_catalog.tables WHERE table_schema = ? ORDER BY table_schema, table_name"
/// );
/// assert_eq!(query.params, vec!["public"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogQueryBuilder {
    schema: Option<String>,
    table: Option<String>,
}

impl CatalogQueryBuilder {
    /// Create a new builder with no filters set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema filter. `None` and empty strings mean "all schemas".
    pub fn with_schema(mut self, schema: Option<&str>) -> Self {
        self.schema = schema.filter(|s| !s.is_empty()).map(|s| s.to_string());
        self
    }

    /// Set the table a per-table query targets.
    pub fn with_table(mut self, table: &str) -> Self {
        self.table = Some(table.to_string());
        self
    }

    /// `SELECT version()`.
    pub fn build_version() -> BoundQuery {
        BoundQuery::new("SELECT version()")
    }

    /// `SELECT current_schema()`.
    pub fn build_current_schema() -> BoundQuery {
        BoundQuery::new("SELECT current_schema()")
    }

    pub fn build_has_schema(schema: &str) -> BoundQuery {
        BoundQuery::new(
            "SELECT EXISTS (SELECT schema_name FROM v_catalog.schemata WHERE schema_name = ?)",
        )
        .bind(schema)
    }

    pub fn build_has_table(schema: &str, table: &str) -> BoundQuery {
        BoundQuery::new(
            "SELECT EXISTS (SELECT table_name FROM v_catalog.all_tables \
             WHERE schema_name = ? AND table_name = ?)",
        )
        .bind(schema)
        .bind(table)
    }

    pub fn build_has_sequence(schema: &str, sequence: &str) -> BoundQuery {
        BoundQuery::new(
            "SELECT EXISTS (SELECT sequence_name FROM v_catalog.sequences \
             WHERE sequence_schema = ? AND sequence_name = ?)",
        )
        .bind(schema)
        .bind(sequence)
    }

    pub fn build_has_type(type_name: &str) -> BoundQuery {
        BoundQuery::new(
            "SELECT EXISTS (SELECT type_name FROM v_catalog.types WHERE type_name = ?)",
        )
        .bind(type_name)
    }

    /// All schema names. System schemas are filtered by the caller.
    pub fn build_schema_names() -> BoundQuery {
        BoundQuery::new("SELECT schema_name FROM v_catalog.schemata")
    }

    /// Table names, optionally filtered by schema, ordered by schema then name.
    pub fn build_table_names(&self) -> BoundQuery {
        self.build_relation_names("v_catalog.tables")
    }

    /// View names, optionally filtered by schema, ordered by schema then name.
    pub fn build_view_names(&self) -> BoundQuery {
        self.build_relation_names("v_catalog.views")
    }

    fn build_relation_names(&self, view: &str) -> BoundQuery {
        let mut sql = format!("SELECT table_schema, table_name FROM {}", view);
        let mut params = Vec::new();
        if let Some(ref schema) = self.schema {
            sql.push_str(" WHERE table_schema = ?");
            params.push(schema.clone());
        }
        sql.push_str(" ORDER BY table_schema, table_name");
        BoundQuery { sql, params }
    }

    /// Comment attached to the table.
    pub fn build_table_comment(&self) -> Result<BoundQuery> {
        let table = self.require_table("table comment")?;
        let mut query = BoundQuery::new(
            "SELECT comment FROM v_catalog.comments \
             WHERE object_type = 'TABLE' AND object_name = ?",
        )
        .bind(table);
        self.push_schema(&mut query, "object_schema");
        Ok(query)
    }

    /// Primary-key column names from `v_catalog.primary_keys`.
    pub fn build_primary_key_columns(&self) -> Result<BoundQuery> {
        let table = self.require_table("primary key columns")?;
        let mut query = BoundQuery::new(
            "SELECT column_name FROM v_catalog.primary_keys \
             WHERE table_name = ? AND constraint_type = 'p'",
        )
        .bind(table);
        self.push_schema(&mut query, "table_schema");
        Ok(query)
    }

    /// Table columns and view columns as one result.
    ///
    /// View rows carry an empty default, nullable true and identity false
    /// since the catalog does not track those for views.
    pub fn build_columns(&self) -> Result<BoundQuery> {
        let table = self.require_table("columns")?.to_string();
        let schema_clause = if self.schema.is_some() {
            " AND table_schema = ?"
        } else {
            ""
        };

        let sql = format!(
            "SELECT column_name, data_type, column_default, is_nullable, is_identity, ordinal_position \
             FROM v_catalog.columns WHERE table_name = ?{schema_clause} \
             UNION \
             SELECT column_name, data_type, '' AS column_default, true AS is_nullable, false AS is_identity, ordinal_position \
             FROM v_catalog.view_columns WHERE table_name = ?{schema_clause} \
             ORDER BY ordinal_position"
        );

        let mut params = vec![table.clone()];
        params.extend(self.schema.clone());
        params.push(table);
        params.extend(self.schema.clone());

        Ok(BoundQuery { sql, params })
    }

    /// The identity sequence owned by the table.
    pub fn build_identity_sequence(&self) -> Result<BoundQuery> {
        let table = self.require_table("identity sequence")?;
        let mut query = BoundQuery::new(
            "SELECT sequence_name AS name, minimum AS start, increment_by AS increment \
             FROM v_catalog.sequences WHERE identity_table_name = ?",
        )
        .bind(table);
        self.push_schema(&mut query, "sequence_schema");
        Ok(query)
    }

    /// Constraint-to-column linkage for one constraint kind.
    pub fn build_constraint_columns(&self, kind: ConstraintKind) -> Result<BoundQuery> {
        let table = self.require_table("constraint columns")?;
        let mut query = BoundQuery::new(format!(
            "SELECT constraint_id, constraint_name, column_name \
             FROM v_catalog.constraint_columns \
             WHERE table_name = ? AND constraint_type = '{}'",
            kind.code()
        ))
        .bind(table);
        self.push_schema(&mut query, "table_schema");
        Ok(query)
    }

    /// Check constraints, matched to the table through its `table_id`.
    ///
    /// Without a schema the table name may match in several schemas, so the
    /// subquery is a set membership test.
    pub fn build_check_constraints(&self) -> Result<BoundQuery> {
        let table = self.require_table("check constraints")?;
        let schema_clause = if self.schema.is_some() {
            " AND i.table_schema = ?"
        } else {
            ""
        };
        let sql = format!(
            "SELECT cons.constraint_name AS name, cons.predicate AS src \
             FROM v_catalog.table_constraints cons \
             WHERE cons.constraint_type = '{}' \
             AND cons.table_id IN (SELECT i.table_id FROM v_catalog.tables i \
             WHERE i.table_name = ?{schema_clause})",
            ConstraintKind::Check.code()
        );
        let mut params = vec![table.to_string()];
        params.extend(self.schema.clone());
        Ok(BoundQuery { sql, params })
    }

    fn require_table(&self, what: &str) -> Result<&str> {
        self.table
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::InvalidArgument(format!("table name is required for {}", what)))
    }

    fn push_schema(&self, query: &mut BoundQuery, column: &str) {
        if let Some(ref schema) = self.schema {
            query.sql.push_str(&format!(" AND {} = ?", column));
            query.params.push(schema.clone());
        }
    }
}
