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

//! Metadata service for executing catalog queries.
//!
//! This module provides the [`MetadataService`] struct that runs the
//! statements built by [`CatalogQueryBuilder`] on a borrowed connection and
//! parses the Arrow results into rows and reflection records.
//!
//! ## Example
//!
//! ```ignore
//! use vertica_dialect::metadata::MetadataService;
//!
//! let service = MetadataService::new(&conn);
//! let schemas = service.list_schema_names()?;
//! let rows = service.list_column_rows("orders", Some("public"))?;
//! ```

use crate::connection::{BoundQuery, CatalogConnection};
use crate::error::{Error, Result};
use crate::metadata::parse::{self, ColumnRow, ConstraintColumnRow, QualifiedName};
use crate::metadata::sql::{CatalogQueryBuilder, ConstraintKind};
use crate::metadata::types::{CheckConstraint, SequenceInfo, TableComment};
use crate::reader::ExecuteResult;
use tracing::debug;

/// Service for executing catalog queries.
///
/// Borrows the host's connection for the duration of one reflection call.
/// Every statement runs synchronously; failures propagate unchanged.
pub struct MetadataService<'a> {
    connection: &'a dyn CatalogConnection,
}

impl<'a> MetadataService<'a> {
    /// Create a new MetadataService over a borrowed connection.
    pub fn new(connection: &'a dyn CatalogConnection) -> Self {
        Self { connection }
    }

    fn run(&self, query: &BoundQuery) -> Result<ExecuteResult> {
        debug!("Executing catalog query: {}", query);
        self.connection.execute(query)
    }

    fn exists(&self, query: &BoundQuery) -> Result<bool> {
        debug!("Executing catalog query: {}", query);
        Ok(self
            .connection
            .scalar(query)?
            .map(|v| v.as_bool())
            .unwrap_or(false))
    }

    fn scalar_string(&self, query: &BoundQuery) -> Result<Option<String>> {
        debug!("Executing catalog query: {}", query);
        Ok(self.connection.scalar(query)?.map(|v| v.into_string()))
    }

    /// The server's version banner from `SELECT version()`.
    pub fn server_version(&self) -> Result<String> {
        self.scalar_string(&CatalogQueryBuilder::build_version())?
            .ok_or_else(|| Error::InvalidState("SELECT version() returned no rows".to_string()))
    }

    /// The session's current schema.
    pub fn current_schema(&self) -> Result<String> {
        self.scalar_string(&CatalogQueryBuilder::build_current_schema())?
            .ok_or_else(|| {
                Error::InvalidState("SELECT current_schema() returned no rows".to_string())
            })
    }

    pub fn schema_exists(&self, schema: &str) -> Result<bool> {
        self.exists(&CatalogQueryBuilder::build_has_schema(schema))
    }

    pub fn table_exists(&self, schema: &str, table: &str) -> Result<bool> {
        self.exists(&CatalogQueryBuilder::build_has_table(schema, table))
    }

    pub fn sequence_exists(&self, schema: &str, sequence: &str) -> Result<bool> {
        self.exists(&CatalogQueryBuilder::build_has_sequence(schema, sequence))
    }

    pub fn type_exists(&self, type_name: &str) -> Result<bool> {
        self.exists(&CatalogQueryBuilder::build_has_type(type_name))
    }

    /// All schema names, system schemas included.
    pub fn list_schema_names(&self) -> Result<Vec<String>> {
        let result = self.run(&CatalogQueryBuilder::build_schema_names())?;
        let names = parse::parse_names(result, "schema_name")?;
        debug!("Found {} schemas", names.len());
        Ok(names)
    }

    /// Tables, sorted by schema then name.
    pub fn list_tables(&self, schema: Option<&str>) -> Result<Vec<QualifiedName>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .build_table_names();
        let mut tables = parse::parse_qualified_names(self.run(&query)?)?;
        tables.sort();
        debug!("Found {} tables", tables.len());
        Ok(tables)
    }

    /// Views, sorted by schema then name.
    pub fn list_views(&self, schema: Option<&str>) -> Result<Vec<QualifiedName>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .build_view_names();
        let mut views = parse::parse_qualified_names(self.run(&query)?)?;
        views.sort();
        debug!("Found {} views", views.len());
        Ok(views)
    }

    pub fn table_comment(&self, table: &str, schema: Option<&str>) -> Result<TableComment> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .with_table(table)
            .build_table_comment()?;
        Ok(TableComment {
            text: self.scalar_string(&query)?,
        })
    }

    /// Column names that belong to the table's primary key.
    pub fn list_primary_key_column_names(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .with_table(table)
            .build_primary_key_columns()?;
        parse::parse_names(self.run(&query)?, "column_name")
    }

    /// Raw rows of the table/view column union. Runs the query once.
    pub fn list_column_rows(&self, table: &str, schema: Option<&str>) -> Result<Vec<ColumnRow>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .with_table(table)
            .build_columns()?;
        let rows = parse::parse_column_rows(self.run(&query)?)?;
        debug!("Found {} columns for {}", rows.len(), table);
        Ok(rows)
    }

    /// The sequence backing the table's identity column, if any.
    pub fn identity_sequence(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Option<SequenceInfo>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .with_table(table)
            .build_identity_sequence()?;
        parse::parse_sequence(self.run(&query)?)
    }

    pub fn list_constraint_columns(
        &self,
        table: &str,
        schema: Option<&str>,
        kind: ConstraintKind,
    ) -> Result<Vec<ConstraintColumnRow>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .with_table(table)
            .build_constraint_columns(kind)?;
        parse::parse_constraint_columns(self.run(&query)?)
    }

    pub fn list_check_constraints(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<CheckConstraint>> {
        let query = CatalogQueryBuilder::new()
            .with_schema(schema)
            .with_table(table)
            .build_check_constraints()?;
        parse::parse_check_constraints(self.run(&query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bool_batch, names_batch, qualified_batch, MockConnection};

    #[test]
    fn test_server_version_and_current_schema() {
        let conn = MockConnection::new()
            .respond(
                "version()",
                vec![names_batch("version", &["Vertica Analytic Database v12.0.4-0"])],
            )
            .respond("current_schema()", vec![names_batch("current_schema", &["public"])]);
        let service = MetadataService::new(&conn);
        assert_eq!(
            service.server_version().unwrap(),
            "Vertica Analytic Database v12.0.4-0"
        );
        assert_eq!(service.current_schema().unwrap(), "public");
    }

    #[test]
    fn test_server_version_no_rows() {
        let conn = MockConnection::new();
        let err = MetadataService::new(&conn).server_version().unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));
    }

    #[test]
    fn test_exists_queries() {
        let conn = MockConnection::new()
            .respond("v_catalog.schemata", vec![bool_batch(true)])
            .respond("v_catalog.types", vec![names_batch("exists", &["t"])]);
        let service = MetadataService::new(&conn);
        assert!(service.schema_exists("public").unwrap());
        assert!(service.type_exists("geometry").unwrap());
        // no rows reads as false
        assert!(!service.table_exists("public", "missing").unwrap());

        let executed = conn.executed();
        assert_eq!(executed[0].params, vec!["public"]);
        assert_eq!(executed[1].params, vec!["geometry"]);
        assert_eq!(executed[2].params, vec!["public", "missing"]);
    }

    #[test]
    fn test_list_tables_sorts_client_side() {
        let conn = MockConnection::new().respond(
            "v_catalog.tables",
            vec![
                qualified_batch(&[("store", "sales"), ("public", "orders")]),
                qualified_batch(&[("public", "customers")]),
            ],
        );
        let tables = MetadataService::new(&conn).list_tables(None).unwrap();
        let names: Vec<(&str, &str)> = tables
            .iter()
            .map(|t| (t.schema_name.as_str(), t.name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("public", "customers"),
                ("public", "orders"),
                ("store", "sales")
            ]
        );
    }

    #[test]
    fn test_identity_sequence_absent() {
        let conn = MockConnection::new();
        let seq = MetadataService::new(&conn)
            .identity_sequence("orders", Some("public"))
            .unwrap();
        assert_eq!(seq, None);
        assert_eq!(conn.executed()[0].params, vec!["orders", "public"]);
    }

    #[test]
    fn test_per_table_calls_reject_empty_table() {
        let conn = MockConnection::new();
        let service = MetadataService::new(&conn);
        assert!(matches!(
            service.list_column_rows("", None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(conn.executed().is_empty());
    }
}
