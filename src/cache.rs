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

//! Reflection cache.
//!
//! [`CachedDialect`] memoises listing and per-table reflection results per
//! (connection, table, schema) so an inspector that asks for the same table
//! several times issues its catalog queries once. Connections are told
//! apart by address; a host that drops a connection and opens another
//! should call [`CachedDialect::clear`], as it should after DDL.

use crate::connection::CatalogConnection;
use crate::dialect::{Dialect, ServerInfo};
use crate::error::{Error, Result};
use crate::metadata::{
    CheckConstraint, ColumnInfo, IndexInfo, PrimaryKeyConstraint, TableComment, UniqueConstraint,
};
use crate::url::{ConnectArgs, ConnectUrl};
use dashmap::DashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Operation {
    SchemaNames,
    TableNames,
    ViewNames,
    TableComment,
    Columns,
    PrimaryKey,
    UniqueConstraints,
    CheckConstraints,
}

/// Address of the connection object, used only as an identity.
fn connection_id(conn: &dyn CatalogConnection) -> usize {
    conn as *const dyn CatalogConnection as *const () as usize
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    connection: usize,
    operation: Operation,
    table: Option<String>,
    schema: Option<String>,
}

impl CacheKey {
    fn new(
        conn: &dyn CatalogConnection,
        operation: Operation,
        table: Option<&str>,
        schema: Option<&str>,
    ) -> Self {
        Self {
            connection: connection_id(conn),
            operation,
            table: table.map(str::to_string),
            schema: schema.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
enum Reflected {
    Names(Vec<String>),
    Comment(TableComment),
    Columns(Vec<ColumnInfo>),
    PrimaryKey(PrimaryKeyConstraint),
    Unique(Vec<UniqueConstraint>),
    Check(Vec<CheckConstraint>),
}

/// A [`Dialect`] wrapper that caches reflection results.
///
/// Failed calls are not cached. Existence checks and version queries always
/// go to the server.
#[derive(Debug)]
pub struct CachedDialect<D> {
    inner: D,
    entries: DashMap<CacheKey, Reflected>,
}

impl<D: Dialect> CachedDialect<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached result.
    pub fn clear(&self) {
        self.entries.clear();
    }

    fn memoize<T: Clone>(
        &self,
        key: CacheKey,
        extract: fn(&Reflected) -> Option<&T>,
        wrap: fn(T) -> Reflected,
        fetch: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        if let Some(entry) = self.entries.get(&key) {
            if let Some(value) = extract(entry.value()) {
                trace!("Reflection cache hit: {:?}", key);
                return Ok(value.clone());
            }
        }
        let value = fetch()?;
        self.entries.insert(key, wrap(value.clone()));
        Ok(value)
    }
}

impl<D: Dialect> Dialect for CachedDialect<D> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn driver(&self) -> &str {
        self.inner.driver()
    }

    fn supports_unicode_statements(&self) -> bool {
        self.inner.supports_unicode_statements()
    }

    fn supports_unicode_binds(&self) -> bool {
        self.inner.supports_unicode_binds()
    }

    fn supports_native_decimal(&self) -> bool {
        self.inner.supports_native_decimal()
    }

    fn create_connect_args(&self, url: &ConnectUrl) -> ConnectArgs {
        self.inner.create_connect_args(url)
    }

    fn is_disconnect(&self, err: &Error, connection: Option<&dyn CatalogConnection>) -> bool {
        self.inner.is_disconnect(err, connection)
    }

    fn initialize(&self, conn: &dyn CatalogConnection) -> Result<ServerInfo> {
        self.inner.initialize(conn)
    }

    fn server_version_info(&self, conn: &dyn CatalogConnection) -> Result<(u32, u32, u32)> {
        self.inner.server_version_info(conn)
    }

    fn default_schema_name(&self, conn: &dyn CatalogConnection) -> Result<String> {
        self.inner.default_schema_name(conn)
    }

    fn has_schema(&self, conn: &dyn CatalogConnection, schema: &str) -> Result<bool> {
        self.inner.has_schema(conn, schema)
    }

    fn has_table(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        self.inner.has_table(conn, table, schema)
    }

    fn has_sequence(
        &self,
        conn: &dyn CatalogConnection,
        sequence: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        self.inner.has_sequence(conn, sequence, schema)
    }

    fn has_type(
        &self,
        conn: &dyn CatalogConnection,
        type_name: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        self.inner.has_type(conn, type_name, schema)
    }

    fn get_schema_names(&self, conn: &dyn CatalogConnection) -> Result<Vec<String>> {
        self.memoize(
            CacheKey::new(conn, Operation::SchemaNames, None, None),
            |r| match r {
                Reflected::Names(v) => Some(v),
                _ => None,
            },
            Reflected::Names,
            || self.inner.get_schema_names(conn),
        )
    }

    fn get_table_names(
        &self,
        conn: &dyn CatalogConnection,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        self.memoize(
            CacheKey::new(conn, Operation::TableNames, None, schema),
            |r| match r {
                Reflected::Names(v) => Some(v),
                _ => None,
            },
            Reflected::Names,
            || self.inner.get_table_names(conn, schema),
        )
    }

    fn get_view_names(
        &self,
        conn: &dyn CatalogConnection,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        self.memoize(
            CacheKey::new(conn, Operation::ViewNames, None, schema),
            |r| match r {
                Reflected::Names(v) => Some(v),
                _ => None,
            },
            Reflected::Names,
            || self.inner.get_view_names(conn, schema),
        )
    }

    fn get_table_comment(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<TableComment> {
        self.memoize(
            CacheKey::new(conn, Operation::TableComment, Some(table), schema),
            |r| match r {
                Reflected::Comment(c) => Some(c),
                _ => None,
            },
            Reflected::Comment,
            || self.inner.get_table_comment(conn, table, schema),
        )
    }

    fn get_columns(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnInfo>> {
        self.memoize(
            CacheKey::new(conn, Operation::Columns, Some(table), schema),
            |r| match r {
                Reflected::Columns(c) => Some(c),
                _ => None,
            },
            Reflected::Columns,
            || self.inner.get_columns(conn, table, schema),
        )
    }

    fn get_pk_constraint(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<PrimaryKeyConstraint> {
        self.memoize(
            CacheKey::new(conn, Operation::PrimaryKey, Some(table), schema),
            |r| match r {
                Reflected::PrimaryKey(pk) => Some(pk),
                _ => None,
            },
            Reflected::PrimaryKey,
            || self.inner.get_pk_constraint(conn, table, schema),
        )
    }

    fn get_unique_constraints(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<UniqueConstraint>> {
        self.memoize(
            CacheKey::new(conn, Operation::UniqueConstraints, Some(table), schema),
            |r| match r {
                Reflected::Unique(u) => Some(u),
                _ => None,
            },
            Reflected::Unique,
            || self.inner.get_unique_constraints(conn, table, schema),
        )
    }

    fn get_check_constraints(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<CheckConstraint>> {
        self.memoize(
            CacheKey::new(conn, Operation::CheckConstraints, Some(table), schema),
            |r| match r {
                Reflected::Check(c) => Some(c),
                _ => None,
            },
            Reflected::Check,
            || self.inner.get_check_constraints(conn, table, schema),
        )
    }

    fn get_column_specification(&self, column: &ColumnInfo) -> String {
        self.inner.get_column_specification(column)
    }

    fn visit_create_index(&self, table: &str, index: &IndexInfo) -> Option<String> {
        self.inner.visit_create_index(table, index)
    }
}
