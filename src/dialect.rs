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

//! The dialect capability set and its Vertica implementation.
//!
//! A host toolkit drives everything through [`Dialect`]: it shapes connect
//! arguments, classifies driver errors, reflects schema objects and renders
//! DDL without knowing which database sits behind the trait object.

use crate::connection::CatalogConnection;
use crate::ddl;
use crate::driver::NativeDriver;
use crate::error::{Error, Result};
use crate::logging::init_logging;
use crate::metadata::parse::build_primary_key;
use crate::metadata::parse::group_unique_constraints;
use crate::metadata::type_mapping::{resolve_type, SqlType};
use crate::metadata::{
    CheckConstraint, ColumnInfo, ConstraintKind, ForeignKeyInfo, IndexInfo, MetadataService,
    PrimaryKeyConstraint, SequenceInfo, TableComment, UniqueConstraint,
};
use crate::options::DialectOptions;
use crate::url::{create_connect_args, ConnectArgs, ConnectUrl};
use arrow_schema::{Field, Schema};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

/// What [`Dialect::initialize`] learns about the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// `(major, minor, patch)` from the version banner.
    pub version: (u32, u32, u32),
    /// Schema used when a reflection call omits one.
    pub default_schema: String,
    /// Whether INSERT .. RETURNING may be used. Always false on Vertica.
    pub implicit_returning: bool,
}

/// Capabilities a SQL toolkit needs from a database dialect.
///
/// Every method is synchronous and stateless apart from configuration: the
/// caller owns the connection and any caching.
pub trait Dialect {
    /// Dialect name as used in connection URLs.
    fn name(&self) -> &str;

    /// Native driver name.
    fn driver(&self) -> &str;

    fn supports_unicode_statements(&self) -> bool {
        true
    }

    fn supports_unicode_binds(&self) -> bool {
        true
    }

    fn supports_native_decimal(&self) -> bool {
        true
    }

    /// Shape driver connect arguments from a parsed URL.
    fn create_connect_args(&self, url: &ConnectUrl) -> ConnectArgs;

    /// Whether `err` means the connection is gone and should be recycled.
    fn is_disconnect(&self, err: &Error, connection: Option<&dyn CatalogConnection>) -> bool;

    /// First-connect hook: server version and default schema.
    fn initialize(&self, conn: &dyn CatalogConnection) -> Result<ServerInfo>;

    fn server_version_info(&self, conn: &dyn CatalogConnection) -> Result<(u32, u32, u32)>;

    fn default_schema_name(&self, conn: &dyn CatalogConnection) -> Result<String>;

    fn has_schema(&self, conn: &dyn CatalogConnection, schema: &str) -> Result<bool>;

    fn has_table(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<bool>;

    fn has_sequence(
        &self,
        conn: &dyn CatalogConnection,
        sequence: &str,
        schema: Option<&str>,
    ) -> Result<bool>;

    fn has_type(
        &self,
        conn: &dyn CatalogConnection,
        type_name: &str,
        schema: Option<&str>,
    ) -> Result<bool>;

    fn get_schema_names(&self, conn: &dyn CatalogConnection) -> Result<Vec<String>>;

    /// Table names ordered by schema, then name.
    fn get_table_names(
        &self,
        conn: &dyn CatalogConnection,
        schema: Option<&str>,
    ) -> Result<Vec<String>>;

    /// View names ordered by schema, then name.
    fn get_view_names(
        &self,
        conn: &dyn CatalogConnection,
        schema: Option<&str>,
    ) -> Result<Vec<String>>;

    fn get_table_comment(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<TableComment>;

    fn get_columns(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnInfo>>;

    fn get_pk_constraint(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<PrimaryKeyConstraint>;

    fn get_unique_constraints(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<UniqueConstraint>>;

    fn get_check_constraints(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<CheckConstraint>>;

    fn get_foreign_keys(
        &self,
        _conn: &dyn CatalogConnection,
        _table: &str,
        _schema: Option<&str>,
    ) -> Result<Vec<ForeignKeyInfo>> {
        Ok(Vec::new())
    }

    fn get_indexes(
        &self,
        _conn: &dyn CatalogConnection,
        _table: &str,
        _schema: Option<&str>,
    ) -> Result<Vec<IndexInfo>> {
        Ok(Vec::new())
    }

    /// Arrow schema of a table or view, built from [`Dialect::get_columns`].
    fn get_table_schema(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Schema> {
        let fields: Vec<Field> = self
            .get_columns(conn, table, schema)?
            .iter()
            .map(|c| Field::new(&c.name, c.sql_type.to_arrow(), c.nullable))
            .collect();
        Ok(Schema::new(fields))
    }

    /// Map a catalog type signature to the portable type.
    fn resolve_type(&self, raw: &str) -> Result<SqlType> {
        resolve_type(raw)
    }

    /// DDL for one column inside CREATE TABLE.
    fn get_column_specification(&self, column: &ColumnInfo) -> String;

    /// DDL for CREATE INDEX, or `None` when the database has no indexes.
    fn visit_create_index(&self, table: &str, index: &IndexInfo) -> Option<String>;
}

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:Vertica Analytic|OpenText.*Analytics) Database v(\d+)\.(\d+)\.(\d+)")
            .expect("version pattern is a valid regex")
    })
}

/// Parse `(major, minor, patch)` out of a `SELECT version()` banner.
pub fn parse_server_version(banner: &str) -> Result<(u32, u32, u32)> {
    let captures = version_pattern()
        .captures(banner)
        .ok_or_else(|| Error::Version(banner.to_string()))?;
    let part = |idx: usize| -> Result<u32> {
        captures
            .get(idx)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| Error::Version(banner.to_string()))
    };
    Ok((part(1)?, part(2)?, part(3)?))
}

/// The Vertica dialect.
#[derive(Debug, Clone, Default)]
pub struct VerticaDialect {
    options: DialectOptions,
}

impl VerticaDialect {
    pub const NAME: &'static str = "vertica";
    pub const DRIVER: &'static str = "vertica_python";

    /// A dialect with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from options, initialising logging on first use.
    pub fn from_options(options: DialectOptions) -> Self {
        init_logging(options.log_config());
        Self { options }
    }

    pub fn options(&self) -> &DialectOptions {
        &self.options
    }

    /// Open a connection through `driver` using the configured URI.
    pub fn connect<D: NativeDriver>(&self, driver: &D) -> Result<D::Connection> {
        let args = self.options.connect_args()?;
        debug!(
            "Connecting via {} to host {:?}",
            driver.name(),
            args.get_str("host")
        );
        driver.connect(&args)
    }

    fn resolve_schema(&self, conn: &dyn CatalogConnection, schema: Option<&str>) -> Result<String> {
        match schema.filter(|s| !s.is_empty()) {
            Some(s) => Ok(s.to_string()),
            None => self.default_schema_name(conn),
        }
    }
}

impl Dialect for VerticaDialect {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn driver(&self) -> &str {
        Self::DRIVER
    }

    fn create_connect_args(&self, url: &ConnectUrl) -> ConnectArgs {
        create_connect_args(url)
    }

    fn is_disconnect(&self, err: &Error, connection: Option<&dyn CatalogConnection>) -> bool {
        err.is_driver_error() && connection.is_some_and(|c| c.is_closed())
    }

    fn initialize(&self, conn: &dyn CatalogConnection) -> Result<ServerInfo> {
        let version = self.server_version_info(conn)?;
        let default_schema = self.default_schema_name(conn)?;
        info!(
            "Connected to Vertica {}.{}.{}, default schema '{}'",
            version.0, version.1, version.2, default_schema
        );
        Ok(ServerInfo {
            version,
            default_schema,
            implicit_returning: false,
        })
    }

    fn server_version_info(&self, conn: &dyn CatalogConnection) -> Result<(u32, u32, u32)> {
        let banner = MetadataService::new(conn).server_version()?;
        parse_server_version(&banner)
    }

    fn default_schema_name(&self, conn: &dyn CatalogConnection) -> Result<String> {
        match self.options.default_schema() {
            Some(schema) => Ok(schema.to_string()),
            None => MetadataService::new(conn).current_schema(),
        }
    }

    fn has_schema(&self, conn: &dyn CatalogConnection, schema: &str) -> Result<bool> {
        MetadataService::new(conn).schema_exists(schema)
    }

    fn has_table(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        let schema = self.resolve_schema(conn, schema)?;
        MetadataService::new(conn).table_exists(&schema, table)
    }

    fn has_sequence(
        &self,
        conn: &dyn CatalogConnection,
        sequence: &str,
        schema: Option<&str>,
    ) -> Result<bool> {
        let schema = self.resolve_schema(conn, schema)?;
        MetadataService::new(conn).sequence_exists(&schema, sequence)
    }

    /// Vertica type names are global, so `schema` is ignored.
    fn has_type(
        &self,
        conn: &dyn CatalogConnection,
        type_name: &str,
        _schema: Option<&str>,
    ) -> Result<bool> {
        MetadataService::new(conn).type_exists(type_name)
    }

    fn get_schema_names(&self, conn: &dyn CatalogConnection) -> Result<Vec<String>> {
        let prefix = self.options.system_schema_prefix();
        Ok(MetadataService::new(conn)
            .list_schema_names()?
            .into_iter()
            .filter(|name| prefix.is_empty() || !name.starts_with(prefix))
            .collect())
    }

    fn get_table_names(
        &self,
        conn: &dyn CatalogConnection,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(MetadataService::new(conn)
            .list_tables(schema)?
            .into_iter()
            .map(|t| t.name)
            .collect())
    }

    fn get_view_names(
        &self,
        conn: &dyn CatalogConnection,
        schema: Option<&str>,
    ) -> Result<Vec<String>> {
        Ok(MetadataService::new(conn)
            .list_views(schema)?
            .into_iter()
            .map(|v| v.name)
            .collect())
    }

    fn get_table_comment(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<TableComment> {
        MetadataService::new(conn).table_comment(table, schema)
    }

    fn get_columns(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<ColumnInfo>> {
        let service = MetadataService::new(conn);
        let pk_columns = service.list_primary_key_column_names(table, schema)?;
        let rows = service.list_column_rows(table, schema)?;

        // The identity lookup is keyed by table only; run it at most once.
        let mut identity: Option<Option<SequenceInfo>> = None;
        let mut columns = Vec::with_capacity(rows.len());

        for row in rows {
            let sql_type = match resolve_type(&row.data_type) {
                Ok(ty) => ty,
                Err(Error::UnknownType { type_name, .. }) if self.options.skip_unknown_types() => {
                    warn!(
                        "Skipping column '{}' of {}: unknown type '{}'",
                        row.column_name, table, type_name
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let sequence = if row.is_identity {
                if identity.is_none() {
                    identity = Some(service.identity_sequence(table, schema)?);
                }
                identity.clone().flatten()
            } else {
                None
            };

            let primary_key = row.is_identity || pk_columns.contains(&row.column_name);
            columns.push(ColumnInfo {
                name: row.column_name,
                sql_type,
                nullable: row.is_nullable,
                default: row.column_default,
                primary_key,
                autoincrement: row.is_identity,
                sequence,
            });
        }

        Ok(columns)
    }

    fn get_pk_constraint(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<PrimaryKeyConstraint> {
        let rows = MetadataService::new(conn).list_constraint_columns(
            table,
            schema,
            ConstraintKind::PrimaryKey,
        )?;
        Ok(build_primary_key(rows))
    }

    fn get_unique_constraints(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<UniqueConstraint>> {
        let rows = MetadataService::new(conn).list_constraint_columns(
            table,
            schema,
            ConstraintKind::Unique,
        )?;
        Ok(group_unique_constraints(rows))
    }

    fn get_check_constraints(
        &self,
        conn: &dyn CatalogConnection,
        table: &str,
        schema: Option<&str>,
    ) -> Result<Vec<CheckConstraint>> {
        MetadataService::new(conn).list_check_constraints(table, schema)
    }

    fn get_column_specification(&self, column: &ColumnInfo) -> String {
        ddl::column_specification(column)
    }

    /// Vertica has no indexes.
    fn visit_create_index(&self, _table: &str, _index: &IndexInfo) -> Option<String> {
        None
    }
}
