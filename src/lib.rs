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

//! Vertica dialect for Rust SQL toolkits
//!
//! This crate teaches a generic SQL toolkit how to talk to Vertica: how to
//! turn a connection URL into driver arguments, how to recognise a dropped
//! connection, how to reflect schemas through `v_catalog`, how to map
//! Vertica type names to portable types and how to render identity columns
//! in DDL.
//!
//! ## Overview
//!
//! - [`Dialect`] - The capability set a host toolkit drives
//! - [`VerticaDialect`] - The Vertica implementation
//! - [`CachedDialect`] - Memoises reflection results per connection
//! - [`CatalogConnection`] - The connection surface the host supplies
//! - [`NativeDriver`] - Opens connections from [`ConnectArgs`]
//!
//! The dialect never owns a connection. Each reflection call borrows one,
//! runs read-only catalog queries with every user value bound as a `?`
//! parameter, and returns freshly built records.
//!
//! ## Example
//!
//! ```ignore
//! use vertica_dialect::{Dialect, DialectOptions, VerticaDialect};
//! use adbc_core::options::{OptionDatabase, OptionValue};
//! use adbc_core::Optionable;
//!
//! let mut options = DialectOptions::new();
//! options.set_option(
//!     OptionDatabase::Uri,
//!     OptionValue::String("vertica+vertica_python://dbadmin@localhost:5433/VMart".into()),
//! )?;
//! let dialect = VerticaDialect::from_options(options);
//!
//! let conn = dialect.connect(&my_driver)?;
//! let info = dialect.initialize(&conn)?;
//! for table in dialect.get_table_names(&conn, Some("public"))? {
//!     let columns = dialect.get_columns(&conn, &table, Some("public"))?;
//! }
//! ```
//!
//! ## Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `uri` | | Connection URL |
//! | `username` / `password` | | Override URL credentials |
//! | `vertica.default_schema` | `current_schema()` | Schema used when a call omits one |
//! | `vertica.system_schema_prefix` | `v_` | Hidden from schema listings |
//! | `vertica.skip_unknown_types` | false | Skip unknown-type columns with a warning |
//! | `vertica.log_level` | `RUST_LOG` or `warn` | `tracing` level, `OFF` disables |
//! | `vertica.log_file` | stderr | Log destination |

pub mod cache;
pub mod connection;
pub mod ddl;
pub mod dialect;
pub mod driver;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod options;
pub mod reader;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use cache::CachedDialect;
pub use connection::{BoundQuery, CatalogConnection, CatalogValue};
pub use dialect::{Dialect, ServerInfo, VerticaDialect};
pub use driver::NativeDriver;
pub use error::{Error, Result};
pub use options::DialectOptions;
pub use reader::{BatchReader, ExecuteResult, ResultReader};
pub use url::{ConnectArgs, ConnectUrl};

pub use metadata::{
    CheckConstraint, ColumnInfo, ForeignKeyInfo, IndexInfo, PrimaryKeyConstraint, SequenceInfo,
    SqlType, TableComment, UniqueConstraint,
};
