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

//! Catalog reflection for the Vertica dialect.
//!
//! ## Module Structure
//!
//! - `sql`: query builder for `v_catalog` views
//! - `service`: runs catalog queries on a borrowed connection
//! - `parse`: Arrow result parsing
//! - `types`: reflection records
//! - `type_mapping`: Vertica type names → [`SqlType`]

pub mod parse;
pub mod service;
pub mod sql;
pub mod type_mapping;
pub mod types;

pub use service::MetadataService;
pub use sql::{CatalogQueryBuilder, ConstraintKind};
pub use type_mapping::{resolve_type, SqlType};
pub use types::{
    CheckConstraint, ColumnInfo, ForeignKeyInfo, IndexInfo, PrimaryKeyConstraint, SequenceInfo,
    TableComment, UniqueConstraint,
};
