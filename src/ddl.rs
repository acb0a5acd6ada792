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

//! DDL rendering hooks.
//!
//! Vertica spells auto-increment as `IDENTITY(start, increment)` in place of
//! the column type, so column specifications are rendered here rather than
//! by a generic compiler.

use crate::metadata::{ColumnInfo, SqlType};

/// Quote an identifier, doubling embedded double quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render one column for CREATE TABLE.
///
/// An auto-increment integer column becomes `IDENTITY(start, increment)`,
/// taking both from its sequence or 1 and 1. Identity columns never carry a
/// DEFAULT or NOT NULL clause.
pub fn column_specification(column: &ColumnInfo) -> String {
    let mut spec = quote_identifier(&column.name);

    if column.autoincrement && column.sql_type == SqlType::Integer {
        let (start, increment) = column
            .sequence
            .as_ref()
            .map(|s| (s.start, s.increment))
            .unwrap_or((1, 1));
        spec.push_str(&format!(" IDENTITY({}, {})", start, increment));
        return spec;
    }

    spec.push(' ');
    spec.push_str(&column.sql_type.to_sql());
    if let Some(ref default) = column.default {
        spec.push_str(" DEFAULT ");
        spec.push_str(default);
    }
    if !column.nullable {
        spec.push_str(" NOT NULL");
    }
    spec
}
