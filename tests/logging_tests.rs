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

//! Log file output.
//!
//! Logging is installed once per process, so this binary holds a single test.

use adbc_core::options::{OptionDatabase, OptionValue};
use adbc_core::Optionable;
use vertica_dialect::{
    BoundQuery, CatalogConnection, Dialect, DialectOptions, ExecuteResult, Result, VerticaDialect,
};

struct EmptyConnection;

impl CatalogConnection for EmptyConnection {
    fn execute(&self, _query: &BoundQuery) -> Result<ExecuteResult> {
        Ok(ExecuteResult::empty())
    }

    fn is_closed(&self) -> bool {
        false
    }
}

#[test]
fn test_catalog_queries_are_logged_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vertica.log");

    let mut options = DialectOptions::new();
    options
        .set_option(
            OptionDatabase::Other("vertica.log_level".into()),
            OptionValue::String("DEBUG".into()),
        )
        .unwrap();
    options
        .set_option(
            OptionDatabase::Other("vertica.log_file".into()),
            OptionValue::String(path.to_string_lossy().into_owned()),
        )
        .unwrap();
    let dialect = VerticaDialect::from_options(options);

    assert!(!dialect.has_schema(&EmptyConnection, "public").unwrap());

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("Executing catalog query"));
    assert!(contents.contains("v_catalog.schemata"));
    assert!(contents.contains("public"));
}
