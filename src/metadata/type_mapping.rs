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

//! Vertica type → portable type mapping.
//!
//! Maps Vertica type signatures (the `data_type` column of
//! `v_catalog.columns`, e.g. `numeric(10,2)` or `timestamptz`) to
//! [`SqlType`], and [`SqlType`] on to Arrow `DataType` and Vertica DDL.

use crate::error::{Error, Result};
use arrow_schema::{DataType, IntervalUnit, TimeUnit};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Vertica's default NUMERIC precision and scale.
const DEFAULT_NUMERIC_PRECISION: u32 = 37;
const DEFAULT_NUMERIC_SCALE: u32 = 15;

/// Substrings that mark a type as timezone-aware.
const TIMEZONE_MARKERS: [&str; 3] = ["TIMEZONE", "TIME ZONE", "TIMESTAMPTZ"];

/// Portable column type descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    Blob { length: Option<u32> },
    Boolean,
    Char { length: Option<u32> },
    Varchar { length: Option<u32> },
    Date,
    DateTime,
    Time { timezone: bool },
    Timestamp { timezone: bool },
    Interval { precision: Option<u32> },
    Float { precision: Option<u32> },
    Integer,
    Numeric {
        precision: Option<u32>,
        scale: Option<u32>,
    },
}

impl SqlType {
    /// Whether the descriptor takes constructor parameters. Fixed
    /// descriptors ignore any parenthesised arguments in the catalog text.
    pub fn accepts_parameters(&self) -> bool {
        matches!(
            self,
            SqlType::Blob { .. }
                | SqlType::Char { .. }
                | SqlType::Varchar { .. }
                | SqlType::Interval { .. }
                | SqlType::Float { .. }
                | SqlType::Numeric { .. }
        )
    }

    /// The timezone flag, for types that have one.
    pub fn timezone(&self) -> Option<bool> {
        match self {
            SqlType::Time { timezone } | SqlType::Timestamp { timezone } => Some(*timezone),
            _ => None,
        }
    }

    /// Instantiate a mapping-table template with positional parameters and
    /// the timezone flag.
    fn instantiate(self, params: &[u32], timezone: bool) -> SqlType {
        let first = params.first().copied();
        let second = params.get(1).copied();
        match self {
            SqlType::Blob { .. } => SqlType::Blob { length: first },
            SqlType::Char { .. } => SqlType::Char { length: first },
            SqlType::Varchar { .. } => SqlType::Varchar { length: first },
            SqlType::Interval { .. } => SqlType::Interval { precision: first },
            SqlType::Float { .. } => SqlType::Float { precision: first },
            SqlType::Numeric { .. } => SqlType::Numeric {
                precision: first,
                scale: second,
            },
            SqlType::Time { timezone: tz } => SqlType::Time {
                timezone: tz || timezone,
            },
            SqlType::Timestamp { timezone: tz } => SqlType::Timestamp {
                timezone: tz || timezone,
            },
            fixed => fixed,
        }
    }

    /// Render the type as Vertica DDL.
    pub fn to_sql(&self) -> String {
        fn sized(name: &str, size: Option<u32>) -> String {
            match size {
                Some(n) => format!("{}({})", name, n),
                None => name.to_string(),
            }
        }

        match *self {
            SqlType::Blob { length } => sized("VARBINARY", length),
            SqlType::Boolean => "BOOLEAN".to_string(),
            SqlType::Char { length } => sized("CHAR", length),
            SqlType::Varchar { length } => sized("VARCHAR", length),
            SqlType::Date => "DATE".to_string(),
            SqlType::DateTime => "DATETIME".to_string(),
            SqlType::Time { timezone: true } => "TIMETZ".to_string(),
            SqlType::Time { timezone: false } => "TIME".to_string(),
            SqlType::Timestamp { timezone: true } => "TIMESTAMPTZ".to_string(),
            SqlType::Timestamp { timezone: false } => "TIMESTAMP".to_string(),
            SqlType::Interval { .. } => "INTERVAL".to_string(),
            SqlType::Float { precision } => sized("FLOAT", precision),
            SqlType::Integer => "INTEGER".to_string(),
            SqlType::Numeric {
                precision: Some(p),
                scale: Some(s),
            } => format!("NUMERIC({}, {})", p, s),
            SqlType::Numeric { precision, .. } => sized("NUMERIC", precision),
        }
    }

    /// Map to the Arrow type a driver would produce for this column.
    pub fn to_arrow(&self) -> DataType {
        match *self {
            SqlType::Blob { .. } => DataType::Binary,
            SqlType::Boolean => DataType::Boolean,
            SqlType::Char { .. } | SqlType::Varchar { .. } => DataType::Utf8,
            SqlType::Date => DataType::Date32,
            SqlType::DateTime => DataType::Timestamp(TimeUnit::Microsecond, None),
            SqlType::Time { .. } => DataType::Time64(TimeUnit::Microsecond),
            SqlType::Timestamp { timezone: true } => {
                DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
            }
            SqlType::Timestamp { timezone: false } => {
                DataType::Timestamp(TimeUnit::Microsecond, None)
            }
            SqlType::Interval { .. } => DataType::Interval(IntervalUnit::MonthDayNano),
            SqlType::Float { .. } => DataType::Float64,
            SqlType::Integer => DataType::Int64,
            SqlType::Numeric { precision, scale } => {
                let (precision, scale) = match (precision, scale) {
                    (Some(p), s) => (p, s.unwrap_or(0)),
                    (None, _) => (DEFAULT_NUMERIC_PRECISION, DEFAULT_NUMERIC_SCALE),
                };
                let precision = precision.clamp(1, 38);
                DataType::Decimal128(precision as u8, scale.min(precision) as i8)
            }
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Base type name and numeric parameters split out of a catalog signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedType {
    /// Upper-cased, whitespace-normalised base name (`LONG VARCHAR`).
    pub base_name: String,
    /// Up to two parenthesised integer parameters, in order.
    pub params: Vec<u32>,
}

fn type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*([A-Za-z_][A-Za-z0-9_]*(?:\s+[A-Za-z_][A-Za-z0-9_]*)*)\s*(?:\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\))?",
        )
        .expect("type pattern is a valid regex")
    })
}

/// Split a catalog type signature into base name and parameters.
///
/// Parameters that do not fit in a `u32` are dropped rather than rejected.
pub fn parse_type_string(raw: &str) -> Result<ParsedType> {
    let captures = type_pattern()
        .captures(raw)
        .ok_or_else(|| Error::UnparseableType(raw.to_string()))?;

    let base_name = captures
        .get(1)
        .map(|m| {
            m.as_str()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
                .to_uppercase()
        })
        .ok_or_else(|| Error::UnparseableType(raw.to_string()))?;

    let params = [2, 3]
        .iter()
        .filter_map(|group| captures.get(*group))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .collect();

    Ok(ParsedType { base_name, params })
}

/// The fixed Vertica type-name table. `name` must already be upper case.
pub fn lookup_type_name(name: &str) -> Option<SqlType> {
    let ty = match name {
        "BINARY" | "VARBINARY" | "LONG VARBINARY" | "BYTEA" | "RAW" => {
            SqlType::Blob { length: None }
        }
        "BOOLEAN" => SqlType::Boolean,
        "CHAR" => SqlType::Char { length: None },
        "VARCHAR" | "LONG VARCHAR" | "VARCHAR2" | "TEXT" => SqlType::Varchar { length: None },
        "DATE" => SqlType::Date,
        "DATETIME" | "SMALLDATETIME" => SqlType::DateTime,
        "TIME" => SqlType::Time { timezone: false },
        "TIMETZ" | "TIME WITH TIMEZONE" => SqlType::Time { timezone: true },
        "TIMESTAMP" => SqlType::Timestamp { timezone: false },
        "TIMESTAMPTZ" | "TIMESTAMP WITH TIMEZONE" => SqlType::Timestamp { timezone: true },
        "INTERVAL" => SqlType::Interval { precision: None },
        // All the same internal representation
        "FLOAT" | "FLOAT8" | "DOUBLE" | "REAL" => SqlType::Float { precision: None },
        "INT" | "INTEGER" | "INT8" | "BIGINT" | "SMALLINT" | "TINYINT" => SqlType::Integer,
        "NUMERIC" | "DECIMAL" | "NUMBER" | "MONEY" => SqlType::Numeric {
            precision: None,
            scale: None,
        },
        _ => return None,
    };
    Some(ty)
}

/// Resolve a catalog type signature to a [`SqlType`].
///
/// Multi-word names resolve whole; when the whole name is unknown the first
/// word is tried (`INTERVAL DAY TO SECOND` → `INTERVAL`). Unknown names fail
/// with [`Error::UnknownType`].
pub fn resolve_type(raw: &str) -> Result<SqlType> {
    let parsed = parse_type_string(raw)?;

    let template = lookup_type_name(&parsed.base_name)
        .or_else(|| {
            parsed
                .base_name
                .split(' ')
                .next()
                .filter(|word| *word != parsed.base_name)
                .and_then(lookup_type_name)
        })
        .ok_or_else(|| Error::UnknownType {
            type_name: parsed.base_name.clone(),
            raw: raw.to_string(),
        })?;

    // Markers may follow the parameters (`timestamp(6) with time zone`).
    let signature = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    let timezone = TIMEZONE_MARKERS
        .iter()
        .any(|marker| signature.contains(marker));

    let params: &[u32] = if template.accepts_parameters() {
        &parsed.params
    } else {
        &[]
    };

    Ok(template.instantiate(params, timezone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_type_numeric_params() {
        assert_eq!(
            resolve_type("NUMERIC(10,2)").unwrap(),
            SqlType::Numeric {
                precision: Some(10),
                scale: Some(2)
            }
        );
        assert_eq!(
            resolve_type("numeric(37, 15)").unwrap(),
            SqlType::Numeric {
                precision: Some(37),
                scale: Some(15)
            }
        );
        assert_eq!(
            resolve_type("DECIMAL").unwrap(),
            SqlType::Numeric {
                precision: None,
                scale: None
            }
        );
    }

    #[test]
    fn test_resolve_type_lengths() {
        assert_eq!(
            resolve_type("varchar(80)").unwrap(),
            SqlType::Varchar { length: Some(80) }
        );
        assert_eq!(
            resolve_type("char(1)").unwrap(),
            SqlType::Char { length: Some(1) }
        );
        assert_eq!(
            resolve_type("long varchar(1048576)").unwrap(),
            SqlType::Varchar {
                length: Some(1048576)
            }
        );
        assert_eq!(
            resolve_type("varbinary(255)").unwrap(),
            SqlType::Blob { length: Some(255) }
        );
        assert_eq!(
            resolve_type("float(53)").unwrap(),
            SqlType::Float {
                precision: Some(53)
            }
        );
    }

    #[test]
    fn test_resolve_type_fixed_types_ignore_params() {
        assert_eq!(resolve_type("int").unwrap(), SqlType::Integer);
        assert_eq!(resolve_type("date").unwrap(), SqlType::Date);
        assert_eq!(
            resolve_type("timestamp(6)").unwrap(),
            SqlType::Timestamp { timezone: false }
        );
        assert_eq!(resolve_type("boolean").unwrap(), SqlType::Boolean);
    }

    #[test]
    fn test_resolve_type_timezone_flag() {
        assert_eq!(
            resolve_type("timestamptz").unwrap().timezone(),
            Some(true)
        );
        assert_eq!(
            resolve_type("TIMESTAMP WITH TIMEZONE").unwrap().timezone(),
            Some(true)
        );
        assert_eq!(
            resolve_type("time with  timezone").unwrap().timezone(),
            Some(true)
        );
        assert_eq!(resolve_type("timetz(6)").unwrap().timezone(), Some(true));
        assert_eq!(
            resolve_type("timestamp(6) with time zone").unwrap(),
            SqlType::Timestamp { timezone: true }
        );
        assert_eq!(
            resolve_type("time(3) with   time zone").unwrap(),
            SqlType::Time { timezone: true }
        );
        assert_eq!(
            resolve_type("timestamp(6)").unwrap(),
            SqlType::Timestamp { timezone: false }
        );
        assert_eq!(resolve_type("timestamp").unwrap().timezone(), Some(false));
        assert_eq!(resolve_type("time").unwrap().timezone(), Some(false));
        assert_eq!(resolve_type("varchar(10)").unwrap().timezone(), None);
    }

    #[test]
    fn test_resolve_type_first_word_fallback() {
        assert_eq!(
            resolve_type("interval day to second(6)").unwrap(),
            SqlType::Interval { precision: Some(6) }
        );
        assert_eq!(
            resolve_type("Interval Year To Month").unwrap(),
            SqlType::Interval { precision: None }
        );
    }

    #[test]
    fn test_resolve_type_unknown_is_lookup_error() {
        let err = resolve_type("geometry(1000)").unwrap_err();
        match err {
            Error::UnknownType { type_name, raw } => {
                assert_eq!(type_name, "GEOMETRY");
                assert_eq!(raw, "geometry(1000)");
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }
        assert!(matches!(
            resolve_type("uuid"),
            Err(Error::UnknownType { .. })
        ));
    }

    #[test]
    fn test_resolve_type_unparseable() {
        assert!(matches!(resolve_type(""), Err(Error::UnparseableType(_))));
        assert!(matches!(
            resolve_type("(10,2)"),
            Err(Error::UnparseableType(_))
        ));
    }

    #[test]
    fn test_parse_type_string() {
        assert_eq!(
            parse_type_string("  Long  Varbinary(130000)").unwrap(),
            ParsedType {
                base_name: "LONG VARBINARY".to_string(),
                params: vec![130000],
            }
        );
        assert_eq!(
            parse_type_string("numeric(99999999999,2)").unwrap().params,
            vec![2]
        );
    }

    #[test]
    fn test_lookup_type_name_table() {
        assert_eq!(lookup_type_name("BYTEA"), Some(SqlType::Blob { length: None }));
        assert_eq!(lookup_type_name("MONEY").map(|t| t.accepts_parameters()), Some(true));
        assert_eq!(lookup_type_name("SMALLDATETIME"), Some(SqlType::DateTime));
        assert_eq!(lookup_type_name("TINYINT"), Some(SqlType::Integer));
        assert_eq!(lookup_type_name("varchar"), None);
    }

    #[test]
    fn test_sql_type_to_sql() {
        assert_eq!(
            SqlType::Numeric {
                precision: Some(10),
                scale: Some(2)
            }
            .to_sql(),
            "NUMERIC(10, 2)"
        );
        assert_eq!(SqlType::Varchar { length: Some(80) }.to_string(), "VARCHAR(80)");
        assert_eq!(SqlType::Timestamp { timezone: true }.to_sql(), "TIMESTAMPTZ");
        assert_eq!(SqlType::Blob { length: None }.to_sql(), "VARBINARY");
    }

    #[test]
    fn test_sql_type_to_arrow() {
        assert_eq!(SqlType::Integer.to_arrow(), DataType::Int64);
        assert_eq!(SqlType::Varchar { length: None }.to_arrow(), DataType::Utf8);
        assert_eq!(
            SqlType::Timestamp { timezone: true }.to_arrow(),
            DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
        );
        assert_eq!(
            SqlType::Numeric {
                precision: Some(10),
                scale: Some(2)
            }
            .to_arrow(),
            DataType::Decimal128(10, 2)
        );
        assert_eq!(
            SqlType::Numeric {
                precision: None,
                scale: None
            }
            .to_arrow(),
            DataType::Decimal128(37, 15)
        );
        assert_eq!(
            SqlType::Numeric {
                precision: Some(12),
                scale: None
            }
            .to_arrow(),
            DataType::Decimal128(12, 0)
        );
    }
}
