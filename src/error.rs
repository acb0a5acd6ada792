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

//! Error types for the Vertica dialect.
//!
//! Every fallible operation returns [`Result`]. Errors raised by the native
//! driver travel through unchanged as [`Error::Driver`]; that variant is the
//! driver's base error type as far as disconnect detection is concerned.

use adbc_core::error::Status;
use adbc_core::options::{OptionDatabase, OptionValue};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The catalog returned a type signature that cannot be split into a
    /// base name and optional numeric parameters.
    #[error("data type string not parseable for type name and optional parameters: {0}")]
    UnparseableType(String),

    /// The base type name is not in the type mapping.
    #[error("unknown Vertica type '{type_name}' in '{raw}'")]
    UnknownType { type_name: String, raw: String },

    /// `SELECT version()` did not look like a Vertica version banner.
    #[error("could not determine version from string '{0}'")]
    Version(String),

    /// Raised by the native driver while executing a statement.
    #[error("driver error: {message}")]
    Driver {
        message: String,
        sqlstate: Option<String>,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("option '{0}' is not recognized")]
    UnknownOption(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
}

impl Error {
    /// Build a driver error from a message.
    pub fn driver(message: impl Into<String>) -> Self {
        Error::Driver {
            message: message.into(),
            sqlstate: None,
        }
    }

    /// Build a driver error carrying the server's SQLSTATE.
    pub fn driver_with_sqlstate(message: impl Into<String>, sqlstate: impl Into<String>) -> Self {
        Error::Driver {
            message: message.into(),
            sqlstate: Some(sqlstate.into()),
        }
    }

    /// Whether this error came from the native driver.
    pub fn is_driver_error(&self) -> bool {
        matches!(self, Error::Driver { .. })
    }

    pub(crate) fn set_invalid_option(key: &OptionDatabase, value: &OptionValue) -> Self {
        Error::InvalidArgument(format!(
            "invalid value {:?} for option '{}'",
            value,
            key.as_ref()
        ))
    }

    pub(crate) fn unknown_option(key: &OptionDatabase) -> Self {
        Error::UnknownOption(key.as_ref().to_string())
    }

    /// ADBC status code for this error.
    pub fn status(&self) -> Status {
        match self {
            Error::UnparseableType(_) | Error::Arrow(_) => Status::InvalidData,
            Error::UnknownType { .. } | Error::UnknownOption(_) => Status::NotFound,
            Error::Version(_) | Error::InvalidState(_) => Status::InvalidState,
            Error::Driver { .. } => Status::IO,
            Error::InvalidArgument(_) | Error::Url(_) => Status::InvalidArguments,
        }
    }

    /// Convert into an ADBC error for hosts that speak ADBC.
    pub fn to_adbc(&self) -> adbc_core::error::Error {
        adbc_core::error::Error::with_message_and_status(self.to_string(), self.status())
    }
}

impl From<Error> for adbc_core::error::Error {
    fn from(err: Error) -> Self {
        err.to_adbc()
    }
}
