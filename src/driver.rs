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

//! The native driver the dialect sits on top of.

use crate::connection::CatalogConnection;
use crate::error::Result;
use crate::url::ConnectArgs;

/// Entry point of the native Vertica driver.
///
/// The dialect only shapes the arguments; opening, pooling and closing
/// connections stay with the driver and the host. Connect failures must be
/// reported as [`Error::Driver`](crate::Error::Driver).
pub trait NativeDriver {
    type Connection: CatalogConnection;

    /// Driver name as it appears in connection URLs.
    fn name(&self) -> &str {
        "vertica_python"
    }

    /// Open a connection with the given arguments.
    fn connect(&self, args: &ConnectArgs) -> Result<Self::Connection>;
}
