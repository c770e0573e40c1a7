//! Connection settings for a database to introspect.

use std::collections::BTreeMap;

/// Where and how to connect.
///
/// Providers turn this into their dialect's connection URL; empty fields are
/// left out of the URL so the driver's own defaults apply.
#[derive(Debug, Clone, Default)]
pub struct DataSource {
    /// Driver name; `"postgres"` is the only registered driver.
    pub driver: String,
    /// Server version as reported by the target (e.g. `"9.4"`). Providers
    /// use it to gate version-dependent catalog queries.
    pub version: Option<String>,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Extra driver parameters appended to the connection URL, in key order.
    pub options: BTreeMap<String, String>,
}
