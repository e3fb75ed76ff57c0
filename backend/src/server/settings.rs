//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `STOREFRONT_*` environment variables, and an
//! optional configuration file. Every field is optional; accessors supply the
//! defaults.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use storefront::outbound::persistence::ConnectionParams;

const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_BIND_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_USERNAME: &str = "postgres";
const DEFAULT_DB_NAME: &str = "storefront";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Settings that cannot be turned into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind host {host}: {source}")]
    InvalidBindHost {
        host: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values for the HTTP server and its database.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct Settings {
    /// Address the HTTP listener binds to.
    pub bind_host: Option<String>,
    /// Port the HTTP listener binds to.
    pub bind_port: Option<u16>,
    /// Deadline for a single request, in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_timeout_secs: Option<u64>,
    /// PostgreSQL host. Without it the server keeps records in memory.
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    /// libpq `sslmode`, passed through to the connection URL.
    pub db_ssl_mode: Option<String>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// How long a pool checkout waits for a connection, in seconds.
    pub db_connect_timeout_secs: Option<u64>,
}

impl Settings {
    /// Socket address for the listener.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.bind_host.as_deref().unwrap_or(DEFAULT_BIND_HOST);
        let ip: IpAddr = host
            .parse()
            .map_err(|source| SettingsError::InvalidBindHost {
                host: host.to_owned(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.bind_port.unwrap_or(DEFAULT_BIND_PORT)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(
            self.shutdown_timeout_secs
                .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        )
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    pub fn db_connect_timeout(&self) -> Duration {
        Duration::from_secs(
            self.db_connect_timeout_secs
                .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_SECS),
        )
    }

    /// Database connection parameters, or `None` when no host is set.
    pub fn connection_params(&self) -> Option<ConnectionParams> {
        let host = self.db_host.as_deref().map(str::trim)?;
        if host.is_empty() {
            return None;
        }
        Some(ConnectionParams {
            host: host.to_owned(),
            port: self.db_port.unwrap_or(DEFAULT_DB_PORT),
            username: self
                .db_username
                .clone()
                .unwrap_or_else(|| DEFAULT_DB_USERNAME.to_owned()),
            password: self.db_password.clone(),
            database: self
                .db_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DB_NAME.to_owned()),
            ssl_mode: self.db_ssl_mode.clone(),
        })
    }
}
