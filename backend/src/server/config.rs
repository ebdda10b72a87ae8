//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use tracing::warn;

/// Address used when `SUPPORT_DESK_BIND_ADDR` is absent or unparseable.
const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 4000);

/// Configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    bind_addr: SocketAddr,
    permissive_cors: bool,
}

impl ServerConfig {
    /// Construct a configuration from explicit values.
    pub fn new(bind_addr: SocketAddr, permissive_cors: bool) -> Self {
        Self {
            bind_addr,
            permissive_cors,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `SUPPORT_DESK_BIND_ADDR` selects the listen address (default
    /// `0.0.0.0:4000`); `SUPPORT_DESK_PERMISSIVE_CORS=0` disables the
    /// permissive CORS layer.
    pub fn from_env() -> Self {
        let bind_addr = parse_bind_addr(std::env::var("SUPPORT_DESK_BIND_ADDR").ok());
        let permissive_cors = std::env::var("SUPPORT_DESK_PERMISSIVE_CORS")
            .map(|v| v != "0")
            .unwrap_or(true);
        Self::new(bind_addr, permissive_cors)
    }

    /// The socket address the server will bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether responses carry permissive CORS headers.
    pub fn permissive_cors(&self) -> bool {
        self.permissive_cors
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BIND_ADDR, true)
    }
}

fn parse_bind_addr(raw: Option<String>) -> SocketAddr {
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|error| {
            warn!(%error, value = %raw, "invalid bind address, using default");
            DEFAULT_BIND_ADDR
        }),
        None => DEFAULT_BIND_ADDR,
    }
}
