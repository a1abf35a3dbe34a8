use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdminError;

/// Port used when an address omits one.
pub const DEFAULT_PORT: u16 = 27017;

/// A single `host:port` entry of the server list known to the client.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerAddress {
    pub host: String,
    pub port: u16,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ServerAddress {
    type Err = AdminError;

    /// Parse `host`, `host:port`, `[ipv6]` or `[ipv6]:port`.
    ///
    /// IPv6 literals must be bracketed; a bare `::1` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = match s.strip_prefix('[') {
            Some(rest) => {
                let (host, tail) = rest
                    .split_once(']')
                    .ok_or_else(|| AdminError::Config(format!("unclosed bracket in address: {s}")))?;
                let port = match tail {
                    "" => None,
                    _ => Some(tail.strip_prefix(':').ok_or_else(|| {
                        AdminError::Config(format!("unexpected text after bracket in address: {s}"))
                    })?),
                };
                (host, port)
            }
            None => match s.split_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (s, None),
            },
        };
        if host.is_empty() {
            return Err(AdminError::Config(format!("missing host in address: {s:?}")));
        }
        let port = match port {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| AdminError::Config(format!("invalid port in address: {s}")))?,
            None => DEFAULT_PORT,
        };
        Ok(Self::new(host, port))
    }
}

impl From<&mongodb::options::ServerAddress> for ServerAddress {
    fn from(value: &mongodb::options::ServerAddress) -> Self {
        match value {
            mongodb::options::ServerAddress::Tcp { host, port } => Self {
                host: host.trim_start_matches('[').trim_end_matches(']').to_string(),
                port: port.unwrap_or(DEFAULT_PORT),
            },
            // Unix domain sockets have no port; keep the socket path as the host.
            other => Self {
                host: other.to_string(),
                port: DEFAULT_PORT,
            },
        }
    }
}

impl From<&ServerAddress> for mongodb::options::ServerAddress {
    fn from(value: &ServerAddress) -> Self {
        mongodb::options::ServerAddress::Tcp {
            host: value.host.clone(),
            port: Some(value.port),
        }
    }
}

/// Render addresses as a comma-joined `host:port` list, preserving order.
pub fn join_addresses(addresses: &[ServerAddress]) -> String {
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
