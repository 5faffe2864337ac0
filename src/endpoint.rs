use std::fmt;
use std::str::FromStr;

use crate::error::EndpointError;

/// A single `host:port` server address.
///
/// Construction validates that the host is non-empty and the port is
/// nonzero, so a value that exists is always safe to hand to the
/// transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Result<Self, EndpointError> {
        let host = host.into();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if port == 0 {
            return Err(EndpointError::InvalidPort("0".to_owned()));
        }
        Ok(Endpoint { host, port })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| EndpointError::MissingPort(s.to_owned()))?;
        let port: u16 = port
            .parse()
            .map_err(|_| EndpointError::InvalidPort(port.to_owned()))?;
        Endpoint::new(host, port)
    }
}
