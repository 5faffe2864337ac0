use std::io;
use std::str::Utf8Error;
use std::time::Duration;

use thiserror::Error;

/// Rejected `host:port` input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("endpoint {0:?} is missing a ':' separator")]
    MissingPort(String),

    #[error("endpoint host is empty")]
    EmptyHost,

    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

/// Rejected monitor configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is a required option")]
    MissingServerList(&'static str),

    #[error("{0} is empty")]
    EmptyServerList(&'static str),

    #[error("invalid server endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: EndpointError,
    },
}

/// Failure of a single UDP round against one server.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("binding local socket: {0}")]
    Bind(#[source] io::Error),

    #[error("connecting to server: {0}")]
    Connect(#[source] io::Error),

    #[error("sending query: {0}")]
    Send(#[source] io::Error),

    #[error("short write, sent {sent} of {len} bytes")]
    ShortWrite { sent: usize, len: usize },

    #[error("reading response: {0}")]
    Receive(#[source] io::Error),

    #[error("response filled the {limit}-byte buffer and may be truncated")]
    Oversize { limit: usize },

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

/// Failure of a whole A2S_INFO query, tagged with the round that failed.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("connecting: {0}")]
    Connect(#[source] TransportError),

    #[error("initial query: {0}")]
    InitialQuery(#[source] TransportError),

    #[error("resending query: {0}")]
    ChallengeResend(#[source] TransportError),

    #[error("receiving final response: {0}")]
    FinalReceive(#[source] TransportError),

    #[error("unexpected response to initial query (marker {0:#04x})")]
    UnexpectedResponse(u8),

    #[error("parsing server info: {0}")]
    Decode(#[from] DecodeError),
}

/// Failure while decoding an info response payload.
///
/// The wire format is positional with no field tags, so decoding stops at
/// the first field that cannot be read in full; every variant names the
/// field that failed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response too short or wrong marker (length {len})")]
    BadHeader { len: usize },

    #[error("truncated string while reading {field}")]
    TruncatedString { field: &'static str },

    #[error("truncated field while reading {field}")]
    TruncatedField { field: &'static str },

    #[error("invalid utf-8 in {field}: {source}")]
    InvalidUtf8 {
        field: &'static str,
        source: Utf8Error,
    },
}
