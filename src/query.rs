use log::debug;

use crate::endpoint::Endpoint;
use crate::error::QueryError;
use crate::info::ServerInfo;
use crate::packet::{self, InfoRequest};
use crate::transport::{Transport, TransportConfig};

/// One probe/challenge/response exchange over an existing transport.
///
/// An exchange is single-use: construct one per query and discard it, so
/// no state can leak between queries.
struct ChallengeExchange<'a> {
    transport: &'a Transport,
}

impl<'a> ChallengeExchange<'a> {
    fn new(transport: &'a Transport) -> Self {
        ChallengeExchange { transport }
    }

    /// Runs the exchange and returns the raw authoritative response.
    ///
    /// The server answers the bare probe with a challenge; the probe is
    /// re-sent with the token appended, and whatever arrives in the second
    /// round is handed to the decoder as-is.
    async fn run(self) -> Result<Vec<u8>, QueryError> {
        // initial probe
        self.transport
            .send(&InfoRequest::probe().pack())
            .await
            .map_err(QueryError::InitialQuery)?;
        let reply = self
            .transport
            .receive()
            .await
            .map_err(QueryError::InitialQuery)?;

        // absolving the challenge
        let token = packet::challenge_token(&reply).ok_or_else(|| {
            QueryError::UnexpectedResponse(packet::reply_marker(&reply).unwrap_or(0))
        })?;
        debug!("server issued challenge {token:#010x}");

        self.transport
            .send(&InfoRequest::with_challenge(token).pack())
            .await
            .map_err(QueryError::ChallengeResend)?;

        // validating the final marker is the decoder's job
        self.transport
            .receive()
            .await
            .map_err(QueryError::FinalReceive)
    }
}

/// Queries `endpoint` with the Source Query Protocol A2S_INFO query.
///
/// Opens a fresh transport, runs one challenge exchange and decodes the
/// authoritative response. Nothing is retried; a failed query names the
/// round that failed, and the caller decides whether to try again.
pub async fn query(
    endpoint: &Endpoint,
    config: TransportConfig,
) -> Result<ServerInfo, QueryError> {
    let transport = Transport::connect(endpoint, config)
        .await
        .map_err(QueryError::Connect)?;
    let raw = ChallengeExchange::new(&transport).run().await?;
    Ok(ServerInfo::decode(&raw)?)
}
