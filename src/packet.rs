use byteorder::{ByteOrder, LittleEndian};

/// Magic prefix carried by every request and single-packet reply.
pub const PACKET_HEADER: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Offset of the marker byte identifying a reply.
pub const MARKER_OFFSET: usize = 4;

/// Reply payloads begin right after the marker byte.
pub const PAYLOAD_OFFSET: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    /// A2S_INFO Request -- https://developer.valvesoftware.com/wiki/Server_queries#A2S_INFO
    ///
    /// Asks the server for its name, the current map, player counts and
    /// version.
    Request,
    /// S2C_CHALLENGE
    ///
    /// The server replies to the bare request with a challenge number; the
    /// client must repeat the request with the number appended.
    Challenge,
    /// A2S_INFO Response, decoded by [`ServerInfo::decode`](crate::info::ServerInfo::decode).
    Response,
}

impl PacketType {
    pub fn to_byte(self) -> u8 {
        match self {
            PacketType::Request => 0x54,   // 'T'
            PacketType::Challenge => 0x41, // 'A'
            PacketType::Response => 0x49,  // 'I'
        }
    }
}

/// A single A2S_INFO request datagram.
#[derive(Debug, PartialEq, Eq)]
pub struct InfoRequest {
    challenge: Option<u32>,
}

impl InfoRequest {
    const BODY: &'static str = "Source Engine Query";

    /// The bare probe sent as the first round of every query.
    pub fn probe() -> Self {
        InfoRequest { challenge: None }
    }

    /// The probe with a server-issued challenge token appended.
    pub fn with_challenge(token: u32) -> Self {
        InfoRequest {
            challenge: Some(token),
        }
    }

    /// Serializes the request into a datagram.
    ///
    /// Packet structure: header, type, body, terminator, and the
    /// little-endian challenge token when present.
    pub fn pack(&self) -> Vec<u8> {
        let mut payload: Vec<u8> = Vec::new();
        payload.extend_from_slice(&PACKET_HEADER);
        payload.push(PacketType::Request.to_byte());
        payload.extend_from_slice(Self::BODY.as_bytes());
        // null terminate the body
        payload.push(0);
        if let Some(token) = self.challenge {
            let mut bytes = [0u8; 4];
            LittleEndian::write_u32(&mut bytes, token);
            payload.extend_from_slice(&bytes);
        }
        payload
    }
}

/// The marker byte of a reply, if it is long enough to carry one.
pub fn reply_marker(raw: &[u8]) -> Option<u8> {
    raw.get(MARKER_OFFSET).copied()
}

/// Extracts the challenge token from an S2C_CHALLENGE reply.
///
/// Returns `None` when the reply is not a challenge or is too short to
/// carry the 4-byte token.
pub fn challenge_token(raw: &[u8]) -> Option<u32> {
    if reply_marker(raw) != Some(PacketType::Challenge.to_byte()) {
        return None;
    }
    let token = raw.get(PAYLOAD_OFFSET..PAYLOAD_OFFSET + 4)?;
    Some(LittleEndian::read_u32(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_matches_wire_format() {
        let expected: &[u8] = &[
            0xFF, 0xFF, 0xFF, 0xFF, b'T', b'S', b'o', b'u', b'r', b'c', b'e', b' ', b'E', b'n',
            b'g', b'i', b'n', b'e', b' ', b'Q', b'u', b'e', b'r', b'y', 0x00,
        ];
        assert_eq!(InfoRequest::probe().pack(), expected);
    }

    #[test]
    fn challenge_request_appends_exactly_the_token_bytes() {
        let probe = InfoRequest::probe().pack();
        let resend = InfoRequest::with_challenge(0xDEADBEEF).pack();

        assert_eq!(&resend[..probe.len()], probe.as_slice());
        assert_eq!(&resend[probe.len()..], &[0xEF, 0xBE, 0xAD, 0xDE]);
    }

    #[test]
    fn token_extraction_is_little_endian() {
        let mut reply = Vec::from(PACKET_HEADER);
        reply.push(0x41);
        reply.extend_from_slice(&[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(challenge_token(&reply), Some(0xDEADBEEF));
    }

    #[test]
    fn token_extraction_rejects_other_markers_and_short_replies() {
        let mut reply = Vec::from(PACKET_HEADER);
        reply.push(0x49);
        reply.extend_from_slice(&[0xEF, 0xBE, 0xAD, 0xDE]);
        assert_eq!(challenge_token(&reply), None);

        let mut short = Vec::from(PACKET_HEADER);
        short.push(0x41);
        short.extend_from_slice(&[0xEF, 0xBE]);
        assert_eq!(challenge_token(&short), None);

        assert_eq!(challenge_token(&[]), None);
        assert_eq!(reply_marker(&[0xFF, 0xFF]), None);
    }
}
