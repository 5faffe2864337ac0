use crate::error::DecodeError;
use crate::packet::{self, PacketType};
use crate::parse::{get_string, get_u16, get_u8};

/// Server information as obtained by [`query`](crate::query::query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerInfo {
    /// A2S_INFO protocol version
    pub protocol_version: u8,
    /// Server hostname
    pub server_name: String,
    /// Current map
    pub map_name: String,
    /// Location of the server files
    pub game_directory: String,
    /// Game description; frequently empty on the wire, but carried as sent
    pub game_description: String,
    /// Steam application ID of the game
    pub app_id: u16,
    /// Current players
    pub players: u8,
    /// Max players
    pub max_players: u8,
    /// Current bots
    pub bots: u8,
    /// Server type:
    /// - `d`: dedicated
    /// - `l`: listen (non-dedicated)
    /// - `p`: SourceTV relay (proxy)
    pub server_type: char,
    /// Server environment:
    /// - `w`: Windows
    /// - `l`: Linux
    /// - `m`/`o`: Mac
    ///
    /// The protocol does not guarantee an exhaustive set; other bytes are
    /// passed through untouched.
    pub os_type: char,
    /// Is the server password protected?
    pub password_protected: bool,
    /// Is the server VAC secured?
    pub vac_secured: bool,
    /// Game version string
    pub version: String,
}

impl ServerInfo {
    /// Decodes a raw A2S_INFO response datagram into a [`ServerInfo`].
    ///
    /// The layout is positional: every field is read in wire order, and a
    /// field that cannot be read in full fails the whole decode rather
    /// than yielding a partial record. Bytes past the version string (the
    /// extra data field) are ignored.
    pub fn decode(raw: &[u8]) -> Result<ServerInfo, DecodeError> {
        if raw.len() < packet::PAYLOAD_OFFSET
            || raw[packet::MARKER_OFFSET] != PacketType::Response.to_byte()
        {
            return Err(DecodeError::BadHeader { len: raw.len() });
        }

        // skip the header bytes
        let data = &raw[packet::PAYLOAD_OFFSET..];
        let mut offset: usize = 0;

        let protocol_version = get_u8(data, &mut offset, "protocol version")?;
        let server_name = get_string(data, &mut offset, "server name")?;
        let map_name = get_string(data, &mut offset, "map name")?;
        let game_directory = get_string(data, &mut offset, "game directory")?;
        let game_description = get_string(data, &mut offset, "game description")?;
        let app_id = get_u16(data, &mut offset, "app id")?;
        let players = get_u8(data, &mut offset, "player count")?;
        let max_players = get_u8(data, &mut offset, "max player count")?;
        let bots = get_u8(data, &mut offset, "bot count")?;
        let server_type = char::from(get_u8(data, &mut offset, "server type")?);
        let os_type = char::from(get_u8(data, &mut offset, "os type")?);
        let password_protected = get_u8(data, &mut offset, "password protected")? != 0;
        let vac_secured = get_u8(data, &mut offset, "vac secured")? != 0;
        let version = get_string(data, &mut offset, "version")?;

        Ok(ServerInfo {
            protocol_version,
            server_name,
            map_name,
            game_directory,
            game_description,
            app_id,
            players,
            max_players,
            bots,
            server_type,
            os_type,
            password_protected,
            vac_secured,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::PACKET_HEADER;

    fn response(password: u8, vac: u8) -> Vec<u8> {
        let mut raw = Vec::from(PACKET_HEADER);
        raw.push(0x49);
        raw.push(17); // protocol version
        raw.extend_from_slice(b"Uncletopia New York City 4\0");
        raw.extend_from_slice(b"pl_upward\0");
        raw.extend_from_slice(b"tf\0");
        raw.extend_from_slice(b"Team Fortress\0");
        raw.extend_from_slice(&[0xB8, 0x01]); // app id 440, little-endian
        raw.push(5); // players
        raw.push(24); // max players
        raw.push(1); // bots
        raw.push(b'd');
        raw.push(b'l');
        raw.push(password);
        raw.push(vac);
        raw.extend_from_slice(b"8.1.0\0");
        raw
    }

    #[test]
    fn decodes_every_field() {
        let info = ServerInfo::decode(&response(0, 1)).unwrap();
        assert_eq!(
            info,
            ServerInfo {
                protocol_version: 17,
                server_name: "Uncletopia New York City 4".to_owned(),
                map_name: "pl_upward".to_owned(),
                game_directory: "tf".to_owned(),
                game_description: "Team Fortress".to_owned(),
                app_id: 440,
                players: 5,
                max_players: 24,
                bots: 1,
                server_type: 'd',
                os_type: 'l',
                password_protected: false,
                vac_secured: true,
                version: "8.1.0".to_owned(),
            }
        );
    }

    #[test]
    fn empty_description_still_keeps_later_fields_aligned() {
        let mut raw = Vec::from(PACKET_HEADER);
        raw.push(0x49);
        raw.push(17);
        raw.extend_from_slice(b"ABC\0");
        raw.extend_from_slice(b"MAP\0");
        raw.extend_from_slice(b"DIR\0");
        raw.push(0); // empty game description
        raw.extend_from_slice(&[0x60, 0x02]);
        raw.extend_from_slice(&[5, 16, 0, b'd', 0x00, 0, 1]);
        raw.extend_from_slice(b"v1\0");

        let info = ServerInfo::decode(&raw).unwrap();
        assert_eq!(info.game_description, "");
        assert_eq!(info.app_id, 608);
        assert_eq!(info.players, 5);
        assert_eq!(info.max_players, 16);
        assert_eq!(info.bots, 0);
        assert_eq!(info.server_type, 'd');
        assert_eq!(info.os_type, '\0');
        assert!(!info.password_protected);
        assert!(info.vac_secured);
        assert_eq!(info.version, "v1");
    }

    #[test]
    fn flag_bytes_accept_any_nonzero_value() {
        let info = ServerInfo::decode(&response(2, 0xFF)).unwrap();
        assert!(info.password_protected);
        assert!(info.vac_secured);
    }

    #[test]
    fn every_truncation_point_fails() {
        let raw = response(0, 1);
        for len in 0..raw.len() {
            assert!(
                ServerInfo::decode(&raw[..len]).is_err(),
                "prefix of {len} bytes decoded successfully"
            );
        }
    }

    #[test]
    fn rejects_wrong_marker() {
        let mut raw = response(0, 1);
        raw[4] = 0x41;
        assert!(matches!(
            ServerInfo::decode(&raw).unwrap_err(),
            DecodeError::BadHeader { .. }
        ));
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            ServerInfo::decode(&[0xFF, 0xFF, 0xFF, 0xFF]).unwrap_err(),
            DecodeError::BadHeader { len: 4 }
        ));
    }

    #[test]
    fn ignores_trailing_extra_data() {
        let mut raw = response(0, 1);
        raw.extend_from_slice(&[0xB1, 0x87, 0x69]); // EDF and friends
        assert!(ServerInfo::decode(&raw).is_ok());
    }
}
