use byteorder::{ByteOrder, LittleEndian};

use crate::error::DecodeError;

/// Get the value of a null-terminated string with index 0 at `offset` in an
/// array of bytes.
///
/// Mutates `offset` to the index after the null-termination byte. Running
/// out of bytes before the terminator fails the read; a partial string is
/// never returned.
pub fn get_string(
    data: &[u8],
    offset: &mut usize,
    field: &'static str,
) -> Result<String, DecodeError> {
    let start: usize = *offset;
    let mut end: usize = *offset;

    loop {
        match data.get(end) {
            Some(0) => break,
            Some(_) => end += 1,
            None => return Err(DecodeError::TruncatedString { field }),
        }
    }
    *offset = end + 1;

    match std::str::from_utf8(&data[start..end]) {
        Ok(s) => Ok(s.to_owned()),
        Err(source) => Err(DecodeError::InvalidUtf8 { field, source }),
    }
}

/// Get the [u8] at index `offset` from `data`.
///
/// Mutates `offset` to the index after the byte.
pub fn get_u8(data: &[u8], offset: &mut usize, field: &'static str) -> Result<u8, DecodeError> {
    let byte: u8 = *data
        .get(*offset)
        .ok_or(DecodeError::TruncatedField { field })?;
    *offset += 1;
    Ok(byte)
}

/// Get 2 little-endian bytes (as a [u16]) at index `offset` from `data`.
///
/// Mutates `offset` to the index after the bytes.
pub fn get_u16(data: &[u8], offset: &mut usize, field: &'static str) -> Result<u16, DecodeError> {
    let bytes: &[u8] = data
        .get(*offset..*offset + 2)
        .ok_or(DecodeError::TruncatedField { field })?;
    *offset += 2;
    Ok(LittleEndian::read_u16(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_reads_stop_at_the_terminator() {
        let data = b"one\0two\0";
        let mut offset = 0;

        assert_eq!(get_string(data, &mut offset, "first").unwrap(), "one");
        assert_eq!(offset, 4);
        assert_eq!(get_string(data, &mut offset, "second").unwrap(), "two");
        assert_eq!(offset, 8);
    }

    #[test]
    fn empty_string_consumes_only_the_terminator() {
        let mut offset = 0;
        assert_eq!(get_string(b"\0", &mut offset, "empty").unwrap(), "");
        assert_eq!(offset, 1);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut offset = 0;
        let err = get_string(b"no terminator", &mut offset, "name").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedString { field: "name" }
        ));
    }

    #[test]
    fn u16_is_little_endian() {
        let mut offset = 0;
        assert_eq!(get_u16(&[0x60, 0x02], &mut offset, "app id").unwrap(), 608);
        assert_eq!(offset, 2);
    }

    #[test]
    fn fixed_width_reads_fail_past_the_end() {
        let mut offset = 0;
        assert!(matches!(
            get_u8(&[], &mut offset, "bot count").unwrap_err(),
            DecodeError::TruncatedField { field: "bot count" }
        ));

        let mut offset = 1;
        assert!(matches!(
            get_u16(&[0x60, 0x02], &mut offset, "app id").unwrap_err(),
            DecodeError::TruncatedField { field: "app id" }
        ));
    }
}
