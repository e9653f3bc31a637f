//! Decoding of guest-memory byte strings.
//!
//! String arguments cross the module boundary as raw addresses into the
//! guest's linear memory. The byte content is fully controlled by the module,
//! so every decode is validated: the scan must hit a NUL before running off
//! the end of memory or past the configured ceiling, and the span must be
//! valid UTF-8. Any violation is fatal to the current call (see
//! [`crate::HostError`]).
//!
//! The memory view passed in here is only borrowed for the duration of one
//! host call. The module may grow its memory between calls, so nothing in
//! this module retains a reference past the decode.

use thiserror::Error;

/// Ceiling on the NUL scan. The wire format carries no length, so without a
/// cap a missing terminator would walk the whole linear memory.
pub const DEFAULT_MAX_STRING_LEN: usize = 4096;

/// A malformed string reference passed by the guest module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("string address {addr:#x} is outside guest memory ({memory_len} bytes)")]
    OutOfBounds { addr: u32, memory_len: usize },

    #[error("string at {addr:#x} is not NUL-terminated within guest memory")]
    Unterminated { addr: u32 },

    #[error("string at {addr:#x} exceeds the {max_len}-byte limit")]
    TooLong { addr: u32, max_len: usize },

    #[error("string at {addr:#x} is not valid UTF-8")]
    InvalidUtf8 { addr: u32 },
}

/// Decode the null-terminated UTF-8 string starting at `addr`.
///
/// Scans forward one byte at a time until the first zero byte; the span
/// `[addr, nul)` is the string. `max_len` bounds the scan.
pub fn read_c_string(data: &[u8], addr: u32, max_len: usize) -> Result<String, ProtocolError> {
    let start = addr as usize;
    if start > data.len() {
        return Err(ProtocolError::OutOfBounds {
            addr,
            memory_len: data.len(),
        });
    }

    // Scanning one byte past the ceiling distinguishes "too long" from
    // "memory ended before a NUL".
    let tail = &data[start..];
    let scan = &tail[..tail.len().min(max_len.saturating_add(1))];

    match scan.iter().position(|&b| b == 0) {
        Some(len) => core::str::from_utf8(&scan[..len])
            .map(str::to_owned)
            .map_err(|_| ProtocolError::InvalidUtf8 { addr }),
        None if tail.len() > max_len => Err(ProtocolError::TooLong { addr, max_len }),
        None => Err(ProtocolError::Unterminated { addr }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_hello_at_offset_zero() {
        let buf = [72, 101, 108, 108, 111, 0];
        assert_eq!(
            read_c_string(&buf, 0, DEFAULT_MAX_STRING_LEN).unwrap(),
            "Hello"
        );
    }

    #[test]
    fn decodes_from_mid_buffer_offset() {
        let buf = b"junk\0second\0trailing";
        assert_eq!(
            read_c_string(buf, 5, DEFAULT_MAX_STRING_LEN).unwrap(),
            "second"
        );
    }

    #[test]
    fn empty_string_is_fine() {
        let buf = [0u8, 1, 2];
        assert_eq!(read_c_string(&buf, 0, DEFAULT_MAX_STRING_LEN).unwrap(), "");
    }

    #[test]
    fn length_matches_distance_to_first_nul() {
        // Prefix property: bytes before the NUL come back verbatim.
        let mut buf = vec![b'x'; 100];
        buf[37] = 0;
        let s = read_c_string(&buf, 0, DEFAULT_MAX_STRING_LEN).unwrap();
        assert_eq!(s.len(), 37);
        assert!(s.bytes().all(|b| b == b'x'));
    }

    #[test]
    fn unterminated_string_is_a_protocol_error() {
        let buf = [b'a', b'b', b'c'];
        assert_eq!(
            read_c_string(&buf, 0, DEFAULT_MAX_STRING_LEN),
            Err(ProtocolError::Unterminated { addr: 0 })
        );
    }

    #[test]
    fn address_past_end_is_out_of_bounds() {
        let buf = [0u8; 4];
        assert_eq!(
            read_c_string(&buf, 9, DEFAULT_MAX_STRING_LEN),
            Err(ProtocolError::OutOfBounds {
                addr: 9,
                memory_len: 4
            })
        );
    }

    #[test]
    fn address_at_end_is_unterminated_not_out_of_bounds() {
        let buf = [1u8, 2, 3, 4];
        assert_eq!(
            read_c_string(&buf, 4, DEFAULT_MAX_STRING_LEN),
            Err(ProtocolError::Unterminated { addr: 4 })
        );
    }

    #[test]
    fn invalid_utf8_is_a_protocol_error() {
        let buf = [0xFF, 0xFE, 0];
        assert_eq!(
            read_c_string(&buf, 0, DEFAULT_MAX_STRING_LEN),
            Err(ProtocolError::InvalidUtf8 { addr: 0 })
        );
    }

    #[test]
    fn scan_ceiling_is_enforced() {
        // NUL exists but sits past the ceiling.
        let mut buf = vec![b'y'; 64];
        buf.push(0);
        assert_eq!(
            read_c_string(&buf, 0, 16),
            Err(ProtocolError::TooLong {
                addr: 0,
                max_len: 16
            })
        );
    }

    #[test]
    fn string_exactly_at_ceiling_is_allowed() {
        let mut buf = vec![b'z'; 16];
        buf.push(0);
        assert_eq!(read_c_string(&buf, 0, 16).unwrap().len(), 16);
    }

    #[test]
    fn missing_nul_in_short_tail_reports_unterminated() {
        // Tail shorter than the ceiling with no NUL: the scan terminated at
        // the memory boundary, not the ceiling.
        let buf = vec![b'q'; 8];
        assert_eq!(
            read_c_string(&buf, 0, 16),
            Err(ProtocolError::Unterminated { addr: 0 })
        );
    }
}
