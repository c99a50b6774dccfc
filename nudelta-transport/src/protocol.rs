//! Air75 vendor report framing and keymap paging
//!
//! Every transfer uses one fixed 64-byte feature report:
//!
//! ```text
//! [report_id, command, page, page_count, payload[60]]
//! ```
//!
//! A keymap is 256 little-endian `u32` codes (1024 bytes), split across
//! [`keymap::PAGE_COUNT`] reports. The final report is zero padded.

use tracing::trace;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::TransportError;
use crate::types::KeymapBuffer;

/// Command bytes
pub mod cmd {
    pub const SET_KEYMAP: u8 = 0x04;
    pub const GET_VERSION: u8 = 0x80;
    pub const GET_KEYMAP: u8 = 0x84;

    /// Get human-readable name for a command byte
    pub fn name(cmd: u8) -> &'static str {
        match cmd {
            SET_KEYMAP => "SET_KEYMAP",
            GET_VERSION => "GET_VERSION",
            GET_KEYMAP => "GET_KEYMAP",
            _ => "UNKNOWN",
        }
    }
}

/// Feature report id used by the vendor interface
pub const REPORT_ID: u8 = 0x06;
/// Full report size including the report id
pub const REPORT_SIZE: usize = 64;
/// `[report_id, command, page, page_count]`
pub const HEADER_SIZE: usize = 4;
pub const PAYLOAD_SIZE: usize = REPORT_SIZE - HEADER_SIZE;

/// Keymap geometry
pub mod keymap {
    use super::PAYLOAD_SIZE;

    /// Matrix slots in one keymap
    pub const KEY_COUNT: usize = 256;
    /// Bytes per key code
    pub const CODE_SIZE: usize = 4;
    pub const KEYMAP_BYTES: usize = KEY_COUNT * CODE_SIZE;
    /// Key codes carried by one full report
    pub const CODES_PER_PAGE: usize = PAYLOAD_SIZE / CODE_SIZE;
    pub const PAGE_COUNT: usize = KEYMAP_BYTES.div_ceil(PAYLOAD_SIZE);
    /// Payload bytes actually used by the last report
    pub const LAST_PAGE_SIZE: usize = KEYMAP_BYTES - (PAGE_COUNT - 1) * PAYLOAD_SIZE;
}

/// One feature report frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct Report {
    pub report_id: u8,
    pub command: u8,
    pub page: u8,
    pub page_count: u8,
    pub payload: [u8; PAYLOAD_SIZE],
}

impl Report {
    /// An empty frame for `command`
    pub fn new(command: u8, page: u8, page_count: u8) -> Self {
        Self {
            report_id: REPORT_ID,
            command,
            page,
            page_count,
            payload: [0; PAYLOAD_SIZE],
        }
    }

    /// Raw bytes as they go on the wire, report id first
    pub fn as_frame(&self) -> &[u8] {
        self.as_bytes()
    }

    /// Check that this is a response to `command` for `page`
    pub fn check_response(&self, command: u8, page: u8) -> Result<(), TransportError> {
        if self.report_id != REPORT_ID {
            return Err(TransportError::InvalidReportId {
                expected: REPORT_ID,
                actual: self.report_id,
            });
        }
        if self.command != command {
            return Err(TransportError::InvalidResponse {
                expected: command,
                actual: self.command,
            });
        }
        if self.page != page {
            return Err(TransportError::OutOfSequence {
                expected: page,
                actual: self.page,
            });
        }
        Ok(())
    }
}

/// Build a request frame with an empty payload
pub fn build_request(command: u8, page: u8) -> Report {
    let page_count = match command {
        cmd::GET_KEYMAP | cmd::SET_KEYMAP => keymap::PAGE_COUNT as u8,
        _ => 1,
    };
    Report::new(command, page, page_count)
}

/// Parse a frame read from the device.
///
/// `buf` must hold a complete report starting with the report id.
pub fn parse_report(buf: &[u8]) -> Result<Report, TransportError> {
    if buf.len() < REPORT_SIZE {
        return Err(TransportError::ShortRead {
            expected: REPORT_SIZE,
            actual: buf.len(),
        });
    }
    let report = Report::read_from_bytes(&buf[..REPORT_SIZE]).map_err(|_| {
        TransportError::Internal(format!("cannot view {} bytes as a report", buf.len()))
    })?;
    if report.report_id != REPORT_ID {
        return Err(TransportError::InvalidReportId {
            expected: REPORT_ID,
            actual: report.report_id,
        });
    }
    Ok(report)
}

/// Firmware version carried by a `GET_VERSION` response
pub fn parse_version(report: &Report) -> u16 {
    u16::from_le_bytes([report.payload[0], report.payload[1]])
}

/// Pack key codes into their little-endian wire image
pub fn pack_codes(codes: &[u32]) -> Vec<u8> {
    codes.iter().flat_map(|code| code.to_le_bytes()).collect()
}

/// Unpack a little-endian wire image into key codes. Trailing bytes that do
/// not form a whole code are ignored.
pub fn unpack_codes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(keymap::CODE_SIZE)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

/// Split a keymap into the `SET_KEYMAP` frames that write it
pub fn encode_keymap(keymap: &KeymapBuffer) -> Vec<Report> {
    let bytes = keymap.to_le_bytes();
    bytes
        .chunks(PAYLOAD_SIZE)
        .enumerate()
        .map(|(page, chunk)| {
            let mut report = build_request(cmd::SET_KEYMAP, page as u8);
            report.payload[..chunk.len()].copy_from_slice(chunk);
            trace!(
                "Encoded keymap page {}/{} ({} bytes)",
                page + 1,
                keymap::PAGE_COUNT,
                chunk.len()
            );
            report
        })
        .collect()
}

/// Reassemble a keymap from the `GET_KEYMAP` responses, in page order
pub fn decode_keymap(reports: &[Report]) -> Result<KeymapBuffer, TransportError> {
    if reports.len() != keymap::PAGE_COUNT {
        return Err(TransportError::MissingPages {
            expected: keymap::PAGE_COUNT,
            actual: reports.len(),
        });
    }

    let mut bytes = Vec::with_capacity(keymap::PAGE_COUNT * PAYLOAD_SIZE);
    for (page, report) in reports.iter().enumerate() {
        report.check_response(cmd::GET_KEYMAP, page as u8)?;
        if report.page_count != keymap::PAGE_COUNT as u8 {
            return Err(TransportError::PageCountMismatch {
                expected: keymap::PAGE_COUNT as u8,
                actual: report.page_count,
            });
        }
        bytes.extend_from_slice(&report.payload);
    }
    bytes.truncate(keymap::KEYMAP_BYTES);

    KeymapBuffer::from_le_bytes(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_keymap() -> KeymapBuffer {
        let codes = (0..keymap::KEY_COUNT as u32)
            .map(|i| 0xA000_0000 | (i << 8) | (i & 0xFF))
            .collect();
        KeymapBuffer::new(codes).unwrap()
    }

    /// Turn SET frames into what the device would answer to GET requests
    fn as_responses(frames: &[Report]) -> Vec<Report> {
        frames
            .iter()
            .map(|f| Report {
                command: cmd::GET_KEYMAP,
                ..*f
            })
            .collect()
    }

    #[test]
    fn geometry() {
        assert_eq!(PAYLOAD_SIZE, 60);
        assert_eq!(keymap::CODES_PER_PAGE, 15);
        assert_eq!(keymap::KEYMAP_BYTES, 1024);
        assert_eq!(keymap::PAGE_COUNT, 18);
        assert_eq!(keymap::LAST_PAGE_SIZE, 4);
        assert_eq!(std::mem::size_of::<Report>(), REPORT_SIZE);
    }

    #[test]
    fn request_layout() {
        let report = build_request(cmd::GET_KEYMAP, 3);
        let frame = report.as_frame();
        assert_eq!(frame.len(), REPORT_SIZE);
        assert_eq!(&frame[..4], &[REPORT_ID, cmd::GET_KEYMAP, 3, 18]);
        assert!(frame[HEADER_SIZE..].iter().all(|&b| b == 0));

        let version = build_request(cmd::GET_VERSION, 0);
        assert_eq!(version.page_count, 1);
    }

    #[test]
    fn encode_pages_and_padding() {
        let keymap = sample_keymap();
        let frames = encode_keymap(&keymap);
        assert_eq!(frames.len(), keymap::PAGE_COUNT);

        for (page, frame) in frames.iter().enumerate() {
            assert_eq!(frame.report_id, REPORT_ID);
            assert_eq!(frame.command, cmd::SET_KEYMAP);
            assert_eq!(frame.page as usize, page);
            assert_eq!(frame.page_count as usize, keymap::PAGE_COUNT);
        }

        // Code 15 opens the second page, least significant byte first
        let code = keymap.get(15).unwrap();
        assert_eq!(&frames[1].payload[..4], &code.to_le_bytes());

        let last = frames.last().unwrap();
        let code = keymap.get(255).unwrap();
        assert_eq!(&last.payload[..4], &code.to_le_bytes());
        assert!(last.payload[keymap::LAST_PAGE_SIZE..].iter().all(|&b| b == 0));
    }

    #[test]
    fn decode_reassembles_keymap() {
        let keymap = sample_keymap();
        let responses = as_responses(&encode_keymap(&keymap));
        assert_eq!(decode_keymap(&responses).unwrap(), keymap);
    }

    #[test]
    fn decode_rejects_wrong_command() {
        let frames = encode_keymap(&sample_keymap());
        let err = decode_keymap(&frames).unwrap_err();
        assert!(matches!(
            err,
            TransportError::InvalidResponse {
                expected: cmd::GET_KEYMAP,
                actual: cmd::SET_KEYMAP
            }
        ));
    }

    #[test]
    fn decode_rejects_out_of_order_pages() {
        let mut responses = as_responses(&encode_keymap(&sample_keymap()));
        responses.swap(4, 5);
        let err = decode_keymap(&responses).unwrap_err();
        assert!(matches!(
            err,
            TransportError::OutOfSequence {
                expected: 4,
                actual: 5
            }
        ));
    }

    #[test]
    fn decode_rejects_missing_pages() {
        let mut responses = as_responses(&encode_keymap(&sample_keymap()));
        responses.pop();
        assert!(matches!(
            decode_keymap(&responses),
            Err(TransportError::MissingPages {
                expected: 18,
                actual: 17
            })
        ));
    }

    #[test]
    fn decode_rejects_bad_page_count() {
        let mut responses = as_responses(&encode_keymap(&sample_keymap()));
        responses[0].page_count = 17;
        assert!(matches!(
            decode_keymap(&responses),
            Err(TransportError::PageCountMismatch { .. })
        ));
    }

    #[test]
    fn parse_checks_size_and_report_id() {
        let frame = build_request(cmd::GET_VERSION, 0);
        let bytes = frame.as_frame().to_vec();

        assert_eq!(parse_report(&bytes).unwrap(), frame);
        assert!(matches!(
            parse_report(&bytes[..32]),
            Err(TransportError::ShortRead {
                expected: 64,
                actual: 32
            })
        ));

        let mut wrong = bytes.clone();
        wrong[0] = 0x01;
        assert!(matches!(
            parse_report(&wrong),
            Err(TransportError::InvalidReportId { actual: 0x01, .. })
        ));
    }

    #[test]
    fn version_is_little_endian() {
        let mut report = build_request(cmd::GET_VERSION, 0);
        report.payload[0] = 0x34;
        report.payload[1] = 0x12;
        assert_eq!(parse_version(&report), 0x1234);
    }

    #[test]
    fn pack_and_unpack() {
        assert_eq!(pack_codes(&[0x0000_2C00, 1]), vec![0x00, 0x2C, 0, 0, 1, 0, 0, 0]);
        assert_eq!(unpack_codes(&[0x00, 0x2C, 0, 0, 9]), vec![0x0000_2C00]);
        assert_eq!(cmd::name(cmd::GET_KEYMAP), "GET_KEYMAP");
        assert_eq!(cmd::name(0x42), "UNKNOWN");
    }
}
