//! Binary and hex keymap files
//!
//! The binary format is the raw wire image: 256 little-endian `u32` codes,
//! no header. Reading always takes a fixed 1024-byte window, so a short file
//! is zero padded and a long one is truncated.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use nudelta_transport::protocol::keymap::KEYMAP_BYTES;
use nudelta_transport::KeymapBuffer;
use tracing::{info, warn};

use crate::error::CliError;

/// Bytes per hex dump line
const HEX_LINE: usize = 16;

/// Read one keymap window from `reader`.
///
/// Returns the keymap and the number of bytes the source had, capped at one
/// byte past the window.
pub fn read_window<R: Read>(reader: R) -> io::Result<(KeymapBuffer, usize)> {
    let mut bytes = Vec::with_capacity(KEYMAP_BYTES + 1);
    reader.take(KEYMAP_BYTES as u64 + 1).read_to_end(&mut bytes)?;
    let available = bytes.len();
    bytes.resize(KEYMAP_BYTES, 0);

    let keymap = KeymapBuffer::from_le_bytes(&bytes)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok((keymap, available))
}

/// Load a binary keymap file
pub fn read_keymap(path: &Path) -> Result<KeymapBuffer, CliError> {
    let file = File::open(path).map_err(|e| CliError::reading(path, e))?;
    let (keymap, available) = read_window(file).map_err(|e| CliError::reading(path, e))?;

    if available < KEYMAP_BYTES {
        warn!(
            "'{}' has only {} bytes, padding keymap with zeros",
            path.display(),
            available
        );
    } else if available > KEYMAP_BYTES {
        warn!(
            "'{}' is longer than {} bytes, ignoring the rest",
            path.display(),
            KEYMAP_BYTES
        );
    }
    info!("Read keymap from {}", path.display());
    Ok(keymap)
}

/// Write a keymap as a binary file (exactly 1024 bytes)
pub fn write_keymap(path: &Path, keymap: &KeymapBuffer) -> Result<(), CliError> {
    let mut file = File::create(path).map_err(|e| CliError::writing(path, e))?;
    file.write_all(&keymap.to_le_bytes())
        .map_err(|e| CliError::writing(path, e))?;
    info!("Wrote keymap to {}", path.display());
    Ok(())
}

/// Format bytes as `offset: hex  |ascii|` lines
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in data.chunks(HEX_LINE).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        out.push_str(&format!(
            "{:08x}: {:<47}  |{ascii}|\n",
            i * HEX_LINE,
            hex.join(" ")
        ));
    }
    out
}

/// Write a hex dump of the keymap's wire image
pub fn write_hex_dump(path: &Path, keymap: &KeymapBuffer) -> Result<(), CliError> {
    let file = File::create(path).map_err(|e| CliError::writing(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(hex_dump(&keymap.to_le_bytes()).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| CliError::writing(path, e))?;
    info!("Wrote hex dump to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_zero_padded() {
        let (keymap, available) = read_window(&[0x00, 0x00, 0x29, 0x00, 0x07][..]).unwrap();
        assert_eq!(available, 5);
        assert_eq!(keymap.get(0), Some(0x0029_0000));
        assert_eq!(keymap.get(1), Some(0x0000_0007));
        assert!(keymap.codes()[2..].iter().all(|&c| c == 0));
    }

    #[test]
    fn long_input_is_truncated() {
        let data = vec![0xFFu8; KEYMAP_BYTES + 100];
        let (keymap, available) = read_window(&data[..]).unwrap();
        assert_eq!(available, KEYMAP_BYTES + 1);
        assert!(keymap.codes().iter().all(|&c| c == u32::MAX));
    }

    #[test]
    fn hex_dump_lines() {
        let dump = hex_dump(b"AB\x00\x01nudelta keymap!!xyz");
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "00000000: 41 42 00 01 6e 75 64 65 6c 74 61 20 6b 65 79 6d  |AB..nudelta keym|"
        );
        assert!(lines[1].starts_with("00000010: 61 70 21 21 78 79 7a "));
        assert!(lines[1].ends_with("  |ap!!xyz|"));
    }

    #[test]
    fn hex_dump_of_keymap_has_64_lines() {
        let dump = hex_dump(&KeymapBuffer::zeroed().to_le_bytes());
        assert_eq!(dump.lines().count(), KEYMAP_BYTES / HEX_LINE);
        assert!(dump.lines().last().unwrap().starts_with("000003f0: "));
    }
}
