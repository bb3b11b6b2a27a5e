//! File reading with a fixed decoding fallback chain.
//!
//! Files are decoded as UTF-8 first, then Latin-1, then ASCII. The chain is
//! deliberate: it reproduces the original tool's reading behavior rather
//! than performing open-ended charset detection. Latin-1 accepts every byte,
//! so in practice `None` is only returned when the file cannot be read at
//! all or no decoder accepts it.

use encoding_rs::Encoding;
use std::path::Path;
use tracing::warn;

/// Read a file's text content, or `None` when it is unreadable.
///
/// A failed read is logged and recovered locally; callers record the
/// unreadable marker and continue.
pub fn read_file_text(path: &Path) -> Option<String> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("could not read {}: {}", path.display(), err);
            return None;
        }
    };

    decode_bytes(&bytes).or_else(|| {
        warn!("could not decode {}", path.display());
        None
    })
}

fn decode_bytes(bytes: &[u8]) -> Option<String> {
    // Fast path: strict UTF-8.
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Some(text.to_string());
    }

    // Latin-1 next. encoding_rs resolves the "latin1" label to its WHATWG
    // equivalent and decodes every byte sequence.
    if let Some(encoding) = Encoding::for_label(b"latin1") {
        let (decoded, _, had_errors) = encoding.decode(bytes);
        if !had_errors {
            return Some(decoded.into_owned());
        }
    }

    // Last resort: pure ASCII.
    if bytes.is_ascii() {
        return String::from_utf8(bytes.to_vec()).ok();
    }

    None
}
