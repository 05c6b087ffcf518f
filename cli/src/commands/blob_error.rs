use spatia_core::codec::DecodeError;
use thiserror::Error;
use yansi::{Condition, Paint};

/// Number of bytes shown on each side of the offending byte
const CONTEXT_BYTES: usize = 8;

/// An error that happened while reading a geometry blob
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("{0}")]
    Decode(String),
}

/// Convert a [DecodeError] into a [BlobError] that shows the offending
/// bytes of the blob
pub trait IntoBlobError {
    fn into_blob_error(self, blob: &[u8]) -> BlobError;
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

impl IntoBlobError for DecodeError {
    fn into_blob_error(self, blob: &[u8]) -> BlobError {
        let offset = self.offset.min(blob.len());

        // extract snippet
        let start = offset.saturating_sub(CONTEXT_BYTES);
        let end = (offset + 1 + CONTEXT_BYTES).min(blob.len());
        let before = to_hex(&blob[start..offset]);
        let at = blob.get(offset).map(|b| format!("{b:02x}"));
        let after = to_hex(&blob[(offset + 1).min(end)..end]);

        // format message
        let prefix = if before.is_empty() {
            0
        } else {
            before.len() + 1
        };
        let snippet = [before.as_str(), at.as_deref().unwrap_or(""), after.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let highlighted = match &at {
            Some(at) => format!(
                "{}{}{}",
                &snippet[..prefix],
                at.red(),
                &snippet[prefix + at.len()..]
            ),
            None => snippet.clone(),
        };

        BlobError::Decode(
            format!(
                "Unable to decode blob at offset {}\n\n{}\n{}{}\n{}{}{}",
                self.offset,
                highlighted,
                " ".repeat(prefix),
                (if at.is_some() { "─┬" } else { "│" }).red(),
                " ".repeat(prefix + if at.is_some() { 1 } else { 0 }),
                "╰── ".red(),
                self.kind.to_string().red().bold()
            )
            .whenever(Condition::from(|| {
                Condition::stderr_is_tty() && Condition::clicolor() && Condition::no_color()
            }))
            .to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use spatia_core::codec::{DecodeError, DecodeErrorKind};

    use super::{BlobError, IntoBlobError};

    #[test]
    fn points_at_offending_byte() {
        yansi::disable();
        let blob = [0x00, 0x01, 0x02, 0x03];
        let BlobError::Decode(msg) =
            DecodeError::new(DecodeErrorKind::StartMarker(0x02), 2).into_blob_error(&blob);
        let lines = msg.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Unable to decode blob at offset 2");
        assert_eq!(lines[2], "00 01 02 03");
        assert_eq!(lines[3], "      ─┬");
        assert!(lines[4].starts_with("       ╰── "));
    }

    #[test]
    fn truncated_blob() {
        yansi::disable();
        let blob = [0x00, 0x01];
        let BlobError::Decode(msg) = DecodeError::new(
            DecodeErrorKind::Truncated {
                needed: 4,
                available: 0,
            },
            2,
        )
        .into_blob_error(&blob);
        let lines = msg.lines().collect::<Vec<_>>();
        assert_eq!(lines[2], "00 01");
        assert_eq!(lines[3], "      │");
    }
}
