//! Best-effort text decoding for subtitle files of unknown charset.

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Decode bytes to text. A BOM wins; otherwise the charset is guessed.
/// Undecodable sequences become U+FFFD, so this never fails.
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!("decoding as {} replaced malformed sequences", encoding.name());
    }
    text.into_owned()
}
