//! Query string parsing.
//!
//! Keys are kept exactly as sent; only values are decoded (`+` → space, then
//! percent-decoding).

use super::QueryParams;

/// Parse a raw query string (`a=1&b=hello%20world`) into key/value pairs.
///
/// Pieces that do not split into exactly one key and one value are skipped.
/// A value that cannot be percent-decoded removes its key entirely, so a
/// malformed later pair also discards an earlier valid value for that key.
pub fn parse_query(raw: &str) -> QueryParams {
    let mut params = QueryParams::new();

    for piece in raw.split('&') {
        let mut parts = piece.split('=');
        let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            continue;
        };

        match decode_value(value) {
            Some(decoded) => {
                params.insert(key.to_string(), decoded);
            }
            None => {
                tracing::trace!(key, value, "dropping query value with bad percent-encoding");
                params.remove(key);
            }
        }
    }

    params
}

fn decode_value(value: &str) -> Option<String> {
    let spaced = value.replace('+', " ");
    if !has_valid_escapes(&spaced) {
        return None;
    }
    urlencoding::decode(&spaced).ok().map(|decoded| decoded.into_owned())
}

/// Every `%` must be followed by two hex digits.
fn has_valid_escapes(value: &str) -> bool {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}
