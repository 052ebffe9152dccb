//! Escaping for the handful of characters the tag grammar reserves.
//!
//! Only `<` and `&` are entity-encoded; literal backslashes are doubled so
//! that filesystem-path-like content survives tag scanning untouched.

/// Decodes `&lt;`, `&amp;` and collapses doubled backslashes.
///
/// Any other `&` occurrence passes through unchanged; the input is not
/// required to be well-formed. Decoding is a single left-to-right pass, so
/// `&amp;lt;` becomes `&lt;` and is not examined again.
pub fn decode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find(['&', '\\']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("&lt;") {
            out.push('<');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("&amp;") {
            out.push('&');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("\\\\") {
            out.push('\\');
            rest = after;
        } else {
            // lone '&' or lone '\' passes through verbatim
            out.push_str(&tail[..1]);
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Inverse of [`decode`]: escapes `<`, `&` and doubles every backslash.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        encode_char_into(c, &mut out);
    }
    out
}

pub(crate) fn encode_char_into(c: char, out: &mut String) {
    match c {
        '<' => out.push_str("&lt;"),
        '&' => out.push_str("&amp;"),
        '\\' => out.push_str("\\\\"),
        _ => out.push(c),
    }
}
