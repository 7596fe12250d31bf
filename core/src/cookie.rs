//! Cookie lookup over a raw `name=value; name=value` string.

use percent_encoding::percent_decode_str;

/// Return the decoded value of the first cookie called `name`.
///
/// Items are trimmed before matching and the name must match exactly. Values
/// are percent-decoded; `+` is left untouched and invalid UTF-8 is replaced
/// rather than rejected. An empty cookie string never matches.
pub fn get_cookie(raw: &str, name: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    raw.split(';').map(str::trim).find_map(|item| {
        let value = item.strip_prefix(name)?.strip_prefix('=')?;
        Some(percent_decode_str(value).decode_utf8_lossy().into_owned())
    })
}
