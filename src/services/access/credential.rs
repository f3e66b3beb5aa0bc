//! Credential extraction: pull the token out of the request's `Cookie` headers.
//!
//! Only the named cookie is consulted. `Authorization` headers and query
//! parameters are ignored on purpose.

use axum::http::{HeaderMap, header};

/// Returns the value of the first cookie named `name`, or `None` when the
/// request carries no such cookie.
///
/// Every `Cookie` header line is scanned pair by pair, so one bad pair does not
/// hide the rest of its line. A pair without `=` has an empty value. Pairs whose
/// value contains bytes that are not allowed in a cookie value are skipped, as
/// if they were absent.
pub fn token_from_cookies<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .flat_map(|line| line.as_bytes().split(|b| *b == b';'))
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .filter_map(|pair| {
            let pair = pair.trim();
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            if k.trim() != name {
                return None;
            }
            parse_cookie_value(v.trim())
        })
        .next()
}

fn parse_cookie_value(raw: &str) -> Option<&str> {
    // Strip one pair of surrounding quotes.
    let value = raw
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(raw);

    value.bytes().all(valid_cookie_byte).then_some(value)
}

fn valid_cookie_byte(b: u8) -> bool {
    (0x20..0x7f).contains(&b) && b != b'"' && b != b';' && b != b'\\'
}
