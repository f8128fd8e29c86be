//! String-level checks: blank text, URLs, inline markup, schema.org dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Inline tags allowed in authored descriptions.
const INLINE_TAGS: &[&str] = &["a", "b", "br", "code", "em", "i", "span", "strong", "sub", "sup"];

/// Tags that never take a closing tag.
const VOID_TAGS: &[&str] = &["br"];

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `http://` or `https://` followed by a host, with no whitespace anywhere.
pub fn is_absolute_http_url(value: &str) -> bool {
    let rest = match value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let authority = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    let host = authority.rsplit('@').next().unwrap_or("");
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => name,
        Some(_) => return false,
        None => host,
    };

    !host.is_empty()
        && !host.starts_with('.')
        && !host.ends_with('.')
        && !host.contains("..")
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'.')
}

/// Site-local path such as `/images/b308.webp`.
pub(crate) fn is_root_relative_path(value: &str) -> bool {
    value.starts_with('/') && !value.starts_with("//") && !value.chars().any(char::is_whitespace)
}

pub(crate) fn is_url_or_site_path(value: &str) -> bool {
    is_absolute_http_url(value) || is_root_relative_path(value)
}

/// A production range should name at least one four-digit year.
pub(crate) fn contains_year(value: &str) -> bool {
    value
        .as_bytes()
        .windows(4)
        .any(|w| w.iter().all(u8::is_ascii_digit))
}

/// Parse an ISO-8601 date (`2024-03-01`) or datetime, with or without offset.
/// Offsets are normalised to UTC.
pub fn parse_schema_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Problems with inline markup: unknown tags, stray or mismatched closing
/// tags, unclosed tags, and a `<` that never closes.
pub(crate) fn inline_markup_problems(text: &str) -> Vec<String> {
    let mut problems = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let end = match after.find('>') {
            Some(end) => end,
            None => {
                problems.push("unterminated '<' in markup".to_string());
                return problems;
            }
        };
        let raw = after[..end].trim();
        rest = &after[end + 1..];

        let (closing, body) = match raw.strip_prefix('/') {
            Some(body) => (true, body.trim()),
            None => (false, raw),
        };
        let self_closing = body.ends_with('/');
        let name = body
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        if !INLINE_TAGS.contains(&name.as_str()) {
            problems.push(format!("unsupported tag <{}>", raw));
            continue;
        }
        if VOID_TAGS.contains(&name.as_str()) || self_closing {
            continue;
        }

        if closing {
            match open.pop() {
                Some(top) if top == name => {}
                Some(top) => problems.push(format!("</{}> closes <{}>", name, top)),
                None => problems.push(format!("</{}> has no matching opening tag", name)),
            }
        } else {
            open.push(name);
        }
    }

    for name in open {
        problems.push(format!("<{}> is never closed", name));
    }
    problems
}
