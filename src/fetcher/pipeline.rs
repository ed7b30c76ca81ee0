use crate::fetcher::types::FetchedPage;
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use tracing::warn;
use url::Url;

/// How far into the body to look for a `<meta>` charset declaration.
const META_SNIFF_LEN: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn decode_page(
    url: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> FetchedPage {
    let encoding = detect_encoding(content_type, &body_bytes);
    let body = decode_to_utf8(&body_bytes, encoding);

    FetchedPage {
        url,
        status,
        encoding,
        body,
        fetched_at: Utc::now(),
    }
}

/// Header charset first, then `<meta>` declarations, then a statistical guess.
fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    let head = &body_bytes[..body_bytes.len().min(META_SNIFF_LEN)];
    let head_str = String::from_utf8_lossy(head);

    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &head_str)
        .or_else(|| label_from(&META_HTTP_EQUIV_REGEX, &head_str))
    {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(head, false);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

/// Malformed sequences become U+FFFD; the rest of the page is still usable.
fn decode_to_utf8(body_bytes: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        warn!(
            charset = encoding.name(),
            "page contains malformed sequences, replaced with U+FFFD"
        );
    }

    decoded.into_owned()
}
