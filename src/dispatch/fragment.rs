// SPDX-License-Identifier: MPL-2.0
//! Flash messages carried in the URL fragment.
//!
//! Server-side redirects can ask for a toast on the next page by appending
//! `#notify-<type>=<url-encoded message>` to the target URL. The fragment is
//! read once when the page is ready and then stripped from the address bar
//! without reloading.

use crate::error::FragmentError;
use regex::Regex;
use std::sync::LazyLock;

static FLASH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)#notify-([a-z]+)=([^&]+)").expect("flash pattern is valid")
});

/// A flash message decoded from a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// The raw type name, case preserved.
    pub kind: String,
    pub message: String,
}

/// Parses a `location.hash` value.
///
/// Returns `Ok(None)` when the fragment carries no flash message and an
/// error when it does but the message cannot be decoded.
pub fn parse(hash: &str) -> Result<Option<Flash>, FragmentError> {
    let Some(caps) = FLASH_PATTERN.captures(hash) else {
        return Ok(None);
    };
    let kind = caps[1].to_string();
    let message = decode_uri_component(&caps[2])?;
    Ok(Some(Flash { kind, message }))
}

/// Percent-decodes `input` with `decodeURIComponent` semantics: `+` is
/// kept literally and every `%` must start a valid escape.
pub fn decode_uri_component(input: &str) -> Result<String, FragmentError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
            let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
            match (hi, lo) {
                (Some(hi), Some(lo)) => out.push(hi << 4 | lo),
                _ => return Err(FragmentError::MalformedEscape(i)),
            }
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|_| FragmentError::InvalidUtf8)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// The parts of the host page's location the flash hook reads and writes.
pub trait Location {
    /// The fragment including its leading `#`, or `""`.
    fn hash(&self) -> String;

    fn pathname(&self) -> String;

    /// The query string including its leading `?`, or `""`.
    fn search(&self) -> String;

    fn title(&self) -> String;

    /// Replaces the current history entry's URL without navigating.
    fn replace_state(&mut self, title: &str, url: &str);
}

/// A location backed by a plain URL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticLocation {
    pathname: String,
    search: String,
    hash: String,
    title: String,
}

impl StaticLocation {
    /// Splits a path-and-after URL such as `/orders?page=2#notify-info=Hi`.
    ///
    /// Scheme and host, if present, are dropped.
    #[must_use]
    pub fn new(url: &str) -> Self {
        let without_origin = match url.find("://") {
            Some(scheme_end) => {
                let rest = &url[scheme_end + 3..];
                rest.find(['/', '?', '#']).map_or("", |i| &rest[i..])
            }
            None => url,
        };

        let (before_hash, hash) = match without_origin.find('#') {
            Some(i) => without_origin.split_at(i),
            None => (without_origin, ""),
        };
        let (pathname, search) = match before_hash.find('?') {
            Some(i) => before_hash.split_at(i),
            None => (before_hash, ""),
        };

        Self {
            pathname: if pathname.is_empty() { "/" } else { pathname }.to_string(),
            search: search.to_string(),
            hash: hash.to_string(),
            title: String::new(),
        }
    }

    /// The full path, query and fragment.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl Location for StaticLocation {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn search(&self) -> String {
        self.search.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn replace_state(&mut self, title: &str, url: &str) {
        let replaced = StaticLocation::new(url);
        self.pathname = replaced.pathname;
        self.search = replaced.search;
        self.hash = replaced.hash;
        self.title = title.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flash_fragment() {
        let flash = parse("#notify-success=Order%20placed")
            .expect("valid")
            .expect("flash present");
        assert_eq!(flash.kind, "success");
        assert_eq!(flash.message, "Order placed");
    }

    #[test]
    fn type_is_case_insensitive() {
        let flash = parse("#NOTIFY-Error=Nope").expect("valid").expect("flash");
        assert_eq!(flash.kind, "Error");
    }

    #[test]
    fn message_stops_at_ampersand() {
        let flash = parse("#notify-info=a%26b&other=1").expect("valid").expect("flash");
        assert_eq!(flash.message, "a&b");
    }

    #[test]
    fn unrelated_fragments_are_ignored() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("#section-2"), Ok(None));
        assert_eq!(parse("#notify-=x"), Ok(None));
        assert_eq!(parse("#notify-info="), Ok(None));
    }

    #[test]
    fn malformed_escapes_are_errors() {
        assert_eq!(
            parse("#notify-info=100%"),
            Err(FragmentError::MalformedEscape(3))
        );
        assert_eq!(
            decode_uri_component("%zz"),
            Err(FragmentError::MalformedEscape(0))
        );
        assert_eq!(decode_uri_component("%ff"), Err(FragmentError::InvalidUtf8));
    }

    #[test]
    fn decodes_multibyte_and_keeps_plus() {
        assert_eq!(decode_uri_component("caf%C3%A9+bar").as_deref(), Ok("café+bar"));
    }

    #[test]
    fn static_location_splits_url() {
        let location = StaticLocation::new("https://example.com/orders?page=2#notify-info=Hi");
        assert_eq!(location.pathname(), "/orders");
        assert_eq!(location.search(), "?page=2");
        assert_eq!(location.hash(), "#notify-info=Hi");

        let bare = StaticLocation::new("#x");
        assert_eq!(bare.pathname(), "/");
        assert_eq!(bare.hash(), "#x");
    }

    #[test]
    fn replace_state_rewrites_url() {
        let mut location = StaticLocation::new("/a?b=1#notify-info=Hi");
        location.replace_state("Page", "/a?b=1");
        assert_eq!(location.href(), "/a?b=1");
        assert_eq!(location.title(), "Page");
    }
}
