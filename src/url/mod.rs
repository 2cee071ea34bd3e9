//! URL value and transformation algebra (C7).
//!
//! [`Url`] is the single core entity (spec.md §3): eight components, parsed
//! once via [`crate::parser`], then rewritten through a chain of transforms
//! that each mutate the record in place and return `&mut Self` so calls
//! compose as `url.canonical().defrag().abspath()`.
mod fmt;
mod transforms;

use crate::ascii;
use crate::error::UrlError;
use crate::parser;

/// The default port for a scheme, if any (spec.md §4.6).
pub fn default_port(scheme: &str) -> Option<u32> {
    match scheme {
        "http" => Some(80),
        "https" => Some(443),
        _ => None,
    }
}

/// A parsed, mutable URL, per spec.md §3.
#[derive(Clone)]
pub struct Url {
    scheme: String,
    userinfo: Option<String>,
    host: Option<String>,
    port: Option<u32>,
    path: String,
    params: String,
    query: String,
    fragment: Option<String>,
}

impl Url {
    /// Parses `input`, declared under `encoding` (`"utf-8"` unless the
    /// caller knows better), into a [`Url`].
    pub fn parse(input: impl AsRef<[u8]>, encoding: &str) -> Result<Self, UrlError> {
        let text = ascii::decode(input.as_ref(), encoding)?;
        Self::from_str(&text)
    }

    /// Parses `input`, assumed already UTF-8.
    pub fn from_str(input: &str) -> Result<Self, UrlError> {
        let parts = parser::split(input)?;

        let scheme = parts.scheme.to_ascii_lowercase();

        let host = parts.host.map(|h| h.to_ascii_lowercase());

        let port = match parts.port {
            Some(raw) => Some(parser::parse_port(raw)?),
            None => None,
        };

        let path = if parts.path.is_empty() && host.is_some() {
            "/".to_owned()
        } else {
            parts.path.to_owned()
        };

        let params = {
            let stripped = parser::strip_leading_run(parts.params, ';');
            parser::collapse_runs(stripped, ';')
        };
        let query = {
            let stripped = parser::strip_leading_run(parts.query, '?');
            parser::collapse_runs(stripped, '&')
        };

        Ok(Self {
            scheme,
            userinfo: parts.userinfo.map(str::to_owned),
            host,
            port,
            path,
            params,
            query,
            fragment: parts.fragment.map(str::to_owned),
        })
    }

    /// Deep clone. Same as [`Clone::clone`], kept as an explicit method to
    /// mirror `url.py`'s `copy()`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    // ===== accessors =====

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Alias of [`Url::host`] defaulting to `""`, matching `url.py`'s
    /// `hostname` property (never `None`).
    pub fn hostname(&self) -> &str {
        self.host.as_deref().unwrap_or("")
    }

    pub fn port(&self) -> Option<u32> {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &str {
        &self.params
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// True iff `host` is non-empty (spec.md §3).
    pub fn absolute(&self) -> bool {
        matches!(self.host.as_deref(), Some(h) if !h.is_empty())
    }

    /// The pay-level domain, via the process-wide PSL.
    pub fn pld(&self) -> String {
        crate::psl::current().pld(self.hostname())
    }

    /// The top-level (public suffix) domain, via the process-wide PSL.
    pub fn tld(&self) -> String {
        crate::psl::current().tld(self.hostname())
    }

    /// Serializes the url as text.
    pub fn unicode(&self) -> String {
        fmt::serialize(self)
    }

    /// Serializes the url as UTF-8 bytes.
    pub fn utf8(&self) -> Vec<u8> {
        self.unicode().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_through_utf8() {
        let url = Url::from_str("http://testing.com/page?a=1").unwrap();
        let again = Url::from_str(&url.unicode()).unwrap();
        assert_eq!(url, again);
    }

    #[test]
    fn empty_path_defaults_to_slash_with_authority() {
        let url = Url::from_str("http://testing.com").unwrap();
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn empty_path_stays_empty_without_authority() {
        let url = Url::from_str("relative").unwrap();
        assert_eq!(url.path(), "relative");
        let url = Url::from_str("").unwrap();
        assert_eq!(url.path(), "");
    }

    #[test]
    fn host_is_lowercased_at_construction() {
        let url = Url::from_str("http://TestING.com/Page").unwrap();
        assert_eq!(url.host(), Some("testing.com"));
        assert_eq!(url.path(), "/Page");
    }

    #[test]
    fn bad_port_is_rejected() {
        assert!(matches!(
            Url::from_str("http://www.python.org:65536/"),
            Err(UrlError::InvalidPort)
        ));
    }

    #[test]
    fn relative_url_has_no_host() {
        let url = Url::from_str("/a/b/c").unwrap();
        assert!(!url.absolute());
        assert_eq!(url.host(), None);
    }
}
