//! Chainable transforms (C7), spec.md §4.6. Each mutates the record in
//! place and returns `&mut Self`, so calls compose:
//! `url.canonical().defrag().abspath()`.
use crate::idna;
use crate::path;
use crate::percent::{self, Class};
use crate::url::{default_port, Url};

impl Url {
    /// Sorts `query` segments (split on `&`) and `params` segments (split
    /// on `;`) lexicographically by byte, then reassembles.
    pub fn canonical(&mut self) -> &mut Self {
        self.query = sorted_join(&self.query, '&');
        self.params = sorted_join(&self.params, ';');
        self
    }

    /// `fragment` <- `None`.
    pub fn defrag(&mut self) -> &mut Self {
        self.fragment = None;
        self
    }

    /// Case-insensitive name match: removes any `k=v` or bare `k` from both
    /// `query` and `params` whose key equals one of `names`.
    pub fn deparam<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) -> &mut Self {
        let lowered: Vec<String> = names.into_iter().map(str::to_ascii_lowercase).collect();
        self.filter_params(|name, _value| lowered.iter().any(|n| n == &name.to_ascii_lowercase()))
    }

    /// Drops every `k=v` (or bare `k`, treated as `(k, "")`) where
    /// `f(k, v)` holds, from both `query` and `params`.
    pub fn filter_params(&mut self, f: impl Fn(&str, &str) -> bool) -> &mut Self {
        self.query = filter_segments(&self.query, '&', &f);
        self.params = filter_segments(&self.params, ';', &f);
        self
    }

    /// `userinfo` <- `None`.
    pub fn deuserinfo(&mut self) -> &mut Self {
        self.userinfo = None;
        self
    }

    /// Dot-segment removal and repeated-slash collapsing (spec.md §4.5).
    pub fn abspath(&mut self) -> &mut Self {
        self.path = path::abspath(&self.path);
        self
    }

    /// Percent-encoding normalization of `path`, `query`, `params`, and
    /// `userinfo` (when present). `strict` selects between the two modes
    /// of spec.md §4.2.
    pub fn escape(&mut self, strict: bool) -> &mut Self {
        let encode = if strict { percent::encode_strict } else { percent::encode_non_strict };

        self.path = bytes_to_string(encode(self.path.as_bytes(), Class::Path));
        self.query = bytes_to_string(encode(self.query.as_bytes(), Class::Query));
        self.params = bytes_to_string(encode(self.params.as_bytes(), Class::Query));
        if let Some(userinfo) = &self.userinfo {
            self.userinfo = Some(bytes_to_string(encode(userinfo.as_bytes(), Class::Userinfo)));
        }
        self
    }

    /// Unconditionally decodes every `%HH` in `path` (path only, per
    /// spec.md §4.6).
    pub fn unescape(&mut self) -> &mut Self {
        self.path = bytes_to_string(percent::decode(self.path.as_bytes()));
        self
    }

    /// Clears `port` if it equals the default port for `scheme`.
    pub fn remove_default_port(&mut self) -> &mut Self {
        if self.port.is_some() && self.port == default_port(&self.scheme) {
            self.port = None;
        }
        self
    }

    /// IDNA-encodes `host`. Errors with `RelativeUrl` when `host` is
    /// empty/absent.
    pub fn punycode(&mut self) -> Result<&mut Self, crate::error::UrlError> {
        let host = self.host.as_deref().unwrap_or("");
        self.host = Some(idna::encode_host(host)?);
        Ok(self)
    }

    /// IDNA-decodes `host`. Errors with `RelativeUrl` when `host` is
    /// empty/absent.
    pub fn unpunycode(&mut self) -> Result<&mut Self, crate::error::UrlError> {
        let host = self.host.as_deref().unwrap_or("");
        self.host = Some(idna::decode_host(host)?);
        Ok(self)
    }

    /// `abspath().escape()` with non-strict escaping. Unlike `punycode()`'s
    /// host work, `sanitize()` does *not* re-lowercase the host (spec.md
    /// §9 open question (b)): the host was already lowercased once at
    /// parse time, and later transforms shouldn't assume it needs doing
    /// again.
    pub fn sanitize(&mut self) -> &mut Self {
        self.abspath().escape(false)
    }

    /// Resolves `reference` against `self` per RFC 3986 §5.2, returning a
    /// freshly parsed `Url`.
    pub fn relative(&self, reference: &str) -> Result<Url, crate::error::UrlError> {
        let resolved = path::resolve(&self.unicode(), reference)?;
        Url::from_str(&resolved)
    }
}

fn bytes_to_string(bytes: Vec<u8>) -> String {
    // `percent` only ever emits ASCII (literal safe-set bytes plus %HH),
    // and literal bytes it passes through are already part of a
    // previously-validated UTF-8 string, so this never fails in practice;
    // still propagate losslessly instead of panicking on adversarial input.
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

fn sorted_join(segments: &str, sep: char) -> String {
    if segments.is_empty() {
        return String::new();
    }
    let mut parts: Vec<&str> = segments.split(sep).collect();
    parts.sort_unstable();
    parts.join(&sep.to_string())
}

fn filter_segments(segments: &str, sep: char, f: &impl Fn(&str, &str) -> bool) -> String {
    let kept: Vec<&str> = segments
        .split(sep)
        .filter(|segment| {
            if segment.is_empty() {
                return false;
            }
            let (name, value) = match segment.split_once('=') {
                Some((name, value)) => (name, value),
                None => (*segment, ""),
            };
            !f(name, value)
        })
        .collect();
    kept.join(&sep.to_string())
}
