//! Path algebra (C6): dot-segment removal and RFC 3986 §5.2 reference
//! resolution.
use crate::error::UrlError;
use crate::parser::{self, RawParts};

/// Normalizes a path per spec.md §4.5's pragmatic variant of RFC 3986
/// §5.2.4: collapse repeated slashes, pop a retained segment unconditionally
/// on `..` (even an empty one — `////foo` becomes `foo`, not `/foo`), skip
/// `.`, and keep a trailing slash when the walk ends on `.`/`..`/an
/// originally-trailing slash.
pub fn abspath(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len());
    let mut prev_was_slash = false;
    for ch in path.chars() {
        if ch == '/' {
            if !prev_was_slash {
                collapsed.push(ch);
            }
            prev_was_slash = true;
        } else {
            collapsed.push(ch);
            prev_was_slash = false;
        }
    }

    let mut retained: Vec<&str> = Vec::new();
    let mut directory = false;
    for part in collapsed.split('/') {
        if part == ".." {
            if !retained.is_empty() {
                retained.pop();
            }
            directory = true;
        } else if part == "." {
            directory = true;
        } else {
            retained.push(part);
            directory = false;
        }
    }

    let joined = retained.join("/");
    if directory { format!("{joined}/") } else { joined }
}

/// Resolves `reference` against `base`, both full URL strings, per RFC 3986
/// §5.2. Returns the resolved URL as a string; the caller (`Url::relative`)
/// reparses it, matching `url.py`'s `urljoin` + `URL.parse` two-step.
pub fn resolve(base: &str, reference: &str) -> Result<String, UrlError> {
    let base_parts = parser::split(base)?;
    let ref_parts = parser::split(reference)?;

    let (scheme, authority, path, query) = if !ref_parts.scheme.is_empty() {
        (
            ref_parts.scheme,
            authority_str(&ref_parts),
            abspath(ref_parts.path),
            ref_parts.query,
        )
    } else if ref_parts.host.is_some() {
        (
            base_parts.scheme,
            authority_str(&ref_parts),
            abspath(ref_parts.path),
            ref_parts.query,
        )
    } else if ref_parts.path.is_empty() {
        let query = if reference.contains('?') {
            ref_parts.query
        } else {
            base_parts.query
        };
        (
            base_parts.scheme,
            authority_str(&base_parts),
            abspath(base_parts.path),
            query,
        )
    } else if ref_parts.path.starts_with('/') {
        (
            base_parts.scheme,
            authority_str(&base_parts),
            abspath(ref_parts.path),
            ref_parts.query,
        )
    } else {
        let merged = merge_path(&base_parts, ref_parts.path);
        (
            base_parts.scheme,
            authority_str(&base_parts),
            abspath(&merged),
            ref_parts.query,
        )
    };

    let params = if ref_parts.scheme.is_empty() && ref_parts.host.is_none() {
        if ref_parts.path.is_empty() {
            base_parts.params.to_owned()
        } else {
            ref_parts.params.to_owned()
        }
    } else {
        ref_parts.params.to_owned()
    };

    let fragment = ref_parts.fragment;

    Ok(serialize(scheme, authority.as_deref(), &path, &params, query, fragment))
}

fn authority_str(parts: &RawParts<'_>) -> Option<String> {
    parts.host.map(|host| {
        let mut out = String::new();
        if let Some(userinfo) = parts.userinfo {
            out.push_str(userinfo);
            out.push('@');
        }
        out.push_str(host);
        if let Some(port) = parts.port {
            out.push(':');
            out.push_str(port);
        }
        out
    })
}

/// RFC 3986 §5.2.3: merge a relative-reference path against the base.
fn merge_path(base: &RawParts<'_>, ref_path: &str) -> String {
    if base.host.is_some() && base.path.is_empty() {
        format!("/{ref_path}")
    } else {
        match base.path.rfind('/') {
            Some(slash) => format!("{}{ref_path}", &base.path[..=slash]),
            None => ref_path.to_owned(),
        }
    }
}

fn serialize(
    scheme: &str,
    authority: Option<&str>,
    path: &str,
    params: &str,
    query: &str,
    fragment: Option<&str>,
) -> String {
    let mut out = String::new();
    if !scheme.is_empty() {
        out.push_str(scheme);
        out.push(':');
    }
    if let Some(authority) = authority {
        out.push_str("//");
        out.push_str(authority);
    }
    out.push_str(path);
    if !params.is_empty() {
        out.push(';');
        out.push_str(params);
    }
    if !query.is_empty() {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_dot_at_root_pops_unconditionally() {
        assert_eq!(abspath("/a/b/../../c"), "/c");
        assert_eq!(abspath("/////foo"), "/foo");
        // open question (a) from spec.md §9: ".." at the root pops the
        // leading empty segment too, producing a bare name with no
        // leading slash, rather than treating root ".." as a no-op.
        assert_eq!(abspath("/../foo"), "foo");
        assert_eq!(abspath("/a/b/."), "/a/b/");
    }

    #[test]
    fn relative_dot_dot() {
        let out = resolve("http://testing.com/a/b/c", "../foo").unwrap();
        assert_eq!(out, "http://testing.com/a/foo");
    }

    #[test]
    fn relative_absolute_path() {
        let out = resolve("http://testing.com/a/b/c", "/foo").unwrap();
        assert_eq!(out, "http://testing.com/foo");
    }

    #[test]
    fn relative_full_url_wins() {
        let out = resolve("http://testing.com/a/b/c", "http://foo.com/bar").unwrap();
        assert_eq!(out, "http://foo.com/bar");
    }

    #[test]
    fn relative_opaque_scheme_unchanged() {
        let out = resolve("http://testing.com/a/b/c", "javascript:console.log(\"hello\")").unwrap();
        assert_eq!(out, "javascript:console.log(\"hello\")");
    }
}
