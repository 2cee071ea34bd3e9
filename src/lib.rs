//! # urlcanon
//!
//! A toolkit for parsing, normalizing, and comparing URLs ([RFC3986],
//! [RFC3987]).
//!
//! # Library Design
//!
//! The crate splits URL handling into small, independently testable
//! layers rather than one monolithic parser.
//!
//! ## Definitions
//!
//! - [`parser`] splitting raw text into the eight URI components ([RFC3986])
//! - [`percent`] percent-encoding and decoding ([RFC3986] Section 2)
//! - [`idna`] internationalized domain names via Punycode ([RFC3492])
//! - [`psl`] Public Suffix List lookups for `pld`/`tld`
//! - [`path`] dot-segment removal and reference resolution ([RFC3986] Section 5.2)
//!
//! ## User Abstraction
//!
//! - [`url`] the [`url::Url`] record and its chainable transforms
//!
//! # Usage
//!
//! Parse a URL with [`parse`], normalize it with a chain of transforms
//! from [`url::Url`], then compare with [`url::Url::equiv`].
//!
//! [RFC3986]: <https://www.rfc-editor.org/rfc/rfc3986.html>
//! [RFC3987]: <https://www.rfc-editor.org/rfc/rfc3987.html>
//! [RFC3492]: <https://www.rfc-editor.org/rfc/rfc3492.html>
#![warn(missing_debug_implementations)]

mod log;

pub mod ascii;
pub mod error;
pub mod idna;
pub mod parser;
pub mod path;
pub mod percent;
pub mod psl;
pub mod url;

mod equiv;

pub use error::UrlError;
pub use url::Url;

/// Parses `input`, declared under `encoding`, into a [`Url`]. Equivalent
/// to [`Url::parse`], provided at the crate root for `urlcanon::parse(...)`
/// callers who don't need the rest of the `Url` API in scope.
pub fn parse(input: impl AsRef<[u8]>, encoding: &str) -> Result<Url, UrlError> {
    Url::parse(input, encoding)
}
