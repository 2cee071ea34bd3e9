/// A possible error value when parsing or transforming a [`Url`](crate::Url).
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// The port is non-numeric, negative, or does not fit in `0..=65535`.
    InvalidPort,
    /// The input was declared as some encoding that it does not decode as.
    InvalidEncoding,
    /// A punycode label could not be encoded: too long, empty, or overflowed.
    PunycodeEncode,
    /// A punycode (`xn--`) label could not be decoded: bad digit, bias
    /// overflow, or non-monotonic code points.
    PunycodeDecode,
    /// The operation requires a host but the url is relative.
    RelativeUrl,
}

// ===== Error =====

macro_rules! gen_error {
    ($($variant:ident => $msg:literal),* $(,)?) => {
        impl UrlError {
            const fn message(&self) -> &'static str {
                use UrlError::*;
                match self {
                    $($variant => $msg,)*
                }
            }
        }

        impl std::fmt::Display for UrlError {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.message())
            }
        }
    };
}

gen_error! {
    InvalidPort => "invalid port",
    InvalidEncoding => "input does not decode under the declared encoding",
    PunycodeEncode => "label cannot be punycode-encoded",
    PunycodeDecode => "malformed punycode label",
    RelativeUrl => "url has no host",
}

impl std::error::Error for UrlError {}

impl std::fmt::Debug for UrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}
