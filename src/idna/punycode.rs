//! RFC 3492 punycode, bare algorithm: no `xn--` prefix handling here, that's
//! [`super::encode_label`]/[`super::decode_label`]'s job. Standard parameters
//! throughout: `base=36, tmin=1, tmax=26, skew=38, damp=700,
//! initial_bias=72, initial_n=128`.
use crate::error::UrlError;

const BASE: u32 = 36;
const TMIN: u32 = 1;
const TMAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 128;

fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta /= if first_time { DAMP } else { 2 };
    delta += delta / num_points;

    let mut k = 0;
    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }
    k + ((BASE - TMIN + 1) * delta) / (delta + SKEW)
}

fn digit_to_char(digit: u32) -> u8 {
    match digit {
        0..=25 => b'a' + digit as u8,
        26..=35 => b'0' + (digit - 26) as u8,
        _ => unreachable!("punycode digit out of range"),
    }
}

fn char_to_digit(byte: u8) -> Option<u32> {
    match byte {
        b'a'..=b'z' => Some((byte - b'a') as u32),
        b'A'..=b'Z' => Some((byte - b'A') as u32),
        b'0'..=b'9' => Some((byte - b'0') as u32 + 26),
        _ => None,
    }
}

/// Encodes a label's extended (non-ASCII) code points into the bare
/// punycode string, *not* including the `xn--` prefix. Returns
/// `Err(PunycodeEncode)` on overflow (labels this long are rejected long
/// before they'd matter in practice).
pub fn encode(input: &str) -> Result<String, UrlError> {
    let code_points: Vec<u32> = input.chars().map(|c| c as u32).collect();

    let basic: Vec<u32> = code_points.iter().copied().filter(|&c| c < 0x80).collect();
    let mut output: Vec<u8> = basic.iter().map(|&c| c as u8).collect();

    let b = basic.len() as u32;
    let mut h = b;
    let has_basic = b > 0;

    let mut n = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;

    if has_basic {
        output.push(b'-');
    }

    let total = code_points.len() as u32;

    while h < total {
        let m = code_points
            .iter()
            .copied()
            .filter(|&c| c >= n)
            .min()
            .ok_or(UrlError::PunycodeEncode)?;

        delta = delta
            .checked_add((m - n).checked_mul(h + 1).ok_or(UrlError::PunycodeEncode)?)
            .ok_or(UrlError::PunycodeEncode)?;
        n = m;

        for &c in &code_points {
            if c < n {
                delta = delta.checked_add(1).ok_or(UrlError::PunycodeEncode)?;
            }
            if c == n {
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = if k <= bias {
                        TMIN
                    } else if k >= bias + TMAX {
                        TMAX
                    } else {
                        k - bias
                    };
                    if q < t {
                        break;
                    }
                    output.push(digit_to_char(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.push(digit_to_char(q));
                bias = adapt(delta, h + 1, h == b);
                delta = 0;
                h += 1;
            }
        }
        delta += 1;
        n += 1;
    }

    Ok(String::from_utf8(output).expect("punycode output is ASCII"))
}

/// Decodes a bare punycode string (no `xn--` prefix) back to text.
pub fn decode(input: &str) -> Result<String, UrlError> {
    let input = input.as_bytes();
    if !input.is_ascii() {
        return Err(UrlError::PunycodeDecode);
    }

    let (basic, rest) = match input.iter().rposition(|&b| b == b'-') {
        Some(pos) => (&input[..pos], &input[pos + 1..]),
        None => (&[][..], input),
    };

    let mut output: Vec<u32> = Vec::with_capacity(input.len());
    for &b in basic {
        if !b.is_ascii() {
            return Err(UrlError::PunycodeDecode);
        }
        output.push(b as u32);
    }

    let mut n = INITIAL_N;
    let mut i: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut pos = 0usize;

    while pos < rest.len() {
        let old_i = i;
        let mut w: u32 = 1;
        let mut k = BASE;
        loop {
            let byte = *rest.get(pos).ok_or(UrlError::PunycodeDecode)?;
            pos += 1;
            let digit = char_to_digit(byte).ok_or(UrlError::PunycodeDecode)?;

            i = i
                .checked_add(digit.checked_mul(w).ok_or(UrlError::PunycodeDecode)?)
                .ok_or(UrlError::PunycodeDecode)?;

            let t = if k <= bias {
                TMIN
            } else if k >= bias + TMAX {
                TMAX
            } else {
                k - bias
            };
            if digit < t {
                break;
            }
            w = w.checked_mul(BASE - t).ok_or(UrlError::PunycodeDecode)?;
            k += BASE;
        }

        let out_len = output.len() as u32 + 1;
        bias = adapt(i - old_i, out_len, old_i == 0);
        n = n
            .checked_add(i / out_len)
            .ok_or(UrlError::PunycodeDecode)?;
        i %= out_len;

        let ch = char::from_u32(n).ok_or(UrlError::PunycodeDecode)?;
        output.insert(i as usize, ch as u32);
        i += 1;
    }

    output
        .into_iter()
        .map(|c| char::from_u32(c).ok_or(UrlError::PunycodeDecode))
        .collect::<Result<String, _>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let label = "kündigen";
        let encoded = encode(label).unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, label);
    }

    #[test]
    fn pure_ascii_basic_prefix() {
        // every code point is basic, delimiter is still appended
        let encoded = encode("abc").unwrap();
        assert_eq!(encoded, "abc-");
    }

    #[test]
    fn known_vector_kundigen() {
        // "kündigen" -> "kndigen-n2a" is the well known xn-- body
        assert_eq!(encode("kündigen").unwrap(), "kndigen-n2a");
        assert_eq!(decode("kndigen-n2a").unwrap(), "kündigen");
    }
}
