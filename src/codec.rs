//! Variable-radix token codec

use rand::Rng;

/// Smallest base the codec ever selects
pub const MIN_BASE: u32 = 12;
/// Largest base the codec ever selects (36 would make the base's own
/// decimal digits ambiguous against the payload alphabet)
pub const MAX_BASE: u32 = 35;

// Base floors used by derivation: 7-bit text leaves more room to randomize
const ASCII_FLOOR: u32 = 12;
const WIDE_FLOOR: u32 = 16;

/// Digit alphabet shared by every base up to 36
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Error type for token encoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Character code cannot be represented as two digits in any valid base
    CharOutOfRange { ch: char, code: u32 },
    /// A forced base is too small for the highest character code present
    BaseTooSmall { base: u32, code: u32 },
    /// A forced base falls outside the [12, 35] range
    BaseOutOfRange { base: u32 },
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::CharOutOfRange { ch, code } => {
                write!(
                    f,
                    "Character '{}' (code {}) exceeds {} and cannot fit in two digits of any base",
                    ch,
                    code,
                    MAX_BASE * MAX_BASE - 1
                )
            }
            EncodeError::BaseTooSmall { base, code } => {
                write!(
                    f,
                    "Base {} can only represent codes below {}, but the text contains code {}",
                    base,
                    base * base,
                    code
                )
            }
            EncodeError::BaseOutOfRange { base } => {
                write!(f, "Base {} is outside the valid range [{}, {}]", base, MIN_BASE, MAX_BASE)
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// Error type for token decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Token structure is broken: too short, non-decimal base digits,
    /// out-of-range base, or odd-length payload
    MalformedToken { reason: &'static str },
    /// A payload pair contains a digit that is invalid in the token's base
    InvalidDigitPair { pair: String, base: u32 },
    /// A decoded value is not a Unicode scalar
    InvalidCharCode { code: u32 },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MalformedToken { reason } => {
                write!(f, "Malformed token: {}", reason)
            }
            DecodeError::InvalidDigitPair { pair, base } => {
                write!(f, "Digit pair '{}' is not a valid base-{} numeral", pair, base)
            }
            DecodeError::InvalidCharCode { code } => {
                write!(f, "Decoded value {} is not a valid character code", code)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Encodes text into base-tagged radix tokens and back.
///
/// A token is `D1 M D2`: the two decimal digits of the base wrapped around a
/// payload of fixed-width digit pairs, one pair per source character:
///
/// ```text
/// encode("A") with base 16  ->  "1416"
///                                ^  ^^-- second base digit
///                                |  \--- "41", 0x41 = 'A'
///                                \------ first base digit
/// ```
///
/// The base varies per call (uniformly random within what the text allows)
/// so repeated encodes of the same address look different on the wire.
#[derive(Debug, Clone)]
pub struct Codec {
    /// Pinned base, bypassing random derivation (tests, reproducible output)
    forced_base: Option<u32>,
    /// Verbosity level for base-widening warnings
    verbose: u8,
}

impl Codec {
    /// Create a codec that derives a fresh random base per encode call
    pub fn new() -> Self {
        Self {
            forced_base: None,
            verbose: 0,
        }
    }

    /// Pin the base instead of deriving one (must be in `[12, 35]`)
    pub fn with_base(mut self, base: u32) -> Self {
        self.forced_base = Some(base);
        self
    }

    /// Set verbosity level (0-3)
    pub fn with_verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Pick a base for the given text.
    ///
    /// The floor is 12 when every character code is below 128, else 16, and
    /// is widened further when the highest code needs more than the floor can
    /// hold in two digits. The result is uniform in `[floor, 35]`.
    pub fn derive_base(&self, text: &str) -> u32 {
        let max_code = text.chars().map(|c| c as u32).max().unwrap_or(0);
        let mut floor = if max_code < 128 { ASCII_FLOOR } else { WIDE_FLOOR };

        // Smallest base whose digit pairs can hold max_code; the original
        // design skipped this and silently corrupted codes >= floor^2.
        if let Some(fit) = (floor..=MAX_BASE).find(|b| max_code < b * b) {
            if fit > floor {
                if self.verbose > 0 {
                    eprintln!(
                        "Warning: widening base floor from {} to {} to fit character code {}",
                        floor, fit, max_code
                    );
                }
                floor = fit;
            }
        }

        rand::thread_rng().gen_range(floor..=MAX_BASE)
    }

    /// Encode text into a base-tagged token
    pub fn encode(&self, text: &str) -> Result<String, EncodeError> {
        let max = text.chars().max_by_key(|&c| c as u32);
        if let Some(ch) = max {
            let code = ch as u32;
            if code >= MAX_BASE * MAX_BASE {
                return Err(EncodeError::CharOutOfRange { ch, code });
            }
        }

        let base = match self.forced_base {
            Some(base) => {
                if !(MIN_BASE..=MAX_BASE).contains(&base) {
                    return Err(EncodeError::BaseOutOfRange { base });
                }
                if let Some(ch) = max {
                    let code = ch as u32;
                    if code >= base * base {
                        return Err(EncodeError::BaseTooSmall { base, code });
                    }
                }
                base
            }
            None => self.derive_base(text),
        };

        let mut token = String::with_capacity(text.chars().count() * 2 + 2);
        token.push((b'0' + (base / 10) as u8) as char);
        for ch in text.chars() {
            let pair = to_radix(ch as u32, base);
            // Decode walks the payload two characters at a time
            if pair.len() < 2 {
                token.push('0');
            }
            token.push_str(&pair);
        }
        token.push((b'0' + (base % 10) as u8) as char);

        Ok(token)
    }

    /// Decode a token back to its original text
    pub fn decode(&self, token: &str) -> Result<String, DecodeError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 2 {
            return Err(DecodeError::MalformedToken {
                reason: "token is shorter than the two base digits",
            });
        }

        let hi = chars[0].to_digit(10).ok_or(DecodeError::MalformedToken {
            reason: "first character is not a decimal digit",
        })?;
        let lo = chars[chars.len() - 1]
            .to_digit(10)
            .ok_or(DecodeError::MalformedToken {
                reason: "last character is not a decimal digit",
            })?;
        let base = hi * 10 + lo;
        if !(MIN_BASE..=MAX_BASE).contains(&base) {
            return Err(DecodeError::MalformedToken {
                reason: "base digits fall outside the 12-35 range",
            });
        }

        let payload = &chars[1..chars.len() - 1];
        if payload.len() % 2 != 0 {
            return Err(DecodeError::MalformedToken {
                reason: "payload has an odd number of characters",
            });
        }

        let mut out = String::with_capacity(payload.len() / 2);
        for pair in payload.chunks(2) {
            let pair: String = pair.iter().collect();
            let code = parse_radix(&pair, base).ok_or_else(|| DecodeError::InvalidDigitPair {
                pair: pair.clone(),
                base,
            })?;
            let ch = char::from_u32(code).ok_or(DecodeError::InvalidCharCode { code })?;
            out.push(ch);
        }

        Ok(out)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an integer numeral between bases, string to string.
///
/// Both bases must be in `[2, 36]`; returns `None` for an empty numeral, a
/// digit invalid in `from`, or an out-of-range base.
///
/// ```
/// use mailcloak::codec::convert;
///
/// assert_eq!(convert("123", 10, 16).as_deref(), Some("7b"));
/// assert_eq!(convert("ff", 16, 10).as_deref(), Some("255"));
/// ```
pub fn convert(num: &str, from: u32, to: u32) -> Option<String> {
    if !(2..=36).contains(&from) || !(2..=36).contains(&to) {
        return None;
    }
    parse_radix(num, from).map(|n| to_radix(n, to))
}

/// Parse a numeral in the given base; case-insensitive, no sign
fn parse_radix(num: &str, base: u32) -> Option<u32> {
    if num.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for ch in num.chars() {
        let digit = ch.to_digit(base)?;
        value = value.checked_mul(base)?.checked_add(digit)?;
    }
    Some(value)
}

/// Format an integer in the given base, lowercase digits
fn to_radix(mut num: u32, base: u32) -> String {
    if num == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while num > 0 {
        digits.push(DIGITS[(num % base) as usize]);
        num /= base;
    }
    digits.reverse();
    digits.iter().map(|&d| d as char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_example_base_16() {
        let codec = Codec::new().with_base(16);
        assert_eq!(codec.encode("A").unwrap(), "1416");
    }

    #[test]
    fn test_decode_example_base_16() {
        let codec = Codec::new();
        assert_eq!(codec.decode("1416").unwrap(), "A");
    }

    #[test]
    fn test_round_trip_every_base() {
        let text = "mailto:user@example.com?subject=Hi&body=Hello there";
        let codec = Codec::new();
        for base in MIN_BASE..=MAX_BASE {
            let token = Codec::new().with_base(base).encode(text).unwrap();
            assert_eq!(codec.decode(&token).unwrap(), text, "base {}", base);
        }
    }

    #[test]
    fn test_token_shape() {
        let text = "a@b.com";
        let token = Codec::new().encode(text).unwrap();
        assert_eq!(token.len(), 2 * text.len() + 2);

        let first = token.chars().next().unwrap();
        let last = token.chars().last().unwrap();
        let base = first.to_digit(10).unwrap() * 10 + last.to_digit(10).unwrap();
        assert!((MIN_BASE..=MAX_BASE).contains(&base));
    }

    #[test]
    fn test_derive_base_ascii_floor() {
        let codec = Codec::new();
        for _ in 0..100 {
            let base = codec.derive_base("plain ascii text");
            assert!((12..=35).contains(&base));
        }
    }

    #[test]
    fn test_derive_base_wide_floor() {
        let codec = Codec::new();
        for _ in 0..100 {
            let base = codec.derive_base("café");
            assert!((16..=35).contains(&base));
        }
    }

    #[test]
    fn test_derive_base_widens_for_large_codes() {
        // U+01F4 has code 500; bases below 23 cannot hold it in two digits
        let codec = Codec::new();
        for _ in 0..100 {
            let base = codec.derive_base("\u{1F4}");
            assert!(base * base > 500, "base {} too small for code 500", base);
        }
    }

    #[test]
    fn test_encode_empty_text() {
        let token = Codec::new().encode("").unwrap();
        assert_eq!(token.len(), 2);
        assert_eq!(Codec::new().decode(&token).unwrap(), "");
    }

    #[test]
    fn test_forced_base_too_small() {
        // é is code 233, above 12^2 - 1 = 143
        let result = Codec::new().with_base(12).encode("é");
        assert_eq!(
            result.unwrap_err(),
            EncodeError::BaseTooSmall { base: 12, code: 233 }
        );
    }

    #[test]
    fn test_forced_base_out_of_range() {
        let result = Codec::new().with_base(36).encode("abc");
        assert_eq!(result.unwrap_err(), EncodeError::BaseOutOfRange { base: 36 });
    }

    #[test]
    fn test_char_out_of_range() {
        // € is code 8364, beyond 35^2 - 1 = 1224
        let result = Codec::new().encode("€");
        assert_eq!(
            result.unwrap_err(),
            EncodeError::CharOutOfRange { ch: '€', code: 8364 }
        );
    }

    #[test]
    fn test_decode_odd_payload() {
        let result = Codec::new().decode("1abc6");
        assert!(matches!(result, Err(DecodeError::MalformedToken { .. })));
    }

    #[test]
    fn test_decode_too_short() {
        let result = Codec::new().decode("1");
        assert!(matches!(result, Err(DecodeError::MalformedToken { .. })));
    }

    #[test]
    fn test_decode_non_decimal_base_digits() {
        let result = Codec::new().decode("x41416");
        assert!(matches!(result, Err(DecodeError::MalformedToken { .. })));
    }

    #[test]
    fn test_decode_base_out_of_range() {
        // Base digits read as 11
        let result = Codec::new().decode("14141");
        assert!(matches!(result, Err(DecodeError::MalformedToken { .. })));
    }

    #[test]
    fn test_decode_invalid_digit_pair() {
        // 'z' is not a base-12 digit
        let result = Codec::new().decode("1zz2");
        assert_eq!(
            result.unwrap_err(),
            DecodeError::InvalidDigitPair {
                pair: "zz".to_string(),
                base: 12
            }
        );
    }

    #[test]
    fn test_convert_between_bases() {
        assert_eq!(convert("123", 10, 16).as_deref(), Some("7b"));
        assert_eq!(convert("ff", 16, 10).as_deref(), Some("255"));
        assert_eq!(convert("101", 2, 10).as_deref(), Some("5"));
        assert_eq!(convert("0", 10, 35).as_deref(), Some("0"));
    }

    #[test]
    fn test_convert_rejects_bad_input() {
        assert_eq!(convert("z", 12, 10), None);
        assert_eq!(convert("", 10, 16), None);
        assert_eq!(convert("123", 1, 10), None);
        assert_eq!(convert("123", 10, 37), None);
    }
}
