//! Identifier codec: numeric ids to short codes and back.
//!
//! Codes are the positional representation of the id in the configured radix
//! (36 by default) using the digits `0-9` followed by the letters `a-z`.

/// Digit alphabet; a radix `r` uses the first `r` characters.
const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const DEFAULT_RADIX: u32 = 36;

/// Codec settings, normally built from [`crate::config::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub radix: u32,
    /// Accept uppercase letters on decode. Encoding is always lowercase.
    pub case_insensitive: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            radix: DEFAULT_RADIX,
            case_insensitive: false,
        }
    }
}

/// Errors returned by [`IdCodec::new`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("radix must be between 2 and 36, got {0}")]
    InvalidRadix(u32),
}

/// Encodes and decodes short codes.
///
/// # Examples
///
/// ```
/// use shorturl::utils::codec::IdCodec;
///
/// let codec = IdCodec::default();
/// assert_eq!(codec.encode(1270), "za");
/// assert_eq!(codec.decode("za"), Some(1270));
/// assert_eq!(codec.decode("ZA"), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IdCodec {
    radix: u64,
    case_insensitive: bool,
}

impl Default for IdCodec {
    fn default() -> Self {
        Self {
            radix: u64::from(DEFAULT_RADIX),
            case_insensitive: false,
        }
    }
}

impl IdCodec {
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        if !(2..=36).contains(&config.radix) {
            return Err(CodecError::InvalidRadix(config.radix));
        }

        Ok(Self {
            radix: u64::from(config.radix),
            case_insensitive: config.case_insensitive,
        })
    }

    /// Returns the shortest representation of `id`; `0` encodes to `"0"`.
    pub fn encode(&self, mut id: u64) -> String {
        if id == 0 {
            return "0".to_string();
        }

        let mut digits = Vec::with_capacity(13);
        while id > 0 {
            digits.push(ALPHABET[(id % self.radix) as usize]);
            id /= self.radix;
        }
        digits.reverse();

        // The alphabet is ASCII.
        digits.into_iter().map(char::from).collect()
    }

    /// Parses a code back into an id.
    ///
    /// Returns `None` for empty input, characters outside the alphabet of the
    /// radix, and values that overflow `u64`.
    pub fn decode(&self, code: &str) -> Option<u64> {
        if code.is_empty() {
            return None;
        }

        code.bytes().try_fold(0u64, |acc, byte| {
            let digit = self.digit_value(byte)?;
            acc.checked_mul(self.radix)?.checked_add(digit)
        })
    }

    fn digit_value(&self, byte: u8) -> Option<u64> {
        let byte = if self.case_insensitive {
            byte.to_ascii_lowercase()
        } else {
            byte
        };

        let value = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'z' => byte - b'a' + 10,
            _ => return None,
        };

        let value = u64::from(value);
        (value < self.radix).then_some(value)
    }
}
