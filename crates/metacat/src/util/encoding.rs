//! Percent-style text codec.
//!
//! Readme bodies travel percent-encoded on the wire: every byte outside the
//! unreserved set `A-Z a-z 0-9 - _ . ~` becomes `%XX` (uppercase hex).
//! Decoding validates both the hex pairs and the resulting UTF-8.

/// Error type for encoded-text decoding failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDecodeError {
    pub message: String,
}

impl std::fmt::Display for TextDecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TextDecodeError {}

fn is_unreserved(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~')
}

/// Percent-encodes text for the wire.
pub fn encode_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        if is_unreserved(byte) {
            out.push(byte as char);
        } else {
            out.push('%');
            out.push(char::from_digit((byte >> 4) as u32, 16).unwrap().to_ascii_uppercase());
            out.push(char::from_digit((byte & 0x0F) as u32, 16).unwrap().to_ascii_uppercase());
        }
    }
    out
}

/// Decodes percent-encoded wire text.
pub fn decode_text(encoded: &str) -> Result<String, TextDecodeError> {
    let bytes = encoded.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(TextDecodeError {
                        message: format!("truncated escape at offset {i}"),
                    });
                }
                let hi = hex_value(bytes[i + 1]).ok_or_else(|| TextDecodeError {
                    message: format!("invalid hex digit at offset {}", i + 1),
                })?;
                let lo = hex_value(bytes[i + 2]).ok_or_else(|| TextDecodeError {
                    message: format!("invalid hex digit at offset {}", i + 2),
                })?;
                out.push((hi << 4) | lo);
                i += 3;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8(out).map_err(|_| TextDecodeError {
        message: "decoded bytes are not valid UTF-8".to_string(),
    })
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|d| d as u8)
}
