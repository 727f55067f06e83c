use std::{borrow::Cow, fmt};

use itertools::Itertools;

use crate::macros::see_jvm_spec;

/// The content of a [`Entry::Utf8`](super::Entry::Utf8) constant.
///
/// The bytes are kept exactly as stored in the class file, in the modified UTF-8 encoding used
/// by the JVM. They are never re-validated or re-normalized, so encoding a decoded class file
/// writes back the same bytes.
#[doc = see_jvm_spec!(4, 4, 7)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JavaString {
    bytes: Vec<u8>,
}

impl JavaString {
    /// Wraps the given modified UTF-8 bytes without validating them.
    #[must_use]
    pub const fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The raw modified UTF-8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the string and returns the raw modified UTF-8 bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the number of bytes in the encoded form.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the string is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decodes the string as modified UTF-8.
    /// Returns [`None`] if the bytes are not valid modified UTF-8.
    #[must_use]
    pub fn try_to_str(&self) -> Option<Cow<'_, str>> {
        cesu8::from_java_cesu8(&self.bytes).ok()
    }

    /// Best-effort text view of the string.
    ///
    /// Valid modified UTF-8 is decoded exactly. Anything else falls back to a lossy UTF-8
    /// decoding, with invalid sequences replaced by `U+FFFD`.
    #[must_use]
    pub fn to_str(&self) -> Cow<'_, str> {
        self.try_to_str()
            .unwrap_or_else(|| String::from_utf8_lossy(&self.bytes))
    }
}

impl From<&str> for JavaString {
    fn from(value: &str) -> Self {
        Self::from_bytes(cesu8::to_java_cesu8(value).into_owned())
    }
}

impl From<String> for JavaString {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for JavaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_to_str() {
            Some(text) => write!(f, "\"{}\"", text.escape_debug()),
            None => write!(
                f,
                "[{}] // invalid modified UTF-8",
                self.bytes.iter().map(|it| format!("0x{it:02X}")).join(" ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn text_survives_encoding(text in any::<String>()) {
            let java_str = JavaString::from(text.as_str());
            assert_eq!(java_str.try_to_str().as_deref(), Some(text.as_str()));
        }
    }

    #[test]
    fn nul_uses_two_bytes() {
        let java_str = JavaString::from("a\0b");
        assert_eq!(java_str.as_bytes(), &[b'a', 0xC0, 0x80, b'b']);
    }

    #[test]
    fn invalid_bytes_are_kept() {
        let bytes = vec![b'o', b'k', 0xFF];
        let java_str = JavaString::from_bytes(bytes.clone());
        assert!(java_str.try_to_str().is_none());
        assert_eq!(java_str.to_str(), "ok\u{FFFD}");
        assert_eq!(java_str.into_bytes(), bytes);
    }

    #[test]
    fn display_invalid() {
        let java_str = JavaString::from_bytes(vec![0xFF, 0x01]);
        assert_eq!(
            java_str.to_string(),
            "[0xFF 0x01] // invalid modified UTF-8"
        );
    }
}
