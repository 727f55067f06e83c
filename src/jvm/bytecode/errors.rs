use std::{io, num::TryFromIntError};

/// An error that occurs when decoding a class file.
///
/// Decoding is all-or-nothing: when an error is returned, no part of the class file is.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The buffer does not start with `0xCAFEBABE`.
    #[error("The buffer does not contain a Java class file (magic: {0:#010X})")]
    BadMagic(u32),
    /// The input ended before the structure it declares.
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    /// The constant pool contains an entry with an unknown tag.
    #[error("Unknown constant pool tag {0}")]
    UnknownConstantKind(u8),
    /// The structure of the class file is inconsistent.
    #[error("Malformed class file: {0}")]
    Malformed(&'static str),
    /// There are unread bytes after the class file.
    #[error("Unexpected {0} bytes at the end of the class file")]
    TrailingBytes(usize),
    /// The underlying reader failed.
    #[error("Failed to read the class file: {0}")]
    Io(io::Error),
}

impl From<io::Error> for DecodeError {
    fn from(value: io::Error) -> Self {
        if value.kind() == io::ErrorKind::UnexpectedEof {
            Self::UnexpectedEnd
        } else {
            Self::Io(value)
        }
    }
}

/// An error that occurs when encoding a class file.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The underlying writer failed.
    #[error("Failed to write the class file: {0}")]
    Io(#[from] io::Error),
    /// A table or a payload is longer than its length prefix can express.
    /// For instance an attribute table with more than 65535 attributes.
    #[error("Length out of range: {0}")]
    LengthOverflow(#[from] TryFromIntError),
}
