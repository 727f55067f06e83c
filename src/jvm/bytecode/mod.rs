//! The raw structural model of a class file and the binary codec.
//!
//! Decoding copies the class file into plain data structures and encoding writes them back in
//! the same order. Indices are kept as numbers and attribute payloads are kept as bytes; nothing
//! is resolved or interpreted at this level.
mod attribute;
mod class_file;
mod errors;
mod member_info;
pub(crate) mod reader_utils;

use std::{
    io::{self, Read, Write},
    num::TryFromIntError,
};

pub use attribute::AttributeInfo;
pub use class_file::{ClassFile, ModelId, ParseOptions, TrailingData};
pub use errors::{DecodeError, EncodeError};
pub use member_info::MemberInfo;
use num_traits::ToBytes;

pub(crate) trait FromReader {
    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

/// Trait for writing a raw class file element to a writer.
pub trait ToWriter {
    /// Writes the raw element to the given writer.
    ///
    /// # Errors
    /// See [`EncodeError`] for more information.
    fn to_writer<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError>;
}

pub(crate) fn write_length<Len>(
    writer: &mut (impl Write + ?Sized),
    length: usize,
) -> Result<(), EncodeError>
where
    usize: TryInto<Len, Error = TryFromIntError>,
    Len: ToBytes,
    <Len as ToBytes>::Bytes: IntoIterator<Item = u8>,
{
    let length = length.try_into()?;
    writer.write_all(length.to_be_bytes().as_ref())?;
    Ok(())
}

/// Reads a `u16`-counted table of elements.
pub(crate) fn read_table<T, R>(reader: &mut R) -> Result<Vec<T>, DecodeError>
where
    T: FromReader,
    R: Read + ?Sized,
{
    use reader_utils::ValueReaderExt;

    let count: u16 = reader.read_value()?;
    (0..count).map(|_| T::from_reader(reader)).collect()
}

/// Writes a `u16`-counted table of elements.
pub(crate) fn write_table<T, W>(writer: &mut W, elements: &[T]) -> Result<(), EncodeError>
where
    T: ToWriter,
    W: Write + ?Sized,
{
    write_length::<u16>(writer, elements.len())?;
    for element in elements {
        element.to_writer(writer)?;
    }
    Ok(())
}

impl FromReader for u16 {
    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        use reader_utils::ValueReaderExt;

        Ok(reader.read_value()?)
    }
}

impl ToWriter for u16 {
    fn to_writer<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_all(&self.to_be_bytes())?;
        Ok(())
    }
}
