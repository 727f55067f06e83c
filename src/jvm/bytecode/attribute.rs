use std::io::{self, Read};

use super::{
    DecodeError, EncodeError, FromReader, ToWriter,
    reader_utils::{ValueReaderExt, read_byte_chunk},
    write_length,
};
use crate::macros::see_jvm_spec;

/// An attribute of a class file, a field or a method.
///
/// The payload is kept verbatim; its structure depends on the attribute's name and is not
/// decoded here. This includes the `Code` attribute of methods.
#[doc = see_jvm_spec!(4, 7)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeInfo {
    /// The index of the [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding the
    /// name of the attribute.
    pub name_index: u16,
    /// The content of the attribute.
    pub info: Vec<u8>,
}

impl FromReader for AttributeInfo {
    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let name_index = reader.read_value()?;
        let attribute_length: u32 = reader.read_value()?;
        let attribute_length = usize::try_from(attribute_length)
            .map_err(|_| DecodeError::Malformed("Attribute is too long for this platform"))?;
        let info = read_byte_chunk(reader, attribute_length)?;
        Ok(Self { name_index, info })
    }
}

impl ToWriter for AttributeInfo {
    fn to_writer<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_all(&self.name_index.to_be_bytes())?;
        write_length::<u32>(writer, self.info.len())?;
        writer.write_all(&self.info)?;
        Ok(())
    }
}
