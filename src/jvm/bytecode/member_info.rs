use std::io::{self, Read};

use super::{
    AttributeInfo, DecodeError, EncodeError, FromReader, ToWriter, read_table,
    reader_utils::ValueReaderExt, write_table,
};
use crate::macros::see_jvm_spec;

/// The raw representation of a `field_info` or a `method_info` structure.
///
/// Both tables share the same layout; the meaning of [`access_flags`](Self::access_flags)
/// depends on which table the member is in.
#[doc = see_jvm_spec!(4, 5)]
#[doc = see_jvm_spec!(4, 6)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// The access flags of the member.
    pub access_flags: u16,
    /// The index of the [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding the
    /// name of the member.
    pub name_index: u16,
    /// The index of the [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding the
    /// descriptor of the member.
    pub descriptor_index: u16,
    /// The attributes of the member.
    pub attributes: Vec<AttributeInfo>,
}

impl FromReader for MemberInfo {
    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let access_flags = reader.read_value()?;
        let name_index = reader.read_value()?;
        let descriptor_index = reader.read_value()?;
        let attributes = read_table(reader)?;
        Ok(Self {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }
}

impl ToWriter for MemberInfo {
    fn to_writer<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_all(&self.access_flags.to_be_bytes())?;
        writer.write_all(&self.name_index.to_be_bytes())?;
        writer.write_all(&self.descriptor_index.to_be_bytes())?;
        write_table(writer, &self.attributes)?;
        Ok(())
    }
}
