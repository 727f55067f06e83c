use std::{
    io::{self, Read},
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::{debug, trace};

use super::{
    AttributeInfo, DecodeError, EncodeError, FromReader, MemberInfo, ToWriter, read_table,
    reader_utils::ValueReaderExt, write_table,
};
use crate::{jvm::constant_pool::ConstantPool, macros::see_jvm_spec};

const JAVA_CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// The identity of a decoded [`ClassFile`].
///
/// Every decoded (or cloned) class file gets a distinct identity, even when its bytes are
/// identical to another one. Handles produced by the accessor layer carry the identity of the
/// class file they were taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("class file #{_0}")]
pub struct ModelId(u64);

impl ModelId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The raw representation of a class file.
///
/// All fields are kept exactly as stored. Indices into [`constant_pool`](Self::constant_pool)
/// are plain numbers, so editing them directly bypasses every check made by the accessor
/// layer in [`crate::jvm::class`].
#[doc = see_jvm_spec!(4, 1)]
#[derive(Debug)]
pub struct ClassFile {
    /// The minor version of the class file format.
    pub minor_version: u16,
    /// The major version of the class file format.
    pub major_version: u16,
    /// The constant pool.
    pub constant_pool: ConstantPool,
    /// The access flags of the class.
    pub access_flags: u16,
    /// The index of the [`Entry::Class`](crate::jvm::constant_pool::Entry::Class) of this class.
    pub this_class: u16,
    /// The index of the [`Entry::Class`](crate::jvm::constant_pool::Entry::Class) of the super
    /// class, or `0` if there is none.
    pub super_class: u16,
    /// The indices of the [`Entry::Class`](crate::jvm::constant_pool::Entry::Class) entries of
    /// the direct super interfaces.
    pub interfaces: Vec<u16>,
    /// The fields declared by the class.
    pub fields: Vec<MemberInfo>,
    /// The methods declared by the class.
    pub methods: Vec<MemberInfo>,
    /// The attributes of the class.
    pub attributes: Vec<AttributeInfo>,
    id: ModelId,
}

/// What to do with bytes following the end of the class file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingData {
    /// Fail with [`DecodeError::TrailingBytes`].
    /// This guarantees that encoding the decoded class file gives back the input.
    #[default]
    Reject,
    /// Skip the trailing bytes. They are not kept, so encoding the decoded class file gives back
    /// the input without them.
    Ignore,
}

/// Options for decoding a class file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// What to do with bytes following the end of the class file.
    pub trailing_data: TrailingData,
}

impl ParseOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets what to do with bytes following the end of the class file.
    #[must_use]
    pub fn trailing_data(mut self, policy: TrailingData) -> Self {
        self.trailing_data = policy;
        self
    }
}

impl ClassFile {
    /// Decodes a class file with the default [`ParseOptions`].
    /// # Errors
    /// See [`DecodeError`] for more information.
    pub fn parse(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::parse_with(bytes, ParseOptions::default())
    }

    /// Decodes a class file.
    /// # Errors
    /// See [`DecodeError`] for more information.
    pub fn parse_with(bytes: &[u8], options: ParseOptions) -> Result<Self, DecodeError> {
        let mut reader = bytes;
        let class_file = Self::from_reader_exact(&mut reader)
            .inspect_err(|err| debug!(%err, "rejecting class file"))?;
        if !reader.is_empty() {
            match options.trailing_data {
                TrailingData::Reject => {
                    debug!(trailing = reader.len(), "rejecting class file with trailing data");
                    return Err(DecodeError::TrailingBytes(reader.len()));
                }
                TrailingData::Ignore => {
                    debug!(trailing = reader.len(), "ignoring trailing data");
                }
            }
        }
        debug!(
            id = %class_file.id,
            major = class_file.major_version,
            minor = class_file.minor_version,
            constants = class_file.constant_pool.len(),
            fields = class_file.fields.len(),
            methods = class_file.methods.len(),
            "decoded class file"
        );
        Ok(class_file)
    }

    /// Reads the given reader to its end and decodes the bytes with the default
    /// [`ParseOptions`].
    /// # Errors
    /// See [`DecodeError`] for more information.
    pub fn from_reader<R>(reader: &mut R) -> Result<Self, DecodeError>
    where
        R: Read + ?Sized,
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::parse(&bytes)
    }

    /// Encodes the class file.
    /// # Errors
    /// See [`EncodeError`] for more information.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();
        self.to_writer(&mut bytes)?;
        Ok(bytes)
    }

    /// The identity of this class file.
    #[must_use]
    pub const fn id(&self) -> ModelId {
        self.id
    }

    /// Reads exactly one class file and leaves whatever follows in the reader.
    fn from_reader_exact<R>(reader: &mut R) -> Result<Self, DecodeError>
    where
        R: Read + ?Sized,
    {
        let magic: u32 = reader.read_value()?;
        if magic != JAVA_CLASS_MAGIC {
            return Err(DecodeError::BadMagic(magic));
        }
        let minor_version = reader.read_value()?;
        let major_version = reader.read_value()?;
        let constant_pool_count = reader.read_value()?;
        trace!(constant_pool_count, "reading constant pool");
        let constant_pool = ConstantPool::from_reader(reader, constant_pool_count)?;
        let access_flags = reader.read_value()?;
        let this_class = reader.read_value()?;
        let super_class = reader.read_value()?;
        let interfaces = read_table(reader)?;
        trace!("reading fields");
        let fields = read_table(reader)?;
        trace!("reading methods");
        let methods = read_table(reader)?;
        let attributes = read_table(reader)?;

        Ok(Self {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            attributes,
            id: ModelId::fresh(),
        })
    }
}

impl ToWriter for ClassFile {
    fn to_writer<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError> {
        trace!(id = %self.id, "encoding class file");
        writer.write_all(&JAVA_CLASS_MAGIC.to_be_bytes())?;
        writer.write_all(&self.minor_version.to_be_bytes())?;
        writer.write_all(&self.major_version.to_be_bytes())?;
        self.constant_pool.to_writer(writer)?;
        writer.write_all(&self.access_flags.to_be_bytes())?;
        writer.write_all(&self.this_class.to_be_bytes())?;
        writer.write_all(&self.super_class.to_be_bytes())?;
        write_table(writer, &self.interfaces)?;
        write_table(writer, &self.fields)?;
        write_table(writer, &self.methods)?;
        write_table(writer, &self.attributes)?;
        Ok(())
    }
}

/// Compares the content of two class files. Identities are not compared.
impl PartialEq for ClassFile {
    fn eq(&self, other: &Self) -> bool {
        self.minor_version == other.minor_version
            && self.major_version == other.major_version
            && self.constant_pool == other.constant_pool
            && self.access_flags == other.access_flags
            && self.this_class == other.this_class
            && self.super_class == other.super_class
            && self.interfaces == other.interfaces
            && self.fields == other.fields
            && self.methods == other.methods
            && self.attributes == other.attributes
    }
}

impl Eq for ClassFile {}

/// The clone is a distinct class file with its own identity.
impl Clone for ClassFile {
    fn clone(&self) -> Self {
        Self {
            minor_version: self.minor_version,
            major_version: self.major_version,
            constant_pool: self.constant_pool.clone(),
            access_flags: self.access_flags,
            this_class: self.this_class,
            super_class: self.super_class,
            interfaces: self.interfaces.clone(),
            fields: self.fields.clone(),
            methods: self.methods.clone(),
            attributes: self.attributes.clone(),
            id: ModelId::fresh(),
        }
    }
}
