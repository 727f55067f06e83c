use std::io::{self, Read};

use super::JavaString;
use crate::{
    jvm::bytecode::{
        DecodeError, EncodeError, ToWriter,
        reader_utils::{ValueReaderExt, read_byte_chunk},
        write_length,
    },
    macros::see_jvm_spec,
};

/// The kind of a constant pool entry, identified by its tag byte.
#[doc = see_jvm_spec!(4, 4)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum ConstantKind {
    /// `CONSTANT_Utf8`
    #[display("utf8")]
    Utf8 = 1,
    /// `CONSTANT_Integer`
    #[display("integer")]
    Integer = 3,
    /// `CONSTANT_Float`
    #[display("float")]
    Float = 4,
    /// `CONSTANT_Long`
    #[display("long")]
    Long = 5,
    /// `CONSTANT_Double`
    #[display("double")]
    Double = 6,
    /// `CONSTANT_Class`
    #[display("class")]
    Class = 7,
    /// `CONSTANT_String`
    #[display("string")]
    String = 8,
    /// `CONSTANT_Fieldref`
    #[display("fieldref")]
    FieldRef = 9,
    /// `CONSTANT_Methodref`
    #[display("methodref")]
    MethodRef = 10,
    /// `CONSTANT_InterfaceMethodref`
    #[display("interfacemethodref")]
    InterfaceMethodRef = 11,
    /// `CONSTANT_NameAndType`
    #[display("nameandtype")]
    NameAndType = 12,
    /// `CONSTANT_MethodHandle`
    #[display("methodhandle")]
    MethodHandle = 15,
    /// `CONSTANT_MethodType`
    #[display("methodtype")]
    MethodType = 16,
    /// `CONSTANT_Dynamic`
    #[display("dynamic")]
    Dynamic = 17,
    /// `CONSTANT_InvokeDynamic`
    #[display("invokedynamic")]
    InvokeDynamic = 18,
    /// `CONSTANT_Module`
    #[display("module")]
    Module = 19,
    /// `CONSTANT_Package`
    #[display("package")]
    Package = 20,
}

impl ConstantKind {
    /// The tag byte identifying this kind in a class file.
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// The length in bytes of the payload following the tag.
    /// Returns [`None`] for [`ConstantKind::Utf8`], whose payload is length-prefixed.
    #[must_use]
    pub const fn fixed_length(self) -> Option<usize> {
        match self {
            Self::Utf8 => None,
            Self::Class | Self::String | Self::MethodType | Self::Module | Self::Package => {
                Some(2)
            }
            Self::MethodHandle => Some(3),
            Self::Integer
            | Self::Float
            | Self::FieldRef
            | Self::MethodRef
            | Self::InterfaceMethodRef
            | Self::NameAndType
            | Self::Dynamic
            | Self::InvokeDynamic => Some(4),
            Self::Long | Self::Double => Some(8),
        }
    }

    /// Whether an entry of this kind occupies two consecutive slots in the constant pool.
    #[must_use]
    pub const fn is_double_slot(self) -> bool {
        matches!(self, Self::Long | Self::Double)
    }
}

impl TryFrom<u8> for ConstantKind {
    type Error = DecodeError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        let kind = match tag {
            1 => Self::Utf8,
            3 => Self::Integer,
            4 => Self::Float,
            5 => Self::Long,
            6 => Self::Double,
            7 => Self::Class,
            8 => Self::String,
            9 => Self::FieldRef,
            10 => Self::MethodRef,
            11 => Self::InterfaceMethodRef,
            12 => Self::NameAndType,
            15 => Self::MethodHandle,
            16 => Self::MethodType,
            17 => Self::Dynamic,
            18 => Self::InvokeDynamic,
            19 => Self::Module,
            20 => Self::Package,
            unknown => return Err(DecodeError::UnknownConstantKind(unknown)),
        };
        Ok(kind)
    }
}

/// An entry in the [`ConstantPool`](super::ConstantPool).
///
/// Indices stored in an entry point to other entries of the same pool.
/// They are kept as plain numbers and are resolved only when read through the accessor layer.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Entry {
    /// A string in modified UTF-8.
    #[doc = see_jvm_spec!(4, 4, 7)]
    Utf8(JavaString),
    /// An integer.
    #[doc = see_jvm_spec!(4, 4, 4)]
    Integer(i32),
    /// A float.
    #[doc = see_jvm_spec!(4, 4, 4)]
    Float(f32),
    /// A long. Occupies two slots.
    #[doc = see_jvm_spec!(4, 4, 5)]
    Long(i64),
    /// A double. Occupies two slots.
    #[doc = see_jvm_spec!(4, 4, 5)]
    Double(f64),
    /// A class or an interface.
    #[doc = see_jvm_spec!(4, 4, 1)]
    Class {
        /// The index of the [`Entry::Utf8`] holding its binary name.
        name_index: u16,
    },
    /// A string literal.
    #[doc = see_jvm_spec!(4, 4, 3)]
    String {
        /// The index of the [`Entry::Utf8`] holding its value.
        string_index: u16,
    },
    /// A field reference.
    #[doc = see_jvm_spec!(4, 4, 2)]
    FieldRef {
        /// The index of the [`Entry::Class`] declaring the field.
        class_index: u16,
        /// The index of the [`Entry::NameAndType`] of the field.
        name_and_type_index: u16,
    },
    /// A method reference.
    #[doc = see_jvm_spec!(4, 4, 2)]
    MethodRef {
        /// The index of the [`Entry::Class`] declaring the method.
        class_index: u16,
        /// The index of the [`Entry::NameAndType`] of the method.
        name_and_type_index: u16,
    },
    /// An interface method reference.
    #[doc = see_jvm_spec!(4, 4, 2)]
    InterfaceMethodRef {
        /// The index of the [`Entry::Class`] declaring the method.
        class_index: u16,
        /// The index of the [`Entry::NameAndType`] of the method.
        name_and_type_index: u16,
    },
    /// A name and a descriptor.
    #[doc = see_jvm_spec!(4, 4, 6)]
    NameAndType {
        /// The index of the [`Entry::Utf8`] holding the name.
        name_index: u16,
        /// The index of the [`Entry::Utf8`] holding the descriptor.
        descriptor_index: u16,
    },
    /// A method handle.
    #[doc = see_jvm_spec!(4, 4, 8)]
    MethodHandle {
        /// The kind of the handle, from 1 to 9.
        reference_kind: u8,
        /// The index of the referenced field or method.
        reference_index: u16,
    },
    /// A method type.
    #[doc = see_jvm_spec!(4, 4, 9)]
    MethodType {
        /// The index of the [`Entry::Utf8`] holding the method descriptor.
        descriptor_index: u16,
    },
    /// A dynamically computed constant.
    #[doc = see_jvm_spec!(4, 4, 10)]
    Dynamic {
        /// The index into the bootstrap method table.
        bootstrap_method_attr_index: u16,
        /// The index of the [`Entry::NameAndType`] of the constant.
        name_and_type_index: u16,
    },
    /// A call site of an `invokedynamic` instruction.
    #[doc = see_jvm_spec!(4, 4, 10)]
    InvokeDynamic {
        /// The index into the bootstrap method table.
        bootstrap_method_attr_index: u16,
        /// The index of the [`Entry::NameAndType`] of the call site.
        name_and_type_index: u16,
    },
    /// A module.
    #[doc = see_jvm_spec!(4, 4, 11)]
    Module {
        /// The index of the [`Entry::Utf8`] holding the module name.
        name_index: u16,
    },
    /// A package.
    #[doc = see_jvm_spec!(4, 4, 12)]
    Package {
        /// The index of the [`Entry::Utf8`] holding the package name.
        name_index: u16,
    },
}

impl Entry {
    /// The kind of this entry.
    #[must_use]
    pub const fn kind(&self) -> ConstantKind {
        match self {
            Self::Utf8(_) => ConstantKind::Utf8,
            Self::Integer(_) => ConstantKind::Integer,
            Self::Float(_) => ConstantKind::Float,
            Self::Long(_) => ConstantKind::Long,
            Self::Double(_) => ConstantKind::Double,
            Self::Class { .. } => ConstantKind::Class,
            Self::String { .. } => ConstantKind::String,
            Self::FieldRef { .. } => ConstantKind::FieldRef,
            Self::MethodRef { .. } => ConstantKind::MethodRef,
            Self::InterfaceMethodRef { .. } => ConstantKind::InterfaceMethodRef,
            Self::NameAndType { .. } => ConstantKind::NameAndType,
            Self::MethodHandle { .. } => ConstantKind::MethodHandle,
            Self::MethodType { .. } => ConstantKind::MethodType,
            Self::Dynamic { .. } => ConstantKind::Dynamic,
            Self::InvokeDynamic { .. } => ConstantKind::InvokeDynamic,
            Self::Module { .. } => ConstantKind::Module,
            Self::Package { .. } => ConstantKind::Package,
        }
    }

    /// The tag byte of this entry.
    #[must_use]
    pub const fn tag(&self) -> u8 {
        self.kind().tag()
    }

    /// Gets the kind of this constant pool entry as named in the JVM Specification.
    #[must_use]
    pub const fn constant_kind(&self) -> &'static str {
        match self {
            Self::Utf8(_) => "CONSTANT_Utf8",
            Self::Integer(_) => "CONSTANT_Integer",
            Self::Float(_) => "CONSTANT_Float",
            Self::Long(_) => "CONSTANT_Long",
            Self::Double(_) => "CONSTANT_Double",
            Self::Class { .. } => "CONSTANT_Class",
            Self::String { .. } => "CONSTANT_String",
            Self::FieldRef { .. } => "CONSTANT_Fieldref",
            Self::MethodRef { .. } => "CONSTANT_Methodref",
            Self::InterfaceMethodRef { .. } => "CONSTANT_InterfaceMethodref",
            Self::NameAndType { .. } => "CONSTANT_NameAndType",
            Self::MethodHandle { .. } => "CONSTANT_MethodHandle",
            Self::MethodType { .. } => "CONSTANT_MethodType",
            Self::Dynamic { .. } => "CONSTANT_Dynamic",
            Self::InvokeDynamic { .. } => "CONSTANT_InvokeDynamic",
            Self::Module { .. } => "CONSTANT_Module",
            Self::Package { .. } => "CONSTANT_Package",
        }
    }

    /// Whether this entry occupies two slots in the constant pool.
    #[must_use]
    pub const fn is_double_slot(&self) -> bool {
        self.kind().is_double_slot()
    }

    /// Builds an entry of the given kind from the bytes following its tag.
    ///
    /// For [`ConstantKind::Utf8`] the payload is the string content without its length prefix.
    ///
    /// # Errors
    /// - [`DecodeError::UnexpectedEnd`] if `payload` is shorter than the kind requires.
    /// - [`DecodeError::Malformed`] if `payload` is longer than the kind requires.
    pub fn from_payload(kind: ConstantKind, payload: &[u8]) -> Result<Self, DecodeError> {
        if let Some(expected) = kind.fixed_length() {
            if payload.len() < expected {
                return Err(DecodeError::UnexpectedEnd);
            }
            if payload.len() > expected {
                return Err(DecodeError::Malformed(
                    "constant payload is longer than its kind allows",
                ));
            }
        }
        let reader = &mut &payload[..];
        let entry = match kind {
            ConstantKind::Utf8 => Self::Utf8(JavaString::from_bytes(payload.to_vec())),
            ConstantKind::Integer => Self::Integer(reader.read_value()?),
            ConstantKind::Float => Self::Float(reader.read_value()?),
            ConstantKind::Long => Self::Long(reader.read_value()?),
            ConstantKind::Double => Self::Double(reader.read_value()?),
            ConstantKind::Class => Self::Class {
                name_index: reader.read_value()?,
            },
            ConstantKind::String => Self::String {
                string_index: reader.read_value()?,
            },
            ConstantKind::FieldRef => Self::FieldRef {
                class_index: reader.read_value()?,
                name_and_type_index: reader.read_value()?,
            },
            ConstantKind::MethodRef => Self::MethodRef {
                class_index: reader.read_value()?,
                name_and_type_index: reader.read_value()?,
            },
            ConstantKind::InterfaceMethodRef => Self::InterfaceMethodRef {
                class_index: reader.read_value()?,
                name_and_type_index: reader.read_value()?,
            },
            ConstantKind::NameAndType => Self::NameAndType {
                name_index: reader.read_value()?,
                descriptor_index: reader.read_value()?,
            },
            ConstantKind::MethodHandle => Self::MethodHandle {
                reference_kind: reader.read_value()?,
                reference_index: reader.read_value()?,
            },
            ConstantKind::MethodType => Self::MethodType {
                descriptor_index: reader.read_value()?,
            },
            ConstantKind::Dynamic => Self::Dynamic {
                bootstrap_method_attr_index: reader.read_value()?,
                name_and_type_index: reader.read_value()?,
            },
            ConstantKind::InvokeDynamic => Self::InvokeDynamic {
                bootstrap_method_attr_index: reader.read_value()?,
                name_and_type_index: reader.read_value()?,
            },
            ConstantKind::Module => Self::Module {
                name_index: reader.read_value()?,
            },
            ConstantKind::Package => Self::Package {
                name_index: reader.read_value()?,
            },
        };
        Ok(entry)
    }

    /// The bytes following the tag when this entry is encoded.
    ///
    /// For [`Entry::Utf8`] this is the string content without its length prefix.
    #[must_use]
    pub fn payload(&self) -> Vec<u8> {
        fn pair(lhs: u16, rhs: u16) -> Vec<u8> {
            [lhs.to_be_bytes(), rhs.to_be_bytes()].concat()
        }
        match self {
            Self::Utf8(java_str) => java_str.as_bytes().to_vec(),
            Self::Integer(it) => it.to_be_bytes().to_vec(),
            Self::Float(it) => it.to_be_bytes().to_vec(),
            Self::Long(it) => it.to_be_bytes().to_vec(),
            Self::Double(it) => it.to_be_bytes().to_vec(),
            Self::Class { name_index }
            | Self::Module { name_index }
            | Self::Package { name_index } => name_index.to_be_bytes().to_vec(),
            Self::String { string_index } => string_index.to_be_bytes().to_vec(),
            Self::MethodType { descriptor_index } => descriptor_index.to_be_bytes().to_vec(),
            Self::FieldRef {
                class_index,
                name_and_type_index,
            }
            | Self::MethodRef {
                class_index,
                name_and_type_index,
            }
            | Self::InterfaceMethodRef {
                class_index,
                name_and_type_index,
            } => pair(*class_index, *name_and_type_index),
            Self::NameAndType {
                name_index,
                descriptor_index,
            } => pair(*name_index, *descriptor_index),
            Self::Dynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            }
            | Self::InvokeDynamic {
                bootstrap_method_attr_index,
                name_and_type_index,
            } => pair(*bootstrap_method_attr_index, *name_and_type_index),
            Self::MethodHandle {
                reference_kind,
                reference_index,
            } => {
                let mut bytes = vec![*reference_kind];
                bytes.extend_from_slice(&reference_index.to_be_bytes());
                bytes
            }
        }
    }

    /// Reads one tagged entry.
    pub(crate) fn parse<R>(reader: &mut R) -> Result<Self, DecodeError>
    where
        R: Read + ?Sized,
    {
        let tag: u8 = reader.read_value()?;
        let kind = ConstantKind::try_from(tag)?;
        let payload = match kind.fixed_length() {
            Some(length) => read_byte_chunk(reader, length)?,
            None => {
                let length: u16 = reader.read_value()?;
                read_byte_chunk(reader, usize::from(length))?
            }
        };
        Self::from_payload(kind, &payload)
    }
}

/// Entries are equal when they have the same kind and the same encoded payload.
/// Floating point constants therefore compare bit for bit.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.payload() == other.payload()
    }
}

impl Eq for Entry {}

impl ToWriter for Entry {
    fn to_writer<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError> {
        let mut header = vec![self.tag()];
        if let Self::Utf8(java_str) = self {
            write_length::<u16>(&mut header, java_str.len())?;
        }
        writer.write_all(&header)?;
        writer.write_all(&self.payload())?;
        Ok(())
    }
}
