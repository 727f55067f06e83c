#![warn(missing_debug_implementations, rust_2018_idioms, missing_docs)]
//! Reading, navigating and editing JVM class files.
//!
//! A class file is decoded into a [`ClassFile`](jvm::bytecode::ClassFile), which keeps the
//! structure exactly as stored: constant pool indices, raw flag masks and opaque attribute
//! payloads. The accessor layer in [`jvm::class`] resolves those indices into names and flags
//! on every read, and edits the raw model in place after checking that every handle involved
//! belongs to the model being edited.
//!
//! ```
//! use classkit::jvm::bytecode::ClassFile;
//!
//! # fn main() -> Result<(), classkit::jvm::bytecode::DecodeError> {
//! # let bytes: &[u8] = &[
//! #     0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x41, 0x00, 0x05,
//! #     0x01, 0x00, 0x04, b'D', b'e', b'm', b'o', 0x07, 0x00, 0x01,
//! #     0x01, 0x00, 0x10, b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g',
//! #     b'/', b'O', b'b', b'j', b'e', b'c', b't', 0x07, 0x00, 0x03,
//! #     0x00, 0x21, 0x00, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//! # ];
//! let class_file = ClassFile::parse(bytes)?;
//! let class = class_file.view();
//! assert_eq!(class.this_class().name(), "Demo");
//! assert!(class.access_flags().is_public());
//! # Ok(())
//! # }
//! ```

/// Module containing the APIs for the JVM class file format.
pub mod jvm;
pub(crate) mod macros;

#[cfg(test)]
pub(crate) mod tests;
