//! Module containing the APIs for the JVM class file format.
//!
//! - [`constant_pool`]: the typed constant pool shared by every structure in a class file.
//! - [`bytecode`]: the raw structural model and the binary codec.
//! - [`class`]: index-resolving views and provenance-checked editing.

pub mod bytecode;
pub mod class;
pub mod constant_pool;
