//! Views over a [`ClassFile`] that resolve constant pool indices, and the editing API.
//!
//! Views borrow the class file and look everything up again on each call, so they never go
//! stale. To edit a class file, take a detached handle from a view with `handle()`, drop the
//! view, and pass the handle to one of the mutators on [`ClassFile`]. Mutators check that every
//! handle comes from the class file being edited, since an index is only meaningful in the
//! constant pool it was taken from.
//!
//! ```
//! use classkit::jvm::bytecode::ClassFile;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let bytes: &[u8] = &[
//! #     0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x41, 0x00, 0x05,
//! #     0x01, 0x00, 0x04, b'D', b'e', b'm', b'o', 0x07, 0x00, 0x01,
//! #     0x01, 0x00, 0x10, b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g',
//! #     b'/', b'O', b'b', b'j', b'e', b'c', b't', 0x07, 0x00, 0x03,
//! #     0x00, 0x21, 0x00, 0x02, 0x00, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
//! # ];
//! let mut class_file = ClassFile::parse(bytes)?;
//! let name = class_file.view().this_class().name_info().handle();
//! class_file.set_utf8(name, "Renamed");
//! class_file.class_access_flags_mut().set_final(true);
//!
//! let class = class_file.view();
//! assert_eq!(class.this_class().name(), "Renamed");
//! assert!(class.access_flags().is_final());
//! # Ok(())
//! # }
//! ```

mod access_flags;
mod attributes;
mod constants;
mod edit;
mod members;

use std::fmt;

pub use access_flags::{
    AccessFlags, AccessFlagsMut, ClassAccessFlags, FieldAccessFlags, MethodAccessFlags,
};
pub use attributes::{AttributeView, Attributes};
pub use constants::{ClassHandle, ClassInfo, Constants, Utf8Handle, Utf8Info};
pub use members::{
    FieldHandle, FieldView, Fields, MemberContext, MemberHandle, MemberView, Members,
    MethodHandle, MethodView, Methods,
};

use super::bytecode::ClassFile;
use crate::macros::see_jvm_spec;

/// The version of a class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// The major version.
    pub major: u16,
    /// The minor version.
    pub minor: u16,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A read-only view of a class file.
#[doc = see_jvm_spec!(4, 1)]
#[derive(Debug, Clone, Copy)]
pub struct Class<'a> {
    class_file: &'a ClassFile,
}

impl<'a> Class<'a> {
    /// Creates a view of the given class file.
    #[must_use]
    pub fn new(class_file: &'a ClassFile) -> Self {
        Self { class_file }
    }

    /// The underlying class file.
    #[must_use]
    pub fn class_file(&self) -> &'a ClassFile {
        self.class_file
    }

    /// The version of the class file format.
    #[must_use]
    pub fn version(&self) -> Version {
        Version {
            major: self.class_file.major_version,
            minor: self.class_file.minor_version,
        }
    }

    /// The access flags of the class.
    #[must_use]
    pub fn access_flags(&self) -> AccessFlags<'a, ClassAccessFlags> {
        AccessFlags::new(&self.class_file.access_flags)
    }

    /// The class defined by the class file.
    #[must_use]
    pub fn this_class(&self) -> ClassInfo<'a> {
        ClassInfo::new(self.class_file, self.class_file.this_class)
    }

    /// The direct super class.
    /// Returns [`None`] for `java/lang/Object` and module descriptors, whose super class index
    /// is `0`.
    #[must_use]
    pub fn super_class(&self) -> Option<ClassInfo<'a>> {
        match self.class_file.super_class {
            0 => None,
            index => Some(ClassInfo::new(self.class_file, index)),
        }
    }

    /// The direct super interfaces, in declaration order.
    #[must_use]
    pub fn interfaces(&self) -> Interfaces<'a> {
        Interfaces {
            class_file: self.class_file,
        }
    }

    /// The constant pool.
    #[must_use]
    pub fn constants(&self) -> Constants<'a> {
        Constants::new(self.class_file)
    }

    /// The fields declared by the class.
    #[must_use]
    pub fn fields(&self) -> Fields<'a> {
        Members::new(self.class_file)
    }

    /// The methods declared by the class.
    #[must_use]
    pub fn methods(&self) -> Methods<'a> {
        Members::new(self.class_file)
    }

    /// The attributes of the class.
    #[must_use]
    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(self.class_file, &self.class_file.attributes)
    }
}

/// The direct super interfaces of a class.
#[derive(Debug, Clone, Copy)]
pub struct Interfaces<'a> {
    class_file: &'a ClassFile,
}

impl<'a> Interfaces<'a> {
    /// The number of interfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.class_file.interfaces.len()
    }

    /// Returns `true` if the class implements no interface directly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_file.interfaces.is_empty()
    }

    /// Views the interface at the given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<ClassInfo<'a>> {
        let class_file = self.class_file;
        class_file
            .interfaces
            .get(position)
            .map(|&index| ClassInfo::new(class_file, index))
    }

    /// Iterates over the interfaces in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = ClassInfo<'a>> + use<'a> {
        let class_file = self.class_file;
        class_file
            .interfaces
            .iter()
            .map(move |&index| ClassInfo::new(class_file, index))
    }
}

impl ClassFile {
    /// Creates a read-only view of the class file.
    #[must_use]
    pub fn view(&self) -> Class<'_> {
        Class::new(self)
    }

    /// Re-attaches a class handle to this class file.
    ///
    /// # Panics
    /// Panics if the handle was taken from another class file.
    #[must_use]
    #[track_caller]
    pub fn class_info(&self, handle: ClassHandle) -> ClassInfo<'_> {
        self.assert_owns(handle.owner());
        ClassInfo::new(self, handle.index())
    }

    /// Re-attaches a string handle to this class file.
    ///
    /// # Panics
    /// Panics if the handle was taken from another class file.
    #[must_use]
    #[track_caller]
    pub fn utf8_info(&self, handle: Utf8Handle) -> Utf8Info<'_> {
        self.assert_owns(handle.owner());
        Utf8Info::new(self, handle.index())
    }

    /// Re-attaches a member handle to this class file.
    ///
    /// # Panics
    /// Panics if the handle was taken from another class file, or the member no longer exists.
    #[must_use]
    #[track_caller]
    pub fn member<F: MemberContext>(&self, handle: MemberHandle<F>) -> MemberView<'_, F> {
        self.assert_owns(handle.owner());
        Members::new(self).get(handle.position()).unwrap_or_else(|| {
            panic!(
                "{} #{} does not exist in {}",
                F::TABLE,
                handle.position(),
                self.id()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{ClassBuilder, demo_class};

    #[test]
    fn demo_class_view() {
        let class_file = ClassFile::parse(&demo_class()).unwrap();
        let class = class_file.view();
        assert_eq!(class.version(), Version { major: 65, minor: 0 });
        assert_eq!(class.version().to_string(), "65.0");
        assert_eq!(class.this_class().name(), "Demo");
        assert_eq!(class.super_class().unwrap().name(), "java/lang/Object");
        assert!(class.access_flags().is_public());
        assert!(class.access_flags().is_super());
        assert!(class.interfaces().is_empty());
        assert!(class.fields().is_empty());
        assert!(class.methods().is_empty());
        assert!(class.attributes().is_empty());
        assert_eq!(class.constants().len(), 4);
    }

    #[test]
    fn interfaces_in_order() {
        let mut builder = ClassBuilder::new();
        let this_class = builder.class("Task");
        let runnable = builder.class("java/lang/Runnable");
        let closeable = builder.class("java/io/Closeable");
        builder
            .this_class(this_class)
            .interface(runnable)
            .interface(closeable);
        let class_file = ClassFile::parse(&builder.build()).unwrap();
        let interfaces = class_file.view().interfaces();
        assert_eq!(interfaces.len(), 2);
        let names: Vec<_> = interfaces.iter().map(|class| class.name()).collect();
        assert_eq!(names, ["java/lang/Runnable", "java/io/Closeable"]);
        assert_eq!(interfaces.get(1).unwrap().index(), closeable);
        assert!(interfaces.get(2).is_none());
    }

    #[test]
    fn no_super_class() {
        let mut builder = ClassBuilder::new();
        let this_class = builder.class("java/lang/Object");
        builder.this_class(this_class).super_class(0);
        let class_file = ClassFile::parse(&builder.build()).unwrap();
        assert!(class_file.view().super_class().is_none());
    }

    #[test]
    fn reattach_handles() {
        let class_file = ClassFile::parse(&demo_class()).unwrap();
        let handle = class_file.view().super_class().unwrap().handle();
        assert_eq!(class_file.class_info(handle).name(), "java/lang/Object");
        let name = class_file.view().this_class().name_info().handle();
        assert_eq!(class_file.utf8_info(name).bytes(), b"Demo");
    }

    #[test]
    #[should_panic(expected = "can not combine values from different class files")]
    fn reattach_foreign_handle() {
        let bytes = demo_class();
        let lhs = ClassFile::parse(&bytes).unwrap();
        let rhs = ClassFile::parse(&bytes).unwrap();
        let handle = lhs.view().this_class().handle();
        let _ = rhs.class_info(handle);
    }

    #[test]
    fn reattach_member() {
        let mut builder = ClassBuilder::new();
        let this_class = builder.class("Counter");
        builder
            .this_class(this_class)
            .field(0x0002, "count", "I", &[]);
        let class_file = ClassFile::parse(&builder.build()).unwrap();
        let handle = class_file.view().fields().get(0).unwrap().handle();
        assert_eq!(class_file.member(handle).name(), "count");
    }
}
