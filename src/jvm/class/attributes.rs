use std::borrow::Cow;

use super::Utf8Info;
use crate::jvm::bytecode::{AttributeInfo, ClassFile};

/// The attributes of a class, a field or a method, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a> {
    class_file: &'a ClassFile,
    table: &'a [AttributeInfo],
}

impl<'a> Attributes<'a> {
    pub(crate) fn new(class_file: &'a ClassFile, table: &'a [AttributeInfo]) -> Self {
        Self { class_file, table }
    }

    /// The number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if there is no attribute.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Views the attribute at the given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<AttributeView<'a>> {
        self.table
            .get(position)
            .map(|info| AttributeView::new(self.class_file, info))
    }

    /// Iterates over the attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = AttributeView<'a>> + use<'a> {
        let class_file = self.class_file;
        self.table
            .iter()
            .map(move |info| AttributeView::new(class_file, info))
    }

    /// Finds the first attribute with the given name.
    ///
    /// # Panics
    /// Panics if an attribute visited before the match has a name that does not resolve to a
    /// [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<AttributeView<'a>> {
        self.iter().find(|attribute| attribute.name() == name)
    }
}

/// An attribute. The payload is opaque.
#[derive(Debug, Clone, Copy)]
pub struct AttributeView<'a> {
    class_file: &'a ClassFile,
    info: &'a AttributeInfo,
}

impl<'a> AttributeView<'a> {
    fn new(class_file: &'a ClassFile, info: &'a AttributeInfo) -> Self {
        Self { class_file, info }
    }

    /// The [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding the name.
    #[must_use]
    pub fn name_info(&self) -> Utf8Info<'a> {
        Utf8Info::new(self.class_file, self.info.name_index)
    }

    /// The name of the attribute, such as `Code` or `SourceFile`.
    ///
    /// # Panics
    /// Panics if the name index does not point to a
    /// [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[must_use]
    #[track_caller]
    pub fn name(&self) -> Cow<'a, str> {
        self.name_info().text()
    }

    /// The content of the attribute.
    #[must_use]
    pub fn payload(&self) -> &'a [u8] {
        &self.info.info
    }
}
