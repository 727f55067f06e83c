use std::{borrow::Cow, fmt};

use crate::jvm::{
    bytecode::{ClassFile, ModelId},
    constant_pool::{ConstantPool, Entry, JavaString},
};

/// Resolves `index` to a [`Entry::Utf8`].
///
/// # Panics
/// Panics if `index` does not point to a [`Entry::Utf8`].
#[track_caller]
pub(super) fn resolve_utf8(pool: &ConstantPool, index: u16) -> &JavaString {
    match pool.get(index) {
        Some(Entry::Utf8(java_str)) => java_str,
        Some(entry) => panic!(
            "constant #{index} is a {} where a CONSTANT_Utf8 is expected",
            entry.constant_kind()
        ),
        None => panic!("constant #{index} does not exist where a CONSTANT_Utf8 is expected"),
    }
}

/// Resolves `index` to a [`Entry::Class`] and returns its name index.
///
/// # Panics
/// Panics if `index` does not point to a [`Entry::Class`].
#[track_caller]
pub(super) fn resolve_class(pool: &ConstantPool, index: u16) -> u16 {
    match pool.get(index) {
        Some(&Entry::Class { name_index }) => name_index,
        Some(entry) => panic!(
            "constant #{index} is a {} where a CONSTANT_Class is expected",
            entry.constant_kind()
        ),
        None => panic!("constant #{index} does not exist where a CONSTANT_Class is expected"),
    }
}

/// A detached reference to a [`Entry::Class`] of a particular class file.
///
/// It does not borrow the class file, so it can be passed to the mutators on [`ClassFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassHandle {
    pub(super) owner: ModelId,
    pub(super) index: u16,
}

impl ClassHandle {
    /// The class file this handle belongs to.
    #[must_use]
    pub const fn owner(&self) -> ModelId {
        self.owner
    }

    /// The index of the constant.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }
}

/// A detached reference to a [`Entry::Utf8`] of a particular class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Handle {
    pub(super) owner: ModelId,
    pub(super) index: u16,
}

impl Utf8Handle {
    /// The class file this handle belongs to.
    #[must_use]
    pub const fn owner(&self) -> ModelId {
        self.owner
    }

    /// The index of the constant.
    #[must_use]
    pub const fn index(&self) -> u16 {
        self.index
    }
}

/// A view of a [`Entry::Class`].
///
/// The name is looked up every time it is asked for.
#[derive(Debug, Clone, Copy)]
pub struct ClassInfo<'a> {
    class_file: &'a ClassFile,
    index: u16,
}

impl<'a> ClassInfo<'a> {
    pub(crate) fn new(class_file: &'a ClassFile, index: u16) -> Self {
        Self { class_file, index }
    }

    /// The index of the constant.
    #[must_use]
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The [`Entry::Utf8`] holding the binary name of the class.
    ///
    /// # Panics
    /// Panics if the index does not point to a [`Entry::Class`] or the class does not point to a
    /// [`Entry::Utf8`].
    #[must_use]
    #[track_caller]
    pub fn name_info(&self) -> Utf8Info<'a> {
        let name_index = resolve_class(&self.class_file.constant_pool, self.index);
        Utf8Info::new(self.class_file, name_index)
    }

    /// The binary name of the class, such as `java/lang/Object`.
    ///
    /// # Panics
    /// See [`name_info`](Self::name_info).
    #[must_use]
    #[track_caller]
    pub fn name(&self) -> Cow<'a, str> {
        self.name_info().text()
    }

    /// Detaches the view from the class file.
    #[must_use]
    pub fn handle(&self) -> ClassHandle {
        ClassHandle {
            owner: self.class_file.id(),
            index: self.index,
        }
    }
}

impl fmt::Display for ClassInfo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A view of a [`Entry::Utf8`].
#[derive(Debug, Clone, Copy)]
pub struct Utf8Info<'a> {
    class_file: &'a ClassFile,
    index: u16,
}

impl<'a> Utf8Info<'a> {
    pub(crate) fn new(class_file: &'a ClassFile, index: u16) -> Self {
        Self { class_file, index }
    }

    /// The index of the constant.
    #[must_use]
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The string as stored.
    ///
    /// # Panics
    /// Panics if the index does not point to a [`Entry::Utf8`].
    #[must_use]
    #[track_caller]
    pub fn java_str(&self) -> &'a JavaString {
        resolve_utf8(&self.class_file.constant_pool, self.index)
    }

    /// The modified UTF-8 bytes of the string.
    ///
    /// # Panics
    /// See [`java_str`](Self::java_str).
    #[must_use]
    #[track_caller]
    pub fn bytes(&self) -> &'a [u8] {
        self.java_str().as_bytes()
    }

    /// The decoded text, see [`JavaString::to_str`].
    ///
    /// # Panics
    /// See [`java_str`](Self::java_str).
    #[must_use]
    #[track_caller]
    pub fn text(&self) -> Cow<'a, str> {
        self.java_str().to_str()
    }

    /// Detaches the view from the class file.
    #[must_use]
    pub fn handle(&self) -> Utf8Handle {
        Utf8Handle {
            owner: self.class_file.id(),
            index: self.index,
        }
    }
}

impl fmt::Display for Utf8Info<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A view of the constant pool.
#[derive(Debug, Clone, Copy)]
pub struct Constants<'a> {
    class_file: &'a ClassFile,
}

impl<'a> Constants<'a> {
    pub(crate) fn new(class_file: &'a ClassFile) -> Self {
        Self { class_file }
    }

    /// Gets the entry at the given index.
    #[must_use]
    pub fn get(&self, index: u16) -> Option<&'a Entry> {
        self.class_file.constant_pool.get(index)
    }

    /// Iterates over the entries with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &'a Entry)> + use<'a> {
        self.class_file.constant_pool.iter()
    }

    /// The number of entries, not counting reserved slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.class_file.constant_pool.len()
    }

    /// Returns `true` if the pool holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_file.constant_pool.is_empty()
    }

    /// Views the entry at `index` if it is a [`Entry::Utf8`].
    #[must_use]
    pub fn utf8(&self, index: u16) -> Option<Utf8Info<'a>> {
        matches!(self.get(index), Some(Entry::Utf8(_)))
            .then(|| Utf8Info::new(self.class_file, index))
    }

    /// Views the entry at `index` if it is a [`Entry::Class`].
    #[must_use]
    pub fn class(&self, index: u16) -> Option<ClassInfo<'a>> {
        matches!(self.get(index), Some(Entry::Class { .. }))
            .then(|| ClassInfo::new(self.class_file, index))
    }
}
