use std::{borrow::Cow, marker::PhantomData};

use bitflags::Flags;

use super::{AccessFlags, Attributes, FieldAccessFlags, MethodAccessFlags, Utf8Info};
use crate::jvm::bytecode::{ClassFile, MemberInfo, ModelId};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::FieldAccessFlags {}
    impl Sealed for super::MethodAccessFlags {}
}

/// The table a member lives in, named after the access flags of that table.
pub trait MemberContext: sealed::Sealed + Flags<Bits = u16> + Copy {
    /// The name of the table, used in diagnostics.
    const TABLE: &'static str;

    #[doc(hidden)]
    fn table(class_file: &ClassFile) -> &[MemberInfo];

    #[doc(hidden)]
    fn table_mut(class_file: &mut ClassFile) -> &mut [MemberInfo];
}

impl MemberContext for FieldAccessFlags {
    const TABLE: &'static str = "fields";

    fn table(class_file: &ClassFile) -> &[MemberInfo] {
        &class_file.fields
    }

    fn table_mut(class_file: &mut ClassFile) -> &mut [MemberInfo] {
        &mut class_file.fields
    }
}

impl MemberContext for MethodAccessFlags {
    const TABLE: &'static str = "methods";

    fn table(class_file: &ClassFile) -> &[MemberInfo] {
        &class_file.methods
    }

    fn table_mut(class_file: &mut ClassFile) -> &mut [MemberInfo] {
        &mut class_file.methods
    }
}

/// A detached reference to a field or a method of a particular class file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberHandle<F> {
    pub(super) owner: ModelId,
    pub(super) position: usize,
    pub(super) _context: PhantomData<F>,
}

impl<F> MemberHandle<F> {
    /// The class file this handle belongs to.
    #[must_use]
    pub const fn owner(&self) -> ModelId {
        self.owner
    }

    /// The position of the member in its table.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }
}

/// A detached reference to a field.
pub type FieldHandle = MemberHandle<FieldAccessFlags>;
/// A detached reference to a method.
pub type MethodHandle = MemberHandle<MethodAccessFlags>;

/// The fields or the methods of a class, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Members<'a, F> {
    class_file: &'a ClassFile,
    _context: PhantomData<F>,
}

/// The fields of a class.
pub type Fields<'a> = Members<'a, FieldAccessFlags>;
/// The methods of a class.
pub type Methods<'a> = Members<'a, MethodAccessFlags>;

impl<'a, F: MemberContext> Members<'a, F> {
    pub(crate) fn new(class_file: &'a ClassFile) -> Self {
        Self {
            class_file,
            _context: PhantomData,
        }
    }

    /// The number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        F::table(self.class_file).len()
    }

    /// Returns `true` if there is no member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        F::table(self.class_file).is_empty()
    }

    /// Views the member at the given position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<MemberView<'a, F>> {
        F::table(self.class_file)
            .get(position)
            .map(|info| MemberView::new(self.class_file, position, info))
    }

    /// Iterates over the members in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = MemberView<'a, F>> + use<'a, F> {
        let class_file = self.class_file;
        F::table(class_file)
            .iter()
            .enumerate()
            .map(move |(position, info)| MemberView::new(class_file, position, info))
    }

    /// Finds the first member with the given name and descriptor.
    ///
    /// # Panics
    /// Panics if a member visited before the match has a name or a descriptor that does not
    /// resolve to a [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[must_use]
    pub fn find(&self, name: &str, descriptor: &str) -> Option<MemberView<'a, F>> {
        self.iter()
            .find(|member| member.name() == name && member.descriptor() == descriptor)
    }
}

/// A field or a method.
///
/// The name and the descriptor are looked up every time they are asked for.
#[derive(Debug, Clone, Copy)]
pub struct MemberView<'a, F> {
    class_file: &'a ClassFile,
    position: usize,
    info: &'a MemberInfo,
    _context: PhantomData<F>,
}

/// A field.
pub type FieldView<'a> = MemberView<'a, FieldAccessFlags>;
/// A method.
pub type MethodView<'a> = MemberView<'a, MethodAccessFlags>;

impl<'a, F: MemberContext> MemberView<'a, F> {
    pub(crate) fn new(class_file: &'a ClassFile, position: usize, info: &'a MemberInfo) -> Self {
        Self {
            class_file,
            position,
            info,
            _context: PhantomData,
        }
    }

    /// The access flags of the member.
    #[must_use]
    pub fn access_flags(&self) -> AccessFlags<'a, F> {
        AccessFlags::new(&self.info.access_flags)
    }

    /// The [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding the name.
    #[must_use]
    pub fn name_info(&self) -> Utf8Info<'a> {
        Utf8Info::new(self.class_file, self.info.name_index)
    }

    /// The [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding the descriptor.
    #[must_use]
    pub fn descriptor_info(&self) -> Utf8Info<'a> {
        Utf8Info::new(self.class_file, self.info.descriptor_index)
    }

    /// The name of the member.
    ///
    /// # Panics
    /// Panics if the name index does not point to a
    /// [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[must_use]
    #[track_caller]
    pub fn name(&self) -> Cow<'a, str> {
        self.name_info().text()
    }

    /// The descriptor of the member, such as `I` or `(Ljava/lang/String;)V`.
    ///
    /// # Panics
    /// Panics if the descriptor index does not point to a
    /// [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[must_use]
    #[track_caller]
    pub fn descriptor(&self) -> Cow<'a, str> {
        self.descriptor_info().text()
    }

    /// The attributes of the member.
    #[must_use]
    pub fn attributes(&self) -> Attributes<'a> {
        Attributes::new(self.class_file, &self.info.attributes)
    }

    /// The position of the member in its table.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The raw member.
    #[must_use]
    pub fn raw(&self) -> &'a MemberInfo {
        self.info
    }

    /// Detaches the view from the class file.
    #[must_use]
    pub fn handle(&self) -> MemberHandle<F> {
        MemberHandle {
            owner: self.class_file.id(),
            position: self.position,
            _context: PhantomData,
        }
    }
}
