use tracing::debug;

use super::{
    AccessFlagsMut, ClassAccessFlags, ClassHandle, MemberContext, MemberHandle, Utf8Handle,
    constants::{resolve_class, resolve_utf8},
};
use crate::jvm::{
    bytecode::{ClassFile, MemberInfo, ModelId},
    constant_pool::{Entry, JavaString, PoolOverflow},
};

impl ClassFile {
    #[track_caller]
    pub(super) fn assert_owns(&self, owner: ModelId) {
        assert!(
            owner == self.id(),
            "can not combine values from different class files: {owner} is used with {}",
            self.id()
        );
    }

    #[track_caller]
    fn owned_class(&self, handle: ClassHandle) -> u16 {
        self.assert_owns(handle.owner);
        resolve_class(&self.constant_pool, handle.index);
        handle.index
    }

    #[track_caller]
    fn owned_utf8(&self, handle: Utf8Handle) -> u16 {
        self.assert_owns(handle.owner);
        resolve_utf8(&self.constant_pool, handle.index);
        handle.index
    }

    #[track_caller]
    fn owned_member<F: MemberContext>(&mut self, handle: MemberHandle<F>) -> &mut MemberInfo {
        self.assert_owns(handle.owner);
        let id = self.id();
        F::table_mut(self)
            .get_mut(handle.position)
            .unwrap_or_else(|| panic!("{} #{} does not exist in {id}", F::TABLE, handle.position))
    }

    /// Makes `class` the class defined by this class file.
    ///
    /// # Panics
    /// Panics if `class` was taken from another class file or is not a
    /// [`Entry::Class`](crate::jvm::constant_pool::Entry::Class).
    #[track_caller]
    pub fn set_this_class(&mut self, class: ClassHandle) {
        let index = self.owned_class(class);
        debug!(id = %self.id(), from = self.this_class, to = index, "setting this class");
        self.this_class = index;
    }

    /// Makes `class` the direct super class, or removes the super class with [`None`].
    ///
    /// # Panics
    /// Panics if `class` was taken from another class file or is not a
    /// [`Entry::Class`](crate::jvm::constant_pool::Entry::Class).
    #[track_caller]
    pub fn set_super_class(&mut self, class: Option<ClassHandle>) {
        let index = class.map_or(0, |class| self.owned_class(class));
        debug!(id = %self.id(), from = self.super_class, to = index, "setting super class");
        self.super_class = index;
    }

    /// Replaces the direct super interfaces.
    /// Nothing changes unless every handle passes the checks.
    ///
    /// # Panics
    /// Panics if any of the handles was taken from another class file or is not a
    /// [`Entry::Class`](crate::jvm::constant_pool::Entry::Class).
    #[track_caller]
    pub fn set_interfaces<I>(&mut self, interfaces: I)
    where
        I: IntoIterator<Item = ClassHandle>,
    {
        let mut indices = Vec::new();
        for class in interfaces {
            indices.push(self.owned_class(class));
        }
        debug!(id = %self.id(), interfaces = ?indices, "setting interfaces");
        self.interfaces = indices;
    }

    /// Points the name of a field or a method to `name`.
    ///
    /// # Panics
    /// Panics if any handle was taken from another class file, the member does not exist, or
    /// `name` is not a [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[track_caller]
    pub fn set_member_name<F: MemberContext>(
        &mut self,
        member: MemberHandle<F>,
        name: Utf8Handle,
    ) {
        let index = self.owned_utf8(name);
        let id = self.id();
        let info = self.owned_member(member);
        debug!(
            %id,
            table = F::TABLE,
            position = member.position,
            from = info.name_index,
            to = index,
            "setting member name"
        );
        info.name_index = index;
    }

    /// Points the descriptor of a field or a method to `descriptor`.
    ///
    /// # Panics
    /// Panics if any handle was taken from another class file, the member does not exist, or
    /// `descriptor` is not a [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[track_caller]
    pub fn set_member_descriptor<F: MemberContext>(
        &mut self,
        member: MemberHandle<F>,
        descriptor: Utf8Handle,
    ) {
        let index = self.owned_utf8(descriptor);
        let id = self.id();
        let info = self.owned_member(member);
        debug!(
            %id,
            table = F::TABLE,
            position = member.position,
            from = info.descriptor_index,
            to = index,
            "setting member descriptor"
        );
        info.descriptor_index = index;
    }

    /// Rewrites the text of a [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) in place.
    /// Everything referring to the entry sees the new text.
    ///
    /// # Panics
    /// Panics if `handle` was taken from another class file or is not a
    /// [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[track_caller]
    pub fn set_utf8(&mut self, handle: Utf8Handle, text: &str) {
        let index = self.owned_utf8(handle);
        debug!(id = %self.id(), index, text, "rewriting string constant");
        if let Some(Entry::Utf8(java_str)) = self.constant_pool.get_mut(index) {
            *java_str = JavaString::from(text);
        }
    }

    /// Finds or appends a [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8) holding
    /// `text`.
    ///
    /// # Errors
    /// - [`PoolOverflow`] if a new entry is needed and the constant pool is full.
    pub fn add_utf8(&mut self, text: &str) -> Result<Utf8Handle, PoolOverflow> {
        let index = match self.constant_pool.find_utf8(text) {
            Some(index) => index,
            None => {
                let index = self.constant_pool.push(Entry::Utf8(JavaString::from(text)))?;
                debug!(id = %self.id(), index, text, "added string constant");
                index
            }
        };
        Ok(Utf8Handle {
            owner: self.id(),
            index,
        })
    }

    /// Finds or appends a [`Entry::Class`](crate::jvm::constant_pool::Entry::Class) named by
    /// `name`.
    ///
    /// # Errors
    /// - [`PoolOverflow`] if a new entry is needed and the constant pool is full.
    ///
    /// # Panics
    /// Panics if `name` was taken from another class file or is not a
    /// [`Entry::Utf8`](crate::jvm::constant_pool::Entry::Utf8).
    #[track_caller]
    pub fn add_class(&mut self, name: Utf8Handle) -> Result<ClassHandle, PoolOverflow> {
        let name_index = self.owned_utf8(name);
        let existing = self.constant_pool.iter().find_map(|(index, entry)| match entry {
            &Entry::Class { name_index: it } if it == name_index => Some(index),
            _ => None,
        });
        let index = match existing {
            Some(index) => index,
            None => {
                let index = self.constant_pool.push(Entry::Class { name_index })?;
                debug!(id = %self.id(), index, name_index, "added class constant");
                index
            }
        };
        Ok(ClassHandle {
            owner: self.id(),
            index,
        })
    }

    /// A writable view of the access flags of the class.
    #[must_use]
    pub fn class_access_flags_mut(&mut self) -> AccessFlagsMut<'_, ClassAccessFlags> {
        debug!(id = %self.id(), "editing class access flags");
        AccessFlagsMut::new(&mut self.access_flags)
    }

    /// A writable view of the access flags of a field or a method.
    ///
    /// # Panics
    /// Panics if `member` was taken from another class file or the member does not exist.
    #[must_use]
    #[track_caller]
    pub fn member_access_flags_mut<F: MemberContext>(
        &mut self,
        member: MemberHandle<F>,
    ) -> AccessFlagsMut<'_, F> {
        debug!(
            id = %self.id(),
            table = F::TABLE,
            position = member.position,
            "editing member access flags"
        );
        let info = self.owned_member(member);
        AccessFlagsMut::new(&mut info.access_flags)
    }
}
