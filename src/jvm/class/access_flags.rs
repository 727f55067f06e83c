use std::{fmt, marker::PhantomData};

use bitflags::{Flags, bitflags};
use itertools::Itertools;
use tracing::trace;

use crate::macros::{named_flags, see_jvm_spec};

bitflags! {
    /// The access flags of a class.
    #[doc = see_jvm_spec!(4, 1)]
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct ClassAccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Marked `private` in source.
        /// NOTE: This is not mentioned in the JVM Specification, but some compilers set it.
        const PRIVATE = 0x0002;
        /// Declared `final`; no subclasses allowed.
        const FINAL = 0x0010;
        /// Treat superclass methods specially when invoked by the invokespecial instruction.
        const SUPER = 0x0020;
        /// Is an interface, not a class.
        const INTERFACE = 0x0200;
        /// Declared `abstract`; must not be instantiated.
        const ABSTRACT = 0x0400;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation interface.
        const ANNOTATION = 0x2000;
        /// Declared as an enum class.
        const ENUM = 0x4000;
        /// Is a module, not a class or interface.
        const MODULE = 0x8000;
    }
}

bitflags! {
    /// The access flags of a field.
    #[doc = see_jvm_spec!(4, 5)]
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct FieldAccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Declared `private`; accessible only within the defining class and other classes belonging to the same nest.
        const PRIVATE = 0x0002;
        /// Declared `protected`; may be accessed within subclasses.
        const PROTECTED = 0x0004;
        /// Declared `static`.
        const STATIC = 0x0008;
        /// Declared `final`; never directly assigned to after object construction.
        const FINAL = 0x0010;
        /// Declared `volatile`; cannot be cached.
        const VOLATILE = 0x0040;
        /// Declared `transient`; not written or read by a persistent object manager.
        const TRANSIENT = 0x0080;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
        /// Declared as an element of an `enum` class.
        const ENUM = 0x4000;
    }
}

bitflags! {
    /// The access flags of a method.
    #[doc = see_jvm_spec!(4, 6)]
    #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
    pub struct MethodAccessFlags: u16 {
        /// Declared `public`; may be accessed from outside its package.
        const PUBLIC = 0x0001;
        /// Declared `private`; accessible only within the defining class and other classes belonging to the same nest.
        const PRIVATE = 0x0002;
        /// Declared `protected`; may be accessed within subclasses.
        const PROTECTED = 0x0004;
        /// Declared `static`.
        const STATIC = 0x0008;
        /// Declared `final`; must not be overridden.
        const FINAL = 0x0010;
        /// Declared `synchronized`; invocation is wrapped by a monitor use.
        const SYNCHRONIZED = 0x0020;
        /// A bridge method, generated by the compiler.
        const BRIDGE = 0x0040;
        /// Declared with variable number of arguments.
        const VARARGS = 0x0080;
        /// Declared `native`; implemented in a language other than Java.
        const NATIVE = 0x0100;
        /// Declared `abstract`; no implementation is provided.
        const ABSTRACT = 0x0400;
        /// In a class file whose major version number is at least 46 and at most 60; Declared `strictfp`.
        const STRICT = 0x0800;
        /// Declared synthetic; not present in the source code.
        const SYNTHETIC = 0x1000;
    }
}

/// A read-only view of an access flag mask.
///
/// The same `u16` mask means different things in different contexts; `F` selects the table of
/// names, one of [`ClassAccessFlags`], [`FieldAccessFlags`] and [`MethodAccessFlags`].
/// Bits without a name in the context are kept and reported by [`bits`](Self::bits).
#[derive(Debug, Clone, Copy)]
pub struct AccessFlags<'a, F> {
    bits: &'a u16,
    _context: PhantomData<F>,
}

impl<'a, F> AccessFlags<'a, F>
where
    F: Flags<Bits = u16>,
{
    pub(crate) fn new(bits: &'a u16) -> Self {
        Self {
            bits,
            _context: PhantomData,
        }
    }

    /// The raw mask, including bits without a name.
    #[must_use]
    pub fn bits(&self) -> u16 {
        *self.bits
    }

    /// The mask as a set of flags. Unknown bits are retained.
    #[must_use]
    pub fn flags(&self) -> F {
        F::from_bits_retain(*self.bits)
    }

    /// Checks whether every bit of `flag` is set.
    #[must_use]
    pub fn contains(&self, flag: F) -> bool {
        self.flags().contains(flag)
    }

    /// The names of the set flags, in bit order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + use<F> {
        self.flags().iter_names().map(|(name, _)| name)
    }
}

impl<F> fmt::Display for AccessFlags<'_, F>
where
    F: Flags<Bits = u16>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unknown = self.bits() & !F::all().bits();
        let names = self.names().join(" ");
        match (names.is_empty(), unknown) {
            (_, 0) => f.write_str(&names),
            (true, unknown) => write!(f, "{unknown:#06x}"),
            (false, unknown) => write!(f, "{names} {unknown:#06x}"),
        }
    }
}

/// A writable view of an access flag mask.
///
/// Setting a flag only touches the bits of that flag.
#[derive(Debug)]
pub struct AccessFlagsMut<'a, F> {
    bits: &'a mut u16,
    _context: PhantomData<F>,
}

impl<'a, F> AccessFlagsMut<'a, F>
where
    F: Flags<Bits = u16>,
{
    pub(crate) fn new(bits: &'a mut u16) -> Self {
        Self {
            bits,
            _context: PhantomData,
        }
    }

    /// The raw mask, including bits without a name.
    #[must_use]
    pub fn bits(&self) -> u16 {
        *self.bits
    }

    /// The mask as a set of flags. Unknown bits are retained.
    #[must_use]
    pub fn flags(&self) -> F {
        F::from_bits_retain(*self.bits)
    }

    /// Checks whether every bit of `flag` is set.
    #[must_use]
    pub fn contains(&self, flag: F) -> bool {
        self.flags().contains(flag)
    }

    /// Sets or clears the bits of `flag`.
    pub fn set(&mut self, flag: F, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        trace!(before = *self.bits, after = flags.bits(), "updating access flags");
        *self.bits = flags.bits();
    }

    /// Downgrades to a read-only view.
    #[must_use]
    pub fn as_view(&self) -> AccessFlags<'_, F> {
        AccessFlags::new(self.bits)
    }
}

named_flags!(ClassAccessFlags {
    /// Whether the class is declared `public`.
    is_public, set_public => PUBLIC;
    /// Whether the class is declared `final`.
    is_final, set_final => FINAL;
    /// Whether `invokespecial` uses the new superclass method semantics.
    is_super, set_super => SUPER;
    /// Whether the class file defines an interface.
    is_interface, set_interface => INTERFACE;
    /// Whether the class is declared `abstract`.
    is_abstract, set_abstract => ABSTRACT;
    /// Whether the class is synthetic.
    is_synthetic, set_synthetic => SYNTHETIC;
    /// Whether the class file defines an annotation interface.
    is_annotation, set_annotation => ANNOTATION;
    /// Whether the class is an enum class.
    is_enum, set_enum => ENUM;
    /// Whether the class file defines a module.
    is_module, set_module => MODULE;
});

named_flags!(FieldAccessFlags {
    /// Whether the field is declared `public`.
    is_public, set_public => PUBLIC;
    /// Whether the field is declared `private`.
    is_private, set_private => PRIVATE;
    /// Whether the field is declared `protected`.
    is_protected, set_protected => PROTECTED;
    /// Whether the field is declared `static`.
    is_static, set_static => STATIC;
    /// Whether the field is declared `final`.
    is_final, set_final => FINAL;
    /// Whether the field is declared `volatile`.
    is_volatile, set_volatile => VOLATILE;
    /// Whether the field is declared `transient`.
    is_transient, set_transient => TRANSIENT;
    /// Whether the field is synthetic.
    is_synthetic, set_synthetic => SYNTHETIC;
    /// Whether the field is an enum constant.
    is_enum, set_enum => ENUM;
});

named_flags!(MethodAccessFlags {
    /// Whether the method is declared `public`.
    is_public, set_public => PUBLIC;
    /// Whether the method is declared `private`.
    is_private, set_private => PRIVATE;
    /// Whether the method is declared `protected`.
    is_protected, set_protected => PROTECTED;
    /// Whether the method is declared `static`.
    is_static, set_static => STATIC;
    /// Whether the method is declared `final`.
    is_final, set_final => FINAL;
    /// Whether the method is declared `synchronized`.
    is_synchronized, set_synchronized => SYNCHRONIZED;
    /// Whether the method is a bridge method.
    is_bridge, set_bridge => BRIDGE;
    /// Whether the method takes a variable number of arguments.
    is_varargs, set_varargs => VARARGS;
    /// Whether the method is declared `native`.
    is_native, set_native => NATIVE;
    /// Whether the method is declared `abstract`.
    is_abstract, set_abstract => ABSTRACT;
    /// Whether the method is declared `strictfp`.
    is_strict, set_strict => STRICT;
    /// Whether the method is synthetic.
    is_synthetic, set_synthetic => SYNTHETIC;
});
