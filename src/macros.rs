/// Expands to a doc line linking to a section of the JVM Specification.
macro_rules! see_jvm_spec {
    ($chapter:literal, $section:literal $(, $sub:literal)*) => {
        concat!(
            "See the [JVM Specification §", $chapter, ".", $section, $(".", $sub,)*
            "](https://docs.oracle.com/javase/specs/jvms/se21/html/jvms-", $chapter,
            ".html#jvms-", $chapter, ".", $section, $(".", $sub,)* ") for more information."
        )
    };
}

/// Generates the named predicates and setters of an access flag context.
macro_rules! named_flags {
    ($flags:ty { $($(#[$doc:meta])* $is:ident, $set:ident => $flag:ident;)* }) => {
        impl $crate::jvm::class::AccessFlags<'_, $flags> {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $is(&self) -> bool {
                    self.contains(<$flags>::$flag)
                }
            )*
        }

        impl $crate::jvm::class::AccessFlagsMut<'_, $flags> {
            $(
                $(#[$doc])*
                #[must_use]
                pub fn $is(&self) -> bool {
                    self.contains(<$flags>::$flag)
                }

                #[doc = concat!("Sets or clears [`", stringify!($flag), "`](", stringify!($flags), "::", stringify!($flag), "), leaving every other bit untouched.")]
                pub fn $set(&mut self, value: bool) {
                    self.set(<$flags>::$flag, value);
                }
            )*
        }
    };
}

pub(crate) use {named_flags, see_jvm_spec};
