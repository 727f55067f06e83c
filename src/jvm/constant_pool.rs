//! The constant pool of a JVM class file.

mod entry;
mod java_string;

use std::io::{self, Read};

pub use entry::{ConstantKind, Entry};
pub use java_string::JavaString;

use crate::{
    jvm::bytecode::{DecodeError, EncodeError, ToWriter},
    macros::see_jvm_spec,
};

/// A slot in the [`ConstantPool`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A slot holding an entry.
    Entry(Entry),
    /// A slot that cannot be addressed: index `0`, and the slot right after every
    /// [`Entry::Long`] and [`Entry::Double`].
    Reserved,
}

/// A JVM constant pool.
///
/// Slots are addressed from `1` to [`count()`](Self::count)` - 1`, the same way instructions
/// and structures in a class file refer to them.
#[doc = see_jvm_spec!(4, 4)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantPool {
    inner: Vec<Slot>,
}

/// The constant pool cannot take more entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("The constant pool is full")]
pub struct PoolOverflow;

/// An entry of the [`ConstantPool`] cannot be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplaceError {
    /// There is no entry at the index, either because it is out of range or reserved.
    #[error("constant #{0} does not exist")]
    NoSuchEntry(u16),
    /// The replacement does not take as many slots as the entry it replaces.
    #[error("constant #{index} is a {current} and can not be replaced with a {replacement}")]
    WidthMismatch {
        /// The index of the entry.
        index: u16,
        /// The kind of the entry in the pool.
        current: &'static str,
        /// The kind of the replacement.
        replacement: &'static str,
    },
}

impl ConstantPool {
    /// Creates a new empty constant pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: vec![Slot::Reserved],
        }
    }

    /// Parses a constant pool whose declared count has already been read.
    /// - `constant_pool_count` is the maximum index of entries in the constant pool plus one.
    #[doc = see_jvm_spec!(4, 1)]
    /// # Errors
    /// See [`DecodeError`] for more information.
    pub fn from_reader<R>(reader: &mut R, constant_pool_count: u16) -> Result<Self, DecodeError>
    where
        R: Read + ?Sized,
    {
        if constant_pool_count == 0 {
            return Err(DecodeError::Malformed(
                "The constant pool count must be at least 1",
            ));
        }
        let count = usize::from(constant_pool_count);
        let mut inner = Vec::with_capacity(count);
        inner.push(Slot::Reserved);
        while inner.len() < count {
            let entry = Entry::parse(reader)?;
            if entry.is_double_slot() {
                if inner.len() + 2 > count {
                    return Err(DecodeError::Malformed(
                        "A long or double constant overflows the constant pool",
                    ));
                }
                inner.push(Slot::Entry(entry));
                inner.push(Slot::Reserved);
            } else {
                inner.push(Slot::Entry(entry));
            }
        }
        Ok(Self { inner })
    }

    /// Gets the entry at the given index.
    /// Returns [`None`] for reserved slots and indices out of range.
    #[must_use]
    pub fn get(&self, index: u16) -> Option<&Entry> {
        match self.inner.get(usize::from(index)) {
            Some(Slot::Entry(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Gets a mutable reference to the entry at the given index.
    /// Callers must not change the slot width of the entry.
    pub(crate) fn get_mut(&mut self, index: u16) -> Option<&mut Entry> {
        match self.inner.get_mut(usize::from(index)) {
            Some(Slot::Entry(entry)) => Some(entry),
            _ => None,
        }
    }

    /// Replaces the entry at the given index and returns the old one.
    /// The new entry must take as many slots as the old one, so that no other index moves.
    /// # Errors
    /// - [`ReplaceError::NoSuchEntry`] if `index` is out of range or a reserved slot.
    /// - [`ReplaceError::WidthMismatch`] if only one of the entries is a [`Entry::Long`] or a
    ///   [`Entry::Double`].
    pub fn replace(&mut self, index: u16, entry: Entry) -> Result<Entry, ReplaceError> {
        let current = self
            .get_mut(index)
            .ok_or(ReplaceError::NoSuchEntry(index))?;
        if current.is_double_slot() != entry.is_double_slot() {
            return Err(ReplaceError::WidthMismatch {
                index,
                current: current.constant_kind(),
                replacement: entry.constant_kind(),
            });
        }
        Ok(std::mem::replace(current, entry))
    }

    /// Gets the slot at the given index.
    #[must_use]
    pub fn slot(&self, index: u16) -> Option<&Slot> {
        self.inner.get(usize::from(index))
    }

    /// Whether the given index is a reserved slot.
    #[must_use]
    pub fn is_reserved(&self, index: u16) -> bool {
        matches!(self.slot(index), Some(Slot::Reserved))
    }

    /// Iterates over the entries together with their indices, skipping reserved slots.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Entry)> {
        self.inner
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| match slot {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "The number of slots never exceeds u16::MAX"
                )]
                Slot::Entry(entry) => Some((idx as u16, entry)),
                Slot::Reserved => None,
            })
    }

    /// Appends an entry to the end of the constant pool and returns its index.
    /// A [`Entry::Long`] or [`Entry::Double`] also takes the slot after it.
    /// # Errors
    /// - [`PoolOverflow`] if the count of the constant pool would exceed [`u16::MAX`].
    pub fn push(&mut self, entry: Entry) -> Result<u16, PoolOverflow> {
        let width = if entry.is_double_slot() { 2 } else { 1 };
        if self.inner.len() + width > usize::from(u16::MAX) {
            return Err(PoolOverflow);
        }
        let index = self.count();
        self.inner.push(Slot::Entry(entry));
        if width == 2 {
            self.inner.push(Slot::Reserved);
        }
        Ok(index)
    }

    /// Finds the first [`Entry::Utf8`] whose bytes equal the modified UTF-8 encoding of `text`.
    #[must_use]
    pub fn find_utf8(&self, text: &str) -> Option<u16> {
        let needle = JavaString::from(text);
        self.iter().find_map(|(idx, entry)| match entry {
            Entry::Utf8(java_str) if *java_str == needle => Some(idx),
            _ => None,
        })
    }

    /// Gets the count of the constant pool, as stored in the class file.
    /// Note that this is NOT the number of entries.
    #[doc = see_jvm_spec!(4, 1)]
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The number of slots never exceeds u16::MAX"
    )]
    pub fn count(&self) -> u16 {
        self.inner.len() as u16
    }

    /// Gets the number of entries, not counting reserved slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns `true` if the pool holds no entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.len() <= 1
    }
}

impl Default for ConstantPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ToWriter for ConstantPool {
    fn to_writer<W: io::Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodeError> {
        writer.write_all(&self.count().to_be_bytes())?;
        for slot in &self.inner {
            if let Slot::Entry(entry) = slot {
                entry.to_writer(writer)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use proptest::prelude::*;

    use super::{entry::tests::arb_entry, *};

    prop_compose! {
        pub(crate) fn arb_constant_pool_bytes()(
            entries in prop::collection::vec(arb_entry(), 1..=100)
        ) -> (u16, Vec<u8>) {
            let count = {
                let mut len = entries.len();
                len += entries.iter().filter(|it| it.is_double_slot()).count();
                len += 1;
                u16::try_from(len).unwrap()
            };
            let mut bytes = Vec::new();
            for entry in &entries {
                entry.to_writer(&mut bytes).unwrap();
            }
            (count, bytes)
        }
    }

    proptest! {
        #[test]
        fn from_reader((count, bytes) in arb_constant_pool_bytes()) {
            let mut reader = bytes.as_slice();
            let constant_pool = ConstantPool::from_reader(&mut reader, count).unwrap();
            assert!(reader.is_empty());
            assert_eq!(constant_pool.count(), count);
        }

        #[test]
        fn from_reader_err_on_wrong_count((count, bytes) in arb_constant_pool_bytes()) {
            let mut reader = bytes.as_slice();
            let constant_pool = ConstantPool::from_reader(&mut reader, count + 1);
            assert!(constant_pool.is_err());
        }

        #[test]
        fn to_writer_reproduces_input((count, bytes) in arb_constant_pool_bytes()) {
            let constant_pool = ConstantPool::from_reader(&mut bytes.as_slice(), count).unwrap();
            let mut written = Vec::new();
            constant_pool.to_writer(&mut written).unwrap();
            assert_eq!(&written[..2], &count.to_be_bytes());
            assert_eq!(&written[2..], bytes.as_slice());
        }

        #[test]
        fn slot_after_double_slot_entry_is_reserved((count, bytes) in arb_constant_pool_bytes()) {
            let constant_pool = ConstantPool::from_reader(&mut bytes.as_slice(), count).unwrap();
            for (idx, entry) in constant_pool.iter() {
                if entry.is_double_slot() {
                    assert!(constant_pool.is_reserved(idx + 1));
                    assert!(constant_pool.get(idx + 1).is_none());
                }
            }
        }
    }

    #[test]
    fn long_takes_two_slots() {
        let bytes = [
            0x05, 0, 0, 0, 0, 0, 0, 0, 0x2A, // #1 Long(42), #2 reserved
            0x01, 0x00, 0x01, b'x', // #3 Utf8("x")
        ];
        let constant_pool = ConstantPool::from_reader(&mut bytes.as_slice(), 4).unwrap();
        assert_eq!(constant_pool.get(1), Some(&Entry::Long(42)));
        assert!(constant_pool.is_reserved(2));
        assert_eq!(
            constant_pool.get(3),
            Some(&Entry::Utf8(JavaString::from("x")))
        );
        assert_eq!(constant_pool.len(), 2);
        assert_eq!(constant_pool.count(), 4);
    }

    #[test]
    fn index_zero_is_reserved() {
        let constant_pool = ConstantPool::new();
        assert!(constant_pool.is_reserved(0));
        assert!(constant_pool.get(0).is_none());
        assert!(constant_pool.is_empty());
        assert_eq!(constant_pool.count(), 1);
    }

    #[test]
    fn double_slot_overflowing_count() {
        let bytes = [0x06, 0, 0, 0, 0, 0, 0, 0, 0];
        let err = ConstantPool::from_reader(&mut bytes.as_slice(), 2).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn zero_count() {
        let err = ConstantPool::from_reader(&mut [].as_slice(), 0).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }

    #[test]
    fn push_skips_reserved_slot() {
        let mut constant_pool = ConstantPool::new();
        assert_eq!(constant_pool.push(Entry::Double(1.5)), Ok(1));
        assert_eq!(
            constant_pool.push(Entry::Utf8(JavaString::from("next"))),
            Ok(3)
        );
        assert_eq!(constant_pool.find_utf8("next"), Some(3));
        assert_eq!(constant_pool.find_utf8("missing"), None);
    }

    #[test]
    fn replace_keeps_slot_width() {
        let bytes = [
            0x05, 0, 0, 0, 0, 0, 0, 0, 0x2A, // #1 Long(42), #2 reserved
            0x03, 0, 0, 0, 0x07, // #3 Integer(7)
        ];
        let mut constant_pool = ConstantPool::from_reader(&mut bytes.as_slice(), 4).unwrap();

        assert_eq!(
            constant_pool.replace(3, Entry::Long(7)),
            Err(ReplaceError::WidthMismatch {
                index: 3,
                current: "CONSTANT_Integer",
                replacement: "CONSTANT_Long",
            })
        );
        assert!(matches!(
            constant_pool.replace(1, Entry::Integer(1)),
            Err(ReplaceError::WidthMismatch { index: 1, .. })
        ));
        assert_eq!(
            constant_pool.replace(2, Entry::Integer(1)),
            Err(ReplaceError::NoSuchEntry(2))
        );
        assert_eq!(
            constant_pool.replace(4, Entry::Integer(1)),
            Err(ReplaceError::NoSuchEntry(4))
        );
        assert_eq!(constant_pool.replace(1, Entry::Double(0.5)), Ok(Entry::Long(42)));
        assert_eq!(constant_pool.replace(3, Entry::Float(2.0)), Ok(Entry::Integer(7)));
        assert!(constant_pool.is_reserved(2));

        let mut written = Vec::new();
        constant_pool.to_writer(&mut written).unwrap();
        let reparsed = ConstantPool::from_reader(&mut &written[2..], constant_pool.count()).unwrap();
        assert_eq!(reparsed, constant_pool);
        assert_eq!(reparsed.get(1), Some(&Entry::Double(0.5)));
        assert_eq!(reparsed.get(3), Some(&Entry::Float(2.0)));
    }

    #[test]
    fn push_overflow() {
        let mut constant_pool = ConstantPool::new();
        for i in 1..u16::MAX {
            assert_eq!(constant_pool.push(Entry::Integer(i.into())), Ok(i));
        }
        assert_eq!(constant_pool.count(), u16::MAX);
        assert_eq!(constant_pool.push(Entry::Integer(0)), Err(PoolOverflow));
    }
}
