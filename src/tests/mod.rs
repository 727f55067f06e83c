use proptest::prelude::*;

use crate::jvm::constant_pool::tests::arb_constant_pool_bytes;

/// The smallest useful class file: `public class Demo extends java.lang.Object`.
#[rustfmt::skip]
#[must_use]
pub(crate) fn demo_class() -> Vec<u8> {
    vec![
        0xCA, 0xFE, 0xBA, 0xBE, // Magic
        0x00, 0x00, // Minor version
        0x00, 0x41, // Major version: 65
        // Constant pool
        0x00, 0x05, // Constant pool count 4+1
        0x01, 0x00, 0x04, b'D', b'e', b'm', b'o', // #1 Utf8 "Demo"
        0x07, 0x00, 0x01, // #2 Class #1
        0x01, 0x00, 0x10, // #3 Utf8 of length 16
        b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g', b'/',
        b'O', b'b', b'j', b'e', b'c', b't', // "java/lang/Object"
        0x07, 0x00, 0x03, // #4 Class #3
        0x00, 0x21, // Access flags: public super
        0x00, 0x02, // This class index
        0x00, 0x04, // Super class index
        0x00, 0x00, // Interfaces count
        0x00, 0x00, // Fields count
        0x00, 0x00, // Methods count
        0x00, 0x00, // Attributes count
    ]
}

/// Assembles class files byte by byte for tests.
#[derive(Debug)]
pub(crate) struct ClassBuilder {
    constant_pool: Vec<u8>,
    constant_pool_count: u16,
    access_flags: u16,
    this_class: u16,
    super_class: u16,
    interfaces: Vec<u16>,
    fields: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    attributes: Vec<Vec<u8>>,
}

impl ClassBuilder {
    pub(crate) fn new() -> Self {
        Self {
            constant_pool: Vec::new(),
            constant_pool_count: 1,
            access_flags: 0x0021,
            this_class: 0,
            super_class: 0,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Appends a raw constant and returns its index.
    pub(crate) fn entry(&mut self, tag: u8, payload: &[u8]) -> u16 {
        let index = self.constant_pool_count;
        self.constant_pool.push(tag);
        self.constant_pool.extend_from_slice(payload);
        self.constant_pool_count += if tag == 5 || tag == 6 { 2 } else { 1 };
        index
    }

    /// Appends a `CONSTANT_Utf8` for an ASCII string.
    pub(crate) fn utf8(&mut self, text: &str) -> u16 {
        let length = u16::try_from(text.len()).unwrap();
        let payload = [length.to_be_bytes().as_slice(), text.as_bytes()].concat();
        self.entry(1, &payload)
    }

    pub(crate) fn class(&mut self, name: &str) -> u16 {
        let name_index = self.utf8(name);
        self.entry(7, &name_index.to_be_bytes())
    }

    pub(crate) fn integer(&mut self, value: i32) -> u16 {
        self.entry(3, &value.to_be_bytes())
    }

    pub(crate) fn long(&mut self, value: i64) -> u16 {
        self.entry(5, &value.to_be_bytes())
    }

    pub(crate) fn double(&mut self, value: f64) -> u16 {
        self.entry(6, &value.to_be_bytes())
    }

    pub(crate) fn access_flags(&mut self, access_flags: u16) -> &mut Self {
        self.access_flags = access_flags;
        self
    }

    pub(crate) fn this_class(&mut self, index: u16) -> &mut Self {
        self.this_class = index;
        self
    }

    pub(crate) fn super_class(&mut self, index: u16) -> &mut Self {
        self.super_class = index;
        self
    }

    pub(crate) fn interface(&mut self, index: u16) -> &mut Self {
        self.interfaces.push(index);
        self
    }

    pub(crate) fn field(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: &[(&str, &[u8])],
    ) -> &mut Self {
        let member = self.member(access_flags, name, descriptor, attributes);
        self.fields.push(member);
        self
    }

    pub(crate) fn method(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: &[(&str, &[u8])],
    ) -> &mut Self {
        let member = self.member(access_flags, name, descriptor, attributes);
        self.methods.push(member);
        self
    }

    pub(crate) fn attribute(&mut self, name: &str, payload: &[u8]) -> &mut Self {
        let attribute = self.attribute_bytes(name, payload);
        self.attributes.push(attribute);
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x41];
        bytes.extend_from_slice(&self.constant_pool_count.to_be_bytes());
        bytes.extend_from_slice(&self.constant_pool);
        bytes.extend_from_slice(&self.access_flags.to_be_bytes());
        bytes.extend_from_slice(&self.this_class.to_be_bytes());
        bytes.extend_from_slice(&self.super_class.to_be_bytes());
        bytes.extend_from_slice(&table_length(self.interfaces.len()));
        for interface in &self.interfaces {
            bytes.extend_from_slice(&interface.to_be_bytes());
        }
        for table in [&self.fields, &self.methods, &self.attributes] {
            bytes.extend_from_slice(&table_length(table.len()));
            bytes.extend(table.iter().flatten());
        }
        bytes
    }

    fn member(
        &mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        attributes: &[(&str, &[u8])],
    ) -> Vec<u8> {
        let name_index = self.utf8(name);
        let descriptor_index = self.utf8(descriptor);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&access_flags.to_be_bytes());
        bytes.extend_from_slice(&name_index.to_be_bytes());
        bytes.extend_from_slice(&descriptor_index.to_be_bytes());
        bytes.extend_from_slice(&table_length(attributes.len()));
        for (name, payload) in attributes {
            let attribute = self.attribute_bytes(name, payload);
            bytes.extend(attribute);
        }
        bytes
    }

    fn attribute_bytes(&mut self, name: &str, payload: &[u8]) -> Vec<u8> {
        let name_index = self.utf8(name);
        let length = u32::try_from(payload.len()).unwrap();
        [
            name_index.to_be_bytes().as_slice(),
            length.to_be_bytes().as_slice(),
            payload,
        ]
        .concat()
    }
}

fn table_length(len: usize) -> [u8; 2] {
    u16::try_from(len).unwrap().to_be_bytes()
}

fn arb_attribute_bytes() -> impl Strategy<Value = Vec<u8>> {
    (any::<u16>(), prop::collection::vec(any::<u8>(), 0..32)).prop_map(|(name_index, info)| {
        let length = u32::try_from(info.len()).unwrap();
        [
            name_index.to_be_bytes().as_slice(),
            length.to_be_bytes().as_slice(),
            info.as_slice(),
        ]
        .concat()
    })
}

fn arb_table_bytes<S>(element: S, max: usize) -> impl Strategy<Value = Vec<u8>>
where
    S: Strategy<Value = Vec<u8>>,
{
    prop::collection::vec(element, 0..max).prop_map(|elements| {
        let mut bytes = table_length(elements.len()).to_vec();
        bytes.extend(elements.into_iter().flatten());
        bytes
    })
}

fn arb_member_bytes() -> impl Strategy<Value = Vec<u8>> {
    (
        any::<[u8; 6]>(),
        arb_table_bytes(arb_attribute_bytes(), 4),
    )
        .prop_map(|(header, attributes)| [header.as_slice(), attributes.as_slice()].concat())
}

prop_compose! {
    /// Arbitrary well-formed class files. Indices are random, so most of them do not resolve.
    pub(crate) fn arb_class_file_bytes()(
        version in any::<[u8; 4]>(),
        (count, constant_pool) in arb_constant_pool_bytes(),
        header in any::<[u8; 6]>(),
        interfaces in arb_table_bytes(any::<[u8; 2]>().prop_map(Vec::from), 8),
        fields in arb_table_bytes(arb_member_bytes(), 4),
        methods in arb_table_bytes(arb_member_bytes(), 4),
        attributes in arb_table_bytes(arb_attribute_bytes(), 4),
    ) -> Vec<u8> {
        [
            [0xCA, 0xFE, 0xBA, 0xBE].as_slice(),
            version.as_slice(),
            count.to_be_bytes().as_slice(),
            constant_pool.as_slice(),
            header.as_slice(),
            interfaces.as_slice(),
            fields.as_slice(),
            methods.as_slice(),
            attributes.as_slice(),
        ]
        .concat()
    }
}
