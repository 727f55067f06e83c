#![allow(dead_code)]

/// `public class Demo extends java.lang.Object`, with nothing else in it.
#[rustfmt::skip]
pub const DEMO_CLASS: &[u8] = &[
    0xCA, 0xFE, 0xBA, 0xBE, // Magic
    0x00, 0x00, 0x00, 0x41, // Version 65.0
    0x00, 0x05, // Constant pool count
    0x01, 0x00, 0x04, b'D', b'e', b'm', b'o', // #1 Utf8 "Demo"
    0x07, 0x00, 0x01, // #2 Class #1
    0x01, 0x00, 0x10, b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g',
    b'/', b'O', b'b', b'j', b'e', b'c', b't', // #3 Utf8 "java/lang/Object"
    0x07, 0x00, 0x03, // #4 Class #3
    0x00, 0x21, // public super
    0x00, 0x02, // this class
    0x00, 0x04, // super class
    0x00, 0x00, // interfaces
    0x00, 0x00, // fields
    0x00, 0x00, // methods
    0x00, 0x00, // attributes
];

/// A class with one constant of every kind, an interface, a field, a method and attributes.
///
/// ```java
/// public final class Sample implements java.lang.Runnable {
///     private static final long LIMIT = ...;
///     public void run() { return; }
/// }
/// ```
#[rustfmt::skip]
pub const SAMPLE_CLASS: &[u8] = &[
    0xCA, 0xFE, 0xBA, 0xBE,
    0x00, 0x00, 0x00, 0x3D, // Version 61.0
    0x00, 0x1F, // Constant pool count 30+1
    0x01, 0x00, 0x06, b'S', b'a', b'm', b'p', b'l', b'e', // #1 Utf8 "Sample"
    0x07, 0x00, 0x01, // #2 Class #1
    0x01, 0x00, 0x10, b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g',
    b'/', b'O', b'b', b'j', b'e', b'c', b't', // #3 Utf8 "java/lang/Object"
    0x07, 0x00, 0x03, // #4 Class #3
    0x01, 0x00, 0x12, b'j', b'a', b'v', b'a', b'/', b'l', b'a', b'n', b'g',
    b'/', b'R', b'u', b'n', b'n', b'a', b'b', b'l', b'e', // #5 Utf8 "java/lang/Runnable"
    0x07, 0x00, 0x05, // #6 Class #5
    0x01, 0x00, 0x05, b'L', b'I', b'M', b'I', b'T', // #7 Utf8 "LIMIT"
    0x01, 0x00, 0x01, b'J', // #8 Utf8 "J"
    0x05, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, // #9 Long, #10 reserved
    0x01, 0x00, 0x03, b'r', b'u', b'n', // #11 Utf8 "run"
    0x01, 0x00, 0x03, b'(', b')', b'V', // #12 Utf8 "()V"
    0x01, 0x00, 0x04, b'C', b'o', b'd', b'e', // #13 Utf8 "Code"
    0x01, 0x00, 0x0D, b'C', b'o', b'n', b's', b't', b'a', b'n', b't',
    b'V', b'a', b'l', b'u', b'e', // #14 Utf8 "ConstantValue"
    0x01, 0x00, 0x0A, b'S', b'o', b'u', b'r', b'c', b'e', b'F', b'i', b'l',
    b'e', // #15 Utf8 "SourceFile"
    0x03, 0xFF, 0xFF, 0xFF, 0xFE, // #16 Integer -2
    0x04, 0x3F, 0xC0, 0x00, 0x00, // #17 Float 1.5
    0x06, 0x7F, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, // #18 Double NaN, #19 reserved
    0x08, 0x00, 0x0B, // #20 String #11
    0x0C, 0x00, 0x0B, 0x00, 0x0C, // #21 NameAndType #11 #12
    0x0A, 0x00, 0x06, 0x00, 0x15, // #22 Methodref #6 #21
    0x09, 0x00, 0x02, 0x00, 0x15, // #23 Fieldref #2 #21
    0x0B, 0x00, 0x06, 0x00, 0x15, // #24 InterfaceMethodref #6 #21
    0x0F, 0x05, 0x00, 0x16, // #25 MethodHandle invokevirtual #22
    0x10, 0x00, 0x0C, // #26 MethodType #12
    0x12, 0x00, 0x00, 0x00, 0x15, // #27 InvokeDynamic bootstrap 0 #21
    0x11, 0x00, 0x00, 0x00, 0x15, // #28 Dynamic bootstrap 0 #21
    0x13, 0x00, 0x01, // #29 Module #1
    0x14, 0x00, 0x01, // #30 Package #1
    0x00, 0x31, // public final super
    0x00, 0x02, // this class
    0x00, 0x04, // super class
    0x00, 0x01, 0x00, 0x06, // interfaces: #6
    0x00, 0x01, // fields count
    0x00, 0x1A, 0x00, 0x07, 0x00, 0x08, // private static final LIMIT: J
    0x00, 0x01, 0x00, 0x0E, 0x00, 0x00, 0x00, 0x02, 0x00, 0x09, // ConstantValue #9
    0x00, 0x01, // methods count
    0x00, 0x01, 0x00, 0x0B, 0x00, 0x0C, // public run: ()V
    0x00, 0x01, 0x00, 0x0D, 0x00, 0x00, 0x00, 0x0D, // Code, 13 bytes
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0xB1, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, // attributes count
    0x00, 0x0F, 0x00, 0x00, 0x00, 0x02, 0x00, 0x01, // SourceFile #1
];
