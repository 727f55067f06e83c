#![no_main]

use classkit::jvm::bytecode::ClassFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(class_file) = ClassFile::parse(data) {
        let encoded = class_file.encode().expect("a decoded class file always fits its lengths");
        assert_eq!(encoded, data);
    }
});
