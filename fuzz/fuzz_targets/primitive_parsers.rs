#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ceelog_core::primitive::PrimitiveType;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    input: String,
    offset: usize,
    delimiter: Option<String>,
}

fuzz_target!(|fuzz: FuzzInput| {
    for ty in PrimitiveType::ALL {
        let mut offset = fuzz.offset % (fuzz.input.len() + 2);
        let start = offset;
        match ty.parse(&fuzz.input, &mut offset, fuzz.delimiter.as_deref()) {
            // 성공하면 입력을 앞으로만 소비
            Ok(_) => assert!(offset > start && offset <= fuzz.input.len()),
            // 실패하면 오프셋은 그대로
            Err(_) => assert_eq!(offset, start),
        }
    }
});
