#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ceelog_codec::{ApacheDecoder, CsvEncoder, IterSource, NameList};
use ceelog_core::{CeeError, Context, Decoder, Encoder, Event};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 필드 이름 목록 (쉼표/공백 구분)
    names: String,
    /// 로그 라인 (최대 16줄로 제한)
    lines: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(names) = NameList::parse(&input.names) else {
        return;
    };
    let ctx = Context::new();
    let csv = CsvEncoder::new(names.clone());
    let mut decoder = ApacheDecoder::new(names.clone());
    let mut sink = |event: Event| -> Result<(), CeeError> {
        // 이름 목록보다 많은 필드는 생기지 않음
        let count = event.fields().map_or(0, |f| f.len());
        assert!(count <= names.len());
        csv.encode(&event)?;
        Ok(())
    };

    let lines: Vec<String> = input
        .lines
        .into_iter()
        .take(16)
        .filter(|l| !l.contains('\n'))
        .collect();
    let expected = lines.len();
    let mut source = IterSource::new(lines);
    let delivered = decoder
        .decode(&ctx, &mut source, &mut sink)
        .expect("apache decoding never fails on in-memory lines");
    assert_eq!(delivered, expected);
});
