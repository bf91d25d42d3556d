#![no_main]

use libfuzzer_sys::fuzz_target;

use ceelog_codec::{InternalDecoder, ReaderSource, SyslogEncoder};
use ceelog_core::{CeeError, Context, Decoder, Encoder, Event};

fuzz_target!(|data: &[u8]| {
    let ctx = Context::new();
    let encoder = SyslogEncoder::new();
    let mut sink = |event: Event| -> Result<(), CeeError> {
        // 모든 이벤트는 인코딩 가능해야 함
        let out = encoder.encode(&event)?;
        assert!(out.starts_with("[cee@115") && out.ends_with(']'));
        Ok(())
    };

    // 잘못된 UTF-8은 읽기 에러로 끝남
    let mut source = ReaderSource::new(data).with_unescape(true);
    if let Err(e) = InternalDecoder::new().decode(&ctx, &mut source, &mut sink) {
        assert!(e.code() < 0);
    }
});
