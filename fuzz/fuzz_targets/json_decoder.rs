#![no_main]

use libfuzzer_sys::fuzz_target;

use ceelog_codec::{JsonDecoder, JsonEncoder};
use ceelog_core::{Context, ContextFlags, Encoder};

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    let ctx = Context::new();
    ctx.set_flags(ContextFlags::INCLUDE_FLAT_TAGS);

    if let Ok(event) = JsonDecoder::parse_event(&ctx, line) {
        // 디코딩한 이벤트를 다시 인코딩하면 올바른 JSON이어야 함
        let out = JsonEncoder::new().encode(&event).expect("json encoding is infallible");
        let reparsed: Result<serde_json::Value, _> = serde_json::from_str(&out);
        assert!(reparsed.is_ok(), "encoder produced invalid JSON: {out}");
    }
});
