#![no_main]

use libfuzzer_sys::fuzz_target;

use ceelog_codec::escape::{escape_json, escape_syslog, escape_xml};

fuzz_target!(|input: String| {
    // JSON: serde_json으로 되읽으면 원본
    let mut quoted = String::from("\"");
    escape_json(&input, &mut quoted);
    quoted.push('"');
    let parsed: String = serde_json::from_str(&quoted).expect("escaped JSON string must parse");
    assert_eq!(parsed, input);

    // syslog: 줄바꿈, NUL, 따옴표가 날것으로 남지 않음
    let mut syslog = String::new();
    escape_syslog(&input, &mut syslog);
    assert!(!syslog.contains('\n') && !syslog.contains('\0'));

    // XML: 마크업 시작 문자가 날것으로 남지 않음
    let mut xml = String::new();
    escape_xml(&input, &mut xml);
    assert!(!xml.contains('<') && !xml.contains('\0'));
});
