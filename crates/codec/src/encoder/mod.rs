//! 인코더 모듈 -- 이벤트를 syslog, JSON, XML, CSV 텍스트로 변환
//!
//! syslog, JSON, XML 인코더는 같은 순회([`render`])를 쓰고 형식별 규칙만
//! [`Layout`]으로 제공합니다. 순회 순서는 프레임 시작, 태그(형식이 원할 때),
//! 필드(삽입 순서), 프레임 끝입니다. 구분자는 항목 사이에만 들어갑니다.
//!
//! CSV는 호출자가 준 이름 목록 순서로 열을 만들기 때문에 별도로 구현합니다.
//!
//! # 사용 예시
//! ```ignore
//! use ceelog_codec::encoder::encoder_for;
//!
//! let encoder = encoder_for("json", None)?;
//! println!("{}", encoder.encode(&event)?);
//! ```

pub mod csv;
pub mod json;
pub mod syslog;
pub mod xml;

pub use csv::CsvEncoder;
pub use json::JsonEncoder;
pub use syslog::SyslogEncoder;
pub use xml::XmlEncoder;

use ceelog_core::codec::Encoder;
use ceelog_core::context::Context;
use ceelog_core::event::Event;
use ceelog_core::field::Field;
use ceelog_core::metrics as m;
use ceelog_core::tag_bucket::TagBucket;
use tracing::debug;

use crate::error::CodecError;
use crate::name_list::NameList;

/// 형식별 출력 규칙
pub(crate) trait Layout {
    /// 형식 이름 (메트릭 레이블)
    const FORMAT: &'static str;

    fn open(&self, out: &mut String);

    fn close(&self, out: &mut String);

    /// `index`번째 항목 앞에 붙는 구분자
    fn separator(&self, index: usize, compact: bool) -> &'static str;

    /// 태그 항목을 출력할지 여부
    fn wants_tags(&self, ctx: &Context) -> bool;

    fn write_tags(&self, tags: &TagBucket, compact: bool, out: &mut String);

    fn write_field(&self, field: &Field, compact: bool, out: &mut String);
}

/// 이벤트 하나를 `layout` 규칙으로 출력합니다.
///
/// ultra-compact 모드에서는 값이 없는 필드를 건너뜁니다.
pub(crate) fn render<L: Layout>(layout: &L, event: &Event) -> String {
    let ctx = event.context();
    let compact = ctx.is_ultra_compact();
    let mut out = String::with_capacity(256);
    let mut index = 0;

    layout.open(&mut out);

    if let Some(tags) = event.tagbucket().filter(|_| layout.wants_tags(ctx)) {
        out.push_str(layout.separator(index, compact));
        layout.write_tags(tags, compact, &mut out);
        index += 1;
    }

    for field in event.fields().into_iter().flatten() {
        if compact && field.value_count() == 0 {
            debug!(
                format = L::FORMAT,
                field = field.name().unwrap_or(""),
                "skipping field without values"
            );
            continue;
        }
        out.push_str(layout.separator(index, compact));
        layout.write_field(field, compact, &mut out);
        index += 1;
    }

    layout.close(&mut out);

    metrics::counter!(m::CODEC_EVENTS_ENCODED_TOTAL, m::LABEL_FORMAT => L::FORMAT).increment(1);
    out
}

/// 이름으로 인코더를 만듭니다.
///
/// `csv`는 `format`에 필드 이름 목록이 필요하고, 나머지 인코더는 `format`을 무시합니다.
pub fn encoder_for(name: &str, format: Option<&str>) -> Result<Box<dyn Encoder>, CodecError> {
    match name {
        "syslog" => Ok(Box::new(SyslogEncoder::new())),
        "json" => Ok(Box::new(JsonEncoder::new())),
        "xml" => Ok(Box::new(XmlEncoder::new())),
        "csv" => {
            let list = format.ok_or(CodecError::MissingOption {
                codec: "csv encoder",
                what: "a field name list",
            })?;
            Ok(Box::new(CsvEncoder::new(NameList::parse(list)?)))
        }
        other => Err(CodecError::Unsupported {
            kind: "encoder",
            name: other.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoder_for_known_names() {
        for name in ["syslog", "json", "xml"] {
            let encoder = encoder_for(name, None).unwrap();
            assert_eq!(encoder.format_name(), name);
        }
        let csv = encoder_for("csv", Some("a,b")).unwrap();
        assert_eq!(csv.format_name(), "csv");
    }

    #[test]
    fn encoder_for_csv_without_names_fails() {
        let err = encoder_for("csv", None).err().unwrap();
        assert!(matches!(err, CodecError::MissingOption { .. }));
        let err = encoder_for("csv", Some("a,,b")).err().unwrap();
        assert!(matches!(err, CodecError::NameList { .. }));
    }

    #[test]
    fn encoder_for_unknown_name_fails() {
        let err = encoder_for("yaml", None).err().unwrap();
        assert!(matches!(err, CodecError::Unsupported { kind: "encoder", .. }));
    }
}
