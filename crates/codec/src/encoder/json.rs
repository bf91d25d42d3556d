//! JSON 인코더
//!
//! `{"name": "value", "multi": ["a","b"]}` 형식으로 출력합니다.
//! ultra-compact 모드에서는 `:`와 `,` 뒤의 공백을 생략합니다.
//! 태그는 컨텍스트에 `INCLUDE_FLAT_TAGS`가 있을 때만 `"event.tags"` 배열로 맨 앞에 출력합니다.

use ceelog_core::codec::Encoder;
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::event::{EVENT_TAGS_FIELD, Event};
use ceelog_core::field::Field;
use ceelog_core::tag_bucket::TagBucket;

use super::{Layout, render};
use crate::escape::escape_json;

/// JSON 인코더
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl JsonEncoder {
    pub fn new() -> Self {
        Self
    }
}

fn push_string(s: &str, out: &mut String) {
    out.push('"');
    escape_json(s, out);
    out.push('"');
}

fn push_key(name: &str, compact: bool, out: &mut String) {
    push_string(name, out);
    out.push_str(if compact { ":" } else { ": " });
}

impl Layout for JsonEncoder {
    const FORMAT: &'static str = "json";

    fn open(&self, out: &mut String) {
        out.push('{');
    }

    fn close(&self, out: &mut String) {
        out.push('}');
    }

    fn separator(&self, index: usize, compact: bool) -> &'static str {
        match (index, compact) {
            (0, _) => "",
            (_, true) => ",",
            (_, false) => ", ",
        }
    }

    fn wants_tags(&self, ctx: &Context) -> bool {
        ctx.includes_flat_tags()
    }

    fn write_tags(&self, tags: &TagBucket, _compact: bool, out: &mut String) {
        // 태그 항목은 압축 모드와 무관하게 콜론 뒤에 공백이 없습니다.
        push_key(EVENT_TAGS_FIELD, true, out);
        out.push('[');
        for (i, tag) in tags.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_string(&tag, out);
        }
        out.push(']');
    }

    fn write_field(&self, field: &Field, compact: bool, out: &mut String) {
        push_key(field.name().unwrap_or(""), compact, out);
        match field.value_count() {
            0 => out.push_str("\"\""),
            1 => {
                for value in field.values() {
                    push_string(&value.as_string(), out);
                }
            }
            _ => {
                out.push('[');
                for (i, value) in field.values().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    push_string(&value.as_string(), out);
                }
                out.push(']');
            }
        }
    }
}

impl Encoder for JsonEncoder {
    fn format_name(&self) -> &str {
        Self::FORMAT
    }

    fn encode(&self, event: &Event) -> Result<String, CeeError> {
        Ok(render(self, event))
    }
}
