//! RFC 5424 구조화 데이터 인코더
//!
//! `[cee@115 event.tags="t1,t2" name="v1,v2" ...]` 형식으로 출력합니다.
//! 태그 버킷이 있으면 항상 `event.tags`를 출력합니다.

use ceelog_core::codec::Encoder;
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::event::{EVENT_TAGS_FIELD, Event};
use ceelog_core::field::Field;
use ceelog_core::tag_bucket::TagBucket;

use super::{Layout, render};
use crate::escape::escape_syslog;

/// CEE 구조화 데이터 ID
pub const SD_ID: &str = "cee@115";

/// RFC 5424 syslog 인코더
#[derive(Debug, Clone, Copy, Default)]
pub struct SyslogEncoder;

impl SyslogEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for SyslogEncoder {
    const FORMAT: &'static str = "syslog";

    fn open(&self, out: &mut String) {
        out.push('[');
        out.push_str(SD_ID);
    }

    fn close(&self, out: &mut String) {
        out.push(']');
    }

    fn separator(&self, _index: usize, _compact: bool) -> &'static str {
        " "
    }

    fn wants_tags(&self, _ctx: &Context) -> bool {
        true
    }

    fn write_tags(&self, tags: &TagBucket, _compact: bool, out: &mut String) {
        out.push_str(EVENT_TAGS_FIELD);
        out.push_str("=\"");
        for (i, tag) in tags.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            escape_syslog(&tag, out);
        }
        out.push('"');
    }

    fn write_field(&self, field: &Field, _compact: bool, out: &mut String) {
        escape_syslog(field.name().unwrap_or(""), out);
        out.push_str("=\"");
        for (i, value) in field.values().enumerate() {
            if i > 0 {
                out.push(',');
            }
            escape_syslog(&value.as_string(), out);
        }
        out.push('"');
    }
}

impl Encoder for SyslogEncoder {
    fn format_name(&self) -> &str {
        Self::FORMAT
    }

    fn encode(&self, event: &Event) -> Result<String, CeeError> {
        Ok(render(self, event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceelog_core::context::ContextFlags;

    fn encode(event: &Event) -> String {
        SyslogEncoder::new().encode(event).unwrap()
    }

    #[test]
    fn empty_event_is_bare_frame() {
        let ctx = Context::new();
        assert_eq!(encode(&Event::new(&ctx)), "[cee@115]");
    }

    #[test]
    fn tags_and_fields() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        event.add_tag("t1").unwrap();
        event.add_tag("t2").unwrap();
        event.add_string_field("name", "value").unwrap();
        event.add_string_field("name2", "value2").unwrap();
        assert_eq!(
            encode(&event),
            "[cee@115 event.tags=\"t1,t2\" name=\"value\" name2=\"value2\"]"
        );
    }

    #[test]
    fn multi_values_join_with_comma_inside_one_string() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        let mut field = Field::with_name_value("f", "a,b").unwrap();
        field.add_string_value("c]").unwrap();
        event.add_field(field).unwrap();
        assert_eq!(encode(&event), "[cee@115 f=\"a\\,b,c\\]\"]");
    }

    #[test]
    fn empty_field_renders_empty_string_unless_compact() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        let mut field = Field::new();
        field.set_name("empty").unwrap();
        event.add_field(field).unwrap();
        event.add_string_field("x", "1").unwrap();
        assert_eq!(encode(&event), "[cee@115 empty=\"\" x=\"1\"]");

        ctx.set_flags(ContextFlags::ULTRA_COMPACT);
        assert_eq!(encode(&event), "[cee@115 x=\"1\"]");
    }

    #[test]
    fn values_are_escaped() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        event.add_string_field("msg", "say \"hi\"\nC:\\").unwrap();
        assert_eq!(encode(&event), "[cee@115 msg=\"say \\\"hi\\\"\\nC:\\\\\"]");
    }
}
