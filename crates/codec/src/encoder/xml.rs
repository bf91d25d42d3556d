//! XML 인코더
//!
//! `<event><event.tags><tag>t</tag></event.tags><Field name ="f"><value>v</value></Field></event>`
//! 형식으로 출력합니다. 항목 사이에 구분자가 없고, 태그 버킷이 있으면 항상 태그를 출력합니다.

use ceelog_core::codec::Encoder;
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::event::Event;
use ceelog_core::field::Field;
use ceelog_core::tag_bucket::TagBucket;

use super::{Layout, render};
use crate::escape::escape_xml;

/// XML 인코더
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl XmlEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Layout for XmlEncoder {
    const FORMAT: &'static str = "xml";

    fn open(&self, out: &mut String) {
        out.push_str("<event>");
    }

    fn close(&self, out: &mut String) {
        out.push_str("</event>");
    }

    fn separator(&self, _index: usize, _compact: bool) -> &'static str {
        ""
    }

    fn wants_tags(&self, _ctx: &Context) -> bool {
        true
    }

    fn write_tags(&self, tags: &TagBucket, _compact: bool, out: &mut String) {
        out.push_str("<event.tags>");
        for tag in tags.iter() {
            out.push_str("<tag>");
            escape_xml(&tag, out);
            out.push_str("</tag>");
        }
        out.push_str("</event.tags>");
    }

    fn write_field(&self, field: &Field, _compact: bool, out: &mut String) {
        out.push_str("<Field name =\"");
        escape_xml(field.name().unwrap_or(""), out);
        out.push_str("\">");
        for value in field.values() {
            out.push_str("<value>");
            escape_xml(&value.as_string(), out);
            out.push_str("</value>");
        }
        out.push_str("</Field>");
    }
}

impl Encoder for XmlEncoder {
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
        XmlEncoder::new().encode(event).unwrap()
    }

    #[test]
    fn empty_event() {
        let ctx = Context::new();
        assert_eq!(encode(&Event::new(&ctx)), "<event></event>");
    }

    #[test]
    fn tags_then_fields() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        event.add_tag("t").unwrap();
        event.add_string_field("f", "v").unwrap();
        assert_eq!(
            encode(&event),
            "<event><event.tags><tag>t</tag></event.tags><Field name =\"f\"><value>v</value></Field></event>"
        );
    }

    #[test]
    fn one_value_element_per_value() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        let mut field = Field::with_name_value("f", "a").unwrap();
        field.add_string_value("b").unwrap();
        event.add_field(field).unwrap();
        assert_eq!(
            encode(&event),
            "<event><Field name =\"f\"><value>a</value><value>b</value></Field></event>"
        );
    }

    #[test]
    fn markup_is_escaped() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        event.add_string_field("expr", "a<b && c>d").unwrap();
        assert_eq!(
            encode(&event),
            "<event><Field name =\"expr\"><value>a&lt;b &amp;&amp; c>d</value></Field></event>"
        );
    }

    #[test]
    fn empty_field_skipped_only_when_compact() {
        let ctx = Context::new();
        let mut event = Event::new(&ctx);
        let mut field = Field::new();
        field.set_name("e").unwrap();
        event.add_field(field).unwrap();
        assert_eq!(encode(&event), "<event><Field name =\"e\"></Field></event>");

        ctx.set_flags(ContextFlags::ULTRA_COMPACT);
        assert_eq!(encode(&event), "<event></event>");
    }
}
