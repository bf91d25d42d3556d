//! Apache 로그 디코더
//!
//! 디코더를 만들 때 받은 이름 목록 순서대로 각 줄의 토큰을 필드에 대응시킵니다.
//! 토큰은 앞의 공백을 건너뛴 뒤 다음 중 하나입니다.
//!
//! - `"..."`: 닫는 `"`까지
//! - `[...]`: 닫는 `]`까지
//! - 그 외: 다음 공백까지
//!
//! 토큰이 `-` 하나뿐이면 빈 문자열입니다. 이름보다 토큰이 많으면 남는 토큰을
//! 무시하고, 적으면 뒤쪽 필드를 만들지 않습니다. 한 줄이 이벤트 하나입니다.

use std::rc::Rc;

use ceelog_core::codec::{Decoder, EventSink, LineSource};
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::event::Event;

use super::Progress;
use crate::name_list::NameList;

/// Apache 로그 디코더
#[derive(Debug, Clone)]
pub struct ApacheDecoder {
    names: NameList,
}

/// `offset`부터 토큰 하나를 읽습니다. 남은 내용이 공백뿐이면 `None`입니다.
fn next_token<'a>(line: &'a str, offset: &mut usize) -> Option<&'a str> {
    let bytes = line.as_bytes();
    let mut i = *offset;
    while i < bytes.len() && bytes[i] == b' ' {
        i += 1;
    }
    if i == bytes.len() {
        *offset = i;
        return None;
    }

    let closer = match bytes[i] {
        b'"' => {
            i += 1;
            b'"'
        }
        b'[' => {
            i += 1;
            b']'
        }
        _ => b' ',
    };
    let start = i;
    while i < bytes.len() && bytes[i] != closer {
        i += 1;
    }
    let token = &line[start..i];
    // 닫는 문자 소비
    if i < bytes.len() {
        i += 1;
    }
    *offset = i;

    Some(if token == "-" { "" } else { token })
}

impl ApacheDecoder {
    const FORMAT: &'static str = "apache";

    pub fn new(names: NameList) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &NameList {
        &self.names
    }

    fn process_line(&self, ctx: &Rc<Context>, line: &str) -> Result<Event, CeeError> {
        let mut event = Event::new(ctx);
        let mut offset = 0;
        for name in self.names.iter() {
            let Some(token) = next_token(line, &mut offset) else {
                break;
            };
            event.add_string_field(name, token)?;
        }
        Ok(event)
    }
}

impl Decoder for ApacheDecoder {
    fn format_name(&self) -> &str {
        Self::FORMAT
    }

    fn decode(
        &mut self,
        ctx: &Rc<Context>,
        source: &mut dyn LineSource,
        sink: &mut dyn EventSink,
    ) -> Result<usize, CeeError> {
        let mut progress = Progress::new(Self::FORMAT);
        while let Some(line) = progress.next_line(source)? {
            let event = self
                .process_line(ctx, &line)
                .map_err(|e| progress.fail(e))?;
            progress
                .deliver(sink, event)
                .map_err(|e| progress.fail(e))?;
        }
        Ok(progress.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::IterSource;

    fn decode(names: &str, lines: &[&str]) -> Vec<Event> {
        let ctx = Context::new();
        let mut events = Vec::new();
        let mut sink = |event: Event| -> Result<(), CeeError> {
            events.push(event);
            Ok(())
        };
        let mut decoder = ApacheDecoder::new(NameList::parse(names).unwrap());
        let mut source = IterSource::new(lines.iter().copied());
        decoder.decode(&ctx, &mut source, &mut sink).unwrap();
        events
    }

    fn value<'a>(event: &'a Event, name: &str) -> &'a str {
        event.field(name).unwrap().value(0).unwrap().as_str().unwrap()
    }

    #[test]
    fn dash_becomes_empty() {
        let events = decode("host,ident,user", &["127.0.0.1 - frank"]);
        assert_eq!(events.len(), 1);
        assert_eq!(value(&events[0], "host"), "127.0.0.1");
        assert_eq!(value(&events[0], "ident"), "");
        assert_eq!(value(&events[0], "user"), "frank");
    }

    #[test]
    fn quoted_and_bracketed_tokens() {
        let events = decode(
            "host ident user date request status",
            &[r#"10.0.0.1 - - [10/Oct/2000:13:55:36 -0700] "GET /a b HTTP/1.0" 200"#],
        );
        let event = &events[0];
        assert_eq!(value(event, "date"), "10/Oct/2000:13:55:36 -0700");
        assert_eq!(value(event, "request"), "GET /a b HTTP/1.0");
        assert_eq!(value(event, "status"), "200");
    }

    #[test]
    fn extra_tokens_are_ignored() {
        let events = decode("a", &["one two three"]);
        assert_eq!(events[0].fields().unwrap().len(), 1);
        assert_eq!(value(&events[0], "a"), "one");
    }

    #[test]
    fn missing_tokens_leave_fields_unset() {
        let events = decode("a,b,c", &["one   "]);
        assert_eq!(value(&events[0], "a"), "one");
        assert!(events[0].field("b").is_none());
        assert!(events[0].field("c").is_none());
    }

    #[test]
    fn every_line_is_an_event() {
        let events = decode("a", &["x", "", "y"]);
        assert_eq!(events.len(), 3);
        assert!(events[1].fields().is_none());
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let events = decode("a,b", &[r#""open quote"#]);
        assert_eq!(value(&events[0], "a"), "open quote");
        assert!(events[0].field("b").is_none());
    }

    #[test]
    fn next_token_consumes_closer() {
        let line = r#""a b"c"#;
        let mut offset = 0;
        assert_eq!(next_token(line, &mut offset), Some("a b"));
        assert_eq!(offset, 5);
        assert_eq!(next_token(line, &mut offset), Some("c"));
        assert_eq!(next_token(line, &mut offset), None);
    }
}
