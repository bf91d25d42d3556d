//! 코덱 trait -- 이벤트와 텍스트 형식 사이의 확장 포인트
//!
//! 디코더는 [`LineSource`]에서 라인을 당겨 와 [`Event`]를 만들고 [`EventSink`]로
//! 하나씩 넘깁니다. 인코더는 완성된 이벤트 하나를 문자열 하나로 바꿉니다.

use std::rc::Rc;

use crate::context::Context;
use crate::error::CeeError;
use crate::event::Event;

/// 라인 단위 입력
///
/// 입력의 끝은 `Ok(None)`으로, 읽기 실패는 `Err`로 구분합니다.
pub trait LineSource {
    fn next_line(&mut self) -> Result<Option<String>, CeeError>;
}

/// 완성된 이벤트를 받는 쪽
///
/// `Err`를 반환하면 디코딩이 중단되고 그 에러가 디코더 호출자에게 전달됩니다.
pub trait EventSink {
    fn deliver(&mut self, event: Event) -> Result<(), CeeError>;
}

impl<F> EventSink for F
where
    F: FnMut(Event) -> Result<(), CeeError>,
{
    fn deliver(&mut self, event: Event) -> Result<(), CeeError> {
        self(event)
    }
}

/// 이벤트 인코더 trait
///
/// 새로운 출력 형식을 지원하려면 이 trait을 구현합니다.
pub trait Encoder {
    /// 출력 형식 이름
    fn format_name(&self) -> &str;

    /// 이벤트 하나를 문자열로 인코딩
    fn encode(&self, event: &Event) -> Result<String, CeeError>;
}

/// 이벤트 디코더 trait
///
/// 새로운 입력 형식을 지원하려면 이 trait을 구현합니다.
pub trait Decoder {
    /// 입력 형식 이름
    fn format_name(&self) -> &str;

    /// 입력이 끝날 때까지 라인을 읽어 이벤트를 전달합니다.
    ///
    /// 전달한 이벤트 수를 반환합니다. 첫 에러에서 중단하며, 형식 에러에는
    /// 1부터 시작하는 라인 번호가 붙습니다 ([`CeeError::Decode`]).
    fn decode(
        &mut self,
        ctx: &Rc<Context>,
        source: &mut dyn LineSource,
        sink: &mut dyn EventSink,
    ) -> Result<usize, CeeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Encoder for Upper {
        fn format_name(&self) -> &str {
            "upper"
        }

        fn encode(&self, event: &Event) -> Result<String, CeeError> {
            let mut out = String::new();
            event.field_as_string("msg", &mut out)?;
            Ok(out.to_uppercase())
        }
    }

    struct OnePerLine;

    impl Decoder for OnePerLine {
        fn format_name(&self) -> &str {
            "one-per-line"
        }

        fn decode(
            &mut self,
            ctx: &Rc<Context>,
            source: &mut dyn LineSource,
            sink: &mut dyn EventSink,
        ) -> Result<usize, CeeError> {
            let mut count = 0;
            while let Some(line) = source.next_line()? {
                let mut event = Event::new(ctx);
                event.add_string_field("msg", line)?;
                sink.deliver(event)?;
                count += 1;
            }
            Ok(count)
        }
    }

    struct Lines(std::vec::IntoIter<String>);

    impl LineSource for Lines {
        fn next_line(&mut self) -> Result<Option<String>, CeeError> {
            Ok(self.0.next())
        }
    }

    #[test]
    fn closure_is_an_event_sink() {
        let ctx = Context::new();
        let mut source = Lines(vec!["a".to_owned(), "b".to_owned()].into_iter());
        let mut seen = Vec::new();
        let mut sink = |event: Event| -> Result<(), CeeError> {
            seen.push(Upper.encode(&event)?);
            Ok(())
        };

        let count = OnePerLine.decode(&ctx, &mut source, &mut sink).unwrap();
        assert_eq!(count, 2);
        assert_eq!(seen, vec!["A", "B"]);
    }

    #[test]
    fn sink_error_aborts_decoding() {
        let ctx = Context::new();
        let mut source = Lines(vec!["a".to_owned(), "b".to_owned()].into_iter());
        let mut calls = 0;
        let mut sink = |_event: Event| -> Result<(), CeeError> {
            calls += 1;
            Err(CeeError::Generic("sink full".to_owned()))
        };

        let err = OnePerLine.decode(&ctx, &mut source, &mut sink).unwrap_err();
        assert!(err.to_string().contains("sink full"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn trait_objects_expose_format_name() {
        let encoders: Vec<Box<dyn Encoder>> = vec![Box::new(Upper)];
        assert_eq!(encoders[0].format_name(), "upper");
        let decoder: Box<dyn Decoder> = Box::new(OnePerLine);
        assert_eq!(decoder.format_name(), "one-per-line");
    }
}
