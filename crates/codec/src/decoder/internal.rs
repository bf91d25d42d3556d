//! 내부 형식 디코더
//!
//! 한 줄이 `<type>:<value>` 하나입니다.
//!
//! | type | 의미 |
//! |------|------|
//! | `#` | 주석, 무시 |
//! | `e` | 새 이벤트 시작 (열린 이벤트는 전달) |
//! | `f` | 새 필드 시작, 값은 필드 이름 |
//! | `v` | 현재 필드에 문자열 값 추가 |
//!
//! 입력이 끝나면 열린 필드를 닫고 열린 이벤트를 전달합니다.

use std::rc::Rc;

use ceelog_core::codec::{Decoder, EventSink, LineSource};
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::event::Event;
use ceelog_core::field::Field;

use super::Progress;

/// 라인 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Comment,
    Event,
    Field,
    Value,
}

/// `<type>:<value>` 한 줄을 종류와 값으로 나눕니다.
fn split_line(line: &str) -> Result<(LineKind, &str), CeeError> {
    let bytes = line.as_bytes();
    if bytes.len() < 2 {
        return Err(CeeError::InvalidFormat(format!(
            "line too short ({} bytes)",
            bytes.len()
        )));
    }
    let kind = match bytes[0] {
        b'#' => LineKind::Comment,
        b'e' => LineKind::Event,
        b'f' => LineKind::Field,
        b'v' => LineKind::Value,
        other => {
            return Err(CeeError::InvalidFormat(format!(
                "unknown line type '{}'",
                other.escape_ascii()
            )));
        }
    };
    if bytes[1] != b':' {
        return Err(CeeError::InvalidFormat(
            "expected ':' after line type".to_owned(),
        ));
    }
    Ok((kind, &line[2..]))
}

/// 디코더 상태
enum State {
    NoEvent,
    InEvent(Event),
    InField(Event, Field),
}

impl State {
    /// 열린 필드가 있으면 이벤트에 추가하고 이벤트를 꺼냅니다.
    fn into_event(self) -> Result<Option<Event>, CeeError> {
        match self {
            Self::NoEvent => Ok(None),
            Self::InEvent(event) => Ok(Some(event)),
            Self::InField(mut event, field) => {
                event.add_field(field)?;
                Ok(Some(event))
            }
        }
    }
}

/// 내부 형식 디코더
#[derive(Debug, Clone, Copy, Default)]
pub struct InternalDecoder;

impl InternalDecoder {
    const FORMAT: &'static str = "int";

    pub fn new() -> Self {
        Self
    }

    fn process(
        ctx: &Rc<Context>,
        state: State,
        kind: LineKind,
        value: &str,
        progress: &mut Progress,
        sink: &mut dyn EventSink,
    ) -> Result<State, CeeError> {
        match (kind, state) {
            (LineKind::Comment, state) => Ok(state),
            (LineKind::Event, state) => {
                if let Some(event) = state.into_event()? {
                    progress.deliver(sink, event)?;
                }
                Ok(State::InEvent(Event::new(ctx)))
            }
            (LineKind::Field, state) => {
                let event = state.into_event()?.ok_or_else(|| {
                    CeeError::InvalidFormat("field outside of an event".to_owned())
                })?;
                let mut field = Field::new();
                field.set_name(value)?;
                Ok(State::InField(event, field))
            }
            (LineKind::Value, State::InField(event, mut field)) => {
                field.add_string_value(value)?;
                Ok(State::InField(event, field))
            }
            (LineKind::Value, _) => Err(CeeError::InvalidFormat(
                "value outside of a field".to_owned(),
            )),
        }
    }
}

impl Decoder for InternalDecoder {
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
        let mut state = State::NoEvent;

        while let Some(line) = progress.next_line(source)? {
            let (kind, value) = split_line(&line).map_err(|e| progress.fail(e))?;
            ctx.debug(format_args!("int decoder: line {:?} '{}'", kind, value));
            state = Self::process(ctx, state, kind, value, &mut progress, sink)
                .map_err(|e| progress.fail(e))?;
        }

        if let Some(event) = state.into_event().map_err(|e| progress.fail(e))? {
            progress
                .deliver(sink, event)
                .map_err(|e| progress.fail(e))?;
        }
        Ok(progress.finish())
    }
}
