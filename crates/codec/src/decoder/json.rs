//! JSON 디코더
//!
//! 한 줄에 JSON 객체 하나를 받아 이벤트 하나를 만듭니다.
//!
//! - 최상위 키는 필드 이름이 되고, 중첩 객체는 `.`으로 이은 이름으로 평탄화합니다.
//! - 문자열은 그대로, 숫자는 숫자 텍스트, 불리언은 `true`/`false`, `null`은 `-`입니다.
//! - 배열은 값이 여럿인 필드 하나가 됩니다. 스칼라가 아닌 항목은 압축 JSON 텍스트로 넣습니다.
//! - 최상위 `event.tags` 배열은 이벤트 태그가 됩니다.

use std::rc::Rc;

use ceelog_core::codec::{Decoder, EventSink, LineSource};
use ceelog_core::context::Context;
use ceelog_core::error::CeeError;
use ceelog_core::event::{EVENT_TAGS_FIELD, Event};
use ceelog_core::field::Field;
use serde_json::Value as JsonValue;

use super::Progress;
use crate::error::CodecError;

/// JSON 디코더
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

/// JSON 값 하나를 필드 값 문자열로 바꿉니다.
fn scalar_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => "-".to_owned(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl JsonDecoder {
    const FORMAT: &'static str = "json";

    pub fn new() -> Self {
        Self
    }

    /// JSON 한 줄을 이벤트로 변환합니다.
    pub fn parse_event(ctx: &Rc<Context>, line: &str) -> Result<Event, CeeError> {
        let value: JsonValue = serde_json::from_str(line).map_err(CodecError::from)?;
        let JsonValue::Object(map) = value else {
            return Err(CeeError::InvalidFormat(
                "expected JSON object at top level".to_owned(),
            ));
        };

        let mut event = Event::new(ctx);
        for (key, val) in &map {
            if key == EVENT_TAGS_FIELD {
                // 필드로 두면 태그 의사 필드에 가려지므로 배열만 허용
                let JsonValue::Array(tags) = val else {
                    return Err(CeeError::InvalidFormat(format!(
                        "'{EVENT_TAGS_FIELD}' must be an array"
                    )));
                };
                for tag in tags {
                    event.add_tag(&scalar_text(tag))?;
                }
                continue;
            }
            Self::add_value(&mut event, key, val)?;
        }
        Ok(event)
    }

    fn add_value(event: &mut Event, name: &str, value: &JsonValue) -> Result<(), CeeError> {
        match value {
            JsonValue::Object(map) => {
                for (key, val) in map {
                    Self::add_value(event, &format!("{name}.{key}"), val)?;
                }
                Ok(())
            }
            JsonValue::Array(items) => {
                let mut field = Field::new();
                field.set_name(name)?;
                for item in items {
                    field.add_string_value(scalar_text(item))?;
                }
                event.add_field(field)
            }
            scalar => event.add_string_field(name, scalar_text(scalar)),
        }
    }
}

impl Decoder for JsonDecoder {
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
            let event = Self::parse_event(ctx, &line).map_err(|e| progress.fail(e))?;
            progress
                .deliver(sink, event)
                .map_err(|e| progress.fail(e))?;
        }
        Ok(progress.finish())
    }
}
