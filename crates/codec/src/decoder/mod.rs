//! 디코더 모듈 -- 라인 입력을 이벤트로 변환
//!
//! 모든 디코더는 [`LineSource`]에서 한 줄씩 당겨 와 완성된 이벤트를
//! [`EventSink`]로 넘깁니다. 첫 에러에서 중단하고, 라인 처리 중 발생한
//! 에러에는 형식 이름과 1부터 시작하는 라인 번호를 붙입니다.
//! 입력 자체의 읽기 실패는 라인 번호 없이 그대로 전달합니다.
//!
//! # 지원 형식
//! - `int`: 내부 형식 (`e:`, `f:name`, `v:value`, `#:comment`)
//! - `apache`: 이름 목록 순서의 공백 구분 토큰
//! - `json`: 한 줄에 JSON 객체 하나

pub mod apache;
pub mod internal;
pub mod json;

pub use apache::ApacheDecoder;
pub use internal::InternalDecoder;
pub use json::JsonDecoder;

use std::time::Instant;

use ceelog_core::codec::{Decoder, EventSink, LineSource};
use ceelog_core::error::CeeError;
use ceelog_core::event::Event;
use ceelog_core::metrics as m;
use tracing::{debug, warn};

use crate::error::CodecError;
use crate::name_list::NameList;

/// 이름으로 디코더를 만듭니다.
///
/// `apache`는 `format`에 필드 이름 목록이 필요하고, 나머지 디코더는 `format`을 무시합니다.
pub fn decoder_for(name: &str, format: Option<&str>) -> Result<Box<dyn Decoder>, CodecError> {
    match name {
        "int" => Ok(Box::new(InternalDecoder::new())),
        "json" => Ok(Box::new(JsonDecoder::new())),
        "apache" => {
            let list = format.ok_or(CodecError::MissingOption {
                codec: "apache decoder",
                what: "a field name list",
            })?;
            Ok(Box::new(ApacheDecoder::new(NameList::parse(list)?)))
        }
        other => Err(CodecError::Unsupported {
            kind: "decoder",
            name: other.to_owned(),
        }),
    }
}

/// 디코딩 진행 상황 (라인 번호, 전달한 이벤트 수, 메트릭)
pub(crate) struct Progress {
    format: &'static str,
    line: usize,
    events: usize,
    started: Instant,
}

impl Progress {
    pub(crate) fn new(format: &'static str) -> Self {
        Self {
            format,
            line: 0,
            events: 0,
            started: Instant::now(),
        }
    }

    /// 다음 줄을 읽고 라인 번호를 올립니다.
    pub(crate) fn next_line(
        &mut self,
        source: &mut dyn LineSource,
    ) -> Result<Option<String>, CeeError> {
        let line = source.next_line().inspect_err(|e| self.record_failure(e))?;
        if line.is_some() {
            self.line += 1;
            metrics::counter!(m::CODEC_LINES_READ_TOTAL, m::LABEL_FORMAT => self.format)
                .increment(1);
        }
        Ok(line)
    }

    /// 완성된 이벤트를 전달합니다.
    pub(crate) fn deliver(&mut self, sink: &mut dyn EventSink, event: Event) -> Result<(), CeeError> {
        sink.deliver(event)?;
        self.events += 1;
        metrics::counter!(m::CODEC_EVENTS_DECODED_TOTAL, m::LABEL_FORMAT => self.format)
            .increment(1);
        debug!(format = self.format, line = self.line, events = self.events, "event delivered");
        Ok(())
    }

    /// 현재 줄에서 발생한 에러에 라인 번호를 붙입니다.
    pub(crate) fn fail(&self, err: CeeError) -> CeeError {
        self.record_failure(&err);
        err.at_line(self.format, self.line)
    }

    /// 디코딩을 마치고 전달한 이벤트 수를 반환합니다.
    pub(crate) fn finish(self) -> usize {
        metrics::histogram!(m::CODEC_DECODE_DURATION_SECONDS, m::LABEL_FORMAT => self.format)
            .record(self.started.elapsed().as_secs_f64());
        debug!(format = self.format, lines = self.line, events = self.events, "decoding finished");
        self.events
    }

    fn record_failure(&self, err: &CeeError) {
        metrics::counter!(m::CODEC_DECODE_ERRORS_TOTAL, m::LABEL_FORMAT => self.format)
            .increment(1);
        warn!(format = self.format, line = self.line, error = %err, "decoding aborted");
    }
}
