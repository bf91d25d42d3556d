//! ceelog-core -- CEE 스타일 이벤트 모델
//!
//! 정규화된 로그 이벤트를 이름 있는 다중 값 필드와 분류 태그의 모음으로 표현합니다.
//!
//! - [`Value`] → [`Field`] → [`FieldBucket`]
//! - [`TagBucket`] (여러 이벤트가 공유하는 참조 카운트 태그 목록)
//! - [`Event`] = 태그 버킷 + 필드 버킷
//! - [`Context`] = 설정 플래그, 용량 힌트, 디버그 콜백
//!
//! 인코더와 디코더는 `ceelog-codec` 크레이트에 있고, 이 크레이트는 그 확장 포인트
//! ([`Encoder`], [`Decoder`], [`LineSource`], [`EventSink`])만 정의합니다.
//!
//! 모든 모델 타입은 `Rc` 기반이라 스레드 간에 이동할 수 없습니다.

pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod field;
pub mod field_bucket;
pub mod metrics;
pub mod primitive;
pub mod tag_bucket;
pub mod value;

// --- 주요 타입 re-export ---

// 에러
pub use error::{CeeError, ConfigError};

// 설정
pub use config::CeeConfig;

// 모델
pub use context::{ComplianceLevel, Context, ContextFlags};
pub use event::{EVENT_TAGS_FIELD, Event};
pub use field::{Field, MAX_VALUES_PER_FIELD};
pub use field_bucket::FieldBucket;
pub use tag_bucket::{TagBucket, TagCursor};
pub use value::{Timestamp, Value};

// 코덱 trait
pub use codec::{Decoder, Encoder, EventSink, LineSource};

// 프리미티브 파서
pub use primitive::{PrimitiveType, parse_first};

/// 라이브러리 버전 문자열
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
