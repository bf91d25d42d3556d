//! ceelog-codec -- 이벤트 인코더와 디코더
//!
//! # 모듈 구성
//!
//! - [`encoder`]: syslog(RFC 5424 structured data), JSON, XML, CSV 인코더
//! - [`decoder`]: 내부 형식, Apache 로그, JSON 디코더
//! - [`escape`]: 형식별 이스케이프 테이블
//! - [`source`]: 라인 입력과 백슬래시 이스케이프 해제
//! - [`name_list`]: Apache/CSV 필드 이름 목록
//! - [`error`]: 도메인 에러 타입
//!
//! # 흐름
//!
//! ```text
//! LineSource -> Decoder -> EventSink(Event) -> Encoder -> String
//! ```

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod name_list;
pub mod source;

// --- 주요 타입 re-export ---

// 에러
pub use error::CodecError;

// 인코더
pub use encoder::{CsvEncoder, JsonEncoder, SyslogEncoder, XmlEncoder, encoder_for};

// 디코더
pub use decoder::{ApacheDecoder, InternalDecoder, JsonDecoder, decoder_for};

// 입력
pub use name_list::NameList;
pub use source::{IterSource, ReaderSource, unescape_line};
