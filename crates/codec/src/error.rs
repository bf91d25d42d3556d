//! 코덱 에러 타입
//!
//! [`CodecError`]는 코덱 구성 단계(이름 목록, 코덱 선택, 입력 열기)의 에러를 표현합니다.
//! `From<CodecError> for CeeError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use ceelog_core::error::CeeError;

/// 코덱 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// 필드 이름 목록 형식 오류
    #[error("invalid name list '{list}': {reason}")]
    NameList {
        /// 원본 목록 문자열
        list: String,
        /// 실패 사유
        reason: String,
    },

    /// 지원하지 않는 코덱 이름
    #[error("unsupported {kind}: {name}")]
    Unsupported {
        /// encoder 또는 decoder
        kind: &'static str,
        /// 요청한 이름
        name: String,
    },

    /// 코덱에 필요한 설정이 없음
    #[error("{codec} requires {what}")]
    MissingOption {
        /// 코덱 이름
        codec: &'static str,
        /// 필요한 설정
        what: &'static str,
    },

    /// JSON 파싱 실패
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CodecError> for CeeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Json(e) => CeeError::InvalidFormat(e.to_string()),
            CodecError::Io(e) => CeeError::Io(e),
            other => CeeError::InvalidArgument(other.to_string()),
        }
    }
}
