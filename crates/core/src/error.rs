//! 에러 타입 -- 이벤트 모델과 코덱이 공유하는 에러 분류
//!
//! 모든 에러 kind는 고정된 숫자 코드를 가집니다 ([`CeeError::code`]).
//! 성공은 [`CODE_OK`](0)이고 실패는 음수입니다.

/// 성공을 나타내는 숫자 코드
pub const CODE_OK: i32 = 0;

/// ceelog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum CeeError {
    /// 분류되지 않은 실패
    #[error("generic error: {0}")]
    Generic(String),

    /// 메모리 할당 실패
    #[error("out of memory")]
    OutOfMemory,

    /// 입력의 끝
    #[error("end of input")]
    EndOfInput,

    /// 입력 형식 오류
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// 이미 이름이 있는 필드에 다시 이름을 지정함
    #[error("field already named: '{name}'")]
    FieldAlreadyNamed { name: String },

    /// 필드당 최대 값 개수 초과
    #[error("too many values for field '{field}' (max: {max})")]
    TooManyValues { field: String, max: usize },

    /// 프리미티브 파서가 입력과 맞지 않음
    #[error("wrong parser")]
    WrongParser,

    /// 잘못된 인자
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// 대상을 찾을 수 없음
    #[error("not found: {0}")]
    NotFound(String),

    /// 디코딩 중 특정 라인에서 발생한 에러
    #[error("{format} decoder: error processing line {line}: {source}")]
    Decode {
        format: String,
        line: usize,
        #[source]
        source: Box<CeeError>,
    },

    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CeeError {
    /// 에러 kind의 숫자 코드를 반환합니다.
    ///
    /// `Decode`는 원인 에러의 코드를, `Config`/`Io`는 generic 코드(-1)를 반환합니다.
    pub fn code(&self) -> i32 {
        match self {
            Self::Generic(_) | Self::Config(_) | Self::Io(_) => -1,
            Self::OutOfMemory => -2,
            Self::EndOfInput => -3,
            Self::InvalidFormat(_) => -4,
            Self::FieldAlreadyNamed { .. } => -5,
            Self::TooManyValues { .. } => -6,
            Self::WrongParser => -7,
            Self::InvalidArgument(_) => -8,
            Self::NotFound(_) => -9,
            Self::Decode { source, .. } => source.code(),
        }
    }

    /// 디코딩 에러에 포맷 이름과 1부터 시작하는 라인 번호를 붙입니다.
    pub fn at_line(self, format: impl Into<String>, line: usize) -> Self {
        Self::Decode {
            format: format.into(),
            line,
            source: Box::new(self),
        }
    }
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_the_fixed_table() {
        assert_eq!(CODE_OK, 0);
        assert_eq!(CeeError::Generic("x".to_owned()).code(), -1);
        assert_eq!(CeeError::OutOfMemory.code(), -2);
        assert_eq!(CeeError::EndOfInput.code(), -3);
        assert_eq!(CeeError::InvalidFormat("x".to_owned()).code(), -4);
        assert_eq!(
            CeeError::FieldAlreadyNamed {
                name: "f".to_owned()
            }
            .code(),
            -5
        );
        assert_eq!(
            CeeError::TooManyValues {
                field: "f".to_owned(),
                max: 255
            }
            .code(),
            -6
        );
        assert_eq!(CeeError::WrongParser.code(), -7);
        assert_eq!(CeeError::InvalidArgument("x".to_owned()).code(), -8);
        assert_eq!(CeeError::NotFound("x".to_owned()).code(), -9);
    }

    #[test]
    fn decode_error_keeps_source_code() {
        let err = CeeError::InvalidFormat("missing ':'".to_owned()).at_line("int", 3);
        assert_eq!(err.code(), -4);
        let msg = err.to_string();
        assert!(msg.contains("line 3"), "message was: {msg}");
        assert!(msg.contains("int"), "message was: {msg}");
    }

    #[test]
    fn config_error_converts_to_cee_error() {
        let err: CeeError = ConfigError::FileNotFound {
            path: "/tmp/ceelog.toml".to_owned(),
        }
        .into();
        assert!(matches!(err, CeeError::Config(_)));
        assert_eq!(err.code(), -1);
        assert!(err.to_string().contains("/tmp/ceelog.toml"));
    }

    #[test]
    fn io_error_converts_to_cee_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CeeError = io_err.into();
        assert!(matches!(err, CeeError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = CeeError::TooManyValues {
            field: "src".to_owned(),
            max: 255,
        };
        assert_eq!(err.to_string(), "too many values for field 'src' (max: 255)");
    }
}
