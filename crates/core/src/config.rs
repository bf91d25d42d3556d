//! 설정 관리 -- ceelog.toml 파싱 및 런타임 설정
//!
//! [`CeeConfig`]는 로깅, 컨텍스트, 코덱 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`CEELOG_CODEC_ENCODER=json` 형식)
//! 3. 설정 파일 (`ceelog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # fn example() -> Result<(), ceelog_core::error::CeeError> {
//! use ceelog_core::config::CeeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = CeeConfig::load("ceelog.toml")?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = CeeConfig::parse("[codec]\nencoder = \"json\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::context::{ComplianceLevel, DEFAULT_FIELD_BUCKET_SIZE, DEFAULT_TAG_BUCKET_SIZE};
use crate::error::{CeeError, ConfigError};

/// 지원하는 디코더 이름
pub const DECODERS: [&str; 3] = ["int", "apache", "json"];

/// 지원하는 인코더 이름 (`all`은 syslog, json, xml을 모두 출력)
pub const ENCODERS: [&str; 5] = ["syslog", "json", "xml", "csv", "all"];

/// ceelog 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CeeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 컨텍스트 설정
    #[serde(default)]
    pub context: ContextConfig,
    /// 코덱 설정
    #[serde(default)]
    pub codec: CodecConfig,
}

impl CeeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CeeError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CeeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CeeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                CeeError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, CeeError> {
        toml::from_str(toml_str).map_err(|e| {
            CeeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `CEELOG_{SECTION}_{FIELD}`
    /// 예: `CEELOG_CONTEXT_ULTRA_COMPACT=true`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "CEELOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "CEELOG_GENERAL_LOG_FORMAT");

        // Context
        override_compliance(
            &mut self.context.compliance_level,
            "CEELOG_CONTEXT_COMPLIANCE_LEVEL",
        );
        override_bool(
            &mut self.context.ultra_compact,
            "CEELOG_CONTEXT_ULTRA_COMPACT",
        );
        override_bool(
            &mut self.context.include_flat_tags,
            "CEELOG_CONTEXT_INCLUDE_FLAT_TAGS",
        );
        override_usize(
            &mut self.context.field_bucket_size,
            "CEELOG_CONTEXT_FIELD_BUCKET_SIZE",
        );
        override_usize(
            &mut self.context.tag_bucket_size,
            "CEELOG_CONTEXT_TAG_BUCKET_SIZE",
        );

        // Codec
        override_string(&mut self.codec.decoder, "CEELOG_CODEC_DECODER");
        override_string(&mut self.codec.encoder, "CEELOG_CODEC_ENCODER");
        override_opt_string(&mut self.codec.decoder_format, "CEELOG_CODEC_DECODER_FORMAT");
        override_opt_string(&mut self.codec.encoder_format, "CEELOG_CODEC_ENCODER_FORMAT");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), CeeError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.context.field_bucket_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "context.field_bucket_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        if self.context.tag_bucket_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "context.tag_bucket_size".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        if !DECODERS.contains(&self.codec.decoder.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "codec.decoder".to_owned(),
                reason: format!("must be one of: {}", DECODERS.join(", ")),
            }
            .into());
        }

        if !ENCODERS.contains(&self.codec.encoder.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "codec.encoder".to_owned(),
                reason: format!("must be one of: {}", ENCODERS.join(", ")),
            }
            .into());
        }

        // 이름 목록이 필요한 코덱
        if self.codec.decoder == "apache" && self.codec.decoder_format.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "codec.decoder_format".to_owned(),
                reason: "apache decoder needs a field name list".to_owned(),
            }
            .into());
        }

        if self.codec.encoder == "csv" && self.codec.encoder_format.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "codec.encoder_format".to_owned(),
                reason: "csv encoder needs a field name list".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 컨텍스트 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// 스키마 준수 수준 (none, full)
    pub compliance_level: ComplianceLevel,
    /// ultra-compact 인코딩
    pub ultra_compact: bool,
    /// 인코딩 시 `event.tags` 항목 포함
    pub include_flat_tags: bool,
    /// 필드 버킷 초기 용량
    pub field_bucket_size: usize,
    /// 태그 버킷 초기 용량
    pub tag_bucket_size: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            compliance_level: ComplianceLevel::None,
            ultra_compact: false,
            include_flat_tags: false,
            field_bucket_size: DEFAULT_FIELD_BUCKET_SIZE,
            tag_bucket_size: DEFAULT_TAG_BUCKET_SIZE,
        }
    }
}

/// 코덱 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// 디코더 (int, apache, json)
    pub decoder: String,
    /// 인코더 (syslog, json, xml, csv, all)
    pub encoder: String,
    /// 디코더용 필드 이름 목록 (apache)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoder_format: Option<String>,
    /// 인코더용 필드 이름 목록 (csv)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoder_format: Option<String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            decoder: "int".to_owned(),
            encoder: "syslog".to_owned(),
            decoder_format: None,
            encoder_format: None,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = if val.is_empty() { None } else { Some(val) };
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

fn override_compliance(target: &mut ComplianceLevel, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.as_str() {
            "none" => *target = ComplianceLevel::None,
            "full" => *target = ComplianceLevel::Full,
            _ => warn!(
                env_key,
                value = val.as_str(),
                "unknown compliance level in env var, ignoring"
            ),
        }
    }
}
