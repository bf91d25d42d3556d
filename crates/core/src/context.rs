//! 컨텍스트 -- 라이브러리 인스턴스 단위의 설정과 디버그 출력
//!
//! 모든 이벤트, 태그 버킷, 필드 버킷은 하나의 [`Context`]에 속합니다.
//! 컨텍스트는 `Rc<Context>`로 공유되며, 서로 다른 컨텍스트에서 만든 객체를
//! 섞으면 [`CeeError::InvalidArgument`](crate::error::CeeError::InvalidArgument)가 반환됩니다.
//!
//! `Rc` 기반이므로 컨텍스트와 그에 속한 객체는 스레드 간에 이동할 수 없습니다.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::ContextConfig;

/// 태그 버킷 초기 용량 기본값
pub const DEFAULT_TAG_BUCKET_SIZE: usize = 5;

/// 필드 버킷 초기 용량 기본값
pub const DEFAULT_FIELD_BUCKET_SIZE: usize = 11;

/// 스키마 준수 수준
///
/// 저장만 되고 아직 어떤 동작에도 영향을 주지 않습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceLevel {
    /// 검증하지 않음
    #[default]
    None,
    /// 완전 준수
    Full,
}

impl ComplianceLevel {
    /// 설정 파일에서 쓰는 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags! {
    /// 인코더 동작을 바꾸는 컨텍스트 플래그
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct ContextFlags: u16 {
        /// 공백을 최소화하고 값이 없는 필드를 생략
        const ULTRA_COMPACT = 0x01;
        /// 태그를 `event.tags` 항목으로 함께 인코딩
        const INCLUDE_FLAT_TAGS = 0x02;
    }
}

/// 디버그 메시지를 받는 콜백
pub type DebugHandler = Box<dyn Fn(&str)>;

/// 라이브러리 컨텍스트
pub struct Context {
    compliance_level: ComplianceLevel,
    flags: Cell<ContextFlags>,
    field_bucket_size: usize,
    tag_bucket_size: usize,
    debug_handler: RefCell<Option<DebugHandler>>,
}

impl Context {
    /// 기본값으로 새 컨텍스트를 생성합니다.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::with_defaults())
    }

    /// 설정 섹션으로부터 컨텍스트를 생성합니다.
    pub fn from_config(config: &ContextConfig) -> Rc<Self> {
        let mut flags = ContextFlags::empty();
        flags.set(ContextFlags::ULTRA_COMPACT, config.ultra_compact);
        flags.set(ContextFlags::INCLUDE_FLAT_TAGS, config.include_flat_tags);

        Rc::new(Self {
            compliance_level: config.compliance_level,
            flags: Cell::new(flags),
            field_bucket_size: config.field_bucket_size,
            tag_bucket_size: config.tag_bucket_size,
            debug_handler: RefCell::new(None),
        })
    }

    fn with_defaults() -> Self {
        Self {
            compliance_level: ComplianceLevel::None,
            flags: Cell::new(ContextFlags::empty()),
            field_bucket_size: DEFAULT_FIELD_BUCKET_SIZE,
            tag_bucket_size: DEFAULT_TAG_BUCKET_SIZE,
            debug_handler: RefCell::new(None),
        }
    }

    /// 두 핸들이 같은 컨텍스트를 가리키는지 확인합니다.
    pub fn same(a: &Rc<Self>, b: &Rc<Self>) -> bool {
        Rc::ptr_eq(a, b)
    }

    pub fn compliance_level(&self) -> ComplianceLevel {
        self.compliance_level
    }

    pub fn flags(&self) -> ContextFlags {
        self.flags.get()
    }

    /// 플래그 전체를 교체합니다.
    pub fn set_flags(&self, flags: ContextFlags) {
        self.flags.set(flags);
    }

    /// ultra-compact 인코딩을 켭니다. 다른 플래그는 유지됩니다.
    pub fn set_ultra_compact(&self) {
        self.flags.set(self.flags.get() | ContextFlags::ULTRA_COMPACT);
    }

    pub fn is_ultra_compact(&self) -> bool {
        self.flags.get().contains(ContextFlags::ULTRA_COMPACT)
    }

    pub fn includes_flat_tags(&self) -> bool {
        self.flags.get().contains(ContextFlags::INCLUDE_FLAT_TAGS)
    }

    /// 새 필드 버킷의 초기 용량
    pub fn field_bucket_size(&self) -> usize {
        self.field_bucket_size
    }

    /// 새 태그 버킷의 초기 용량
    pub fn tag_bucket_size(&self) -> usize {
        self.tag_bucket_size
    }

    /// 디버그 콜백을 등록합니다. 이전 콜백은 교체됩니다.
    pub fn set_debug_handler(&self, handler: impl Fn(&str) + 'static) {
        *self.debug_handler.borrow_mut() = Some(Box::new(handler));
    }

    /// 디버그 콜백을 해제합니다.
    pub fn clear_debug_handler(&self) {
        *self.debug_handler.borrow_mut() = None;
    }

    /// 디버그 메시지를 내보냅니다.
    ///
    /// `tracing::debug!`로 항상 기록하고, 콜백이 등록되어 있으면 콜백에도 전달합니다.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(target: "ceelog", "{}", args);
        if let Ok(handler) = self.debug_handler.try_borrow() {
            if let Some(handler) = handler.as_ref() {
                handler(&args.to_string());
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("compliance_level", &self.compliance_level)
            .field("flags", &self.flags.get())
            .field("field_bucket_size", &self.field_bucket_size)
            .field("tag_bucket_size", &self.tag_bucket_size)
            .field("debug_handler", &self.debug_handler.borrow().is_some())
            .finish()
    }
}
