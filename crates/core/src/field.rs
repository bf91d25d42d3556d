//! 필드 -- 이름과 하나 이상의 값
//!
//! 첫 번째 값은 필드 안에 직접 저장되고 두 번째부터는 overflow 목록에
//! 삽입 순서대로 쌓입니다. 필드당 값은 최대 [`MAX_VALUES_PER_FIELD`]개입니다.

use std::borrow::Cow;

use crate::error::CeeError;
use crate::value::Value;

/// 필드 하나가 가질 수 있는 최대 값 개수
pub const MAX_VALUES_PER_FIELD: usize = 255;

/// 이름 있는 다중 값 필드
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    name: Option<String>,
    first: Option<Value>,
    overflow: Vec<Value>,
}

impl Field {
    /// 이름도 값도 없는 필드를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 이름과 문자열 값 하나로 필드를 생성합니다.
    pub fn with_name_value(name: &str, value: impl Into<Value>) -> Result<Self, CeeError> {
        let mut field = Self::new();
        field.set_name(name)?;
        field.add_value(value.into())?;
        Ok(field)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 필드 이름을 지정합니다. 이미 이름이 있으면 실패합니다.
    pub fn set_name(&mut self, name: &str) -> Result<(), CeeError> {
        if let Some(existing) = &self.name {
            return Err(CeeError::FieldAlreadyNamed {
                name: existing.clone(),
            });
        }
        self.name = Some(name.to_owned());
        Ok(())
    }

    /// 값을 추가합니다.
    ///
    /// 최대 개수에 도달한 필드는 [`CeeError::TooManyValues`]를 반환하고 변경되지 않습니다.
    pub fn add_value(&mut self, value: Value) -> Result<(), CeeError> {
        if self.first.is_none() {
            self.first = Some(value);
            return Ok(());
        }
        if self.value_count() >= MAX_VALUES_PER_FIELD {
            return Err(CeeError::TooManyValues {
                field: self.name.clone().unwrap_or_default(),
                max: MAX_VALUES_PER_FIELD,
            });
        }
        self.overflow
            .try_reserve(1)
            .map_err(|_| CeeError::OutOfMemory)?;
        self.overflow.push(value);
        Ok(())
    }

    /// 문자열 값을 추가합니다.
    pub fn add_string_value(&mut self, s: impl Into<String>) -> Result<(), CeeError> {
        self.add_value(Value::String(s.into()))
    }

    pub fn value_count(&self) -> usize {
        match self.first {
            Some(_) => 1 + self.overflow.len(),
            None => 0,
        }
    }

    /// `index`번째 값 (0부터)
    pub fn value(&self, index: usize) -> Option<&Value> {
        match index {
            0 => self.first.as_ref(),
            n => self.overflow.get(n - 1),
        }
    }

    /// `index`번째 값의 문자열 표현
    pub fn value_as_string(&self, index: usize) -> Option<Cow<'_, str>> {
        self.value(index).map(Value::as_string)
    }

    /// 삽입 순서대로 모든 값을 순회합니다.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.first.iter().chain(self.overflow.iter())
    }

    /// 모든 값의 문자열 표현을 구분자 없이 `acc` 뒤에 이어 붙입니다.
    pub fn append_to(&self, acc: &mut String) {
        for value in self.values() {
            acc.push_str(&value.as_string());
        }
    }
}
