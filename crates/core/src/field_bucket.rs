//! 필드 버킷 -- 이벤트의 필드를 삽입 순서대로 보관
//!
//! 이름 중복은 검사하지 않으며, 조회는 같은 이름의 첫 번째 필드를 반환합니다.

use std::slice;

use crate::context::Context;
use crate::error::CeeError;
use crate::field::Field;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldBucket {
    fields: Vec<Field>,
}

impl FieldBucket {
    /// 컨텍스트의 용량 힌트로 빈 버킷을 생성합니다.
    pub fn new(ctx: &Context) -> Self {
        Self::with_capacity(ctx.field_bucket_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// 필드를 맨 뒤에 추가하고 소유권을 가져갑니다.
    pub fn add_field(&mut self, field: Field) -> Result<(), CeeError> {
        self.fields
            .try_reserve(1)
            .map_err(|_| CeeError::OutOfMemory)?;
        self.fields.push(field);
        Ok(())
    }

    /// 이름이 정확히 일치하는 첫 번째 필드
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == Some(name))
    }

    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name() == Some(name))
    }

    pub fn iter(&self) -> slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// 이름 있는 필드의 이름을 순서대로 순회합니다.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(Field::name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldBucket {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
