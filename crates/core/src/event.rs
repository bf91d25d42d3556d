//! 이벤트 -- 태그 버킷과 필드 버킷으로 이루어진 정규화된 로그 이벤트
//!
//! 두 버킷은 처음 필요해질 때 생성됩니다. 태그 버킷은 다른 이벤트와
//! 공유될 수 있고, 필드 버킷은 이벤트가 단독으로 소유합니다.

use std::rc::Rc;

use crate::context::Context;
use crate::error::CeeError;
use crate::field::Field;
use crate::field_bucket::FieldBucket;
use crate::tag_bucket::TagBucket;

/// 태그 목록을 필드처럼 조회할 때 쓰는 가상 필드 이름
pub const EVENT_TAGS_FIELD: &str = "event.tags";

/// 정규화된 이벤트
#[derive(Debug)]
pub struct Event {
    ctx: Rc<Context>,
    tags: Option<TagBucket>,
    fields: Option<FieldBucket>,
}

impl Event {
    /// 태그도 필드도 없는 이벤트를 생성합니다.
    pub fn new(ctx: &Rc<Context>) -> Self {
        Self {
            ctx: Rc::clone(ctx),
            tags: None,
            fields: None,
        }
    }

    pub fn context(&self) -> &Rc<Context> {
        &self.ctx
    }

    /// 태그 버킷을 교체합니다.
    ///
    /// 기존 버킷의 참조는 정확히 한 번 해제되고, 이벤트는 전달받은 핸들을 소유합니다.
    /// 다른 컨텍스트의 버킷이면 [`CeeError::InvalidArgument`]를 반환하고 이벤트는 그대로입니다.
    pub fn assign_tagbucket(&mut self, bucket: TagBucket) -> Result<(), CeeError> {
        if !Context::same(&self.ctx, bucket.context()) {
            return Err(CeeError::InvalidArgument(
                "tag bucket belongs to a different context".to_owned(),
            ));
        }
        self.tags = Some(bucket);
        Ok(())
    }

    /// 태그를 추가합니다. 태그 버킷이 없으면 새로 만듭니다.
    ///
    /// 공유 중인 버킷이면 같은 버킷을 가진 다른 이벤트에도 보입니다.
    pub fn add_tag(&mut self, name: &str) -> Result<(), CeeError> {
        let ctx = &self.ctx;
        self.tags
            .get_or_insert_with(|| TagBucket::new(ctx))
            .add_tag(name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.as_ref().is_some_and(|t| t.has_tag(name))
    }

    pub fn tagbucket(&self) -> Option<&TagBucket> {
        self.tags.as_ref()
    }

    /// 필드를 추가하고 소유권을 가져갑니다. 필드 버킷이 없으면 새로 만듭니다.
    pub fn add_field(&mut self, field: Field) -> Result<(), CeeError> {
        let ctx = &self.ctx;
        self.fields
            .get_or_insert_with(|| FieldBucket::new(ctx))
            .add_field(field)
    }

    /// 이름과 문자열 값 하나로 필드를 만들어 추가합니다.
    ///
    /// 실패하면 이벤트는 바뀌지 않습니다.
    pub fn add_string_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), CeeError> {
        let field = Field::with_name_value(name, value.into())?;
        self.add_field(field)
    }

    /// 이름이 정확히 일치하는 첫 번째 필드
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.as_ref()?.get_field(name)
    }

    pub fn fields(&self) -> Option<&FieldBucket> {
        self.fields.as_ref()
    }

    /// 필드 값을 문자열로 `acc`에 이어 붙입니다.
    ///
    /// 이름이 [`EVENT_TAGS_FIELD`]이면 태그 이름을 `,`로 이어 붙입니다.
    /// 여러 값은 구분자 없이 연결됩니다.
    pub fn field_as_string(&self, name: &str, acc: &mut String) -> Result<(), CeeError> {
        if name == EVENT_TAGS_FIELD {
            return match &self.tags {
                Some(tags) => {
                    acc.push_str(&tags.join(","));
                    Ok(())
                }
                None => Err(CeeError::NotFound(format!("field '{name}'"))),
            };
        }

        let field = self
            .field(name)
            .ok_or_else(|| CeeError::NotFound(format!("field '{name}'")))?;
        field.append_to(acc);
        Ok(())
    }
}
