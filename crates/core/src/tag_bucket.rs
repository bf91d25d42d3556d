//! 태그 버킷 -- 여러 이벤트가 공유하는 태그 이름 목록
//!
//! [`TagBucket`]은 참조 카운트 핸들입니다. [`TagBucket::add_ref`]로 참조를 늘리고
//! 핸들을 drop하면 참조가 하나 줄어듭니다. 마지막 핸들이 drop되면 태그 목록이 해제됩니다.
//!
//! 태그는 중복을 허용하며 추가된 순서를 유지합니다.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::context::Context;
use crate::error::CeeError;

#[derive(Debug)]
struct Inner {
    ctx: Rc<Context>,
    tags: RefCell<Vec<String>>,
}

/// 공유 태그 목록 핸들
#[derive(Debug)]
pub struct TagBucket {
    inner: Rc<Inner>,
}

/// [`TagBucket::next_tag`]용 외부 커서
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagCursor(usize);

impl TagBucket {
    /// 참조 카운트 1인 빈 버킷을 생성합니다.
    pub fn new(ctx: &Rc<Context>) -> Self {
        Self {
            inner: Rc::new(Inner {
                ctx: Rc::clone(ctx),
                tags: RefCell::new(Vec::with_capacity(ctx.tag_bucket_size())),
            }),
        }
    }

    /// 같은 버킷을 가리키는 새 핸들을 반환합니다. 참조 카운트가 1 증가합니다.
    pub fn add_ref(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }

    /// 현재 참조 카운트
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// 두 핸들이 같은 버킷을 가리키는지 확인합니다.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// 버킷이 속한 컨텍스트
    pub fn context(&self) -> &Rc<Context> {
        &self.inner.ctx
    }

    /// 태그 이름을 복사해 맨 뒤에 추가합니다.
    ///
    /// [`iter`](Self::iter)가 돌려준 항목을 들고 있는 동안에는 추가할 수 없습니다.
    pub fn add_tag(&self, name: &str) -> Result<(), CeeError> {
        let mut tags = self.inner.tags.try_borrow_mut().map_err(|_| {
            CeeError::InvalidArgument("tag bucket is borrowed by an iterator".to_owned())
        })?;
        tags.try_reserve(1).map_err(|_| CeeError::OutOfMemory)?;
        tags.push(name.to_owned());
        Ok(())
    }

    /// 이름이 정확히 일치하는 태그가 있는지 확인합니다.
    pub fn has_tag(&self, name: &str) -> bool {
        self.inner.tags.borrow().iter().any(|t| t == name)
    }

    pub fn len(&self) -> usize {
        self.inner.tags.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.tags.borrow().is_empty()
    }

    /// 커서 방식으로 다음 태그를 가져옵니다.
    ///
    /// `cursor`가 `None`이면 처음부터 시작합니다. 태그를 모두 돌면 `None`을
    /// 반환하고 `cursor`도 `None`으로 돌려 놓습니다.
    pub fn next_tag(&self, cursor: &mut Option<TagCursor>) -> Option<String> {
        let pos = cursor.map_or(0, |c| c.0);
        let tags = self.inner.tags.borrow();
        match tags.get(pos) {
            Some(tag) => {
                *cursor = Some(TagCursor(pos + 1));
                Some(tag.clone())
            }
            None => {
                *cursor = None;
                None
            }
        }
    }

    /// 태그를 순서대로 빌려 오는 반복자
    pub fn iter(&self) -> Tags<'_> {
        Tags {
            tags: &self.inner.tags,
            pos: 0,
        }
    }

    /// 태그 이름을 `sep`으로 이어 붙입니다.
    pub fn join(&self, sep: &str) -> String {
        self.inner.tags.borrow().join(sep)
    }
}

/// [`TagBucket::iter`] 반복자
pub struct Tags<'a> {
    tags: &'a RefCell<Vec<String>>,
    pos: usize,
}

impl<'a> Iterator for Tags<'a> {
    type Item = Ref<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let pos = self.pos;
        let tag = Ref::filter_map(self.tags.borrow(), |tags| {
            tags.get(pos).map(String::as_str)
        })
        .ok()?;
        self.pos += 1;
        Some(tag)
    }
}
