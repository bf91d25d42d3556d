//! 필드 이름 목록 -- Apache 디코더와 CSV 인코더의 열 순서
//!
//! 이름은 `,` 또는 공백으로 구분합니다. 구분자 하나가 이름 하나를 끝내므로
//! `"a, b"`처럼 구분자가 연달아 오면 빈 이름이 생겨 에러가 됩니다.
//! 맨 끝의 구분자 하나는 허용합니다.

use std::fmt;
use std::str::FromStr;

use crate::error::CodecError;

/// 순서 있는 필드 이름 목록
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameList {
    names: Vec<String>,
}

impl NameList {
    /// 쉼표/공백 구분 문자열을 파싱합니다.
    pub fn parse(list: &str) -> Result<Self, CodecError> {
        let bytes = list.as_bytes();
        let mut names = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            let start = i;
            while i < bytes.len() && bytes[i] != b',' && bytes[i] != b' ' {
                i += 1;
            }
            if i == start {
                return Err(CodecError::NameList {
                    list: list.to_owned(),
                    reason: format!("empty name at offset {start}"),
                });
            }
            names.push(list[start..i].to_owned());
            // 구분자 하나를 건너뜀
            if i < bytes.len() {
                i += 1;
            }
        }
        Ok(Self { names })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromStr for NameList {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(","))
    }
}
