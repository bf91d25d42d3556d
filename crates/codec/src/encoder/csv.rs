//! CSV 인코더
//!
//! 이름 목록 순서대로 `"v1","v2",...` 한 줄을 만듭니다. 목록에 없는 필드는
//! 출력하지 않고, 이벤트에 없는 필드는 `""`가 됩니다. 값이 여럿인 필드는
//! 따옴표 안에서 `[a,b]`로 출력합니다.

use ceelog_core::codec::Encoder;
use ceelog_core::error::CeeError;
use ceelog_core::event::Event;
use ceelog_core::field::Field;
use ceelog_core::metrics as m;

use crate::escape::escape_csv;
use crate::name_list::NameList;

/// CSV 인코더
#[derive(Debug, Clone)]
pub struct CsvEncoder {
    names: NameList,
}

impl CsvEncoder {
    const FORMAT: &'static str = "csv";

    pub fn new(names: NameList) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &NameList {
        &self.names
    }
}

fn push_field(field: &Field, out: &mut String) {
    if field.value_count() > 1 {
        out.push('[');
        for (i, value) in field.values().enumerate() {
            if i > 0 {
                out.push(',');
            }
            escape_csv(&value.as_string(), out);
        }
        out.push(']');
    } else {
        for value in field.values() {
            escape_csv(&value.as_string(), out);
        }
    }
}

impl Encoder for CsvEncoder {
    fn format_name(&self) -> &str {
        Self::FORMAT
    }

    fn encode(&self, event: &Event) -> Result<String, CeeError> {
        let mut out = String::with_capacity(16 * self.names.len());
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('"');
            if let Some(field) = event.field(name) {
                push_field(field, &mut out);
            }
            out.push('"');
        }
        metrics::counter!(m::CODEC_EVENTS_ENCODED_TOTAL, m::LABEL_FORMAT => Self::FORMAT)
            .increment(1);
        Ok(out)
    }
}
