//! 값 -- 필드가 담는 타입이 있는 단일 값
//!
//! [`Value`]는 한 번 타입이 정해지면 바뀌지 않습니다. 타입이 없는
//! [`Value::None`]에만 `set_*`을 호출할 수 있습니다.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat, TimeZone};

use crate::error::CeeError;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 타임스탬프 값
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// 날짜, 시각, UTC 오프셋이 모두 있는 타임스탬프 (RFC 5424)
    Zoned(DateTime<FixedOffset>),
    /// 연도와 오프셋이 없을 수 있는 타임스탬프 (RFC 3164)
    Local {
        year: Option<i32>,
        month: u32,
        day: u32,
        time: NaiveTime,
    },
}

impl Timestamp {
    /// 절대 시각으로 변환합니다.
    ///
    /// `Local`은 연도가 없으면 `default_year`를, 오프셋은 `offset`을 사용합니다.
    /// 날짜가 유효하지 않으면 `None`을 반환합니다.
    pub fn to_datetime(&self, default_year: i32, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
        match *self {
            Self::Zoned(dt) => Some(dt),
            Self::Local {
                year,
                month,
                day,
                time,
            } => {
                let date = NaiveDate::from_ymd_opt(year.unwrap_or(default_year), month, day)?;
                offset.from_local_datetime(&date.and_time(time)).single()
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoned(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Local {
                year,
                month,
                day,
                time,
            } => {
                let name = month
                    .checked_sub(1)
                    .and_then(|idx| MONTH_NAMES.get(idx as usize))
                    .copied()
                    .unwrap_or("???");
                write!(f, "{name} {day:>2} ")?;
                if let Some(year) = year {
                    write!(f, "{year} ")?;
                }
                write!(f, "{}", time.format("%H:%M:%S"))
            }
        }
    }
}

/// 필드 값
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    /// 아직 타입이 정해지지 않은 값
    #[default]
    None,
    /// 문자열
    String(String),
    /// 정수
    Number(i64),
    /// 타임스탬프
    Timestamp(Timestamp),
}

impl Value {
    /// 타입이 없는 빈 값을 생성합니다.
    pub fn new() -> Self {
        Self::None
    }

    /// 값의 타입 이름
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// 문자열 값을 설정합니다. 이미 타입이 있으면 실패하고 값은 그대로입니다.
    pub fn set_string(&mut self, s: impl Into<String>) -> Result<(), CeeError> {
        self.ensure_untyped()?;
        *self = Self::String(s.into());
        Ok(())
    }

    /// 정수 값을 설정합니다. 이미 타입이 있으면 실패합니다.
    pub fn set_number(&mut self, n: i64) -> Result<(), CeeError> {
        self.ensure_untyped()?;
        *self = Self::Number(n);
        Ok(())
    }

    /// 타임스탬프 값을 설정합니다. 이미 타입이 있으면 실패합니다.
    pub fn set_timestamp(&mut self, ts: Timestamp) -> Result<(), CeeError> {
        self.ensure_untyped()?;
        *self = Self::Timestamp(ts);
        Ok(())
    }

    fn ensure_untyped(&self) -> Result<(), CeeError> {
        if self.is_none() {
            Ok(())
        } else {
            Err(CeeError::InvalidArgument(format!(
                "value already has type '{}'",
                self.type_name()
            )))
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// 값을 문자열로 표현합니다. 타입이 없는 값은 빈 문자열입니다.
    pub fn as_string(&self) -> Cow<'_, str> {
        match self {
            Self::None => Cow::Borrowed(""),
            Self::String(s) => Cow::Borrowed(s),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Timestamp(ts) => Cow::Owned(ts.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Self::Timestamp(ts)
    }
}
