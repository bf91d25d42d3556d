//! 프리미티브 타입 파서 -- 문자열의 현재 위치에서 타입 있는 값 하나를 읽어 냄
//!
//! 모든 파서는 같은 시그니처를 가집니다:
//! `(input, &mut offset, extra) -> Result<Value, CeeError>`
//!
//! - 성공하면 `offset`을 읽은 값 바로 뒤로 옮깁니다.
//! - 입력이 파서와 맞지 않으면 [`CeeError::WrongParser`]를 반환하고 `offset`은 그대로입니다.
//! - `extra`는 파서별 추가 데이터입니다 (현재는 [`parse_char_to`]의 구분자만 사용).
//!
//! [`PrimitiveType`]과 [`parse_first`]로 여러 파서를 차례로 시도할 수 있습니다.

use std::fmt;

use chrono::{FixedOffset, NaiveDate, NaiveTime};

use crate::error::CeeError;
use crate::value::{Timestamp, Value};

/// 바이트 단위 커서
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, pos: usize) -> Result<Self, CeeError> {
        if pos > input.len() || !input.is_char_boundary(pos) {
            return Err(CeeError::WrongParser);
        }
        Ok(Self { input, pos })
    }

    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, b: u8) -> Result<(), CeeError> {
        if self.eat(b) {
            Ok(())
        } else {
            Err(CeeError::WrongParser)
        }
    }

    /// 정확히 `n`자리 숫자
    fn fixed_digits(&mut self, n: usize) -> Result<u32, CeeError> {
        let digits = self
            .bytes()
            .get(self.pos..self.pos + n)
            .ok_or(CeeError::WrongParser)?;
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(CeeError::WrongParser);
        }
        self.pos += n;
        Ok(digits
            .iter()
            .fold(0, |acc, d| acc * 10 + u32::from(d - b'0')))
    }

    /// 1자리 이상, `max`자리 이하의 숫자
    fn digits(&mut self, max: usize) -> Result<(u32, usize), CeeError> {
        let start = self.pos;
        let mut value = 0u32;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            if self.pos - start == max {
                return Err(CeeError::WrongParser);
            }
            value = value * 10 + u32::from(d - b'0');
            self.pos += 1;
        }
        match self.pos - start {
            0 => Err(CeeError::WrongParser),
            n => Ok((value, n)),
        }
    }

    fn run_until(&mut self, stop: u8) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(|b| b != stop) {
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }
}

/// 하나 이상의 십진 숫자를 정수로 읽습니다.
pub fn parse_number(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let start = s.pos;
    while s.peek().is_some_and(|b| b.is_ascii_digit()) {
        s.pos += 1;
    }
    if s.pos == start {
        return Err(CeeError::WrongParser);
    }
    let n = input[start..s.pos]
        .parse::<i64>()
        .map_err(|_| CeeError::WrongParser)?;
    *offset = s.pos;
    Ok(Value::Number(n))
}

/// 공백이나 입력 끝까지의 비어 있지 않은 문자열을 읽습니다.
pub fn parse_word(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let word = s.run_until(b' ');
    if word.is_empty() {
        return Err(CeeError::WrongParser);
    }
    *offset = s.pos;
    Ok(Value::from(word))
}

/// `extra`의 첫 문자가 나올 때까지의 비어 있지 않은 문자열을 읽습니다.
///
/// 구분자는 값에 포함되지 않고 소비되지도 않습니다. 구분자가 없으면 맞지 않는 것으로 봅니다.
pub fn parse_char_to(input: &str, offset: &mut usize, extra: Option<&str>) -> Result<Value, CeeError> {
    let delim = extra
        .and_then(|e| e.bytes().next())
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            CeeError::InvalidArgument("char-to parser needs an ASCII delimiter".to_owned())
        })?;
    let mut s = Scanner::new(input, *offset)?;
    let run = s.run_until(delim);
    if run.is_empty() || s.at_end() {
        return Err(CeeError::WrongParser);
    }
    *offset = s.pos;
    Ok(Value::from(run))
}

/// 큰따옴표로 감싼 문자열을 읽습니다. 값에는 따옴표가 포함되지 않습니다.
pub fn parse_quoted_string(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    s.expect(b'"')?;
    let inner = s.run_until(b'"');
    s.expect(b'"')?;
    *offset = s.pos;
    Ok(Value::from(inner))
}

/// 점으로 구분된 IPv4 주소 (`0.0.0.0` ~ `255.255.255.255`)
pub fn parse_ipv4(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let start = s.pos;
    for octet in 0..4 {
        if octet > 0 {
            s.expect(b'.')?;
        }
        let (n, _) = s.digits(3)?;
        if n > 255 {
            return Err(CeeError::WrongParser);
        }
    }
    *offset = s.pos;
    Ok(Value::from(&input[start..s.pos]))
}

/// RFC 5424 타임스탬프 (`2003-10-11T22:14:15.003Z`, `...+02:00`)
///
/// 타임스탬프 뒤에는 공백이나 입력 끝이 와야 합니다.
pub fn parse_rfc5424_date(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let year = s.fixed_digits(4)?;
    s.expect(b'-')?;
    let month = s.fixed_digits(2)?;
    s.expect(b'-')?;
    let day = s.fixed_digits(2)?;
    s.expect(b'T')?;
    let hour = s.fixed_digits(2)?;
    s.expect(b':')?;
    let minute = s.fixed_digits(2)?;
    s.expect(b':')?;
    let second = s.fixed_digits(2)?;

    let mut nanos = 0u32;
    if s.eat(b'.') {
        let (frac, width) = s.digits(9)?;
        nanos = frac * 10u32.pow((9 - width) as u32);
    }

    let offset_secs = if s.eat(b'Z') {
        0
    } else {
        let sign = match s.peek() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Err(CeeError::WrongParser),
        };
        s.pos += 1;
        let oh = s.fixed_digits(2)?;
        s.expect(b':')?;
        let om = s.fixed_digits(2)?;
        if oh > 23 || om > 59 {
            return Err(CeeError::WrongParser);
        }
        sign * (oh * 3600 + om * 60) as i32
    };

    if !s.at_end() && s.peek() != Some(b' ') {
        return Err(CeeError::WrongParser);
    }

    let date = NaiveDate::from_ymd_opt(year as i32, month, day).ok_or(CeeError::WrongParser)?;
    let time = time_with_leap_second(hour, minute, second, nanos)?;
    let tz = FixedOffset::east_opt(offset_secs).ok_or(CeeError::WrongParser)?;
    let dt = date
        .and_time(time)
        .and_local_timezone(tz)
        .single()
        .ok_or(CeeError::WrongParser)?;

    *offset = s.pos;
    Ok(Value::Timestamp(Timestamp::Zoned(dt)))
}

/// RFC 3164 타임스탬프 (`Oct 11 22:14:15`)
///
/// 월 이름은 대소문자를 구분하지 않고, 한 자리 날짜 앞의 공백 하나를 더 허용합니다.
/// 시각 자리에 1971~2099 사이 숫자가 오면 연도로 보고 그 뒤에서 시각을 다시 읽습니다.
/// 시각 뒤의 `:` 하나는 건너뜁니다.
pub fn parse_rfc3164_date(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let abbrev = s
        .bytes()
        .get(s.pos..s.pos + 3)
        .ok_or(CeeError::WrongParser)?;
    let month = month_from_abbrev(abbrev).ok_or(CeeError::WrongParser)?;
    s.pos += 3;

    s.expect(b' ')?;
    s.eat(b' ');
    let (day, _) = s.digits(2)?;
    if !(1..=31).contains(&day) {
        return Err(CeeError::WrongParser);
    }
    s.expect(b' ')?;

    let mut year = None;
    let (mut hour, _) = s.digits(4)?;
    if (1971..=2099).contains(&hour) {
        year = Some(hour as i32);
        s.expect(b' ')?;
        hour = s.digits(2)?.0;
    }
    if hour > 23 {
        return Err(CeeError::WrongParser);
    }
    s.expect(b':')?;
    let (minute, _) = s.digits(2)?;
    if minute > 59 {
        return Err(CeeError::WrongParser);
    }
    s.expect(b':')?;
    let (second, _) = s.digits(2)?;
    if second > 60 {
        return Err(CeeError::WrongParser);
    }
    s.eat(b':');

    let time = time_with_leap_second(hour, minute, second, 0)?;
    *offset = s.pos;
    Ok(Value::Timestamp(Timestamp::Local {
        year,
        month,
        day,
        time,
    }))
}

/// ISO 날짜 (`YYYY-MM-DD`)
pub fn parse_iso_date(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let start = s.pos;
    let year = s.fixed_digits(4)?;
    s.expect(b'-')?;
    let month = s.fixed_digits(2)?;
    s.expect(b'-')?;
    let day = s.fixed_digits(2)?;
    NaiveDate::from_ymd_opt(year as i32, month, day).ok_or(CeeError::WrongParser)?;
    *offset = s.pos;
    Ok(Value::from(&input[start..s.pos]))
}

/// 24시간제 시각 (`HH:MM:SS`, 시 00~23)
pub fn parse_time_24hr(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    parse_clock(input, offset, 0..=23)
}

/// 12시간제 시각 (`HH:MM:SS`, 시 01~12)
pub fn parse_time_12hr(input: &str, offset: &mut usize, _extra: Option<&str>) -> Result<Value, CeeError> {
    parse_clock(input, offset, 1..=12)
}

fn parse_clock(
    input: &str,
    offset: &mut usize,
    hours: std::ops::RangeInclusive<u32>,
) -> Result<Value, CeeError> {
    let mut s = Scanner::new(input, *offset)?;
    let start = s.pos;
    let hour = s.fixed_digits(2)?;
    s.expect(b':')?;
    let minute = s.fixed_digits(2)?;
    s.expect(b':')?;
    let second = s.fixed_digits(2)?;
    if !hours.contains(&hour) || minute > 59 || second > 59 {
        return Err(CeeError::WrongParser);
    }
    *offset = s.pos;
    Ok(Value::from(&input[start..s.pos]))
}

fn month_from_abbrev(abbrev: &[u8]) -> Option<u32> {
    let lower: [u8; 3] = [
        abbrev[0].to_ascii_lowercase(),
        abbrev[1].to_ascii_lowercase(),
        abbrev[2].to_ascii_lowercase(),
    ];
    let month = match &lower {
        b"jan" => 1,
        b"feb" => 2,
        b"mar" => 3,
        b"apr" => 4,
        b"may" => 5,
        b"jun" => 6,
        b"jul" => 7,
        b"aug" => 8,
        b"sep" => 9,
        b"oct" => 10,
        b"nov" => 11,
        b"dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn time_with_leap_second(hour: u32, minute: u32, second: u32, nanos: u32) -> Result<NaiveTime, CeeError> {
    let time = if second == 60 {
        NaiveTime::from_hms_nano_opt(hour, minute, 59, 1_000_000_000 + nanos)
    } else {
        NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
    };
    time.ok_or(CeeError::WrongParser)
}

/// 프리미티브 파서 함수 타입
pub type PrimitiveParser = fn(&str, &mut usize, Option<&str>) -> Result<Value, CeeError>;

/// 지원하는 프리미티브 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Number,
    Word,
    CharTo,
    QuotedString,
    Ipv4,
    Rfc5424Date,
    Rfc3164Date,
    IsoDate,
    Time24hr,
    Time12hr,
}

impl PrimitiveType {
    /// 모든 타입
    pub const ALL: [PrimitiveType; 10] = [
        Self::Number,
        Self::Word,
        Self::CharTo,
        Self::QuotedString,
        Self::Ipv4,
        Self::Rfc5424Date,
        Self::Rfc3164Date,
        Self::IsoDate,
        Self::Time24hr,
        Self::Time12hr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Word => "word",
            Self::CharTo => "char-to",
            Self::QuotedString => "quoted-string",
            Self::Ipv4 => "ipv4",
            Self::Rfc5424Date => "date-rfc5424",
            Self::Rfc3164Date => "date-rfc3164",
            Self::IsoDate => "date-iso",
            Self::Time24hr => "time-24hr",
            Self::Time12hr => "time-12hr",
        }
    }

    /// 이름으로 타입을 찾습니다.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    pub fn parser(&self) -> PrimitiveParser {
        match self {
            Self::Number => parse_number,
            Self::Word => parse_word,
            Self::CharTo => parse_char_to,
            Self::QuotedString => parse_quoted_string,
            Self::Ipv4 => parse_ipv4,
            Self::Rfc5424Date => parse_rfc5424_date,
            Self::Rfc3164Date => parse_rfc3164_date,
            Self::IsoDate => parse_iso_date,
            Self::Time24hr => parse_time_24hr,
            Self::Time12hr => parse_time_12hr,
        }
    }

    pub fn parse(&self, input: &str, offset: &mut usize, extra: Option<&str>) -> Result<Value, CeeError> {
        (self.parser())(input, offset, extra)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 주어진 순서대로 파서를 시도해 처음 맞는 타입과 값을 반환합니다.
///
/// 맞는 파서가 없으면 `Ok(None)`입니다. [`CeeError::WrongParser`]는 여기서 소비되고
/// 그 밖의 에러는 그대로 전달됩니다.
pub fn parse_first(
    types: &[PrimitiveType],
    input: &str,
    offset: &mut usize,
    extra: Option<&str>,
) -> Result<Option<(PrimitiveType, Value)>, CeeError> {
    for ty in types {
        match ty.parse(input, offset, extra) {
            Ok(value) => return Ok(Some((*ty, value))),
            Err(CeeError::WrongParser) => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
