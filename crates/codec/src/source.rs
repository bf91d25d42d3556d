//! 라인 입력 -- [`LineSource`] 구현과 백슬래시 이스케이프 해제
//!
//! [`ReaderSource`]는 `BufRead`에서 한 줄씩 읽고 줄바꿈을 제거합니다.
//! 입력은 바이트로 읽으며, 올바른 UTF-8이 아닌 바이트는 대체 문자로 바뀝니다.
//! 필요하면 각 줄의 백슬래시 이스케이프를 [`unescape_line`]으로 풉니다.

use std::io::BufRead;

use ceelog_core::codec::LineSource;
use ceelog_core::error::CeeError;
use tracing::trace;

/// `BufRead` 기반 라인 입력
pub struct ReaderSource<R> {
    reader: R,
    unescape: bool,
    lines_read: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            unescape: false,
            lines_read: 0,
        }
    }

    /// 각 줄의 백슬래시 이스케이프를 해제하도록 설정합니다.
    pub fn with_unescape(mut self, unescape: bool) -> Self {
        self.unescape = unescape;
        self
    }

    /// 지금까지 읽은 줄 수
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, CeeError> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = match String::from_utf8(buf) {
            Ok(line) => line,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        self.lines_read += 1;
        trace!(line = self.lines_read, len = line.len(), text = %line, "read line");

        if self.unescape {
            Ok(Some(unescape_line(&line)))
        } else {
            Ok(Some(line))
        }
    }
}

/// 메모리 상의 줄 목록을 입력으로 사용
pub struct IterSource<I> {
    lines: I,
}

impl<I> IterSource<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            lines: lines.into_iter(),
        }
    }
}

impl<I> LineSource for IterSource<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    fn next_line(&mut self) -> Result<Option<String>, CeeError> {
        Ok(self.lines.next().map(Into::into))
    }
}

/// C 스타일 백슬래시 이스케이프를 해제합니다.
///
/// - `\0 \a \b \f \n \r \t \v \' \" \? \\`
/// - `\ooo` 8진수 (1~3자리)
/// - `\xhh` 16진수 2자리, 뒤에 16진수가 4자리 있으면 `\xhhhh` 유니코드 코드 포인트
///
/// 알 수 없는 이스케이프와 잘린 이스케이프는 그대로 둡니다. 결과 바이트가
/// 올바른 UTF-8이 아니면 대체 문자로 바뀝니다.
pub fn unescape_line(line: &str) -> String {
    if !line.contains('\\') {
        return line.to_owned();
    }

    let bytes = line.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let esc = bytes[i + 1];
        let simple = match esc {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0B),
            b'\'' | b'"' | b'?' | b'\\' => Some(esc),
            _ => None,
        };
        if let Some(b) = simple {
            out.push(b);
            i += 2;
            continue;
        }

        match esc {
            b'0'..=b'7' => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take(3)
                    .take_while(|b| (b'0'..=b'7').contains(*b))
                    .count();
                let value = bytes[i + 1..i + 1 + digits]
                    .iter()
                    .fold(0u32, |acc, d| acc * 8 + u32::from(d - b'0'));
                // 3자리 8진수는 0o377을 넘을 수 있음
                out.push((value & 0xFF) as u8);
                i += 1 + digits;
            }
            b'x' => {
                let hex = &bytes[i + 2..];
                let run = hex.iter().take(4).take_while(|b| b.is_ascii_hexdigit()).count();
                let code = |n: usize| {
                    hex[..n]
                        .iter()
                        .fold(0u32, |acc, d| acc * 16 + hex_value(*d))
                };
                if run == 4 {
                    match char::from_u32(code(4)) {
                        Some(c) => {
                            let mut buf = [0u8; 4];
                            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                            i += 6;
                        }
                        None => {
                            out.extend_from_slice(&bytes[i..i + 6]);
                            i += 6;
                        }
                    }
                } else if run >= 2 {
                    out.push(code(2) as u8);
                    i += 4;
                } else {
                    out.extend_from_slice(&bytes[i..i + 2]);
                    i += 2;
                }
            }
            _ => {
                out.extend_from_slice(&bytes[i..i + 2]);
                i += 2;
            }
        }
    }

    match String::from_utf8(out) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn hex_value(d: u8) -> u32 {
    match d {
        b'0'..=b'9' => u32::from(d - b'0'),
        b'a'..=b'f' => u32::from(d - b'a' + 10),
        b'A'..=b'F' => u32::from(d - b'A' + 10),
        _ => 0,
    }
}
