//! 형식별 문자열 이스케이프
//!
//! 각 함수는 입력을 이스케이프해 `out` 뒤에 이어 붙입니다. 표에 없는 문자는
//! 그대로 복사되며, 0x7F와 비 ASCII 문자도 그대로입니다.
//!
//! | 형식 | 이스케이프 |
//! |---|---|
//! | syslog | NUL `\0`, LF `\n`, `,` `\,`, `\` `\\`, `]` `\]`, `"` `\"` |
//! | JSON/CSV | NUL `\u0000`, `"`, `/`, `\`, BS, FF, LF, CR, TAB, 그 밖의 0x20 미만 `\u00XX` |
//! | XML | NUL `&#00;`, `<` `&lt;`, `&` `&amp;` |

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// RFC 5424 구조화 데이터 값 이스케이프
pub fn escape_syslog(s: &str, out: &mut String) {
    out.reserve(s.len());
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\n' => out.push_str("\\n"),
            ',' => out.push_str("\\,"),
            '\\' => out.push_str("\\\\"),
            ']' => out.push_str("\\]"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
}

/// JSON 문자열 이스케이프 (따옴표는 붙이지 않음)
pub fn escape_json(s: &str, out: &mut String) {
    out.reserve(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '/' => out.push_str("\\/"),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => push_unicode_escape(c as u8, out),
            _ => out.push(c),
        }
    }
}

/// CSV 셀 이스케이프 (JSON과 같은 표)
pub fn escape_csv(s: &str, out: &mut String) {
    escape_json(s, out);
}

/// XML 텍스트 이스케이프
pub fn escape_xml(s: &str, out: &mut String) {
    out.reserve(s.len());
    for c in s.chars() {
        match c {
            '\0' => out.push_str("&#00;"),
            '<' => out.push_str("&lt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
}

fn push_unicode_escape(b: u8, out: &mut String) {
    out.push_str("\\u00");
    out.push(HEX_UPPER[usize::from(b >> 4)] as char);
    out.push(HEX_UPPER[usize::from(b & 0x0F)] as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn esc(f: fn(&str, &mut String), s: &str) -> String {
        let mut out = String::new();
        f(s, &mut out);
        out
    }

    #[test]
    fn syslog_table() {
        assert_eq!(esc(escape_syslog, "a\0b"), "a\\0b");
        assert_eq!(esc(escape_syslog, "x\ny"), "x\\ny");
        assert_eq!(esc(escape_syslog, "a,b"), "a\\,b");
        assert_eq!(esc(escape_syslog, "c:\\tmp"), "c:\\\\tmp");
        assert_eq!(esc(escape_syslog, "[x]"), "[x\\]");
        assert_eq!(esc(escape_syslog, "say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(esc(escape_syslog, "tab\there\r"), "tab\there\r");
    }

    #[test]
    fn json_table() {
        assert_eq!(esc(escape_json, "O'Brien \"Q\""), "O'Brien \\\"Q\\\"");
        assert_eq!(esc(escape_json, "a/b\\c"), "a\\/b\\\\c");
        assert_eq!(esc(escape_json, "\u{08}\u{0C}\n\r\t"), "\\b\\f\\n\\r\\t");
        assert_eq!(esc(escape_json, "\0"), "\\u0000");
        assert_eq!(esc(escape_json, "\u{1B}[0m"), "\\u001B[0m");
        assert_eq!(esc(escape_json, "\u{7F}"), "\u{7F}");
        assert_eq!(esc(escape_json, "héllo"), "héllo");
    }

    #[test]
    fn csv_uses_json_table() {
        assert_eq!(esc(escape_csv, "a\"b/c"), esc(escape_json, "a\"b/c"));
        assert_eq!(esc(escape_csv, "1,2"), "1,2");
    }

    #[test]
    fn xml_table() {
        assert_eq!(esc(escape_xml, "a<b&c"), "a&lt;b&amp;c");
        assert_eq!(esc(escape_xml, "\0"), "&#00;");
        assert_eq!(esc(escape_xml, "a>b \"q\" 'x'"), "a>b \"q\" 'x'");
    }

    #[test]
    fn appends_to_existing_output() {
        let mut out = String::from("prefix:");
        escape_json("\"", &mut out);
        assert_eq!(out, "prefix:\\\"");
    }
}
