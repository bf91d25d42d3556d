//! 메트릭 상수 및 설명 등록
//!
//! 코덱이 기록하는 메트릭의 이름과 설명을 한곳에서 정의합니다.
//! 레코더를 설치하지 않으면 기록은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `ceelog_codec_`
//! - 접미어: `_total` (counter), `_seconds` (histogram)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(ceelog_core::metrics::CODEC_EVENTS_DECODED_TOTAL,
//!     ceelog_core::metrics::LABEL_FORMAT => "int").increment(1);
//! ```

/// 코덱 형식 레이블 키 (int, apache, json, syslog, xml, csv)
pub const LABEL_FORMAT: &str = "format";

/// 디코더가 읽은 라인 수 (counter, label: format)
pub const CODEC_LINES_READ_TOTAL: &str = "ceelog_codec_lines_read_total";

/// 디코더가 전달한 이벤트 수 (counter, label: format)
pub const CODEC_EVENTS_DECODED_TOTAL: &str = "ceelog_codec_events_decoded_total";

/// 디코딩 실패 수 (counter, label: format)
pub const CODEC_DECODE_ERRORS_TOTAL: &str = "ceelog_codec_decode_errors_total";

/// 인코딩된 이벤트 수 (counter, label: format)
pub const CODEC_EVENTS_ENCODED_TOTAL: &str = "ceelog_codec_events_encoded_total";

/// 입력 전체를 디코딩하는 데 걸린 시간 (histogram, 초, label: format)
pub const CODEC_DECODE_DURATION_SECONDS: &str = "ceelog_codec_decode_duration_seconds";

/// 모든 메트릭의 설명을 등록합니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    describe_counter!(
        CODEC_LINES_READ_TOTAL,
        "Total number of input lines read by decoders"
    );
    describe_counter!(
        CODEC_EVENTS_DECODED_TOTAL,
        "Total number of events delivered by decoders"
    );
    describe_counter!(
        CODEC_DECODE_ERRORS_TOTAL,
        "Total number of decode runs aborted by an error"
    );
    describe_counter!(
        CODEC_EVENTS_ENCODED_TOTAL,
        "Total number of events encoded to text"
    );
    describe_histogram!(
        CODEC_DECODE_DURATION_SECONDS,
        "Time to decode a whole input in seconds"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_METRIC_NAMES: &[&str] = &[
        CODEC_LINES_READ_TOTAL,
        CODEC_EVENTS_DECODED_TOTAL,
        CODEC_DECODE_ERRORS_TOTAL,
        CODEC_EVENTS_ENCODED_TOTAL,
        CODEC_DECODE_DURATION_SECONDS,
    ];

    #[test]
    fn all_metrics_start_with_prefix() {
        for name in ALL_METRIC_NAMES {
            assert!(
                name.starts_with("ceelog_codec_"),
                "Metric '{}' does not start with 'ceelog_codec_' prefix",
                name
            );
        }
    }

    #[test]
    fn metric_names_are_unique() {
        let mut names = ALL_METRIC_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_METRIC_NAMES.len());
    }

    #[test]
    fn describe_all_does_not_panic() {
        // 레코더가 없어도 패닉하지 않아야 함
        describe_all();
    }
}
