//! 메트릭 상수
//!
//! 모든 메트릭의 이름을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()` 매크로를 호출합니다.
//! 라이브러리는 exporter를 설치하지 않으며, 설치 여부는 애플리케이션이 결정합니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `loglayout_`
//! - 레이아웃명: `html_`
//! - 접미어: `_total` (counter)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(loglayout_core::metrics::HTML_ROWS_RENDERED_TOTAL).increment(1);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 레벨 레이블 키 (trace, debug, info, warn, error)
pub const LABEL_LEVEL: &str = "level";

// ─── HTML Layout 메트릭 ────────────────────────────────────────────

/// HTML Layout: 렌더링된 행 수 (counter, label: level)
pub const HTML_ROWS_RENDERED_TOTAL: &str = "loglayout_html_rows_rendered_total";

/// HTML Layout: 페이지 경계(테이블 재시작) 수 (counter)
pub const HTML_PAGES_TOTAL: &str = "loglayout_html_pages_total";

/// HTML Layout: 렌더링된 실패(예외) 블록 수 (counter)
pub const HTML_THROWABLES_RENDERED_TOTAL: &str = "loglayout_html_throwables_rendered_total";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_names_share_prefix() {
        for name in [
            HTML_ROWS_RENDERED_TOTAL,
            HTML_PAGES_TOTAL,
            HTML_THROWABLES_RENDERED_TOTAL,
        ] {
            assert!(name.starts_with("loglayout_html_"));
            assert!(name.ends_with("_total"));
        }
    }
}
