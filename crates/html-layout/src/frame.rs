//! 문서 틀 -- 프리앰블, 헤더 행, 페이지 경계, 포스트앰블
//!
//! ```text
//! <!DOCTYPE ...>          ┐
//! <html><head>            │
//! <title>, 스타일         │ preamble()
//! <body>, 세션 시작 시각  │
//! <table>, 헤더 행        ┘
//!   행 ...
//! </table><br />          ┐ table_break() (페이지 경계)
//! <table>, 헤더 행        ┘
//!   행 ...
//! </table>, </body></html>  postamble()
//! ```

use chrono::{DateTime, Utc};

use crate::converter::{ConverterChain, ConverterNode};
use crate::css::CssBuilder;
use crate::escape::push_escaped;

/// XHTML Strict 문서 선언
pub const DOCTYPE: &str = "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";

/// 테이블 여는 태그
pub const TABLE_OPEN: &str = "<table cellspacing=\"0\">";

/// 세션 시작 시각 표기
pub const SESSION_START_FORMAT: &str = "%a %b %d %H:%M:%S UTC %Y";

/// 문서 틀 생성기
///
/// 제목과 스타일 생성기는 생성 시 고정되므로 같은 체인에 대해
/// 프리앰블은 세션 시작 시각을 제외하고 항상 동일합니다.
pub struct FrameBuilder {
    title: String,
    css: Box<dyn CssBuilder>,
}

impl FrameBuilder {
    /// 제목과 스타일 생성기로 생성합니다.
    pub fn new(title: impl Into<String>, css: Box<dyn CssBuilder>) -> Self {
        Self {
            title: title.into(),
            css,
        }
    }

    /// 문서 제목 (이스케이프 전)
    pub fn title(&self) -> &str {
        &self.title
    }

    /// 문서 시작부터 첫 헤더 행까지를 만듭니다.
    pub fn preamble(&self, chain: &ConverterChain, session_start: DateTime<Utc>) -> String {
        let mut buf = String::with_capacity(2048);
        buf.push_str(DOCTYPE);
        buf.push('\n');
        buf.push_str("<html>\n<head>\n<title>");
        push_escaped(&mut buf, &self.title);
        buf.push_str("</title>\n");
        self.css.add_css(&mut buf);
        buf.push_str("\n</head>\n<body>\n");
        buf.push_str("<hr size=\"1\" noshade=\"true\" />\n");
        buf.push_str("Log session start time ");
        buf.push_str(&session_start.format(SESSION_START_FORMAT).to_string());
        buf.push_str("<br />\n<br />\n");
        buf.push_str(TABLE_OPEN);
        buf.push('\n');
        Self::header_row(&mut buf, chain);
        buf
    }

    /// 헤더 행: 표시 열마다 `<td class="Name">Name</td>` 하나
    pub fn header_row(buf: &mut String, chain: &ConverterChain) {
        buf.push_str("<tr class=\"header\">\n");
        for name in chain.nodes().iter().filter_map(ConverterNode::html_name) {
            buf.push_str("<td class=\"");
            buf.push_str(name);
            buf.push_str("\">");
            buf.push_str(name);
            buf.push_str("</td>\n");
        }
        buf.push_str("</tr>\n");
    }

    /// 페이지 경계: 현재 테이블을 닫고 헤더 행과 함께 새 테이블을 엽니다.
    pub fn table_break(buf: &mut String, chain: &ConverterChain) {
        buf.push_str("</table>\n<br />\n");
        buf.push_str(TABLE_OPEN);
        buf.push('\n');
        Self::header_row(buf, chain);
    }

    /// 마지막 테이블과 문서를 닫습니다.
    pub fn postamble() -> String {
        "</table>\n<br />\n</body></html>".to_owned()
    }
}

impl std::fmt::Debug for FrameBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuilder")
            .field("title", &self.title)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConverterRegistry;
    use crate::css::{DefaultCssBuilder, UrlCssBuilder};
    use chrono::TimeZone;

    fn chain(pattern: &str) -> ConverterChain {
        ConverterChain::compile(pattern, &ConverterRegistry::with_defaults()).unwrap()
    }

    fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 8, 30, 0).unwrap()
    }

    #[test]
    fn preamble_structure() {
        let frame = FrameBuilder::new("Log Messages", Box::new(DefaultCssBuilder));
        let text = frame.preamble(&chain("%level%msg"), start_time());

        assert!(text.starts_with(DOCTYPE));
        assert!(text.contains("<title>Log Messages</title>\n<style type=\"text/css\">"));
        assert!(text.contains("Log session start time Fri May 17 08:30:00 UTC 2024<br />"));
        assert!(text.ends_with(
            "<table cellspacing=\"0\">\n<tr class=\"header\">\n<td class=\"Level\">Level</td>\n<td class=\"Message\">Message</td>\n</tr>\n"
        ));
    }

    #[test]
    fn title_is_escaped() {
        let frame = FrameBuilder::new("<script>alert(1)</script>", Box::new(DefaultCssBuilder));
        let text = frame.preamble(&chain("%msg"), start_time());
        assert!(text.contains("<title>&lt;script&gt;alert(1)&lt;/script&gt;</title>"));
        assert_eq!(frame.title(), "<script>alert(1)</script>");
    }

    #[test]
    fn url_css_replaces_embedded_style() {
        let frame = FrameBuilder::new("t", Box::new(UrlCssBuilder::new("/log.css")));
        let text = frame.preamble(&chain("%msg"), start_time());
        assert!(text.contains("<link REL=StyleSheet HREF=\"/log.css\" TITLE=\"Basic\" />"));
        assert!(!text.contains("<style"));
    }

    #[test]
    fn preamble_is_deterministic_for_same_time() {
        let frame = FrameBuilder::new("t", Box::new(DefaultCssBuilder));
        let chain = chain("%date%thread%level");
        assert_eq!(
            frame.preamble(&chain, start_time()),
            frame.preamble(&chain, start_time())
        );
    }

    #[test]
    fn header_row_skips_literals() {
        let mut buf = String::new();
        FrameBuilder::header_row(&mut buf, &chain("[%thread] %level%n"));
        assert_eq!(buf.matches("<td").count(), 2);
        assert!(!buf.contains('['));
    }

    #[test]
    fn header_row_with_no_visible_columns() {
        let mut buf = String::new();
        FrameBuilder::header_row(&mut buf, &chain("plain text"));
        assert_eq!(buf, "<tr class=\"header\">\n</tr>\n");
    }

    #[test]
    fn table_break_closes_and_reopens() {
        let mut buf = String::new();
        FrameBuilder::table_break(&mut buf, &chain("%level"));
        assert!(buf.starts_with("</table>\n<br />\n<table cellspacing=\"0\">\n<tr class=\"header\">"));
    }

    #[test]
    fn postamble_closes_document() {
        assert_eq!(FrameBuilder::postamble(), "</table>\n<br />\n</body></html>");
    }
}
