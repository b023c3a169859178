//! 스타일 시트 -- 문서 `<head>`에 들어갈 스타일 정보를 만듭니다.
//!
//! 레이아웃은 정확히 하나의 [`CssBuilder`]에 스타일을 맡깁니다.
//! 별도로 지정하지 않으면 [`DefaultCssBuilder`]가 내장 스타일 블록을 씁니다.

use crate::escape::push_escaped;

/// 스타일 정보 생성기
pub trait CssBuilder: Send + Sync {
    /// 스타일 마크업을 버퍼 뒤에 붙입니다.
    fn add_css(&self, buf: &mut String);
}

/// 내장 기본 스타일 블록
const DEFAULT_CSS: &str = r#"<style type="text/css">
table { margin-left: 2em; margin-right: 2em; border-left: 2px solid #AAA; }
TR.even { background: #FFFFFF; }
TR.odd { background: #EAEAEA; }
TR.warn TD.Level, TR.error TD.Level { font-weight: bold; color: #FF4040; }
TD { padding-right: 1ex; padding-left: 1ex; border-right: 2px solid #AAA; }
TD.Date, TD.RelativeTime { text-align: right; font-family: courier, monospace; font-size: smaller; }
TD.Thread { text-align: left; }
TD.Level { text-align: right; }
TD.Logger { text-align: left; }
TR.header { background: #596ED5; color: #FFF; font-weight: bold; font-size: larger; }
TD.Exception { background: #A2AEE8; font-family: courier, monospace; }
</style>"#;

/// 내장 스타일 블록을 쓰는 기본 생성기
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCssBuilder;

impl CssBuilder for DefaultCssBuilder {
    fn add_css(&self, buf: &mut String) {
        buf.push_str(DEFAULT_CSS);
    }
}

/// 외부 스타일 시트를 링크하는 생성기
#[derive(Debug, Clone)]
pub struct UrlCssBuilder {
    url: String,
}

impl UrlCssBuilder {
    /// 스타일 시트 URL로 생성합니다.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// 링크할 URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CssBuilder for UrlCssBuilder {
    fn add_css(&self, buf: &mut String) {
        buf.push_str("<link REL=StyleSheet HREF=\"");
        push_escaped(buf, &self.url);
        buf.push_str("\" TITLE=\"Basic\" />");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_css_has_row_and_cell_rules() {
        let mut buf = String::new();
        DefaultCssBuilder.add_css(&mut buf);
        assert!(buf.starts_with("<style type=\"text/css\">"));
        assert!(buf.ends_with("</style>"));
        for rule in [
            "TR.even",
            "TR.odd",
            "TR.warn TD.Level",
            "TR.error TD.Level",
            "TD.Date",
            "TD.Thread",
            "TD.Level",
            "TD.Logger",
            "TR.header",
            "TD.Exception",
        ] {
            assert!(buf.contains(rule), "missing rule {rule}");
        }
    }

    #[test]
    fn url_builder_links_stylesheet() {
        let mut buf = String::new();
        UrlCssBuilder::new("https://example.com/log.css?v=1&x=2").add_css(&mut buf);
        assert_eq!(
            buf,
            "<link REL=StyleSheet HREF=\"https://example.com/log.css?v=1&amp;x=2\" TITLE=\"Basic\" />"
        );
    }
}
