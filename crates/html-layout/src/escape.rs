//! HTML 이스케이프

use std::borrow::Cow;

/// `<`, `>`, `&`, `"`를 HTML 엔티티로 바꿉니다.
///
/// 바꿀 문자가 없으면 할당 없이 원본을 빌려 반환합니다.
pub fn escape_html(input: &str) -> Cow<'_, str> {
    if !input.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    push_escaped(&mut out, input);
    Cow::Owned(out)
}

/// 이스케이프한 텍스트를 버퍼 뒤에 붙입니다.
pub fn push_escaped(buf: &mut String, input: &str) {
    for c in input.chars() {
        match c {
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '&' => buf.push_str("&amp;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_html(r#"<b class="x">a & b</b>"#),
            "&lt;b class=&quot;x&quot;&gt;a &amp; b&lt;/b&gt;"
        );
    }
}
