//! 실패 렌더러 -- 실패 정보가 있는 이벤트의 행 뒤에 붙는 블록
//!
//! 레이아웃은 이벤트에 실패 정보가 있을 때만 렌더러를 호출하며,
//! 렌더러의 출력은 행 닫는 태그 바로 뒤에 붙습니다.
//!
//! | 구현 | 출력 |
//! |---|---|
//! | [`DefaultThrowableRenderer`] | `<tr><td class="Exception">` 블록 (cause 체인 포함) |
//! | [`NopThrowableRenderer`] | 없음 (`%ex` 열과 함께 사용) |
//! | `Fn(&mut String, &LoggingEvent)` | 임의 구현 |

use loglayout_core::event::{LoggingEvent, MAX_CAUSE_DEPTH, ThrowableProxy};

use crate::escape::push_escaped;

/// 스택 프레임 줄 앞에 붙는 들여쓰기
pub const TRACE_PREFIX: &str = "<br />&nbsp;&nbsp;&nbsp;&nbsp;";

/// cause 체인이 [`MAX_CAUSE_DEPTH`]에서 잘렸을 때 붙는 줄
pub const TRUNCATION_MARKER: &str = "... cause chain truncated";

/// 기본 `colspan` 값 (기본 패턴의 열 수)
pub const DEFAULT_COLSPAN: usize = 6;

/// 실패 정보 렌더러
///
/// 정상적인 실패 정보에 대해 패닉하면 안 되며, cause 체인 순회는
/// 항상 유한해야 합니다.
pub trait ThrowableRenderer: Send + Sync {
    /// 이벤트의 실패 정보를 버퍼 뒤에 붙입니다.
    fn render(&self, buf: &mut String, event: &LoggingEvent);
}

impl<F> ThrowableRenderer for F
where
    F: Fn(&mut String, &LoggingEvent) + Send + Sync,
{
    fn render(&self, buf: &mut String, event: &LoggingEvent) {
        self(buf, event)
    }
}

/// 기본 렌더러 -- 실패 정보를 별도 테이블 행으로 출력
#[derive(Debug, Clone, Copy)]
pub struct DefaultThrowableRenderer {
    colspan: usize,
}

impl DefaultThrowableRenderer {
    /// 기본 `colspan`으로 생성합니다.
    pub fn new() -> Self {
        Self {
            colspan: DEFAULT_COLSPAN,
        }
    }

    /// 블록 셀의 `colspan`을 지정합니다.
    pub fn with_colspan(colspan: usize) -> Self {
        Self { colspan }
    }

    /// 현재 `colspan`
    pub fn colspan(&self) -> usize {
        self.colspan
    }

    fn push_frames(buf: &mut String, throwable: &ThrowableProxy) {
        for frame in &throwable.stack_trace {
            buf.push_str(TRACE_PREFIX);
            buf.push_str("at ");
            push_escaped(buf, frame);
            buf.push('\n');
        }
    }
}

impl Default for DefaultThrowableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThrowableRenderer for DefaultThrowableRenderer {
    fn render(&self, buf: &mut String, event: &LoggingEvent) {
        let Some(throwable) = event.throwable() else {
            return;
        };

        buf.push_str("<tr><td class=\"Exception\" colspan=\"");
        buf.push_str(&self.colspan.to_string());
        buf.push_str("\">");

        for (depth, t) in throwable.cause_chain().enumerate() {
            if depth == 0 {
                push_escaped(buf, &t.summary());
                buf.push('\n');
            } else {
                buf.push_str("<br />Caused by: ");
                push_escaped(buf, &t.summary());
                buf.push('\n');
            }
            Self::push_frames(buf, t);
        }

        if throwable.is_chain_truncated() {
            buf.push_str("<br />");
            buf.push_str(TRUNCATION_MARKER);
            buf.push_str(&format!(" after {MAX_CAUSE_DEPTH} levels"));
            buf.push('\n');
        }

        buf.push_str("</td></tr>\n");
    }
}

/// 아무것도 출력하지 않는 렌더러
#[derive(Debug, Clone, Copy, Default)]
pub struct NopThrowableRenderer;

impl ThrowableRenderer for NopThrowableRenderer {
    fn render(&self, _buf: &mut String, _event: &LoggingEvent) {}
}
