#![no_main]

use arbitrary::Arbitrary;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;

use loglayout_core::event::{Level, LoggingEvent, ThrowableProxy};
use loglayout_html::HtmlLayoutBuilder;

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    pattern: String,
    /// 페이지 크기 (작게 제한)
    row_limit: u8,
    events: Vec<FuzzEvent>,
}

#[derive(Arbitrary, Debug)]
struct FuzzEvent {
    level: u8,
    logger: String,
    thread: String,
    message: String,
    mdc: Vec<(String, String)>,
    throwable: Option<(String, Option<String>, Vec<String>)>,
    seconds: u32,
}

impl FuzzEvent {
    fn into_event(self) -> LoggingEvent {
        let level = match self.level % 5 {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            _ => Level::Error,
        };
        let mut event = LoggingEvent::new(level, self.logger, self.message)
            .with_thread(self.thread)
            .with_timestamp(Utc.timestamp_opt(i64::from(self.seconds), 0).single().unwrap_or_default());
        for (key, value) in self.mdc.into_iter().take(8) {
            event = event.with_mdc(key, value);
        }
        if let Some((class_name, message, frames)) = self.throwable {
            let mut proxy = ThrowableProxy::new(class_name, message);
            for frame in frames.into_iter().take(16) {
                proxy = proxy.with_frame(frame);
            }
            event = event.with_throwable(proxy);
        }
        event
    }
}

fuzz_target!(|input: FuzzInput| {
    let Ok(mut layout) = HtmlLayoutBuilder::new()
        .pattern(input.pattern)
        .row_limit(usize::from(input.row_limit))
        .build()
    else {
        return;
    };

    // 잘못된 패턴은 시작 실패로 끝나야 함
    if layout.start().is_err() {
        assert!(!layout.is_started());
        return;
    }

    let columns = layout.column_names().len();
    let mut document = layout.header().unwrap_or_default();
    for fuzz_event in input.events.into_iter().take(64) {
        let event = fuzz_event.into_event();
        let has_throwable = event.throwable().is_some();
        let row = layout.do_layout(&event).unwrap_or_default();

        // 행의 셀 수는 헤더 열 수와 같아야 함 (실패 블록, 페이지 경계 제외)
        if !has_throwable && !row.contains("</table>") {
            assert_eq!(row.matches("<td class=").count(), columns);
        }
        document.push_str(&row);
    }
    document.push_str(&layout.footer().unwrap_or_default());
    let _ = layout.stop();
});
