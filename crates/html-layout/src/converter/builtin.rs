//! 기본 변환기
//!
//! 모든 기본 변환기는 필드가 없으면 빈 문자열(호출자 정보는 `?`)을 반환하며
//! 절대 실패하지 않습니다.

use loglayout_core::event::{LoggingEvent, ThrowableProxy};

use super::{Converter, ConverterContext};
use crate::escape::push_escaped;

/// 호출자 정보가 없을 때 쓰는 대체 텍스트
pub const NA: &str = "?";

/// 패턴의 리터럴 텍스트
///
/// 열을 만들지 않으며 본문 행의 셀 사이에 그대로 끼워 넣어집니다.
#[derive(Debug, Clone)]
pub struct LiteralConverter {
    text: String,
}

impl LiteralConverter {
    /// 리터럴 변환기를 생성합니다.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Converter for LiteralConverter {
    fn convert(&self, _event: &LoggingEvent) -> String {
        self.text.clone()
    }

    fn kind(&self) -> &str {
        ""
    }
}

/// `%n` 줄바꿈
#[derive(Debug, Clone, Copy)]
pub struct LineSeparatorConverter;

impl Converter for LineSeparatorConverter {
    fn convert(&self, _event: &LoggingEvent) -> String {
        "\n".to_owned()
    }

    fn kind(&self) -> &str {
        ""
    }
}

/// `%level`
#[derive(Debug, Clone, Copy)]
pub struct LevelConverter;

impl Converter for LevelConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event.level().as_str().to_owned()
    }
}

/// `%thread`
#[derive(Debug, Clone, Copy)]
pub struct ThreadConverter;

impl Converter for ThreadConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event.thread_name().to_owned()
    }
}

/// `%msg`
#[derive(Debug, Clone, Copy)]
pub struct MessageConverter;

impl Converter for MessageConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event.message().to_owned()
    }
}

/// `%marker`
#[derive(Debug, Clone, Copy)]
pub struct MarkerConverter;

impl Converter for MarkerConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event.marker().unwrap_or_default().to_owned()
    }
}

/// `%logger{N}` 로거 이름 (N자 이내로 축약)
#[derive(Debug, Clone)]
pub struct LoggerConverter {
    option: Option<String>,
    target_length: Option<usize>,
}

impl LoggerConverter {
    /// 첫 번째 옵션을 목표 길이로 사용합니다.
    pub fn new(options: &[String]) -> Self {
        Self {
            option: options.first().cloned(),
            target_length: None,
        }
    }
}

impl Converter for LoggerConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        match self.target_length {
            Some(len) => abbreviate(event.logger_name(), len),
            None => event.logger_name().to_owned(),
        }
    }

    fn start(&mut self, _ctx: &ConverterContext) -> Result<(), String> {
        if let Some(option) = &self.option {
            let len = option
                .parse::<usize>()
                .map_err(|_| format!("logger length '{option}' is not a non-negative integer"))?;
            self.target_length = Some(len);
        }
        Ok(())
    }
}

/// 점으로 구분된 이름을 `target`자 이내로 축약합니다.
///
/// 앞쪽 세그먼트부터 첫 글자만 남기며, 마지막 세그먼트는 줄이지 않습니다.
/// `target`이 0이면 마지막 세그먼트만 반환합니다.
pub fn abbreviate(name: &str, target: usize) -> String {
    let segments: Vec<&str> = name.split('.').collect();
    let last = segments.last().copied().unwrap_or(name);
    if target == 0 {
        return last.to_owned();
    }
    if name.chars().count() <= target {
        return name.to_owned();
    }

    let mut parts: Vec<String> = segments.iter().map(|s| (*s).to_owned()).collect();
    let mut len = name.chars().count();
    let prefix_count = parts.len().saturating_sub(1);
    for part in parts.iter_mut().take(prefix_count) {
        if len <= target {
            break;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            len -= chars.count();
            *part = first.to_string();
        }
    }
    parts.join(".")
}

/// `%mdc{key}` 진단 컨텍스트
#[derive(Debug, Clone)]
pub struct MdcConverter {
    key: Option<String>,
}

impl MdcConverter {
    /// 첫 번째 옵션을 키로 사용합니다. 키가 없으면 전체 맵을 출력합니다.
    pub fn new(options: &[String]) -> Self {
        Self {
            key: options.first().cloned(),
        }
    }
}

impl Converter for MdcConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        match &self.key {
            Some(key) => event.mdc().get(key).cloned().unwrap_or_default(),
            None => event
                .mdc()
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// `%relative` 컨텍스트 생성 이후 경과 밀리초
#[derive(Debug, Clone, Default)]
pub struct RelativeTimeConverter {
    ctx: Option<ConverterContext>,
}

impl RelativeTimeConverter {
    /// 변환기를 생성합니다. 기준 시각은 시작 시 설정됩니다.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Converter for RelativeTimeConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        match &self.ctx {
            Some(ctx) => (event.timestamp() - ctx.birth_time)
                .num_milliseconds()
                .to_string(),
            None => String::new(),
        }
    }

    fn start(&mut self, ctx: &ConverterContext) -> Result<(), String> {
        self.ctx = Some(*ctx);
        Ok(())
    }
}

/// `%class` 호출자 클래스
#[derive(Debug, Clone, Copy)]
pub struct ClassOfCallerConverter;

impl Converter for ClassOfCallerConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event
            .caller_data()
            .map_or_else(|| NA.to_owned(), |c| c.class_name.clone())
    }
}

/// `%method` 호출자 메서드
#[derive(Debug, Clone, Copy)]
pub struct MethodOfCallerConverter;

impl Converter for MethodOfCallerConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event
            .caller_data()
            .map_or_else(|| NA.to_owned(), |c| c.method_name.clone())
    }
}

/// `%line` 호출자 줄 번호
#[derive(Debug, Clone, Copy)]
pub struct LineOfCallerConverter;

impl Converter for LineOfCallerConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event
            .caller_data()
            .and_then(|c| c.line_number)
            .map_or_else(|| NA.to_owned(), |line| line.to_string())
    }
}

/// `%file` 호출자 파일 이름
#[derive(Debug, Clone, Copy)]
pub struct FileOfCallerConverter;

impl Converter for FileOfCallerConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event
            .caller_data()
            .and_then(|c| c.file_name.clone())
            .unwrap_or_else(|| NA.to_owned())
    }
}

/// `%caller` 호출 위치 전체
#[derive(Debug, Clone, Copy)]
pub struct CallerDataConverter;

impl Converter for CallerDataConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        event
            .caller_data()
            .map_or_else(|| NA.to_owned(), ToString::to_string)
    }
}

/// `%ex{N|short|full}` 실패 정보를 셀 안에 출력
///
/// 줄 사이를 `<br />`로 잇기 때문에 직접 이스케이프합니다.
#[derive(Debug, Clone)]
pub struct ThrowableConverter {
    option: Option<String>,
    max_frames: usize,
}

impl ThrowableConverter {
    /// 첫 번째 옵션을 프레임 수 제한으로 사용합니다.
    pub fn new(options: &[String]) -> Self {
        Self {
            option: options.first().cloned(),
            max_frames: usize::MAX,
        }
    }

    fn push_throwable(&self, buf: &mut String, throwable: &ThrowableProxy) {
        for (depth, t) in throwable.cause_chain().enumerate() {
            if depth > 0 {
                buf.push_str("<br />Caused by: ");
            }
            push_escaped(buf, &t.summary());
            for frame in t.stack_trace.iter().take(self.max_frames) {
                buf.push_str("<br />&nbsp;&nbsp;&nbsp;&nbsp;at ");
                push_escaped(buf, frame);
            }
        }
        if throwable.is_chain_truncated() {
            buf.push_str("<br />");
            buf.push_str(crate::throwable::TRUNCATION_MARKER);
        }
    }
}

impl Converter for ThrowableConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        let mut buf = String::new();
        if let Some(throwable) = event.throwable() {
            self.push_throwable(&mut buf, throwable);
        }
        buf
    }

    fn escapes_markup(&self) -> bool {
        false
    }

    fn start(&mut self, _ctx: &ConverterContext) -> Result<(), String> {
        self.max_frames = match self.option.as_deref() {
            None | Some("full") => usize::MAX,
            Some("short") => 1,
            Some(other) => other
                .parse()
                .map_err(|_| format!("'{other}' is not a frame count, 'short' or 'full'"))?,
        };
        Ok(())
    }
}
