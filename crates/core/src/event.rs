//! 로깅 이벤트: 레이아웃이 읽는 불변 레코드
//!
//! [`LoggingEvent`]는 레이아웃이 한 번의 렌더 호출마다 받는 읽기 전용 레코드입니다.
//! 레이아웃과 변환기는 접근자만 사용하며 이벤트를 절대 변경하지 않습니다.
//!
//! JSON lines 입력을 위해 `serde`로 역직렬화할 수 있습니다.
//!
//! ```
//! use loglayout_core::event::{Level, LoggingEvent};
//!
//! let line = r#"{"level":"WARN","logger_name":"app.db","message":"slow query"}"#;
//! let event: LoggingEvent = serde_json::from_str(line).unwrap();
//! assert_eq!(event.level(), Level::Warn);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// cause 체인 순회 최대 깊이
///
/// 이 깊이를 넘는 체인은 잘린 것으로 취급합니다.
pub const MAX_CAUSE_DEPTH: usize = 32;

/// 로그 심각도 레벨
///
/// `Ord` 구현으로 비교가 가능합니다 (`Trace < Debug < Info < Warn < Error`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// 가장 상세한 추적 로그
    Trace,
    /// 디버그 로그
    Debug,
    /// 일반 정보
    #[default]
    Info,
    /// 경고
    Warn,
    /// 오류
    Error,
}

impl Level {
    /// 대문자 레벨 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// 소문자 레벨 이름을 반환합니다 (스타일 클래스, 메트릭 레이블용).
    pub fn as_lowercase(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// 문자열에서 레벨을 파싱합니다.
    ///
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 로그 호출 위치 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerData {
    /// 호출한 타입(클래스/모듈) 이름
    pub class_name: String,
    /// 호출한 함수 이름
    pub method_name: String,
    /// 소스 파일명
    #[serde(default)]
    pub file_name: Option<String>,
    /// 소스 라인 번호
    #[serde(default)]
    pub line_number: Option<u32>,
}

impl fmt::Display for CallerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.class_name, self.method_name)?;
        match (&self.file_name, self.line_number) {
            (Some(file), Some(line)) => write!(f, "{file}:{line})"),
            (Some(file), None) => write!(f, "{file})"),
            _ => write!(f, "Unknown Source)"),
        }
    }
}

/// 이벤트에 첨부된 실패(예외) 정보
///
/// `cause`로 원인 체인을 표현합니다. 체인 순회는 항상
/// [`MAX_CAUSE_DEPTH`]로 제한됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrowableProxy {
    /// 실패 타입 이름
    pub class_name: String,
    /// 실패 메시지
    #[serde(default)]
    pub message: Option<String>,
    /// 스택 프레임 (한 줄에 하나)
    #[serde(default)]
    pub stack_trace: Vec<String>,
    /// 원인
    #[serde(default)]
    pub cause: Option<Box<ThrowableProxy>>,
}

impl ThrowableProxy {
    /// 새 실패 정보를 생성합니다.
    pub fn new(class_name: impl Into<String>, message: Option<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message,
            stack_trace: Vec::new(),
            cause: None,
        }
    }

    /// 스택 프레임을 추가합니다.
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack_trace.push(frame.into());
        self
    }

    /// 원인을 설정합니다.
    pub fn with_cause(mut self, cause: ThrowableProxy) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// `class: message` 형식의 한 줄 요약을 반환합니다.
    pub fn summary(&self) -> String {
        match &self.message {
            Some(msg) => format!("{}: {}", self.class_name, msg),
            None => self.class_name.clone(),
        }
    }

    /// 자신부터 시작하는 cause 체인을 순회합니다.
    ///
    /// 최대 [`MAX_CAUSE_DEPTH`]개까지만 반환합니다.
    pub fn cause_chain(&self) -> CauseChain<'_> {
        CauseChain {
            next: Some(self),
            remaining: MAX_CAUSE_DEPTH,
        }
    }

    /// cause 체인이 [`MAX_CAUSE_DEPTH`]보다 깊은지 확인합니다.
    pub fn is_chain_truncated(&self) -> bool {
        let mut current = Some(self);
        let mut depth = 0;
        while let Some(t) = current {
            depth += 1;
            if depth > MAX_CAUSE_DEPTH {
                return true;
            }
            current = t.cause.as_deref();
        }
        false
    }
}

impl fmt::Display for ThrowableProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// [`ThrowableProxy::cause_chain`] 반복자
pub struct CauseChain<'a> {
    next: Option<&'a ThrowableProxy>,
    remaining: usize,
}

impl<'a> Iterator for CauseChain<'a> {
    type Item = &'a ThrowableProxy;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = current.cause.as_deref();
        Some(current)
    }
}

/// 로깅 이벤트
///
/// 레이아웃이 렌더링하는 한 건의 로그 레코드입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingEvent {
    /// 이벤트 발생 시각
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// 심각도
    #[serde(default)]
    pub level: Level,
    /// 로거 이름 (점으로 구분된 계층)
    #[serde(default)]
    pub logger_name: String,
    /// 스레드 이름
    #[serde(default)]
    pub thread_name: String,
    /// 포맷된 메시지
    #[serde(default)]
    pub message: String,
    /// 진단 컨텍스트 (MDC)
    #[serde(default)]
    pub mdc: BTreeMap<String, String>,
    /// 첨부된 실패 정보
    #[serde(default)]
    pub throwable: Option<ThrowableProxy>,
    /// 호출 위치
    #[serde(default)]
    pub caller_data: Option<CallerData>,
    /// 마커
    #[serde(default)]
    pub marker: Option<String>,
}

impl LoggingEvent {
    /// 현재 시각, 스레드 `main`으로 새 이벤트를 생성합니다.
    pub fn new(level: Level, logger_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger_name: logger_name.into(),
            thread_name: "main".to_owned(),
            message: message.into(),
            mdc: BTreeMap::new(),
            throwable: None,
            caller_data: None,
            marker: None,
        }
    }

    /// 발생 시각을 설정합니다.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// 스레드 이름을 설정합니다.
    pub fn with_thread(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = thread_name.into();
        self
    }

    /// MDC 항목을 추가합니다.
    pub fn with_mdc(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.mdc.insert(key.into(), value.into());
        self
    }

    /// 실패 정보를 첨부합니다.
    pub fn with_throwable(mut self, throwable: ThrowableProxy) -> Self {
        self.throwable = Some(throwable);
        self
    }

    /// 호출 위치를 설정합니다.
    pub fn with_caller(mut self, caller: CallerData) -> Self {
        self.caller_data = Some(caller);
        self
    }

    /// 마커를 설정합니다.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn mdc(&self) -> &BTreeMap<String, String> {
        &self.mdc
    }

    pub fn throwable(&self) -> Option<&ThrowableProxy> {
        self.throwable.as_ref()
    }

    pub fn caller_data(&self) -> Option<&CallerData> {
        self.caller_data.as_ref()
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

impl fmt::Display for LoggingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.level, self.thread_name, self.logger_name, self.message,
        )
    }
}
