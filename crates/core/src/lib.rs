#![doc = include_str!("../README.md")]

pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod metrics;
pub mod pattern;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, LayoutError, LoglayoutError, PatternError};

// 설정
pub use config::{GeneralConfig, LayoutConfig, LoglayoutConfig};

// 이벤트
pub use event::{CallerData, Level, LoggingEvent, ThrowableProxy};

// 레이아웃 trait
pub use layout::{Layout, LifeCycle};

// 패턴
pub use pattern::{FormatInfo, PatternNode, PatternParser};
