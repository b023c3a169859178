//! 변환기 -- 이벤트에서 필드 하나를 꺼내 텍스트로 바꾸는 단위
//!
//! 패턴의 변환 단어 하나가 [`Converter`] 하나가 됩니다. 컴파일된 변환기들은
//! [`ConverterChain`]에 패턴 순서대로 담기며, 레이아웃이 시작될 때 체인 순서대로
//! 한 번씩 [`Converter::start`]가 호출됩니다. 시작 이후 변환기는 변경되지 않습니다.
//!
//! # 새 변환기 추가하기
//! ```ignore
//! struct RequestIdConverter;
//!
//! impl Converter for RequestIdConverter {
//!     fn convert(&self, event: &LoggingEvent) -> String {
//!         event.mdc().get("request_id").cloned().unwrap_or_default()
//!     }
//! }
//!
//! // 열 이름은 타입 이름에서 계산됩니다: "RequestId"
//! registry.register("rid", |_options| Box::new(RequestIdConverter));
//! ```

mod builtin;
mod chain;
mod date;
mod registry;

pub use builtin::{
    CallerDataConverter, ClassOfCallerConverter, FileOfCallerConverter, LevelConverter,
    LineOfCallerConverter, LineSeparatorConverter, LiteralConverter, LoggerConverter,
    MarkerConverter, MdcConverter, MessageConverter, MethodOfCallerConverter,
    RelativeTimeConverter, ThreadConverter, ThrowableConverter,
};
pub use chain::{ConverterChain, ConverterNode};
pub use date::DateConverter;
pub use registry::{ConverterFactory, ConverterRegistry};

use chrono::{DateTime, Utc};
use loglayout_core::event::LoggingEvent;

use crate::namer;

/// 변환기 시작 시 전달되는 컨텍스트
#[derive(Debug, Clone, Copy)]
pub struct ConverterContext {
    /// 레이아웃 컨텍스트 생성 시각 (`%relative` 기준점)
    pub birth_time: DateTime<Utc>,
}

impl ConverterContext {
    /// 기준 시각으로 컨텍스트를 생성합니다.
    pub fn new(birth_time: DateTime<Utc>) -> Self {
        Self { birth_time }
    }
}

/// 이벤트 필드 추출기
///
/// 렌더링은 `&self`로 수행되므로 여러 실행 컨텍스트에서 같은 체인을
/// 공유할 수 있습니다. 필드를 꺼낼 수 없는 이벤트에서는 에러 대신
/// 빈 문자열이나 대체 텍스트를 반환해야 합니다.
pub trait Converter: Send + Sync {
    /// 이벤트에서 필드를 꺼내 텍스트로 반환합니다.
    fn convert(&self, event: &LoggingEvent) -> String;

    /// 변환기 종류 이름
    ///
    /// 기본 구현은 구체 타입 이름(`LevelConverter`)입니다.
    /// 빈 문자열을 반환하면 열을 만들지 않는 변환기가 됩니다.
    fn kind(&self) -> &str {
        namer::short_type_name(std::any::type_name::<Self>())
    }

    /// `true`면 체인이 출력 텍스트를 HTML 이스케이프합니다.
    ///
    /// 직접 마크업을 만드는 변환기는 `false`를 반환하고 스스로 이스케이프해야 합니다.
    fn escapes_markup(&self) -> bool {
        true
    }

    /// 첫 렌더링 전 1회 초기화. 실패 사유를 반환하면 레이아웃 시작이 중단됩니다.
    fn start(&mut self, _ctx: &ConverterContext) -> Result<(), String> {
        Ok(())
    }
}
