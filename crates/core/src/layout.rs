//! 레이아웃 trait: 출력 형식 확장 포인트 정의
//!
//! 로깅 파이프라인의 출력 형식은 [`Layout`]을 구현하여 추가합니다.
//! 전달(appender) 쪽은 스트림 시작 시 [`Layout::header`], 이벤트마다
//! [`Layout::do_layout`], 스트림 종료 시 [`Layout::footer`]를 호출합니다.
//!
//! # 생명주기
//! ```text
//! 생성 → start() → 시작됨 → stop() → 정지됨
//!          └─ 실패 → 영구 미시작 (재구성 필요)
//! ```

use crate::error::LoglayoutError;
use crate::event::LoggingEvent;

/// 시작/정지 생명주기를 가진 구성 요소
pub trait LifeCycle {
    /// 구성 요소를 시작합니다. 실패하면 시작되지 않은 상태로 남습니다.
    fn start(&mut self) -> Result<(), LoglayoutError>;

    /// 구성 요소를 정지합니다.
    fn stop(&mut self) -> Result<(), LoglayoutError>;

    /// 시작된 상태인지 확인합니다.
    fn is_started(&self) -> bool;
}

/// 이벤트를 텍스트로 렌더링하는 레이아웃
///
/// 렌더링은 `&self`로 수행되므로, 내부 상태가 있는 레이아웃은
/// 직접 동기화해야 합니다. `Send + Sync` 바운드로 여러 전달 컨텍스트에서
/// 같은 인스턴스를 공유할 수 있습니다.
pub trait Layout: LifeCycle + Send + Sync {
    /// 출력 미디어 타입 (예: `"text/html"`)
    fn content_type(&self) -> &str;

    /// 스트림 시작 시 한 번 출력되는 텍스트
    fn header(&self) -> Result<String, LoglayoutError>;

    /// 이벤트 한 건을 렌더링합니다.
    fn do_layout(&self, event: &LoggingEvent) -> Result<String, LoglayoutError>;

    /// 스트림 종료 시 한 번 출력되는 텍스트
    fn footer(&self) -> Result<String, LoglayoutError>;
}
