//! HTML 레이아웃 에러 타입
//!
//! [`HtmlLayoutError`]는 레이아웃 시작과 렌더링 중 발생하는 모든 에러를 표현합니다.
//! `From<HtmlLayoutError> for LoglayoutError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use loglayout_core::error::{ConfigError, LayoutError, LoglayoutError, PatternError};

/// HTML 레이아웃 도메인 에러
///
/// 시작 시점 에러(패턴, 초기화, 설정)는 모두 치명적이며 레이아웃을
/// 영구적으로 미시작 상태로 남깁니다.
#[derive(Debug, thiserror::Error)]
pub enum HtmlLayoutError {
    /// 변환 패턴이 문법에 맞지 않거나 알 수 없는 변환 단어를 포함
    #[error("pattern syntax error at offset {offset} near '{fragment}': {reason}")]
    PatternSyntax {
        /// 문제가 된 지시자의 시작 위치 (바이트 오프셋)
        offset: usize,
        /// 문제가 된 패턴 조각
        fragment: String,
        /// 실패 사유
        reason: String,
    },

    /// 변환기 1회 초기화 실패
    #[error("converter '{converter}' failed to initialize: {reason}")]
    Initialization {
        /// 실패한 변환기 종류
        converter: String,
        /// 실패 사유
        reason: String,
    },

    /// 필수 협력 객체 누락 또는 잘못된 설정 값
    #[error("configuration error: {field}: {reason}")]
    Configuration {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 시작되지 않은 레이아웃 사용
    #[error("html layout is not started")]
    NotStarted,

    /// 이미 시작된 레이아웃을 다시 시작
    #[error("html layout is already started")]
    AlreadyStarted,

    /// 이전 시작이 실패한 레이아웃을 다시 시작
    #[error("html layout start was aborted earlier, rebuild the layout")]
    StartAborted,
}

impl From<PatternError> for HtmlLayoutError {
    fn from(err: PatternError) -> Self {
        match err {
            PatternError::Syntax {
                offset,
                fragment,
                reason,
            } => HtmlLayoutError::PatternSyntax {
                offset,
                fragment,
                reason,
            },
        }
    }
}

impl From<HtmlLayoutError> for LoglayoutError {
    fn from(err: HtmlLayoutError) -> Self {
        match err {
            HtmlLayoutError::PatternSyntax {
                offset,
                fragment,
                reason,
            } => LoglayoutError::Pattern(PatternError::Syntax {
                offset,
                fragment,
                reason,
            }),
            HtmlLayoutError::Configuration { field, reason } => {
                LoglayoutError::Config(ConfigError::InvalidValue { field, reason })
            }
            HtmlLayoutError::NotStarted => LoglayoutError::Layout(LayoutError::NotStarted),
            HtmlLayoutError::AlreadyStarted => LoglayoutError::Layout(LayoutError::AlreadyStarted),
            err @ (HtmlLayoutError::Initialization { .. } | HtmlLayoutError::StartAborted) => {
                LoglayoutError::Layout(LayoutError::StartFailed(err.to_string()))
            }
        }
    }
}
