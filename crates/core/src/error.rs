//! 에러 타입: 도메인별 에러 정의

/// loglayout 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum LoglayoutError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 변환 패턴 에러
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// 레이아웃 생명주기 에러
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 변환 패턴 파싱 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// 변환 문법에 맞지 않는 패턴
    #[error("syntax error at offset {offset} near '{fragment}': {reason}")]
    Syntax {
        /// 문제가 된 지시자의 시작 위치 (바이트 오프셋)
        offset: usize,
        /// 문제가 된 패턴 조각
        fragment: String,
        /// 실패 사유
        reason: String,
    },
}

/// 레이아웃 생명주기 에러
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// 시작되지 않은 레이아웃 사용
    #[error("layout is not started")]
    NotStarted,

    /// 이미 시작된 레이아웃을 다시 시작
    #[error("layout is already started")]
    AlreadyStarted,

    /// 시작 실패
    #[error("layout start failed: {0}")]
    StartFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_syntax_display_contains_fragment() {
        let err = PatternError::Syntax {
            offset: 7,
            fragment: "%{".to_owned(),
            reason: "expected conversion word".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("offset 7"));
        assert!(msg.contains("%{"));
    }

    #[test]
    fn config_error_converts_to_top_level() {
        let err: LoglayoutError = ConfigError::InvalidValue {
            field: "layout.pattern".to_owned(),
            reason: "must not be empty".to_owned(),
        }
        .into();
        assert!(matches!(err, LoglayoutError::Config(_)));
        assert!(err.to_string().contains("layout.pattern"));
    }

    #[test]
    fn layout_error_display() {
        let err: LoglayoutError = LayoutError::NotStarted.into();
        assert_eq!(err.to_string(), "layout error: layout is not started");
    }
}
