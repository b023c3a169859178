//! HTML 레이아웃 설정
//!
//! [`HtmlLayoutConfig`]는 core의 [`LayoutConfig`](loglayout_core::config::LayoutConfig)를
//! 기반으로 HTML 레이아웃 전용 설정을 제공합니다.
//!
//! # 사용 예시
//! ```
//! use loglayout_core::config::LoglayoutConfig;
//! use loglayout_html::config::HtmlLayoutConfig;
//!
//! let core_config = LoglayoutConfig::default();
//! let config = HtmlLayoutConfig::from_core(&core_config.layout)?;
//! assert_eq!(config.row_limit, 10_000);
//! # Ok::<(), loglayout_html::HtmlLayoutError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use loglayout_core::config::{DEFAULT_CONVERSION_PATTERN, DEFAULT_ROW_LIMIT, DEFAULT_TITLE};

use crate::error::HtmlLayoutError;
use crate::throwable::{DefaultThrowableRenderer, NopThrowableRenderer, ThrowableRenderer};

/// 설정 파일로 고를 수 있는 실패 렌더러
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThrowableRendererKind {
    /// [`DefaultThrowableRenderer`] (기본값)
    #[default]
    Default,
    /// [`NopThrowableRenderer`]
    Nop,
}

impl ThrowableRendererKind {
    /// 설정 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Nop => "nop",
        }
    }

    /// 렌더러 인스턴스를 생성합니다.
    pub fn into_renderer(self) -> Box<dyn ThrowableRenderer> {
        match self {
            Self::Default => Box::new(DefaultThrowableRenderer::new()),
            Self::Nop => Box::new(NopThrowableRenderer),
        }
    }
}

impl fmt::Display for ThrowableRendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThrowableRendererKind {
    type Err = HtmlLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "nop" => Ok(Self::Nop),
            "" => Err(HtmlLayoutError::Configuration {
                field: "throwable_renderer".to_owned(),
                reason: "throwable renderer cannot be empty".to_owned(),
            }),
            other => Err(HtmlLayoutError::Configuration {
                field: "throwable_renderer".to_owned(),
                reason: format!("unknown throwable renderer '{other}', expected default or nop"),
            }),
        }
    }
}

/// HTML 레이아웃 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlLayoutConfig {
    /// 변환 패턴
    pub pattern: String,
    /// 문서 제목 (출력 시 이스케이프)
    pub title: String,
    /// 페이지당 최대 행 수 (0은 1로 취급)
    pub row_limit: usize,
    /// 외부 스타일 시트 URL (`None`이면 내장 스타일)
    pub css_url: Option<String>,
    /// 실패 렌더러
    pub throwable_renderer: ThrowableRendererKind,
}

impl Default for HtmlLayoutConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_CONVERSION_PATTERN.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            row_limit: DEFAULT_ROW_LIMIT,
            css_url: None,
            throwable_renderer: ThrowableRendererKind::Default,
        }
    }
}

impl HtmlLayoutConfig {
    /// core의 `LayoutConfig`에서 HTML 레이아웃 설정을 생성합니다.
    ///
    /// 빈 `css_url`은 내장 스타일을 뜻합니다.
    pub fn from_core(core: &loglayout_core::config::LayoutConfig) -> Result<Self, HtmlLayoutError> {
        let config = Self {
            pattern: core.pattern.clone(),
            title: core.title.clone(),
            row_limit: core.row_limit,
            css_url: (!core.css_url.is_empty()).then(|| core.css_url.clone()),
            throwable_renderer: core.throwable_renderer.parse()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// 페이지 분할 기준 행 수 (최소 1)
    pub fn effective_row_limit(&self) -> u64 {
        self.row_limit.max(1) as u64
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 패턴 문법은 레이아웃 시작 시 컴파일하면서 검증합니다.
    pub fn validate(&self) -> Result<(), HtmlLayoutError> {
        if self.css_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            return Err(HtmlLayoutError::Configuration {
                field: "css_url".to_owned(),
                reason: "stylesheet url must not be blank".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loglayout_core::config::LayoutConfig;

    #[test]
    fn default_config_is_valid() {
        let config = HtmlLayoutConfig::default();
        config.validate().unwrap();
        assert_eq!(config.pattern, "%date%thread%level%logger%mdc%msg");
        assert_eq!(config.title, "Log Messages");
        assert_eq!(config.row_limit, 10_000);
    }

    #[test]
    fn from_core_preserves_values() {
        let core = LayoutConfig {
            pattern: "%level%msg".to_owned(),
            row_limit: 2,
            css_url: "https://example.com/a.css".to_owned(),
            throwable_renderer: "nop".to_owned(),
            ..Default::default()
        };
        let config = HtmlLayoutConfig::from_core(&core).unwrap();
        assert_eq!(config.pattern, "%level%msg");
        assert_eq!(config.row_limit, 2);
        assert_eq!(config.css_url.as_deref(), Some("https://example.com/a.css"));
        assert_eq!(config.throwable_renderer, ThrowableRendererKind::Nop);
    }

    #[test]
    fn empty_css_url_means_embedded() {
        let config = HtmlLayoutConfig::from_core(&LayoutConfig::default()).unwrap();
        assert!(config.css_url.is_none());
    }

    #[test]
    fn empty_renderer_name_is_configuration_error() {
        let core = LayoutConfig {
            throwable_renderer: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            HtmlLayoutConfig::from_core(&core),
            Err(HtmlLayoutError::Configuration { ref field, .. }) if field == "throwable_renderer"
        ));
    }

    #[test]
    fn unknown_renderer_name_is_configuration_error() {
        assert!("fancy".parse::<ThrowableRendererKind>().is_err());
    }

    #[test]
    fn renderer_kind_round_trips_names() {
        for kind in [ThrowableRendererKind::Default, ThrowableRendererKind::Nop] {
            assert_eq!(kind.as_str().parse::<ThrowableRendererKind>().unwrap(), kind);
        }
    }

    #[test]
    fn effective_row_limit_is_at_least_one() {
        let mut config = HtmlLayoutConfig::default();
        config.row_limit = 0;
        assert_eq!(config.effective_row_limit(), 1);
        config.row_limit = 1;
        assert_eq!(config.effective_row_limit(), 1);
        config.row_limit = 7;
        assert_eq!(config.effective_row_limit(), 7);
    }

    #[test]
    fn blank_css_url_is_rejected() {
        let config = HtmlLayoutConfig {
            css_url: Some("  ".to_owned()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
