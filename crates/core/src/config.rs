//! 설정 관리: loglayout.toml 파싱 및 런타임 설정
//!
//! [`LoglayoutConfig`]는 모든 구성 요소의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`LOGLAYOUT_LAYOUT_ROW_LIMIT=500` 형식)
//! 3. 설정 파일 (`loglayout.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), loglayout_core::error::LoglayoutError> {
//! use loglayout_core::config::LoglayoutConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = LoglayoutConfig::load("loglayout.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = LoglayoutConfig::parse("[layout]\ntitle = \"Audit\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LoglayoutError};

/// 기본 변환 패턴
pub const DEFAULT_CONVERSION_PATTERN: &str = "%date%thread%level%logger%mdc%msg";

/// 기본 문서 제목
pub const DEFAULT_TITLE: &str = "Log Messages";

/// 기본 페이지당 행 수
pub const DEFAULT_ROW_LIMIT: usize = 10_000;

/// 알려진 실패 렌더러 이름
pub const THROWABLE_RENDERER_NAMES: &[&str] = &["default", "nop"];

/// loglayout 통합 설정
///
/// `loglayout.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoglayoutConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 레이아웃 설정
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl LoglayoutConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LoglayoutError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, LoglayoutError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoglayoutError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                LoglayoutError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, LoglayoutError> {
        toml::from_str(toml_str).map_err(|e| {
            LoglayoutError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `LOGLAYOUT_{SECTION}_{FIELD}`
    /// 예: `LOGLAYOUT_LAYOUT_TITLE=Audit`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "LOGLAYOUT_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "LOGLAYOUT_GENERAL_LOG_FORMAT");

        // Layout
        override_string(&mut self.layout.pattern, "LOGLAYOUT_LAYOUT_PATTERN");
        override_string(&mut self.layout.title, "LOGLAYOUT_LAYOUT_TITLE");
        override_usize(&mut self.layout.row_limit, "LOGLAYOUT_LAYOUT_ROW_LIMIT");
        override_string(&mut self.layout.css_url, "LOGLAYOUT_LAYOUT_CSS_URL");
        override_string(
            &mut self.layout.throwable_renderer,
            "LOGLAYOUT_LAYOUT_THROWABLE_RENDERER",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LoglayoutError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        self.layout.validate()
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 레이아웃 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// 변환 패턴
    pub pattern: String,
    /// 문서 제목
    pub title: String,
    /// 페이지당 최대 행 수 (0은 1로 취급)
    pub row_limit: usize,
    /// 외부 스타일시트 URL (비어 있으면 내장 스타일 사용)
    pub css_url: String,
    /// 실패 렌더러 (default, nop)
    pub throwable_renderer: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_CONVERSION_PATTERN.to_owned(),
            title: DEFAULT_TITLE.to_owned(),
            row_limit: DEFAULT_ROW_LIMIT,
            css_url: String::new(),
            throwable_renderer: "default".to_owned(),
        }
    }
}

impl LayoutConfig {
    /// 레이아웃 섹션을 검증합니다.
    ///
    /// 패턴 문법 자체는 레이아웃 시작 시 검증됩니다.
    pub fn validate(&self) -> Result<(), LoglayoutError> {
        if self.pattern.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "layout.pattern".to_owned(),
                reason: "pattern must not be empty".to_owned(),
            }
            .into());
        }

        if self.throwable_renderer.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "layout.throwable_renderer".to_owned(),
                reason: "throwable renderer cannot be empty".to_owned(),
            }
            .into());
        }

        if !THROWABLE_RENDERER_NAMES.contains(&self.throwable_renderer.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "layout.throwable_renderer".to_owned(),
                reason: format!("must be one of: {}", THROWABLE_RENDERER_NAMES.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}
