#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`converter`]: 변환기 trait, 기본 변환기, 변환 단어 레지스트리, 체인 컴파일러
//! - [`namer`]: 변환기 타입 이름에서 열 이름 계산
//! - [`layout`]: 행 렌더링, 페이지 분할, 생명주기 ([`Layout`](loglayout_core::layout::Layout) 구현)
//! - [`frame`]: 문서 프리앰블/포스트앰블, 헤더 행, 페이지 경계
//! - [`throwable`]: 실패 정보 렌더러 (기본, 무동작, 사용자 정의)
//! - [`css`]: 내장 스타일 블록 또는 외부 스타일 시트 링크
//! - [`config`]: 레이아웃 설정 (core 설정 확장)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! start():     pattern -> PatternParser -> ConverterChain::compile -> Converter::start (순서대로)
//! header():    FrameBuilder::preamble
//! do_layout(): RenderState(잠금) -> [table_break] -> <tr> + <td>* -> [ThrowableRenderer]
//! footer():    FrameBuilder::postamble
//! ```

pub mod config;
pub mod converter;
pub mod css;
pub mod error;
pub mod escape;
pub mod frame;
pub mod layout;
pub mod namer;
pub mod throwable;

// --- 주요 타입 re-export ---

// 레이아웃
pub use layout::{HtmlLayout, HtmlLayoutBuilder};

// 설정
pub use config::{HtmlLayoutConfig, ThrowableRendererKind};

// 에러
pub use error::HtmlLayoutError;

// 변환기
pub use converter::{Converter, ConverterChain, ConverterContext, ConverterRegistry};

// 협력 객체
pub use css::{CssBuilder, DefaultCssBuilder, UrlCssBuilder};
pub use throwable::{DefaultThrowableRenderer, NopThrowableRenderer, ThrowableRenderer};
