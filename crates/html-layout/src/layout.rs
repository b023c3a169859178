//! HTML 레이아웃 -- 행 렌더링, 페이지 분할, 생명주기
//!
//! [`HtmlLayout`]은 core의 [`Layout`] trait을 구현하여 다른 레이아웃과
//! 동일한 방식(header -> do_layout* -> footer)으로 사용됩니다.
//!
//! # 행 렌더링 순서
//! ```text
//! do_layout(event)
//!   ├─ [잠금] 행 수 >= 한도?  -> 0으로 초기화, 페이지 경계 표시
//!   │         홀짝 = 행 수 % 2, 행 수 += 1
//!   ├─ 페이지 경계면 </table> + 새 <table> + 헤더 행
//!   ├─ <tr class="{level} {even|odd}"> + 표시 열마다 <td>
//!   └─ 실패 정보가 있으면 ThrowableRenderer
//! ```
//!
//! 페이지 판단과 행 수 증가는 하나의 임계 구역에서 수행되므로 여러 실행
//! 컨텍스트가 같은 레이아웃을 공유해도 경계가 중복되거나 누락되지 않습니다.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use metrics::counter;
use tracing::{debug, info, warn};

use loglayout_core::error::LoglayoutError;
use loglayout_core::event::LoggingEvent;
use loglayout_core::layout::{Layout, LifeCycle};
use loglayout_core::metrics as m;

use crate::config::HtmlLayoutConfig;
use crate::converter::{Converter, ConverterChain, ConverterContext, ConverterRegistry};
use crate::css::{CssBuilder, DefaultCssBuilder, UrlCssBuilder};
use crate::error::HtmlLayoutError;
use crate::frame::FrameBuilder;
use crate::throwable::ThrowableRenderer;

/// HTML 레이아웃의 출력 미디어 타입
pub const CONTENT_TYPE: &str = "text/html";

/// 레이아웃 생명주기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutState {
    /// 생성됨, 아직 시작하지 않음
    Initialized,
    /// 렌더링 가능
    Started,
    /// 정지됨
    Stopped,
    /// 시작 실패 (재시작 불가)
    Failed,
}

/// 페이지 내 행 수. 레이아웃의 유일한 가변 상태입니다.
#[derive(Debug, Default)]
struct RenderState {
    counter: u64,
}

/// 한 행의 렌더링 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSlot {
    /// 행 앞에 페이지 경계를 출력해야 하는지
    paginate: bool,
    /// 홀수 행인지
    odd: bool,
}

impl RenderState {
    /// 페이지 경계 판단, 초기화, 홀짝 결정, 증가를 한 번에 수행합니다.
    fn advance(&mut self, row_limit: u64) -> RowSlot {
        let paginate = self.counter >= row_limit;
        if paginate {
            self.counter = 0;
        }
        let odd = self.counter & 1 == 1;
        self.counter += 1;
        RowSlot { paginate, odd }
    }
}

/// 로깅 이벤트를 HTML 테이블 행으로 렌더링하는 레이아웃
///
/// # 사용 예시
/// ```
/// use loglayout_core::event::{Level, LoggingEvent};
/// use loglayout_html::HtmlLayoutBuilder;
///
/// let mut layout = HtmlLayoutBuilder::new().pattern("%level%msg").row_limit(2).build()?;
/// layout.start()?;
///
/// let row = layout.do_layout(&LoggingEvent::new(Level::Info, "app", "hello"))?;
/// assert!(row.contains("<tr class=\"info even\">"));
/// # Ok::<(), loglayout_html::HtmlLayoutError>(())
/// ```
pub struct HtmlLayout {
    /// 레이아웃 설정
    config: HtmlLayoutConfig,
    /// 변환 단어 레지스트리
    registry: ConverterRegistry,
    /// 문서 틀 생성기
    frame: FrameBuilder,
    /// 실패 렌더러 (`None`이면 시작 실패)
    throwable_renderer: Option<Box<dyn ThrowableRenderer>>,
    /// `%relative` 기준 시각 (`None`이면 시작 시각)
    birth_time: Option<DateTime<Utc>>,
    /// 시작 시 컴파일된 변환기 체인
    chain: Option<ConverterChain>,
    /// 페이지 내 행 수
    render_state: Mutex<RenderState>,
    /// 현재 상태
    state: LayoutState,
}

impl HtmlLayout {
    /// 패턴을 컴파일하고 변환기를 초기화합니다.
    ///
    /// 실패하면 레이아웃은 영구적으로 시작할 수 없는 상태가 됩니다.
    pub fn start(&mut self) -> Result<(), HtmlLayoutError> {
        match self.state {
            LayoutState::Started => return Err(HtmlLayoutError::AlreadyStarted),
            LayoutState::Failed => return Err(HtmlLayoutError::StartAborted),
            LayoutState::Initialized | LayoutState::Stopped => {}
        }

        match self.try_start() {
            Ok(chain) => {
                info!(
                    pattern = self.config.pattern.as_str(),
                    columns = chain.visible_count(),
                    row_limit = self.config.row_limit,
                    "html layout started"
                );
                self.chain = Some(chain);
                self.reset_counter();
                self.state = LayoutState::Started;
                Ok(())
            }
            Err(e) => {
                warn!(pattern = self.config.pattern.as_str(), error = %e, "html layout failed to start");
                self.chain = None;
                self.state = LayoutState::Failed;
                Err(e)
            }
        }
    }

    fn try_start(&self) -> Result<ConverterChain, HtmlLayoutError> {
        if self.throwable_renderer.is_none() {
            return Err(HtmlLayoutError::Configuration {
                field: "throwable_renderer".to_owned(),
                reason: "throwable renderer cannot be null".to_owned(),
            });
        }

        let mut chain = ConverterChain::compile(&self.config.pattern, &self.registry)?;
        let ctx = ConverterContext::new(self.birth_time.unwrap_or_else(Utc::now));
        chain.start(&ctx)?;
        Ok(chain)
    }

    /// 레이아웃을 정지하고 체인과 행 수를 버립니다.
    pub fn stop(&mut self) -> Result<(), HtmlLayoutError> {
        if self.state != LayoutState::Started {
            return Err(HtmlLayoutError::NotStarted);
        }
        self.chain = None;
        self.reset_counter();
        self.state = LayoutState::Stopped;
        info!("html layout stopped");
        Ok(())
    }

    /// 렌더링 가능한 상태인지 확인합니다.
    pub fn is_started(&self) -> bool {
        self.state == LayoutState::Started
    }

    /// 현재 상태 이름
    pub fn state_name(&self) -> &str {
        match self.state {
            LayoutState::Initialized => "initialized",
            LayoutState::Started => "started",
            LayoutState::Stopped => "stopped",
            LayoutState::Failed => "failed",
        }
    }

    /// 출력 미디어 타입 (`text/html`)
    pub fn content_type(&self) -> &str {
        CONTENT_TYPE
    }

    /// 레이아웃 설정
    pub fn config(&self) -> &HtmlLayoutConfig {
        &self.config
    }

    /// 시작된 경우 컴파일된 체인
    pub fn chain(&self) -> Option<&ConverterChain> {
        self.chain.as_ref()
    }

    /// 헤더 행의 열 이름 (시작 전에는 비어 있음)
    pub fn column_names(&self) -> Vec<&str> {
        self.chain
            .as_ref()
            .map(ConverterChain::column_names)
            .unwrap_or_default()
    }

    /// 현재 페이지에 렌더링된 행 수
    pub fn rows_in_page(&self) -> u64 {
        self.render_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .counter
    }

    /// 실패 렌더러를 교체합니다. `None`이면 다음 시작이 실패합니다.
    pub fn set_throwable_renderer(&mut self, renderer: Option<Box<dyn ThrowableRenderer>>) {
        self.throwable_renderer = renderer;
    }

    /// 문서 시작 텍스트 (프리앰블 + 첫 헤더 행)
    pub fn header(&self) -> Result<String, HtmlLayoutError> {
        let chain = self.started_chain()?;
        Ok(self.frame.preamble(chain, Utc::now()))
    }

    /// 이벤트 한 건을 행으로 렌더링합니다.
    pub fn do_layout(&self, event: &LoggingEvent) -> Result<String, HtmlLayoutError> {
        let chain = self.started_chain()?;

        let slot = self
            .render_state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .advance(self.config.effective_row_limit());

        let mut buf = String::with_capacity(256);
        if slot.paginate {
            FrameBuilder::table_break(&mut buf, chain);
            counter!(m::HTML_PAGES_TOTAL).increment(1);
            debug!(row_limit = self.config.row_limit, "html layout page boundary");
        }

        let level = event.level().as_lowercase();
        buf.push_str("\n<tr class=\"");
        buf.push_str(level);
        buf.push_str(if slot.odd { " odd\">\n" } else { " even\">\n" });

        for node in chain.nodes() {
            match node.html_name() {
                Some(name) => {
                    buf.push_str("<td class=\"");
                    buf.push_str(name);
                    buf.push_str("\">");
                    node.write(&mut buf, event);
                    buf.push_str("</td>\n");
                }
                None => node.write(&mut buf, event),
            }
        }
        buf.push_str("</tr>\n");
        counter!(m::HTML_ROWS_RENDERED_TOTAL, m::LABEL_LEVEL => level).increment(1);

        if let (Some(_), Some(renderer)) = (event.throwable(), &self.throwable_renderer) {
            renderer.render(&mut buf, event);
            counter!(m::HTML_THROWABLES_RENDERED_TOTAL).increment(1);
        }

        Ok(buf)
    }

    /// 문서 끝 텍스트
    pub fn footer(&self) -> Result<String, HtmlLayoutError> {
        self.started_chain()?;
        Ok(FrameBuilder::postamble())
    }

    fn started_chain(&self) -> Result<&ConverterChain, HtmlLayoutError> {
        match (&self.state, &self.chain) {
            (LayoutState::Started, Some(chain)) => Ok(chain),
            _ => Err(HtmlLayoutError::NotStarted),
        }
    }

    fn reset_counter(&mut self) {
        self.render_state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .counter = 0;
    }
}

impl std::fmt::Debug for HtmlLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlLayout")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

impl LifeCycle for HtmlLayout {
    fn start(&mut self) -> Result<(), LoglayoutError> {
        HtmlLayout::start(self).map_err(LoglayoutError::from)
    }

    fn stop(&mut self) -> Result<(), LoglayoutError> {
        HtmlLayout::stop(self).map_err(LoglayoutError::from)
    }

    fn is_started(&self) -> bool {
        HtmlLayout::is_started(self)
    }
}

impl Layout for HtmlLayout {
    fn content_type(&self) -> &str {
        CONTENT_TYPE
    }

    fn header(&self) -> Result<String, LoglayoutError> {
        HtmlLayout::header(self).map_err(LoglayoutError::from)
    }

    fn do_layout(&self, event: &LoggingEvent) -> Result<String, LoglayoutError> {
        HtmlLayout::do_layout(self, event).map_err(LoglayoutError::from)
    }

    fn footer(&self) -> Result<String, LoglayoutError> {
        HtmlLayout::footer(self).map_err(LoglayoutError::from)
    }
}

/// HTML 레이아웃 빌더
///
/// 설정 필드와 협력 객체(스타일, 실패 렌더러, 변환 단어)를 지정합니다.
pub struct HtmlLayoutBuilder {
    config: HtmlLayoutConfig,
    registry: ConverterRegistry,
    css_builder: Option<Box<dyn CssBuilder>>,
    throwable_renderer: Option<Box<dyn ThrowableRenderer>>,
    birth_time: Option<DateTime<Utc>>,
}

impl HtmlLayoutBuilder {
    /// 기본 설정과 기본 변환 단어로 빌더를 생성합니다.
    pub fn new() -> Self {
        Self {
            config: HtmlLayoutConfig::default(),
            registry: ConverterRegistry::with_defaults(),
            css_builder: None,
            throwable_renderer: None,
            birth_time: None,
        }
    }

    /// 레이아웃 설정 전체를 지정합니다.
    pub fn config(mut self, config: HtmlLayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// 변환 패턴을 설정합니다.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.pattern = pattern.into();
        self
    }

    /// 문서 제목을 설정합니다.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// 페이지당 최대 행 수를 설정합니다.
    pub fn row_limit(mut self, row_limit: usize) -> Self {
        self.config.row_limit = row_limit;
        self
    }

    /// 외부 스타일 시트 URL을 설정합니다.
    pub fn css_url(mut self, url: impl Into<String>) -> Self {
        self.config.css_url = Some(url.into());
        self
    }

    /// 스타일 생성기를 지정합니다. `css_url`보다 우선합니다.
    pub fn css_builder(mut self, builder: impl CssBuilder + 'static) -> Self {
        self.css_builder = Some(Box::new(builder));
        self
    }

    /// 실패 렌더러를 지정합니다. 설정의 렌더러 종류보다 우선합니다.
    pub fn throwable_renderer(mut self, renderer: impl ThrowableRenderer + 'static) -> Self {
        self.throwable_renderer = Some(Box::new(renderer));
        self
    }

    /// 변환 단어를 추가하거나 교체합니다.
    pub fn conversion_rule<F>(mut self, word: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&[String]) -> Box<dyn Converter> + Send + Sync + 'static,
    {
        self.registry.register(word, factory);
        self
    }

    /// `%relative`의 기준 시각을 지정합니다. 지정하지 않으면 시작 시각입니다.
    pub fn birth_time(mut self, birth_time: DateTime<Utc>) -> Self {
        self.birth_time = Some(birth_time);
        self
    }

    /// 설정을 검증하고 시작 전 상태의 레이아웃을 생성합니다.
    pub fn build(self) -> Result<HtmlLayout, HtmlLayoutError> {
        self.config.validate()?;

        let css: Box<dyn CssBuilder> = match (self.css_builder, &self.config.css_url) {
            (Some(builder), _) => builder,
            (None, Some(url)) => Box::new(UrlCssBuilder::new(url.clone())),
            (None, None) => Box::new(DefaultCssBuilder),
        };
        let throwable_renderer = self
            .throwable_renderer
            .unwrap_or_else(|| self.config.throwable_renderer.into_renderer());

        Ok(HtmlLayout {
            frame: FrameBuilder::new(self.config.title.clone(), css),
            config: self.config,
            registry: self.registry,
            throwable_renderer: Some(throwable_renderer),
            birth_time: self.birth_time,
            chain: None,
            render_state: Mutex::new(RenderState::default()),
            state: LayoutState::Initialized,
        })
    }
}

impl Default for HtmlLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}
