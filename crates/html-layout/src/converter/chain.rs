//! 변환기 체인 컴파일러
//!
//! 패턴 문자열 -> [`PatternNode`] 목록 -> [`ConverterNode`] 목록.
//! 체인의 길이와 순서는 컴파일 후 바뀌지 않습니다.

use loglayout_core::event::LoggingEvent;
use loglayout_core::pattern::{FormatInfo, PatternNode, PatternParser};

use super::{Converter, ConverterContext, ConverterRegistry, LiteralConverter};
use crate::error::HtmlLayoutError;
use crate::escape::{escape_html, push_escaped};
use crate::namer;

/// 체인의 노드 하나
///
/// 열 이름과 그 이스케이프 형태는 컴파일 시 한 번 계산되어 캐시됩니다.
pub struct ConverterNode {
    converter: Box<dyn Converter>,
    format: Option<FormatInfo>,
    display_name: Option<String>,
    html_name: Option<String>,
}

impl ConverterNode {
    /// 변환기로 노드를 생성합니다.
    pub fn new(converter: Box<dyn Converter>, format: Option<FormatInfo>) -> Self {
        let display_name = namer::display_name(converter.kind());
        let html_name = display_name
            .as_deref()
            .map(|name| escape_html(name).into_owned());
        Self {
            converter,
            format,
            display_name,
            html_name,
        }
    }

    /// 열 이름. `None`이면 셀을 만들지 않는 노드입니다.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// 마크업에 넣을 수 있게 이스케이프한 열 이름
    ///
    /// 헤더 셀의 텍스트와 `class` 속성, 본문 셀의 `class` 속성에 씁니다.
    pub fn html_name(&self) -> Option<&str> {
        self.html_name.as_deref()
    }

    /// 헤더와 본문에 셀을 갖는 노드인지 확인합니다.
    pub fn is_visible(&self) -> bool {
        self.display_name.is_some()
    }

    /// 변환기 종류 이름
    pub fn kind(&self) -> &str {
        self.converter.kind()
    }

    /// 이벤트 필드를 꺼내 포맷 수정자와 이스케이프를 적용해 버퍼에 씁니다.
    ///
    /// 마크업을 직접 만드는 변환기(`escapes_markup() == false`)에는 포맷
    /// 수정자를 적용하지 않습니다. 잘라내기가 태그나 엔티티를 끊기 때문입니다.
    pub fn write(&self, buf: &mut String, event: &LoggingEvent) {
        let value = self.converter.convert(event);

        if !self.converter.escapes_markup() {
            buf.push_str(&value);
            return;
        }

        match &self.format {
            Some(format) => {
                let mut padded = String::with_capacity(value.len().max(format.min_width));
                format.apply(&mut padded, &value);
                push_escaped(buf, &padded);
            }
            None => push_escaped(buf, &value),
        }
    }
}

impl std::fmt::Debug for ConverterNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterNode")
            .field("kind", &self.converter.kind())
            .field("format", &self.format)
            .field("display_name", &self.display_name)
            .finish()
    }
}

/// 컴파일된 변환기 체인
#[derive(Debug, Default)]
pub struct ConverterChain {
    nodes: Vec<ConverterNode>,
}

impl ConverterChain {
    /// 패턴을 파싱하고 레지스트리로 변환기 체인을 만듭니다.
    ///
    /// 문법 에러와 등록되지 않은 변환 단어는 모두
    /// [`HtmlLayoutError::PatternSyntax`]가 됩니다.
    pub fn compile(pattern: &str, registry: &ConverterRegistry) -> Result<Self, HtmlLayoutError> {
        let parsed = PatternParser::new(pattern).parse()?;

        let mut nodes = Vec::with_capacity(parsed.len());
        for node in parsed {
            match node {
                PatternNode::Literal(text) => {
                    nodes.push(ConverterNode::new(Box::new(LiteralConverter::new(text)), None));
                }
                PatternNode::Keyword {
                    name,
                    options,
                    format,
                    offset,
                } => {
                    let converter = registry.create(&name, &options).ok_or_else(|| {
                        HtmlLayoutError::PatternSyntax {
                            offset,
                            fragment: format!("%{name}"),
                            reason: format!("unknown conversion word '{name}'"),
                        }
                    })?;
                    nodes.push(ConverterNode::new(converter, format));
                }
            }
        }

        Ok(Self { nodes })
    }

    /// 체인 순서대로 각 변환기를 한 번씩 시작합니다.
    ///
    /// 첫 실패에서 멈추고 해당 변환기 종류를 담은
    /// [`HtmlLayoutError::Initialization`]을 반환합니다.
    pub fn start(&mut self, ctx: &ConverterContext) -> Result<(), HtmlLayoutError> {
        for node in &mut self.nodes {
            node.converter
                .start(ctx)
                .map_err(|reason| HtmlLayoutError::Initialization {
                    converter: node.converter.kind().to_owned(),
                    reason,
                })?;
        }
        Ok(())
    }

    /// 전체 노드 (패턴 순서)
    pub fn nodes(&self) -> &[ConverterNode] {
        &self.nodes
    }

    /// 노드 수 (리터럴 포함)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// 노드가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 셀을 갖는 노드 수
    pub fn visible_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_visible()).count()
    }

    /// 셀을 갖는 노드의 열 이름 (패턴 순서)
    pub fn column_names(&self) -> Vec<&str> {
        self.nodes.iter().filter_map(ConverterNode::display_name).collect()
    }
}
