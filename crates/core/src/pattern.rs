//! 변환 패턴 파서 -- `%-5level [%thread] %logger{20} - %msg` 형식의 패턴을 노드 목록으로 분해
//!
//! [`PatternParser`]는 패턴 문자열을 한 번 스캔하여 [`PatternNode`] 목록을 만듭니다.
//! 노드 목록을 실제 변환기 체인으로 바꾸는 일은 레이아웃 쪽 컴파일러가 담당합니다.
//!
//! # 문법
//! ```text
//! pattern   := (literal | directive)*
//! directive := '%' modifier? word options?
//! modifier  := '-'? digits? ('.' digits)?
//! word      := [A-Za-z]+
//! options   := '{' option (',' option)* '}'
//! ```
//!
//! `\`는 다음 문자를 이스케이프합니다 (`\%`, `\\`, `\{`, `\}`, `\(`, `\)`, `\n`, `\t`).
//!
//! # 사용 예시
//! ```
//! use loglayout_core::pattern::{PatternNode, PatternParser};
//!
//! let nodes = PatternParser::new("%-5level %msg").parse()?;
//! assert_eq!(nodes.len(), 3);
//! assert!(matches!(&nodes[1], PatternNode::Literal(text) if text == " "));
//! # Ok::<(), loglayout_core::error::PatternError>(())
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::PatternError;

/// 포맷 수정자 (`%-10.30logger`의 `-10.30` 부분)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatInfo {
    /// 최소 폭 (부족하면 공백으로 채움)
    pub min_width: usize,
    /// 최대 폭 (넘으면 앞쪽을 잘라 뒷부분을 유지)
    pub max_width: Option<usize>,
    /// `true`면 왼쪽 정렬 (오른쪽에 공백)
    pub left_justify: bool,
}

impl FormatInfo {
    /// 수정자를 적용하여 값을 버퍼에 씁니다.
    pub fn apply(&self, buf: &mut String, value: &str) {
        let len = value.chars().count();
        let value = match self.max_width {
            Some(max) if len > max => {
                let skip = len - max;
                let idx = value
                    .char_indices()
                    .nth(skip)
                    .map(|(i, _)| i)
                    .unwrap_or(value.len());
                &value[idx..]
            }
            _ => value,
        };

        let len = value.chars().count();
        if len >= self.min_width {
            buf.push_str(value);
            return;
        }

        let padding = self.min_width - len;
        if self.left_justify {
            buf.push_str(value);
            buf.extend(std::iter::repeat_n(' ', padding));
        } else {
            buf.extend(std::iter::repeat_n(' ', padding));
            buf.push_str(value);
        }
    }
}

/// 파싱된 패턴의 한 요소
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// 그대로 출력되는 텍스트
    Literal(String),
    /// 변환 지시자 (`%word{options}`)
    Keyword {
        /// 변환 단어 (`level`, `d`, `logger` ...)
        name: String,
        /// 중괄호 안의 옵션 목록
        options: Vec<String>,
        /// 포맷 수정자
        format: Option<FormatInfo>,
        /// 지시자 `%`의 바이트 오프셋
        offset: usize,
    },
}

/// 변환 패턴 파서
///
/// 패턴 문자열 하나에 대해 한 번만 사용합니다.
pub struct PatternParser<'a> {
    pattern: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> PatternParser<'a> {
    /// 새 파서를 생성합니다.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            chars: pattern.char_indices().peekable(),
        }
    }

    /// 패턴 전체를 파싱합니다.
    ///
    /// 인접한 리터럴 텍스트는 하나의 [`PatternNode::Literal`]로 합쳐집니다.
    pub fn parse(mut self) -> Result<Vec<PatternNode>, PatternError> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        while let Some((offset, c)) = self.chars.next() {
            match c {
                '\\' => self.push_escaped(&mut literal),
                '%' => {
                    if !literal.is_empty() {
                        nodes.push(PatternNode::Literal(std::mem::take(&mut literal)));
                    }
                    nodes.push(self.parse_directive(offset)?);
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            nodes.push(PatternNode::Literal(literal));
        }

        Ok(nodes)
    }

    fn push_escaped(&mut self, literal: &mut String) {
        match self.chars.next() {
            Some((_, c @ ('%' | '\\' | '{' | '}' | '(' | ')'))) => literal.push(c),
            Some((_, 'n')) => literal.push('\n'),
            Some((_, 't')) => literal.push('\t'),
            Some((_, other)) => {
                literal.push('\\');
                literal.push(other);
            }
            // 패턴 끝의 역슬래시는 그대로 둔다
            None => literal.push('\\'),
        }
    }

    fn parse_directive(&mut self, start: usize) -> Result<PatternNode, PatternError> {
        let format = self.parse_format_info(start)?;

        match self.chars.peek().map(|&(_, c)| c) {
            Some('(') => {
                return Err(self.syntax_error(start, "composite keywords are not supported"));
            }
            Some(c) if c.is_ascii_alphabetic() => {}
            _ => return Err(self.syntax_error(start, "expected conversion word after '%'")),
        }

        let mut name = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            name.push(c);
            self.chars.next();
        }

        let options = if matches!(self.chars.peek(), Some((_, '{'))) {
            self.chars.next();
            self.parse_options(start)?
        } else {
            Vec::new()
        };

        Ok(PatternNode::Keyword {
            name,
            options,
            format,
            offset: start,
        })
    }

    fn parse_format_info(&mut self, start: usize) -> Result<Option<FormatInfo>, PatternError> {
        let mut info = FormatInfo::default();
        let mut present = false;

        if matches!(self.chars.peek(), Some((_, '-'))) {
            self.chars.next();
            info.left_justify = true;
            present = true;
        }

        let min_digits = self.take_digits();
        if !min_digits.is_empty() {
            info.min_width = self.parse_width(start, &min_digits)?;
            present = true;
        }

        let mut has_max = false;
        if matches!(self.chars.peek(), Some((_, '.'))) {
            self.chars.next();
            let max_digits = self.take_digits();
            if max_digits.is_empty() {
                return Err(self.syntax_error(start, "missing maximum width after '.'"));
            }
            info.max_width = Some(self.parse_width(start, &max_digits)?);
            has_max = true;
            present = true;
        }

        if info.left_justify && min_digits.is_empty() && !has_max {
            return Err(self.syntax_error(start, "'-' must be followed by a width"));
        }

        Ok(present.then_some(info))
    }

    /// `{a, b}` 옵션 목록을 읽습니다.
    ///
    /// 쉼표로 나누고 앞뒤 공백을 제거합니다. `\,`와 큰따옴표로 감싼 구간
    /// (`{"HH:mm:ss,SSS"}`) 안의 쉼표와 `}`는 옵션 텍스트로 남습니다.
    fn parse_options(&mut self, start: usize) -> Result<Vec<String>, PatternError> {
        let mut options = Vec::new();
        let mut current = String::new();
        let mut quoted = false;
        loop {
            match self.chars.next() {
                Some((_, '"')) => quoted = !quoted,
                Some((_, '}')) if !quoted => break,
                Some((_, ',')) if !quoted => options.push(std::mem::take(&mut current)),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, c)) => current.push(c),
                    None => {
                        return Err(
                            self.syntax_error(start, "unterminated option list, missing '}'")
                        );
                    }
                },
                Some((_, c)) => current.push(c),
                None => {
                    return Err(self.syntax_error(start, "unterminated option list, missing '}'"));
                }
            }
        }
        options.push(current);

        Ok(options
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect())
    }

    fn take_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.chars.next();
        }
        digits
    }

    fn parse_width(&mut self, start: usize, digits: &str) -> Result<usize, PatternError> {
        digits
            .parse()
            .map_err(|_| self.syntax_error(start, "format width out of range"))
    }

    /// 지시자 시작부터 현재 보고 있는 문자까지를 조각으로 담은 에러를 만듭니다.
    fn syntax_error(&mut self, start: usize, reason: &str) -> PatternError {
        let end = self
            .chars
            .peek()
            .map(|&(i, c)| i + c.len_utf8())
            .unwrap_or(self.pattern.len());
        PatternError::Syntax {
            offset: start,
            fragment: self.pattern[start..end].to_owned(),
            reason: reason.to_owned(),
        }
    }
}
