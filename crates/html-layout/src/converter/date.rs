//! `%date{pattern[, timezone]}` 변환기
//!
//! 날짜 패턴은 `yyyy-MM-dd HH:mm:ss,SSS` 형태의 문자 패턴이며,
//! 시작 시 한 번 chrono 서식 문자열로 변환됩니다.
//!
//! | 문자 | 의미 | chrono |
//! |---|---|---|
//! | `yyyy` / `yy` | 연도 | `%Y` / `%y` |
//! | `M` `MM` `MMM` `MMMM` | 월 | `%-m` `%m` `%b` `%B` |
//! | `d` `dd` | 일 | `%-d` `%d` |
//! | `H` `HH` / `h` `hh` | 시 (24h / 12h) | `%-H` `%H` / `%-I` `%I` |
//! | `m` `mm` | 분 | `%-M` `%M` |
//! | `s` `ss` | 초 | `%-S` `%S` |
//! | `SSS` | 밀리초 | `%3f` |
//! | `EEE` / `EEEE` | 요일 | `%a` / `%A` |
//! | `a` | 오전/오후 | `%p` |
//! | `D` | 연중 일자 | `%j` |
//! | `Z` / `XXX` / `z` | 오프셋 | `%z` / `%:z` / `%Z` |
//!
//! 작은따옴표 안의 텍스트는 그대로 출력됩니다 (`''`는 작은따옴표 하나).

use chrono::format::{Item, StrftimeItems};
use chrono::{FixedOffset, Offset, Utc};
use loglayout_core::event::LoggingEvent;

use super::{Converter, ConverterContext};

/// ISO8601 키워드
pub const ISO8601_KEYWORD: &str = "ISO8601";

/// ISO8601 키워드와 기본값이 뜻하는 날짜 패턴
pub const ISO8601_PATTERN: &str = "yyyy-MM-dd HH:mm:ss,SSS";

/// `%date`
#[derive(Debug, Clone)]
pub struct DateConverter {
    options: Vec<String>,
    format: Option<String>,
    offset: FixedOffset,
}

impl DateConverter {
    /// 옵션: 날짜 패턴, 타임존
    pub fn new(options: &[String]) -> Self {
        Self {
            options: options.to_vec(),
            format: None,
            offset: Utc.fix(),
        }
    }

    /// 시작 후 확정된 chrono 서식 문자열
    pub fn strftime(&self) -> Option<&str> {
        self.format.as_deref()
    }
}

impl Converter for DateConverter {
    fn convert(&self, event: &LoggingEvent) -> String {
        match &self.format {
            Some(format) => event
                .timestamp()
                .with_timezone(&self.offset)
                .format(format)
                .to_string(),
            None => String::new(),
        }
    }

    fn start(&mut self, _ctx: &ConverterContext) -> Result<(), String> {
        let pattern = match self.options.first().map(String::as_str) {
            None => ISO8601_PATTERN,
            Some(p) if p.eq_ignore_ascii_case(ISO8601_KEYWORD) => ISO8601_PATTERN,
            Some(p) => p,
        };

        let format = translate(pattern)?;
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(format!("date pattern '{pattern}' is not representable"));
        }

        if let Some(tz) = self.options.get(1) {
            self.offset = parse_timezone(tz)?;
        }
        self.format = Some(format);
        Ok(())
    }
}

/// 날짜 문자 패턴을 chrono 서식 문자열로 변환합니다.
pub fn translate(pattern: &str) -> Result<String, String> {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                out.push('\'');
                continue;
            }
            loop {
                match chars.next() {
                    Some('\'') if chars.peek() == Some(&'\'') => {
                        chars.next();
                        out.push('\'');
                    }
                    Some('\'') => break,
                    Some(ch) => push_literal(&mut out, ch),
                    None => return Err(format!("unterminated quote in date pattern '{pattern}'")),
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut count = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                count += 1;
            }
            out.push_str(letter_spec(c, count)?);
            continue;
        }

        push_literal(&mut out, c);
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn letter_spec(letter: char, count: usize) -> Result<&'static str, String> {
    let spec = match (letter, count) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', _) => "%3f",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('a', _) => "%p",
        ('D', _) => "%j",
        ('Z', _) => "%z",
        ('X', 1 | 2) => "%z",
        ('X', _) => "%:z",
        ('z', _) => "%Z",
        _ => return Err(format!("unknown date pattern letter '{letter}'")),
    };
    Ok(spec)
}

/// `UTC` 또는 `+HH:MM` / `-HH:MM` 고정 오프셋을 파싱합니다.
pub fn parse_timezone(tz: &str) -> Result<FixedOffset, String> {
    if tz.eq_ignore_ascii_case("UTC") || tz.eq_ignore_ascii_case("GMT") || tz == "Z" {
        return Ok(Utc.fix());
    }

    let invalid = || format!("timezone '{tz}' must be UTC or a fixed offset like +09:00");

    let (sign, rest) = if let Some(rest) = tz.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = tz.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use loglayout_core::event::Level;

    fn ctx() -> ConverterContext {
        ConverterContext::new(Utc::now())
    }

    fn event() -> LoggingEvent {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
            + chrono::Duration::milliseconds(42);
        LoggingEvent::new(Level::Info, "app", "tick").with_timestamp(ts)
    }

    fn started(options: &[&str]) -> DateConverter {
        let options: Vec<String> = options.iter().map(|s| (*s).to_owned()).collect();
        let mut c = DateConverter::new(&options);
        c.start(&ctx()).unwrap();
        c
    }

    #[test]
    fn default_is_iso8601() {
        assert_eq!(started(&[]).convert(&event()), "2024-03-09 14:05:07,042");
        assert_eq!(started(&["ISO8601"]).convert(&event()), "2024-03-09 14:05:07,042");
    }

    #[test]
    fn custom_pattern() {
        assert_eq!(started(&["HH:mm:ss.SSS"]).convert(&event()), "14:05:07.042");
        assert_eq!(started(&["yyyyMMdd"]).convert(&event()), "20240309");
        assert_eq!(started(&["d MMM yy"]).convert(&event()), "9 Mar 24");
    }

    #[test]
    fn quoted_literal_text() {
        assert_eq!(
            started(&["yyyy-MM-dd'T'HH:mm"]).convert(&event()),
            "2024-03-09T14:05"
        );
        assert_eq!(started(&["HH 'o''clock'"]).convert(&event()), "14 o'clock");
    }

    #[test]
    fn comma_in_pattern_is_literal() {
        assert_eq!(started(&["HH:mm:ss,SSS"]).convert(&event()), "14:05:07,042");
        assert_eq!(
            started(&["HH:mm:ss,SSS", "+09:00"]).convert(&event()),
            "23:05:07,042"
        );
    }

    #[test]
    fn percent_is_literal() {
        assert_eq!(started(&["ss%"]).convert(&event()), "07%");
    }

    #[test]
    fn fixed_offset_timezone() {
        assert_eq!(started(&["HH:mm", "+09:00"]).convert(&event()), "23:05");
        assert_eq!(started(&["HH:mm", "-01:30"]).convert(&event()), "12:35");
        assert_eq!(started(&["HH:mm", "UTC"]).convert(&event()), "14:05");
    }

    #[test]
    fn unknown_letter_fails_start() {
        let mut c = DateConverter::new(&["yyyy QQ".to_owned()]);
        let reason = c.start(&ctx()).unwrap_err();
        assert!(reason.contains("'Q'"));
    }

    #[test]
    fn unterminated_quote_fails_start() {
        assert!(translate("HH 'oops").is_err());
    }

    #[test]
    fn bad_timezone_fails_start() {
        for tz in ["Mars/Olympus", "+9", "+25:00", "09:00"] {
            let mut c = DateConverter::new(&["HH".to_owned(), tz.to_owned()]);
            assert!(c.start(&ctx()).is_err(), "timezone '{tz}' should be rejected");
        }
    }

    #[test]
    fn not_started_is_empty() {
        assert_eq!(DateConverter::new(&[]).convert(&event()), "");
    }

    #[test]
    fn strftime_is_exposed_after_start() {
        assert_eq!(started(&["HH:mm"]).strftime(), Some("%H:%M"));
    }
}
