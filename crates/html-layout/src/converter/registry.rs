//! 변환 단어 -> 변환기 팩토리 매핑

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{
    CallerDataConverter, ClassOfCallerConverter, Converter, DateConverter, FileOfCallerConverter,
    LevelConverter, LineOfCallerConverter, LineSeparatorConverter, LoggerConverter,
    MarkerConverter, MdcConverter, MessageConverter, MethodOfCallerConverter,
    RelativeTimeConverter, ThreadConverter, ThrowableConverter,
};

/// 옵션 목록을 받아 변환기를 만드는 팩토리
pub type ConverterFactory = Arc<dyn Fn(&[String]) -> Box<dyn Converter> + Send + Sync>;

/// 변환 단어 레지스트리
///
/// 패턴 컴파일러는 변환 단어마다 여기서 팩토리를 찾습니다.
/// 등록되지 않은 단어는 패턴 문법 에러가 됩니다.
#[derive(Clone, Default)]
pub struct ConverterRegistry {
    factories: HashMap<String, ConverterFactory>,
}

impl ConverterRegistry {
    /// 빈 레지스트리를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 변환 단어가 모두 등록된 레지스트리를 생성합니다.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register_all(&["d", "date"], |o| Box::new(DateConverter::new(o)));
        registry.register_all(&["r", "relative"], |_| Box::new(RelativeTimeConverter::new()));
        registry.register_all(&["p", "le", "level"], |_| Box::new(LevelConverter));
        registry.register_all(&["t", "thread"], |_| Box::new(ThreadConverter));
        registry.register_all(&["c", "lo", "logger"], |o| Box::new(LoggerConverter::new(o)));
        registry.register_all(&["m", "msg", "message"], |_| Box::new(MessageConverter));
        registry.register_all(&["X", "mdc"], |o| Box::new(MdcConverter::new(o)));
        registry.register_all(&["C", "class"], |_| Box::new(ClassOfCallerConverter));
        registry.register_all(&["M", "method"], |_| Box::new(MethodOfCallerConverter));
        registry.register_all(&["L", "line"], |_| Box::new(LineOfCallerConverter));
        registry.register_all(&["F", "file"], |_| Box::new(FileOfCallerConverter));
        registry.register("caller", |_| Box::new(CallerDataConverter));
        registry.register("marker", |_| Box::new(MarkerConverter));
        registry.register_all(&["ex", "throwable"], |o| Box::new(ThrowableConverter::new(o)));
        registry.register("n", |_| Box::new(LineSeparatorConverter));

        registry
    }

    /// 변환 단어를 등록합니다. 같은 단어가 있으면 교체합니다.
    pub fn register<F>(&mut self, word: impl Into<String>, factory: F)
    where
        F: Fn(&[String]) -> Box<dyn Converter> + Send + Sync + 'static,
    {
        self.factories.insert(word.into(), Arc::new(factory));
    }

    /// 여러 별칭에 같은 팩토리를 등록합니다.
    fn register_all<F>(&mut self, words: &[&str], factory: F)
    where
        F: Fn(&[String]) -> Box<dyn Converter> + Send + Sync + 'static,
    {
        let factory: ConverterFactory = Arc::new(factory);
        for word in words {
            self.factories.insert((*word).to_owned(), Arc::clone(&factory));
        }
    }

    /// 변환 단어로 새 변환기를 만듭니다.
    pub fn create(&self, word: &str, options: &[String]) -> Option<Box<dyn Converter>> {
        self.factories.get(word).map(|factory| factory(options))
    }

    /// 등록 여부를 확인합니다.
    pub fn contains(&self, word: &str) -> bool {
        self.factories.contains_key(word)
    }

    /// 등록된 변환 단어 수
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// 등록된 변환 단어가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// 등록된 변환 단어를 정렬하여 반환합니다.
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterRegistry")
            .field("words", &self.words())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loglayout_core::event::{Level, LoggingEvent};

    #[test]
    fn defaults_cover_all_aliases() {
        let registry = ConverterRegistry::with_defaults();
        for word in [
            "d", "date", "r", "relative", "p", "le", "level", "t", "thread", "c", "lo", "logger",
            "m", "msg", "message", "X", "mdc", "C", "class", "M", "method", "L", "line", "F",
            "file", "caller", "marker", "ex", "throwable", "n",
        ] {
            assert!(registry.contains(word), "missing conversion word '{word}'");
        }
        assert_eq!(registry.len(), 30);
    }

    #[test]
    fn aliases_create_same_kind() {
        let registry = ConverterRegistry::with_defaults();
        let kinds: Vec<String> = ["p", "le", "level"]
            .iter()
            .filter_map(|w| registry.create(w, &[]))
            .map(|c| c.kind().to_owned())
            .collect();
        assert_eq!(kinds, vec!["LevelConverter"; 3]);
    }

    #[test]
    fn unknown_word_is_none() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.create("nope", &[]).is_none());
        // 대소문자 구분
        assert!(registry.create("LEVEL", &[]).is_none());
    }

    #[test]
    fn register_custom_word() {
        struct TenantConverter;
        impl Converter for TenantConverter {
            fn convert(&self, event: &LoggingEvent) -> String {
                event.mdc().get("tenant").cloned().unwrap_or_default()
            }
        }

        let mut registry = ConverterRegistry::new();
        assert!(registry.is_empty());
        registry.register("tenant", |_| Box::new(TenantConverter));

        let converter = registry.create("tenant", &[]).unwrap();
        let event = LoggingEvent::new(Level::Info, "app", "hello").with_mdc("tenant", "acme");
        assert_eq!(converter.convert(&event), "acme");
        assert_eq!(converter.kind(), "TenantConverter");
    }

    #[test]
    fn words_are_sorted() {
        let registry = ConverterRegistry::with_defaults();
        let words = registry.words();
        let mut sorted = words.clone();
        sorted.sort_unstable();
        assert_eq!(words, sorted);
    }
}
