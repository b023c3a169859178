//! 필드 이름 결정 -- 변환기 타입 이름에서 열 이름을 만듭니다.
//!
//! 열 이름은 헤더 셀의 텍스트이자 본문 셀의 스타일 클래스로 쓰입니다.
//! `LevelConverter` -> `Level`, `RequestIdConverter` -> `RequestId`.
//! 접미사를 떼고 남는 것이 없으면 열을 만들지 않는 변환기입니다.

/// 변환기 타입 이름의 관례적 접미사
pub const CONVERTER_SUFFIX: &str = "Converter";

/// `std::any::type_name` 결과에서 모듈 경로와 제네릭 인자를 제거합니다.
///
/// `loglayout_html::converter::builtin::LevelConverter` -> `LevelConverter`
pub fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// 변환기 종류에서 열 이름을 계산합니다.
///
/// `None`이면 헤더와 본문 모두에서 셀을 갖지 않는 변환기입니다.
pub fn display_name(kind: &str) -> Option<String> {
    let name = kind.strip_suffix(CONVERTER_SUFFIX).unwrap_or(kind);
    (!name.is_empty()).then(|| name.to_owned())
}
