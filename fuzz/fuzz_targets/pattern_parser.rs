#![no_main]

use libfuzzer_sys::fuzz_target;
use loglayout_core::pattern::{PatternNode, PatternParser};

fuzz_target!(|data: &[u8]| {
    if let Ok(pattern) = std::str::from_utf8(data) {
        // 실패는 허용, 패닉은 불허
        if let Ok(nodes) = PatternParser::new(pattern).parse() {
            for node in &nodes {
                if let PatternNode::Keyword { offset, .. } = node {
                    assert!(*offset < pattern.len());
                    assert!(pattern.is_char_boundary(*offset));
                }
            }
        }
    }
});
