//! build 단계 파서
//!
//! `Package: ` 라인에서 산출물 이름을 얻습니다. 에러 블록이 하나라도 있으면
//! 이름은 `"failed"`로 고정됩니다.

use buildlog_core::pipeline::PhaseParser;
use buildlog_core::types::{BuildResult, FAILED_BUILD_NAME, LogLine, Phase};

use crate::extractor::{LineCursor, extract_error_block};

/// 산출물 이름 라인 표식
pub const PACKAGE_NAME_MARKER: &str = "Package: ";

/// build 단계 파서
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildParser;

impl PhaseParser for BuildParser {
    type Output = BuildResult;

    fn phase(&self) -> Phase {
        Phase::Build
    }

    fn parse(&self, lines: &[LogLine]) -> BuildResult {
        let mut result = BuildResult::default();
        let mut cursor = LineCursor::new(lines);

        while let Some(line) = cursor.next() {
            if let Some((_, name)) = line.split_once(PACKAGE_NAME_MARKER) {
                result.built_name = Some(name.to_owned());
            }
            if let Some(block) = extract_error_block(line, &mut cursor) {
                result.errors.push(block);
            }
        }

        if !result.errors.is_empty() {
            result.built_name = Some(FAILED_BUILD_NAME.to_owned());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<LogLine> {
        raw.iter().map(|l| (*l).to_owned()).collect()
    }

    #[test]
    fn captures_package_name() {
        let result = BuildParser.parse(&lines(&[
            "BUILD START",
            "Package: suitcase-0.2.1-py35_0",
            "BUILD END",
        ]));
        assert_eq!(result.built_name.as_deref(), Some("suitcase-0.2.1-py35_0"));
        assert!(!result.is_failed());
    }

    #[test]
    fn missing_package_line_leaves_name_unset() {
        let result = BuildParser.parse(&lines(&["BUILD START", "BUILD END"]));
        assert!(result.built_name.is_none());
    }

    #[test]
    fn error_overrides_captured_name() {
        let result = BuildParser.parse(&lines(&[
            "BUILD START",
            "Package: foo-1.0-0",
            "Traceback (most recent call last):",
            "  File \"setup.py\", line 1",
            "SyntaxError: invalid syntax",
            "",
            "BUILD END",
        ]));
        assert_eq!(result.built_name.as_deref(), Some("failed"));
        assert!(result.is_failed());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].len(), 3);
    }

    #[test]
    fn error_before_package_line_still_fails() {
        let result = BuildParser.parse(&lines(&[
            "Error: missing dependency",
            "",
            "Package: foo-1.0-0",
        ]));
        assert_eq!(result.built_name.as_deref(), Some("failed"));
    }
}
