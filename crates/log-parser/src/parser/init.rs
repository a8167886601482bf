//! init 단계 파서
//!
//! `CONDA_CMD` 라인에서 빌드 명령을 얻고 에러 블록을 수집합니다.
//!
//! ```text
//! CONDA_CMD --> conda-build /tmp/staged-recipes/recipes/tifffile --python=3.5
//! ```

use buildlog_core::pipeline::PhaseParser;
use buildlog_core::types::{InitResult, LogLine, Phase};

use crate::extractor::{LineCursor, extract_error_block};

/// 빌드 명령 라인 토큰
pub const CONDA_CMD_TOKEN: &str = "CONDA_CMD";
/// 빌드 명령 구분자
const COMMAND_SEPARATOR: &str = "-->";

/// init 단계 파서
#[derive(Debug, Default, Clone, Copy)]
pub struct InitParser;

impl PhaseParser for InitParser {
    type Output = InitResult;

    fn phase(&self) -> Phase {
        Phase::Init
    }

    fn parse(&self, lines: &[LogLine]) -> InitResult {
        let mut result = InitResult::default();
        let mut cursor = LineCursor::new(lines);

        while let Some(line) = cursor.next() {
            if line.contains(CONDA_CMD_TOKEN) {
                if let Some((_, command)) = line.split_once(COMMAND_SEPARATOR) {
                    result.build_command = Some(command.trim().to_owned());
                }
            }
            if let Some(block) = extract_error_block(line, &mut cursor) {
                result.errors.push(block);
            }
        }

        result
    }
}
