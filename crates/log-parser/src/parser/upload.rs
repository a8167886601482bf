//! upload 단계 파서
//!
//! 경로 없이 끝나는 `# $ anaconda upload` 라인은 자동 업로드가 꺼져 있다는
//! 뜻입니다. 경로가 붙은 형태는 세그먼터가 산출물 이름을 얻는 데 씁니다.

use buildlog_core::pipeline::PhaseParser;
use buildlog_core::types::{ErrorBlock, LogLine, Phase, UploadResult};

use crate::extractor::{LineCursor, extract_error_block};

/// 업로드 명령 표식 (경로 없음)
pub const UPLOAD_DISABLED_MARKER: &str = "# $ anaconda upload";
/// 업로드 충돌 표식
pub const CONFLICT_TOKEN: &str = "[Conflict]";

/// 경로 인자 없는 업로드 명령 라인인지 확인합니다.
fn is_disabled_upload(line: &str) -> bool {
    line.trim()
        .strip_prefix(UPLOAD_DISABLED_MARKER)
        .is_some_and(|rest| rest.trim().is_empty())
}

/// upload 단계 파서
#[derive(Debug, Default, Clone, Copy)]
pub struct UploadParser;

impl PhaseParser for UploadParser {
    type Output = UploadResult;

    fn phase(&self) -> Phase {
        Phase::Upload
    }

    fn parse(&self, lines: &[LogLine]) -> UploadResult {
        let mut result = UploadResult::default();
        let mut cursor = LineCursor::new(lines);

        while let Some(line) = cursor.next() {
            if is_disabled_upload(line) {
                result.auto_upload = false;
            }
            if line.contains(CONFLICT_TOKEN) {
                result.errors.push(ErrorBlock::single(line));
            }
            if let Some(block) = extract_error_block(line, &mut cursor) {
                result.errors.push(block);
            }
        }

        result
    }
}
