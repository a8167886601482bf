//! 단계별 파서 -- init, build, test, upload
//!
//! 각 파서는 core의 [`PhaseParser`] trait을 구현하며, 단계 라인을
//! [`LineCursor`](crate::extractor::LineCursor)로 한 번 순회하면서
//! 같은 커서를 에러 추출기와 공유합니다.
//!
//! 단계 → 파서 매핑은 [`parse_segment`]의 `match`로 컴파일 시점에 고정됩니다.
//!
//! # 사용 예시
//! ```ignore
//! use buildlog_core::types::{Phase, PhaseSegment};
//! use buildlog_parser::parser::parse_segment;
//!
//! let segment = PhaseSegment::new(Phase::Test, vec!["Nothing to test for: foo".to_owned()]);
//! let result = parse_segment(&segment);
//! ```

pub mod build;
pub mod init;
pub mod upload;

pub use build::BuildParser;
pub use init::InitParser;
pub use test::TestParser;
pub use upload::UploadParser;

use buildlog_core::pipeline::PhaseParser;
use buildlog_core::types::{Phase, PhaseResult, PhaseSegment};

/// 단계 구간을 해당 단계 파서로 파싱합니다.
pub fn parse_segment(segment: &PhaseSegment) -> PhaseResult {
    match segment.phase {
        Phase::Init => InitParser.parse(&segment.lines).into(),
        Phase::Build => BuildParser.parse(&segment.lines).into(),
        Phase::Test => TestParser.parse(&segment.lines).into(),
        Phase::Upload => UploadParser.parse(&segment.lines).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_segment_phase() {
        for phase in Phase::ALL {
            let segment = PhaseSegment::new(phase, Vec::new());
            assert_eq!(parse_segment(&segment).phase(), phase);
        }
    }

    #[test]
    fn parsers_report_their_phase() {
        assert_eq!(InitParser.phase(), Phase::Init);
        assert_eq!(BuildParser.phase(), Phase::Build);
        assert_eq!(TestParser.phase(), Phase::Test);
        assert_eq!(UploadParser.phase(), Phase::Upload);
    }
}
