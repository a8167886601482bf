//! 파서 trait -- 단계별 파서 확장 포인트 정의

use crate::types::{LogLine, Phase, PhaseResult};

/// 단계 파서 trait
///
/// 한 단계의 라인 묶음을 구조화된 결과로 변환합니다.
/// 파싱 중 발견한 이상 징후는 결과 데이터에 담기며 실패로 취급하지 않습니다.
pub trait PhaseParser {
    /// 파서가 만드는 결과 타입
    type Output: Into<PhaseResult>;

    /// 이 파서가 담당하는 단계
    fn phase(&self) -> Phase;

    /// 단계 라인을 파싱
    fn parse(&self, lines: &[LogLine]) -> Self::Output;
}
