//! 단계 분류기
//!
//! 한 패키지의 라인을 센티널 라인에 따라 init → build → test → upload 순서의
//! [`PhaseSegment`]로 나눕니다. 전이는 [`ClassifierState`] 열거형과 단일 전이
//! 함수 [`ClassifierState::step`]로 표현됩니다.
//!
//! ```text
//! Init ──"BUILD START"──▶ Build ──"BUILD END"──▶ BuildEnded
//!                                                   │ 다음 한 줄로 결정
//!            ┌──────────"TEST START"────────────────┤
//!            ▼                                      │ "test" 포함: 한 줄짜리 test
//!          Test ──"TEST END"──▶ Upload ◀────────────┘ 그 외: 그 줄부터 upload
//! ```
//!
//! 입력이 도중에 끝나면 진행 중이던 단계까지만 내보냅니다.

use buildlog_core::types::{LogLine, Phase, PhaseSegment};
use tracing::trace;

/// init → build 전이 접두사
pub const BUILD_START: &str = "BUILD START";
/// build 종료 접두사
pub const BUILD_END: &str = "BUILD END";
/// test 시작 접두사
pub const TEST_START: &str = "TEST START";
/// test 종료 접두사
pub const TEST_END: &str = "TEST END";
/// `BUILD END` 다음 줄이 이 부분 문자열을 포함하면 한 줄짜리 test 단계
const TEST_MARKER: &str = "test";

/// 분류기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierState {
    Init,
    Build,
    /// `BUILD END`를 본 직후. 다음 한 줄로 test/upload를 결정합니다.
    BuildEnded,
    Test,
    Upload,
}

/// 한 줄을 처리한 결과 동작
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// 현재 단계에 라인 추가
    Append,
    /// 현재 단계를 닫고 라인을 새 단계의 첫 줄로 시작
    OpenWith(Phase),
    /// 현재 단계를 라인까지 포함해 닫고 빈 새 단계 시작
    CloseWith(Phase),
    /// 현재 단계를 닫고, 라인만 담은 단계를 내보낸 뒤 빈 새 단계 시작
    Single(Phase, Phase),
}

impl ClassifierState {
    /// 상태와 라인으로 다음 동작과 상태를 결정합니다.
    pub fn step(self, line: &str) -> (Transition, ClassifierState) {
        match self {
            Self::Init if line.starts_with(BUILD_START) => {
                (Transition::OpenWith(Phase::Build), Self::Build)
            }
            Self::Build if line.starts_with(BUILD_END) => (Transition::Append, Self::BuildEnded),
            Self::BuildEnded if line.starts_with(TEST_START) => {
                (Transition::OpenWith(Phase::Test), Self::Test)
            }
            Self::BuildEnded if line.contains(TEST_MARKER) => {
                (Transition::Single(Phase::Test, Phase::Upload), Self::Upload)
            }
            Self::BuildEnded => (Transition::OpenWith(Phase::Upload), Self::Upload),
            Self::Test if line.starts_with(TEST_END) => {
                (Transition::CloseWith(Phase::Upload), Self::Upload)
            }
            state => (Transition::Append, state),
        }
    }
}

/// 단계 분류기
#[derive(Debug, Default, Clone, Copy)]
pub struct PhaseClassifier;

impl PhaseClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 패키지 라인을 단계 구간으로 나눕니다.
    ///
    /// 반환되는 단계 태그는 항상 (init, build, test, upload)의 접두사이며
    /// 중복이나 건너뜀이 없습니다. 마지막 진행 중 단계는 라인이 있을 때만
    /// 포함됩니다.
    pub fn classify<T>(&self, lines: T) -> Vec<PhaseSegment>
    where
        T: IntoIterator<Item = LogLine>,
    {
        let mut segments = Vec::with_capacity(Phase::ALL.len());
        let mut state = ClassifierState::Init;
        let mut phase = Phase::Init;
        let mut current: Vec<LogLine> = Vec::new();

        for line in lines {
            let (transition, next_state) = state.step(&line);
            match transition {
                Transition::Append => current.push(line),
                Transition::OpenWith(next) => {
                    segments.push(PhaseSegment::new(phase, std::mem::take(&mut current)));
                    trace!(from = %phase, to = %next, "phase transition");
                    phase = next;
                    current.push(line);
                }
                Transition::CloseWith(next) => {
                    current.push(line);
                    segments.push(PhaseSegment::new(phase, std::mem::take(&mut current)));
                    trace!(from = %phase, to = %next, "phase transition");
                    phase = next;
                }
                Transition::Single(single, next) => {
                    segments.push(PhaseSegment::new(phase, std::mem::take(&mut current)));
                    segments.push(PhaseSegment::new(single, vec![line]));
                    trace!(from = %phase, via = %single, to = %next, "phase transition");
                    phase = next;
                }
            }
            state = next_state;
        }

        if !current.is_empty() {
            segments.push(PhaseSegment::new(phase, current));
        }
        segments
    }
}
