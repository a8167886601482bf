//! 분석 파이프라인 오케스트레이션
//!
//! [`BuildLogParser`]는 세그먼터 → 분류기 → 단계 파서 → 집계기를 한 번의
//! 전진 스캔으로 연결합니다. 입력 라인을 얻은 뒤에는 실패하지 않으며,
//! 잘리거나 형식이 어긋난 로그는 단계가 적은 리포트로 나타납니다.
//!
//! # 사용 예시
//! ```ignore
//! use buildlog_parser::{BuildLogParser, LogSource};
//!
//! let source = LogSource::load("build.log").await?;
//! let report = BuildLogParser::new().parse_source(&source);
//! for (built_name, package) in &report {
//!     println!("{built_name}: {}", package.status());
//! }
//! ```

use buildlog_core::types::{BuildReport, PackageGroup, Phase, PhaseResult};
use tracing::{debug, info};

use crate::aggregator::ReportAggregator;
use crate::classifier::PhaseClassifier;
use crate::parser::parse_segment;
use crate::segmenter::LogSegmenter;
use crate::source::LogSource;

/// 산출물 이름별 감지된 단계 목록
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseOutline {
    pub package_name: String,
    pub built_name: String,
    pub phases: Vec<Phase>,
}

/// 빌드 로그 파서
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildLogParser {
    classifier: PhaseClassifier,
}

impl BuildLogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 원시 라인 스트림을 리포트로 변환합니다.
    pub fn parse_lines<T, S>(&self, lines: T) -> BuildReport
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut aggregator = ReportAggregator::new();
        let mut packages = 0usize;

        for mut group in LogSegmenter::new(lines) {
            packages += 1;
            let results = self.parse_group(&mut group);
            aggregator.add(&group, results);
        }

        let overwritten = aggregator.overwritten();
        let report = aggregator.finish();
        let summary = report.summary();
        info!(
            packages,
            overwritten,
            passed = summary.passed,
            failed = summary.failed,
            "build log parsed"
        );
        report
    }

    /// 문자열 전체를 리포트로 변환합니다.
    pub fn parse_str(&self, text: &str) -> BuildReport {
        self.parse_lines(text.lines())
    }

    /// 읽어 둔 로그를 리포트로 변환합니다.
    pub fn parse_source(&self, source: &LogSource) -> BuildReport {
        self.parse_lines(source.lines())
    }

    /// 패키지별로 감지된 단계 목록만 계산합니다.
    pub fn phase_outline<T, S>(&self, lines: T) -> Vec<PhaseOutline>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        LogSegmenter::new(lines)
            .map(|group| {
                let phases = self
                    .classifier
                    .classify(group.lines)
                    .iter()
                    .map(|segment| segment.phase)
                    .collect();
                PhaseOutline {
                    package_name: group.package_name,
                    built_name: group.built_name,
                    phases,
                }
            })
            .collect()
    }

    /// 그룹의 라인을 꺼내 단계별로 파싱합니다.
    fn parse_group(&self, group: &mut PackageGroup) -> Vec<PhaseResult> {
        let segments = self.classifier.classify(std::mem::take(&mut group.lines));
        debug!(
            package = %group.package_name,
            built_name = %group.built_name,
            phases = segments.len(),
            "package classified"
        );
        segments.iter().map(parse_segment).collect()
    }
}
