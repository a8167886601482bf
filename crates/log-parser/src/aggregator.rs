//! 결과 집계기
//!
//! 패키지별 단계 결과를 산출물 이름을 키로 하는 [`BuildReport`]로 묶습니다.
//! 같은 산출물 이름이 두 번 나오면 나중 패키지가 앞의 결과를 덮어쓰며,
//! 이 경우 경고 로그를 남깁니다.

use buildlog_core::types::{BuildReport, PackageGroup, PackageReport, PhaseResult};
use tracing::warn;

/// 리포트 집계기
#[derive(Debug, Default)]
pub struct ReportAggregator {
    report: BuildReport,
    /// 덮어쓴 패키지 수
    overwritten: usize,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 패키지 하나의 단계 결과를 추가합니다.
    pub fn add<R>(&mut self, group: &PackageGroup, results: R)
    where
        R: IntoIterator<Item = PhaseResult>,
    {
        let mut package = PackageReport::new(group.package_name.clone());
        for result in results {
            package.record(result);
        }

        if let Some(previous) = self.report.insert(group.built_name.clone(), package) {
            self.overwritten += 1;
            warn!(
                built_name = %group.built_name,
                previous = %previous.package_name,
                package = %group.package_name,
                "duplicate built name, later package overwrites earlier result"
            );
        }
    }

    /// 덮어쓴 패키지 수
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    /// 집계를 마치고 리포트를 반환합니다.
    pub fn finish(self) -> BuildReport {
        self.report
    }
}
