//! 도메인 타입 -- 로그 분할부터 리포트까지 공유되는 데이터 구조
//!
//! 세그먼터는 [`PackageGroup`]을, 분류기는 [`PhaseSegment`]를,
//! 단계 파서는 [`PhaseResult`]를 만들고, 집계기가 이를 [`BuildReport`]로 묶습니다.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use serde::{Deserialize, Serialize};

/// 로그 한 줄 (앞뒤 공백이 제거된 상태)
pub type LogLine = String;

/// 빌드가 실패했을 때 `BuildResult::built_name`에 들어가는 값
pub const FAILED_BUILD_NAME: &str = "failed";

/// 빌드 파이프라인 단계
///
/// 선언 순서가 곧 정규 순서(init → build → test → upload)입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `BUILD START` 이전의 준비 출력
    Init,
    /// `BUILD START` ~ `BUILD END`
    Build,
    /// `TEST START` ~ `TEST END`, 또는 "Nothing to test for" 한 줄
    Test,
    /// 나머지 (업로드)
    Upload,
}

impl Phase {
    /// 정규 순서의 전체 단계 목록
    pub const ALL: [Phase; 4] = [Phase::Init, Phase::Build, Phase::Test, Phase::Upload];

    /// 단계 이름 문자열
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Build => "build",
            Self::Test => "test",
            Self::Upload => "upload",
        }
    }

    /// 정규 순서상 다음 단계. `Upload` 다음은 없습니다.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Self::Init => Some(Self::Build),
            Self::Build => Some(Self::Test),
            Self::Test => Some(Self::Upload),
            Self::Upload => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 패키지 하나에 해당하는 로그 라인 묶음
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageGroup {
    /// 패키지 이름 (레시피 디렉토리 이름)
    pub package_name: String,
    /// 빌드 산출물 이름. 해석되지 않았으면 `<package>-build-name-not-found`
    pub built_name: String,
    /// 경계 라인을 제외한 패키지 출력
    pub lines: Vec<LogLine>,
}

/// 한 단계에 속하는 연속된 라인
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSegment {
    pub phase: Phase,
    pub lines: Vec<LogLine>,
}

impl PhaseSegment {
    pub fn new(phase: Phase, lines: Vec<LogLine>) -> Self {
        Self { phase, lines }
    }
}

/// 연속된 에러/트레이스백 라인 블록
///
/// 항상 한 줄 이상이며 빈 줄을 포함하지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorBlock {
    lines: Vec<LogLine>,
}

impl ErrorBlock {
    /// 라인 목록으로 블록을 만듭니다. 비어 있으면 `None`.
    pub fn new(lines: Vec<LogLine>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Self { lines })
        }
    }

    /// 한 줄짜리 블록
    pub fn single(line: impl Into<LogLine>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    /// 블록의 첫 줄 (에러 요약으로 사용)
    pub fn first_line(&self) -> &str {
        // 생성자가 빈 블록을 허용하지 않음
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// 라인들을 개행으로 이어 붙인 전체 텍스트
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for ErrorBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// init 단계 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitResult {
    /// `CONDA_CMD` 라인의 `-->` 뒤에 기록된 빌드 명령
    pub build_command: Option<String>,
    pub errors: Vec<ErrorBlock>,
}

/// build 단계 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    /// `Package: ` 라인에서 얻은 이름. 에러가 하나라도 있으면 `"failed"`.
    pub built_name: Option<String>,
    pub errors: Vec<ErrorBlock>,
}

impl BuildResult {
    /// 빌드가 실패로 기록되었는지 여부
    pub fn is_failed(&self) -> bool {
        self.built_name.as_deref() == Some(FAILED_BUILD_NAME)
    }
}

/// test 단계 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// "Nothing to test for: " 라인이 있었는지 여부
    pub nothing_to_test: bool,
    pub errors: Vec<ErrorBlock>,
}

/// upload 단계 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// 자동 업로드 여부. 경로 없는 `# $ anaconda upload` 라인이 있으면 `false`
    pub auto_upload: bool,
    pub errors: Vec<ErrorBlock>,
}

impl Default for UploadResult {
    fn default() -> Self {
        Self {
            auto_upload: true,
            errors: Vec::new(),
        }
    }
}

/// 단계별 파싱 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PhaseResult {
    Init(InitResult),
    Build(BuildResult),
    Test(TestResult),
    Upload(UploadResult),
}

impl PhaseResult {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Init(_) => Phase::Init,
            Self::Build(_) => Phase::Build,
            Self::Test(_) => Phase::Test,
            Self::Upload(_) => Phase::Upload,
        }
    }

    /// 단계에서 수집된 에러 블록
    pub fn errors(&self) -> &[ErrorBlock] {
        match self {
            Self::Init(r) => &r.errors,
            Self::Build(r) => &r.errors,
            Self::Test(r) => &r.errors,
            Self::Upload(r) => &r.errors,
        }
    }

    /// 에러 없이 끝난 단계인지 여부
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Build(r) => r.errors.is_empty() && !r.is_failed(),
            other => other.errors().is_empty(),
        }
    }
}

impl From<InitResult> for PhaseResult {
    fn from(r: InitResult) -> Self {
        Self::Init(r)
    }
}

impl From<BuildResult> for PhaseResult {
    fn from(r: BuildResult) -> Self {
        Self::Build(r)
    }
}

impl From<TestResult> for PhaseResult {
    fn from(r: TestResult) -> Self {
        Self::Test(r)
    }
}

impl From<UploadResult> for PhaseResult {
    fn from(r: UploadResult) -> Self {
        Self::Upload(r)
    }
}

/// 패키지 최종 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    Passed,
    Failed,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => f.write_str("passed"),
            Self::Failed => f.write_str("failed"),
        }
    }
}

/// 패키지 하나의 단계별 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReport {
    pub package_name: String,
    pub phases: BTreeMap<Phase, PhaseResult>,
}

impl PackageReport {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            phases: BTreeMap::new(),
        }
    }

    /// 단계 결과를 기록합니다. 같은 단계가 이미 있으면 교체합니다.
    pub fn record(&mut self, result: PhaseResult) {
        self.phases.insert(result.phase(), result);
    }

    pub fn init(&self) -> Option<&InitResult> {
        match self.phases.get(&Phase::Init) {
            Some(PhaseResult::Init(r)) => Some(r),
            _ => None,
        }
    }

    pub fn build(&self) -> Option<&BuildResult> {
        match self.phases.get(&Phase::Build) {
            Some(PhaseResult::Build(r)) => Some(r),
            _ => None,
        }
    }

    pub fn test(&self) -> Option<&TestResult> {
        match self.phases.get(&Phase::Test) {
            Some(PhaseResult::Test(r)) => Some(r),
            _ => None,
        }
    }

    pub fn upload(&self) -> Option<&UploadResult> {
        match self.phases.get(&Phase::Upload) {
            Some(PhaseResult::Upload(r)) => Some(r),
            _ => None,
        }
    }

    /// 기록된 단계 목록 (정규 순서)
    pub fn phase_names(&self) -> Vec<Phase> {
        self.phases.keys().copied().collect()
    }

    /// 모든 단계의 에러 블록 수
    pub fn error_count(&self) -> usize {
        self.phases.values().map(|r| r.errors().len()).sum()
    }

    /// 어느 단계든 실패가 있으면 `Failed`
    pub fn status(&self) -> PackageStatus {
        if self.phases.values().all(PhaseResult::is_ok) {
            PackageStatus::Passed
        } else {
            PackageStatus::Failed
        }
    }
}

/// 리포트 요약 카운트
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// 빌드 산출물 이름 → 패키지 결과 매핑
///
/// 같은 산출물 이름이 두 번 나오면 나중 패키지가 앞의 것을 덮어씁니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildReport {
    packages: BTreeMap<String, PackageReport>,
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 패키지 결과를 추가합니다. 덮어쓴 이전 결과가 있으면 반환합니다.
    pub fn insert(
        &mut self,
        built_name: impl Into<String>,
        report: PackageReport,
    ) -> Option<PackageReport> {
        self.packages.insert(built_name.into(), report)
    }

    pub fn get(&self, built_name: &str) -> Option<&PackageReport> {
        self.packages.get(built_name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn built_names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, PackageReport> {
        self.packages.iter()
    }

    /// 실패한 패키지만 순회합니다.
    pub fn failed(&self) -> impl Iterator<Item = (&String, &PackageReport)> {
        self.packages
            .iter()
            .filter(|(_, r)| r.status() == PackageStatus::Failed)
    }

    pub fn summary(&self) -> ReportSummary {
        let failed = self.failed().count();
        ReportSummary {
            total: self.packages.len(),
            passed: self.packages.len() - failed,
            failed,
        }
    }
}

impl<'a> IntoIterator for &'a BuildReport {
    type Item = (&'a String, &'a PackageReport);
    type IntoIter = btree_map::Iter<'a, String, PackageReport>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> ErrorBlock {
        ErrorBlock::new(lines.iter().map(|l| (*l).to_owned()).collect()).unwrap()
    }

    #[test]
    fn phase_order_is_canonical() {
        assert!(Phase::Init < Phase::Build);
        assert!(Phase::Build < Phase::Test);
        assert!(Phase::Test < Phase::Upload);
        assert_eq!(Phase::Init.next(), Some(Phase::Build));
        assert_eq!(Phase::Upload.next(), None);
    }

    #[test]
    fn phase_display_and_serde_use_lowercase() {
        assert_eq!(Phase::Upload.to_string(), "upload");
        assert_eq!(serde_json::to_string(&Phase::Test).unwrap(), "\"test\"");
    }

    #[test]
    fn error_block_rejects_empty() {
        assert!(ErrorBlock::new(Vec::new()).is_none());
    }

    #[test]
    fn error_block_text_joins_with_newline() {
        let b = block(&["Error: one", "Error: two"]);
        assert_eq!(b.text(), "Error: one\nError: two");
        assert_eq!(b.first_line(), "Error: one");
        assert_eq!(b.len(), 2);
        assert_eq!(b.to_string(), b.text());
    }

    #[test]
    fn upload_result_defaults_to_auto_upload() {
        assert!(UploadResult::default().auto_upload);
    }

    #[test]
    fn build_failed_sentinel_marks_phase_not_ok() {
        let result = PhaseResult::Build(BuildResult {
            built_name: Some(FAILED_BUILD_NAME.to_owned()),
            errors: Vec::new(),
        });
        assert!(!result.is_ok());
    }

    #[test]
    fn package_status_reflects_errors() {
        let mut report = PackageReport::new("foo");
        report.record(InitResult::default().into());
        report.record(
            BuildResult {
                built_name: Some("foo-1.0-0".to_owned()),
                errors: Vec::new(),
            }
            .into(),
        );
        assert_eq!(report.status(), PackageStatus::Passed);

        report.record(
            TestResult {
                nothing_to_test: false,
                errors: vec![block(&["Error: No packages found in current linux-64 channels"])],
            }
            .into(),
        );
        assert_eq!(report.status(), PackageStatus::Failed);
        assert_eq!(report.error_count(), 1);
        assert_eq!(
            report.phase_names(),
            vec![Phase::Init, Phase::Build, Phase::Test]
        );
    }

    #[test]
    fn typed_accessors_return_matching_variant() {
        let mut report = PackageReport::new("foo");
        report.record(UploadResult::default().into());
        assert!(report.upload().is_some());
        assert!(report.build().is_none());
        assert!(report.init().is_none());
    }

    #[test]
    fn build_report_later_insert_overwrites() {
        let mut report = BuildReport::new();
        assert!(report.insert("foo-1.0-0", PackageReport::new("first")).is_none());
        let old = report.insert("foo-1.0-0", PackageReport::new("second"));
        assert_eq!(old.map(|r| r.package_name), Some("first".to_owned()));
        assert_eq!(report.len(), 1);
        assert_eq!(report.get("foo-1.0-0").unwrap().package_name, "second");
    }

    #[test]
    fn build_report_summary_counts() {
        let mut report = BuildReport::new();
        let mut ok = PackageReport::new("ok");
        ok.record(BuildResult::default().into());
        let mut bad = PackageReport::new("bad");
        bad.record(
            BuildResult {
                built_name: Some(FAILED_BUILD_NAME.to_owned()),
                errors: vec![block(&["Error: boom"])],
            }
            .into(),
        );
        report.insert("ok-1.0-0", ok);
        report.insert("bad-1.0-0", bad);

        let summary = report.summary();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        let failed: Vec<_> = report.failed().map(|(k, _)| k.as_str()).collect();
        assert_eq!(failed, vec!["bad-1.0-0"]);
    }

    #[test]
    fn phase_result_json_is_tagged_by_phase() {
        let result = PhaseResult::Test(TestResult {
            nothing_to_test: true,
            errors: Vec::new(),
        });
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["phase"], "test");
        assert_eq!(json["nothing_to_test"], true);

        let parsed: PhaseResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }
}
