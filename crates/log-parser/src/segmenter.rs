//! 패키지 경계 분할기
//!
//! 여러 패키지의 빌드 출력이 이어 붙은 로그를 패키지별 [`PackageGroup`]으로
//! 나눕니다. 입력 라인은 여기서 앞뒤 공백이 제거되며, 결과는 지연
//! 이터레이터로 만나는 순서대로 생성됩니다.
//!
//! # 인식하는 마커
//! - `/tmp/staged-recipes`로 시작: 패키지 경계 (라인 자체는 버림)
//! - `# $ anaconda upload <경로>` 포함: 경로의 파일 이름에서 산출물 이름 해석
//! - `BUILD START: <이름>`으로 시작: 아직 해석되지 않았다면 산출물 이름 해석.
//!   경계 없이 나온 경우 패키지 이름도 여기서 얻고 새 패키지를 시작
//!
//! 마지막 그룹은 뒤따르는 경계가 없어도 항상 생성됩니다.

use buildlog_core::types::{LogLine, PackageGroup};
use tracing::debug;

/// 패키지 경계 라인 접두사
pub const BOUNDARY_PREFIX: &str = "/tmp/staged-recipes";

/// 경로가 붙은 업로드 명령 마커
pub const UPLOAD_WITH_PATH_MARKER: &str = "# $ anaconda upload ";

/// conda-build가 직접 출력하는 빌드 시작 라인 접두사
pub const BUILD_START_NAME_PREFIX: &str = "BUILD START: ";

/// 아카이브 확장자 길이 (`.tar.bz2`)
const ARCHIVE_SUFFIX_LEN: usize = 8;

/// 해석되지 않은 산출물 이름 자리표시자
pub fn placeholder_built_name(package_name: &str) -> String {
    format!("{package_name}-build-name-not-found")
}

/// 업로드 라인의 마지막 토큰(경로)에서 산출물 이름을 얻습니다.
///
/// 디렉토리 부분과 고정 8글자 확장자를 제거합니다.
/// 파일 이름이 8글자보다 짧으면 빈 문자열이 됩니다.
pub fn built_name_from_upload_line(line: &str) -> Option<String> {
    let path = line.split_whitespace().last()?;
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let keep = file_name.chars().count().saturating_sub(ARCHIVE_SUFFIX_LEN);
    Some(file_name.chars().take(keep).collect())
}

/// 경계 라인에서 패키지 이름(마지막 경로 구성요소)을 얻습니다.
fn package_name_from_boundary(line: &str) -> String {
    let trimmed = line.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_owned()
}

/// 패키지 경계 분할 이터레이터
///
/// 입력 이터레이터를 한 번만 전진하며, 경계를 만날 때마다 직전 패키지를
/// 내보냅니다.
pub struct LogSegmenter<I> {
    /// 원시 입력 라인
    input: I,
    /// 현재 패키지의 라인 누적
    lines: Vec<LogLine>,
    /// 현재 패키지 이름
    package_name: String,
    /// 경계나 `BUILD START: ` 라인으로 시작된 패키지가 있는지 여부
    pending: bool,
    /// 현재 산출물 이름 (빈 문자열이면 아직 없음)
    built_name: String,
    /// 산출물 이름이 실제 마커로 해석되었는지 여부
    built_name_resolved: bool,
    /// 마지막 그룹을 이미 내보냈는지 여부
    finished: bool,
}

impl<I, S> LogSegmenter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// 원시 라인 이터레이터로 분할기를 만듭니다.
    pub fn new<T>(input: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            input: input.into_iter(),
            lines: Vec::new(),
            package_name: String::new(),
            pending: false,
            built_name: String::new(),
            built_name_resolved: false,
            finished: false,
        }
    }

    /// 현재 누적 상태를 그룹으로 꺼내고 비웁니다.
    fn take_group(&mut self) -> PackageGroup {
        let built_name = if self.built_name.is_empty() && !self.built_name_resolved {
            placeholder_built_name(&self.package_name)
        } else {
            std::mem::take(&mut self.built_name)
        };
        self.pending = false;
        PackageGroup {
            package_name: std::mem::take(&mut self.package_name),
            built_name,
            lines: std::mem::take(&mut self.lines),
        }
    }

    /// 경계 라인을 처리합니다. 보류 중인 패키지가 있으면 그룹을 반환합니다.
    fn start_package(&mut self, boundary: &str) -> Option<PackageGroup> {
        let previous = if !self.pending {
            if !self.lines.is_empty() {
                debug!(
                    dropped = self.lines.len(),
                    "discarding lines before first package boundary"
                );
            }
            self.lines.clear();
            None
        } else {
            Some(self.take_group())
        };

        self.package_name = package_name_from_boundary(boundary);
        self.pending = true;
        self.built_name = placeholder_built_name(&self.package_name);
        self.built_name_resolved = false;
        debug!(package = %self.package_name, "package boundary");
        previous
    }

    /// 경계가 아닌 라인에서 이름 마커를 확인합니다.
    fn resolve_names(&mut self, line: &str) {
        if line.contains(UPLOAD_WITH_PATH_MARKER) {
            if let Some(name) = built_name_from_upload_line(line) {
                debug!(package = %self.package_name, built_name = %name, "built name from upload line");
                self.built_name = name;
                self.built_name_resolved = true;
            }
        }

        if !self.built_name_resolved {
            if let Some(rest) = line.strip_prefix(BUILD_START_NAME_PREFIX) {
                let rest = rest.trim();
                debug!(built_name = rest, "built name from BUILD START line");
                // 경계가 없을 때만 패키지 이름도 여기서 얻음
                if !self.pending {
                    self.package_name = rest.split('-').next().unwrap_or(rest).to_owned();
                    self.pending = true;
                }
                self.built_name = rest.to_owned();
                self.built_name_resolved = true;
            }
        }
    }
}

impl<I, S> Iterator for LogSegmenter<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = PackageGroup;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(raw) = self.input.next() {
            let line = raw.as_ref().trim();

            if line.starts_with(BOUNDARY_PREFIX) {
                if let Some(group) = self.start_package(line) {
                    return Some(group);
                }
                continue;
            }

            self.resolve_names(line);
            self.lines.push(line.to_owned());
        }

        self.finished = true;
        Some(self.take_group())
    }
}
