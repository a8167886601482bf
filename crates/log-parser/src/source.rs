//! 입력 로그 로딩
//!
//! 빌드 스크립트 출력(`bash dev-build > build.log 2>&1`)을 라인 목록으로
//! 읽어 옵니다. UTF-8이 아닌 바이트는 대체 문자로 디코딩합니다.
//! 파일을 얻지 못하는 것이 파이프라인 전체에서 유일한 치명적 실패입니다.

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::error::LogParserError;

/// 메모리에 읽어 들인 로그 라인
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSource {
    lines: Vec<String>,
}

impl LogSource {
    /// 파일에서 로그를 읽습니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, LogParserError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LogParserError::NotFound {
                    path: path.display().to_string(),
                }
            } else {
                LogParserError::Read {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        let source = Self::from_text(&String::from_utf8_lossy(&bytes));
        debug!(path = %path.display(), lines = source.len(), "log loaded");
        Ok(source)
    }

    /// 버퍼 리더에서 로그를 읽습니다.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LogParserError> {
        let mut lines = Vec::new();
        for chunk in reader.split(b'\n') {
            let chunk = chunk?;
            lines.push(decode_line(&chunk));
        }
        Ok(Self { lines })
    }

    /// 문자열에서 로그를 만듭니다.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_splits_lines() {
        let source = LogSource::from_text("a\r\nb\n\nc");
        assert_eq!(source.lines(), &["a", "b", "", "c"]);
    }

    #[test]
    fn from_reader_decodes_lossily() {
        let data: &[u8] = b"ok\n\xff\xfebroken\r\nlast";
        let source = LogSource::from_reader(data).unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(source.lines()[0], "ok");
        assert!(source.lines()[1].ends_with("broken"));
        assert_eq!(source.lines()[2], "last");
    }

    #[tokio::test]
    async fn load_missing_file_is_not_found() {
        let err = LogSource::load("/nonexistent/dir/build.log").await.unwrap_err();
        assert!(matches!(err, LogParserError::NotFound { .. }));
    }

    #[tokio::test]
    async fn load_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("build.log");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let source = LogSource::load(&path).await.unwrap();
        assert_eq!(source.into_lines(), vec!["line one", "line two"]);
    }
}
