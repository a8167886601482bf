//! 로그 파서 에러 타입
//!
//! 로그 내용 때문에 실패하는 경우는 없습니다. 단계 누락, 잘린 에러 블록,
//! 해석되지 않은 이름은 모두 리포트 데이터로 표현됩니다.
//! [`LogParserError`]는 입력 라인을 얻지 못한 경우만 다룹니다.

use buildlog_core::error::{BuildLogError, InputError};

/// 로그 파서 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogParserError {
    /// 로그 파일이 존재하지 않음
    #[error("log file not found: {path}")]
    NotFound {
        /// 요청한 경로
        path: String,
    },

    /// 로그 파일 읽기 실패
    #[error("failed to read log {path}: {source}")]
    Read {
        /// 요청한 경로
        path: String,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 스트림 입력 읽기 실패
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<LogParserError> for BuildLogError {
    fn from(err: LogParserError) -> Self {
        match err {
            LogParserError::NotFound { path } => BuildLogError::Input(InputError::NotFound { path }),
            LogParserError::Read { path, source } => BuildLogError::Input(InputError::Unreadable {
                path,
                reason: source.to_string(),
            }),
            LogParserError::Io(e) => BuildLogError::Io(e),
        }
    }
}
