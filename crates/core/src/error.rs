//! 에러 타입 -- 도메인별 에러 정의
//!
//! 로그 안의 이상 징후(누락된 단계, 잘린 에러 블록, 해석되지 않은 이름)는
//! 에러가 아니라 리포트 데이터로 표현됩니다. 여기 정의된 에러는
//! 입력 자체를 얻지 못했거나 설정이 잘못된 경우에만 사용됩니다.

/// buildlog 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum BuildLogError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 입력 로그를 얻지 못함
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 입력 로그 에러
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// 로그 파일이 존재하지 않음
    #[error("log file not found: {path}")]
    NotFound { path: String },

    /// 로그 파일을 읽을 수 없음
    #[error("cannot read log file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}
