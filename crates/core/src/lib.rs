//! buildlog 공통 크레이트
//!
//! 빌드 파이프라인 로그 분석에 쓰이는 도메인 타입, 파서 trait,
//! 에러 계층, `buildlog.toml` 설정을 정의합니다.
//! 실제 분할/분류 로직은 `buildlog-parser` 크레이트가 담당합니다.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{BuildLogError, ConfigError, InputError};

// 설정
pub use config::BuildLogConfig;

// 파서 trait
pub use pipeline::PhaseParser;

// 도메인 타입
pub use types::{
    BuildReport, BuildResult, ErrorBlock, InitResult, LogLine, PackageGroup, PackageReport,
    PackageStatus, Phase, PhaseResult, PhaseSegment, ReportSummary, TestResult, UploadResult,
};
