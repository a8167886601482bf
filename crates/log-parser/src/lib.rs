//! 빌드 파이프라인 로그 분석기
//!
//! 여러 패키지의 패키징/빌드/테스트/업로드 출력이 이어 붙은 로그를
//! 패키지별 단계 결과 리포트로 변환합니다.
//!
//! # 모듈 구성
//!
//! - [`source`]: 로그 파일/스트림 로딩
//! - [`segmenter`]: 패키지 경계 분할 (지연 이터레이터)
//! - [`classifier`]: 센티널 기반 단계 분류 상태 기계
//! - [`extractor`]: 공유 커서 기반 에러/트레이스백 블록 추출
//! - [`parser`]: init/build/test/upload 단계 파서
//! - [`aggregator`]: 산출물 이름 기준 리포트 집계
//! - [`pipeline`]: 전체 흐름 오케스트레이션
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! LogSource -> LogSegmenter -> PhaseClassifier -> PhaseParsers -> ReportAggregator
//!                  |                 |                 |
//!            PackageGroup      PhaseSegment    ErrorExtractor (공유 커서)
//! ```

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod extractor;
pub mod parser;
pub mod pipeline;
pub mod segmenter;
pub mod source;

// --- 주요 타입 re-export ---

// 파이프라인
pub use pipeline::{BuildLogParser, PhaseOutline};

// 에러
pub use error::LogParserError;

// 구성 요소
pub use aggregator::ReportAggregator;
pub use classifier::PhaseClassifier;
pub use extractor::{LineCursor, extract_error_block};
pub use parser::{BuildParser, InitParser, TestParser, UploadParser, parse_segment};
pub use segmenter::LogSegmenter;
pub use source::LogSource;
