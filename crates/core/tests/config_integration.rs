//! buildlog.toml 통합 설정 테스트
//!
//! - buildlog.toml.example 파싱 테스트
//! - 파일 로딩 및 환경변수 우선순위 테스트
//! - 잘못된 형식 에러 테스트

use std::fs;

use buildlog_core::config::BuildLogConfig;
use buildlog_core::error::{BuildLogError, ConfigError};
use serial_test::serial;
use tempfile::TempDir;

// =============================================================================
// buildlog.toml.example 파싱 테스트
// =============================================================================

#[test]
fn example_config_parses_successfully() {
    let content = include_str!("../../../buildlog.toml.example");
    let config = BuildLogConfig::parse(content).expect("example config should parse");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.general.log_format, "pretty");
    assert_eq!(config.report.output_format, "text");
    assert!(config.report.show_errors);
    assert!(!config.report.failed_only);
}

#[test]
fn example_config_passes_validation() {
    let content = include_str!("../../../buildlog.toml.example");
    let config = BuildLogConfig::parse(content).expect("should parse");
    config
        .validate()
        .expect("example config should pass validation");
}

// =============================================================================
// 파일 로딩 테스트
// =============================================================================

#[tokio::test]
#[serial]
async fn load_reads_file_and_validates() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("buildlog.toml");
    fs::write(
        &path,
        "[general]\nlog_level = \"debug\"\n\n[report]\noutput_format = \"json\"\n",
    )
    .expect("should write config");

    let config = BuildLogConfig::load(&path).await.expect("should load");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.report.output_format, "json");
}

#[tokio::test]
#[serial]
async fn load_rejects_invalid_value() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("buildlog.toml");
    fs::write(&path, "[report]\noutput_format = \"html\"\n").expect("should write config");

    let err = BuildLogConfig::load(&path).await.unwrap_err();
    assert!(matches!(
        err,
        BuildLogError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[tokio::test]
#[serial]
async fn load_malformed_toml_fails() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[general\nlog_level = \"info\"\n").expect("should write config");

    let err = BuildLogConfig::load(&path).await.unwrap_err();
    assert!(matches!(
        err,
        BuildLogError::Config(ConfigError::ParseFailed { .. })
    ));
}

// =============================================================================
// 환경변수 우선순위 테스트
// =============================================================================

#[tokio::test]
#[serial]
async fn env_var_overrides_file_value() {
    let dir = TempDir::new().expect("should create temp dir");
    let path = dir.path().join("buildlog.toml");
    fs::write(&path, "[report]\nshow_errors = true\n").expect("should write config");

    // SAFETY: #[serial]로 환경변수를 만지는 테스트끼리 동시에 실행되지 않습니다.
    unsafe { std::env::set_var("BUILDLOG_REPORT_SHOW_ERRORS", "false") };
    let result = BuildLogConfig::load(&path).await;
    unsafe { std::env::remove_var("BUILDLOG_REPORT_SHOW_ERRORS") };

    let config = result.expect("should load");
    assert!(!config.report.show_errors);
}

#[test]
#[serial]
fn from_env_without_file_uses_defaults() {
    let config = BuildLogConfig::from_env().expect("defaults should validate");
    assert_eq!(config.report.output_format, "text");
}
