//! 설정 관리 -- buildlog.toml 파싱 및 런타임 설정
//!
//! [`BuildLogConfig`]는 로깅과 리포트 출력 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`BUILDLOG_REPORT_FAILED_ONLY=true` 형식)
//! 3. 설정 파일 (`buildlog.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), buildlog_core::error::BuildLogError> {
//! use buildlog_core::config::BuildLogConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = BuildLogConfig::load("buildlog.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = BuildLogConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BuildLogError, ConfigError};

/// 허용되는 로그 레벨
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
/// 허용되는 로그 형식
const VALID_LOG_FORMATS: [&str; 2] = ["json", "pretty"];
/// 허용되는 리포트 출력 형식
const VALID_OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

/// buildlog 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildLogConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 리포트 출력 설정
    #[serde(default)]
    pub report: ReportConfig,
}

impl BuildLogConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, BuildLogError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, BuildLogError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BuildLogError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                BuildLogError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 기본값에 환경변수 오버라이드만 적용한 설정을 만듭니다.
    ///
    /// 설정 파일 없이 실행할 때 사용합니다.
    pub fn from_env() -> Result<Self, BuildLogError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, BuildLogError> {
        toml::from_str(toml_str).map_err(|e| {
            BuildLogError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `BUILDLOG_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "BUILDLOG_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "BUILDLOG_GENERAL_LOG_FORMAT");

        override_string(
            &mut self.report.output_format,
            "BUILDLOG_REPORT_OUTPUT_FORMAT",
        );
        override_bool(&mut self.report.show_errors, "BUILDLOG_REPORT_SHOW_ERRORS");
        override_bool(&mut self.report.failed_only, "BUILDLOG_REPORT_FAILED_ONLY");
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), BuildLogError> {
        check_one_of(
            "general.log_level",
            &self.general.log_level,
            &VALID_LOG_LEVELS,
        )?;
        check_one_of(
            "general.log_format",
            &self.general.log_format,
            &VALID_LOG_FORMATS,
        )?;
        check_one_of(
            "report.output_format",
            &self.report.output_format,
            &VALID_OUTPUT_FORMATS,
        )?;
        Ok(())
    }
}

fn check_one_of(field: &str, value: &str, valid: &[&str]) -> Result<(), BuildLogError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_owned(),
            reason: format!("must be one of: {}", valid.join(", ")),
        }
        .into())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 리포트 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 출력 형식 (text, json)
    pub output_format: String,
    /// 표 아래에 에러 블록 본문을 출력할지 여부
    pub show_errors: bool,
    /// 실패한 패키지만 출력할지 여부
    pub failed_only: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_format: "text".to_owned(),
            show_errors: true,
            failed_only: false,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = BuildLogConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.report.output_format, "text");
        assert!(config.report.show_errors);
        assert!(!config.report.failed_only);
    }

    #[test]
    fn default_config_passes_validation() {
        BuildLogConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = BuildLogConfig::parse("").unwrap();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.report.output_format, "text");
    }

    #[test]
    fn parse_partial_toml_merges_with_defaults() {
        let toml = r#"
[report]
failed_only = true
"#;
        let config = BuildLogConfig::parse(toml).unwrap();
        assert!(config.report.failed_only);
        // 나머지는 기본값 유지
        assert!(config.report.show_errors);
        assert_eq!(config.general.log_format, "pretty");
    }

    #[test]
    fn parse_invalid_toml_returns_error() {
        let err = BuildLogConfig::parse("invalid = [[[toml").unwrap_err();
        assert!(matches!(
            err,
            BuildLogError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = BuildLogConfig::default();
        config.general.log_level = "verbose".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }

    #[test]
    fn validate_rejects_invalid_output_format() {
        let mut config = BuildLogConfig::default();
        config.report.output_format = "html".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("output_format"));
    }

    #[test]
    #[serial]
    fn env_override_bool_valid() {
        let mut val = false;
        // SAFETY: #[serial]로 환경변수를 만지는 테스트끼리 동시에 실행되지 않습니다.
        unsafe { std::env::set_var("TEST_BUILDLOG_BOOL", "true") };
        override_bool(&mut val, "TEST_BUILDLOG_BOOL");
        assert!(val);
        unsafe { std::env::remove_var("TEST_BUILDLOG_BOOL") };
    }

    #[test]
    #[serial]
    fn env_override_bool_invalid_keeps_original() {
        let mut val = true;
        // SAFETY: #[serial]로 환경변수를 만지는 테스트끼리 동시에 실행되지 않습니다.
        unsafe { std::env::set_var("TEST_BUILDLOG_BOOL_BAD", "yes please") };
        override_bool(&mut val, "TEST_BUILDLOG_BOOL_BAD");
        assert!(val);
        unsafe { std::env::remove_var("TEST_BUILDLOG_BOOL_BAD") };
    }

    #[test]
    #[serial]
    fn apply_env_overrides_reads_report_section() {
        let mut config = BuildLogConfig::default();
        // SAFETY: #[serial]로 환경변수를 만지는 테스트끼리 동시에 실행되지 않습니다.
        unsafe {
            std::env::set_var("BUILDLOG_REPORT_OUTPUT_FORMAT", "json");
            std::env::set_var("BUILDLOG_REPORT_FAILED_ONLY", "true");
        }
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var("BUILDLOG_REPORT_OUTPUT_FORMAT");
            std::env::remove_var("BUILDLOG_REPORT_FAILED_ONLY");
        }
        assert_eq!(config.report.output_format, "json");
        assert!(config.report.failed_only);
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_BUILDLOG_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = BuildLogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = BuildLogConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.report.show_errors, parsed.report.show_errors);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = BuildLogConfig::from_file("/nonexistent/path/buildlog.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BuildLogError::Config(ConfigError::FileNotFound { .. })
        ));
    }
}
