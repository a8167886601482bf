//! CLI-specific error types and exit code mapping

use buildlog_core::error::BuildLogError;
use buildlog_parser::LogParserError;

/// CLI-specific error type.
///
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The report contains failed packages.
    #[error("{0} package(s) failed")]
    PackagesFailed(usize),

    /// The build log could not be read.
    #[error("input error: {0}")]
    Input(#[from] LogParserError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from buildlog-core.
    #[error("{0}")]
    Core(#[from] BuildLogError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                          |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | Configuration error              |
    /// | 4    | Report contains failed packages  |
    /// | 10   | IO / input error                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Core(BuildLogError::Config(_)) => 2,
            Self::PackagesFailed(_) => 4,
            Self::Input(_)
            | Self::Io(_)
            | Self::Core(BuildLogError::Input(_))
            | Self::Core(BuildLogError::Io(_)) => 10,
            Self::JsonSerialize(_) | Self::Command(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildlog_core::error::{ConfigError, InputError};

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::from(BuildLogError::Config(ConfigError::FileNotFound {
            path: "buildlog.toml".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_packages_failed() {
        let err = CliError::PackagesFailed(3);
        assert_eq!(err.exit_code(), 4, "failed packages should return exit code 4");
        assert_eq!(err.to_string(), "3 package(s) failed");
    }

    #[test]
    fn test_exit_code_input_errors() {
        let err = CliError::from(LogParserError::NotFound {
            path: "build.log".to_owned(),
        });
        assert_eq!(err.exit_code(), 10);

        let err = CliError::from(BuildLogError::Input(InputError::NotFound {
            path: "build.log".to_owned(),
        }));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("unknown section".to_owned());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "unknown section");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("configuration is invalid".to_owned());
        let display_str = err.to_string();
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("configuration is invalid"));
    }
}
