// /////////////////////////////////////////////////////////////////////////////
// SEO Pipeline
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Management
//!
//! Standardized Unix exit codes following BSD `sysexits.h` conventions.
//!
//! - **0**: Success
//! - **1**: General error
//! - **64-78**: Specific error conditions (BSD sysexits.h)
//! - **128+N**: Fatal signal N (e.g. 130 = SIGINT)

use std::fmt;

/// Exit codes following Unix conventions (BSD sysexits.h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful termination (0).
    #[default]
    Success = 0,

    /// General error (1).
    Error = 1,

    /// Command line usage error (64): invalid/missing arguments.
    UsageError = 64,

    /// Data format error (65): malformed LLM response, invalid job config.
    DataError = 65,

    /// Cannot open input (66): unreachable config file.
    NoInput = 66,

    /// Host name unknown (68): cannot resolve a collaborator endpoint.
    NoHost = 68,

    /// Service unavailable (69): LLM/image/sitemap collaborator unreachable.
    Unavailable = 69,

    /// Internal software error (70): an invariant was violated.
    Software = 70,

    /// System error (71).
    OsError = 71,

    /// Cannot create output file (73): export artifact could not be written.
    CantCreate = 73,

    /// I/O error (74).
    IoError = 74,

    /// Temporary failure, retry (75): the quality gate exhausted its budget.
    TempFail = 75,

    /// Remote error in protocol (76): a collaborator returned malformed data.
    Protocol = 76,

    /// Permission denied (77).
    NoPerm = 77,

    /// Configuration error (78): invalid/out-of-range job configuration.
    Config = 78,

    /// Interrupted by signal (SIGINT - Ctrl+C) (130).
    Interrupted = 130,

    /// Terminated by signal (SIGTERM) (143).
    Terminated = 143,
}

impl ExitCode {
    /// Converts to `i32` for use with `std::process::exit`.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a `PipelineError` kind string to the most specific exit code.
    pub fn from_error(error: &dyn std::error::Error) -> Self {
        let error_string = error.to_string().to_lowercase();

        if error_string.contains("permission") || error_string.contains("access denied") {
            ExitCode::NoPerm
        } else if error_string.contains("not found") || error_string.contains("no such") {
            ExitCode::NoInput
        } else if error_string.contains("invalid input") || error_string.contains("invalid configuration") {
            ExitCode::Config
        } else if error_string.contains("invalid") || error_string.contains("argument") {
            ExitCode::UsageError
        } else if error_string.contains("schema") || error_string.contains("parse") {
            ExitCode::DataError
        } else if error_string.contains("timeout") || error_string.contains("upstream") {
            ExitCode::Unavailable
        } else if error_string.contains("quality gate exhausted") {
            ExitCode::TempFail
        } else if error_string.contains("invariant") {
            ExitCode::Software
        } else if error_string.contains("io") || error_string.contains("write") {
            ExitCode::IoError
        } else {
            ExitCode::Error
        }
    }

    /// Human-readable description of the exit code.
    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::Error => "General error",
            ExitCode::UsageError => "Command line usage error",
            ExitCode::DataError => "Data format error",
            ExitCode::NoInput => "Cannot open input",
            ExitCode::NoHost => "Host name unknown",
            ExitCode::Unavailable => "Service unavailable",
            ExitCode::Software => "Internal software error",
            ExitCode::OsError => "System error",
            ExitCode::CantCreate => "Cannot create output file",
            ExitCode::IoError => "I/O error",
            ExitCode::TempFail => "Temporary failure, retry",
            ExitCode::Protocol => "Remote error in protocol",
            ExitCode::NoPerm => "Permission denied",
            ExitCode::Config => "Configuration error",
            ExitCode::Interrupted => "Interrupted by signal (SIGINT)",
            ExitCode::Terminated => "Terminated by signal (SIGTERM)",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }

    pub fn is_error(self) -> bool {
        !self.is_success()
    }

    pub fn is_signal(self) -> bool {
        matches!(self, ExitCode::Interrupted | ExitCode::Terminated)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values_match_sysexits() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Error.as_i32(), 1);
        assert_eq!(ExitCode::UsageError.as_i32(), 64);
        assert_eq!(ExitCode::Config.as_i32(), 78);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
        assert_eq!(ExitCode::Terminated.as_i32(), 143);
    }

    #[test]
    fn is_success_and_is_error_are_complementary() {
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::Success.is_error());
        assert!(ExitCode::Config.is_error());
    }

    #[test]
    fn is_signal_detects_interrupt_and_terminate() {
        assert!(ExitCode::Interrupted.is_signal());
        assert!(ExitCode::Terminated.is_signal());
        assert!(!ExitCode::Success.is_signal());
    }

    #[derive(Debug)]
    struct StubError(String);

    impl fmt::Display for StubError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for StubError {}

    #[test]
    fn from_error_maps_quality_gate_exhaustion_to_temp_fail() {
        let err = StubError("quality gate exhausted after 3 attempts".to_string());
        assert_eq!(ExitCode::from_error(&err), ExitCode::TempFail);
    }

    #[test]
    fn from_error_maps_invalid_configuration_to_config() {
        let err = StubError("invalid configuration: quality_gate_aeo_min out of range".to_string());
        assert_eq!(ExitCode::from_error(&err), ExitCode::Config);
    }

    #[test]
    fn display_includes_description_and_code() {
        let display = format!("{}", ExitCode::UsageError);
        assert!(display.contains("Command line usage error"));
        assert!(display.contains("64"));
    }
}
