//! Exit codes for the `flowfield` binary.
//!
//! | code | meaning |
//! |---|---|
//! | 0  | success |
//! | 2  | clap rejected the arguments (before `run` starts) |
//! | 10 | the simulation failed while running |
//! | 11 | the PNG could not be written |
//! | 12 | a flag or `--params` value was rejected up front |
//! | 13 | a JSON report could not be produced |

use flowfield_core::FlowError;
use std::fmt;

pub enum CliError {
    /// The simulation or canvas failed after its inputs were accepted.
    Simulation(FlowError),
    /// Writing an output file failed.
    Io(String),
    /// A user-supplied value was rejected; the message names the flag.
    Input(String),
    Serialization(String),
}

impl CliError {
    /// Attributes a validation failure to the flag that supplied the value.
    ///
    /// I/O failures keep their own exit code.
    pub fn rejected(flag: &str, err: FlowError) -> Self {
        match err {
            FlowError::Io(msg) => CliError::Io(msg),
            other => CliError::Input(format!("{flag}: {other}")),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Simulation(e) => write!(f, "simulation failed: {e}"),
            CliError::Io(msg) => write!(f, "write failed: {msg}"),
            CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(msg) => write!(f, "could not encode report: {msg}"),
        }
    }
}

/// Errors raised while stepping or writing, after inputs were accepted.
impl From<FlowError> for CliError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Io(msg) => CliError::Io(msg),
            other => CliError::Simulation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_param_value_is_an_input_error_naming_the_flag() {
        let err = CliError::rejected(
            "--params",
            FlowError::invalid_param("step_size", "must be finite and > 0, got -1"),
        );
        assert_eq!(err.exit_code(), 12);
        let msg = err.to_string();
        assert!(msg.starts_with("--params:"), "{msg}");
        assert!(msg.contains("step_size"), "{msg}");
    }

    #[test]
    fn rejected_type_mismatch_is_an_input_error() {
        let err = CliError::rejected(
            "--params",
            FlowError::ParamTypeMismatch {
                name: "sink_count".into(),
                expected: "non-negative integer".into(),
                got: "float".into(),
            },
        );
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn rejected_canvas_size_is_an_input_error() {
        let err = CliError::rejected(
            "--width/--height",
            FlowError::InvalidDimensions {
                width: 0.0,
                height: 600.0,
            },
        );
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("--width/--height"));
    }

    #[test]
    fn step_failure_is_a_simulation_error() {
        let err = CliError::from(FlowError::Uninitialized);
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().starts_with("simulation failed"));
    }

    #[test]
    fn png_write_failure_keeps_io_code_on_both_paths() {
        let via_from = CliError::from(FlowError::Io("permission denied".into()));
        let via_rejected = CliError::rejected("--output", FlowError::Io("permission denied".into()));
        for err in [via_from, via_rejected] {
            assert_eq!(err.exit_code(), 11);
            assert!(err.to_string().contains("permission denied"));
        }
    }

    #[test]
    fn report_encoding_failure_is_a_serialization_error() {
        let bad = serde_json::from_str::<serde_json::Value>("[1, 2").unwrap_err();
        assert_eq!(CliError::from(bad).exit_code(), 13);
    }
}
