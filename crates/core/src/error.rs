//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by simulation and configuration operations.
#[derive(Debug, Error)]
pub enum FlowError {
    /// World bounds were zero, negative, or not finite.
    #[error("invalid dimensions {width}x{height}: width and height must be finite and positive")]
    InvalidDimensions { width: f64, height: f64 },

    /// `step` was called before the first `resize`.
    #[error("simulation is uninitialized: call resize() before step()")]
    Uninitialized,

    /// A configuration value was present but outside its allowed range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A configuration value existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// Writing an artifact (snapshot, report) failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl FlowError {
    /// Shorthand for [`FlowError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        FlowError::InvalidParam {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_includes_both_sides() {
        let err = FlowError::InvalidDimensions {
            width: 0.0,
            height: 600.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("0x600"), "expected dimensions in: {msg}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn uninitialized_mentions_resize() {
        let msg = FlowError::Uninitialized.to_string();
        assert!(msg.contains("resize"), "missing hint in: {msg}");
    }

    #[test]
    fn invalid_param_includes_name_and_reason() {
        let err = FlowError::invalid_param("particle_count", "must be at least 1");
        let msg = format!("{err}");
        assert!(msg.contains("particle_count"), "missing name in: {msg}");
        assert!(msg.contains("at least 1"), "missing reason in: {msg}");
    }

    #[test]
    fn param_type_mismatch_includes_all_fields() {
        let err = FlowError::ParamTypeMismatch {
            name: "sink_radius".into(),
            expected: "number".into(),
            got: "string".into(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("sink_radius"), "missing param name in: {msg}");
        assert!(msg.contains("number"), "missing expected type in: {msg}");
        assert!(msg.contains("string"), "missing got type in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let err = FlowError::Io("disk full".into());
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn flow_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlowError>();
    }

    #[test]
    fn flow_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FlowError>();
    }
}
