//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: typed failures of the pure curve-fitting core. Every
//!   validation failure has its own variant so callers can match on it.
//! - [`AppError`]: what the binary reports, a message plus a process exit code.
//!
//! Exit codes:
//! - `2`: invalid input or configuration (bad degree, unreadable file, ...)
//! - `3`: not enough data to fit
//! - `4`: numerical failure

/// Failures of the fitting core.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("degree must be 1 or greater (got {degree})")]
    InvalidDegree { degree: usize },

    #[error("X and Y must be of the same length (got {x_len} and {y_len})")]
    MismatchedLength { x_len: usize, y_len: usize },

    /// Fewer samples than unknown control points (`actual <= degree`).
    #[error("a Bezier curve of degree {degree} needs more than {degree} points; got only {actual}")]
    InsufficientSamples { degree: usize, actual: usize },

    #[error("number of evaluation samples must be at least 1 (got {count})")]
    InvalidSampleCount { count: usize },

    #[error("sample {index} has a non-finite coordinate")]
    NonFiniteSample { index: usize },

    #[error("at least one control point is required")]
    NoControlPoints,

    /// The design matrix is numerically rank deficient.
    ///
    /// Only returned when the caller asked for singular fits to be rejected;
    /// otherwise the minimum-norm solution is returned and flagged in the
    /// fit diagnostics.
    #[error("design matrix is rank deficient (effective rank {rank}, need {required}); control points are not uniquely determined")]
    SingularFit { rank: usize, required: usize },

    #[error("least-squares solve failed: {0}")]
    Solver(&'static str),
}

impl FitError {
    /// Exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InvalidDegree { .. }
            | FitError::MismatchedLength { .. }
            | FitError::InvalidSampleCount { .. }
            | FitError::NonFiniteSample { .. }
            | FitError::NoControlPoints => 2,
            FitError::InsufficientSamples { .. } => 3,
            FitError::SingularFit { .. } | FitError::Solver(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_samples_message_names_both_counts() {
        let err = FitError::InsufficientSamples { degree: 4, actual: 3 };
        let msg = err.to_string();
        assert!(msg.contains("more than 4"), "{msg}");
        assert!(msg.contains("degree 4"), "{msg}");
        assert!(msg.contains("only 3"), "{msg}");
    }

    #[test]
    fn insufficient_samples_message_handles_largest_degree() {
        let err = FitError::InsufficientSamples { degree: usize::MAX, actual: 3 };
        assert!(err.to_string().contains(&usize::MAX.to_string()));
    }

    #[test]
    fn fit_error_maps_to_exit_codes() {
        let app: AppError = FitError::InvalidDegree { degree: 0 }.into();
        assert_eq!(app.exit_code(), 2);
        let app: AppError = FitError::InsufficientSamples { degree: 3, actual: 2 }.into();
        assert_eq!(app.exit_code(), 3);
        let app: AppError = FitError::SingularFit { rank: 2, required: 4 }.into();
        assert_eq!(app.exit_code(), 4);
    }
}
