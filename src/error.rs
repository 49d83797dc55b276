use thiserror::Error;

/// Errors raised while accumulating observations or predicting outputs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrackError {
    #[error("not enough bits submitted: {submitted} of at least {required} required")]
    InsufficientData { submitted: usize, required: usize },

    #[error("cracker is not ready for prediction, call check() first")]
    NotReady,

    #[error("observations of {submitted} bits include partial-width values, which need the matrix solver and it is not available")]
    MatrixSolverUnavailable { submitted: usize },

    #[error("width must be a positive multiple of 32, got {width}")]
    InvalidWidth { width: usize },

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

impl CrackError {
    /// Whether submitting more observations (or calling `check`) can clear
    /// the error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CrackError::InsufficientData { .. } | CrackError::NotReady
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(CrackError::InsufficientData { submitted: 32, required: 19968 }, true)]
    #[case(CrackError::NotReady, true)]
    #[case(CrackError::MatrixSolverUnavailable { submitted: 20000 }, false)]
    #[case(CrackError::InvalidWidth { width: 12 }, false)]
    #[case(CrackError::InvariantViolation("bad".to_string()), false)]
    fn is_recoverable_separates_data_errors_from_fatal_ones(
        #[case] error: CrackError,
        #[case] recoverable: bool,
    ) {
        assert_eq!(error.is_recoverable(), recoverable);
    }

    #[test]
    fn insufficient_data_message_includes_counts() {
        let error = CrackError::InsufficientData {
            submitted: 64,
            required: 19968,
        };

        assert_eq!(
            error.to_string(),
            "not enough bits submitted: 64 of at least 19968 required"
        );
    }
}
