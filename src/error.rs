use thiserror::Error;

/// Errors raised by the pure probability model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// `C(n, r)` is undefined for `r > n`.
    #[error("Invalid binomial coefficient C({n}, {r}): r must not exceed n.")]
    Domain { n: u32, r: u32 },

    /// `C(n, r)` exceeds the largest finite `f64`.
    #[error("Binomial coefficient C({n}, {r}) overflows f64.")]
    Overflow { n: u32, r: u32 },

    #[error("Invalid signal accuracy q={0}: must be a finite value in [0, 1].")]
    Probability(f64),

    #[error("Too many signals: n={n} exceeds the supported maximum of {max}.")]
    TooManySignals { n: u32, max: u32 },

    #[error("Affine calibration failed: {0}")]
    Fit(String),
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
}

impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        Self::new(2, err.to_string())
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
    fn model_errors_map_to_invalid_input_exit_code() {
        let err: AppError = ModelError::Domain { n: 2, r: 5 }.into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("C(2, 5)"));
    }
}
