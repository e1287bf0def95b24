//! Error types for the rho kernel

use thiserror::Error;

/// Result type alias for rho operations
pub type Result<T> = std::result::Result<T, RhoError>;

/// Errors that can occur while evaluating rho
#[derive(Error, Debug)]
pub enum RhoError {
    /// Radicand `1 + beta^2 * (cdot^2 - 1)` is negative
    #[error("negative radicand {radicand} for cdot={cdot}, beta={beta}{}", at(.index))]
    NegativeRadicand { index: Option<usize>, cdot: f64, beta: f64, radicand: f64 },

    /// An input is NaN or infinite
    #[error("non-finite input cdot={cdot}, beta={beta}{}", at(.index))]
    NonFiniteInput { index: Option<usize>, cdot: f64, beta: f64 },

    /// Finite inputs whose squares or result leave the f64 range
    #[error("f64 overflow evaluating cdot={cdot}, beta={beta}{}", at(.index))]
    Overflow { index: Option<usize>, cdot: f64, beta: f64 },

    /// Pairwise batch inputs differ in length
    #[error("batch length mismatch: {cdots} cdot values, {betas} beta values")]
    LengthMismatch { cdots: usize, betas: usize },

    /// Output buffer does not match the input length
    #[error("output buffer length {actual} does not match input length {expected}")]
    OutputLengthMismatch { expected: usize, actual: usize },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors while reading or writing configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Subscriber installation failed
    #[error("Logging error: {0}")]
    Logging(String),
}

fn at(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at index {i}"),
        None => String::new(),
    }
}

impl RhoError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Attach a batch element index to a domain error
    pub fn at_index(self, i: usize) -> Self {
        match self {
            Self::NegativeRadicand { cdot, beta, radicand, .. } => {
                Self::NegativeRadicand { index: Some(i), cdot, beta, radicand }
            }
            Self::NonFiniteInput { cdot, beta, .. } => {
                Self::NonFiniteInput { index: Some(i), cdot, beta }
            }
            Self::Overflow { cdot, beta, .. } => Self::Overflow { index: Some(i), cdot, beta },
            other => other,
        }
    }

    /// Batch element index for domain errors raised during batch evaluation
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::NegativeRadicand { index, .. }
            | Self::NonFiniteInput { index, .. }
            | Self::Overflow { index, .. } => *index,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_index_tags_domain_errors_only() {
        let err = RhoError::NegativeRadicand { index: None, cdot: 0.5, beta: 10.0, radicand: -74.0 }
            .at_index(7);
        assert_eq!(err.index(), Some(7));

        let err = RhoError::LengthMismatch { cdots: 2, betas: 3 }.at_index(7);
        assert_eq!(err.index(), None);

        let err = RhoError::Overflow { index: None, cdot: 2.0, beta: 1e200 }.at_index(4);
        assert_eq!(err.index(), Some(4));
    }

    #[test]
    fn display_includes_index_when_present() {
        let err =
            RhoError::NegativeRadicand { index: None, cdot: 0.5, beta: 10.0, radicand: -74.0 };
        assert_eq!(err.to_string(), "negative radicand -74 for cdot=0.5, beta=10");

        let err = err.at_index(3);
        assert_eq!(err.to_string(), "negative radicand -74 for cdot=0.5, beta=10 at index 3");
    }
}
