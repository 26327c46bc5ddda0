//! Field-level validation shared by table editing and the state validator.

/// Reasons a single field value can be rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Value is NaN or infinite
    #[error("must be a finite number")]
    NotFinite,

    /// Value must be strictly positive
    #[error("must be positive")]
    NotPositive,

    /// Value must be zero or greater
    #[error("must be non-negative")]
    Negative,
}

/// A resonance frequency must be finite and strictly positive.
pub fn validate_frequency(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite);
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive);
    }
    Ok(())
}

/// A glucose level must be finite and non-negative.
pub fn validate_glucose(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite);
    }
    if value < 0.0 {
        return Err(ValidationError::Negative);
    }
    Ok(())
}

/// An amplitude only needs to be a finite number; negative dB is normal.
pub fn validate_amplitude(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite);
    }
    Ok(())
}
