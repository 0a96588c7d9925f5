//! # Validation Module
//!
//! Input validation utilities for Insight.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (axum)                                          │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Field rules: names present, prices finite and non-negative        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (category name)                                │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use insight_core::validation::{validate_name, validate_non_negative};
//!
//! validate_name("Name", "Software").unwrap();
//! validate_non_negative("Price", 9.99).unwrap();
//! ```

use crate::error::ValidationError;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (category, product, dashboard, metric).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LENGTH`] characters
///
/// ## Example
/// ```rust
/// use insight_core::validation::validate_name;
///
/// assert!(validate_name("Name", "AI Assistant Pro").is_ok());
/// assert!(validate_name("Name", "").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates that a float is a real number (not NaN or infinite).
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a price or other amount that must be finite and >= 0.
///
/// Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use insight_core::validation::validate_non_negative;
///
/// assert!(validate_non_negative("Price", 9.99).is_ok());
/// assert!(validate_non_negative("Price", 0.0).is_ok());
/// assert!(validate_non_negative("Price", -1.0).is_err());
/// ```
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a sale quantity. Zero-quantity sales are legal records.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative {
            field: "Quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Name", "Software").is_ok());
        assert!(validate_name("Name", "  AI/ML  ").is_ok());

        assert!(validate_name("Name", "").is_err());
        assert!(validate_name("Name", "   ").is_err());
        assert!(validate_name("Name", &"A".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_name_counts_characters_not_bytes() {
        let name = "é".repeat(MAX_NAME_LENGTH);
        assert!(validate_name("Name", &name).is_ok());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("Price", 0.0).is_ok());
        assert!(validate_non_negative("Price", 4500.0).is_ok());

        assert!(validate_non_negative("Price", -0.01).is_err());
        assert!(validate_non_negative("Price", f64::NAN).is_err());
        assert!(validate_non_negative("Price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(12).is_ok());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_error_names_the_field() {
        let err = validate_non_negative("Price", -5.0).unwrap_err();
        assert_eq!(err.to_string(), "Price must not be negative");
    }
}
