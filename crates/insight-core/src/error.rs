//! # Error Types
//!
//! Domain-specific error types for insight-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  insight-core errors (this file)                                       │
//! │  ├── CoreError        - Missing entities, wrapped validation           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  insight-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - JSON body + HTTP status                        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain errors raised when a request names something that isn't there,
/// or carries input that fails validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// The category exists but owns no products.
    ///
    /// Kept distinct from [`CoreError::CategoryNotFound`] so callers can tell
    /// "wrong id" apart from "nothing filed here yet".
    #[error("No product found in category {0}")]
    CategoryEmpty(i64),

    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// A product referenced a category id that does not exist.
    #[error("Category does not exist: {0}")]
    UnknownCategory(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must not be negative")]
    Negative { field: String },

    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::ProductNotFound(42).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            CoreError::CategoryEmpty(3).to_string(),
            "No product found in category 3"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Name".to_string(),
        };
        assert_eq!(err.to_string(), "Name is required");

        let err = ValidationError::TooLong {
            field: "Name".to_string(),
            max: 255,
        };
        assert_eq!(err.to_string(), "Name must be at most 255 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "Name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
