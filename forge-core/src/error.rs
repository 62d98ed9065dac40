//! Error types for FORGE operations

use thiserror::Error;

/// Storage layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Insert failed: {reason}")]
    InsertFailed { reason: String },

    #[error("Query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Completion provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LlmError {
    #[error("No completion provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Rate limited by {provider}, retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: i64,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Request to {provider} timed out after {elapsed_ms}ms")]
    Timeout { provider: String, elapsed_ms: u64 },
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Provider not supported: {provider}")]
    ProviderNotSupported { provider: String },
}

/// Top-level error type for FORGE operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForgeError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for FORGE operations.
pub type ForgeResult<T> = Result<T, ForgeError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display_insert_failed() {
        let err = StorageError::InsertFailed {
            reason: "connection refused".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Insert failed"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_llm_error_display_rate_limited() {
        let err = LlmError::RateLimited {
            provider: "openai".to_string(),
            retry_after_ms: 1500,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Rate limited"));
        assert!(msg.contains("openai"));
        assert!(msg.contains("1500"));
    }

    #[test]
    fn test_llm_error_display_timeout() {
        let err = LlmError::Timeout {
            provider: "anthropic".to_string(),
            elapsed_ms: 60_000,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("timed out"));
        assert!(msg.contains("anthropic"));
    }

    #[test]
    fn test_validation_error_display_required_field() {
        let err = ValidationError::RequiredFieldMissing {
            field: "prompt".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Required field missing"));
        assert!(msg.contains("prompt"));
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "base_url".to_string(),
            value: "bad".to_string(),
            reason: "must be a url".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("base_url"));
        assert!(msg.contains("bad"));
        assert!(msg.contains("must be a url"));
    }

    #[test]
    fn test_forge_error_from_conversions() {
        let storage = ForgeError::from(StorageError::LockPoisoned);
        assert!(matches!(storage, ForgeError::Storage(_)));

        let llm = ForgeError::from(LlmError::ProviderNotConfigured);
        assert!(matches!(llm, ForgeError::Llm(_)));

        let validation = ForgeError::from(ValidationError::RequiredFieldMissing {
            field: "prompt".to_string(),
        });
        assert!(matches!(validation, ForgeError::Validation(_)));

        let config = ForgeError::from(ConfigError::MissingRequired {
            field: "api_key".to_string(),
        });
        assert!(matches!(config, ForgeError::Config(_)));
    }
}
