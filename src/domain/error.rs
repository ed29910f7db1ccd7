use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Invalid customer data: {message}")]
    InvalidCustomerData { message: String },

    #[error("Unknown segment: '{label}' is not one of the canonical segment labels")]
    UnknownSegment { label: String },

    #[error("Empty cohort: a campaign needs at least one target customer")]
    EmptyCohort,

    #[error("Duplicate send: customer {customer_id} already received campaign '{campaign_id}'")]
    DuplicateSend {
        campaign_id: String,
        customer_id: i64,
    },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid ID format: {message}")]
    InvalidId { message: String },

    #[error("Rendering timed out after {elapsed_ms}ms")]
    RenderingTimeout { elapsed_ms: u64 },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_customer_data(message: impl Into<String>) -> Self {
        Self::InvalidCustomerData {
            message: message.into(),
        }
    }

    pub fn unknown_segment(label: impl Into<String>) -> Self {
        Self::UnknownSegment {
            label: label.into(),
        }
    }

    pub fn duplicate_send(campaign_id: impl Into<String>, customer_id: i64) -> Self {
        Self::DuplicateSend {
            campaign_id: campaign_id.into(),
            customer_id,
        }
    }

    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::InvalidTransition {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_id(message: impl Into<String>) -> Self {
        Self::InvalidId {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Transient errors: the caller may retry the whole campaign-send attempt,
    /// but must re-check the dispatch ledger first so retries stay idempotent.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RenderingTimeout { .. } | Self::Transport { .. }
        )
    }

    /// A duplicate send is the expected outcome of an idempotent retry; the
    /// calling workflow treats it as success-equivalent, not an alarm.
    pub fn is_success_equivalent(&self) -> bool {
        matches!(self, Self::DuplicateSend { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_customer_data_display() {
        let error = DomainError::invalid_customer_data("churn_risk 1.4 outside [0,1]");
        assert_eq!(
            error.to_string(),
            "Invalid customer data: churn_risk 1.4 outside [0,1]"
        );
    }

    #[test]
    fn test_duplicate_send_is_success_equivalent() {
        let error = DomainError::duplicate_send("camp-1", 42);
        assert!(error.is_success_equivalent());
        assert!(!error.is_transient());
    }

    #[test]
    fn test_transient_errors() {
        assert!(DomainError::RenderingTimeout { elapsed_ms: 5000 }.is_transient());
        assert!(DomainError::transport("connection reset").is_transient());
        assert!(!DomainError::EmptyCohort.is_transient());
        assert!(!DomainError::unknown_segment("vip").is_transient());
    }

    #[test]
    fn test_unknown_segment_display() {
        let error = DomainError::unknown_segment("vip");
        assert_eq!(
            error.to_string(),
            "Unknown segment: 'vip' is not one of the canonical segment labels"
        );
    }
}
