//! Flow-level error taxonomy

use thiserror::Error;

use crate::console::Reporter;
use crate::provider::ProviderError;
use crate::validation::ValidationError;

/// Why a workflow step stopped early
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A dependent step had nothing to act on
    #[error("{0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Provider {
        context: String,
        #[source]
        source: ProviderError,
    },

    /// The operator declined a confirmation
    #[error("{0}")]
    Declined(String),

    /// The operator cancelled a prompt
    #[error("cancelled")]
    Cancelled,
}

impl FlowError {
    pub fn provider(context: impl Into<String>, source: ProviderError) -> Self {
        FlowError::Provider {
            context: context.into(),
            source,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        FlowError::NotFound(message.into())
    }

    pub fn declined(message: impl Into<String>) -> Self {
        FlowError::Declined(message.into())
    }

    /// Report this outcome once through the console.
    pub fn report(&self, reporter: &dyn Reporter) {
        match self {
            FlowError::Validation(_) | FlowError::NotFound(_) | FlowError::Provider { .. } => {
                log::warn!("{}", self);
                reporter.failure(&self.to_string());
            }
            FlowError::Declined(message) => reporter.info(message),
            FlowError::Cancelled => log::debug!("prompt cancelled"),
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;

/// Attach a report context to a provider result
pub trait ProviderContext<T> {
    fn context(self, context: impl Into<String>) -> FlowResult<T>;
}

impl<T> ProviderContext<T> for Result<T, ProviderError> {
    fn context(self, context: impl Into<String>) -> FlowResult<T> {
        self.map_err(|e| FlowError::provider(context, e))
    }
}
