//! SDK error mapping
//!
//! Keeps the service's error code and message; the code drives
//! `ProviderError::kind()` in the core.

use std::fmt::Debug;

use aws_sdk_ec2::error::ProvideErrorMetadata;
use vpc_builder_core::provider::ProviderError;

/// Convert an SDK error from `operation` into a `ProviderError`.
///
/// Transport-level failures carry no service message; their debug form is
/// used instead.
pub(crate) fn sdk_error<E>(operation: &str, err: E) -> ProviderError
where
    E: ProvideErrorMetadata + Debug,
{
    let code = err.code().map(str::to_string);
    let message = match err.message() {
        Some(message) => message.to_string(),
        None => format!("{} failed: {:?}", operation, err),
    };
    log::debug!("{} failed (code: {:?}): {}", operation, code, message);

    ProviderError { code, message }
}
