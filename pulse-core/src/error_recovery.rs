//! Error recovery policy for the collection pipeline.
//!
//! Every error kind maps to an explicit [`RecoveryStrategy`]. Fetch and parse
//! failures are skipped so a single bad request or record never aborts a run;
//! configuration and export failures need user intervention and fail.

use crate::{CoreError, ErrorExt};
use std::time::Duration;
use tracing::{debug, warn};

/// Recovery strategy for handling errors
#[derive(Debug, Clone, PartialEq)]
pub enum RecoveryStrategy {
    /// Retry with the fetcher's backoff schedule, then skip. A server
    /// requested delay replaces the computed wait.
    RetryWithBackoff { server_delay: Option<Duration> },
    /// Skip the operation and continue with an empty result
    Skip,
    /// Fail immediately
    Fail,
}

/// Result of an error recovery attempt
#[derive(Debug)]
pub enum RecoveryResult<T> {
    /// The operation produced a value
    Recovered(T),
    /// The operation failed and was skipped
    Skipped,
    /// The operation failed and the error should be propagated
    Failed(CoreError),
}

impl<T> RecoveryResult<T> {
    pub fn is_recovered(&self) -> bool {
        matches!(self, RecoveryResult::Recovered(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RecoveryResult::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RecoveryResult::Failed(_))
    }

    /// Converts into a `Result`, treating a skip as `None`.
    pub fn into_result(self) -> Result<Option<T>, CoreError> {
        match self {
            RecoveryResult::Recovered(value) => Ok(Some(value)),
            RecoveryResult::Skipped => Ok(None),
            RecoveryResult::Failed(error) => Err(error),
        }
    }
}

/// Error recovery handler that provides strategies for different error types
pub struct ErrorRecovery;

impl ErrorRecovery {
    /// Determine the appropriate recovery strategy for a given error
    pub fn determine_strategy(error: &CoreError) -> RecoveryStrategy {
        match error {
            // Transient fetch failures
            CoreError::RedditApi(_) | CoreError::Network(_) if error.is_retryable() => {
                RecoveryStrategy::RetryWithBackoff {
                    server_delay: error.retry_after(),
                }
            }

            // Permanent fetch failures and shape problems
            CoreError::RedditApi(_)
            | CoreError::Network(_)
            | CoreError::Parse(_)
            | CoreError::Serialization(_)
            | CoreError::Internal { .. } => RecoveryStrategy::Skip,

            // The scorer folds these into a neutral record
            CoreError::Sentiment(_) => RecoveryStrategy::Skip,

            // Configuration and output problems need user intervention
            CoreError::Config(_) | CoreError::Export(_) | CoreError::Io(_) => {
                RecoveryStrategy::Fail
            }
        }
    }

    /// Settle the outcome of an operation whose retries, if any, are exhausted.
    pub fn settle<T>(operation: &str, result: Result<T, CoreError>) -> RecoveryResult<T> {
        match result {
            Ok(value) => RecoveryResult::Recovered(value),
            Err(error) => match Self::determine_strategy(&error) {
                RecoveryStrategy::Fail => RecoveryResult::Failed(error),
                strategy => {
                    warn!(
                        "Skipping {} after error [{}]: {}",
                        operation,
                        error.error_code(),
                        error
                    );
                    debug!("Recovery strategy for {}: {:?}", operation, strategy);
                    RecoveryResult::Skipped
                }
            },
        }
    }
}
