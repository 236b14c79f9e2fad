use crate::error::*;
use std::time::Duration;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn is_retryable(&self) -> bool;
    /// Delay the server asked for before the next attempt.
    fn retry_after(&self) -> Option<Duration>;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError [{}]: {}", self.error_code(), self);
        match self {
            CoreError::RedditApi(e) => {
                error!("Reddit API error details: {:?}", e);
            }
            CoreError::Parse(e) => {
                error!("Parse error details: {:?}", e);
            }
            CoreError::Export(e) => {
                error!("Export error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning) [{}]: {}", self.error_code(), self);
        self
    }

    fn is_retryable(&self) -> bool {
        match self {
            CoreError::RedditApi(e) => e.is_retryable(),
            CoreError::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            CoreError::RedditApi(e) => e.retry_after(),
            _ => None,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.user_friendly_message(),
            CoreError::Parse(e) => e.user_friendly_message(),
            CoreError::Sentiment(e) => e.user_friendly_message(),
            CoreError::Export(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check your internet connection.".to_string()
            }
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::RedditApi(e) => e.error_code().to_string(),
            CoreError::Parse(e) => e.error_code().to_string(),
            CoreError::Sentiment(e) => e.error_code().to_string(),
            CoreError::Export(e) => e.error_code().to_string(),
            CoreError::Config(e) => e.error_code().to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl RedditApiError {
    pub fn is_retryable(&self) -> bool {
        match self {
            RedditApiError::RateLimitExceeded { .. } => true,
            RedditApiError::RequestTimeout => true,
            RedditApiError::ServerError { status_code } => *status_code >= 500,
            _ => false,
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            RedditApiError::RateLimitExceeded { retry_after } => {
                Some(Duration::from_secs(*retry_after))
            }
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RedditApiError::RateLimitExceeded { retry_after } => format!(
                "Too many requests. Please wait {} seconds before trying again.",
                retry_after
            ),
            RedditApiError::Forbidden { resource } => format!(
                "Access denied to {}. The content may be private or quarantined.",
                resource
            ),
            RedditApiError::NotFound { resource } => {
                format!("Could not find: {}", resource)
            }
            RedditApiError::RequestTimeout => {
                "Request to Reddit timed out. Please try again.".to_string()
            }
            RedditApiError::InvalidThreadUrl { url } => {
                format!("'{}' does not look like a Reddit thread URL.", url)
            }
            _ => "Reddit API error occurred. Please try again later.".to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RedditApiError::RateLimitExceeded { .. } => "REDDIT_RATE_LIMIT",
            RedditApiError::Forbidden { .. } => "REDDIT_FORBIDDEN",
            RedditApiError::NotFound { .. } => "REDDIT_NOT_FOUND",
            RedditApiError::RequestTimeout => "REDDIT_TIMEOUT",
            RedditApiError::InvalidResponse { .. } => "REDDIT_INVALID_RESPONSE",
            RedditApiError::ServerError { .. } => "REDDIT_SERVER_ERROR",
            RedditApiError::UnexpectedStatus { .. } => "REDDIT_UNEXPECTED_STATUS",
            RedditApiError::InvalidThreadUrl { .. } => "REDDIT_INVALID_THREAD_URL",
        }
    }
}

impl ParseError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ParseError::MissingSubmission => {
                "The thread response did not contain a submission.".to_string()
            }
            ParseError::MalformedItem { kind, .. } => {
                format!("Skipped a malformed {} item.", kind)
            }
            _ => "Reddit returned data in an unexpected shape.".to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ParseError::MalformedListing { .. } => "PARSE_MALFORMED_LISTING",
            ParseError::MalformedItem { .. } => "PARSE_MALFORMED_ITEM",
            ParseError::MissingSubmission => "PARSE_MISSING_SUBMISSION",
            ParseError::UnexpectedShape { .. } => "PARSE_UNEXPECTED_SHAPE",
        }
    }
}

impl SentimentError {
    pub fn user_friendly_message(&self) -> String {
        "Sentiment could not be computed; the text was scored as neutral.".to_string()
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            SentimentError::EmptyTokenStream => "SENTIMENT_EMPTY_TOKENS",
            SentimentError::NonFiniteScore { .. } => "SENTIMENT_NON_FINITE",
        }
    }
}

impl ExportError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ExportError::OutputDirectory { path, .. } => {
                format!("Cannot create output directory '{}'.", path)
            }
            ExportError::NoRows => "There were no rows to export.".to_string(),
            _ => "Failed to write the export files. Please check disk space and permissions."
                .to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::Csv(_) => "EXPORT_CSV",
            ExportError::OutputDirectory { .. } => "EXPORT_OUTPUT_DIRECTORY",
            ExportError::Flush { .. } => "EXPORT_FLUSH",
            ExportError::NoRows => "EXPORT_NO_ROWS",
        }
    }
}

impl ConfigError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::Unreadable { path, .. } => {
                format!("Configuration file '{}' could not be read.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND",
            ConfigError::Unreadable { .. } => "CONFIG_UNREADABLE",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR",
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
            info!("Error code: {}", error.error_code());
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
