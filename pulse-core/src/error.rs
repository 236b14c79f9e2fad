use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Reddit API error: {0}")]
    RedditApi(#[from] RedditApiError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum RedditApiError {
    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimitExceeded { retry_after: u64 },

    #[error("Forbidden access to resource: {resource}")]
    Forbidden { resource: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Unexpected status {status_code} for {resource}")]
    UnexpectedStatus { status_code: u16, resource: String },

    #[error("Invalid thread URL: {url}")]
    InvalidThreadUrl { url: String },
}

/// Shape problems found while decoding Reddit listings into typed records.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Malformed listing: {details}")]
    MalformedListing { details: String },

    #[error("Malformed {kind} item: {details}")]
    MalformedItem { kind: String, details: String },

    #[error("Thread response is missing the submission listing")]
    MissingSubmission,

    #[error("Unexpected shape at {path}")]
    UnexpectedShape { path: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SentimentError {
    #[error("No scorable tokens in text")]
    EmptyTokenStream,

    #[error("Model {model} produced a non-finite score")]
    NonFiniteScore { model: String },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cannot create output directory {path}: {source}")]
    OutputDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to flush {path}: {source}")]
    Flush {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Nothing to export")]
    NoRows,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Cannot read configuration {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
