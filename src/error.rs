use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read catalogue {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("release info request for {product} failed: {source}")]
    Transport {
        product: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected release info for {product} (HTTP {status}): {source}")]
    Decode {
        product: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
#[error("invalid end-of-life date {value:?}, expected YYYY-MM-DD: {source}")]
pub struct DateFormatError {
    pub value: String,
    #[source]
    pub source: DateFormatReason,
}

#[derive(Error, Debug)]
pub enum DateFormatReason {
    #[error("not a zero-padded four-digit-year date")]
    Shape,
    #[error(transparent)]
    Parse(#[from] chrono::ParseError),
}

/// Delivery failures. These never leave the notifier.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to send webhook request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Fatal outcome of a check run.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("{product}: {source}")]
    DateFormat {
        product: String,
        #[source]
        source: DateFormatError,
    },
}
