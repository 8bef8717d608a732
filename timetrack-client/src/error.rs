use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to call {call}: {source}")]
    Request {
        call: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{call} returned 404 Not Found{}", detail_suffix(.detail))]
    NotFound {
        call: String,
        detail: Option<String>,
    },
    #[error("{call} returned {status}{}", detail_suffix(.detail))]
    Rejected {
        call: String,
        status: u16,
        detail: Option<String>,
    },
    #[error("Failed to parse {call} response: {source}")]
    Decode {
        call: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// The server-provided `detail` message, if the API sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { detail, .. } | ApiError::Rejected { detail, .. } => {
                detail.as_deref()
            }
            _ => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => String::new(),
    }
}

/// Error body shape used by the API (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Extract the `detail` field from an error body. Validation errors carry a
/// structured detail, which is kept as compact JSON.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}
