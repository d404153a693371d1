use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

pub type RequestSeq = u64;

/// Listing as returned by the bulk and filter endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub position_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatMessageDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub sender_id: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    DebounceElapsed {
        generation: u64,
    },
    BulkLoaded(Result<Vec<ListingDto>, RequestError>),
    SearchCompleted {
        seq: RequestSeq,
        result: Result<Vec<ListingDto>, RequestError>,
    },
    RelationsLoaded {
        connected: Result<Vec<String>, RequestError>,
        pending: Result<Vec<String>, RequestError>,
        applications: Result<Vec<ApplicationDto>, RequestError>,
    },
    MessagesLoaded {
        seq: RequestSeq,
        result: Result<Vec<ChatMessageDto>, RequestError>,
    },
    UploadCompleted {
        file_name: String,
        result: Result<String, RequestError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
