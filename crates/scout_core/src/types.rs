use std::fmt;

/// Sequence number tagging every request whose response must be matched
/// against the newest intent.
pub type RequestSeq = u64;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a marketplace user.
    UserId
);
string_id!(
    /// Identifier of an open position on a listing.
    PositionId
);
string_id!(ConversationId);

/// Listing entry as shown in result lists. Opaque beyond what the list renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub stage: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

/// An application the viewer has sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub position_id: PositionId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub sender: UserId,
    pub body: String,
    /// RFC 3339 timestamp as delivered by the backend.
    pub sent_at: String,
}

/// Why a backend query produced no usable result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFailure {
    Transport,
    Timeout,
    Rejected(u16),
    Malformed,
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailure::Transport => write!(f, "transport failure"),
            QueryFailure::Timeout => write!(f, "timed out"),
            QueryFailure::Rejected(status) => write!(f, "rejected with status {status}"),
            QueryFailure::Malformed => write!(f, "malformed response"),
        }
    }
}
