use crate::{
    Application, ChatMessage, ConversationId, FilterField, ListingSummary, QueryFailure,
    RequestSeq, UserId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The search page became visible.
    Mounted,
    /// The user navigated away; pending timers and requests are dropped.
    Unmounted,
    /// User edited the free-text search box.
    TextChanged(String),
    /// User picked a value in one of the categorical selects.
    FilterChanged { field: FilterField, value: String },
    /// User cleared all filters at once.
    FiltersReset,
    /// Debounce timer fired for the given generation.
    DebounceElapsed { generation: u64 },
    /// Unfiltered listing collection arrived.
    BulkLoaded(Result<Vec<ListingSummary>, QueryFailure>),
    /// Filter endpoint answered request `seq`.
    SearchCompleted {
        seq: RequestSeq,
        result: Result<Vec<ListingSummary>, QueryFailure>,
    },
    /// Viewer relationship collections arrived; `None` for a collection that failed.
    RelationsLoaded {
        connected: Option<Vec<UserId>>,
        pending: Option<Vec<UserId>>,
        applications: Option<Vec<Application>>,
    },
    ConnectionRequestSent(UserId),
    ConnectionAccepted(UserId),
    ApplicationSubmitted(Application),
    ConversationOpened(ConversationId),
    ConversationClosed,
    /// Periodic refresh of the active conversation.
    PollMessages,
    MessagesLoaded {
        seq: RequestSeq,
        result: Result<Vec<ChatMessage>, QueryFailure>,
    },
    /// User picked a file to upload.
    UploadRequested { file_name: String, bytes: Vec<u8> },
    /// Upload finished; the URL becomes usable as an entity attribute.
    UploadCompleted {
        file_name: String,
        result: Result<String, QueryFailure>,
    },
}
