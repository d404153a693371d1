use crate::{ChatMessage, ConversationId, ListingSummary, Notice, ResultSource};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterView {
    pub text: String,
    pub stage: String,
    pub category: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatView {
    pub conversation: ConversationId,
    pub messages: Vec<ChatMessage>,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadView {
    pub file_name: String,
    /// `None` while in progress or when the upload failed.
    pub url: Option<String>,
    pub in_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub mounted: bool,
    pub filters: FilterView,
    pub results: Vec<ListingSummary>,
    pub source: ResultSource,
    /// A filtered request is outstanding; input stays enabled.
    pub searching: bool,
    pub notice: Option<Notice>,
    pub chat: Option<ChatView>,
    pub last_upload: Option<UploadView>,
    pub dirty: bool,
}
