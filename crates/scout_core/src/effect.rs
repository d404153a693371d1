use std::time::Duration;

use crate::{ConversationId, QueryParams, RequestSeq, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// (Re)start the debounce timer; the previous timer is superseded.
    ArmDebounce { generation: u64, window: Duration },
    CancelDebounce,
    LoadBulk,
    LoadRelations { viewer: UserId },
    IssueSearch { seq: RequestSeq, params: QueryParams },
    AbortSearch { seq: RequestSeq },
    LoadMessages {
        seq: RequestSeq,
        conversation: ConversationId,
    },
    /// Not page-scoped: an upload finishes even if the page goes away.
    Upload { file_name: String, bytes: Vec<u8> },
    /// Abort everything in flight for the page.
    CancelAll,
}
