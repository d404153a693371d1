use scout_logging::scout_debug;

use crate::{ChatMessage, ConversationId, Disposition, QueryFailure, RequestSeq};

/// Loads the active conversation on open and on every poll.
///
/// Loads are numbered. A load is applied only if it was issued after the
/// conversation was opened and is newer than the last applied one, so slow
/// polls never roll the message list back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversationLoader {
    active: Option<ConversationId>,
    last_seq: RequestSeq,
    opened_seq: RequestSeq,
    applied_seq: RequestSeq,
    messages: Vec<ChatMessage>,
    failed: bool,
}

impl ConversationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, conversation: ConversationId) -> RequestSeq {
        self.last_seq += 1;
        self.opened_seq = self.last_seq;
        self.applied_seq = 0;
        self.active = Some(conversation);
        self.messages.clear();
        self.failed = false;
        self.last_seq
    }

    pub fn poll(&mut self) -> Option<(RequestSeq, ConversationId)> {
        let conversation = self.active.clone()?;
        self.last_seq += 1;
        Some((self.last_seq, conversation))
    }

    pub fn close(&mut self) {
        self.active = None;
        self.messages.clear();
        self.failed = false;
    }

    pub fn apply(
        &mut self,
        seq: RequestSeq,
        result: Result<Vec<ChatMessage>, QueryFailure>,
    ) -> Disposition {
        if self.active.is_none() || seq < self.opened_seq || seq <= self.applied_seq {
            scout_debug!(
                "Dropping stale message load seq={} opened={} applied={}",
                seq,
                self.opened_seq,
                self.applied_seq
            );
            return Disposition::Stale;
        }
        self.applied_seq = seq;

        match result {
            Ok(messages) => {
                self.messages = messages;
                self.failed = false;
                Disposition::Applied
            }
            Err(failure) => {
                scout_debug!("Message load seq={} failed: {}", seq, failure);
                self.failed = true;
                Disposition::Failed
            }
        }
    }

    pub fn active(&self) -> Option<&ConversationId> {
        self.active.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn failed(&self) -> bool {
        self.failed
    }
}
