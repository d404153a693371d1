use scout_logging::scout_debug;

use crate::{FilterState, ListingSummary, QueryFailure, QueryParams, RequestSeq};

/// Where the displayed list currently comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultSource {
    #[default]
    Bulk,
    Server,
}

/// Calm, page-local state shown instead of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoMatches,
    TryAgain,
}

/// Outcome of settling an intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    ShowBulk {
        superseded: Option<RequestSeq>,
    },
    Issue {
        seq: RequestSeq,
        params: QueryParams,
        superseded: Option<RequestSeq>,
    },
}

/// What happened to an arriving response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Applied,
    Failed,
    Stale,
}

/// Chooses between bulk and server-filtered data and applies responses
/// only for the newest settled intent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciler {
    last_seq: RequestSeq,
    outstanding: Option<RequestSeq>,
    bulk: Vec<ListingSummary>,
    bulk_loaded: bool,
    bulk_failed: bool,
    source: ResultSource,
    server_items: Vec<ListingSummary>,
    server_notice: Option<Notice>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settle(&mut self, intent: &FilterState) -> Settlement {
        let superseded = self.outstanding.take();
        if intent.is_default() {
            self.source = ResultSource::Bulk;
            return Settlement::ShowBulk { superseded };
        }

        self.last_seq += 1;
        let seq = self.last_seq;
        self.outstanding = Some(seq);
        Settlement::Issue {
            seq,
            params: intent.query_params(),
            superseded,
        }
    }

    /// Applies a server response. The displayed list changes only for the
    /// outstanding request; anything else is stale and dropped.
    pub fn apply_response(
        &mut self,
        seq: RequestSeq,
        result: Result<Vec<ListingSummary>, QueryFailure>,
    ) -> Disposition {
        if self.outstanding != Some(seq) {
            scout_debug!(
                "Dropping stale search response seq={} outstanding={:?}",
                seq,
                self.outstanding
            );
            return Disposition::Stale;
        }
        self.outstanding = None;
        self.source = ResultSource::Server;

        match result {
            Ok(items) => {
                self.server_notice = items.is_empty().then_some(Notice::NoMatches);
                self.server_items = items;
                Disposition::Applied
            }
            Err(failure) => {
                scout_debug!("Search seq={} failed: {}", seq, failure);
                self.server_items.clear();
                self.server_notice = Some(Notice::TryAgain);
                Disposition::Failed
            }
        }
    }

    pub fn set_bulk(&mut self, result: Result<Vec<ListingSummary>, QueryFailure>) {
        self.bulk_loaded = true;
        match result {
            Ok(items) => {
                self.bulk = items;
                self.bulk_failed = false;
            }
            Err(failure) => {
                scout_debug!("Bulk load failed: {}", failure);
                self.bulk.clear();
                self.bulk_failed = true;
            }
        }
    }

    /// Returns to the freshly mounted state without resetting the sequence counter.
    pub fn clear(&mut self) {
        *self = Self {
            last_seq: self.last_seq,
            ..Self::default()
        };
    }

    /// Forgets the outstanding request, returning it so it can be aborted.
    pub fn abandon(&mut self) -> Option<RequestSeq> {
        self.outstanding.take()
    }

    pub fn displayed(&self) -> &[ListingSummary] {
        match self.source {
            ResultSource::Bulk => &self.bulk,
            ResultSource::Server => &self.server_items,
        }
    }

    pub fn source(&self) -> ResultSource {
        self.source
    }

    pub fn searching(&self) -> bool {
        self.outstanding.is_some()
    }

    pub fn notice(&self) -> Option<Notice> {
        match self.source {
            ResultSource::Bulk if self.bulk_failed => Some(Notice::TryAgain),
            ResultSource::Bulk if self.bulk_loaded && self.bulk.is_empty() => {
                Some(Notice::NoMatches)
            }
            ResultSource::Bulk => None,
            ResultSource::Server => self.server_notice,
        }
    }
}
