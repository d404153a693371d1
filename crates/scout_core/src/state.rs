use std::time::Duration;

use crate::view_model::{AppViewModel, ChatView, FilterView, UploadView};
use crate::{
    ConversationLoader, DebounceGate, FilterField, FilterState, Reconciler, UserId, ViewerContext,
};

pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(300);

/// Page-local state of the search page plus the app-lifetime viewer context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    mounted: bool,
    debounce_window: Duration,
    filters: FilterState,
    gate: DebounceGate<FilterState>,
    reconciler: Reconciler,
    chat: ConversationLoader,
    viewer: ViewerContext,
    last_upload: Option<UploadView>,
    dirty: bool,
}

impl AppState {
    pub fn new(viewer: UserId) -> Self {
        Self {
            mounted: false,
            debounce_window: DEFAULT_DEBOUNCE_WINDOW,
            filters: FilterState::new(),
            gate: DebounceGate::new(),
            reconciler: Reconciler::new(),
            chat: ConversationLoader::new(),
            viewer: ViewerContext::new(viewer),
            last_upload: None,
            dirty: false,
        }
    }

    pub fn with_debounce_window(mut self, window: Duration) -> Self {
        self.debounce_window = window;
        self
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            mounted: self.mounted,
            filters: FilterView {
                text: self.filters.text().to_string(),
                stage: self.filters.selection(FilterField::Stage).label().to_string(),
                category: self
                    .filters
                    .selection(FilterField::Category)
                    .label()
                    .to_string(),
                location: self
                    .filters
                    .selection(FilterField::Location)
                    .label()
                    .to_string(),
            },
            results: self.reconciler.displayed().to_vec(),
            source: self.reconciler.source(),
            searching: self.reconciler.searching(),
            notice: self.reconciler.notice(),
            chat: self.chat.active().map(|conversation| ChatView {
                conversation: conversation.clone(),
                messages: self.chat.messages().to_vec(),
                failed: self.chat.failed(),
            }),
            last_upload: self.last_upload.clone(),
            dirty: self.dirty,
        }
    }

    pub fn viewer(&self) -> &ViewerContext {
        &self.viewer
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns whether a render is needed and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn debounce_window(&self) -> Duration {
        self.debounce_window
    }

    pub(crate) fn mount(&mut self) {
        self.mounted = true;
    }

    /// Drops all page-local state. The viewer context outlives the page, and
    /// generation and sequence counters keep counting so that late callbacks
    /// from this mount can never match the next one.
    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.filters = FilterState::new();
        self.gate.cancel();
        self.reconciler.clear();
        self.chat.close();
    }

    pub(crate) fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub(crate) fn gate_mut(&mut self) -> &mut DebounceGate<FilterState> {
        &mut self.gate
    }

    pub(crate) fn reconciler_mut(&mut self) -> &mut Reconciler {
        &mut self.reconciler
    }

    pub(crate) fn chat_mut(&mut self) -> &mut ConversationLoader {
        &mut self.chat
    }

    pub(crate) fn record_upload(&mut self, upload: UploadView) {
        self.last_upload = Some(upload);
    }

    pub(crate) fn viewer_mut(&mut self) -> &mut ViewerContext {
        &mut self.viewer
    }
}
