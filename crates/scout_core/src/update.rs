use scout_logging::{scout_debug, scout_warn};

use crate::view_model::UploadView;
use crate::{AppState, Disposition, Effect, Msg, Settlement};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    // Page messages arriving after unmount must not touch the view.
    if !state.is_mounted() && is_page_msg(&msg) {
        scout_debug!("Ignoring {} while unmounted", msg_name(&msg));
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                Vec::new()
            } else {
                state.mount();
                state.mark_dirty();
                vec![
                    Effect::LoadBulk,
                    Effect::LoadRelations {
                        viewer: state.viewer().viewer().clone(),
                    },
                ]
            }
        }
        Msg::Unmounted => {
            if state.is_mounted() {
                state.unmount();
                state.mark_dirty();
                vec![Effect::CancelDebounce, Effect::CancelAll]
            } else {
                Vec::new()
            }
        }
        Msg::TextChanged(text) => {
            state.filters_mut().set_text(text);
            arm_debounce(&mut state)
        }
        Msg::FilterChanged { field, value } => {
            state.filters_mut().set_filter(field, &value);
            arm_debounce(&mut state)
        }
        Msg::FiltersReset => {
            state.filters_mut().reset();
            arm_debounce(&mut state)
        }
        Msg::DebounceElapsed { generation } => match state.gate_mut().elapsed(generation) {
            Some(intent) => {
                state.mark_dirty();
                settle_effects(state.reconciler_mut().settle(&intent))
            }
            None => {
                scout_debug!("Debounce generation {} superseded", generation);
                Vec::new()
            }
        },
        Msg::BulkLoaded(result) => {
            state.reconciler_mut().set_bulk(result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchCompleted { seq, result } => {
            if state.reconciler_mut().apply_response(seq, result) != Disposition::Stale {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RelationsLoaded {
            connected,
            pending,
            applications,
        } => {
            state.viewer_mut().replace(connected, pending, applications);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ConnectionRequestSent(target) => {
            state.viewer_mut().record_request_sent(target);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ConnectionAccepted(target) => {
            state.viewer_mut().record_connection_accepted(target);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ApplicationSubmitted(application) => {
            state.viewer_mut().record_application(application);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ConversationOpened(conversation) => {
            let seq = state.chat_mut().open(conversation.clone());
            state.mark_dirty();
            vec![Effect::LoadMessages { seq, conversation }]
        }
        Msg::ConversationClosed => {
            state.chat_mut().close();
            state.mark_dirty();
            Vec::new()
        }
        Msg::PollMessages => match state.chat_mut().poll() {
            Some((seq, conversation)) => vec![Effect::LoadMessages { seq, conversation }],
            None => Vec::new(),
        },
        Msg::MessagesLoaded { seq, result } => {
            if state.chat_mut().apply(seq, result) != Disposition::Stale {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadRequested { file_name, bytes } => {
            scout_debug!("Uploading {} ({} bytes)", file_name, bytes.len());
            state.record_upload(UploadView {
                file_name: file_name.clone(),
                url: None,
                in_progress: true,
            });
            state.mark_dirty();
            vec![Effect::Upload { file_name, bytes }]
        }
        Msg::UploadCompleted { file_name, result } => {
            let url = match result {
                Ok(url) => Some(url),
                Err(failure) => {
                    scout_warn!("Upload of {} failed: {}", file_name, failure);
                    None
                }
            };
            state.record_upload(UploadView {
                file_name,
                url,
                in_progress: false,
            });
            state.mark_dirty();
            Vec::new()
        }
    };

    (state, effects)
}

/// Any change invalidates the request in flight for the previous intent; the
/// displayed list stays as it is until the new intent settles.
fn arm_debounce(state: &mut AppState) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(2);
    if let Some(seq) = state.reconciler_mut().abandon() {
        scout_debug!("Filters changed, abandoning search seq={}", seq);
        effects.push(Effect::AbortSearch { seq });
    }

    let candidate = state.filters().clone();
    let generation = state.gate_mut().arm(candidate);
    state.mark_dirty();
    effects.push(Effect::ArmDebounce {
        generation,
        window: state.debounce_window(),
    });
    effects
}

fn settle_effects(settlement: Settlement) -> Vec<Effect> {
    match settlement {
        Settlement::ShowBulk { superseded } => superseded
            .map(|seq| Effect::AbortSearch { seq })
            .into_iter()
            .collect(),
        Settlement::Issue {
            seq,
            params,
            superseded,
        } => {
            let mut effects = Vec::with_capacity(2);
            if let Some(old) = superseded {
                effects.push(Effect::AbortSearch { seq: old });
            }
            effects.push(Effect::IssueSearch { seq, params });
            effects
        }
    }
}

/// Messages that belong to the mounted page rather than the viewer context.
fn is_page_msg(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::TextChanged(_)
            | Msg::FilterChanged { .. }
            | Msg::FiltersReset
            | Msg::DebounceElapsed { .. }
            | Msg::BulkLoaded(_)
            | Msg::SearchCompleted { .. }
            | Msg::ConversationOpened(_)
            | Msg::ConversationClosed
            | Msg::PollMessages
            | Msg::MessagesLoaded { .. }
    )
}

fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::TextChanged(_) => "TextChanged",
        Msg::FilterChanged { .. } => "FilterChanged",
        Msg::FiltersReset => "FiltersReset",
        Msg::DebounceElapsed { .. } => "DebounceElapsed",
        Msg::BulkLoaded(_) => "BulkLoaded",
        Msg::SearchCompleted { .. } => "SearchCompleted",
        Msg::ConversationOpened(_) => "ConversationOpened",
        Msg::ConversationClosed => "ConversationClosed",
        Msg::PollMessages => "PollMessages",
        Msg::MessagesLoaded { .. } => "MessagesLoaded",
        _ => "other",
    }
}
