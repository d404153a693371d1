use std::sync::{mpsc, Arc};
use std::thread;

use scout_core::{
    Application, ChatMessage, Effect, ListingSummary, Msg, PositionId, QueryFailure, UserId,
};
use scout_engine::{
    ApiClient, ApplicationDto, ChatMessageDto, ClientSettings, EngineEvent, EngineHandle,
    FailureKind, ListingDto, RequestError,
};
use scout_logging::{scout_debug, scout_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, RequestError> {
        let client = ApiClient::new(settings)?;
        let (engine, events) = EngineHandle::spawn(Arc::new(client));
        spawn_event_pump(events, app_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ArmDebounce { generation, window } => {
                    self.engine.arm_debounce(generation, window);
                }
                Effect::CancelDebounce => self.engine.cancel_debounce(),
                Effect::LoadBulk => self.engine.load_bulk(),
                Effect::LoadRelations { viewer } => self.engine.load_relations(viewer.as_str()),
                Effect::IssueSearch { seq, params } => {
                    scout_debug!("IssueSearch seq={} params={:?}", seq, params);
                    self.engine.search(seq, params);
                }
                Effect::AbortSearch { seq } => self.engine.abort_search(seq),
                Effect::LoadMessages { seq, conversation } => {
                    self.engine.load_messages(seq, conversation.as_str());
                }
                Effect::Upload { file_name, bytes } => self.engine.upload(file_name, bytes),
                Effect::CancelAll => self.engine.cancel_all(),
            }
        }
    }
}

fn spawn_event_pump(events: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if app_tx.send(AppEvent::Dispatch(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation } => Msg::DebounceElapsed { generation },
        EngineEvent::BulkLoaded(result) => Msg::BulkLoaded(map_listings(result)),
        EngineEvent::SearchCompleted { seq, result } => Msg::SearchCompleted {
            seq,
            result: map_listings(result),
        },
        EngineEvent::RelationsLoaded {
            connected,
            pending,
            applications,
        } => Msg::RelationsLoaded {
            connected: known(connected, "connections")
                .map(|ids| ids.into_iter().map(UserId::from).collect()),
            pending: known(pending, "pending requests")
                .map(|ids| ids.into_iter().map(UserId::from).collect()),
            applications: known(applications, "applications")
                .map(|apps| apps.into_iter().map(map_application).collect()),
        },
        EngineEvent::MessagesLoaded { seq, result } => Msg::MessagesLoaded {
            seq,
            result: result
                .map(|messages| messages.into_iter().map(map_message).collect())
                .map_err(|err| map_failure(&err)),
        },
        EngineEvent::UploadCompleted { file_name, result } => Msg::UploadCompleted {
            file_name,
            result: result.map_err(|err| map_failure(&err)),
        },
    }
}

fn map_listings(
    result: Result<Vec<ListingDto>, RequestError>,
) -> Result<Vec<ListingSummary>, QueryFailure> {
    match result {
        Ok(listings) => Ok(listings.into_iter().map(map_listing).collect()),
        Err(err) => {
            scout_warn!("Listing request failed: {}", err);
            Err(map_failure(&err))
        }
    }
}

fn map_listing(dto: ListingDto) -> ListingSummary {
    ListingSummary {
        id: dto.id,
        title: dto.title,
        description: dto.description,
        stage: dto.stage,
        category: dto.category,
        location: dto.location,
    }
}

fn map_application(dto: ApplicationDto) -> Application {
    Application {
        id: dto.id,
        position_id: PositionId::from(dto.position_id),
    }
}

fn map_message(dto: ChatMessageDto) -> ChatMessage {
    ChatMessage {
        id: dto.id,
        sender: UserId::from(dto.sender_id),
        body: dto.body,
        sent_at: dto.sent_at.to_rfc3339(),
    }
}

/// A failed collection stays unknown rather than empty.
fn known<T>(result: Result<T, RequestError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            scout_warn!("Failed to load {}: {}", what, err);
            None
        }
    }
}

fn map_failure(err: &RequestError) -> QueryFailure {
    match err.kind {
        FailureKind::Timeout => QueryFailure::Timeout,
        FailureKind::HttpStatus(status) => QueryFailure::Rejected(status),
        FailureKind::Decode | FailureKind::TooLarge { .. } => QueryFailure::Malformed,
        FailureKind::InvalidUrl | FailureKind::Network => QueryFailure::Transport,
    }
}
