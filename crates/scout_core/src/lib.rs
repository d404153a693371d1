//! Scout core: pure page state machine, search reconciliation and status resolvers.
mod context;
mod conversation;
mod debounce;
mod effect;
mod filters;
mod msg;
mod reconcile;
mod relationship;
mod state;
mod types;
mod update;
mod view_model;

pub use context::ViewerContext;
pub use conversation::ConversationLoader;
pub use debounce::DebounceGate;
pub use effect::Effect;
pub use filters::{FilterField, FilterState, QueryParams, Selection, ALL};
pub use msg::Msg;
pub use reconcile::{Disposition, Notice, Reconciler, ResultSource, Settlement};
pub use relationship::{
    resolve_application, resolve_position_action, resolve_relationship, ApplicationStatus,
    PositionAction, RelationshipStatus, UserAction,
};
pub use state::{AppState, DEFAULT_DEBOUNCE_WINDOW};
pub use types::{
    Application, ChatMessage, ConversationId, ListingSummary, PositionId, QueryFailure,
    RequestSeq, UserId,
};
pub use update::update;
pub use view_model::{AppViewModel, ChatView, FilterView, UploadView};
