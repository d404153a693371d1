//! Scout engine: backend client and effect execution.
mod client;
mod debounce;
mod engine;
mod types;

pub use client::{
    ApiClient, Backend, ClientSettings, MessageSource, RelationshipSource, SearchBackend, Uploader,
};
pub use debounce::DebounceTimer;
pub use engine::EngineHandle;
pub use types::{
    ApplicationDto, ChatMessageDto, EngineEvent, FailureKind, ListingDto, RequestError,
    RequestSeq,
};
