use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use scout_logging::{scout_debug, scout_error};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::Backend;
use crate::{DebounceTimer, EngineEvent, RequestSeq};

enum EngineCommand {
    ArmDebounce { generation: u64, window: Duration },
    CancelDebounce,
    LoadBulk,
    LoadRelations { viewer: String },
    Search { seq: RequestSeq, params: Vec<(String, String)> },
    AbortSearch { seq: RequestSeq },
    LoadMessages { seq: RequestSeq, conversation: String },
    Upload { file_name: String, bytes: Vec<u8> },
    CancelAll,
}

/// Executes effects on a tokio runtime owned by a dedicated thread.
///
/// Results are delivered on the receiver returned by [`EngineHandle::spawn`].
/// Dropping the handle stops the worker and aborts everything in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(backend: Arc<dyn Backend>) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    scout_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let mut worker = Worker::new(backend, event_tx, runtime.handle().clone());
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(command);
            }
            worker.cancel_page();
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn arm_debounce(&self, generation: u64, window: Duration) {
        self.send(EngineCommand::ArmDebounce { generation, window });
    }

    pub fn cancel_debounce(&self) {
        self.send(EngineCommand::CancelDebounce);
    }

    pub fn load_bulk(&self) {
        self.send(EngineCommand::LoadBulk);
    }

    pub fn load_relations(&self, viewer: impl Into<String>) {
        self.send(EngineCommand::LoadRelations {
            viewer: viewer.into(),
        });
    }

    pub fn search(&self, seq: RequestSeq, params: Vec<(String, String)>) {
        self.send(EngineCommand::Search { seq, params });
    }

    pub fn abort_search(&self, seq: RequestSeq) {
        self.send(EngineCommand::AbortSearch { seq });
    }

    pub fn load_messages(&self, seq: RequestSeq, conversation: impl Into<String>) {
        self.send(EngineCommand::LoadMessages {
            seq,
            conversation: conversation.into(),
        });
    }

    pub fn upload(&self, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.send(EngineCommand::Upload {
            file_name: file_name.into(),
            bytes,
        });
    }

    /// Aborts the debounce timer and every page-scoped request.
    pub fn cancel_all(&self) {
        self.send(EngineCommand::CancelAll);
    }

    fn send(&self, command: EngineCommand) {
        // The worker only exits when the handle is dropped.
        let _ = self.cmd_tx.send(command);
    }
}

struct Worker {
    backend: Arc<dyn Backend>,
    events: mpsc::Sender<EngineEvent>,
    runtime: Handle,
    debounce: DebounceTimer,
    searches: HashMap<RequestSeq, JoinHandle<()>>,
    page: CancellationToken,
}

impl Worker {
    fn new(backend: Arc<dyn Backend>, events: mpsc::Sender<EngineEvent>, runtime: Handle) -> Self {
        Self {
            backend,
            events,
            runtime,
            debounce: DebounceTimer::new(),
            searches: HashMap::new(),
            page: CancellationToken::new(),
        }
    }

    fn handle(&mut self, command: EngineCommand) {
        self.searches.retain(|_, task| !task.is_finished());

        match command {
            EngineCommand::ArmDebounce { generation, window } => {
                let events = self.events.clone();
                self.debounce.restart(&self.runtime, window, move || {
                    let _ = events.send(EngineEvent::DebounceElapsed { generation });
                });
            }
            EngineCommand::CancelDebounce => {
                self.debounce.cancel();
            }
            EngineCommand::LoadBulk => {
                let backend = self.backend.clone();
                self.spawn_page_task(async move {
                    EngineEvent::BulkLoaded(backend.list_all().await)
                });
            }
            EngineCommand::LoadRelations { viewer } => {
                // Viewer context outlives the page: not tied to the page token.
                let backend = self.backend.clone();
                let events = self.events.clone();
                self.runtime.spawn(async move {
                    let (connected, pending, applications) = tokio::join!(
                        backend.connections(&viewer),
                        backend.pending_requests(&viewer),
                        backend.sent_applications(&viewer),
                    );
                    let _ = events.send(EngineEvent::RelationsLoaded {
                        connected,
                        pending,
                        applications,
                    });
                });
            }
            EngineCommand::Search { seq, params } => {
                scout_debug!("Search seq={} params={:?}", seq, params);
                let backend = self.backend.clone();
                let task = self.spawn_page_task(async move {
                    let result = backend.search(&params).await;
                    EngineEvent::SearchCompleted { seq, result }
                });
                self.searches.insert(seq, task);
            }
            EngineCommand::AbortSearch { seq } => {
                if let Some(task) = self.searches.remove(&seq) {
                    scout_debug!("Aborting search seq={}", seq);
                    task.abort();
                }
            }
            EngineCommand::LoadMessages { seq, conversation } => {
                let backend = self.backend.clone();
                self.spawn_page_task(async move {
                    let result = backend.messages(&conversation).await;
                    EngineEvent::MessagesLoaded { seq, result }
                });
            }
            EngineCommand::Upload { file_name, bytes } => {
                let backend = self.backend.clone();
                let events = self.events.clone();
                self.runtime.spawn(async move {
                    let result = backend.upload(&file_name, bytes).await;
                    let _ = events.send(EngineEvent::UploadCompleted { file_name, result });
                });
            }
            EngineCommand::CancelAll => self.cancel_page(),
        }
    }

    /// Spawns a task that is dropped without reporting if the page goes away.
    fn spawn_page_task<F>(&self, work: F) -> JoinHandle<()>
    where
        F: std::future::Future<Output = EngineEvent> + Send + 'static,
    {
        let token = self.page.clone();
        let events = self.events.clone();
        self.runtime.spawn(async move {
            let event = tokio::select! {
                _ = token.cancelled() => None,
                event = work => Some(event),
            };
            if let Some(event) = event {
                let _ = events.send(event);
            }
        })
    }

    fn cancel_page(&mut self) {
        self.debounce.cancel();
        self.page.cancel();
        self.page = CancellationToken::new();
        for (_, task) in self.searches.drain() {
            task.abort();
        }
    }
}
