use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gallery_logging::gallery_info;

use crate::fetch::{FetchSettings, PageSource, ReqwestPageSource};
use crate::{EngineEvent, PageRequest};

enum EngineCommand {
    FetchPage(PageRequest),
}

/// Runs page fetches on a background tokio runtime.
///
/// Commands and results travel over channels, so the owner stays a plain
/// single-threaded event loop. Dropping the handle stops the worker; answers
/// still in flight are discarded.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        gallery_info!("Gallery engine using endpoint {}", settings.endpoint);
        Self::with_source(Arc::new(ReqwestPageSource::new(settings)))
    }

    pub fn with_source(source: Arc<dyn PageSource>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("gallery-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let source = source.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(source.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queues a fetch. Returns false if the worker is gone.
    pub fn fetch_page(&self, request: PageRequest) -> bool {
        self.cmd_tx.send(EngineCommand::FetchPage(request)).is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    source: &dyn PageSource,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::FetchPage(request) => {
            let result = source.fetch_page(&request).await;
            let _ = event_tx.send(EngineEvent::PageFetched {
                request_id: request.request_id,
                result,
            });
        }
    }
}
