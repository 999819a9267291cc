//! Engine
//!
//! Serializes event handling per sender: every sender gets a dedicated
//! worker task fed by an mpsc channel, so two rapid messages from the same
//! person never interleave inside a flow, while different senders proceed
//! in parallel. The map lock covers only handle lookup; sends happen
//! outside it, so one sender's full queue backpressures that sender alone.

use crate::router::FlowRouter;
use crate::session::SessionStore;
use crate::transport::{ChatTransport, InboundEvent};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

const WORKER_QUEUE_DEPTH: usize = 32;
const DEFAULT_WORKER_IDLE: Duration = Duration::from_secs(600);

pub struct Engine {
    router: Arc<FlowRouter>,
    transport: Arc<dyn ChatTransport>,
    workers: Mutex<HashMap<String, mpsc::Sender<InboundEvent>>>,
    idle_timeout: Duration,
}

impl Engine {
    pub fn new(router: Arc<FlowRouter>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            router,
            transport,
            workers: Mutex::new(HashMap::new()),
            idle_timeout: DEFAULT_WORKER_IDLE,
        }
    }

    /// Workers that see no event for this long shut down and are reclaimed.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Queue an event for its sender's worker, spawning one on first
    /// contact (or after a previous worker retired).
    pub async fn dispatch(self: &Arc<Self>, event: InboundEvent) {
        let mut event = event;
        for _ in 0..2 {
            let tx = self.worker_handle(&event.sender).await;
            match tx.send(event).await {
                Ok(()) => return,
                // Worker retired between lookup and send; try a fresh one.
                Err(mpsc::error::SendError(rejected)) => event = rejected,
            }
        }
        tracing::warn!(sender = %event.sender, "dropping event, worker unavailable");
    }

    /// Clone the sender's worker handle, creating the worker if needed.
    /// Holds the map lock only for the lookup, never across a send.
    async fn worker_handle(self: &Arc<Self>, key: &str) -> mpsc::Sender<InboundEvent> {
        let mut workers = self.workers.lock().await;
        workers.retain(|_, tx| !tx.is_closed());
        if let Some(tx) = workers.get(key) {
            return tx.clone();
        }
        let (tx, rx) = mpsc::channel(WORKER_QUEUE_DEPTH);
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            engine.run_worker(rx).await;
        });
        workers.insert(key.to_string(), tx.clone());
        tx
    }

    async fn run_worker(&self, mut rx: mpsc::Receiver<InboundEvent>) {
        loop {
            match tokio::time::timeout(self.idle_timeout, rx.recv()).await {
                Ok(Some(event)) => self.process(event).await,
                Ok(None) => return,
                Err(_) => break,
            }
        }
        // Idle shutdown: refuse new sends first, then drain anything that
        // raced into the buffer. Senders seeing the closed channel create
        // a replacement worker.
        rx.close();
        while let Some(event) = rx.recv().await {
            self.process(event).await;
        }
    }

    async fn process(&self, event: InboundEvent) {
        let sender = event.sender.clone();
        let replies = self.router.handle(event).await;
        for reply in replies {
            if let Err(err) = self.transport.send(reply).await {
                tracing::warn!(sender = %sender, error = %err, "outbound delivery failed");
            }
        }
    }

    #[cfg(test)]
    async fn live_worker_count(&self) -> usize {
        self.workers
            .lock()
            .await
            .values()
            .filter(|tx| !tx.is_closed())
            .count()
    }
}

/// Periodically drop expired sessions so abandoned conversations don't
/// accumulate.
pub fn spawn_session_sweeper(sessions: Arc<SessionStore>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let purged = sessions.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "expired sessions dropped");
            }
        }
    });
}
