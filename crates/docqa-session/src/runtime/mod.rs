//! Session runtime: executes effects and feeds settlements back.
//!
//! This is the side-effect boundary. The reducer stays pure and produces
//! effects; the runtime spawns one tokio task per effect and each task sends
//! exactly one `SessionEvent::TaskCompleted` to the inbox.
//!
//! Structure:
//! - `mod.rs`: `SessionRuntime`, dispatch and task spawning
//! - `inbox.rs`: inbox channel types
//! - `handlers.rs`: async request handlers

mod handlers;
mod inbox;


use std::future::Future;
use std::sync::Arc;

use docqa_core::transport::{Transport, TransportError};
use inbox::{SessionEventReceiver, SessionEventSender};
use tokio::sync::mpsc;

use crate::common::TaskCompleted;
use crate::effects::SessionEffect;
use crate::events::{SessionEvent, TaskOutcome};
use crate::state::SessionState;
use crate::update;

/// Owns the session state and the transport.
///
/// Must be used from within a tokio runtime.
pub struct SessionRuntime<T: Transport> {
    state: SessionState,
    transport: Arc<T>,
    /// Inbox sender - spawned tasks send settlements here.
    inbox_tx: SessionEventSender,
    inbox_rx: SessionEventReceiver,
}

impl<T: Transport> SessionRuntime<T> {
    pub fn new(state: SessionState, transport: T) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state,
            transport: Arc::new(transport),
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs `event` through the reducer and starts any resulting requests.
    pub fn dispatch(&mut self, event: SessionEvent) {
        let effects = update::update(&mut self.state, event);
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Waits for the next settlement and applies it.
    ///
    /// Returns false immediately when nothing is in flight. Cancel-safe, so
    /// it can sit in a `tokio::select!` next to an input source.
    pub async fn settle_next(&mut self) -> bool {
        if !self.state.is_busy() {
            return false;
        }
        match self.inbox_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Applies settlements until nothing is in flight.
    pub async fn settle_all(&mut self) {
        while self.settle_next().await {}
    }

    /// Applies settlements that have already arrived, without waiting.
    /// Returns how many were applied.
    pub fn settle_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            applied += 1;
        }
        applied
    }

    fn execute_effect(&self, effect: SessionEffect) {
        let transport = Arc::clone(&self.transport);
        match &effect {
            SessionEffect::Upload { files, .. } => {
                let files = files.clone();
                self.spawn_task(&effect, handlers::upload(transport, files));
            }
            SessionEffect::Query { request, .. } => {
                let request = request.clone();
                self.spawn_task(&effect, handlers::query(transport, request));
            }
            SessionEffect::Reset { session_id, .. } => {
                let session_id = session_id.clone();
                self.spawn_task(&effect, handlers::reset(transport, session_id));
            }
        }
    }

    /// Spawns a request and guarantees exactly one settlement for it, even
    /// if the request task panics.
    fn spawn_task<Fut>(&self, effect: &SessionEffect, request: Fut)
    where
        Fut: Future<Output = TaskOutcome> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let id = effect.task();
        let epoch = effect.epoch();
        let fallback = effect.clone();
        tokio::spawn(async move {
            let result = match tokio::spawn(request).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::error!(task = id.0, error = %err, "request task failed");
                    fallback.failed(TransportError::io(format!("request task failed: {err}")))
                }
            };
            tracing::debug!(task = id.0, success = result.is_success(), "request settled");
            let _ = tx.send(SessionEvent::TaskCompleted(TaskCompleted { id, epoch, result }));
        });
    }
}
