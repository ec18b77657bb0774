//! Message loop that executes coordinator effects on the tokio runtime.
//!
//! Every effect that talks to the API or the sensor runs as its own task and
//! reports back through the message channel. Responses are applied in the
//! order they arrive, which is not necessarily the order they were issued.

use crate::coordinator::ViewCoordinator;
use crate::domains::location::LocationResolver;
use crate::messages::{Effect, Message};
use ecomap_contracts::prelude::FacilityApi;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Notify, mpsc};
use tokio::task::AbortHandle;
use tracing::{debug, trace};

/// Cloneable sender used by adapters to feed user input into the loop.
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl RuntimeHandle {
    pub fn send(&self, message: Message) {
        let _ = self.tx.send(message);
    }

    pub fn shutdown(&self) {
        self.send(Message::Shutdown);
    }
}

/// Counts tasks whose result the loop is still waiting for.
#[derive(Debug, Clone, Default)]
struct InFlight {
    count: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl InFlight {
    fn enter(&self) -> InFlightGuard {
        self.count.fetch_add(1, Ordering::SeqCst);
        InFlightGuard {
            count: Arc::clone(&self.count),
            notify: Arc::clone(&self.notify),
        }
    }

    fn pending(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Released when the task finishes or is aborted.
struct InFlightGuard {
    count: Arc<AtomicUsize>,
    notify: Arc<Notify>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count.fetch_sub(1, Ordering::SeqCst);
        self.notify.notify_one();
    }
}

pub struct Runtime {
    coordinator: ViewCoordinator,
    api: Arc<dyn FacilityApi>,
    resolver: Arc<LocationResolver>,
    tx: mpsc::UnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    in_flight: InFlight,
    debounce: Option<AbortHandle>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("coordinator", &self.coordinator)
            .field("api", &self.api)
            .field("in_flight", &self.in_flight.pending())
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(
        coordinator: ViewCoordinator,
        api: Arc<dyn FacilityApi>,
        resolver: Arc<LocationResolver>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            coordinator,
            api,
            resolver,
            tx,
            rx,
            in_flight: InFlight::default(),
            debounce: None,
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn coordinator(&self) -> &ViewCoordinator {
        &self.coordinator
    }

    /// Number of fetches and timers the loop is still waiting on.
    pub fn pending(&self) -> usize {
        self.in_flight.pending()
    }

    /// Kick off location resolution and the category fetch.
    pub fn start(&mut self) {
        let effects = self.coordinator.start();
        self.execute_all(effects);
    }

    /// Apply one message. Returns false once the loop should stop.
    pub fn dispatch(&mut self, message: Message) -> bool {
        if matches!(message, Message::Shutdown) {
            debug!("shutdown requested");
            return false;
        }
        trace!(?message, "dispatch");
        let effects = self.coordinator.update(message);
        self.execute_all(effects);
        true
    }

    /// Process messages until shutdown or until every sender is gone.
    pub async fn run(&mut self) {
        while let Some(message) = self.rx.recv().await {
            if !self.dispatch(message) {
                break;
            }
        }
    }

    /// Process messages until nothing is in flight and the queue is empty.
    ///
    /// Notice expiry timers are not waited for. Returns false if a shutdown
    /// message was seen.
    pub async fn run_until_settled(&mut self) -> bool {
        loop {
            while let Ok(message) = self.rx.try_recv() {
                if !self.dispatch(message) {
                    return false;
                }
            }

            if self.in_flight.pending() == 0 {
                // Tasks send before releasing their guard.
                match self.rx.try_recv() {
                    Ok(message) => {
                        if !self.dispatch(message) {
                            return false;
                        }
                        continue;
                    }
                    Err(_) => return true,
                }
            }

            let notify = Arc::clone(&self.in_flight.notify);
            let next = tokio::select! {
                message = self.rx.recv() => message,
                _ = notify.notified() => None,
            };
            if let Some(message) = next
                && !self.dispatch(message)
            {
                return false;
            }
        }
    }

    fn execute_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.execute(effect);
        }
    }

    fn execute(&mut self, effect: Effect) {
        debug!(?effect, "executing effect");
        match effect {
            Effect::ResolveLocation => {
                let resolver = Arc::clone(&self.resolver);
                self.spawn_tracked(async move {
                    Message::LocationResolved(resolver.resolve().await)
                });
            }
            Effect::FetchCategories => {
                let api = Arc::clone(&self.api);
                self.spawn_tracked(async move {
                    Message::CategoriesLoaded(api.fetch_categories().await)
                });
            }
            Effect::FetchPage(request) => {
                let api = Arc::clone(&self.api);
                self.spawn_tracked(async move {
                    let result = api.fetch_facilities(&request.query).await;
                    Message::PageLoaded { request, result }
                });
            }
            Effect::Debounce { text, delay } => {
                if let Some(previous) = self.debounce.take() {
                    previous.abort();
                }
                let handle = self.spawn_tracked(async move {
                    tokio::time::sleep(delay).await;
                    Message::SearchDebounced(text)
                });
                self.debounce = Some(handle);
            }
            Effect::FetchStatuses(facility_id) => {
                let api = Arc::clone(&self.api);
                self.spawn_tracked(async move {
                    let result = api.fetch_statuses(facility_id).await;
                    Message::StatusesLoaded {
                        facility_id,
                        result,
                    }
                });
            }
            Effect::SubmitStatus { facility_id, text } => {
                let api = Arc::clone(&self.api);
                self.spawn_tracked(async move {
                    let result = api.submit_status(facility_id, &text).await;
                    Message::StatusSubmitted {
                        facility_id,
                        result,
                    }
                });
            }
            Effect::UpdateStatus { status_id, text } => {
                let api = Arc::clone(&self.api);
                self.spawn_tracked(async move {
                    let result = api.update_status(status_id, &text).await;
                    Message::StatusUpdated { status_id, result }
                });
            }
            Effect::ExpireNotice { id, after } => {
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Message::DismissNotice(id));
                });
            }
        }
    }

    fn spawn_tracked<F>(&self, work: F) -> AbortHandle
    where
        F: Future<Output = Message> + Send + 'static,
    {
        let guard = self.in_flight.enter();
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let message = work.await;
            let _ = tx.send(message);
            drop(guard);
        });
        task.abort_handle()
    }
}
