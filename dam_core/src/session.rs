//! Running dispatches against a consumer
//!
//! [`FilterBuilder`] never awaits anything itself. This module connects its
//! dispatch tickets to a [`FilterConsumer`], either inline with
//! [`run_dispatch`] or through a background [`DispatchWorker`] that debounces
//! bursts of edits and lets several dispatches be in flight at once.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::time::sleep;

use crate::filter::{Dispatch, DispatchError, DispatchToken, FilterBuilder, FilterConsumer, Settlement};

/// Result of one dispatch, as reported by the worker.
#[derive(Debug)]
pub struct Outcome {
    pub token: DispatchToken,
    pub result: Result<(), DispatchError>,
}

/// Background task that hands dispatches to a consumer.
///
/// With a debounce window only the last ticket of a burst reaches the
/// consumer; the others are dropped unsent. Sent tickets each run on their
/// own task and nothing is cancelled.
pub struct DispatchWorker {
    tickets: mpsc::UnboundedSender<Dispatch>,
    outcomes: mpsc::UnboundedReceiver<Outcome>,
}

impl DispatchWorker {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn<C>(consumer: Arc<C>, debounce: Option<Duration>) -> Self
    where
        C: FilterConsumer + Send + Sync + 'static,
    {
        let (ticket_tx, ticket_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(consumer, debounce, ticket_rx, outcome_tx));

        Self {
            tickets: ticket_tx,
            outcomes: outcome_rx,
        }
    }

    /// Queues a dispatch. Hands the ticket back if the worker has stopped.
    pub fn send(&self, dispatch: Dispatch) -> Result<(), Dispatch> {
        self.tickets.send(dispatch).map_err(|e| e.0)
    }

    /// Waits for the next outcome.
    pub async fn recv(&mut self) -> Option<Outcome> {
        self.outcomes.recv().await
    }

    /// Returns an outcome if one is ready.
    pub fn try_recv(&mut self) -> Option<Outcome> {
        self.outcomes.try_recv().ok()
    }
}

async fn run_worker<C>(
    consumer: Arc<C>,
    debounce: Option<Duration>,
    mut tickets: mpsc::UnboundedReceiver<Dispatch>,
    outcomes: mpsc::UnboundedSender<Outcome>,
) where
    C: FilterConsumer + Send + Sync + 'static,
{
    while let Some(mut dispatch) = tickets.recv().await {
        if let Some(quiet) = debounce {
            loop {
                tokio::select! {
                    next = tickets.recv() => match next {
                        Some(newer) => {
                            debug!("Dispatch {} replaced by {} before sending", dispatch.token, newer.token);
                            dispatch = newer;
                        }
                        None => break,
                    },
                    _ = sleep(quiet) => break,
                }
            }
        }

        debug!("Sending dispatch {} to consumer", dispatch.token);
        let consumer = Arc::clone(&consumer);
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let result = consumer.apply(&dispatch.query).await;
            if outcomes
                .send(Outcome {
                    token: dispatch.token,
                    result,
                })
                .is_err()
            {
                debug!("Outcome of dispatch {} dropped, session closed", dispatch.token);
            }
        });
    }
    debug!("Dispatch worker stopped");
}

/// A builder paired with a dispatch worker.
pub struct FilterSession {
    builder: FilterBuilder,
    worker: DispatchWorker,
}

impl FilterSession {
    /// Starts a worker for the builder's consumer, using the builder's
    /// debounce setting. Seeded rows of an automatic builder are submitted
    /// straight away.
    pub fn new<C>(builder: FilterBuilder, consumer: Arc<C>) -> Self
    where
        C: FilterConsumer + Send + Sync + 'static,
    {
        let worker = DispatchWorker::spawn(consumer, builder.config().debounce);
        let mut session = Self { builder, worker };
        if let Some(dispatch) = session.builder.initial_dispatch() {
            debug!("Submitting seeded filters as dispatch {}", dispatch.token);
            session.submit(dispatch);
        }
        session
    }

    pub fn builder(&self) -> &FilterBuilder {
        &self.builder
    }

    /// Runs an edit and submits whatever dispatch it produces.
    pub fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut FilterBuilder) -> Option<Dispatch>,
    {
        if let Some(dispatch) = f(&mut self.builder) {
            self.submit(dispatch);
        }
    }

    /// Hands a dispatch to the worker. If the worker is gone the dispatch
    /// settles as failed straight away.
    pub fn submit(&mut self, dispatch: Dispatch) {
        if let Err(dispatch) = self.worker.send(dispatch) {
            warn!("Dispatch worker is not running, failing dispatch {}", dispatch.token);
            self.builder
                .complete(dispatch.token, Err(DispatchError::new("Dispatch worker stopped")));
        }
    }

    /// Waits for the next outcome and settles it on the builder.
    pub async fn next_settlement(&mut self) -> Option<Settlement> {
        let outcome = self.worker.recv().await?;
        Some(self.builder.complete(outcome.token, outcome.result))
    }

    /// Settles every outcome that has already arrived.
    pub fn drain_settled(&mut self) -> Vec<Settlement> {
        let mut settled = Vec::new();
        while let Some(outcome) = self.worker.try_recv() {
            settled.push(self.builder.complete(outcome.token, outcome.result));
        }
        settled
    }

    pub fn into_builder(self) -> FilterBuilder {
        self.builder
    }
}

/// Sends one dispatch to a consumer and settles it.
pub async fn run_dispatch<C: FilterConsumer>(
    builder: &mut FilterBuilder,
    consumer: &C,
    dispatch: Dispatch,
) -> Settlement {
    let result = consumer.apply(&dispatch.query).await;
    builder.complete(dispatch.token, result)
}
