//! An agent that emits synthetic events at a fixed interval.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::{debug, info, trace};

use crate::agent_manager::{AgentError, LoadTestAgent};

/// Sends one synthetic event every `interval` on a background task.
///
/// With `events == 0` the agent keeps going until [`LoadTestAgent::stop_load_test`]
/// is called; otherwise it finishes on its own after `events` events.
pub struct IntervalAgent {
    name: String,
    interval: Duration,
    events: u64,
    started: AtomicBool,
    events_sent: Arc<AtomicU64>,
    stop_tx: watch::Sender<bool>,
}

impl IntervalAgent {
    pub fn new(name: impl Into<String>, interval: Duration, events: u64) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            name: name.into(),
            interval: interval.max(Duration::from_millis(1)),
            events,
            started: AtomicBool::new(false),
            events_sent: Arc::new(AtomicU64::new(0)),
            stop_tx,
        }
    }

    /// Number of events emitted so far.
    pub fn events_sent(&self) -> u64 {
        self.events_sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoadTestAgent for IntervalAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start_load_test(&self) -> Result<(), AgentError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(AgentError::AlreadyStarted(self.name.clone()));
        }

        let agent = self.name.clone();
        let interval = self.interval;
        let limit = self.events;
        let sent = self.events_sent.clone();
        let mut stop_rx = self.stop_tx.subscribe();

        info!(%agent, interval_ms = interval.as_millis() as u64, events = limit, "Starting load test");
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                if *stop_rx.borrow() {
                    break;
                }
                tokio::select! {
                    _ = ticker.tick() => {
                        let sequence = sent.fetch_add(1, Ordering::SeqCst) + 1;
                        trace!(%agent, sequence, "Event sent");
                        if limit != 0 && sequence >= limit {
                            break;
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            info!(%agent, events_sent = sent.load(Ordering::SeqCst), "Load test finished");
        });
        Ok(())
    }

    async fn stop_load_test(&self) -> Result<(), AgentError> {
        debug!(agent = %self.name, "Stopping load test");
        self.stop_tx.send_replace(true);
        Ok(())
    }
}
