//! Scripted channel that replays recorded dataplane replies.
//!
//! Used by unit tests and by offline tools that inspect a captured snapshot
//! instead of a live connection. Replies are keyed by the request name: each
//! request consumes the next reply batch queued for its name, and the last
//! batch stays in place once the queue is down to it.

use crate::channel::Channel;
use crate::error::{BinApiError, BinApiResult};
use crate::message::VppMessage;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::debug;

/// Serializable form of a replay: reply batches and injected failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayScript {
    /// Reply batches per request name, consumed in order.
    pub replies: BTreeMap<String, Vec<Vec<VppMessage>>>,
    /// Request names whose send fails with a transport error.
    pub failures: BTreeMap<String, String>,
}

/// In-memory [`Channel`] answering from a [`ReplayScript`].
#[derive(Debug, Default)]
pub struct ReplayChannel {
    replies: HashMap<String, VecDeque<Vec<VppMessage>>>,
    failures: HashMap<String, String>,
    pending: VecDeque<VppMessage>,
    sent: Vec<VppMessage>,
}

impl ReplayChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_script(script: ReplayScript) -> Self {
        let replies = script
            .replies
            .into_iter()
            .map(|(name, batches)| (name, batches.into_iter().collect()))
            .collect();
        Self {
            replies,
            failures: script.failures.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queues one reply batch for the next request named `request`.
    pub fn script(&mut self, request: &str, batch: Vec<VppMessage>) -> &mut Self {
        self.replies
            .entry(request.to_string())
            .or_default()
            .push_back(batch);
        self
    }

    /// Makes every request named `request` fail with a transport error.
    pub fn fail(&mut self, request: &str, message: impl Into<String>) -> &mut Self {
        self.failures.insert(request.to_string(), message.into());
        self
    }

    /// Requests sent so far, in order.
    pub fn sent(&self) -> &[VppMessage] {
        &self.sent
    }

    /// Number of requests sent with the given name.
    pub fn sent_count(&self, request: &str) -> usize {
        self.sent.iter().filter(|m| m.name() == request).count()
    }

    fn next_batch(&mut self, request: &str) -> Vec<VppMessage> {
        match self.replies.get_mut(request) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => Vec::new(),
        }
    }
}

impl Channel for ReplayChannel {
    fn send(&mut self, request: VppMessage) -> BinApiResult<()> {
        let name = request.name();
        self.sent.push(request);

        if let Some(message) = self.failures.get(name) {
            return Err(BinApiError::transport(message.clone()));
        }

        let batch = self.next_batch(name);
        debug!(request = name, replies = batch.len(), "replaying");
        self.pending = batch.into();
        Ok(())
    }

    fn receive(&mut self) -> BinApiResult<Option<VppMessage>> {
        Ok(self.pending.pop_front())
    }
}
