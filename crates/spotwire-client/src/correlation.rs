//! Registry of in-flight requests keyed by `client_msg_id`.
//!
//! The map is the only piece of state shared between caller tasks and the
//! receive loop. Callers insert on dispatch and evict on timeout; the
//! receive loop completes on a correlated response; teardown drains
//! everything at once.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::oneshot;

use spotwire_proto::messages::ProtoMessage;

use crate::error::ClientError;

pub(crate) type Completion = oneshot::Sender<Result<ProtoMessage, ClientError>>;

struct Pending {
    completion: Completion,
    /// Shared with the queued outbound item; set on eviction so the send
    /// scheduler drops the frame if it has not hit the wire yet.
    cancelled: Arc<AtomicBool>,
}

#[derive(Default)]
pub(crate) struct PendingMap {
    inner: Mutex<HashMap<String, Pending>>,
}

impl PendingMap {
    /// Registers a waiter; refuses a `client_msg_id` that is already in
    /// flight.
    pub fn insert(
        &self,
        id: &str,
        completion: Completion,
        cancelled: Arc<AtomicBool>,
    ) -> bool {
        let mut inner = self.inner.lock();
        if inner.contains_key(id) {
            return false;
        }
        inner.insert(id.to_string(), Pending { completion, cancelled });
        true
    }

    /// Resolves the waiter for `id` with a response envelope.
    ///
    /// Returns `false` when the id is unknown (evicted or never ours); the
    /// caller logs and drops such responses.
    pub fn complete(&self, id: &str, envelope: ProtoMessage) -> bool {
        let Some(pending) = self.inner.lock().remove(id) else {
            return false;
        };
        pending.completion.send(Ok(envelope)).is_ok()
    }

    /// Removes the waiter for `id` without resolving it and flags the
    /// outbound item as cancelled.
    pub fn evict(&self, id: &str) -> bool {
        let Some(pending) = self.inner.lock().remove(id) else {
            return false;
        };
        pending.cancelled.store(true, Ordering::Release);
        true
    }

    /// Fails every waiter with `ConnectionLost(reason)`.
    pub fn fail_all(&self, reason: &str) {
        let drained: Vec<Pending> = {
            let mut inner = self.inner.lock();
            inner.drain().map(|(_, pending)| pending).collect()
        };
        for pending in drained {
            pending.cancelled.store(true, Ordering::Release);
            let _ = pending
                .completion
                .send(Err(ClientError::ConnectionLost(reason.to_string())));
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }
}
