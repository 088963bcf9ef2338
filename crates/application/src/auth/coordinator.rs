//! Single-flight token refresh coordination.
//!
//! At most one refresh runs at a time. The first request to fail with 401
//! becomes the leader of a refresh cycle; every other request that fails
//! with 401 while the cycle runs is queued and later replayed or rejected
//! by the leader. The in-flight flag and the queue sit behind one mutex so
//! checking and setting the flag is a single critical section.

use std::collections::VecDeque;

use lockwallet_domain::{ApiRequest, ApiResponse};
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::error::ApiResult;

/// A request waiting for the in-flight refresh to finish.
#[derive(Debug)]
pub(crate) struct PendingRequest {
    /// The request to replay, already marked as retried.
    pub request: ApiRequest,
    /// Where the replay outcome goes.
    pub reply: oneshot::Sender<ApiResult<ApiResponse>>,
}

impl PendingRequest {
    /// Creates a pending request and the receiver its outcome arrives on.
    pub(crate) fn new(request: ApiRequest) -> (Self, oneshot::Receiver<ApiResult<ApiResponse>>) {
        let (reply, rx) = oneshot::channel();
        (Self { request, reply }, rx)
    }

    /// Delivers the outcome. The waiter may have gone away, which is fine.
    pub(crate) fn resolve(self, outcome: ApiResult<ApiResponse>) {
        let _ = self.reply.send(outcome);
    }
}

/// What a request that failed with 401 has to do next.
#[derive(Debug)]
pub(crate) enum Ticket {
    /// No refresh was running: the caller now owns the cycle.
    Leader(ApiRequest),
    /// A refresh is running: wait for the replay outcome.
    Follower(oneshot::Receiver<ApiResult<ApiResponse>>),
}

#[derive(Debug, Default)]
struct CoordinatorState {
    refreshing: bool,
    queue: VecDeque<PendingRequest>,
}

/// Owner of the refresh-in-flight flag and the pending request queue.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    state: Mutex<CoordinatorState>,
}

impl RefreshCoordinator {
    /// Creates an idle coordinator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a refresh cycle is running.
    #[must_use]
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of requests waiting on the running refresh.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Either starts a refresh cycle or queues `request` behind the running one.
    pub(crate) fn join(&self, request: ApiRequest) -> Ticket {
        let mut state = self.state.lock();
        if state.refreshing {
            let (pending, rx) = PendingRequest::new(request);
            state.queue.push_back(pending);
            Ticket::Follower(rx)
        } else {
            state.refreshing = true;
            Ticket::Leader(request)
        }
    }

    /// Ends the running cycle and hands back the queue in FIFO order.
    ///
    /// Clearing the flag and taking the queue happen together, so a 401
    /// arriving afterwards starts a new cycle instead of joining a queue
    /// nobody will drain.
    pub(crate) fn finish(&self) -> Vec<PendingRequest> {
        let mut state = self.state.lock();
        state.refreshing = false;
        state.queue.drain(..).collect()
    }
}
