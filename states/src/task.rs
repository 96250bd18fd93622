//! Identifiers and handles for work spawned by the state context.
//!
//! - `TaskId`: which state type spawned the task plus a per-context generation counter
//! - `TaskHandle`: a `TaskId` paired with the `CancellationToken` the task listens on
//!
//! Long-lived tasks (row subscriptions) keep their handle around so they can be torn down
//! explicitly; results from a task whose handle is no longer current are discarded by the
//! owner of the state.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

/// Unique identifier for a spawned task.
///
/// Two tasks spawned for the same state type share a `type_id` and differ by `generation`,
/// which only ever grows inside one [`StateCtx`](crate::StateCtx). Comparing ids is how a
/// late completion from a superseded task is recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher generations were spawned later.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Handle to a spawned task with cooperative cancellation.
///
/// Cancelling does not abort the future; the task must observe the token, typically with
/// `tokio::select!` on `token.cancelled()`. Clones share the same token.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Resolves once [`cancel`](Self::cancel) was called on this handle or a clone.
    pub async fn cancelled(&self) {
        self.cancel_token.cancelled().await;
    }
}
