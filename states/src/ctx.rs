use std::any::{TypeId, type_name};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::future::Future;

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::state::Pending;
use crate::{Command, Error, State, TaskHandle, TaskId, Updater};

/// Owner of every [`State`] of a screen.
///
/// Reads and writes happen on the owning thread only. Async work gets an [`Updater`]
/// and posts its results through a channel; they become visible on the next [`sync`].
///
/// [`sync`]: StateCtx::sync
pub struct StateCtx {
    storage: BTreeMap<TypeId, Box<dyn State>>,

    send: Sender<Pending>,
    recv: Receiver<Pending>,

    tasks: JoinSet<()>,
    generation: u64,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for StateCtx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.storage.len())
            .field("pending", &self.recv.len())
            .field("tasks", &self.tasks.len())
            .field("generation", &self.generation)
            .finish()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            storage: BTreeMap::new(),
            send,
            recv,
            tasks: JoinSet::new(),
            generation: 0,
        }
    }

    /// Register `state`, replacing any previous value of the same type.
    pub fn add_state<T: State>(&mut self, state: T) {
        if self
            .storage
            .insert(TypeId::of::<T>(), Box::new(state))
            .is_some()
        {
            debug!("Replaced registered state {}", type_name::<T>());
        }
    }

    pub fn has_state<T: State>(&self) -> bool {
        self.storage.contains_key(&TypeId::of::<T>())
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.storage
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "try_state"))
    }

    pub fn try_state_mut<T: State>(&mut self) -> Result<&mut T, Error> {
        self.storage
            .get_mut(&TypeId::of::<T>())
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
            .ok_or_else(|| Error::state_not_found(type_name::<T>(), "try_state_mut"))
    }

    /// # Panics
    /// Panics if `T` was never registered with [`add_state`](Self::add_state).
    pub fn state<T: State>(&self) -> &T {
        self.try_state::<T>()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// # Panics
    /// Panics if `T` was never registered with [`add_state`](Self::add_state).
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        self.try_state_mut::<T>()
            .unwrap_or_else(|err| panic!("{err}"))
    }

    /// Mutate `T` in place right now, bypassing the updater channel.
    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        match self.try_state_mut::<T>() {
            Ok(state) => f(state),
            Err(err) => warn!("Skipping update: {err}"),
        }
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    /// Apply every update posted since the last call and reap finished tasks.
    ///
    /// Commands posted with [`Updater::dispatch`] run here, in posting order.
    ///
    /// Returns how many updates were applied.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        let pending: Vec<_> = self.recv.try_iter().collect();
        for pending in pending {
            match pending {
                Pending::Replace { id, value, .. } => {
                    self.storage.insert(id, value);
                    applied += 1;
                }
                Pending::Mutate { id, name, apply } => match self.storage.get_mut(&id) {
                    Some(state) => {
                        apply(state.as_any_mut());
                        applied += 1;
                    }
                    None => warn!("Dropping update for unregistered state {name}"),
                },
                Pending::Dispatch { run, .. } => {
                    run(self);
                    applied += 1;
                }
            }
        }

        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result
                && err.is_panic()
            {
                error!("State task panicked: {err}");
            }
        }

        applied
    }

    pub fn dispatch<C: Command>(&mut self, command: C) {
        debug!("Dispatch {command:?}");
        command.run(self);
    }

    /// Reserve the next task id for work spawned on behalf of `T`.
    pub fn next_task_id<T: 'static>(&mut self) -> TaskId {
        self.generation += 1;
        TaskId::new(TypeId::of::<T>(), self.generation)
    }

    /// Spawn `task` on the current tokio runtime, tracked by this context.
    ///
    /// The closure receives a clone of the returned handle, so the task knows its own id and
    /// can observe cancellation. Tasks still running when the context is dropped are aborted.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    pub fn spawn<T, F, Fut>(&mut self, task: F) -> TaskHandle
    where
        T: 'static,
        F: FnOnce(TaskHandle) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = TaskHandle::new(self.next_task_id::<T>(), CancellationToken::new());
        self.tasks.spawn(task(handle.clone()));
        handle
    }

    /// Number of spawned tasks that have not been reaped yet.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for one tracked task to finish. Returns `false` when none are left.
    pub async fn join_next(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Err(err)) if err.is_panic() => {
                error!("State task panicked: {err}");
                true
            }
            Some(_) => true,
            None => false,
        }
    }
}
