use std::any::{Any, TypeId, type_name};
use std::fmt::Debug;

use flume::Sender;
use log::warn;

use crate::{Command, StateCtx};

/// A value owned by [`StateCtx`](crate::StateCtx), addressed by its concrete type.
///
/// Implementors only have to hand out `Any` views of themselves so the context can
/// downcast on access:
///
/// ```ignore
/// impl State for MyState {
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait State: Any + Send + Debug {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

type Mutation = Box<dyn FnOnce(&mut dyn Any) + Send>;
type Deferred = Box<dyn FnOnce(&mut StateCtx) + Send>;

/// A change queued by an [`Updater`], applied on the next [`StateCtx::sync`].
pub(crate) enum Pending {
    Replace {
        id: TypeId,
        name: &'static str,
        value: Box<dyn State>,
    },
    Mutate {
        id: TypeId,
        name: &'static str,
        apply: Mutation,
    },
    Dispatch {
        name: &'static str,
        run: Deferred,
    },
}

impl Pending {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Replace { name, .. } | Self::Mutate { name, .. } | Self::Dispatch { name, .. } => {
                *name
            }
        }
    }
}

/// Cloneable, `Send` handle that async work uses to post results back to the context.
///
/// Nothing is applied until the owner of the context calls `sync()`, so every state
/// change happens on the thread that owns the [`StateCtx`](crate::StateCtx).
#[derive(Debug, Clone)]
pub struct Updater {
    send: Sender<Pending>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Pending>) -> Self {
        Self { send }
    }

    /// Replace the stored value of `T` wholesale.
    pub fn set<T: State>(&self, value: T) {
        self.post(Pending::Replace {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            value: Box::new(value),
        });
    }

    /// Apply `f` to the stored value of `T`.
    pub fn update<T: State>(&self, f: impl FnOnce(&mut T) + Send + 'static) {
        let apply: Mutation = Box::new(move |any: &mut dyn Any| {
            if let Some(state) = any.downcast_mut::<T>() {
                f(state);
            }
        });
        self.post(Pending::Mutate {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            apply,
        });
    }

    /// Run `command` against the context on the next sync.
    ///
    /// For results that have to read one state before writing another.
    pub fn dispatch<C: Command + Send + 'static>(&self, command: C) {
        self.post(Pending::Dispatch {
            name: type_name::<C>(),
            run: Box::new(move |ctx: &mut StateCtx| ctx.dispatch(command)),
        });
    }

    fn post(&self, pending: Pending) {
        let name = pending.name();
        if self.send.send(pending).is_err() {
            // The context is gone; the result has nowhere to land.
            warn!("Dropping update for {name}: state context was dropped");
        }
    }
}
