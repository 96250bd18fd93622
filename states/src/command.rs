use std::fmt::Debug;

use crate::StateCtx;

/// An explicit, user-triggered operation.
///
/// Commands are the only place allowed to start IO. They read what they need from the
/// context, spawn async work with [`StateCtx::spawn`] and hand that work an
/// [`Updater`](crate::Updater) for posting results back.
pub trait Command: Debug {
    fn run(self, ctx: &mut StateCtx);
}
