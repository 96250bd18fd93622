//! Single-owner state context for immediate-mode UIs.
//!
//! - [`StateCtx`] owns every [`State`] of a screen and is only touched by the UI thread.
//! - Async work receives an [`Updater`] and posts replacements or mutations through a
//!   `flume` channel; they are applied on the next [`StateCtx::sync`].
//! - [`Command`]s are the explicit entry points that are allowed to start IO.
//! - [`TaskHandle`]s carry a cancellation token so long-lived work can be torn down.

mod command;
mod ctx;
mod error;
mod state;
mod task;

pub use command::Command;
pub use ctx::StateCtx;
pub use error::Error;
pub use state::{State, Updater};
pub use task::{TaskHandle, TaskId};
