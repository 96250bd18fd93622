//! Collaborators the table controller talks to.
//!
//! Commands look these up through [`LineItemServices`] so tests and the demo build can swap
//! the HTTP adapter for the in-memory store without touching the controller.

use std::any::Any;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use async_trait::async_trait;
use flume::Receiver;
use lineitems_states::State;

use crate::{
    DeleteError, FetchError, LineItemId, LineItemRow, Navigator, ParentRecordId, ViewerId,
    ViewerProfile,
};

/// Whether a fetch may be answered from a client-side cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Cached,
    Bypass,
}

#[async_trait]
pub trait RowDataSource: Send + Sync {
    async fn fetch(
        &self,
        parent: ParentRecordId,
        policy: CachePolicy,
    ) -> Result<Vec<LineItemRow>, FetchError>;

    /// A feed that ticks whenever `parent`'s rows change server side.
    ///
    /// Sources that cannot push return `None`; the table then only re-fetches on explicit
    /// refreshes.
    fn changes(&self, _parent: ParentRecordId) -> Option<Receiver<()>> {
        None
    }
}

#[async_trait]
pub trait LineItemDeleter: Send + Sync {
    async fn delete(&self, line_item: LineItemId) -> Result<(), DeleteError>;
}

#[async_trait]
pub trait ViewerProfileSource: Send + Sync {
    async fn fetch(&self, viewer: ViewerId) -> Result<ViewerProfile, FetchError>;
}

/// The adapters a line items page is wired to.
#[derive(Clone)]
pub struct LineItemServices {
    pub rows: Arc<dyn RowDataSource>,
    pub deleter: Arc<dyn LineItemDeleter>,
    pub profiles: Arc<dyn ViewerProfileSource>,
    pub navigator: Arc<dyn Navigator>,
}

impl LineItemServices {
    pub fn new(
        rows: Arc<dyn RowDataSource>,
        deleter: Arc<dyn LineItemDeleter>,
        profiles: Arc<dyn ViewerProfileSource>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            rows,
            deleter,
            profiles,
            navigator,
        }
    }

    /// Wire every collaborator to one adapter, e.g. a single HTTP client.
    pub fn from_backend<B>(backend: Arc<B>, navigator: Arc<dyn Navigator>) -> Self
    where
        B: RowDataSource + LineItemDeleter + ViewerProfileSource + 'static,
    {
        Self {
            rows: backend.clone(),
            deleter: backend.clone(),
            profiles: backend,
            navigator,
        }
    }
}

impl Debug for LineItemServices {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineItemServices").finish_non_exhaustive()
    }
}

impl State for LineItemServices {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
