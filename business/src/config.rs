use std::any::Any;
use std::env::vars;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lineitems_states::State;
use log::info;
use serde::Deserialize;

use crate::{
    HttpLineItemApi, Labels, LineItemServices, MemoryLineItemStore, Navigator, ParentRecordId,
    StaticProfileSource, ViewerId,
};

const DEMO_VIEWER: &str = "005DEMO000001";
const DEMO_PROFILE: &str = "System Administrator";

/// Where line items come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Http {
        base_url: String,
        parent: ParentRecordId,
    },
    /// The in-memory demo store, optionally answering after `latency`.
    Demo {
        profile_name: String,
        latency: Option<Duration>,
    },
}

// Validated configuration of the line items app.
#[derive(Debug, Clone)]
pub struct AppConfig {
    backend: Backend,
    parent_record_id: Option<ParentRecordId>,
    viewer_id: ViewerId,
    labels_path: Option<PathBuf>,
    record_page_base_url: Option<String>,
}

// Environment variables as read, before defaults and checks.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    parent_record_id: Option<String>,
    viewer_id: Option<String>,
    labels_path: Option<PathBuf>,
    record_page_base_url: Option<String>,
    demo_profile: Option<String>,
    demo_latency_ms: Option<u64>,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn init() -> anyhow::Result<Self> {
        info!("Loading configuration from environment variables");
        let raw: RawConfig = serde_env::from_iter(vars())?;
        Self::from_raw(raw)
    }

    /// Demo backend, built-in labels, no browser navigation.
    pub fn demo() -> Self {
        Self {
            backend: Backend::Demo {
                profile_name: DEMO_PROFILE.to_owned(),
                latency: None,
            },
            parent_record_id: None,
            viewer_id: ViewerId::new(DEMO_VIEWER),
            labels_path: None,
            record_page_base_url: None,
        }
    }

    fn from_raw(raw: RawConfig) -> anyhow::Result<Self> {
        let RawConfig {
            api_base_url,
            parent_record_id,
            viewer_id,
            labels_path,
            record_page_base_url,
            demo_profile,
            demo_latency_ms,
        } = raw;

        let parent_record_id = parent_record_id
            .as_deref()
            .map(ParentRecordId::new)
            .filter(|id| !id.is_blank());
        let viewer_id = viewer_id
            .as_deref()
            .map(ViewerId::new)
            .filter(|id| !id.is_blank());

        let (backend, viewer_id) = match api_base_url.filter(|url| !url.trim().is_empty()) {
            Some(base_url) => {
                info!("Using line items API at {base_url}");
                let Some(parent) = parent_record_id else {
                    anyhow::bail!("PARENT_RECORD_ID must be set when API_BASE_URL is set");
                };
                let Some(viewer_id) = viewer_id else {
                    anyhow::bail!("VIEWER_ID must be set when API_BASE_URL is set");
                };
                (Backend::Http { base_url, parent }, viewer_id)
            }
            None => {
                info!("API_BASE_URL not set, running against the in-memory demo store");
                let backend = Backend::Demo {
                    profile_name: demo_profile.unwrap_or_else(|| DEMO_PROFILE.to_owned()),
                    latency: demo_latency_ms.map(Duration::from_millis),
                };
                (backend, viewer_id.unwrap_or_else(|| ViewerId::new(DEMO_VIEWER)))
            }
        };

        Ok(Self {
            backend,
            parent_record_id,
            viewer_id,
            labels_path,
            record_page_base_url: record_page_base_url.filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    pub fn viewer_id(&self) -> ViewerId {
        self.viewer_id
    }

    pub fn labels_path(&self) -> Option<&Path> {
        self.labels_path.as_deref()
    }

    pub fn record_page_base_url(&self) -> Option<&str> {
        self.record_page_base_url.as_deref()
    }

    /// The configured label catalog, or the built-in English labels.
    pub fn labels(&self) -> anyhow::Result<Labels> {
        match &self.labels_path {
            Some(path) => Labels::load(path)
                .context("LABELS_PATH points at an unusable catalog"),
            None => Ok(Labels::default()),
        }
    }

    /// Wire the adapters for the configured backend and the record to show.
    pub fn connect(&self, navigator: Arc<dyn Navigator>) -> (LineItemServices, ParentRecordId) {
        match &self.backend {
            Backend::Http { base_url, parent } => {
                let api = Arc::new(HttpLineItemApi::new(base_url));
                (LineItemServices::from_backend(api, navigator), *parent)
            }
            Backend::Demo {
                profile_name,
                latency,
            } => {
                let (mut store, demo_parent) = MemoryLineItemStore::demo();
                if let Some(latency) = latency {
                    store = store.with_latency(*latency);
                }
                let store = Arc::new(store);
                let services = LineItemServices::new(
                    store.clone(),
                    store,
                    Arc::new(StaticProfileSource::new(profile_name)),
                    navigator,
                );
                (services, self.parent_record_id.unwrap_or(demo_parent))
            }
        }
    }
}

impl State for AppConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
