//! Navigation requests emitted by the `viewProduct` row action.

use flume::{Receiver, Sender};
use log::warn;

use crate::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Product,
}

impl TargetType {
    /// Object api name used in record page paths.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::Product => "Product2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    View,
}

impl NavigationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target_id: ProductId,
    pub target_type: TargetType,
    pub mode: NavigationMode,
}

impl NavigationIntent {
    pub fn view_product(product: ProductId) -> Self {
        Self {
            target_id: product,
            target_type: TargetType::Product,
            mode: NavigationMode::View,
        }
    }

    /// Path of the target record page, e.g. `/lightning/r/Product2/01t5/view`.
    pub fn record_path(&self) -> String {
        format!(
            "/lightning/r/{}/{}/{}",
            self.target_type.api_name(),
            self.target_id,
            self.mode.as_str()
        )
    }

    /// The record page url under `base`, tolerating a trailing slash.
    pub fn record_url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.record_path())
    }
}

/// Host routing service. Fire-and-forget.
pub trait Navigator: Send + Sync {
    fn navigate(&self, intent: NavigationIntent);
}

/// Forwards intents to whoever holds the paired receiver, usually the UI host.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    send: Sender<NavigationIntent>,
}

impl ChannelNavigator {
    pub fn new() -> (Self, Receiver<NavigationIntent>) {
        let (send, recv) = flume::unbounded();
        (Self { send }, recv)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        if self.send.send(intent).is_err() {
            warn!("Navigation receiver dropped, ignoring {intent:?}");
        }
    }
}
