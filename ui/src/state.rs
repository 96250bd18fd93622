use std::sync::Arc;

use flume::Receiver;
use lineitems_business::{
    AppConfig, ChannelNavigator, Labels, LineItemServices, NavigationIntent, ParentRecordId,
    ViewerId, mount,
};
use lineitems_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
    /// Intents emitted by the `viewProduct` row action.
    pub navigation: Receiver<NavigationIntent>,
    /// Prefix of record page urls; intents are only shown when unset.
    pub record_page_base_url: Option<String>,
    /// The most recent navigation intent, for the status bar.
    pub last_navigation: Option<NavigationIntent>,
}

impl State {
    /// Build the state for `config` and start loading the configured record.
    ///
    /// Must be called inside a tokio runtime.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let labels = config.labels()?;
        let (navigator, navigation) = ChannelNavigator::new();
        let (services, parent) = config.connect(Arc::new(navigator));

        let mut state = Self::mounted(services, labels, parent, config.viewer_id(), navigation);
        state.record_page_base_url = config.record_page_base_url().map(str::to_owned);
        state.ctx.add_state(config.clone());
        Ok(state)
    }

    /// Mount the line items page on explicit collaborators.
    ///
    /// `navigation` must be the receiver paired with the navigator inside `services`.
    pub fn mounted(
        services: LineItemServices,
        labels: Labels,
        parent: ParentRecordId,
        viewer: ViewerId,
        navigation: Receiver<NavigationIntent>,
    ) -> Self {
        let mut ctx = StateCtx::new();
        mount(&mut ctx, services, labels, parent, viewer);

        Self {
            ctx,
            navigation,
            record_page_base_url: None,
            last_navigation: None,
        }
    }

    /// Apply pending updates and collect the navigation intents emitted since the last call.
    pub fn sync(&mut self) -> Vec<NavigationIntent> {
        self.ctx.sync();
        let intents: Vec<_> = self.navigation.try_iter().collect();
        if let Some(last) = intents.last() {
            self.last_navigation = Some(*last);
        }
        intents
    }

    /// Url to open for `intent`, when a record page base url is configured.
    pub fn navigation_url(&self, intent: &NavigationIntent) -> Option<String> {
        self.record_page_base_url
            .as_deref()
            .map(|base| intent.record_url(base))
    }
}
