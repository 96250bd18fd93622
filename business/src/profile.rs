//! Viewer profile resolution and the admin-gated column schema.

use std::any::Any;

use lineitems_states::{Command, State, StateCtx, TaskHandle};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use crate::{ColumnSchema, ColumnSet, FetchError, Labels, LineItemServices, ViewerId, build_schema};

/// Substring of the profile name that grants the admin column. Case-sensitive.
pub const ADMIN_PROFILE_MARKER: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerProfile {
    pub profile_name: String,
}

impl ViewerProfile {
    pub fn new(profile_name: &str) -> Self {
        Self {
            profile_name: profile_name.to_owned(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.profile_name.contains(ADMIN_PROFILE_MARKER)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileResolution {
    #[default]
    Idle,
    Resolving(ViewerId),
    Resolved {
        viewer: ViewerId,
        profile: ViewerProfile,
    },
    Failed {
        viewer: ViewerId,
        error: FetchError,
    },
}

impl ProfileResolution {
    pub fn viewer(&self) -> Option<ViewerId> {
        match self {
            Self::Idle => None,
            Self::Resolving(viewer)
            | Self::Resolved { viewer, .. }
            | Self::Failed { viewer, .. } => Some(*viewer),
        }
    }
}

/// Profile lookup state. Failures stay here and never reach the table.
#[derive(Debug, Default)]
pub struct ProfileState {
    resolution: ProfileResolution,
    task: Option<TaskHandle>,
}

impl ProfileState {
    pub fn resolution(&self) -> &ProfileResolution {
        &self.resolution
    }

    pub fn profile(&self) -> Option<&ViewerProfile> {
        match &self.resolution {
            ProfileResolution::Resolved { profile, .. } => Some(profile),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.resolution {
            ProfileResolution::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.profile().is_some_and(ViewerProfile::is_admin)
    }

    /// Whether a dispatch for `viewer` would start a new lookup.
    fn needs_lookup(&self, viewer: ViewerId) -> bool {
        match &self.resolution {
            ProfileResolution::Resolving(current)
            | ProfileResolution::Resolved {
                viewer: current, ..
            } => *current != viewer,
            ProfileResolution::Idle | ProfileResolution::Failed { .. } => true,
        }
    }

    /// Record the outcome of the lookup for `viewer`. Returns `false` for a stale result.
    pub fn on_profile_resolved(
        &mut self,
        viewer: ViewerId,
        result: Result<ViewerProfile, FetchError>,
    ) -> bool {
        if self.resolution != ProfileResolution::Resolving(viewer) {
            debug!("Ignoring stale profile result for {viewer}");
            return false;
        }
        self.task = None;
        self.resolution = match result {
            Ok(profile) => ProfileResolution::Resolved { viewer, profile },
            Err(error) => ProfileResolution::Failed { viewer, error },
        };
        true
    }
}

impl Drop for ProfileState {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}

impl State for ProfileState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Look up `viewer`'s profile and rebuild the column schema from it.
///
/// One-shot per viewer: dispatching again while the lookup is in flight or after it
/// succeeded does nothing. A failed lookup may be retried. Switching to another viewer drops
/// the admin column until that viewer's lookup succeeds.
#[derive(Debug, Clone, Copy)]
pub struct ResolveViewerProfileCommand {
    pub viewer: ViewerId,
}

impl Command for ResolveViewerProfileCommand {
    fn run(self, ctx: &mut StateCtx) {
        let viewer = self.viewer;
        let Ok(profiles) = ctx
            .try_state::<LineItemServices>()
            .map(|services| services.profiles.clone())
        else {
            warn!("No line item services registered, cannot resolve profile of {viewer}");
            return;
        };
        let columns = ColumnSet::from_labels(
            &ctx.try_state::<Labels>().cloned().unwrap_or_default(),
        );

        let previous = match ctx.try_state::<ProfileState>() {
            Ok(state) if !state.needs_lookup(viewer) => {
                debug!("Profile of {viewer} already resolved or resolving");
                return;
            }
            Ok(state) => state.resolution().viewer(),
            Err(err) => {
                warn!("Cannot resolve profile: {err}");
                return;
            }
        };
        if previous.is_some_and(|previous| previous != viewer) {
            info!("Viewer changed to {viewer}, resetting column schema");
            ctx.add_state(build_schema(&columns, false));
        }

        let updater = ctx.updater();
        let task = ctx.spawn::<ProfileState, _, _>(move |task| async move {
            let result = tokio::select! {
                _ = task.cancelled() => return,
                result = profiles.fetch(viewer) => result,
            };

            match &result {
                Ok(profile) => info!("Resolved profile of {viewer}: {}", profile.profile_name),
                Err(err) => error!("Failed to resolve profile of {viewer}: {err}"),
            }
            updater.dispatch(ApplyViewerProfile {
                viewer,
                result,
                columns,
            });
        });

        let state = ctx.state_mut::<ProfileState>();
        if let Some(previous) = state.task.replace(task) {
            previous.cancel();
        }
        state.resolution = ProfileResolution::Resolving(viewer);
    }
}

/// Lands a finished lookup: records it on [`ProfileState`] and, if it is still the pending
/// one, rebuilds the schema from it.
#[derive(Debug)]
struct ApplyViewerProfile {
    viewer: ViewerId,
    result: Result<ViewerProfile, FetchError>,
    columns: ColumnSet,
}

impl Command for ApplyViewerProfile {
    fn run(self, ctx: &mut StateCtx) {
        let is_admin = self.result.as_ref().is_ok_and(ViewerProfile::is_admin);
        let accepted = match ctx.try_state_mut::<ProfileState>() {
            Ok(state) => state.on_profile_resolved(self.viewer, self.result),
            Err(err) => {
                warn!("Dropping profile of {}: {err}", self.viewer);
                return;
            }
        };
        if accepted {
            ctx.add_state(build_schema(&self.columns, is_admin));
        }
    }
}

/// The schema a viewer sees before (or without) a resolved profile.
pub fn default_schema(labels: &Labels) -> ColumnSchema {
    build_schema(&ColumnSet::from_labels(labels), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowActionId;

    #[test]
    fn admin_check_is_a_case_sensitive_substring() {
        assert!(ViewerProfile::new("System Administrator").is_admin());
        assert!(ViewerProfile::new("Admin").is_admin());
        assert!(ViewerProfile::new("Sales Admin Europe").is_admin());
        assert!(!ViewerProfile::new("administrator").is_admin());
        assert!(!ViewerProfile::new("Standard User").is_admin());
        assert!(!ViewerProfile::new("").is_admin());
    }

    #[test]
    fn profile_decodes_from_wire_shape() {
        let profile: ViewerProfile =
            serde_json::from_str(r#"{"profileName": "System Administrator"}"#)
                .expect("profile should decode");
        assert!(profile.is_admin());
    }

    #[test]
    fn only_the_pending_viewer_result_is_applied() {
        let alice = ViewerId::new("alice");
        let bob = ViewerId::new("bob");
        let mut state = ProfileState {
            resolution: ProfileResolution::Resolving(bob),
            task: None,
        };

        assert!(!state.on_profile_resolved(alice, Ok(ViewerProfile::new("Admin"))));
        assert!(!state.is_admin());

        assert!(state.on_profile_resolved(bob, Err(FetchError::Status(503))));
        assert_eq!(state.error(), Some(&FetchError::Status(503)));
        assert_eq!(state.resolution().viewer(), Some(bob));
    }

    #[test]
    fn only_the_pending_lookup_rebuilds_the_schema() {
        let columns = ColumnSet::from_labels(&Labels::default());
        let alice = ViewerId::new("alice");
        let bob = ViewerId::new("bob");
        let mut ctx = StateCtx::new();
        ctx.add_state(build_schema(&columns, false));
        ctx.add_state(ProfileState {
            resolution: ProfileResolution::Resolving(bob),
            task: None,
        });

        ctx.dispatch(ApplyViewerProfile {
            viewer: alice,
            result: Ok(ViewerProfile::new("System Administrator")),
            columns: columns.clone(),
        });
        assert!(!ctx.state::<ColumnSchema>().has_action(RowActionId::ViewProduct));

        ctx.dispatch(ApplyViewerProfile {
            viewer: bob,
            result: Ok(ViewerProfile::new("System Administrator")),
            columns,
        });
        assert!(ctx.state::<ColumnSchema>().has_action(RowActionId::ViewProduct));
        assert!(ctx.state::<ProfileState>().is_admin());
    }

    #[test]
    fn accepted_failure_leaves_a_base_schema() {
        let columns = ColumnSet::from_labels(&Labels::default());
        let bob = ViewerId::new("bob");
        let mut ctx = StateCtx::new();
        ctx.add_state(build_schema(&columns, true));
        ctx.add_state(ProfileState {
            resolution: ProfileResolution::Resolving(bob),
            task: None,
        });

        ctx.dispatch(ApplyViewerProfile {
            viewer: bob,
            result: Err(FetchError::Status(503)),
            columns,
        });

        assert!(!ctx.state::<ColumnSchema>().has_action(RowActionId::ViewProduct));
        assert_eq!(ctx.state::<ProfileState>().error(), Some(&FetchError::Status(503)));
    }

    #[test]
    fn lookups_are_one_shot_per_viewer_except_after_failure() {
        let viewer = ViewerId::new("005");
        let mut state = ProfileState::default();
        assert!(state.needs_lookup(viewer));

        state.resolution = ProfileResolution::Resolving(viewer);
        assert!(!state.needs_lookup(viewer));
        assert!(state.needs_lookup(ViewerId::new("006")));

        state.resolution = ProfileResolution::Resolved {
            viewer,
            profile: ViewerProfile::new("Standard User"),
        };
        assert!(!state.needs_lookup(viewer));

        state.resolution = ProfileResolution::Failed {
            viewer,
            error: FetchError::Transport("reset".to_owned()),
        };
        assert!(state.needs_lookup(viewer));
    }
}
