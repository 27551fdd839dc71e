use std::sync::Arc;

use discovery_core::{FeedbackEvent, FeedbackKind, Project, UnknownFeedbackKind};
use discovery_logging::{discovery_info, discovery_warn};
use thiserror::Error;

use crate::gateway::ApiGateway;
use crate::preference_store::PreferenceStore;
use crate::session::SessionEngine;
use crate::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownFeedbackKind),
    #[error("no project is currently shown")]
    NoCurrentProject,
    #[error("feedback was not delivered: {0}")]
    Gateway(#[from] GatewayError),
}

/// Sends like/dislike/maybe for a project and advances the session once the
/// backend has accepted it.
pub struct FeedbackDispatcher {
    gateway: Arc<dyn ApiGateway>,
    preferences: Arc<PreferenceStore>,
}

impl FeedbackDispatcher {
    pub fn new(gateway: Arc<dyn ApiGateway>, preferences: Arc<PreferenceStore>) -> Self {
        Self {
            gateway,
            preferences,
        }
    }

    /// On failure nothing changes: the same project stays shown and the
    /// caller decides whether to try again.
    pub async fn submit(
        &self,
        session: &mut SessionEngine,
        project: &Project,
        kind: FeedbackKind,
    ) -> Result<(), FeedbackError> {
        let preferences = self.preferences.load();
        let event = FeedbackEvent::for_project(project, kind);

        if let Err(err) = self.gateway.submit_feedback(&preferences, &event).await {
            discovery_warn!("Feedback {} for {} failed: {}", kind, project.url, err);
            return Err(err.into());
        }

        discovery_info!("Feedback {} for {} accepted", kind, project.url);
        session.advance().await;
        Ok(())
    }

    /// Submits for whatever the session currently shows.
    pub async fn submit_current(
        &self,
        session: &mut SessionEngine,
        kind: FeedbackKind,
    ) -> Result<(), FeedbackError> {
        let project = session
            .current_project()
            .cloned()
            .ok_or(FeedbackError::NoCurrentProject)?;
        self.submit(session, &project, kind).await
    }

    /// Like `submit_current`, validating a raw kind first.
    pub async fn submit_named(
        &self,
        session: &mut SessionEngine,
        kind: &str,
    ) -> Result<(), FeedbackError> {
        let kind: FeedbackKind = kind.parse()?;
        self.submit_current(session, kind).await
    }
}
