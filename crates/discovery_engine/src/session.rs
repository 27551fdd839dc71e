use std::collections::VecDeque;
use std::sync::Arc;

use discovery_core::{update, Effect, Msg, Project, SessionState, SessionView};
use discovery_logging::{discovery_debug, discovery_info, discovery_warn};

use crate::gateway::ApiGateway;
use crate::preference_store::PreferenceStore;

/// Drives one recommendation session: feeds messages through the pure state
/// machine and executes the effects it asks for against the backend.
///
/// Fetch parameters are read from the preference store each time a batch is
/// requested, so edits apply to the next batch and never to the current one.
pub struct SessionEngine {
    state: SessionState,
    gateway: Arc<dyn ApiGateway>,
    preferences: Arc<PreferenceStore>,
}

impl SessionEngine {
    pub fn new(gateway: Arc<dyn ApiGateway>, preferences: Arc<PreferenceStore>) -> Self {
        Self {
            state: SessionState::new(),
            gateway,
            preferences,
        }
    }

    /// Restores the backend model and loads the first batch. Only the first call has an effect.
    pub async fn initialize(&mut self) {
        discovery_info!("Starting recommendation session");
        self.dispatch(Msg::Initialize).await;
    }

    /// Shows the next project, or checkpoints the model and refetches when the
    /// batch is used up. Ignored while a fetch is outstanding.
    pub async fn advance(&mut self) {
        self.dispatch(Msg::Advance).await;
    }

    pub fn current_project(&self) -> Option<&Project> {
        self.state.current_project()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            discovery_debug!(
                "Session phase={:?} cursor={} queue_len={}",
                self.state.phase(),
                self.state.cursor(),
                self.state.queue().len()
            );

            for effect in effects {
                if let Some(reply) = self.run_effect(effect).await {
                    inbox.push_back(reply);
                }
            }
        }
    }

    async fn run_effect(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::LoadModel => {
                let server_url = self.preferences.load().server_url;
                if let Err(err) = self.gateway.load_model(&server_url).await {
                    discovery_warn!("load-model failed: {}", err);
                }
                None
            }
            Effect::SaveModel => {
                let server_url = self.preferences.load().server_url;
                if let Err(err) = self.gateway.save_model(&server_url).await {
                    discovery_warn!("save-model failed: {}", err);
                }
                Some(Msg::CheckpointSaved)
            }
            Effect::FetchBatch { generation } => {
                let preferences = self.preferences.load();
                // Exactly one reply per fetch, so the loading phase always ends.
                let reply = match self.gateway.recommend(&preferences).await {
                    Ok(projects) => {
                        discovery_info!(
                            "Fetched {} project(s) for generation {}",
                            projects.len(),
                            generation
                        );
                        Msg::BatchLoaded {
                            generation,
                            projects,
                        }
                    }
                    Err(err) => {
                        discovery_warn!("recommend failed for generation {}: {}", generation, err);
                        Msg::BatchFailed {
                            generation,
                            reason: err.to_string(),
                        }
                    }
                };
                Some(reply)
            }
        }
    }
}
