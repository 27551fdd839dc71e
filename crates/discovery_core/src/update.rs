use crate::{Effect, Msg, Phase, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialize => {
            if state.phase() != Phase::Idle {
                return (state, Vec::new());
            }
            let generation = state.begin_fetch();
            vec![Effect::LoadModel, Effect::FetchBatch { generation }]
        }
        Msg::Advance => match state.phase() {
            Phase::Ready => {
                if state.step_forward() {
                    Vec::new()
                } else {
                    state.mark_exhausted();
                    vec![Effect::SaveModel]
                }
            }
            // A fetch is already outstanding (or the session never started).
            Phase::Idle | Phase::Loading | Phase::Exhausted => Vec::new(),
        },
        Msg::CheckpointSaved => {
            if state.phase() == Phase::Exhausted {
                let generation = state.begin_fetch();
                vec![Effect::FetchBatch { generation }]
            } else {
                Vec::new()
            }
        }
        Msg::BatchLoaded {
            generation,
            projects,
        } => {
            state.accept_batch(generation, projects);
            Vec::new()
        }
        Msg::BatchFailed { generation, reason } => {
            state.reject_batch(generation, reason);
            Vec::new()
        }
    };

    (state, effects)
}
