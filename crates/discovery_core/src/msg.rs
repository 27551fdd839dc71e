use crate::{Generation, Project};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host started the session.
    Initialize,
    /// Move past the current project (sent after accepted feedback).
    Advance,
    /// The save-model call finished, successfully or not.
    CheckpointSaved,
    /// A recommend call returned a batch.
    BatchLoaded {
        generation: Generation,
        projects: Vec<Project>,
    },
    /// A recommend call failed.
    BatchFailed {
        generation: Generation,
        reason: String,
    },
}
