use crate::Generation;

/// Backend work requested by the state machine; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Restore the backend model checkpoint. Fire-and-forget.
    LoadModel,
    /// Checkpoint the backend model; answered with `Msg::CheckpointSaved`.
    SaveModel,
    /// Fetch a batch with the current preferences; answered with
    /// `Msg::BatchLoaded` or `Msg::BatchFailed` carrying the same generation.
    FetchBatch { generation: Generation },
}
