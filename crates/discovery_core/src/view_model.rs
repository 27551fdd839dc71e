use crate::{Phase, Project};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub phase: Phase,
    pub current: Option<Project>,
    pub cursor: usize,
    pub queue_len: usize,
    pub loading: bool,
    pub last_error: Option<String>,
    pub dirty: bool,
}
