use crate::view_model::SessionView;
use crate::Project;

/// Fetch generation; every `FetchBatch` effect carries a fresh one.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Created, not yet initialized.
    #[default]
    Idle,
    /// A recommend call is outstanding.
    Loading,
    /// A queue (possibly empty) is being shown.
    Ready,
    /// The last item was consumed; waiting for the model checkpoint before refetching.
    Exhausted,
}

/// Client state of one recommendation session. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    queue: Vec<Project>,
    cursor: usize,
    phase: Phase,
    last_generation: Generation,
    in_flight: Option<Generation>,
    last_error: Option<String>,
    dirty: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> &[Project] {
        &self.queue
    }

    /// Generation of the outstanding fetch, if any.
    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    /// The project to show, only while the session is `Ready`.
    pub fn current_project(&self) -> Option<&Project> {
        match self.phase {
            Phase::Ready => self.queue.get(self.cursor),
            Phase::Idle | Phase::Loading | Phase::Exhausted => None,
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            phase: self.phase,
            current: self.current_project().cloned(),
            cursor: self.cursor,
            queue_len: self.queue.len(),
            loading: matches!(self.phase, Phase::Loading | Phase::Exhausted),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_fetch(&mut self) -> Generation {
        self.last_generation += 1;
        self.in_flight = Some(self.last_generation);
        self.phase = Phase::Loading;
        self.dirty = true;
        self.last_generation
    }

    fn settle(&mut self, generation: Generation) -> bool {
        if self.in_flight != Some(generation) {
            return false;
        }
        self.in_flight = None;
        self.phase = Phase::Ready;
        self.dirty = true;
        true
    }

    pub(crate) fn accept_batch(&mut self, generation: Generation, projects: Vec<Project>) -> bool {
        if !self.settle(generation) {
            return false;
        }
        self.queue = projects;
        self.cursor = 0;
        self.last_error = None;
        true
    }

    /// Falls back to the queue that was shown before the fetch.
    pub(crate) fn reject_batch(&mut self, generation: Generation, reason: String) -> bool {
        if !self.settle(generation) {
            return false;
        }
        self.last_error = Some(reason);
        true
    }

    /// Moves to the next queued item; false when there is none.
    pub(crate) fn step_forward(&mut self) -> bool {
        if self.cursor + 1 < self.queue.len() {
            self.cursor += 1;
            self.dirty = true;
            true
        } else {
            false
        }
    }

    pub(crate) fn mark_exhausted(&mut self) {
        self.phase = Phase::Exhausted;
        self.dirty = true;
    }
}
