//! Discovery core: domain types and the pure recommendation session state machine.
mod effect;
mod msg;
mod preferences;
mod project;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use preferences::{
    clamp_star_range, normalize_tag, Preferences, TagSet, DEFAULT_MAX_STARS, DEFAULT_MIN_STARS,
    DEFAULT_SERVER_URL, DEFAULT_TAGS,
};
pub use project::{FeedbackEvent, FeedbackKind, Project, UnknownFeedbackKind};
pub use state::{Generation, Phase, SessionState};
pub use update::update;
pub use view_model::SessionView;
