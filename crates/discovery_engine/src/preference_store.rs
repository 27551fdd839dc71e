use std::sync::Arc;

use discovery_core::{
    Preferences, TagSet, DEFAULT_MAX_STARS, DEFAULT_MIN_STARS, DEFAULT_SERVER_URL, DEFAULT_TAGS,
};
use discovery_logging::{discovery_debug, discovery_warn};

use crate::kv::{keys, KeyValueStore};
use crate::persist::PersistError;

/// Filter preferences and backend location, one storage key per field.
pub struct PreferenceStore {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Reads every field, defaulting whatever is missing. Never fails.
    ///
    /// The returned star range is always valid, even if storage was edited by hand.
    pub fn load(&self) -> Preferences {
        let [tags, min_stars, max_stars, server_url] = self.snapshot();
        let tags = tags
            .map(|joined| TagSet::parse(&joined))
            .unwrap_or_else(|| TagSet::parse(DEFAULT_TAGS));
        let min_stars = parse_count(keys::MIN_STARS, min_stars, DEFAULT_MIN_STARS);
        let max_stars = parse_count(keys::MAX_STARS, max_stars, DEFAULT_MAX_STARS);
        let server_url = server_url.unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Preferences {
            tags,
            min_stars,
            max_stars,
            server_url,
        }
        .clamped()
    }

    /// Clamps the star range, then writes all four fields in one commit.
    /// Returns what was written.
    pub fn save(&self, preferences: Preferences) -> Result<Preferences, PersistError> {
        let requested = (preferences.min_stars, preferences.max_stars);
        let preferences = preferences.clamped();
        if requested != (preferences.min_stars, preferences.max_stars) {
            discovery_debug!(
                "Clamped star range {:?} to ({}, {})",
                requested,
                preferences.min_stars,
                preferences.max_stars
            );
        }

        self.kv.set_many(&[
            (keys::TAGS, preferences.tags.join()),
            (keys::MIN_STARS, preferences.min_stars.to_string()),
            (keys::MAX_STARS, preferences.max_stars.to_string()),
            (keys::SERVER_URL, preferences.server_url.clone()),
        ])?;
        Ok(preferences)
    }

    /// Adds a normalized tag and persists the set. Empty or duplicate tags
    /// leave both the set and storage untouched.
    pub fn add_tag(&self, current: &TagSet, tag: &str) -> Result<TagSet, PersistError> {
        let mut tags = current.clone();
        if tags.insert(tag) {
            self.kv.set(keys::TAGS, tags.join())?;
        }
        Ok(tags)
    }

    /// Removes an exactly matching tag and persists the resulting set.
    pub fn remove_tag(&self, current: &TagSet, tag: &str) -> Result<TagSet, PersistError> {
        let mut tags = current.clone();
        tags.remove(tag);
        self.kv.set(keys::TAGS, tags.join())?;
        Ok(tags)
    }

    /// All four fields from one read, so a concurrent `save` is seen whole or not at all.
    fn snapshot(&self) -> [Option<String>; 4] {
        let mut values = self
            .kv
            .get_many(&[keys::TAGS, keys::MIN_STARS, keys::MAX_STARS, keys::SERVER_URL])
            .into_iter();
        std::array::from_fn(|_| values.next().flatten())
    }
}

fn parse_count(key: &str, raw: Option<String>, default: u64) -> u64 {
    match raw {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|err| {
            discovery_warn!("Ignoring stored {}={:?}: {}", key, raw, err);
            default
        }),
    }
}
