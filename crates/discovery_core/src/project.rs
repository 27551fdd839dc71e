use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A candidate project as returned by the recommendation backend.
///
/// Identity is `url`: two projects with the same url are the same project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    pub stars: u64,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
}

/// Closed set of reactions a user can send for the shown project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Like,
    Dislike,
    Maybe,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 3] = [FeedbackKind::Like, FeedbackKind::Dislike, FeedbackKind::Maybe];

    pub fn as_str(self) -> &'static str {
        match self {
            FeedbackKind::Like => "like",
            FeedbackKind::Dislike => "dislike",
            FeedbackKind::Maybe => "maybe",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feedback kind {0:?} (expected like, dislike or maybe)")]
pub struct UnknownFeedbackKind(pub String);

impl FromStr for FeedbackKind {
    type Err = UnknownFeedbackKind;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        FeedbackKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownFeedbackKind(raw.to_string()))
    }
}

/// Body of a feedback submission. Sent once per user action, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackEvent {
    pub project_url: String,
    pub feedback: FeedbackKind,
}

impl FeedbackEvent {
    pub fn for_project(project: &Project, feedback: FeedbackKind) -> Self {
        Self {
            project_url: project.url.clone(),
            feedback,
        }
    }
}

/// RFC 3339 on the way out; RFC 3339 or naive ISO-8601 (read as UTC) on the way in.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Ok(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|err| format!("invalid timestamp {raw:?}: {err}"))
    }
}
