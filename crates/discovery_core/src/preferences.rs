pub const DEFAULT_TAGS: &str = "python,machine-learning";
pub const DEFAULT_MIN_STARS: u64 = 0;
pub const DEFAULT_MAX_STARS: u64 = 30_000;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Ordered, duplicate-free set of topic tags.
///
/// Order is kept for display only; the backend treats tags as a set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the comma-joined storage form. Entries are trimmed, empties dropped.
    pub fn parse(joined: &str) -> Self {
        let mut set = Self::new();
        for tag in joined.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
            if !set.contains(tag) {
                set.tags.push(tag.to_string());
            }
        }
        set
    }

    /// Comma-joined storage (and query) form.
    pub fn join(&self) -> String {
        self.tags.join(",")
    }

    /// Normalizes `raw` and appends it. Returns false when the normalized tag
    /// is empty or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        match normalize_tag(raw) {
            Some(tag) if !self.contains(&tag) => {
                self.tags.push(tag);
                true
            }
            _ => false,
        }
    }

    /// Removes by exact match.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|existing| existing != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|existing| existing == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Lowercase, trim, and join whitespace-separated words with `-`.
///
/// Commas count as whitespace because they separate tags in storage.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let lowered = raw.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join("-"))
    }
}

/// Filter scope for recommendations plus the backend location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub tags: TagSet,
    pub min_stars: u64,
    pub max_stars: u64,
    pub server_url: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tags: TagSet::parse(DEFAULT_TAGS),
            min_stars: DEFAULT_MIN_STARS,
            max_stars: DEFAULT_MAX_STARS,
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl Preferences {
    /// Returns a copy whose star range satisfies `min_stars < max_stars`.
    pub fn clamped(mut self) -> Self {
        let (min_stars, max_stars) = clamp_star_range(self.min_stars, self.max_stars);
        self.min_stars = min_stars;
        self.max_stars = max_stars;
        self
    }

    pub fn has_valid_star_range(&self) -> bool {
        self.min_stars < self.max_stars
    }

    /// `tags`, `min_stars`, `max_stars` as sent with recommend and feedback calls.
    pub fn filter_params(&self) -> [(&'static str, String); 3] {
        [
            ("tags", self.tags.join()),
            ("min_stars", self.min_stars.to_string()),
            ("max_stars", self.max_stars.to_string()),
        ]
    }
}

/// Repairs an inverted or empty star range by moving the other bound.
///
/// The minimum is lowered to `max - 1`; when the maximum is 0 there is no room
/// below it, so the maximum is raised to `min + 1` instead.
pub fn clamp_star_range(min_stars: u64, max_stars: u64) -> (u64, u64) {
    if min_stars < max_stars {
        return (min_stars, max_stars);
    }
    if max_stars == 0 {
        return match min_stars.checked_add(1) {
            Some(raised) => (min_stars, raised),
            None => (min_stars - 1, min_stars),
        };
    }
    (max_stars - 1, max_stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_lowers_minimum() {
        assert_eq!(clamp_star_range(100, 50), (49, 50));
        assert_eq!(clamp_star_range(50, 50), (49, 50));
    }

    #[test]
    fn zero_maximum_raises_maximum() {
        assert_eq!(clamp_star_range(0, 0), (0, 1));
        assert_eq!(clamp_star_range(7, 0), (7, 8));
        assert_eq!(clamp_star_range(u64::MAX, 0), (u64::MAX - 1, u64::MAX));
    }

    #[test]
    fn valid_range_is_untouched() {
        assert_eq!(clamp_star_range(0, 30_000), (0, 30_000));
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_tag("  Machine   Learning "), Some("machine-learning".into()));
        assert_eq!(normalize_tag("rust,async"), Some("rust-async".into()));
        assert_eq!(normalize_tag(" \t "), None);
    }
}
