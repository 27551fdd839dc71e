use chrono::{TimeZone, Utc};
use discovery_core::{FeedbackEvent, FeedbackKind, Project};
use serde_json::json;

#[test]
fn project_accepts_naive_and_offset_timestamps() {
    let naive: Project = serde_json::from_value(json!({
        "name": "demo",
        "description": "A demo",
        "url": "https://github.com/example/demo",
        "stars": 42,
        "language": "Python",
        "topics": ["ml"],
        "last_updated": "2024-03-01T08:30:00"
    }))
    .unwrap();
    let zulu: Project = serde_json::from_value(json!({
        "name": "demo",
        "description": "A demo",
        "url": "https://github.com/example/demo",
        "stars": 42,
        "language": "Python",
        "topics": ["ml"],
        "last_updated": "2024-03-01T08:30:00Z"
    }))
    .unwrap();

    let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
    assert_eq!(naive.last_updated, expected);
    assert_eq!(naive, zulu);
}

#[test]
fn project_timestamp_is_written_as_rfc3339() {
    let project = Project {
        name: "demo".into(),
        description: String::new(),
        url: "https://github.com/example/demo".into(),
        stars: 1,
        language: "Rust".into(),
        topics: Vec::new(),
        last_updated: Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
    };
    let value = serde_json::to_value(&project).unwrap();
    assert_eq!(value["last_updated"], "2023-12-31T23:59:59Z");
}

#[test]
fn feedback_kind_parses_case_insensitively() {
    assert_eq!("like".parse::<FeedbackKind>(), Ok(FeedbackKind::Like));
    assert_eq!(" Dislike ".parse::<FeedbackKind>(), Ok(FeedbackKind::Dislike));
    assert_eq!("MAYBE".parse::<FeedbackKind>(), Ok(FeedbackKind::Maybe));
    assert!("love".parse::<FeedbackKind>().is_err());
}

#[test]
fn feedback_event_serializes_lowercase_kind() {
    let project = Project {
        name: "demo".into(),
        description: String::new(),
        url: "https://github.com/example/demo".into(),
        stars: 1,
        language: String::new(),
        topics: Vec::new(),
        last_updated: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };
    let event = FeedbackEvent::for_project(&project, FeedbackKind::Maybe);
    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"project_url": "https://github.com/example/demo", "feedback": "maybe"})
    );
}
