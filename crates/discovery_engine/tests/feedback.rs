mod common;

use common::{batch, project, Call, Harness};
use discovery_engine::{FailureKind, FeedbackError, FeedbackKind};

#[tokio::test]
async fn accepted_feedback_advances_with_filter_scope() {
    let mut h = Harness::new();
    h.gateway.push_batch(batch(&["a", "b", "c"]));
    h.session.initialize().await;

    h.dispatcher
        .submit_current(&mut h.session, FeedbackKind::Like)
        .await
        .unwrap();

    assert_eq!(
        h.gateway.calls().last(),
        Some(&Call::Feedback {
            project_url: "https://github.com/example/a".to_string(),
            feedback: FeedbackKind::Like,
            tags: "python,machine-learning".to_string(),
        })
    );
    assert_eq!(h.session.state().cursor(), 1);
    assert_eq!(h.current_name().as_deref(), Some("b"));
}

#[tokio::test]
async fn feedback_walks_batch_and_exhausts_into_refetch() {
    let mut h = Harness::new();
    h.gateway.push_batch(batch(&["a", "b", "c"]));
    h.gateway.push_batch(batch(&["d", "e", "f"]));
    h.session.initialize().await;

    let kinds = [FeedbackKind::Like, FeedbackKind::Dislike];
    for (expected_cursor, kind) in [1usize, 2].into_iter().zip(kinds) {
        h.dispatcher.submit_current(&mut h.session, kind).await.unwrap();
        assert_eq!(h.session.state().cursor(), expected_cursor);
    }

    h.dispatcher
        .submit_current(&mut h.session, FeedbackKind::Maybe)
        .await
        .unwrap();

    assert_eq!(h.gateway.count(|c| matches!(c, Call::SaveModel(_))), 1);
    assert_eq!(h.gateway.count(|c| matches!(c, Call::Recommend { .. })), 2);
    assert_eq!(h.session.state().cursor(), 0);
    assert_eq!(h.current_name().as_deref(), Some("d"));
}

#[tokio::test]
async fn failed_feedback_keeps_project_and_state() {
    let mut h = Harness::new();
    h.gateway.push_batch(batch(&["a", "b"]));
    h.session.initialize().await;
    h.starred.add(&project("z")).unwrap();
    let commits_before = h.kv.commit_count();
    let prefs_before = h.preferences.load();

    h.gateway.fail_feedback(true);
    let err = h
        .dispatcher
        .submit_current(&mut h.session, FeedbackKind::Dislike)
        .await
        .unwrap_err();

    match err {
        FeedbackError::Gateway(inner) => assert_eq!(inner.kind, FailureKind::Network),
        other => panic!("unexpected error {other:?}"),
    }
    assert_eq!(h.session.state().cursor(), 0);
    assert_eq!(h.current_name().as_deref(), Some("a"));
    assert_eq!(h.kv.commit_count(), commits_before);
    assert_eq!(h.preferences.load(), prefs_before);
    assert_eq!(h.starred.list().len(), 1);

    // A manual retry goes through once the backend recovers.
    h.gateway.fail_feedback(false);
    h.dispatcher
        .submit_current(&mut h.session, FeedbackKind::Dislike)
        .await
        .unwrap();
    assert_eq!(h.current_name().as_deref(), Some("b"));
}

#[tokio::test]
async fn feedback_without_current_project_is_rejected_locally() {
    let mut h = Harness::new();
    let err = h
        .dispatcher
        .submit_current(&mut h.session, FeedbackKind::Like)
        .await
        .unwrap_err();

    assert_eq!(err, FeedbackError::NoCurrentProject);
    assert!(h.gateway.calls().is_empty());
}

#[tokio::test]
async fn unknown_feedback_kind_is_rejected_before_sending() {
    let mut h = Harness::new();
    h.gateway.push_batch(batch(&["a", "b"]));
    h.session.initialize().await;
    let calls_before = h.gateway.calls().len();

    let err = h
        .dispatcher
        .submit_named(&mut h.session, "superlike")
        .await
        .unwrap_err();
    assert!(matches!(err, FeedbackError::UnknownKind(_)));
    assert_eq!(h.gateway.calls().len(), calls_before);

    h.dispatcher
        .submit_named(&mut h.session, "MAYBE")
        .await
        .unwrap();
    let calls = h.gateway.calls();
    assert_eq!(calls.len(), calls_before + 1);
    assert!(matches!(
        calls.get(calls_before),
        Some(Call::Feedback {
            feedback: FeedbackKind::Maybe,
            ..
        })
    ));
    assert_eq!(h.current_name().as_deref(), Some("b"));
}

#[tokio::test]
async fn starring_is_independent_of_feedback() {
    let mut h = Harness::new();
    h.gateway.push_batch(batch(&["a", "b"]));
    h.session.initialize().await;

    let shown = h.session.current_project().cloned().unwrap();
    assert!(h.starred.add(&shown).unwrap());

    assert_eq!(h.session.state().cursor(), 0);
    assert!(!h
        .gateway
        .calls()
        .iter()
        .any(|call| matches!(call, Call::Feedback { .. })));
    assert!(h.starred.contains(&shown.url));
}
