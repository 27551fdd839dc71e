#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use chrono::{TimeZone, Utc};
use discovery_engine::{
    ApiGateway, FailureKind, FeedbackDispatcher, FeedbackEvent, FeedbackKind, GatewayError,
    MemoryKeyValueStore, PreferenceStore, Preferences, Project, SessionEngine, StarredStore,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(discovery_logging::initialize_for_tests);
}

pub fn project(name: &str) -> Project {
    Project {
        name: name.to_string(),
        description: format!("{name} does things"),
        url: format!("https://github.com/example/{name}"),
        stars: 120,
        language: "Python".to_string(),
        topics: vec!["python".to_string(), "machine-learning".to_string()],
        last_updated: Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    }
}

pub fn batch(names: &[&str]) -> Vec<Project> {
    names.iter().map(|name| project(name)).collect()
}

pub fn network_error() -> GatewayError {
    GatewayError {
        kind: FailureKind::Network,
        message: "connection refused".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LoadModel(String),
    SaveModel(String),
    Recommend {
        tags: String,
        min_stars: u64,
        max_stars: u64,
    },
    Feedback {
        project_url: String,
        feedback: FeedbackKind,
        tags: String,
    },
}

/// Records every call and answers recommend with scripted batches
/// (an empty batch once the script runs out).
#[derive(Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    batches: Mutex<VecDeque<Result<Vec<Project>, GatewayError>>>,
    fail_feedback: AtomicBool,
    fail_checkpoints: AtomicBool,
}

impl FakeGateway {
    pub fn push_batch(&self, projects: Vec<Project>) {
        self.batches.lock().unwrap().push_back(Ok(projects));
    }

    pub fn push_failure(&self, err: GatewayError) {
        self.batches.lock().unwrap().push_back(Err(err));
    }

    pub fn fail_feedback(&self, fail: bool) {
        self.fail_feedback.store(fail, Ordering::SeqCst);
    }

    pub fn fail_checkpoints(&self, fail: bool) {
        self.fail_checkpoints.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| pred(*call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn checkpoint_result(&self) -> Result<(), GatewayError> {
        if self.fail_checkpoints.load(Ordering::SeqCst) {
            Err(network_error())
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl ApiGateway for FakeGateway {
    async fn recommend(&self, preferences: &Preferences) -> Result<Vec<Project>, GatewayError> {
        self.record(Call::Recommend {
            tags: preferences.tags.join(),
            min_stars: preferences.min_stars,
            max_stars: preferences.max_stars,
        });
        self.batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn submit_feedback(
        &self,
        preferences: &Preferences,
        event: &FeedbackEvent,
    ) -> Result<(), GatewayError> {
        self.record(Call::Feedback {
            project_url: event.project_url.clone(),
            feedback: event.feedback,
            tags: preferences.tags.join(),
        });
        if self.fail_feedback.load(Ordering::SeqCst) {
            Err(network_error())
        } else {
            Ok(())
        }
    }

    async fn save_model(&self, server_url: &str) -> Result<(), GatewayError> {
        self.record(Call::SaveModel(server_url.to_string()));
        self.checkpoint_result()
    }

    async fn load_model(&self, server_url: &str) -> Result<(), GatewayError> {
        self.record(Call::LoadModel(server_url.to_string()));
        self.checkpoint_result()
    }
}

pub struct Harness {
    pub gateway: Arc<FakeGateway>,
    pub kv: Arc<MemoryKeyValueStore>,
    pub preferences: Arc<PreferenceStore>,
    pub starred: StarredStore,
    pub session: SessionEngine,
    pub dispatcher: FeedbackDispatcher,
}

impl Harness {
    pub fn new() -> Self {
        init_logging();
        let gateway = Arc::new(FakeGateway::default());
        let kv = Arc::new(MemoryKeyValueStore::new());
        let preferences = Arc::new(PreferenceStore::new(kv.clone()));
        let starred = StarredStore::new(kv.clone());
        let session = SessionEngine::new(gateway.clone(), preferences.clone());
        let dispatcher = FeedbackDispatcher::new(gateway.clone(), preferences.clone());
        Self {
            gateway,
            kv,
            preferences,
            starred,
            session,
            dispatcher,
        }
    }

    pub fn current_name(&self) -> Option<String> {
        self.session.current_project().map(|p| p.name.clone())
    }
}
