use std::time::Duration;

use discovery_core::{FeedbackEvent, Preferences, Project};
use discovery_logging::discovery_debug;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{FailureKind, GatewayError};

const RECOMMEND_ROUTE: &str = "recommend/";
const FEEDBACK_ROUTE: &str = "feedback/";
const SAVE_MODEL_ROUTE: &str = "save-model/";
const LOAD_MODEL_ROUTE: &str = "load-model/";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The four backend operations the client consumes.
///
/// The backend location travels with each call so that a preference edit
/// redirects the next request without rebuilding the gateway.
#[async_trait::async_trait]
pub trait ApiGateway: Send + Sync {
    /// `GET /recommend/` filtered by the preference scope.
    async fn recommend(&self, preferences: &Preferences) -> Result<Vec<Project>, GatewayError>;

    /// `POST /feedback/` with the filter scope the project was shown under.
    async fn submit_feedback(
        &self,
        preferences: &Preferences,
        event: &FeedbackEvent,
    ) -> Result<(), GatewayError>;

    /// `POST /save-model/`
    async fn save_model(&self, server_url: &str) -> Result<(), GatewayError>;

    /// `POST /load-model/`
    async fn load_model(&self, server_url: &str) -> Result<(), GatewayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }

    async fn post_empty(&self, server_url: &str, route: &str) -> Result<(), GatewayError> {
        let url = endpoint(server_url, route, &[])?;
        discovery_debug!("POST {}", url);
        self.send(self.client.post(url)).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ApiGateway for ReqwestGateway {
    async fn recommend(&self, preferences: &Preferences) -> Result<Vec<Project>, GatewayError> {
        let url = endpoint(
            &preferences.server_url,
            RECOMMEND_ROUTE,
            &preferences.filter_params(),
        )?;
        discovery_debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| GatewayError::new(FailureKind::Decode, err.to_string()))
    }

    async fn submit_feedback(
        &self,
        preferences: &Preferences,
        event: &FeedbackEvent,
    ) -> Result<(), GatewayError> {
        let url = endpoint(
            &preferences.server_url,
            FEEDBACK_ROUTE,
            &preferences.filter_params(),
        )?;
        let body = serde_json::to_vec(event)
            .map_err(|err| GatewayError::new(FailureKind::Encode, err.to_string()))?;
        discovery_debug!("POST {} feedback={} project={}", url, event.feedback, event.project_url);

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.send(request).await?;
        Ok(())
    }

    async fn save_model(&self, server_url: &str) -> Result<(), GatewayError> {
        self.post_empty(server_url, SAVE_MODEL_ROUTE).await
    }

    async fn load_model(&self, server_url: &str) -> Result<(), GatewayError> {
        self.post_empty(server_url, LOAD_MODEL_ROUTE).await
    }
}

/// Resolve `route` below `server_url`, keeping any path prefix of the server.
fn endpoint(server_url: &str, route: &str, query: &[(&str, String)]) -> Result<Url, GatewayError> {
    let mut base = Url::parse(server_url.trim())
        .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, format!("{server_url:?}: {err}")))?;
    if base.cannot_be_a_base() {
        return Err(GatewayError::new(
            FailureKind::InvalidUrl,
            format!("{server_url:?} cannot be a base url"),
        ));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base
        .join(route)
        .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))?;
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}
