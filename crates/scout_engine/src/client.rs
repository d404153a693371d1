use std::time::Duration;

use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use scout_logging::{scout_debug, scout_warn};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::UploadResponse;
use crate::{ApplicationDto, ChatMessageDto, FailureKind, ListingDto, RequestError};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// Path of the unfiltered collection, relative to `base_url`.
    pub bulk_path: String,
    /// Path of the query/filter endpoint, relative to `base_url`.
    pub filter_path: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/api".to_string(),
            auth_token: None,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(12),
            max_bytes: 2 * 1024 * 1024,
            bulk_path: "ideas".to_string(),
            filter_path: "ideas/filter".to_string(),
        }
    }
}

/// Query/filter endpoint. Calls must be idempotent and side-effect-free.
#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ListingDto>, RequestError>;

    async fn search(&self, params: &[(String, String)]) -> Result<Vec<ListingDto>, RequestError>;
}

#[async_trait::async_trait]
pub trait RelationshipSource: Send + Sync {
    async fn connections(&self, viewer: &str) -> Result<Vec<String>, RequestError>;

    async fn pending_requests(&self, viewer: &str) -> Result<Vec<String>, RequestError>;

    async fn sent_applications(&self, viewer: &str) -> Result<Vec<ApplicationDto>, RequestError>;
}

#[async_trait::async_trait]
pub trait MessageSource: Send + Sync {
    async fn messages(&self, conversation: &str) -> Result<Vec<ChatMessageDto>, RequestError>;
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Uploads a file and returns the stable URL the backend assigned to it.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, RequestError>;
}

/// Everything the engine needs from the backend.
pub trait Backend: SearchBackend + RelationshipSource + MessageSource + Uploader {}

impl<T> Backend for T where T: SearchBackend + RelationshipSource + MessageSource + Uploader {}

/// REST client for the marketplace backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    settings: ClientSettings,
    base: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, RequestError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(RequestError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base,
            client,
        })
    }

    /// `path` is split on `/`; each of `ids` becomes one percent-encoded segment.
    fn endpoint(&self, path: &str, ids: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`: the base url always has path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|part| !part.is_empty()))
                .extend(ids);
        }
        url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.settings.auth_token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, RequestError> {
        scout_debug!("GET {}", url);
        let request = self.authorize(self.client.get(url.clone()));
        let response = request.send().await.map_err(map_reqwest_error)?;
        self.read_json(&url, response).await
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        response: reqwest::Response,
    ) -> Result<T, RequestError> {
        let status = response.status();
        if !status.is_success() {
            scout_warn!("{} answered {}", url, status);
            return Err(RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(RequestError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            scout_warn!("Malformed body from {}: {}", url, err);
            RequestError::new(FailureKind::Decode, err.to_string())
        })
    }
}

#[async_trait::async_trait]
impl SearchBackend for ApiClient {
    async fn list_all(&self) -> Result<Vec<ListingDto>, RequestError> {
        let url = self.endpoint(&self.settings.bulk_path, &[]);
        self.get_json(url).await
    }

    async fn search(&self, params: &[(String, String)]) -> Result<Vec<ListingDto>, RequestError> {
        let mut url = self.endpoint(&self.settings.filter_path, &[]);
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        self.get_json(url).await
    }
}

#[async_trait::async_trait]
impl RelationshipSource for ApiClient {
    async fn connections(&self, viewer: &str) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint("users", &[viewer, "connections"]);
        self.get_json(url).await
    }

    async fn pending_requests(&self, viewer: &str) -> Result<Vec<String>, RequestError> {
        let url = self.endpoint("users", &[viewer, "requests", "sent"]);
        self.get_json(url).await
    }

    async fn sent_applications(&self, viewer: &str) -> Result<Vec<ApplicationDto>, RequestError> {
        let url = self.endpoint("users", &[viewer, "applications"]);
        self.get_json(url).await
    }
}

#[async_trait::async_trait]
impl MessageSource for ApiClient {
    async fn messages(&self, conversation: &str) -> Result<Vec<ChatMessageDto>, RequestError> {
        let url = self.endpoint("chat", &[conversation, "messages"]);
        self.get_json(url).await
    }
}

#[async_trait::async_trait]
impl Uploader for ApiClient {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, RequestError> {
        let url = self.endpoint("upload", &[]);
        scout_debug!("POST {} file={} len={}", url, file_name, bytes.len());
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let request = self.authorize(self.client.post(url.clone()).multipart(form));
        let response = request.send().await.map_err(map_reqwest_error)?;
        let body: UploadResponse = self.read_json(&url, response).await?;
        Ok(body.url)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}
