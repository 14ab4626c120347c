use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

use super::{
    retry::{self, RetryPolicy},
    session::SessionStore,
    types::{ApiError, DownloadedFile, RefreshResponse},
};
use crate::config;

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub const NETWORK_ERROR_MESSAGE: &str = "Unable to reach the server. Check your connection.";

pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Queries may be replayed on transient failures; mutations never are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Query,
    Mutation,
}

impl RequestKind {
    fn for_method(method: &Method) -> Self {
        if *method == Method::GET {
            RequestKind::Query
        } else {
            RequestKind::Mutation
        }
    }
}

type UnauthorizedHook = Rc<RefCell<Option<Rc<dyn Fn()>>>>;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    retry: RetryPolicy,
    on_unauthorized: UnauthorizedHook,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session: SessionStore::default(),
            retry: RetryPolicy::from_config(&config::current()),
            on_unauthorized: Rc::new(RefCell::new(None)),
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
            ..Self::new()
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Invoked after a 401 that could not be recovered by a token refresh.
    pub fn set_on_unauthorized(&self, hook: impl Fn() + 'static) {
        *self.on_unauthorized.borrow_mut() = Some(Rc::new(hook));
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.client
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn handle_unauthorized(&self) {
        self.session.clear();
        let hook = self.on_unauthorized.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Sends the request produced by `build`, attaching the bearer token and a
    /// fresh request id on every attempt.
    pub(crate) async fn send_with<F>(
        &self,
        method: Method,
        path: &str,
        build: F,
    ) -> Result<Response, ApiError>
    where
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url, path);
        let kind = RequestKind::for_method(&method);
        let mut backoff = self.retry.backoff();
        let mut refreshed = false;

        loop {
            let request_id = Uuid::new_v4().to_string();
            let mut builder = self
                .client
                .request(method.clone(), &url)
                .header("X-Request-Id", &request_id);
            if let Some(token) = self.session.token() {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
            let builder = build(builder);

            let outcome = match builder.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::UNAUTHORIZED && !refreshed {
                        if self.try_refresh(&base_url).await {
                            refreshed = true;
                            continue;
                        }
                    }
                    let body = response.bytes().await.unwrap_or_default();
                    let error = ApiError::from_status_and_body(status.as_u16(), &body);
                    if status == StatusCode::UNAUTHORIZED {
                        self.handle_unauthorized();
                    }
                    error
                }
                Err(err) => {
                    log::warn!("{} {} [{}] failed: {}", method, path, request_id, err);
                    ApiError::network(NETWORK_ERROR_MESSAGE)
                }
            };

            if kind == RequestKind::Query && retry::is_retryable(&outcome) {
                if let Some(delay) = backoff.next() {
                    log::debug!(
                        "retrying {} {} in {} ms ({})",
                        method,
                        path,
                        delay.as_millis(),
                        outcome.code
                    );
                    retry::sleep(delay).await;
                    continue;
                }
            }

            log::error!("{} {} [{}]: {} {}", method, path, request_id, outcome.code, outcome.error);
            return Err(outcome);
        }
    }

    async fn try_refresh(&self, base_url: &str) -> bool {
        let refresh_token = match self.session.refresh_token() {
            Some(token) => token,
            None => return false,
        };
        let response = self
            .client
            .post(format!("{}/auth/refresh", base_url))
            .header("X-Request-Id", Uuid::new_v4().to_string())
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await;
        match response {
            Ok(resp) if resp.status().is_success() => match resp.json::<RefreshResponse>().await {
                Ok(tokens) => {
                    self.session
                        .replace_tokens(tokens.token, tokens.refresh_token);
                    true
                }
                Err(err) => {
                    log::warn!("refresh response unreadable: {}", err);
                    false
                }
            },
            _ => false,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send_with(Method::GET, path, |b| b).await?;
        map_json_response(response).await
    }

    pub(crate) async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        let response = self.send_with(Method::GET, path, |b| b.query(params)).await?;
        map_json_response(response).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_with(method, path, |b| b.json(body)).await?;
        map_json_response(response).await
    }

    pub(crate) async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        self.send_with(method, path, |b| b).await.map(|_| ())
    }

    pub(crate) async fn send_for_file<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        fallback_name: &str,
    ) -> Result<DownloadedFile, ApiError> {
        let response = self.send_with(method, path, |b| b.json(body)).await?;
        map_file_response(response, fallback_name).await
    }
}

pub(crate) async fn map_json_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|_| ApiError::network(NETWORK_ERROR_MESSAGE))?;
    let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
    serde_json::from_slice(payload).map_err(|e| {
        log::error!("unexpected response shape: {}", e);
        ApiError::unknown(format!("Failed to parse response: {}", e))
    })
}

async fn map_file_response(response: Response, fallback_name: &str) -> Result<DownloadedFile, ApiError> {
    let headers = response.headers().clone();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let file_name = headers
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| fallback_name.to_string());
    let bytes = response
        .bytes()
        .await
        .map_err(|_| ApiError::network(NETWORK_ERROR_MESSAGE))?;
    Ok(DownloadedFile {
        file_name,
        content_type,
        bytes: bytes.to_vec(),
    })
}

/// Reads `filename*=UTF-8''...` (preferred) or `filename="..."`.
pub fn filename_from_disposition(value: &str) -> Option<String> {
    let mut plain = None;
    for part in value.split(';').map(str::trim) {
        if let Some(encoded) = part.strip_prefix("filename*=") {
            let encoded = encoded.trim_matches('"');
            let raw = encoded.rsplit("''").next().unwrap_or(encoded);
            let decoded = percent_encoding::percent_decode_str(raw)
                .decode_utf8()
                .ok()?
                .to_string();
            if !decoded.is_empty() {
                return Some(decoded);
            }
        } else if let Some(name) = part.strip_prefix("filename=") {
            let name = name.trim_matches('"');
            if !name.is_empty() {
                plain = Some(name.to_string());
            }
        }
    }
    plain
}
