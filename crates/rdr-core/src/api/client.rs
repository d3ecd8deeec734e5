use crate::error::ApiError;
use crate::utils::error_helpers::*;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const USER_AGENT: &str = concat!("rdr-cli/", env!("CARGO_PKG_VERSION"));

/// Redash REST API client.
///
/// Every operation goes through [`get`](Self::get), [`post`](Self::post) or
/// [`delete`](Self::delete), which address `{base_url}/api/{path}` and treat any
/// status other than 200 as a failure.
#[derive(Debug, Clone)]
pub struct RedashClient {
    client: Client,
    pub base_url: String,
    api_key: String,
}

impl RedashClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| convert_request_error(e, &Method::GET, "client_init"))?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(RedashClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/api/{}", self.base_url, path.trim_start_matches('/'));
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("Key {}", self.api_key))
    }

    pub async fn get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::GET, path);
        self.send(request, Method::GET, path).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .build_request(Method::POST, path)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        self.send(request, Method::POST, path).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(Method::DELETE, path);
        self.send(request, Method::DELETE, path).await
    }

    async fn send<T>(&self, request: RequestBuilder, method: Method, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        log::debug!("{} /api/{}", method, path);

        let response = request
            .send()
            .await
            .map_err(|e| convert_request_error(e, &method, path))?;

        let status = response.status();
        log::debug!("{} /api/{} -> {}", method, path, status.as_u16());

        let body = response
            .text()
            .await
            .map_err(|e| convert_request_error(e, &method, path))?;

        Self::handle_response(status, &body, &method, path)
    }

    /// Check the status and decode the body. An empty body decodes as JSON `null`.
    pub fn handle_response<T>(
        status: StatusCode,
        body: &str,
        method: &Method,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        if status != StatusCode::OK {
            return Err(ApiError::RequestFailed {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body.to_string()
                },
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body };
        serde_json::from_str(body).map_err(|e| convert_json_error(e, endpoint))
    }
}
