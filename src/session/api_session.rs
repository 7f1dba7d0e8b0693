use super::types::ApiError;
use super::urls::join_url;
use log::{info, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP 会话
///
/// 持有一个共享的 reqwest Client 和后端地址。
/// 需要认证的请求由调用方传入 bearer token；失败不重试。
pub struct ApiSession {
    client: Client,
    base_url: String,
}

impl ApiSession {
    /// 创建一个新的 ApiSession
    ///
    /// # 参数
    ///
    /// * `base_url` - 后端地址（如 http://localhost:8000）
    /// * `timeout` - 单次请求超时
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("legisight/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// GET 并解析 JSON
    pub async fn get_json<T>(&self, path: &str, bearer: Option<&str>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.send(self.client.get(&url), "GET", &url, bearer).await
    }

    /// GET 带查询参数
    pub async fn get_json_query<T, Q>(
        &self,
        path: &str,
        query: &Q,
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        self.send(self.client.get(&url).query(query), "GET", &url, bearer)
            .await
    }

    /// POST JSON 并解析 JSON
    pub async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.send(self.client.post(&url).json(body), "POST", &url, bearer)
            .await
    }

    async fn send<T>(
        &self,
        request: RequestBuilder,
        method: &str,
        url: &str,
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let resp = request.send().await.map_err(|e| {
            warn!("{} {} {} [transport: {}]", self, method, url, e);
            ApiError::from(e)
        })?;
        let status = resp.status();
        let body = resp.text().await?;
        info!("{} {} {} [{}]", self, method, url, status);
        decode_body(status, &body)
    }
}

/// 状态码和响应体 -> 结果
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &str,
) -> Result<T, ApiError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let mut snippet: String = body.chars().take(200).collect();
        if snippet.len() < body.len() {
            snippet.push('…');
        }
        return Err(ApiError::Status {
            status: status.as_u16(),
            body: snippet,
        });
    }
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(ApiError::Empty);
    }
    serde_json::from_str(trimmed).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

impl std::fmt::Display for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ApiSession [{}]>", self.base_url)
    }
}

impl std::fmt::Debug for ApiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ApiSession [{}]>", self.base_url)
    }
}
