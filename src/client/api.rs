//! 产品 API 客户端

use async_trait::async_trait;
use reqwest::{Client, Response};

use super::form::ProductDraft;
use crate::app::product::model::Product;

/// 客户端基础地址的环境变量
pub const API_URL_VAR: &str = "PRODUCT_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api/products";

/// 客户端错误
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// 产品接口的三个调用，每个对应一次 HTTP 请求，不重试
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Product>>;
    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product>;
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

/// 基于 reqwest 的实现
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    base_url: String,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 从 `PRODUCT_API_URL` 读取地址，未设置时使用默认地址
    pub fn from_env() -> Self {
        Self::new(std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> ClientResult<Vec<Product>> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let response = self
            .client
            .post(&self.base_url)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::Transport)?;
        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(ClientError::Decode)
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(ClientError::Transport)?;
        ensure_success(response).await?;
        Ok(())
    }
}
