//! 产品存储抽象

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Product, ProductRecord};

/// 存储层错误
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid product id: {0}")]
    InvalidId(String),
    #[error("product {0} not found")]
    NotFound(String),
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// 产品存储
///
/// 处理器通过 `Arc<dyn ProductStore>` 共享同一个实例。
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// 按存储顺序返回全部产品
    async fn list(&self) -> Result<Vec<Product>, StoreError>;
    /// 写入一条产品，返回带有分配标识的产品
    async fn insert(&self, record: ProductRecord) -> Result<Product, StoreError>;
    /// 按标识删除
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// 内存存储，保持插入顺序
#[derive(Debug, Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Product>>, StoreError> {
        self.products
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.lock()?.clone())
    }

    async fn insert(&self, record: ProductRecord) -> Result<Product, StoreError> {
        let product = record.into_product(Uuid::new_v4().to_string());
        self.lock()?.push(product.clone());
        Ok(product)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut products = self.lock()?;
        let position = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        products.remove(position);
        Ok(())
    }
}
