//! 产品业务服务

use std::sync::Arc;

use tracing::info;

use super::model::{NewProduct, Product, ProductRecord};
use super::store::ProductStore;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
        Ok(self.store.list().await?)
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Product, CoreError> {
        let record = ProductRecord::try_from(new)?;
        let product = self.store.insert(record).await?;
        info!("Created product: {} ({})", product.name, product.id);
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), CoreError> {
        self.store.delete(id).await?;
        info!("Deleted product {}", id);
        Ok(())
    }
}
