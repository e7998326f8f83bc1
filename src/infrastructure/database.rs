//! 数据库基础设施

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client, Collection,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::config::DatabaseConfig;
use crate::app::product::{
    model::{Product, ProductRecord},
    store::{ProductStore, StoreError},
};

/// MongoDB 中保存的产品文档
#[derive(Debug, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    price: f64,
    #[serde(default)]
    description: String,
}

impl ProductDocument {
    fn into_product(self) -> Option<Product> {
        Some(Product {
            id: self.id?.to_hex(),
            name: self.name,
            price: self.price,
            description: self.description,
        })
    }
}

/// 进程内唯一的数据库连接，启动时创建一次
pub struct DatabaseManager {
    client: Client,
    products: Collection<ProductDocument>,
}

impl DatabaseManager {
    /// 连接数据库并执行一次 `ping`，失败时不重试
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        info!("Connecting to database: {}", config.redacted_uri());

        let mut options = ClientOptions::parse(config.connection_uri()).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_selection_timeout = Some(config.connect_timeout());

        let client = Client::with_options(options)?;
        let database = client.database(&config.name);
        database.run_command(doc! { "ping": 1 }).await?;

        info!("MongoDB connected");
        Ok(Self {
            products: database.collection(&config.collection),
            client,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl ProductStore for DatabaseManager {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let documents: Vec<ProductDocument> = self.products.find(doc! {}).await?.try_collect().await?;
        debug!("Loaded {} product documents", documents.len());
        Ok(documents
            .into_iter()
            .filter_map(ProductDocument::into_product)
            .collect())
    }

    async fn insert(&self, record: ProductRecord) -> Result<Product, StoreError> {
        let document = ProductDocument {
            id: None,
            name: record.name.clone(),
            price: record.price,
            description: record.description.clone(),
        };
        let result = self.products.insert_one(&document).await?;
        let id = result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .unwrap_or_else(|| result.inserted_id.to_string());
        Ok(record.into_product(id))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let oid = parse_id(id)?;
        let result = self.products.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
