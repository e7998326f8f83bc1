//! 应用层

pub mod product;

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use product::{handler, service::ProductService, store::ProductStore};

/// 产品接口的基础路径
pub const PRODUCTS_PATH: &str = "/api/products";

/// 共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            product_service: ProductService::new(store),
        }
    }
}

/// 构建完整的路由
pub fn router(store: Arc<dyn ProductStore>) -> Router {
    Router::new()
        .route(
            PRODUCTS_PATH,
            get(handler::list_products).post(handler::create_product),
        )
        .route(
            &format!("{}/:id", PRODUCTS_PATH),
            axum::routing::delete(handler::delete_product),
        )
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(middleware::from_fn(request_logging_middleware)),
        )
        .with_state(AppState::new(store))
}

/// 健康检查
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
