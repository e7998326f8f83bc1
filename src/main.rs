//! 产品 API 服务
//!
//! 启动流程：加载配置 → 初始化日志 → 连接 MongoDB（失败即以状态码 1 退出）→ 启动 HTTP 服务

use std::sync::Arc;

use anyhow::Context;
use product_manager::{
    app::{router, PRODUCTS_PATH},
    infrastructure::{config::Config, database::DatabaseManager, logger::Logger},
};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let _log_guard = Logger::init(&config.logging)?;

    let database = match DatabaseManager::connect(&config.database).await {
        Ok(database) => Arc::new(database),
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let app = router(database.clone());

    let addr = format!("{}:{}", config.http.bind_address, config.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("🚀 Product API listening on http://{}", addr);
    info!("   GET    {}", PRODUCTS_PATH);
    info!("   POST   {}", PRODUCTS_PATH);
    info!("   DELETE {}/:id", PRODUCTS_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    database.client().clone().shutdown().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
