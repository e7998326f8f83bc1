//! # 产品管理
//!
//! 一个最小的产品增删查应用，分为两部分：
//! - 服务端：连接 MongoDB，通过 `/api/products` 暴露列表、创建、删除接口
//! - 客户端：HTTP API 封装，以及表单、列表、根组件三个界面状态组件
//!
//! 服务端按分层组织：
//! - `app`: 应用层（产品处理器、业务服务、存储抽象）
//! - `core`: 核心层（错误处理、中间件）
//! - `infrastructure`: 基础设施层（配置、数据库、日志）

pub mod app;
pub mod client;
pub mod core;
pub mod infrastructure;

pub use app::product::model::{NewProduct, Product};
pub use app::product::store::{MemoryStore, ProductStore, StoreError};
pub use app::router;
