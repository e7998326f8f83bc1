//! 客户端：API 封装和三个界面状态组件
//!
//! - `api`: 列表、创建、删除三个 HTTP 调用
//! - `form`: 新产品表单
//! - `list`: 产品列表及删除控件
//! - `root`: 根组件，变更后整表重新加载

pub mod api;
pub mod form;
pub mod list;
pub mod root;

pub use api::{ClientError, ClientResult, HttpProductApi, ProductApi};
pub use form::{Field, ProductDraft, ProductForm};
pub use list::{DeleteRequested, ListEntry, ProductList};
pub use root::App;
