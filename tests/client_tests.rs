use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use product_manager::client::{
    App, ClientError, ClientResult, DeleteRequested, Field, HttpProductApi, ProductApi,
    ProductDraft,
};
use product_manager::{router, MemoryStore, Product};
use tokio::net::TcpListener;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    List,
    Create(ProductDraft),
    Delete(String),
}

/// 记录调用顺序，按脚本依次返回列表响应
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    list_responses: Mutex<VecDeque<Vec<Product>>>,
    fail_create: bool,
}

impl RecordingApi {
    fn with_lists(lists: Vec<Vec<Product>>) -> Self {
        Self {
            list_responses: Mutex::new(lists.into()),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductApi for RecordingApi {
    async fn list(&self) -> ClientResult<Vec<Product>> {
        self.calls.lock().unwrap().push(Call::List);
        Ok(self
            .list_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        self.calls.lock().unwrap().push(Call::Create(draft.clone()));
        if self.fail_create {
            return Err(ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(Product {
            id: "created".to_string(),
            name: draft.name.clone(),
            price: draft.price.parse().unwrap_or_default(),
            description: draft.description.clone(),
        })
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(Call::Delete(id.to_string()));
        Ok(())
    }
}

fn product(id: &str, name: &str, price: f64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        description: String::new(),
    }
}

#[tokio::test]
async fn load_replaces_list() {
    let mut app = App::new(RecordingApi::with_lists(vec![vec![
        product("a", "Widget", 9.99),
        product("b", "Lamp", 20.0),
    ]]));
    assert!(app.products().is_empty());

    app.load().await.unwrap();

    assert_eq!(app.products().len(), 2);
    let entries = app.list().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].label, "Widget - $9.99");
    assert_eq!(entries[1].label, "Lamp - $20");
}

#[tokio::test]
async fn delete_issues_one_delete_then_one_reload() {
    let mut app = App::new(RecordingApi::with_lists(vec![
        vec![product("abc123", "Widget", 9.99)],
        vec![],
    ]));
    app.load().await.unwrap();

    app.handle_delete(DeleteRequested("abc123".to_string()))
        .await
        .unwrap();

    assert_eq!(
        app.api().calls(),
        vec![Call::List, Call::Delete("abc123".to_string()), Call::List]
    );
    assert!(app.products().is_empty());
}

#[tokio::test]
async fn create_shows_only_reloaded_list() {
    // 重新加载返回的列表不包含新建的产品
    let reloaded = vec![product("x", "Other", 1.0)];
    let mut app = App::new(RecordingApi::with_lists(vec![vec![], reloaded.clone()]));
    app.load().await.unwrap();

    app.set_field(Field::Name, "Widget");
    app.set_field(Field::Price, "9.99");
    assert!(app.submit_form().await.unwrap());

    assert_eq!(app.products(), reloaded.as_slice());
    assert_eq!(
        app.api().calls(),
        vec![
            Call::List,
            Call::Create(ProductDraft {
                name: "Widget".to_string(),
                price: "9.99".to_string(),
                description: String::new(),
            }),
            Call::List,
        ]
    );
    assert_eq!(app.form().draft(), &ProductDraft::default());
}

#[tokio::test]
async fn incomplete_form_makes_no_calls() {
    let mut app = App::new(RecordingApi::default());

    app.set_field(Field::Price, "9.99");
    assert!(!app.submit_form().await.unwrap());

    app.set_field(Field::Price, "");
    app.set_field(Field::Name, "Widget");
    assert!(!app.submit_form().await.unwrap());

    assert!(app.api().calls().is_empty());
}

#[tokio::test]
async fn failed_create_skips_reload() {
    let api = RecordingApi {
        fail_create: true,
        ..RecordingApi::default()
    };
    let mut app = App::new(api);

    app.set_field(Field::Name, "Widget");
    app.set_field(Field::Price, "9.99");
    let err = app.submit_form().await.unwrap_err();

    assert!(matches!(err, ClientError::Status { status: 500, .. }));
    assert_eq!(app.api().calls().len(), 1);
}

/// 在随机端口上启动使用内存存储的 API 服务，返回服务地址
async fn spawn_api_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(Arc::new(MemoryStore::new())))
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn http_client_load_add_delete() {
    let base = spawn_api_server().await;
    let mut app = App::new(HttpProductApi::new(format!("{}/api/products", base)));

    app.load().await.unwrap();
    assert!(app.products().is_empty());

    app.set_field(Field::Name, "Widget");
    app.set_field(Field::Price, "9.99");
    assert!(app.submit_form().await.unwrap());

    assert_eq!(app.products().len(), 1);
    let widget = &app.products()[0];
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.price, 9.99);
    assert_eq!(widget.description, "");

    let event = app.list().entries()[0].delete();
    app.handle_delete(event).await.unwrap();
    assert!(app.products().is_empty());

    let err = app.api().delete("nope").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status: 404, .. }));
}

#[tokio::test]
async fn http_client_reports_rejected_create() {
    let base = spawn_api_server().await;
    let api = HttpProductApi::new(format!("{}/api/products", base));

    let draft = ProductDraft {
        name: "Widget".to_string(),
        price: "cheap".to_string(),
        description: String::new(),
    };
    let err = api.create(&draft).await.unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("price"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn http_client_reports_undecodable_body() {
    let base = spawn_api_server().await;
    // /health 返回对象而不是产品数组
    let api = HttpProductApi::new(format!("{}/health", base));

    let err = api.list().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
