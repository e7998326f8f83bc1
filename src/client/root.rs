//! 根组件：持有产品列表，每次变更后整表重新加载

use tracing::debug;

use super::api::{ClientResult, ProductApi};
use super::form::{Field, ProductDraft, ProductForm};
use super::list::{DeleteRequested, ProductList};
use crate::app::product::model::Product;

pub struct App<A> {
    api: A,
    form: ProductForm,
    products: Vec<Product>,
}

impl<A: ProductApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: ProductForm::new(),
            products: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn list(&self) -> ProductList<'_> {
        ProductList::new(&self.products)
    }

    /// 重新获取并整体替换列表
    pub async fn load(&mut self) -> ClientResult<()> {
        self.products = self.api.list().await?;
        debug!("Loaded {} products", self.products.len());
        Ok(())
    }

    /// 先创建再重新加载，不做乐观更新
    pub async fn handle_add(&mut self, draft: ProductDraft) -> ClientResult<()> {
        self.api.create(&draft).await?;
        self.load().await
    }

    /// 先删除再重新加载
    pub async fn handle_delete(&mut self, event: DeleteRequested) -> ClientResult<()> {
        self.api.delete(&event.0).await?;
        self.load().await
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// 提交表单；表单未产生新增事件时返回 `Ok(false)`
    pub async fn submit_form(&mut self) -> ClientResult<bool> {
        match self.form.submit() {
            Some(draft) => {
                self.handle_add(draft).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn view(&self) -> String {
        let draft = self.form.draft();
        format!(
            "Product Manager\n[name: {:?}] [price: {:?}] [description: {:?}]\n{}",
            draft.name,
            draft.price,
            draft.description,
            self.list().render()
        )
    }
}
